//! HTTP handlers for the Users API

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_helpers::{
    Confirmation, ObjectIdPath, ValidatedJson,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, LoginRequest, LoginResponse, UserCount, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        get_user,
        create_user,
        register,
        login,
        delete_user,
        count_users,
    ),
    components(
        schemas(CreateUser, UserResponse, LoginRequest, LoginResponse, UserCount, Confirmation),
        responses(
            NotFoundResponse,
            ConflictResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "Accounts and login")
    )
)]
pub struct ApiDoc;

pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/get/count", get(count_users))
        .route("/{id}", get(get_user).delete(delete_user))
        .with_state(Arc::new(service))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24-char hex)")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.get_user(id).await?.into()))
}

/// Create a user, admin flag included
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.create_user(input).await?.into()))
}

/// Register a customer account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User registered", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.register(input).await?.into()))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<LoginResponse>> {
    Ok(Json(service.login(input).await?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24-char hex)")),
    responses(
        (status = 200, description = "User deleted", body = Confirmation),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> UserResult<Json<Confirmation>> {
    service.delete_user(id).await?;
    Ok(Json(Confirmation::ok("The user is deleted!")))
}

/// Number of registered users
#[utoipa::path(
    get,
    path = "/get/count",
    tag = "Users",
    responses(
        (status = 200, description = "User count", body = UserCount),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<UserCount>> {
    Ok(Json(UserCount {
        user_count: service.count_users().await?,
    }))
}
