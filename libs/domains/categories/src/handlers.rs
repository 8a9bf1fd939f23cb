//! HTTP handlers for the Categories API

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    Confirmation, ObjectIdPath, ValidatedJson,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CategoryResult;
use crate::models::{CategoryInput, CategoryResponse};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        get_category,
        create_category,
        update_category,
        delete_category,
    ),
    components(
        schemas(CategoryResponse, CategoryInput, Confirmation),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Categories", description = "Product category management")
    )
)]
pub struct ApiDoc;

pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .with_state(Arc::new(service))
}

/// List all categories
#[utoipa::path(
    get,
    path = "",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
) -> CategoryResult<Json<Vec<CategoryResponse>>> {
    let categories = service.list_categories().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category id (24-char hex)")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CategoryResult<Json<CategoryResponse>> {
    Ok(Json(service.get_category(id).await?.into()))
}

/// Create a category
#[utoipa::path(
    post,
    path = "",
    tag = "Categories",
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category created", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> CategoryResult<Json<CategoryResponse>> {
    Ok(Json(service.create_category(input).await?.into()))
}

/// Replace a category
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category id (24-char hex)")),
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> CategoryResult<Json<CategoryResponse>> {
    Ok(Json(service.update_category(id, input).await?.into()))
}

/// Delete a category
///
/// Products still pointing at it keep the dangling reference.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category id (24-char hex)")),
    responses(
        (status = 200, description = "Category deleted", body = Confirmation),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CategoryResult<Json<Confirmation>> {
    service.delete_category(id).await?;
    Ok(Json(Confirmation::ok("The category is deleted!")))
}
