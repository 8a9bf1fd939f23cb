//! HTTP handlers for the Orders API

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    Confirmation, ObjectIdPath, ValidatedJson,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestReferenceResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use domain_products::ProductRepository;
use domain_users::UserRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{
    OrderCount, OrderInput, OrderItemInput, OrderItemResponse, OrderResponse, OrderStatus,
    ProductField, StatusUpdate, TotalSales, UserField,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_orders,
        get_order,
        create_order,
        update_order_status,
        delete_order,
        total_sales,
        count_orders,
        user_orders,
    ),
    components(
        schemas(
            OrderResponse,
            OrderItemResponse,
            OrderInput,
            OrderItemInput,
            OrderStatus,
            StatusUpdate,
            ProductField,
            UserField,
            TotalSales,
            OrderCount,
            Confirmation
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            BadRequestReferenceResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Orders", description = "Order placement and fulfilment")
    )
)]
pub struct ApiDoc;

type SharedService<O, P, U> = Arc<OrderService<O, P, U>>;

pub fn router<O, P, U>(service: OrderService<O, P, U>) -> Router
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/get/totalsales", get(total_sales))
        .route("/get/count", get(count_orders))
        .route("/get/userorders/{userid}", get(user_orders))
        .route(
            "/{id}",
            get(get_order).put(update_order_status).delete(delete_order),
        )
        .with_state(Arc::new(service))
}

/// List all orders, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Orders",
    responses(
        (status = 200, description = "All orders with owners populated", body = Vec<OrderResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<O: OrderRepository, P: ProductRepository, U: UserRepository>(
    State(service): State<SharedService<O, P, U>>,
) -> OrderResult<Json<Vec<OrderResponse>>> {
    let orders = service.list_orders().await?;
    Ok(Json(
        orders
            .into_iter()
            .map(|o| OrderResponse::with_user(o.order, o.user))
            .collect(),
    ))
}

/// Get an order with its owner and products
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order id (24-char hex)")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<O: OrderRepository, P: ProductRepository, U: UserRepository>(
    State(service): State<SharedService<O, P, U>>,
    ObjectIdPath(id): ObjectIdPath,
) -> OrderResult<Json<OrderResponse>> {
    let details = service.get_order(id).await?;
    Ok(Json(OrderResponse::detailed(
        details.order,
        details.user,
        &details.products,
    )))
}

/// Place an order
#[utoipa::path(
    post,
    path = "",
    tag = "Orders",
    request_body = OrderInput,
    responses(
        (status = 200, description = "Order created; totalPrice computed", body = OrderResponse),
        (status = 400, response = BadRequestReferenceResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<O: OrderRepository, P: ProductRepository, U: UserRepository>(
    State(service): State<SharedService<O, P, U>>,
    ValidatedJson(input): ValidatedJson<OrderInput>,
) -> OrderResult<Json<OrderResponse>> {
    Ok(Json(service.create_order(input).await?.into()))
}

/// Change an order's status
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order id (24-char hex)")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order_status<O: OrderRepository, P: ProductRepository, U: UserRepository>(
    State(service): State<SharedService<O, P, U>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(update): ValidatedJson<StatusUpdate>,
) -> OrderResult<Json<OrderResponse>> {
    Ok(Json(service.update_status(id, update.status).await?.into()))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order id (24-char hex)")),
    responses(
        (status = 200, description = "Order deleted", body = Confirmation),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_order<O: OrderRepository, P: ProductRepository, U: UserRepository>(
    State(service): State<SharedService<O, P, U>>,
    ObjectIdPath(id): ObjectIdPath,
) -> OrderResult<Json<Confirmation>> {
    service.delete_order(id).await?;
    Ok(Json(Confirmation::ok("The order is deleted!")))
}

/// Sum of every order's total
#[utoipa::path(
    get,
    path = "/get/totalsales",
    tag = "Orders",
    responses(
        (status = 200, description = "Total sales", body = TotalSales),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn total_sales<O: OrderRepository, P: ProductRepository, U: UserRepository>(
    State(service): State<SharedService<O, P, U>>,
) -> OrderResult<Json<TotalSales>> {
    Ok(Json(TotalSales {
        total_sales: service.total_sales().await?,
    }))
}

/// Number of orders
#[utoipa::path(
    get,
    path = "/get/count",
    tag = "Orders",
    responses(
        (status = 200, description = "Order count", body = OrderCount),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_orders<O: OrderRepository, P: ProductRepository, U: UserRepository>(
    State(service): State<SharedService<O, P, U>>,
) -> OrderResult<Json<OrderCount>> {
    Ok(Json(OrderCount {
        order_count: service.count_orders().await?,
    }))
}

/// One user's orders, newest first
#[utoipa::path(
    get,
    path = "/get/userorders/{userid}",
    tag = "Orders",
    params(("userid" = String, Path, description = "User id (24-char hex)")),
    responses(
        (status = 200, description = "The user's orders with products populated", body = Vec<OrderResponse>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn user_orders<O: OrderRepository, P: ProductRepository, U: UserRepository>(
    State(service): State<SharedService<O, P, U>>,
    ObjectIdPath(user): ObjectIdPath,
) -> OrderResult<Json<Vec<OrderResponse>>> {
    let orders = service.user_orders(user).await?;
    Ok(Json(
        orders
            .into_iter()
            .map(|o| OrderResponse::detailed(o.order, o.user, &o.products))
            .collect(),
    ))
}
