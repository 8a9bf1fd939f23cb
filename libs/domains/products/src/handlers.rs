//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, Query, State,
        multipart::{Field, MultipartRejection},
        rejection::PathRejection,
    },
    routing::{get, post, put},
};
use axum_helpers::{
    AppError, Confirmation, ObjectIdPath, ValidatedJson,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestReferenceResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse, UnsupportedMediaTypeResponse,
    },
};
use domain_categories::CategoryRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CategoryField, ProductCount, ProductFilter, ProductInput, ProductResponse, StoredFile,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::upload::{PendingUpload, UploadSink};

/// Multipart part carrying the image for `POST /upload`.
pub const IMAGE_PART: &str = "image";
/// Multipart part repeated for `PUT /gallery-images/{id}`.
pub const GALLERY_PART: &str = "images";
pub const MAX_GALLERY_IMAGES: usize = 10;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        create_product,
        update_product,
        delete_product,
        count_products,
        featured_products,
        featured_products_limited,
        upload_image,
        update_gallery,
    ),
    components(
        schemas(
            ProductResponse, ProductInput, CategoryField, ProductCount, StoredFile, Confirmation
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            BadRequestReferenceResponse,
            UnsupportedMediaTypeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Router state: the service plus where uploads land.
pub struct ProductsState<R: ProductRepository, C: CategoryRepository> {
    pub service: ProductService<R, C>,
    pub uploads: UploadSink,
}

/// Create the products router with all HTTP endpoints
pub fn router<R, C>(service: ProductService<R, C>, uploads: UploadSink) -> Router
where
    R: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    let body_limit = DefaultBodyLimit::max(uploads.max_bytes());
    let state = Arc::new(ProductsState { service, uploads });

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/get/count", get(count_products))
        .route("/get/featured", get(featured_products))
        .route("/get/featured/{count}", get(featured_products_limited))
        .route("/upload", post(upload_image).layer(body_limit.clone()))
        .route("/gallery-images/{id}", put(update_gallery).layer(body_limit))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}

type SharedState<R, C> = State<Arc<ProductsState<R, C>>>;

fn render_all(products: Vec<crate::models::Product>) -> Json<Vec<ProductResponse>> {
    Json(products.into_iter().map(Into::into).collect())
}

/// List products, optionally restricted to some categories
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "List of products", body = Vec<ProductResponse>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository, C: CategoryRepository>(
    State(state): SharedState<R, C>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let products = state.service.list_products(filter).await?;
    Ok(render_all(products))
}

/// Get a product with its category embedded
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id (24-char hex)")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository, C: CategoryRepository>(
    State(state): SharedState<R, C>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<ProductResponse>> {
    let found = state.service.get_product(id).await?;
    Ok(Json(ProductResponse::populated(found.product, found.category)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product created", body = ProductResponse),
        (status = 400, response = BadRequestReferenceResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository, C: CategoryRepository>(
    State(state): SharedState<R, C>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<Json<ProductResponse>> {
    let product = state.service.create_product(input).await?;
    Ok(Json(product.into()))
}

/// Replace a product's fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id (24-char hex)")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = BadRequestReferenceResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository, C: CategoryRepository>(
    State(state): SharedState<R, C>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<Json<ProductResponse>> {
    let product = state.service.update_product(id, input).await?;
    Ok(Json(product.into()))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id (24-char hex)")),
    responses(
        (status = 200, description = "Product deleted", body = Confirmation),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository, C: CategoryRepository>(
    State(state): SharedState<R, C>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<Confirmation>> {
    state.service.delete_product(id).await?;
    Ok(Json(Confirmation::ok("The product is deleted!")))
}

/// Count all products
#[utoipa::path(
    get,
    path = "/get/count",
    tag = "Products",
    responses(
        (status = 200, description = "Number of products", body = ProductCount),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_products<R: ProductRepository, C: CategoryRepository>(
    State(state): SharedState<R, C>,
) -> ProductResult<Json<ProductCount>> {
    let product_count = state.service.count_products().await?;
    Ok(Json(ProductCount { product_count }))
}

/// All featured products
#[utoipa::path(
    get,
    path = "/get/featured",
    tag = "Products",
    responses(
        (status = 200, description = "Featured products", body = Vec<ProductResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn featured_products<R: ProductRepository, C: CategoryRepository>(
    State(state): SharedState<R, C>,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let products = state.service.featured_products(None).await?;
    Ok(render_all(products))
}

/// Up to `count` featured products; 0 means all of them
#[utoipa::path(
    get,
    path = "/get/featured/{count}",
    tag = "Products",
    params(("count" = u64, Path, description = "Maximum number of products, 0 for no limit")),
    responses(
        (status = 200, description = "Featured products", body = Vec<ProductResponse>),
        (status = 400, description = "Count is not a non-negative integer"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn featured_products_limited<R: ProductRepository, C: CategoryRepository>(
    State(state): SharedState<R, C>,
    count: Result<Path<u64>, PathRejection>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let Path(count) = count.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let products = state.service.featured_products(Some(count)).await?;
    Ok(render_all(products))
}

/// Read one file part after its MIME type passed the allow-list.
async fn read_image(field: Field<'_>) -> Result<PendingUpload, AppError> {
    let pending = PendingUpload::new(field.file_name(), field.content_type())?;
    let bytes = field.bytes().await?;
    Ok(pending.with_bytes(bytes))
}

/// Upload one product image
///
/// The returned `url` is meant for the `image` field of create/update.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Products",
    request_body(content_type = "multipart/form-data", description = "One `image` part (png or jpeg)"),
    responses(
        (status = 200, description = "Image stored", body = StoredFile),
        (status = 400, response = UnsupportedMediaTypeResponse),
        (status = 413, description = "Upload exceeds the size limit"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_image<R: ProductRepository, C: CategoryRepository>(
    State(state): SharedState<R, C>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<StoredFile>, AppError> {
    let mut multipart = multipart?;
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let is_file = field.file_name().is_some();

        match name.as_str() {
            IMAGE_PART if image.is_none() => image = Some(read_image(field).await?),
            _ if is_file || name == IMAGE_PART => {
                return Err(ProductError::UnexpectedField(name).into());
            }
            _ => {}
        }
    }

    let image = image.ok_or(ProductError::MissingFile(IMAGE_PART))?;
    let stored = state.uploads.store(image).await?;
    Ok(Json(stored))
}

/// Replace a product's image gallery
///
/// Every part is checked before any file is written.
#[utoipa::path(
    put,
    path = "/gallery-images/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id (24-char hex)")),
    request_body(content_type = "multipart/form-data", description = "Up to 10 `images` parts"),
    responses(
        (status = 200, description = "Gallery replaced", body = ProductResponse),
        (status = 400, response = UnsupportedMediaTypeResponse),
        (status = 404, response = NotFoundResponse),
        (status = 413, description = "Upload exceeds the size limit"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_gallery<R: ProductRepository, C: CategoryRepository>(
    State(state): SharedState<R, C>,
    ObjectIdPath(id): ObjectIdPath,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    state.service.ensure_exists(id).await?;

    let mut multipart = multipart?;
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let is_file = field.file_name().is_some();

        if name == GALLERY_PART {
            if images.len() == MAX_GALLERY_IMAGES {
                return Err(ProductError::TooManyFiles(MAX_GALLERY_IMAGES).into());
            }
            images.push(read_image(field).await?);
        } else if is_file {
            return Err(ProductError::UnexpectedField(name).into());
        }
    }

    let stored = state.uploads.store_all(images).await?;
    let urls = stored.into_iter().map(|file| file.url).collect();

    let product = state.service.set_gallery(id, urls).await?;
    Ok(Json(product.into()))
}
