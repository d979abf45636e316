//! HTTP handlers for the Products API

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, ValidatedJson,
    errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse},
};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{PageRequest, PageableResult, Product, ProductRequest, ProductResponse};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        insert_product,
        list_products,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductRequest, ProductResponse, PageableResult),
        responses(NotFoundResponse, BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Products", description = "Product stock keyed by serial number")
    )
)]
pub struct ApiDoc;

/// Create the products router. Paths are relative to the mount point.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/v1", post(insert_product).get(list_products))
        .route(
            "/v1/{serial_number}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Insert a product, or add to its stock when the serial number already exists
#[utoipa::path(
    post,
    path = "/v1",
    tag = "Products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product inserted or stock accumulated", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn insert_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<ProductRequest>,
) -> ProductResult<impl IntoResponse> {
    info!(serial_number = %input.serial_number, "Insert request received");
    let product = service.insert(input).await?;
    info!(serial_number = %product.serial_number, "Insert request finished");
    Ok((StatusCode::CREATED, Json(product)))
}

/// List products one page at a time
#[utoipa::path(
    get,
    path = "/v1",
    tag = "Products",
    params(PageRequest),
    responses(
        (status = 200, description = "Page of products", body = PageableResult),
        (status = 400, description = "Malformed pagination parameters"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<PageableResult>, AppError> {
    let Query(page_request) = query?;
    info!("List request received");
    let page = service.find_all(page_request).await?;
    info!(returned = page.content.len(), "List request finished");
    Ok(Json(page))
}

/// Get a product by serial number
#[utoipa::path(
    get,
    path = "/v1/{serial_number}",
    tag = "Products",
    params(
        ("serial_number" = String, Path, description = "Product serial number")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(serial_number): Path<String>,
) -> ProductResult<Json<ProductResponse>> {
    info!(serial_number = %serial_number, "Find request received");
    let product = service.find_by_serial_number(&serial_number).await?;
    Ok(Json(product))
}

/// Overwrite name, serial number and price of a product. Quantity is left as stored.
#[utoipa::path(
    put,
    path = "/v1/{serial_number}",
    tag = "Products",
    params(
        ("serial_number" = String, Path, description = "Current serial number")
    ),
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product updated", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(serial_number): Path<String>,
    ValidatedJson(input): ValidatedJson<ProductRequest>,
) -> ProductResult<impl IntoResponse> {
    info!(serial_number = %serial_number, "Update request received");
    let product = service.update_by_serial_number(&serial_number, input).await?;
    info!(serial_number = %product.serial_number, "Update request finished");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Delete a product by serial number
#[utoipa::path(
    delete,
    path = "/v1/{serial_number}",
    tag = "Products",
    params(
        ("serial_number" = String, Path, description = "Product serial number")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(serial_number): Path<String>,
) -> ProductResult<impl IntoResponse> {
    info!(serial_number = %serial_number, "Delete request received");
    service.delete_by_serial_number(&serial_number).await?;
    info!(serial_number = %serial_number, "Delete request finished");
    Ok(StatusCode::NO_CONTENT)
}
