use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::repair_orders::{OrderTotal, RepairOrderInput, RepairOrderList, SetServicesRequest},
    error::AppResult,
    models::RepairOrder,
    response::ApiResponse,
    routes::params::RepairOrderListQuery,
    services::repair_order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_repair_orders).post(create_repair_order))
        .route(
            "/{id}",
            get(get_repair_order)
                .put(update_repair_order)
                .delete(delete_repair_order),
        )
        .route("/{id}/services", put(set_services))
        .route("/{id}/recalculate", post(recalculate))
}

#[utoipa::path(
    get,
    path = "/api/repair-orders",
    params(RepairOrderListQuery),
    responses(
        (status = 200, description = "Repair orders, newest entry date first", body = ApiResponse<RepairOrderList>)
    ),
    tag = "Repair orders"
)]
pub async fn list_repair_orders(
    State(state): State<AppState>,
    Query(query): Query<RepairOrderListQuery>,
) -> AppResult<Json<ApiResponse<RepairOrderList>>> {
    let resp = repair_order_service::list_repair_orders(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/repair-orders/{id}",
    params(("id" = Uuid, Path, description = "Repair order ID")),
    responses(
        (status = 200, description = "Get repair order", body = ApiResponse<RepairOrder>),
        (status = 404, description = "Repair order not found"),
    ),
    tag = "Repair orders"
)]
pub async fn get_repair_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RepairOrder>>> {
    let resp = repair_order_service::get_repair_order(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/repair-orders",
    request_body = RepairOrderInput,
    responses(
        (status = 201, description = "Repair order created with its total computed", body = ApiResponse<RepairOrder>),
        (status = 422, description = "Invalid fields, unknown vehicle or service"),
    ),
    tag = "Repair orders"
)]
pub async fn create_repair_order(
    State(state): State<AppState>,
    Json(payload): Json<RepairOrderInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<RepairOrder>>)> {
    let resp = repair_order_service::create_repair_order(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/repair-orders/{id}",
    params(("id" = Uuid, Path, description = "Repair order ID")),
    request_body = RepairOrderInput,
    responses(
        (status = 200, description = "Repair order updated and recalculated", body = ApiResponse<RepairOrder>),
        (status = 404, description = "Repair order not found"),
        (status = 422, description = "Invalid fields, unknown vehicle or service"),
    ),
    tag = "Repair orders"
)]
pub async fn update_repair_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RepairOrderInput>,
) -> AppResult<Json<ApiResponse<RepairOrder>>> {
    let resp = repair_order_service::update_repair_order(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/repair-orders/{id}",
    params(("id" = Uuid, Path, description = "Repair order ID")),
    responses(
        (status = 200, description = "Repair order deleted"),
        (status = 404, description = "Repair order not found"),
    ),
    tag = "Repair orders"
)]
pub async fn delete_repair_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = repair_order_service::delete_repair_order(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/repair-orders/{id}/services",
    params(("id" = Uuid, Path, description = "Repair order ID")),
    request_body = SetServicesRequest,
    responses(
        (status = 200, description = "Service set replaced and total recalculated", body = ApiResponse<OrderTotal>),
        (status = 404, description = "Repair order not found"),
        (status = 422, description = "Unknown service"),
    ),
    tag = "Repair orders"
)]
pub async fn set_services(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetServicesRequest>,
) -> AppResult<Json<ApiResponse<OrderTotal>>> {
    let resp = repair_order_service::set_services(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/repair-orders/{id}/recalculate",
    params(("id" = Uuid, Path, description = "Repair order ID")),
    responses(
        (status = 200, description = "Total recalculated from current services", body = ApiResponse<OrderTotal>),
        (status = 404, description = "Repair order not found"),
    ),
    tag = "Repair orders"
)]
pub async fn recalculate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderTotal>>> {
    let resp = repair_order_service::recalculate(&state, id).await?;
    Ok(Json(resp))
}
