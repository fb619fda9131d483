//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
    services::stock::AdjustmentReport,
};

/// Response carrying the id of a created or deleted record
#[derive(Serialize, ToSchema)]
pub struct IdResponse {
    pub id: String,
}

/// Query for the batch-get endpoint
#[derive(Deserialize, IntoParams)]
pub struct IdsQuery {
    /// Comma-separated equipment ids; duplicates are harmless
    pub ids: String,
}

/// Reservation / cancellation request. Each id occurrence is one unit of
/// demand: `["a", "a", "b"]` adjusts `a` by two units and `b` by one.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StockAdjustmentRequest {
    #[serde(rename = "equipmentsId")]
    pub equipments_id: Vec<String>,
}

/// List all equipment
#[utoipa::path(
    get,
    path = "/equipments",
    tag = "equipment",
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipments(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipments = state.services.equipment.list().await?;
    Ok(Json(equipments))
}

/// Get equipment by id
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment id")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "No such equipment", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(&id).await?;
    Ok(Json(equipment))
}

/// Batch-get equipment by a comma-separated id list
#[utoipa::path(
    get,
    path = "/equipments/ids",
    tag = "equipment",
    params(IdsQuery),
    responses(
        (status = 200, description = "Matched equipment, one entry per distinct id", body = Vec<Equipment>)
    )
)]
pub async fn get_equipments_by_ids(
    State(state): State<crate::AppState>,
    Query(query): Query<IdsQuery>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipments = state.services.equipment.get_by_ids(&query.ids).await?;
    Ok(Json(equipments))
}

/// Create equipment keyed by the client-generated `_id`; an existing
/// record with the same id is overwritten
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 200, description = "Equipment created", body = IdResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateEquipment>,
) -> AppResult<Json<IdResponse>> {
    let id = state.services.equipment.create(data).await?;
    Ok(Json(IdResponse { id }))
}

/// Update equipment, overwriting the full field set
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment id")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "No such equipment", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(&id, &data).await?;
    Ok(Json(equipment))
}

/// Delete equipment; deleting an absent id still reports success
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment id")),
    responses(
        (status = 200, description = "Equipment deleted", body = IdResponse)
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<IdResponse>> {
    state.services.equipment.delete(&id).await?;
    Ok(Json(IdResponse { id }))
}

/// Reserve stock for a workspace booking; each id occurrence holds one unit
#[utoipa::path(
    post,
    path = "/equipment/onReserveWorkspace",
    tag = "stock",
    request_body = StockAdjustmentRequest,
    responses(
        (status = 200, description = "All requested holds applied", body = AdjustmentReport),
        (status = 500, description = "Aborted mid-sequence; `applied` lists the ids already changed", body = crate::error::ErrorResponse)
    )
)]
pub async fn reserve_equipment(
    State(state): State<crate::AppState>,
    Json(request): Json<StockAdjustmentRequest>,
) -> AppResult<Json<AdjustmentReport>> {
    let report = state.services.stock.reserve(&request.equipments_id).await?;
    Ok(Json(report))
}

/// Cancel a reservation, releasing previously held stock
#[utoipa::path(
    post,
    path = "/equipment/onCancelReserve",
    tag = "stock",
    request_body = StockAdjustmentRequest,
    responses(
        (status = 200, description = "All requested releases applied", body = AdjustmentReport),
        (status = 500, description = "Aborted mid-sequence; `applied` lists the ids already changed", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel_reserve_equipment(
    State(state): State<crate::AppState>,
    Json(request): Json<StockAdjustmentRequest>,
) -> AppResult<Json<AdjustmentReport>> {
    let report = state
        .services
        .stock
        .cancel_reserve(&request.equipments_id)
        .await?;
    Ok(Json(report))
}
