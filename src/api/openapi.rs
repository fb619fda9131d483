//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equipment API",
        version = "1.0.0",
        description = "Equipment inventory and reservation REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipments,
        equipment::get_equipment,
        equipment::get_equipments_by_ids,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Stock
        equipment::reserve_equipment,
        equipment::cancel_reserve_equipment,
    ),
    components(
        schemas(
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            equipment::IdResponse,
            equipment::StockAdjustmentRequest,
            crate::services::stock::AdjustmentReport,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment record management"),
        (name = "stock", description = "Reservation stock adjustments")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
