//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{clients, equipment, health, maintenance, reports, setup, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mantenimiento API",
        version = "0.3.0",
        description = "Equipment maintenance tracker. Authentication uses the session cookie set by POST /login.",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Setup
        setup::setup,
        // Clients
        clients::list_clients,
        clients::create_client,
        clients::delete_client,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Maintenance
        maintenance::list_maintenance,
        maintenance::create_maintenance,
        // Users
        users::list_users,
        users::create_user,
        users::delete_user,
        // Reports
        reports::export_pdf,
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::api::MessageResponse,
            health::HealthResponse,
            setup::SetupResponse,
            crate::repository::setup::SetupOutcome,
            crate::models::client::Client,
            crate::models::client::ClientShort,
            crate::models::client::CreateClient,
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentStatus,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::maintenance::Maintenance,
            crate::models::maintenance::CreateMaintenance,
            crate::models::user::UserShort,
            crate::models::user::CreateUser,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "setup", description = "First-run provisioning"),
        (name = "clientes", description = "Clients"),
        (name = "equipos", description = "Equipment"),
        (name = "mantenimientos", description = "Maintenance log"),
        (name = "usuarios", description = "User management"),
        (name = "reportes", description = "PDF reports")
    )
)]
pub struct ApiDoc;

/// Create OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
