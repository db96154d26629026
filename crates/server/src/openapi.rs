use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::table_state::get_state,
        crate::routes::table_state::save_state,
    ),
    components(
        schemas(
            HealthResponse,
            models::table_state::TableState,
            service::table_state::domain::SaveTableState,
        )
    ),
    tags(
        (name = "health"),
        (name = "table-state")
    )
)]
pub struct ApiDoc;
