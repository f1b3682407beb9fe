use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

/// API routes. Paths are flat, matching the public contract:
/// `POST /submit`, `GET /submissions/{id}/result`.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::submission::submit))
        .routes(routes!(handlers::submission::get_submission_result))
}
