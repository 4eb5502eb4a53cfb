use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Extension, Json, Router, middleware};
use tower_http::services::ServeDir;
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers, pages, problem, session};
use crate::domain::ports::SessionStore;
use crate::domain::service::Service;

/// Multipart framing allowance on top of the configured image limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "SterlingCards API", description = "Profile cards and public card lookup"),
    components(schemas(
        dto::CardDto,
        dto::BackgroundDto,
        dto::SaveCardRequest,
        dto::SaveCardResponse,
        dto::UploadResponse,
        dto::AvailabilityDto,
        dto::PublicCardDto,
        problem::Problem,
    ))
)]
pub struct CardsApiDoc;

#[allow(clippy::unused_async)]
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(CardsApiDoc::openapi())
}

pub struct RouterDeps {
    pub service: Arc<Service>,
    pub sessions: Arc<dyn SessionStore>,
    /// Directory served under `/storage`.
    pub storage_root: PathBuf,
}

pub fn router(deps: RouterDeps) -> Router {
    let body_limit = deps.service.upload_policy().max_bytes + MULTIPART_OVERHEAD;

    let uploads = Router::new()
        .route(
            "/cards/v1/card/uploads/{bucket}",
            post(handlers::upload_image),
        )
        .route("/dashboard/uploads/{bucket}", post(pages::dashboard_upload))
        .layer(DefaultBodyLimit::max(body_limit));

    let api = Router::new()
        .route(
            "/cards/v1/card",
            get(handlers::get_card).put(handlers::put_card),
        )
        .route(
            "/cards/v1/usernames/{username}/availability",
            get(handlers::username_availability),
        )
        .route("/cards/v1/public/{username}", get(handlers::get_public_card))
        .route(
            "/cards/v1/public/{username}/qr.svg",
            get(handlers::get_public_qr),
        )
        .route("/cards/v1/openapi.json", get(openapi_json))
        .route("/health", get(handlers::health));

    let html = Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/login", get(pages::login_page).post(pages::login))
        .route("/signup", get(pages::signup_page))
        .route("/logout", post(pages::logout))
        .route(
            "/dashboard",
            get(pages::dashboard_page).post(pages::dashboard_save),
        )
        .route("/{username}", get(pages::public_card));

    Router::new()
        .merge(uploads)
        .merge(api)
        .merge(html)
        .nest_service("/storage", ServeDir::new(deps.storage_root))
        .layer(middleware::from_fn_with_state(
            deps.sessions.clone(),
            session::attach_account,
        ))
        .layer(Extension(deps.sessions))
        .layer(Extension(deps.service))
}
