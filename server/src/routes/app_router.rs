use axum::{
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use crate::{error::AppError, request_tracing, ServerState};

use super::{classify, home};

pub struct AppRouter;

impl AppRouter {
    pub fn create(state: ServerState) -> Router {
        let router = Router::new()
            .route("/", get(home::index))
            .route("/classify", post(classify::classify))
            .route("/classify-batch", post(classify::classify_batch))
            .route("/export-csv", post(classify::export_csv))
            .with_state(state)
            .fallback(handler_404);

        request_tracing::with_request_tracing(router)
    }
}

pub async fn handler_404() -> impl IntoResponse {
    AppError::NotFound("Route does not exist".to_string())
}
