use axum::routing::get;
use axum::Router;

use crate::handlers::metrics;
use crate::state::AppState;

/// Metrics routes mounted at `/metrics`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(metrics::get_metrics))
        .route("/charts", get(metrics::get_charts))
        .route("/traceability", get(metrics::get_traceability))
}
