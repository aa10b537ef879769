use axum::{routing::get, Router};

mod summary;

pub fn router() -> Router<crate::AppState> {
    Router::new().route("/accounts/:account_id/reports/summary", get(summary::handler))
}
