use axum::{routing, Router};

mod create;
mod delete;
mod list;

pub fn router() -> Router<crate::AppState> {
    Router::new()
        .route(
            "/accounts/:account_id/transactions",
            routing::get(list::handler).post(create::handler),
        )
        .route(
            "/accounts/:account_id/transactions/:transaction_id",
            routing::delete(delete::handler),
        )
}
