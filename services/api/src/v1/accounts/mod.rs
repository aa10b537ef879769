use axum::{
    routing::{get, put},
    Router,
};

mod phone;
mod profile;

pub fn router() -> Router<crate::AppState> {
    Router::new()
        .route("/accounts/:account_id", get(profile::show))
        .route("/accounts/:account_id/profile", put(profile::upsert))
        .route(
            "/accounts/:account_id/phone",
            put(phone::link).delete(phone::unlink),
        )
}
