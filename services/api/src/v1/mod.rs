use axum::Router;

mod accounts;
mod budgets;
mod reports;
mod transactions;

pub fn router() -> Router<crate::AppState> {
    Router::new()
        .merge(accounts::router())
        .merge(transactions::router())
        .merge(budgets::router())
        .merge(reports::router())
}
