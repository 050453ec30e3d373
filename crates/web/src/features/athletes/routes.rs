use axum::{Router, routing::get};

use super::handlers::{list_all_athletes, list_athletes};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/athletes", get(list_athletes))
        .route("/athletes/", get(list_athletes))
        .route("/athletes/all", get(list_all_athletes))
}
