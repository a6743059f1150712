use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/schools", get(handlers::schools))
        .route("/api/school", post(handlers::choose_school))
        .route("/api/session", get(handlers::session_view))
        .route("/api/popup/:category/open", post(handlers::open_popup))
        .route("/api/popup/toggle", post(handlers::toggle_item))
        .route("/api/popup/close", post(handlers::close_popup))
        .route("/api/deselect", post(handlers::deselect_all))
        .route("/api/stats/custom", post(handlers::add_custom_stat))
        .route("/api/calculate", post(handlers::calculate))
        .with_state(state)
}
