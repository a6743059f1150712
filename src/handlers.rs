use crate::builder;
use crate::errors::AppError;
use crate::models::{
    AnswerCard, ChooseSchoolRequest, CustomStatRequest, SchoolMatch, SchoolQuery, SessionView,
    ToggleRequest,
};
use crate::selection::Category;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_index(&session.view()))
}

pub async fn schools(
    State(state): State<AppState>,
    Query(query): Query<SchoolQuery>,
) -> Result<Json<Vec<SchoolMatch>>, AppError> {
    builder::load_schools(&state.session, &state.backend).await?;
    let session = state.session.lock().await;
    Ok(Json(session.matching_schools(&query.term)))
}

pub async fn choose_school(
    State(state): State<AppState>,
    Json(payload): Json<ChooseSchoolRequest>,
) -> Result<Json<SessionView>, AppError> {
    let applied = builder::choose_school(&state.session, &state.backend, payload.school_id).await?;
    if !applied {
        debug!(school_id = payload.school_id, "school choice superseded");
    }
    Ok(Json(state.session.lock().await.view()))
}

pub async fn session_view(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.session.lock().await.view())
}

pub async fn open_popup(
    State(state): State<AppState>,
    Path(category): Path<Category>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    session.open(category)?;
    Ok(Json(session.view()))
}

pub async fn toggle_item(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    session.toggle(payload.id.trim())?;
    Ok(Json(session.view()))
}

pub async fn close_popup(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    if let Some(category) = session.close() {
        let committed = session.controller().collect_committed(category);
        info!(%category, ?committed, "selection committed");
    }
    Json(session.view())
}

pub async fn deselect_all(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    session.deselect_all();
    Json(session.view())
}

pub async fn add_custom_stat(
    State(state): State<AppState>,
    Json(payload): Json<CustomStatRequest>,
) -> Result<Json<SessionView>, AppError> {
    let main_stat = payload.main_stat.trim();
    let per_what = payload.per_what.trim();
    if main_stat.is_empty() || per_what.is_empty() {
        return Err(AppError::bad_request("main_stat and per_what must not be empty"));
    }

    let mut session = state.session.lock().await;
    session.add_custom_stat(main_stat, per_what);
    Ok(Json(session.view()))
}

pub async fn calculate(
    State(state): State<AppState>,
) -> Result<Json<Option<AnswerCard>>, AppError> {
    let card = builder::calculate(&state.session, &state.backend).await?;
    if card.is_none() {
        debug!("calculation superseded before its answers arrived");
    }
    Ok(Json(card))
}
