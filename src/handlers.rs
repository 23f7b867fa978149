use crate::models::{RemovalForm, SignupForm, ViewResponse};
use crate::reconcile;
use crate::state::AppState;
use crate::ui::{render_index, Page};
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let status = state.status.current().await;
    let view = state.view.lock().await;
    let cards = view.roster.cards();
    Html(render_index(&Page {
        listing: view.roster.listing(),
        cards: &cards,
        options: view.roster.options(),
        draft: &view.draft,
        status: status.as_ref(),
        settings: &state.settings,
    }))
}

pub async fn get_view(State(state): State<AppState>) -> Json<ViewResponse> {
    let status = state.status.current().await;
    let view = state.view.lock().await;
    Json(ViewResponse {
        listing: view.roster.listing(),
        activities: view.roster.cards(),
        options: view.roster.options().to_vec(),
        status,
        draft: view.draft.clone(),
        fetched_at: view.roster.fetched_at().map(|at| at.to_rfc3339()),
    })
}

pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Redirect {
    reconcile::signup(&state, form).await;
    Redirect::to("/")
}

pub async fn unregister(State(state): State<AppState>, Form(form): Form<RemovalForm>) -> Redirect {
    reconcile::unregister(&state, form).await;
    Redirect::to("/")
}

pub async fn refresh(State(state): State<AppState>) -> Redirect {
    reconcile::refresh(&state).await;
    Redirect::to("/")
}
