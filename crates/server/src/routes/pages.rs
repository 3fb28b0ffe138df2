use axum::{extract::State, response::Html, routing::get, Router};

use crate::{error::PageResult, services::pages, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about/", get(about))
        .route("/projects/", get(projects))
        .route("/skills/", get(skills))
}

async fn home(State(state): State<AppState>) -> PageResult<Html<String>> {
    let page = pages::home(&state.store).await?;
    Ok(state.templates.render("index.html", &page)?)
}

async fn about(State(state): State<AppState>) -> PageResult<Html<String>> {
    let page = pages::about(&state.store).await?;
    Ok(state.templates.render("about.html", &page)?)
}

async fn projects(State(state): State<AppState>) -> PageResult<Html<String>> {
    let page = pages::projects(&state.store).await?;
    Ok(state.templates.render("projects.html", &page)?)
}

async fn skills(State(state): State<AppState>) -> PageResult<Html<String>> {
    let page = pages::skills(&state.store).await?;
    Ok(state.templates.render("skills.html", &page)?)
}
