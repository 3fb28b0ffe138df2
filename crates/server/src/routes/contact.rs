use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;

use crate::{
    db::inputs::ContactForm,
    error::{AppError, PageResult},
    services::{
        contact::{ContactError, NotificationStatus},
        pages,
    },
    AppState,
};

const SENT_REDIRECT: &str = "/contact/?sent=1";
const UNDELIVERED_REDIRECT: &str = "/contact/?sent=1&notice=undelivered";

pub fn router() -> Router<AppState> {
    Router::new().route("/contact/", get(show_form).post(submit_form))
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactQuery {
    pub sent: Option<String>,
    pub notice: Option<String>,
}

async fn show_form(
    State(state): State<AppState>,
    Query(query): Query<ContactQuery>,
) -> PageResult<Html<String>> {
    let mut page = pages::contact(&state.store).await?;
    page.sent = query.sent.is_some();
    if query.notice.as_deref() == Some("undelivered") {
        page.warning = Some(
            "Your message was saved, but the notification email could not be delivered."
                .to_string(),
        );
    }
    Ok(state.templates.render("contact.html", &page)?)
}

async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> PageResult<Response> {
    match state.contact.submit(form.clone()).await {
        Ok(receipt) => {
            let target = match receipt.notification {
                NotificationStatus::Sent => SENT_REDIRECT,
                NotificationStatus::Failed(_) => UNDELIVERED_REDIRECT,
            };
            Ok(Redirect::to(target).into_response())
        }
        Err(ContactError::Validation(errors)) => {
            tracing::debug!(
                fields = ?errors.fields().collect::<Vec<_>>(),
                "Contact form rejected"
            );
            let mut page = pages::contact(&state.store).await?;
            page.form = form;
            page.errors = errors;
            let html = state.templates.render("contact.html", &page)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, html).into_response())
        }
        Err(e @ ContactError::Notification { .. }) => {
            Err(AppError::Notification(e.to_string()).into())
        }
        Err(ContactError::Store(e)) => Err(e.into()),
    }
}
