use axum::{
    extract::{rejection::{FormRejection, PathRejection}, Form, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::dispatch::{self, Outcome};
use crate::errors::WikiError;
use crate::services::list_titles;
use crate::types::{is_valid_title, AppState};

/// Form submitted by the edit page
#[derive(Debug, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}

/// Title suffix of the request path. A suffix the extractor cannot decode
/// (percent-encoded bytes that are not UTF-8) is an invalid title.
fn title_from(path: Result<Path<String>, PathRejection>) -> Result<String, WikiError> {
    match path {
        Ok(Path(title)) => Ok(title),
        Err(rejection) => Err(WikiError::InvalidTitle(rejection.body_text())),
    }
}

/// Turn a dispatcher outcome into an HTTP response
fn respond(state: &AppState, outcome: Outcome) -> Result<Response, WikiError> {
    match outcome {
        Outcome::Render { template, page } => {
            let html = state.renderer.render(template, &page)?;
            Ok(Html(html).into_response())
        }
        Outcome::Redirect(location) => {
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
    }
}

/// Handle `/view/<title>` requests
pub async fn view_page(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, WikiError> {
    let title = title_from(path)?;
    log::info!("View request received: '{}'", title);
    let outcome = dispatch::view(state.store.as_ref(), &title)?;
    respond(&state, outcome)
}

/// Handle `/edit/<title>` requests
pub async fn edit_page(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, WikiError> {
    let title = title_from(path)?;
    log::info!("Edit request received: '{}'", title);
    let outcome = dispatch::edit(state.store.as_ref(), &title)?;
    respond(&state, outcome)
}

/// Handle `/save/<title>` requests
pub async fn save_page(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    form: Result<Form<SaveForm>, FormRejection>,
) -> Result<Response, WikiError> {
    let title = title_from(path)?;
    log::info!("Save request received: '{}'", title);

    // An invalid title is a 404 whatever the body looks like
    if !is_valid_title(&title) {
        return Err(WikiError::InvalidTitle(title));
    }
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            log::warn!("Rejected save form for '{}': {}", title, rejection);
            return Ok(rejection.into_response());
        }
    };

    let outcome = dispatch::save(state.store.as_ref(), &title, form.body)?;
    respond(&state, outcome)
}

/// Handle index requests
pub async fn handle_index(State(state): State<AppState>) -> Result<impl IntoResponse, WikiError> {
    log::info!("Index request received");
    let titles = list_titles(state.store.as_ref());
    let html = state.renderer.render_index(&titles)?;
    Ok(Html(html))
}
