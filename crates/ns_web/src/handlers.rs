use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use ns_core::password::hash_password;
use ns_core::Error;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::charts;
use crate::search::{run_search, SearchForm, SearchResponse};
use crate::session::{Flash, Session};
use crate::views::{self, IndexView};
use crate::{AppState, WebError};

/// Usernames are capped at this many characters.
pub const MAX_USERNAME_LENGTH: usize = 150;

#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

async fn redirect_to_login(session: Session) -> Response {
    session.flash(Flash::info("Please log in to access this page.")).await;
    session.finish(Redirect::to("/login")).await
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<SearchForm>,
) -> Result<Response, WebError> {
    let user = state.current_user(&session).await?;
    if state.requires_login() && user.is_none() {
        return Ok(redirect_to_login(session).await);
    }

    let results = run_search(&state, form.resolve(&state.settings)).await;

    let show_charts = if results.articles.is_empty() {
        false
    } else {
        match charts::write_charts(&state.settings.static_dir, &results.distribution, &results.histogram).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to write sentiment charts");
                false
            }
        }
    };

    let flashes = session.take_flashes().await;
    let page = views::index_page(&IndexView {
        results: &results,
        flashes: &flashes,
        user: user.as_ref().map(|u| u.username.as_str()),
        show_charts,
    });
    Ok(session.finish(Html(page)).await)
}

pub async fn api_search(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(form): Query<SearchForm>,
) -> Result<Response, WebError> {
    if state.requires_login() && state.current_user(&session).await?.is_none() {
        return Ok((StatusCode::UNAUTHORIZED, Json(json!({ "error": "login required" }))).into_response());
    }

    let results = run_search(&state, form.resolve(&state.settings)).await;
    Ok(Json(SearchResponse::from(results)).into_response())
}

pub async fn register_page(session: Session) -> Response {
    let flashes = session.take_flashes().await;
    session.finish(Html(views::register_page(&flashes))).await
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<Credentials>,
) -> Result<Response, WebError> {
    let accounts = state.accounts()?;
    let username = form.username.unwrap_or_default().trim().to_string();
    let password = form.password.unwrap_or_default();

    let problem = if username.is_empty() || password.is_empty() {
        Some("Username and password are required")
    } else if username.chars().count() > MAX_USERNAME_LENGTH {
        Some("Username must be at most 150 characters")
    } else if accounts.find_by_username(&username).await?.is_some() {
        Some("Username already exists")
    } else {
        None
    };
    if let Some(message) = problem {
        session.flash(Flash::danger(message)).await;
        return Ok(session.finish(Redirect::to("/register")).await);
    }

    match accounts.create(&username, &hash_password(&password)).await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "Registered new user");
            session
                .flash(Flash::success("Registration successful. You can now log in."))
                .await;
            Ok(session.finish(Redirect::to("/login")).await)
        }
        Err(Error::AccountExists(_)) => {
            session.flash(Flash::danger("Username already exists")).await;
            Ok(session.finish(Redirect::to("/register")).await)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login_page(session: Session) -> Response {
    let flashes = session.take_flashes().await;
    session.finish(Html(views::login_page(&flashes))).await
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    mut session: Session,
    Form(form): Form<Credentials>,
) -> Result<Response, WebError> {
    let accounts = state.accounts()?;
    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    match accounts.verify_password(username.trim(), &password).await? {
        Some(user) => {
            info!(user_id = user.id, "User logged in");
            session.login(&user).await;
            session.flash(Flash::success("Login successful")).await;
            Ok(session.finish(Redirect::to("/")).await)
        }
        None => {
            session.flash(Flash::danger("Invalid username or password")).await;
            Ok(session.finish(Redirect::to("/login")).await)
        }
    }
}

pub async fn logout(State(state): State<Arc<AppState>>, session: Session) -> Result<Response, WebError> {
    if state.current_user(&session).await?.is_none() {
        return Ok(redirect_to_login(session).await);
    }

    session.logout().await;
    session.flash(Flash::info("You have been logged out")).await;
    Ok(session.finish(Redirect::to("/login")).await)
}
