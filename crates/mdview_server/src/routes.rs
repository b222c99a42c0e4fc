//! The HTTP surface of the preview server.
//!
//! All endpoints answer on the loopback interface only:
//!
//! - `GET /` - home page (URL form + drag-and-drop)
//! - `GET /favicon.svg`
//! - `POST /render` - render posted markdown text
//! - `GET /view?url=` - fetch and render a remote Gist/raw URL
//! - `GET /local?file=&embed=` - render a local file, optionally chrome-less

use crate::gist::normalize_gist_url;
use axum::extract::{DefaultBodyLimit, Extension, Query};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use mdview_render::{assets, to_html, Page, RenderOptions};
use serde::Deserialize;
use std::path::PathBuf;

const MAX_RENDER_BODY: usize = 10 * 1024 * 1024;

pub fn router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/favicon.svg", get(favicon))
        .route("/render", post(render_text))
        .route("/view", get(view))
        .route("/local", get(local))
        .layer(DefaultBodyLimit::max(MAX_RENDER_BODY))
        .layer(Extension(reqwest::Client::new()))
}

async fn home() -> Html<&'static str> {
    Html(assets::HOME_PAGE)
}

async fn favicon() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        assets::FAVICON_SVG,
    )
}

async fn render_text(body: String) -> Response {
    if body.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "No markdown content provided").into_response();
    }

    let html = to_html(&body, &RenderOptions::default());
    Html(Page::new("mdview", html).render()).into_response()
}

#[derive(Debug, Deserialize)]
struct ViewParams {
    url: Option<String>,
}

async fn view(
    Extension(client): Extension<reqwest::Client>,
    Query(params): Query<ViewParams>,
) -> Response {
    let Some(url) = params.url.filter(|url| !url.is_empty()) else {
        return Redirect::to("/").into_response();
    };

    let fetch_url = normalize_gist_url(&url);
    tracing::debug!(%url, fetch_url = %fetch_url, "Fetching remote markdown");

    let text = match fetch_remote(&client, &fetch_url).await {
        Ok(text) => text,
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error fetching URL: {err}"),
            )
                .into_response();
        }
    };

    if text.trim_start().starts_with("<!DOCTYPE html>") {
        return (
            StatusCode::BAD_REQUEST,
            "Error: The URL returned HTML instead of Markdown. \
             Make sure it is a raw link or a public Gist.",
        )
            .into_response();
    }

    let html = to_html(&text, &RenderOptions::default());
    Html(Page::new("mdview", html).render()).into_response()
}

async fn fetch_remote(client: &reqwest::Client, url: &str) -> Result<String, reqwest::Error> {
    client.get(url).send().await?.error_for_status()?.text().await
}

#[derive(Debug, Deserialize)]
struct LocalParams {
    file: Option<String>,
    #[serde(default)]
    embed: bool,
}

async fn local(Query(params): Query<LocalParams>) -> Response {
    let Some(file) = params.file.filter(|file| !file.is_empty()) else {
        return Redirect::to("/").into_response();
    };

    let path = PathBuf::from(&file);
    let path = if path.is_absolute() {
        path
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path,
        }
    };

    if !path.exists() {
        return (
            StatusCode::NOT_FOUND,
            format!("File not found: {}", path.display()),
        )
            .into_response();
    }

    let markdown = match std::fs::read_to_string(&path) {
        Ok(markdown) => markdown,
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error reading file: {err}"),
            )
                .into_response();
        }
    };

    let title = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mdview".to_string());

    let html = to_html(&markdown, &RenderOptions::default());
    Html(Page::new(title, html).embed(params.embed).render()).into_response()
}
