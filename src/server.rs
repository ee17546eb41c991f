use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Router,
    error_handling::HandleErrorLayer,
    extract::{FromRef, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, Key, SignedCookieJar};
use eyre::Result;
use log::{info, warn};
use serde::Deserialize;
use tower::{BoxError, ServiceBuilder, timeout::TimeoutLayer};

use crate::pages;
use crate::pipeline::Pipeline;
use crate::summarize::OpenAiBackend;
use crate::youtube::InnerTubeFetcher;

/// Signed cookie carrying the one-shot failure message across the redirect.
const FLASH_COOKIE: &str = "flash";

/// Bound on a whole request, comfortably above the two upstream timeouts.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

type AppPipeline = Pipeline<InnerTubeFetcher, OpenAiBackend>;

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<AppPipeline>,
    key: Key,
}

impl AppState {
    /// `secret` must be at least 32 bytes; `Config::from_env` enforces this.
    pub fn new(pipeline: AppPipeline, secret: &str) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            key: Key::derive_from(secret.as_bytes()),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

#[derive(Deserialize)]
struct SummarizeForm {
    youtube_url: String,
}

async fn index(jar: SignedCookieJar) -> (SignedCookieJar, Html<String>) {
    let flash = jar.get(FLASH_COOKIE).map(|c| c.value().to_string());
    let jar = if flash.is_some() {
        jar.remove(Cookie::build(FLASH_COOKIE).path("/"))
    } else {
        jar
    };
    (jar, Html(pages::index(flash.as_deref())))
}

async fn summarize(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<SummarizeForm>,
) -> Response {
    match state.pipeline.run(&form.youtube_url).await {
        Ok(summary) => Html(pages::summary(&summary.video_id, &summary.text)).into_response(),
        Err(err) => {
            warn!("Summarize request failed: {err}");
            let jar = jar.add(
                Cookie::build((FLASH_COOKIE, err.user_message()))
                    .path("/")
                    .http_only(true),
            );
            (jar, Redirect::to("/")).into_response()
        }
    }
}

async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(pages::error(404)))
}

async fn layer_error(err: BoxError) -> (StatusCode, Html<String>) {
    warn!("Request-level error: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::error(500)))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/summarize", post(summarize))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(layer_error))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
