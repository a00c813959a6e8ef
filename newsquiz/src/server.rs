use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use rocket::form::Form;
use rocket::fs::FileServer;
use rocket::http::{Cookie, CookieJar};
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{get, post, routes, FromForm, State};
use serde::Serialize;
use uuid::Uuid;

use common::Config;

use crate::llm::synthesizer::synthesize_quiz;
use crate::llm::LlmProvider;
use crate::news;
use crate::quiz::QuizError;
use crate::render;
use crate::sessions::SessionStore;

/// Name of the private cookie carrying the session identifier.
const SESSION_COOKIE: &str = "quiz_session";

/// Application state stored inside Rocket managed state.
pub struct AppState {
    pub started_at: DateTime<Utc>,
    pub config: Arc<Config>,
    pub llm_provider: Option<Arc<dyn LlmProvider>>,
    pub sessions: SessionStore,
}

/// Response structure for `/api/v1/status`.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    uptime_seconds: i64,
    question_count: usize,
    model: Option<String>,
    active_sessions: usize,
}

/// Form body for `/check-answer`. An unchecked radio group arrives with no
/// `answer` field at all; that reads as an empty (and therefore wrong) answer.
#[derive(FromForm)]
struct AnswerForm {
    answer: Option<String>,
}

/// Redirect root to static index.html
#[get("/")]
async fn index_redirect() -> Redirect {
    Redirect::to("/static/index.html")
}

#[get("/health")]
async fn health() -> &'static str {
    "OK"
}

/// Status endpoint returning simple JSON with uptime and basic config info.
#[get("/api/v1/status")]
async fn status(state: &State<AppState>) -> Json<StatusResponse> {
    let now = Utc::now();
    let uptime = (now - state.started_at).num_seconds();

    let model = state
        .config
        .llm
        .as_ref()
        .and_then(|l| l.remote.as_ref())
        .and_then(|r| r.model.clone());

    Json(StatusResponse {
        status: "ok",
        uptime_seconds: uptime,
        question_count: state.config.question_count(),
        model,
        active_sessions: state.sessions.len().await,
    })
}

/// Raw article list, independent of the quiz flow.
#[get("/current")]
async fn current_affairs(state: &State<AppState>) -> RawHtml<String> {
    match news::fetch_articles(&state.config.news).await {
        Ok(articles) => RawHtml(render::render_articles(&articles)),
        Err(e) => {
            tracing::error!("article fetch failed: {}", e);
            RawHtml(render::render_error(&e.to_string()))
        }
    }
}

/// Build a fresh quiz: fetch articles, synthesize, seed a session, render the
/// first question. Every failure along the way surfaces its raw message as an
/// HTML fragment.
#[get("/quiz")]
async fn quiz(state: &State<AppState>, jar: &CookieJar<'_>) -> RawHtml<String> {
    let provider = match &state.llm_provider {
        Some(p) => p.clone(),
        None => {
            tracing::warn!("quiz requested but no LLM provider is configured");
            return RawHtml(render::render_error("LLM provider not configured"));
        }
    };

    let articles = match news::fetch_articles(&state.config.news).await {
        Ok(articles) => articles,
        Err(e) => {
            tracing::error!("article fetch failed: {}", e);
            return RawHtml(render::render_error(&e.to_string()));
        }
    };

    let quiz = match synthesize_quiz(
        provider.as_ref(),
        &articles,
        state.config.question_count(),
    )
    .await
    {
        Ok(quiz) => quiz,
        Err(e) => {
            tracing::error!("quiz synthesis failed: {}", e);
            return RawHtml(render::render_error(&e.to_string()));
        }
    };

    // A new quiz supersedes whatever attempt the caller had before.
    let prior = session_id_from_cookie(jar);
    let id = state.sessions.start(prior, quiz).await;
    jar.add_private(Cookie::new(SESSION_COOKIE, id.to_string()));

    match state.sessions.progress(id).await {
        Some(progress) => RawHtml(render::render_progress(&progress)),
        None => RawHtml(render::render_error(
            &QuizError::InvalidState("no active session").to_string(),
        )),
    }
}

/// Check the submitted answer against the active session, then render the
/// result fragment followed by the next question or the completion summary.
#[post("/check-answer", data = "<form>")]
async fn check_answer(
    state: &State<AppState>,
    jar: &CookieJar<'_>,
    form: Form<AnswerForm>,
) -> RawHtml<String> {
    let user_answer = form.answer.clone().unwrap_or_default();

    let id = match session_id_from_cookie(jar) {
        Some(id) => id,
        None => {
            tracing::warn!("answer submitted without an active session cookie");
            return RawHtml(render::render_error(
                &QuizError::InvalidState("no active session").to_string(),
            ));
        }
    };

    match state.sessions.check_answer(id, &user_answer).await {
        Ok((outcome, progress)) => RawHtml(format!(
            "{}\n<hr>\n{}",
            render::render_result(&outcome),
            render::render_progress(&progress)
        )),
        Err(e) => {
            tracing::warn!("answer rejected: {}", e);
            RawHtml(render::render_error(&e.to_string()))
        }
    }
}

fn session_id_from_cookie(jar: &CookieJar<'_>) -> Option<Uuid> {
    jar.get_private(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// Build and launch a Rocket server.
///
/// Bind address and port come from the `[server]` config section; the PORT
/// environment variable takes precedence over the configured port, and 8080
/// is the fallback when neither is set.
///
/// This function blocks until the Rocket server shuts down (it awaits
/// `rocket.launch().await`) and returns an error if Rocket fails to start.
pub async fn launch_rocket(
    config: Arc<Config>,
    llm_provider: Option<Arc<dyn LlmProvider>>,
) -> Result<()> {
    let state = AppState {
        started_at: Utc::now(),
        config: config.clone(),
        llm_provider,
        sessions: SessionStore::new(),
    };

    let mut fig = rocket::Config::figment();

    if let Some(bind) = config.server.as_ref().and_then(|s| s.bind.clone()) {
        fig = fig.merge(("address", bind));
    }

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .or_else(|| config.server.as_ref().and_then(|s| s.port))
        .unwrap_or(8080);
    fig = fig.merge(("port", port));

    let rocket = rocket::custom(fig)
        .manage(state)
        .mount(
            "/",
            routes![
                index_redirect,
                health,
                status,
                current_affairs,
                quiz,
                check_answer,
            ],
        )
        .mount("/static", FileServer::from("newsquiz/static"));

    tracing::info!("Starting Rocket HTTP server on port {}", port);
    rocket
        .launch()
        .await
        .map_err(|e| anyhow!("Rocket failed: {}", e))?;

    tracing::info!("Rocket HTTP server has shut down");
    Ok(())
}
