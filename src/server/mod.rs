//! Blog server: listing, single post and tag pages

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{Datelike, Local};
use std::error::Error as StdError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{self, collection, ContentSource, LoadError, Post};
use crate::templates::{PageData, PostData, TagLink, TemplateRenderer};
use crate::Blog;

/// Shared state of the request handlers
pub struct AppState {
    pub site_title: String,
    pub content_dir: PathBuf,
    pub source: Arc<dyn ContentSource>,
    pub templates: TemplateRenderer,
}

/// Errors a request can end with
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to load posts")]
    Load(#[from] LoadError),

    #[error("post loading task failed")]
    Join(#[from] tokio::task::JoinError),

    #[error("failed to render template")]
    Render(#[from] tera::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let mut chain = vec![self.to_string()];
        let mut current = StdError::source(&self);
        while let Some(inner) = current {
            chain.push(inner.to_string());
            current = inner.source();
        }
        tracing::error!("{}", chain.join(": "));

        let message = match self {
            ServerError::Load(_) | ServerError::Join(_) => "Error reading posts",
            ServerError::Render(_) => "Error rendering page",
        };
        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}

/// Build the router for the given state, serving assets from `static_dir`
pub fn router(state: Arc<AppState>, static_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(list_posts))
        .route("/post/:slug", get(show_post))
        .route("/tag/", get(redirect_home))
        .route("/tag/:tag", get(show_tag))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the blog server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let templates = match &blog.templates_dir {
        Some(dir) => TemplateRenderer::from_dir(dir)?,
        None => TemplateRenderer::new()?,
    };

    let state = Arc::new(AppState {
        site_title: blog.config.title.clone(),
        content_dir: blog.content_dir.clone(),
        source: Arc::new(blog.content_source()),
        templates,
    });

    let app = router(state, blog.static_dir.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Serving posts from {}", blog.content_dir.display());
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load a fresh collection on the blocking pool
async fn load_posts(state: &Arc<AppState>) -> Result<Vec<Post>, ServerError> {
    let state = Arc::clone(state);
    let posts = tokio::task::spawn_blocking(move || state.source.load(&state.content_dir))
        .await??;
    Ok(posts)
}

fn render_page(
    state: &AppState,
    template: &str,
    data: &PageData,
) -> Result<Response, ServerError> {
    let html = state.templates.render(template, data)?;
    Ok(Html(html).into_response())
}

fn page_data(
    state: &AppState,
    title: String,
    posts: &[Post],
    all_tags: Vec<String>,
    active_tag: Option<&str>,
) -> PageData {
    PageData {
        title,
        site_title: state.site_title.clone(),
        current_year: Local::now().year(),
        posts: posts.iter().map(PostData::from).collect(),
        all_tags: TagLink::list(all_tags, active_tag),
        active_tag: active_tag.map(String::from),
    }
}

async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Response, ServerError> {
    let mut posts = load_posts(&state).await?;
    let all_tags = content::aggregate_tags(&posts);
    collection::newest_first(&mut posts);

    let data = page_data(&state, state.site_title.clone(), &posts, all_tags, None);
    render_page(&state, "home.html", &data)
}

async fn show_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, ServerError> {
    let posts = load_posts(&state).await?;

    let Some(post) = collection::find_by_slug(&posts, &slug) else {
        return Ok(not_found().await.into_response());
    };

    let title = format!("{} - {}", post.title, state.site_title);
    let all_tags = content::aggregate_tags(&posts);
    let data = page_data(&state, title, std::slice::from_ref(post), all_tags, None);
    render_page(&state, "post.html", &data)
}

async fn show_tag(
    State(state): State<Arc<AppState>>,
    Path(tag): Path<String>,
) -> Result<Response, ServerError> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Ok(redirect_home().await.into_response());
    }

    let posts = load_posts(&state).await?;
    let mut tagged = collection::tagged(&posts, tag);
    collection::newest_first(&mut tagged);

    let title = format!("Posts tagged '{}' - {}", tag, state.site_title);
    let all_tags = content::aggregate_tags(&posts);
    let data = page_data(&state, title, &tagged, all_tags, Some(tag));
    render_page(&state, "home.html", &data)
}

async fn redirect_home() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/")])
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found")
}
