use std::net::SocketAddr;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::storage::Storage;

mod handlers;
mod models;

use handlers::{
    create_movie, create_task, delete_task, get_movie, health, list_movies, list_tasks,
    next_task, not_found, search_movies, top_rated_movies,
};

#[derive(Clone)]
pub struct AppState<S: Storage> {
    pub storage: S,
    pub started_at: std::time::SystemTime,
}

pub fn router<S: Storage + Clone + Send + Sync + 'static>(storage: S) -> Router {
    let state = AppState {
        storage,
        started_at: std::time::SystemTime::now(),
    };

    Router::new()
        .route("/health", get(health::<S>))
        .route("/movies", get(list_movies::<S>).post(create_movie::<S>))
        .route("/movies/top", get(top_rated_movies::<S>))
        .route("/movies/search", get(search_movies::<S>))
        .route("/movies/:code", get(get_movie::<S>))
        .route("/tasks", get(list_tasks::<S>).post(create_task::<S>))
        .route("/tasks/next", get(next_task::<S>))
        .route("/tasks/:id", delete(delete_task::<S>))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve<S: Storage + Clone + Send + Sync + 'static>(
    addr: SocketAddr,
    storage: S,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 REST service on http://{}", addr);

    let app = router(storage);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
