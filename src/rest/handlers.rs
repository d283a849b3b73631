use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::storage::{
    Movie, MovieStore, NewTask, SearchCriteria, Storage, StorageError, TaskStore,
};

use super::{
    models::{CreatedTaskResponse, ErrorResponse, HealthResponse, ListMoviesParams, SearchParams},
    AppState,
};

pub async fn health<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

pub async fn list_movies<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    params: Result<Query<ListMoviesParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };
    let movies = match state.storage.fetch_all_movies() {
        Ok(movies) => movies,
        Err(err) => return error_response(err),
    };
    match params.view.as_deref() {
        Some("map") => {
            let maps: Vec<_> = movies.iter().map(Movie::to_map).collect();
            Json(maps).into_response()
        }
        _ => Json(movies).into_response(),
    }
}

pub async fn create_movie<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    movie: Result<Json<Movie>, JsonRejection>,
) -> Response {
    let Json(movie) = match movie {
        Ok(movie) => movie,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };
    if movie.code.trim().is_empty() {
        return bad_request("movie code is required");
    }
    match state.storage.insert_movie(&movie) {
        Ok(()) => (StatusCode::CREATED, Json(movie)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn top_rated_movies<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    match state.storage.fetch_top_rated_recent() {
        Ok(movies) => Json(movies).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn search_movies<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let params = match pairs {
        Ok(Query(pairs)) => SearchParams::from_pairs(pairs),
        Err(rejection) => Err(rejection.body_text()),
    };
    let params = match params {
        Ok(params) => params,
        Err(message) => return bad_request(&message),
    };
    let criteria = SearchCriteria::new(params.query, params.years, params.min_rating);
    match state.storage.search_movies(&criteria) {
        Ok(movies) => Json(movies).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn get_movie<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(code): Path<String>,
) -> Response {
    match state.storage.get_by_code(&code) {
        Ok(movie) => Json(movie).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn list_tasks<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    match state.storage.fetch_all_tasks() {
        Ok(tasks) => Json(tasks).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn create_task<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    task: Result<Json<NewTask>, JsonRejection>,
) -> Response {
    let Json(task) = match task {
        Ok(task) => task,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };
    match state.storage.add_task(&task) {
        Ok(id) => (StatusCode::CREATED, Json(CreatedTaskResponse { id })).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn next_task<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    match state.storage.fetch_top_priority_task() {
        Ok(task) => Json(task).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete_task<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };
    match state.storage.delete_task_by_id(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
        }),
    )
}

fn bad_request(message: &str) -> Response {
    log::warn!("Rejected request: {}", message);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

fn error_response(err: StorageError) -> Response {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_constraint_violation() {
        StatusCode::CONFLICT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        log::error!("Storage failure: {:?}", err);
    } else {
        log::warn!("{}", err);
    }

    (
        status,
        Json(ErrorResponse {
            message: err.to_string(),
        }),
    )
        .into_response()
}
