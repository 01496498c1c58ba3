use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::app::AppState;
use crate::app::model::{
    ErrorResponse, IngestRequest, MarkDoneRequest, PlayRequest, ShowView, StatusResponse,
};
use crate::error::Error;
use crate::store::Collection;

#[derive(Debug)]
pub(crate) enum ApiError {
    Core(Error),
    BadRequest(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Core(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Core(err) => {
                let status = match &err {
                    Error::NotFound(_) => StatusCode::NOT_FOUND,
                    Error::Fetch { .. } => StatusCode::BAD_GATEWAY,
                    err if err.is_client_error() => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status.is_server_error() {
                    tracing::error!(%err, "request failed");
                }
                (status, err.to_string())
            }
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Internal(message) => {
                tracing::error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| ApiError::Internal(format!("blocking task failed: {err}")))?
        .map_err(ApiError::from)
}

pub(crate) async fn list_shows(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let repository = state.repository.clone();
    let names = blocking(move || repository.list_collections()).await?;
    Ok(Json(names))
}

pub(crate) async fn ingest_show(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<Collection>, ApiError> {
    if request.url.trim().is_empty() {
        return Err(ApiError::BadRequest("url is required".to_string()));
    }
    let repository = state.repository.clone();
    let fetcher = state.fetcher.clone();
    let collection = blocking(move || {
        repository.ingest(fetcher.as_ref(), &request.url, request.base.as_deref())
    })
    .await?;
    Ok(Json(collection))
}

pub(crate) async fn load_show(
    State(state): State<AppState>,
    Path(show): Path<String>,
) -> Result<Json<ShowView>, ApiError> {
    let repository = state.repository.clone();
    let collection = blocking(move || repository.load(&show)).await?;
    Ok(Json(collection.into()))
}

pub(crate) async fn mark_done(
    State(state): State<AppState>,
    Path(show): Path<String>,
    Json(request): Json<MarkDoneRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let repository = state.repository.clone();
    blocking(move || repository.save_progress(&show, &request.progress)).await?;
    Ok(Json(StatusResponse::new("ok")))
}

pub(crate) async fn play(
    State(state): State<AppState>,
    Path(show): Path<String>,
    Json(request): Json<PlayRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Some(link) = request
        .link
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
    else {
        return Err(ApiError::BadRequest("No link provided".to_string()));
    };

    let repository = state.repository.clone();
    let player = state.player.clone();
    blocking(move || {
        let collection = repository.load(&show)?;
        if !collection.links.contains(&link) {
            return Err(Error::UnknownLink {
                collection: show,
                link,
            });
        }
        player.launch(&link)
    })
    .await?;
    Ok(Json(StatusResponse::new("playing")))
}
