use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{
        CreateNoteRequest, DeleteNoteResponse, ErrorResponse, NoteResponse, UpdateNoteRequest,
    },
    service::{NoteService, NoteServiceError},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_note,
        update_note,
        delete_note,
        get_one_note,
        get_all_notes
    ),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        ErrorResponse,
        DeleteNoteResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/notes", post(create_note))
        .route("/notes", get(get_all_notes))
        .route("/notes/{id}", put(update_note))
        .route("/notes/{id}", delete(delete_note))
        .route("/notes/{id}", get(get_one_note))
        .with_state(service)
}

fn error_body(error: &str) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Title or content missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    Json(payload): Json<CreateNoteRequest>,
) -> Response {
    match service.create_note(payload).await {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(NoteServiceError::Validation(message)) => {
            (StatusCode::BAD_REQUEST, error_body(message)).into_response()
        }
        Err(e) => {
            tracing::error!("failed to create note entry: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Failed to create note"),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Title or content missing", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Response {
    match service.update_note(id, payload).await {
        Ok(Some(note)) => (StatusCode::OK, Json(note)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, error_body("Note not found")).into_response(),
        Err(NoteServiceError::Validation(message)) => {
            (StatusCode::BAD_REQUEST, error_body(message)).into_response()
        }
        Err(e) => {
            tracing::error!("failed to update note entry: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Failed to update note"),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = DeleteNoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(State(service): State<Arc<NoteService>>, Path(id): Path<i64>) -> Response {
    match service.delete_note(id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(DeleteNoteResponse {
                message: "Note deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, error_body("Note not found")).into_response(),
        Err(e) => {
            tracing::error!("failed to delete note entry: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Failed to delete note"),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
) -> Response {
    match service.get_one_note(id).await {
        Ok(Some(note)) => (StatusCode::OK, Json(note)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, error_body("Note not found")).into_response(),
        Err(e) => {
            tracing::error!("failed to get note entry: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Failed to fetch note"),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/notes",
    responses(
        (status = 200, description = "List of all notes, newest first", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.get_all_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => {
            tracing::error!("failed to get note entries: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Failed to fetch notes"),
            )
                .into_response()
        }
    }
}
