use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Epoch milliseconds
    pub updated_at: i64,
}

#[derive(Debug, Serialize)]
struct NotePayload<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct DeletedBody {
    message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("note not found")]
    NotFound,

    #[error("server error: {0}")]
    Server(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

fn classify(status: StatusCode, error: String) -> ApiError {
    match status {
        StatusCode::BAD_REQUEST => ApiError::InvalidInput(error),
        StatusCode::NOT_FOUND => ApiError::NotFound,
        _ => ApiError::Server(error),
    }
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    // Error responses carry {"error": "..."} which becomes the ApiError
    // message; anything unparsable falls back to the status line.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error = response
            .json::<ErrorBody>()
            .await
            .map_or_else(|_| status.to_string(), |body| body.error);

        Err(classify(status, error))
    }

    pub async fn get_all_notes(&self) -> Result<Vec<Note>, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/notes", self.base_url))
            .send()
            .await?;

        Self::check(response).await?.json().await.map_err(Into::into)
    }

    pub async fn create_note(&self, title: &str, content: &str) -> Result<Note, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/notes", self.base_url))
            .json(&NotePayload { title, content })
            .send()
            .await?;

        Self::check(response).await?.json().await.map_err(Into::into)
    }

    pub async fn update_note(&self, id: i64, title: &str, content: &str) -> Result<Note, ApiError> {
        let response = self
            .http
            .put(format!("{}/api/notes/{id}", self.base_url))
            .json(&NotePayload { title, content })
            .send()
            .await?;

        Self::check(response).await?.json().await.map_err(Into::into)
    }

    /// Returns the server's confirmation message.
    pub async fn delete_note(&self, id: i64) -> Result<String, ApiError> {
        let response = self
            .http
            .delete(format!("{}/api/notes/{id}", self.base_url))
            .send()
            .await?;

        Self::check(response)
            .await?
            .json::<DeletedBody>()
            .await
            .map(|body| body.message)
            .map_err(Into::into)
    }
}
