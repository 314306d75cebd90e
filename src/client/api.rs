use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{CreateFeedbackPayload, ErrorBody, FeedbackRecord, FeedbackResponse};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API responded with status {status}")]
    Api {
        status: u16,
        body: Option<ErrorBody>,
    },
}

impl ClientError {
    /// The `error` field the server put in its response body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api {
                body: Some(body), ..
            } => Some(body.error.as_str()),
            _ => None,
        }
    }
}

#[async_trait]
pub trait FeedbackApi: Send + Sync {
    async fn fetch_feedback(&self) -> Result<Vec<FeedbackRecord>, ClientError>;

    async fn submit_feedback(
        &self,
        payload: &CreateFeedbackPayload,
    ) -> Result<FeedbackResponse, ClientError>;

    async fn delete_feedback(&self, id: i32) -> Result<FeedbackResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpFeedbackApi {
    base_url: String,
    http: Client,
}

impl HttpFeedbackApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn feedback_url(&self) -> String {
        format!("{}/api/feedback", self.base_url)
    }
}

impl Default for HttpFeedbackApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }

    let body = res.json::<ErrorBody>().await.ok();
    Err(ClientError::Api {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl FeedbackApi for HttpFeedbackApi {
    async fn fetch_feedback(&self) -> Result<Vec<FeedbackRecord>, ClientError> {
        let res = self.http.get(self.feedback_url()).send().await?;
        decode(res).await
    }

    async fn submit_feedback(
        &self,
        payload: &CreateFeedbackPayload,
    ) -> Result<FeedbackResponse, ClientError> {
        let res = self
            .http
            .post(self.feedback_url())
            .json(payload)
            .send()
            .await?;
        decode(res).await
    }

    async fn delete_feedback(&self, id: i32) -> Result<FeedbackResponse, ClientError> {
        let res = self
            .http
            .delete(format!("{}/{}", self.feedback_url(), id))
            .send()
            .await?;
        decode(res).await
    }
}
