//! Record access layer.
//!
//! Maps each tutorial operation onto exactly one API call. No retries, no
//! logging, no error recovery: failures go straight back to the caller.

use async_trait::async_trait;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{
    CreateTutorialRequest, Tutorial, TutorialId, TutorialPatch, UpdateTutorialRequest,
};

/// Collection endpoint, relative to the API base URL.
pub const TUTORIALS_PATH: &str = "/tutorials";

/// Remote tutorial operations consumed by the collection store.
#[async_trait]
pub trait TutorialService: Send + Sync + 'static {
    /// GET /tutorials
    async fn list_all(&self) -> Result<Vec<Tutorial>, ClientError>;

    /// GET /tutorials/{id}
    async fn get_one(&self, id: &TutorialId) -> Result<Tutorial, ClientError>;

    /// POST /tutorials
    async fn create(&self, request: &CreateTutorialRequest) -> Result<Tutorial, ClientError>;

    /// PUT /tutorials/{id}
    async fn update(
        &self,
        id: &TutorialId,
        request: &UpdateTutorialRequest,
    ) -> Result<TutorialPatch, ClientError>;

    /// DELETE /tutorials/{id}
    async fn remove(&self, id: &TutorialId) -> Result<(), ClientError>;

    /// DELETE /tutorials
    async fn remove_all(&self) -> Result<(), ClientError>;

    /// GET /tutorials?title={title}
    async fn search(&self, title: &str) -> Result<Vec<Tutorial>, ClientError>;
}

/// `TutorialService` backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpTutorialService {
    client: ApiClient,
}

impl HttpTutorialService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn item_path(id: &TutorialId) -> String {
        format!("{}/{}", TUTORIALS_PATH, id)
    }
}

#[async_trait]
impl TutorialService for HttpTutorialService {
    async fn list_all(&self) -> Result<Vec<Tutorial>, ClientError> {
        self.client.get(TUTORIALS_PATH, &[]).await
    }

    async fn get_one(&self, id: &TutorialId) -> Result<Tutorial, ClientError> {
        self.client
            .get(&Self::item_path(id), &[])
            .await
            .map_err(|e| match e {
                ClientError::Server { .. } => ClientError::NotFound(id.to_string()),
                other => other,
            })
    }

    async fn create(&self, request: &CreateTutorialRequest) -> Result<Tutorial, ClientError> {
        self.client.post(TUTORIALS_PATH, request).await
    }

    async fn update(
        &self,
        id: &TutorialId,
        request: &UpdateTutorialRequest,
    ) -> Result<TutorialPatch, ClientError> {
        let patch: Option<TutorialPatch> = self.client.put(&Self::item_path(id), request).await?;
        Ok(patch.unwrap_or_default())
    }

    async fn remove(&self, id: &TutorialId) -> Result<(), ClientError> {
        self.client.delete(&Self::item_path(id)).await
    }

    async fn remove_all(&self) -> Result<(), ClientError> {
        self.client.delete(TUTORIALS_PATH).await
    }

    async fn search(&self, title: &str) -> Result<Vec<Tutorial>, ClientError> {
        self.client.get(TUTORIALS_PATH, &[("title", title)]).await
    }
}
