use async_trait::async_trait;
use reqwest::{Client, Response};

use super::{PersistError, ThoughtBackend};
use crate::config::ApiEndpoint;
use crate::graph_state::{NewThought, Position, ThoughtId, ThoughtNode};
use crate::serialization::{
    SerializableNewThought, SerializablePositionPatch, decode_thought,
    decode_thoughts,
};

/// REST client for the `/api/thoughts` collection.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    endpoint: ApiEndpoint,
}

impl HttpBackend {
    pub fn new(endpoint: ApiEndpoint) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: ApiEndpoint) -> Self {
        Self { client, endpoint }
    }
}

async fn success_body(response: Response) -> Result<Vec<u8>, PersistError> {
    let status = response.status();
    if !status.is_success() {
        return Err(PersistError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    Ok(response.bytes().await?.to_vec())
}

#[async_trait]
impl ThoughtBackend for HttpBackend {
    async fn fetch_all(&self) -> Result<Vec<ThoughtNode>, PersistError> {
        let response = self
            .client
            .get(self.endpoint.collection())
            .send()
            .await?;
        let body = success_body(response).await?;
        Ok(decode_thoughts(&body)?)
    }

    async fn create(
        &self,
        draft: NewThought,
    ) -> Result<ThoughtNode, PersistError> {
        let response = self
            .client
            .post(self.endpoint.collection())
            .json(&SerializableNewThought::from(&draft))
            .send()
            .await?;
        let body = success_body(response).await?;
        decode_thought(&body)?.ok_or(PersistError::EmptyResponse)
    }

    async fn update_position(
        &self,
        id: &ThoughtId,
        position: Position,
    ) -> Result<ThoughtNode, PersistError> {
        let response = self
            .client
            .put(self.endpoint.item(id.as_str()))
            .json(&SerializablePositionPatch::from(position))
            .send()
            .await?;
        let body = success_body(response).await?;
        decode_thought(&body)?
            .ok_or_else(|| PersistError::UnknownId(id.clone()))
    }
}
