use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Client, ClientError, ClientResult};

/// Making requests to the recommendation backend.
impl Client {
    /// POST `body` as JSON to `endpoint` (relative to the base URL) and
    /// decode the JSON response as `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend answers with a
    /// non-success status, or the response is not valid.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = self.post_raw(endpoint, serde_json::to_vec(body)?).await?;
        Self::parse_response::<T>(&bytes)
    }

    pub(crate) async fn post_raw(&self, endpoint: &str, body: Vec<u8>) -> ClientResult<Vec<u8>> {
        let response = self
            .client
            .post(format!("{}/{endpoint}", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes: Vec<u8> = response.bytes().await?.into();
        if !status.is_success() {
            return Err(ClientError::StatusError {
                status: status.as_u16(),
                message: Self::parse_error_message(&bytes),
            });
        }

        Ok(bytes)
    }

    fn parse_response<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The backend reports failures as `{"error": "..."}`; anything else is
    /// ignored.
    fn parse_error_message(bytes: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(bytes)
            .ok()
            .map(|body| body.error)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    error: String,
}
