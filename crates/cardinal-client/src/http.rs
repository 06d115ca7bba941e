//! HTTP client for the theme endpoints.

use cardinal_common::models::Theme;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ClientError;
use crate::provider::ThemeTransport;

/// Error body shape returned by the API.
#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Thin reqwest wrapper over `/api/v1/themes`.
pub struct ThemeClient {
    http: reqwest::Client,
    base_url: String,
    session_token: String,
}

impl ThemeClient {
    pub fn new(base_url: impl Into<String>, session_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session_token: session_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url.trim_end_matches('/'))
    }

    async fn check<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let message = response
            .json::<ApiError>()
            .await
            .map(|e| e.message)
            .unwrap_or_else(|_| status.to_string());
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch the caller's active theme.
    pub async fn fetch_active(&self) -> Result<Theme, ClientError> {
        let response = self
            .http
            .get(self.url("/themes/active"))
            .bearer_auth(&self.session_token)
            .send()
            .await?;
        Self::check(response).await
    }

    /// List own themes, or the marketplace when `public` is set.
    pub async fn list(&self, public: bool) -> Result<Vec<Theme>, ClientError> {
        let mut request = self.http.get(self.url("/themes"));
        if public {
            request = request.query(&[("public", "true")]);
        }
        let response = request.bearer_auth(&self.session_token).send().await?;
        Self::check(response).await
    }

    /// Persist a full theme record. The preview is stripped so the server
    /// re-derives it from the color set.
    pub async fn save(&self, theme: &Theme) -> Result<Theme, ClientError> {
        let mut body = serde_json::to_value(theme)?;
        if let Some(map) = body.as_object_mut() {
            map.remove("preview");
        }

        let response = self
            .http
            .post(self.url("/themes"))
            .bearer_auth(&self.session_token)
            .json(&body)
            .send()
            .await?;
        Self::check(response).await
    }

    /// Import a marketplace theme as a private copy.
    pub async fn clone_theme(
        &self,
        source_id: Uuid,
        new_name: &str,
    ) -> Result<Theme, ClientError> {
        let response = self
            .http
            .put(self.url("/themes"))
            .bearer_auth(&self.session_token)
            .json(&serde_json::json!({
                "originalThemeId": source_id.to_string(),
                "newName": new_name,
            }))
            .send()
            .await?;
        Self::check(response).await
    }

    /// Delete an owned theme.
    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/themes/{id}")))
            .bearer_auth(&self.session_token)
            .send()
            .await?;
        let _: serde_json::Value = Self::check(response).await?;
        Ok(())
    }
}

impl ThemeTransport for ThemeClient {
    async fn fetch_active(&self) -> Result<Theme, ClientError> {
        ThemeClient::fetch_active(self).await
    }

    async fn save(&self, theme: &Theme) -> Result<Theme, ClientError> {
        ThemeClient::save(self, theme).await
    }
}
