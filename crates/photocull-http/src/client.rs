//! HTTP client for the photocull server.
//!
//! `HttpPersistence` performs the requests and returns internal
//! [`HttpError`](crate::HttpError)s; the `PersistencePort` implementation in
//! `port.rs` maps them to core errors.

use photocull_core::{
    ExportRequest, ExportResponse, ImageId, ImageRecord, Judgment, UploadFile, UploadResponse,
};
use url::Url;

use crate::config::HttpClientConfig;
use crate::error::HttpResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::url::{export_url, images_url, parse_base_url, rating_url, upload_url};

/// `HttpPersistence` using the reqwest HTTP backend.
pub type DefaultHttpPersistence = HttpPersistence<ReqwestBackend>;

/// Client for the photocull server's JSON API.
///
/// Generic over the HTTP backend so tests can substitute a fake; external
/// code should construct it with [`HttpPersistence::new`] and use it as a
/// `PersistencePort`.
pub struct HttpPersistence<B: HttpBackend = ReqwestBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
}

impl DefaultHttpPersistence {
    /// Create a client for the server at `config`'s base URL.
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be
    /// built. No request is made.
    pub fn new(config: &HttpClientConfig) -> HttpResult<Self> {
        let base_url = parse_base_url(config.base_url())?;
        let backend = ReqwestBackend::new(config)?;
        tracing::debug!(base_url = %base_url, "Created HTTP persistence client");
        Ok(Self { backend, base_url })
    }
}

impl<B: HttpBackend> HttpPersistence<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(base_url: &str, backend: B) -> HttpResult<Self> {
        Ok(Self {
            backend,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// The API root requests are sent to.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) async fn fetch_images(&self) -> HttpResult<Vec<ImageRecord>> {
        let url = images_url(&self.base_url)?;
        let images: Vec<ImageRecord> = self.backend.get_json(&url).await?;
        tracing::debug!(count = images.len(), "Fetched image listing");
        Ok(images)
    }

    pub(crate) async fn send_files(&self, files: Vec<UploadFile>) -> HttpResult<UploadResponse> {
        let url = upload_url(&self.base_url)?;
        tracing::info!(files = files.len(), "Uploading files for analysis");
        self.backend.post_multipart(&url, files).await
    }

    /// Persist one judgment. Both fields are always sent.
    pub(crate) async fn send_judgment(&self, id: ImageId, judgment: Judgment) -> HttpResult<()> {
        let url = rating_url(&self.base_url, id)?;
        tracing::debug!(
            image_id = id,
            rating = judgment.rating.stars(),
            label = %judgment.label,
            "Saving judgment"
        );
        self.backend.post_json_ack(&url, &judgment).await
    }

    pub(crate) async fn send_export(&self, request: ExportRequest) -> HttpResult<ExportResponse> {
        let url = export_url(&self.base_url)?;
        self.backend.post_json(&url, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use photocull_core::{ExportKind, Label, Rating};
    use serde_json::json;

    fn client(backend: FakeBackend) -> HttpPersistence<FakeBackend> {
        HttpPersistence::with_backend("http://localhost:5000/api", backend).unwrap()
    }

    #[test]
    fn test_default_client_creation() {
        let persistence = HttpPersistence::new(&HttpClientConfig::new()).unwrap();
        assert_eq!(persistence.base_url().as_str(), "http://localhost:5000/api/");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = HttpClientConfig::new().with_base_url("not a url");
        assert!(matches!(
            HttpPersistence::new(&config),
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_send_judgment_carries_both_fields() {
        let persistence = client(FakeBackend::new().with_response(
            "POST",
            "images/7/rating",
            CannedResponse::ok(json!({"success": true})),
        ));
        let judgment = Judgment {
            rating: Rating::new(4).unwrap(),
            label: Label::Selected,
        };

        persistence.send_judgment(7, judgment).await.unwrap();

        let requests = persistence.backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/api/images/7/rating");
        assert_eq!(
            requests[0].body,
            Some(json!({"rating": 4, "label": "selected"}))
        );
    }

    #[tokio::test]
    async fn test_send_export_body_shape() {
        let persistence = client(FakeBackend::new().with_response(
            "POST",
            "export",
            CannedResponse::ok(json!({"success": true, "exported_files": 2})),
        ));

        let response = persistence
            .send_export(ExportRequest {
                kind: ExportKind::Zip,
                selected_ids: vec![3, 5],
            })
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.exported_files, 2);
        assert_eq!(
            persistence.backend.requests()[0].body,
            Some(json!({"type": "zip", "selected_ids": [3, 5]}))
        );
    }
}
