//! Port trait implementation for `HttpPersistence`.
//!
//! This module implements the core-owned `PersistencePort` trait, mapping
//! internal `HttpError`s to `PersistenceError` at the boundary.

use async_trait::async_trait;
use photocull_core::{
    ExportRequest, ExportResponse, ImageId, ImageRecord, Judgment, PersistenceError,
    PersistencePort, PersistenceResult, UploadFile, UploadResponse,
};

use crate::client::HttpPersistence;
use crate::error::HttpError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `HttpError` to core `PersistenceError`.
fn map_error(err: HttpError) -> PersistenceError {
    match err {
        HttpError::Status {
            status,
            url,
            message,
        } => PersistenceError::Status {
            status,
            message: message.unwrap_or_else(|| format!("request to {url} failed")),
        },
        HttpError::InvalidResponse { message } => PersistenceError::InvalidResponse { message },
        HttpError::Network(e) => PersistenceError::Network {
            message: e.to_string(),
        },
        HttpError::InvalidUrl(e) => PersistenceError::Network {
            message: format!("invalid request URL: {e}"),
        },
        HttpError::JsonParse(e) => PersistenceError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend> PersistencePort for HttpPersistence<B> {
    async fn list_images(&self) -> PersistenceResult<Vec<ImageRecord>> {
        self.fetch_images().await.map_err(map_error)
    }

    async fn upload(&self, files: Vec<UploadFile>) -> PersistenceResult<UploadResponse> {
        self.send_files(files).await.map_err(map_error)
    }

    async fn save_judgment(&self, id: ImageId, judgment: Judgment) -> PersistenceResult<()> {
        self.send_judgment(id, judgment).await.map_err(|e| {
            tracing::warn!(image_id = id, error = %e, "Judgment write failed");
            map_error(e)
        })
    }

    async fn export(&self, request: ExportRequest) -> PersistenceResult<ExportResponse> {
        self.send_export(request).await.map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use photocull_core::{Label, Rating, UploadFile};
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn persistence(backend: FakeBackend) -> HttpPersistence<FakeBackend> {
        HttpPersistence::with_backend("http://localhost:5000/api/", backend).unwrap()
    }

    #[test]
    fn test_map_error_status_uses_body_message() {
        let mapped = map_error(HttpError::Status {
            status: 400,
            url: "http://localhost:5000/api/upload".to_string(),
            message: Some("No files provided".to_string()),
        });
        assert_eq!(
            mapped,
            PersistenceError::Status {
                status: 400,
                message: "No files provided".to_string(),
            }
        );
    }

    #[test]
    fn test_map_error_status_without_body() {
        let mapped = map_error(HttpError::Status {
            status: 503,
            url: "http://localhost:5000/api/images".to_string(),
            message: None,
        });
        match mapped {
            PersistenceError::Status { status, message } => {
                assert_eq!(status, 503);
                assert!(message.contains("/api/images"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_error_json() {
        let err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        assert!(matches!(
            map_error(err.into()),
            PersistenceError::InvalidResponse { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_images_parses_service_rows() {
        let port = persistence(FakeBackend::new().with_response(
            "GET",
            "images",
            CannedResponse::ok(json!([
                {
                    "id": 2,
                    "filename": "b.jpg",
                    "focus_score": 81.5,
                    "rating": 3,
                    "label": "review",
                    "upload_timestamp": "2024-03-01 09:15:00"
                },
                {"id": 1, "filename": "a.jpg", "rating": null, "label": null}
            ])),
        ));

        let images = assert_ok!(port.list_images().await);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].id, 2);
        assert_eq!(images[0].label(), Label::Review);
        assert_eq!(images[1].label(), Label::None);
        assert!(images[1].rating().is_unrated());
    }

    #[tokio::test]
    async fn test_list_images_server_error() {
        let port = persistence(FakeBackend::new().with_response(
            "GET",
            "images",
            CannedResponse::status(500, json!({"error": "database is locked"})),
        ));

        let err = assert_err!(port.list_images().await);
        assert_eq!(
            err,
            PersistenceError::Status {
                status: 500,
                message: "database is locked".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_save_judgment_ignores_reply_body() {
        let port = persistence(FakeBackend::new().with_response(
            "POST",
            "images/3/rating",
            CannedResponse::ok(json!(null)),
        ));

        let judgment = Judgment::new(Rating::new(5).unwrap(), Label::Selected);
        assert_ok!(port.save_judgment(3, judgment).await);
    }

    #[tokio::test]
    async fn test_save_judgment_failure_status() {
        let port = persistence(FakeBackend::new().with_response(
            "POST",
            "images/3/rating",
            CannedResponse::status(500, json!({"error": "write failed"})),
        ));

        let err = assert_err!(port.save_judgment(3, Judgment::CLEARED).await);
        assert!(matches!(err, PersistenceError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_upload_sends_files_field_and_parses_reply() {
        let port = persistence(FakeBackend::new().with_response(
            "POST",
            "upload",
            CannedResponse::ok(json!({
                "success": true,
                "images": [{"id": 7, "filename": "new.jpg", "focus_score": 90}],
                "processed_count": 1,
                "errors": [{"filename": "broken.png", "error": "cannot identify image file"}]
            })),
        ));

        let files = vec![
            UploadFile::new("new.jpg", vec![0xFF, 0xD8]).with_content_type("image/jpeg"),
            UploadFile::new("broken.png", vec![0x00]),
        ];
        let response = assert_ok!(port.upload(files).await);

        assert!(response.success);
        assert_eq!(response.processed_count, 1);
        assert_eq!(response.images[0].id, 7);
        assert_eq!(response.errors[0].filename, "broken.png");

        let requests = port.backend.requests();
        assert_eq!(
            requests[0].parts,
            vec![
                ("files".to_string(), "new.jpg".to_string()),
                ("files".to_string(), "broken.png".to_string()),
            ]
        );
    }
}
