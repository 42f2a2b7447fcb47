//! Tests for the Reel Server Client library.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real server connection.

use reel_core::{ItemId, MediaLibrary, ReelError};
use reel_server_client::{
    ReelServerClient, ServerClientError, ServerConfig, UploadOutcome, UploadSummary,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_client() -> (MockServer, ReelServerClient) {
    let mock_server = MockServer::start().await;
    let config = ServerConfig::new(mock_server.uri()).with_upload_delay(Duration::ZERO);
    let client = ReelServerClient::new(config).unwrap();
    (mock_server, client)
}

fn catalog_json() -> serde_json::Value {
    json!([
        {
            "id": 3,
            "name": "Sunset",
            "filename": "Sunset_1a2b3c4d.mp4",
            "original_filename": "Sunset.mp4",
            "file_size": 5_242_880,
            "thumbnail": "Sunset_1a2b3c4d.jpg",
            "thumbnail_url": "/thumb/Sunset_1a2b3c4d.jpg",
            "created_at": "2026-03-01 10:00:00",
            "url": "/video/Sunset_1a2b3c4d.mp4"
        },
        {
            "id": 1,
            "name": "Theme",
            "filename": "Theme_9f8e7d6c.mp3",
            "original_filename": "Theme.mp3",
            "file_size": 3_100_000,
            "thumbnail": null,
            "created_at": "2026-02-27 08:30:00",
            "url": "/video/Theme_9f8e7d6c.mp3"
        }
    ])
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_valid_http_url() {
        let client = ReelServerClient::new(ServerConfig::new("http://localhost:5000"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = ReelServerClient::new(ServerConfig::new(""));

        match result.unwrap_err() {
            ServerClientError::InvalidUrl(msg) => assert!(msg.contains("empty")),
            e => panic!("Expected InvalidUrl, got: {:?}", e),
        }
    }

    #[test]
    fn test_scheme_required() {
        let result = ReelServerClient::new(ServerConfig::new("localhost:5000"));

        match result.unwrap_err() {
            ServerClientError::InvalidUrl(msg) => assert!(msg.contains("http://")),
            e => panic!("Expected InvalidUrl, got: {:?}", e),
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ReelServerClient::new(ServerConfig::new("http://localhost:5000/")).unwrap();
        assert_eq!(client.url(), "http://localhost:5000");
    }

    #[test]
    fn test_config_is_kept() {
        let config = ServerConfig::new("http://localhost:5000")
            .with_timeout(Duration::from_secs(5))
            .with_upload_delay(Duration::from_millis(250));
        let client = ReelServerClient::new(config).unwrap();

        assert_eq!(client.config().timeout, Duration::from_secs(5));
        assert_eq!(client.config().upload_delay, Duration::from_millis(250));
    }
}

// =============================================================================
// Health Tests
// =============================================================================

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_ok() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "video_count": 4,
                "thumbnail_count": 2,
                "video_folder": "uploads"
            })))
            .mount(&mock_server)
            .await;

        let health = client.health().await.unwrap();
        assert!(health.is_ok());
        assert_eq!(health.video_count, 4);
        assert_eq!(health.thumbnail_count, 2);
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client = ReelServerClient::new(
            ServerConfig::new("http://127.0.0.1:1").with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        match client.health().await.unwrap_err() {
            ServerClientError::ServerUnreachable(_) => {}
            e => panic!("Expected ServerUnreachable, got: {:?}", e),
        }
    }
}

// =============================================================================
// Library Tests
// =============================================================================

mod library {
    use super::*;

    #[tokio::test]
    async fn test_fetch_items_keeps_server_order() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
            .mount(&mock_server)
            .await;

        let items = client.library().fetch_items().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, ItemId::new(3));
        assert_eq!(items[0].display_name, "Sunset");
        assert_eq!(items[0].source_path, "Sunset_1a2b3c4d.mp4");
        assert_eq!(items[0].size_bytes, Some(5_242_880));
        assert_eq!(
            items[0].thumbnail_url.as_deref(),
            Some("/thumb/Sunset_1a2b3c4d.jpg")
        );
        assert_eq!(items[1].id, ItemId::new(1));
        assert!(items[1].thumbnail_url.is_none());
    }

    #[tokio::test]
    async fn test_fetch_empty_catalog() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let items = client.library().fetch_items().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&mock_server)
            .await;

        match client.library().fetch_items().await.unwrap_err() {
            ServerClientError::ParseError(msg) => assert!(msg.contains("catalog")),
            e => panic!("Expected ParseError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_fetch_server_error_uses_error_field() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "database locked"})),
            )
            .mount(&mock_server)
            .await;

        match client.library().fetch_items().await.unwrap_err() {
            ServerClientError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database locked");
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_delete_item() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("DELETE"))
            .and(path("/video/3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "Video deleted successfully"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        client.library().delete_item(ItemId::new(3)).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_item() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("DELETE"))
            .and(path("/video/42"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Video not found"})))
            .mount(&mock_server)
            .await;

        match client.library().delete_item(ItemId::new(42)).await.unwrap_err() {
            ServerClientError::ServerError { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("42"));
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }

    #[test]
    fn test_media_and_thumbnail_urls() {
        let client = ReelServerClient::new(ServerConfig::new("http://media.local")).unwrap();
        let item = reel_core::CatalogItem::new(ItemId::new(3), "Sunset", "Sunset_1a2b3c4d.mp4")
            .with_thumbnail("/thumb/Sunset_1a2b3c4d.jpg");

        let library = client.library();
        assert_eq!(
            library.media_url(&item),
            "http://media.local/video/Sunset_1a2b3c4d.mp4"
        );
        assert_eq!(
            library.thumbnail_url(&item).as_deref(),
            Some("http://media.local/thumb/Sunset_1a2b3c4d.jpg")
        );
    }
}

// =============================================================================
// Upload Tests
// =============================================================================

mod upload {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_media_file(extension: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("clip")
            .suffix(&format!(".{}", extension))
            .tempfile()
            .unwrap();

        // Write some dummy data
        file.write_all(b"fake media content").unwrap();
        file
    }

    fn upload_created(id: i64) -> ResponseTemplate {
        ResponseTemplate::new(201).set_body_json(json!({
            "message": "File uploaded successfully",
            "id": id,
            "filename": "clip_0a1b2c3d.mp4",
            "name": "clip",
            "size": 18,
            "thumbnail": "clip_0a1b2c3d.jpg",
            "url": "/video/clip_0a1b2c3d.mp4"
        }))
    }

    #[tokio::test]
    async fn test_upload_file_not_found() {
        let (_, client) = setup_client().await;

        let result = client
            .uploads()
            .upload_file(std::path::Path::new("/nonexistent/clip.mp4"))
            .await;

        match result.unwrap_err() {
            ServerClientError::FileNotFound(path) => assert!(path.contains("nonexistent")),
            e => panic!("Expected FileNotFound, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_unsupported_file_makes_no_request() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(upload_created(1))
            .expect(0)
            .mount(&mock_server)
            .await;

        let file = create_temp_media_file("txt");
        match client.uploads().upload_file(file.path()).await.unwrap_err() {
            ServerClientError::UnsupportedFile(name) => assert!(name.ends_with(".txt")),
            e => panic!("Expected UnsupportedFile, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_successful_upload() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(upload_created(9))
            .expect(1)
            .mount(&mock_server)
            .await;

        let file = create_temp_media_file("mp4");
        let response = client.uploads().upload_file(file.path()).await.unwrap();

        assert_eq!(response.id, ItemId::new(9));
        assert_eq!(response.name, "clip");
        assert_eq!(response.size, 18);
    }

    #[tokio::test]
    async fn test_rejected_upload() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "File type not allowed"})),
            )
            .mount(&mock_server)
            .await;

        let file = create_temp_media_file("wav");
        match client.uploads().upload_file(file.path()).await.unwrap_err() {
            ServerClientError::ServerError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "File type not allowed");
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_batch_skips_unsupported_files() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(upload_created(5))
            .expect(2)
            .mount(&mock_server)
            .await;

        let video = create_temp_media_file("mp4");
        let notes = create_temp_media_file("txt");
        let song = create_temp_media_file("mp3");
        let files = vec![
            video.path().to_path_buf(),
            notes.path().to_path_buf(),
            song.path().to_path_buf(),
        ];

        let mut seen = Vec::new();
        let summary = client
            .uploads()
            .upload_batch(files, |progress| {
                seen.push((progress.processed, progress.total, progress.outcome));
            })
            .await;

        assert_eq!(
            summary,
            UploadSummary {
                uploaded: 2,
                failed: 0,
                skipped: 1
            }
        );
        assert!(summary.needs_refresh());
        assert_eq!(
            seen,
            vec![
                (1, 3, UploadOutcome::Uploaded { id: ItemId::new(5) }),
                (2, 3, UploadOutcome::Skipped),
                (3, 3, UploadOutcome::Uploaded { id: ItemId::new(5) }),
            ]
        );
    }

    #[tokio::test]
    async fn test_batch_counts_failures() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "disk full"})))
            .mount(&mock_server)
            .await;

        let file = create_temp_media_file("webm");
        let summary = client
            .uploads()
            .upload_batch(vec![file.path().to_path_buf()], |_| {})
            .await;

        assert_eq!(summary.failed, 1);
        assert!(!summary.needs_refresh());
    }
}

// =============================================================================
// MediaLibrary Impl Tests
// =============================================================================

mod media_library {
    use super::*;

    #[tokio::test]
    async fn test_fetch_through_trait() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
            .mount(&mock_server)
            .await;

        let library: &dyn MediaLibrary = &client;
        let items = library.fetch_items().await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_errors_map_to_core_errors() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("DELETE"))
            .and(path("/video/7"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
            .mount(&mock_server)
            .await;

        let err = MediaLibrary::delete_item(&client, ItemId::new(7))
            .await
            .unwrap_err();

        assert!(matches!(err, ReelError::Server { status: 500, .. }));
        assert!(err.is_transient());
    }
}
