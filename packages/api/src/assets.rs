//! Uploaded files (images, PDFs, audio) stored under the upload directory.

use serde::{Deserialize, Serialize};

/// Multipart upload endpoint. Lives outside the server-function layer so the
/// file streams in as form data instead of a JSON byte array.
pub const UPLOAD_ROUTE: &str = "/api/uploads";

/// Form field that carries the file.
pub const UPLOAD_FIELD: &str = "file";

/// Request body cap for [`UPLOAD_ROUTE`].
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Pdf,
    Audio,
    Other,
}

impl AssetKind {
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            AssetKind::Image
        } else if mime == "application/pdf" {
            AssetKind::Pdf
        } else if mime.starts_with("audio/") {
            AssetKind::Audio
        } else {
            AssetKind::Other
        }
    }
}

/// What the client gets back after an upload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub id: String,
    /// Public URL to embed.
    pub url: String,
    /// File name under the upload directory.
    pub path: String,
    pub kind: AssetKind,
}

/// `<id>.<ext>`, with the extension taken from the original file name.
pub fn stored_name(id: &str, original: &str) -> String {
    let ext = original
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));
    match ext {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// A plain file name with no directory parts.
pub fn is_bare_file_name(path: &str) -> bool {
    !path.is_empty()
        && path != "."
        && path != ".."
        && !path.contains(['/', '\\'])
}

#[cfg(feature = "server")]
pub async fn store_upload(
    config: &crate::config::ServerConfig,
    name: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<AssetInfo, crate::error::ApiError> {
    if bytes.is_empty() {
        return Err(crate::error::ApiError::EmptyUpload);
    }
    let id = uuid::Uuid::new_v4().to_string();
    let path = stored_name(&id, name);
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tokio::fs::write(config.upload_dir.join(&path), &bytes).await?;

    let kind = AssetKind::from_mime(mime);
    tracing::info!(%path, ?kind, size = bytes.len(), "stored upload");
    Ok(AssetInfo {
        url: config.upload_url(&path),
        id,
        path,
        kind,
    })
}

/// Router with the multipart upload endpoint and its body limit. Expects the
/// shared `ServerConfig` extension to be layered on by the caller.
#[cfg(feature = "server")]
pub fn upload_router() -> axum::Router {
    use axum::extract::DefaultBodyLimit;
    use axum::routing::post;

    axum::Router::new().route(
        UPLOAD_ROUTE,
        post(upload_handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
    )
}

#[cfg(feature = "server")]
async fn upload_handler(
    axum::Extension(config): axum::Extension<std::sync::Arc<crate::config::ServerConfig>>,
    mut multipart: axum::extract::Multipart,
) -> Result<axum::Json<AssetInfo>, (axum::http::StatusCode, String)> {
    use axum::http::StatusCode;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let mime = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(|e| {
            tracing::warn!(name = %name, error = %e, "upload body rejected");
            (e.status(), e.body_text())
        })?;

        return match store_upload(&config, &name, &mime, bytes.to_vec()).await {
            Ok(asset) => Ok(axum::Json(asset)),
            Err(crate::error::ApiError::EmptyUpload) => {
                Err((StatusCode::BAD_REQUEST, crate::error::ApiError::EmptyUpload.to_string()))
            }
            Err(e) => {
                tracing::error!(name = %name, error = %e, "upload failed");
                Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
            }
        };
    }
    Err((StatusCode::BAD_REQUEST, format!("missing `{UPLOAD_FIELD}` field")))
}

#[cfg(feature = "server")]
pub async fn remove_upload(
    config: &crate::config::ServerConfig,
    path: &str,
) -> Result<(), crate::error::ApiError> {
    if !is_bare_file_name(path) {
        return Err(crate::error::ApiError::InvalidAssetPath(path.to_string()));
    }
    match tokio::fs::remove_file(config.upload_dir.join(path)).await {
        Ok(()) => {
            tracing::info!(path, "removed upload");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path, "upload already gone");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_by_mime() {
        assert_eq!(AssetKind::from_mime("image/png"), AssetKind::Image);
        assert_eq!(AssetKind::from_mime("application/pdf"), AssetKind::Pdf);
        assert_eq!(AssetKind::from_mime("audio/mpeg"), AssetKind::Audio);
        assert_eq!(AssetKind::from_mime("video/mp4"), AssetKind::Other);
        assert_eq!(AssetKind::from_mime(""), AssetKind::Other);
    }

    #[test]
    fn stored_name_keeps_extension() {
        assert_eq!(stored_name("abc", "Photo.JPG"), "abc.jpg");
        assert_eq!(stored_name("abc", "archive.tar.gz"), "abc.gz");
        assert_eq!(stored_name("abc", "README"), "abc");
        assert_eq!(stored_name("abc", "odd."), "abc");
        assert_eq!(stored_name("abc", "x.p/ng"), "abc");
    }

    #[test]
    fn only_bare_names_are_deletable() {
        assert!(is_bare_file_name("abc.png"));
        assert!(!is_bare_file_name("../abc.png"));
        assert!(!is_bare_file_name("sub/abc.png"));
        assert!(!is_bare_file_name(".."));
        assert!(!is_bare_file_name(""));
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AssetKind::Pdf).unwrap(), "\"pdf\"");
    }
}

#[cfg(all(test, feature = "server"))]
mod server_tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::ServerConfig;

    const BOUNDARY: &str = "portfolio-upload-boundary";

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("portfolio_upload_{tag}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn app(upload_dir: &PathBuf) -> axum::Router {
        let mut config = ServerConfig::from_lookup(|_| None);
        config.upload_dir = upload_dir.clone();
        upload_router().layer(axum::Extension(Arc::new(config)))
    }

    fn multipart(field: &str, file_name: &str, mime: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri(UPLOAD_ROUTE)
            .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn files_larger_than_the_default_body_limit_upload() {
        let dir = temp_dir("large");
        let payload = vec![7u8; 3 * 1024 * 1024];

        let response = app(&dir)
            .oneshot(multipart(UPLOAD_FIELD, "resume.pdf", "application/pdf", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let asset: AssetInfo = serde_json::from_slice(&body).unwrap();
        assert_eq!(asset.kind, AssetKind::Pdf);
        assert!(asset.path.ends_with(".pdf"));
        assert_eq!(asset.url, format!("/uploads/{}", asset.path));
        let stored = std::fs::read(dir.join(&asset.path)).unwrap();
        assert_eq!(stored.len(), payload.len());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn empty_file_is_a_bad_request() {
        let dir = temp_dir("empty");
        let response = app(&dir)
            .oneshot(multipart(UPLOAD_FIELD, "a.png", "image/png", b""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn form_without_file_field_is_a_bad_request() {
        let dir = temp_dir("nofield");
        let response = app(&dir)
            .oneshot(multipart("other", "a.png", "image/png", b"abc"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
