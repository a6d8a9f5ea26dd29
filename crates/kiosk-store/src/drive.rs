//! Google Drive v3 backend.
//!
//! Authenticates with a bearer access token. Token minting (service account
//! JWT exchange) happens outside this process. Drive access tokens expire
//! after about an hour, so a store built with [`DriveObjectStore::from_config`]
//! re-reads the environment variable named in [`DriveConfig`] on every
//! request; whatever refreshes the token only has to update that variable.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;
use crate::types::{FileId, FileMetadata, PermissionGrant};

pub const DEFAULT_DRIVE_BASE_URL: &str = "https://www.googleapis.com";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    pub base_url: String,
    /// Name of the environment variable holding the OAuth access token.
    /// Read on every request, not only at startup.
    pub access_token_env: String,
    pub timeout_secs: u64,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DRIVE_BASE_URL.to_string(),
            access_token_env: "GOOGLE_DRIVE_ACCESS_TOKEN".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Clone)]
pub struct DriveObjectStore {
    http: reqwest::Client,
    base_url: String,
    token: AccessToken,
}

#[derive(Clone)]
enum AccessToken {
    Fixed(String),
    /// Name of an environment variable, read per request.
    Env(String),
}

impl AccessToken {
    fn resolve(&self) -> StoreResult<String> {
        match self {
            Self::Fixed(token) => Ok(token.clone()),
            Self::Env(var) => read_token(var),
        }
    }
}

fn read_token(var: &str) -> StoreResult<String> {
    std::env::var(var)
        .ok()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| StoreError::Config(format!("{var} is not set")))
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    id: String,
}

#[derive(Debug, Deserialize)]
struct WebLink {
    #[serde(rename = "webViewLink", default)]
    web_view_link: Option<String>,
}

impl DriveObjectStore {
    pub fn new(access_token: impl Into<String>) -> StoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DriveConfig::default().timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_DRIVE_BASE_URL.to_string(),
            token: AccessToken::Fixed(access_token.into()),
        })
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build a store from config. Fails if the token variable is unset now;
    /// afterwards the variable is read again for each request.
    pub fn from_config(config: &DriveConfig) -> StoreResult<Self> {
        let token = read_token(&config.access_token_env)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let mut store = Self::new(token)?
            .with_http_client(http)
            .with_base_url(config.base_url.clone());
        store.token = AccessToken::Env(config.access_token_env.clone());
        Ok(store)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> StoreResult<reqwest::RequestBuilder> {
        Ok(req.bearer_auth(self.token.resolve()?))
    }

    async fn check(
        response: reqwest::Response,
        id: Option<&FileId>,
    ) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(StoreError::NotFound(id.clone()));
            }
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

/// Quote a file name for a Drive `q` expression.
fn name_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name='{escaped}' and trashed=false")
}

#[async_trait]
impl ObjectStore for DriveObjectStore {
    async fn list_by_name(&self, name: &str) -> StoreResult<Vec<FileId>> {
        let query = name_query(name);
        let req = self.http.get(self.url("/drive/v3/files")).query(&[
            ("q", query.as_str()),
            ("spaces", "drive"),
            ("fields", "files(id, name)"),
        ]);
        let response = Self::check(self.authed(req)?.send().await?, None).await?;
        let list: FileList = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        Ok(list.files.into_iter().map(|f| FileId::new(f.id)).collect())
    }

    async fn get_media(&self, id: &FileId) -> StoreResult<Bytes> {
        let req = self
            .http
            .get(self.url(&format!("/drive/v3/files/{id}")))
            .query(&[("alt", "media")]);
        let response = Self::check(self.authed(req)?.send().await?, Some(id)).await?;
        Ok(response.bytes().await?)
    }

    /// Creates the file from its metadata, then uploads the content. If the
    /// upload fails the empty file stays behind under the same name.
    async fn create(&self, metadata: &FileMetadata, content: Bytes) -> StoreResult<FileId> {
        let req = self
            .http
            .post(self.url("/drive/v3/files"))
            .query(&[("fields", "id")])
            .json(metadata);
        let response = Self::check(self.authed(req)?.send().await?, None).await?;
        let entry: FileEntry = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        let id = FileId::new(entry.id);
        self.update_media(&id, &metadata.mime_type, content).await?;
        tracing::debug!(file = %id, name = %metadata.name, "created drive file");
        Ok(id)
    }

    async fn update_media(&self, id: &FileId, mime_type: &str, content: Bytes) -> StoreResult<()> {
        let req = self
            .http
            .patch(self.url(&format!("/upload/drive/v3/files/{id}")))
            .query(&[("uploadType", "media")])
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .body(content);
        Self::check(self.authed(req)?.send().await?, Some(id)).await?;
        Ok(())
    }

    async fn set_permission(&self, id: &FileId, grant: &PermissionGrant) -> StoreResult<()> {
        let notify = if grant.notify { "true" } else { "false" };
        let req = self
            .http
            .post(self.url(&format!("/drive/v3/files/{id}/permissions")))
            .query(&[("sendNotificationEmail", notify)])
            .json(&json!({
                "type": "user",
                "role": grant.role.as_str(),
                "emailAddress": grant.email,
            }));
        Self::check(self.authed(req)?.send().await?, Some(id)).await?;
        Ok(())
    }

    async fn web_link(&self, id: &FileId) -> StoreResult<Option<String>> {
        let req = self
            .http
            .get(self.url(&format!("/drive/v3/files/{id}")))
            .query(&[("fields", "webViewLink")]);
        let response = Self::check(self.authed(req)?.send().await?, Some(id)).await?;
        let link: WebLink = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        Ok(link.web_view_link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::{GET, PATCH, POST};
    use httpmock::MockServer;

    fn store(server: &MockServer) -> DriveObjectStore {
        DriveObjectStore::new("tok-123")
            .unwrap()
            .with_base_url(server.base_url())
    }

    #[test]
    fn name_query_escapes_quotes() {
        assert_eq!(
            name_query("it's.csv"),
            "name='it\\'s.csv' and trashed=false"
        );
    }

    #[tokio::test]
    async fn list_by_name_sends_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/drive/v3/files")
                    .query_param("q", "name='registrations.csv' and trashed=false")
                    .query_param("spaces", "drive")
                    .header("authorization", "Bearer tok-123");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"files":[{"id":"f1","name":"registrations.csv"},{"id":"f2","name":"registrations.csv"}]}"#);
            })
            .await;

        let ids = store(&server).list_by_name("registrations.csv").await.unwrap();
        mock.assert_async().await;
        assert_eq!(ids, vec![FileId::new("f1"), FileId::new("f2")]);
    }

    #[tokio::test]
    async fn get_media_downloads_bytes() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/drive/v3/files/f1")
                    .query_param("alt", "media");
                then.status(200).body("Stall_No\nA1\n");
            })
            .await;

        let bytes = store(&server).get_media(&FileId::new("f1")).await.unwrap();
        assert_eq!(bytes, Bytes::from_static(b"Stall_No\nA1\n"));
    }

    #[tokio::test]
    async fn missing_file_maps_to_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/drive/v3/files/gone");
                then.status(404).body(r#"{"error":{"code":404}}"#);
            })
            .await;

        let err = store(&server).get_media(&FileId::new("gone")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id.as_str() == "gone"));
    }

    #[tokio::test]
    async fn create_posts_metadata_then_uploads() {
        let server = MockServer::start_async().await;
        let meta = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/drive/v3/files")
                    .body_includes("\"name\":\"registrations.csv\"")
                    .body_includes("\"mimeType\":\"text/csv\"");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"id":"new-1"}"#);
            })
            .await;
        let upload = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/upload/drive/v3/files/new-1")
                    .query_param("uploadType", "media")
                    .header("content-type", "text/csv")
                    .body("Stall_No\nA1\n");
                then.status(200).body("{}");
            })
            .await;

        let id = store(&server)
            .create(
                &FileMetadata::csv("registrations.csv"),
                Bytes::from_static(b"Stall_No\nA1\n"),
            )
            .await
            .unwrap();
        meta.assert_async().await;
        upload.assert_async().await;
        assert_eq!(id, FileId::new("new-1"));
    }

    #[tokio::test]
    async fn permission_body_names_recipient() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/drive/v3/files/f1/permissions")
                    .query_param("sendNotificationEmail", "true")
                    .body_includes("\"emailAddress\":\"admin@example.com\"")
                    .body_includes("\"role\":\"writer\"");
                then.status(200).body(r#"{"id":"perm"}"#);
            })
            .await;

        store(&server)
            .set_permission(&FileId::new("f1"), &PermissionGrant::writer("admin@example.com"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn api_error_keeps_status_and_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/drive/v3/files");
                then.status(403).body("quota exceeded");
            })
            .await;

        let err = store(&server).list_by_name("x.csv").await.unwrap_err();
        match err {
            StoreError::Api { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn web_link_reads_view_link() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/drive/v3/files/f1")
                    .query_param("fields", "webViewLink");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"webViewLink":"https://drive.example/f1"}"#);
            })
            .await;

        let link = store(&server).web_link(&FileId::new("f1")).await.unwrap();
        assert_eq!(link.as_deref(), Some("https://drive.example/f1"));
    }

    #[tokio::test]
    async fn config_token_is_reread_per_request() {
        const VAR: &str = "KIOSK_TEST_DRIVE_TOKEN_ROTATION";
        let server = MockServer::start_async().await;
        let first = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/drive/v3/files/f1")
                    .header("authorization", "Bearer tok-old");
                then.status(200).body("a");
            })
            .await;
        let second = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/drive/v3/files/f1")
                    .header("authorization", "Bearer tok-new");
                then.status(200).body("b");
            })
            .await;

        std::env::set_var(VAR, "tok-old");
        let config = DriveConfig {
            base_url: server.base_url(),
            access_token_env: VAR.into(),
            ..DriveConfig::default()
        };
        let store = DriveObjectStore::from_config(&config).unwrap();
        let id = FileId::new("f1");
        assert_eq!(store.get_media(&id).await.unwrap(), Bytes::from_static(b"a"));

        std::env::set_var(VAR, "tok-new");
        assert_eq!(store.get_media(&id).await.unwrap(), Bytes::from_static(b"b"));
        first.assert_async().await;
        second.assert_async().await;

        std::env::remove_var(VAR);
        let err = store.get_media(&id).await.unwrap_err();
        assert!(matches!(err, StoreError::Config(msg) if msg.contains(VAR)));
    }

    #[tokio::test]
    async fn failed_upload_leaves_created_file() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/drive/v3/files");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"id":"orphan"}"#);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(PATCH).path("/upload/drive/v3/files/orphan");
                then.status(500).body("backend error");
            })
            .await;

        let err = store(&server)
            .create(&FileMetadata::csv("registrations.csv"), Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Api { status: 500, .. }));
    }

    #[test]
    fn from_config_requires_token() {
        let config = DriveConfig {
            access_token_env: "KIOSK_TEST_TOKEN_THAT_IS_NEVER_SET".into(),
            ..DriveConfig::default()
        };
        assert!(matches!(
            DriveObjectStore::from_config(&config),
            Err(StoreError::Config(_))
        ));
    }
}
