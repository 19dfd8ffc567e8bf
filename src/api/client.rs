/// HTTPクライアント
///
/// アップロード先エンドポイントへのmultipart POSTを担当する。
/// 本文を一定サイズごとに区切ってストリーミングし、区切りごとに進捗を通知する。
use crate::api::error::InfraError;
use crate::api::transport::Transport;
use crate::config::{APP_CONFIG, UserConfig};
use crate::domain::progress::{ProgressSender, TransferProgress};
use crate::domain::validator::{CandidateFile, FileSource};
use async_trait::async_trait;
use futures_util::stream;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response, header};
use std::io;
use std::time::Duration;

/// APIクライアントの結果型
type ApiResult<T> = Result<T, InfraError>;

/// APIクライアント
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    ///
    /// # Arguments
    /// * `endpoint` - アップロード先の完全なURL（例: "http://localhost:8080/fUpload"）
    /// * `timeout` - リクエスト全体のタイムアウト
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InfraError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// ユーザー設定（未指定項目はAPP_CONFIG）からクライアントを作成
    pub fn from_user_config(config: &UserConfig) -> ApiResult<Self> {
        Self::new(
            config.effective_endpoint(),
            Duration::from_secs(config.effective_timeout_seconds()),
        )
    }

    /// 既定のエンドポイントを使うクライアントを作成
    pub fn with_defaults() -> ApiResult<Self> {
        Self::new(
            APP_CONFIG.api.endpoint,
            Duration::from_secs(APP_CONFIG.api.timeout_seconds),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 候補ファイルの中身を取得
    ///
    /// 検証時のサイズと一致しない場合は送信しない（選択後にファイルが変更された）。
    async fn read_content(file: &CandidateFile) -> ApiResult<Vec<u8>> {
        let content = match &file.source {
            FileSource::Memory(bytes) => bytes.clone(),
            FileSource::Path(path) => tokio::fs::read(path).await?,
        };

        let actual = content.len() as u64;
        if actual != file.size {
            tracing::warn!(
                file_name = %file.name,
                validated = file.size,
                actual,
                "file changed after it was selected"
            );
            return Err(InfraError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{} changed after it was selected ({} bytes, expected {})",
                    file.name, actual, file.size
                ),
            )));
        }

        Ok(content)
    }

    /// multipartフォームを構築
    ///
    /// 本文は `chunk_size` ごとに区切られ、HTTPスタックが区切りを取り出すたびに
    /// `{ loaded, total }` を送出する。
    fn build_form(
        file: &CandidateFile,
        content: Vec<u8>,
        progress: ProgressSender,
    ) -> ApiResult<Form> {
        let total = content.len() as u64;
        let chunk_size = APP_CONFIG.upload.chunk_size.max(1);
        let chunks: Vec<Vec<u8>> = content.chunks(chunk_size).map(<[u8]>::to_vec).collect();

        let mut loaded = 0u64;
        let body = stream::iter(chunks.into_iter().map(move |chunk| {
            loaded += chunk.len() as u64;
            // 受信側が閉じていても送信は続ける
            let _ = progress.send(TransferProgress::new(loaded, Some(total)));
            Ok::<_, io::Error>(chunk)
        }));

        let mut part = Part::stream_with_length(Body::wrap_stream(body), total)
            .file_name(file.name.clone());
        if !file.media_type.is_empty() {
            part = part.mime_str(&file.media_type).map_err(|e| {
                InfraError::network(format!("Invalid media type '{}': {}", file.media_type, e))
            })?;
        }

        Ok(Form::new().part(APP_CONFIG.upload.field_name, part))
    }

    /// リクエストを送信し、エラーハンドリングを行う
    async fn send_with_error_handling(
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> ApiResult<Response> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                InfraError::timeout(format!("POST {}", endpoint))
            } else if e.is_connect() {
                InfraError::network(format!("Connection failed to {}: {}", endpoint, e))
            } else {
                InfraError::network(format!("Request failed for POST {}: {}", endpoint, e))
            }
        })
    }

    /// レスポンスをチェックしてエラーを返す
    ///
    /// 2xxであれば成功。本文はJSONを想定するが、内容は使わずログにのみ残す。
    async fn check_response(response: Response, endpoint: &str) -> ApiResult<()> {
        let status = response.status();

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown Status");
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), %body, "upload rejected by server");
            return Err(InfraError::api(
                endpoint,
                format!("{} {}", status.as_u16(), reason),
                Some(status.as_u16()),
            ));
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(json) => tracing::debug!(status = status.as_u16(), %json, "upload accepted"),
            Err(_) if body.is_empty() => {
                tracing::debug!(status = status.as_u16(), "upload accepted with empty body")
            }
            Err(e) => {
                tracing::warn!(status = status.as_u16(), error = %e, "response body is not JSON")
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(&self, file: &CandidateFile, progress: ProgressSender) -> ApiResult<()> {
        let content = Self::read_content(file).await?;
        tracing::info!(
            file_name = %file.name,
            size = content.len(),
            endpoint = %self.endpoint,
            "uploading file"
        );

        let form = Self::build_form(file, content, progress)?;
        let request = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .multipart(form);

        let response = Self::send_with_error_handling(request, &self.endpoint).await?;
        Self::check_response(response, &self.endpoint).await?;

        tracing::info!(file_name = %file.name, "upload finished");
        Ok(())
    }
}
