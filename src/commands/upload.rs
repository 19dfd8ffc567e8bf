use crate::api::ApiClient;
use crate::commands::controller::UploadController;
use crate::commands::result::{CommandResult, UploadResult};
use crate::config::UserConfig;
use crate::config::user::validate_endpoint;
use crate::domain::validator::ValidationPolicy;
use crate::presentation::input::FileInput;
use crate::presentation::notification::ConsoleSurface;
use anyhow::{Context, Result};
use std::time::Duration;

/// uploadコマンドの引数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// アップロード対象のパス（空文字列は選択キャンセル扱い）
    pub file_path: String,
    /// 進捗を表示するか
    pub show_progress: bool,
    /// 宣言するメディアタイプ（未指定なら拡張子から推定）
    pub media_type: Option<String>,
    /// エンドポイントの上書き
    pub endpoint: Option<String>,
}

/// アップロードコマンドを実行する
///
/// # エラー
/// 引数・ファイルパス・HTTPクライアント初期化の問題のみがエラーになる。
/// 検証での拒否や転送失敗は `UploadResult.outcome` に入り、通知済みとなる。
pub async fn execute(
    options: UploadOptions,
    user_config: &UserConfig,
    machine_output: bool,
) -> Result<CommandResult> {
    let client = build_client(&options, user_config).context("Failed to initialize HTTP client")?;
    let endpoint = client.endpoint().to_string();

    let surface = ConsoleSurface::new(machine_output, options.show_progress);
    let input = FileInput::new().with_media_type(options.media_type.clone());
    let mut controller =
        UploadController::new(client, surface, ValidationPolicy::default(), input);

    let selection = controller
        .input_mut()
        .select(&options.file_path)
        .context("File selection failed")?;

    let outcome = controller.on_file_selected(selection).await;

    Ok(CommandResult::Upload(UploadResult {
        file_path: options.file_path,
        endpoint,
        outcome,
    }))
}

/// エンドポイントの優先順位: --endpoint > ユーザー設定 > APP_CONFIG
fn build_client(options: &UploadOptions, user_config: &UserConfig) -> Result<ApiClient> {
    let client = match &options.endpoint {
        Some(endpoint) => {
            validate_endpoint(endpoint)?;
            ApiClient::new(
                endpoint.as_str(),
                Duration::from_secs(user_config.effective_timeout_seconds()),
            )?
        }
        None => ApiClient::from_user_config(user_config)?,
    };
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::APP_CONFIG;
    use crate::config::error::ConfigError;

    #[test]
    fn test_cli_endpoint_overrides_user_config() {
        let options = UploadOptions {
            endpoint: Some("http://127.0.0.1:9999/up".to_string()),
            ..UploadOptions::default()
        };
        let user_config = UserConfig {
            endpoint: Some("https://uploads.example.com/fUpload".to_string()),
            ..UserConfig::default()
        };

        let client = build_client(&options, &user_config).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9999/up");
    }

    #[test]
    fn test_default_endpoint() {
        let client = build_client(&UploadOptions::default(), &UserConfig::default()).unwrap();
        assert_eq!(client.endpoint(), APP_CONFIG.api.endpoint);
    }

    #[test]
    fn test_invalid_cli_endpoint_is_config_error() {
        let options = UploadOptions {
            endpoint: Some("localhost:8080".to_string()),
            ..UploadOptions::default()
        };
        let err = build_client(&options, &UserConfig::default()).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[tokio::test]
    async fn test_cancelled_selection_yields_no_outcome() {
        let options = UploadOptions::default();
        let result = execute(options, &UserConfig::default(), true).await.unwrap();
        match result {
            CommandResult::Upload(r) => assert!(r.outcome.is_none()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let options = UploadOptions {
            file_path: "/nonexistent/data.json".to_string(),
            ..UploadOptions::default()
        };
        let result = execute(options, &UserConfig::default(), true).await;
        assert!(result.is_err());
    }
}
