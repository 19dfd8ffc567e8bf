/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\fupload\config.toml
/// macOS:   /Users/<User>/Library/Application Support/fupload/config.toml
/// Linux:   /home/<user>/.config/fupload/config.toml
///
/// 初回起動時にコメントのみのテンプレートを自動的に作成します。
use crate::config::app::APP_CONFIG;
use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// タイムアウトの上限(秒)
const MAX_TIMEOUT_SECONDS: u64 = 3600;

/// ユーザー設定
///
/// すべての項目は任意。未指定の場合は `APP_CONFIG` の値が使われる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// アップロード先エンドポイントの上書き
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// HTTPタイムアウト(秒)の上書き
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// tracingのフィルタ指定（例: "fupload=debug"）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("fupload").join("config.toml"))
    }

    /// ユーザー設定を読み込む
    ///
    /// 設定ファイルが存在しない場合はテンプレートを作成します。
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定したパスからユーザー設定を読み込む
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    /// テンプレート設定ファイルを作成
    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!(
                    "Failed to create default config file: {}",
                    config_path.display()
                ),
                e,
            )
        })?;

        tracing::debug!(path = %config_path.display(), "created default user config");
        Ok(())
    }

    /// テンプレートTOMLを生成
    ///
    /// すべてコメントアウトされているため、読み込み結果は `UserConfig::default()` と一致する。
    fn default_toml_content() -> String {
        format!(
            r#"# fupload - User Configuration

# Upload endpoint (default: {})
# endpoint = "https://example.com/fUpload"

# HTTP timeout in seconds (default: {})
# timeout_seconds = 30

# Log filter, overridden by RUST_LOG
# log_level = "fupload=info"
"#,
            APP_CONFIG.api.endpoint, APP_CONFIG.api.timeout_seconds
        )
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - endpoint: http:// または https:// で始まること
    /// - timeout_seconds: 1〜3600 の範囲
    /// - log_level: 空文字列でないこと
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.endpoint {
            validate_endpoint(endpoint)?;
        }

        if let Some(timeout) = self.timeout_seconds
            && (timeout == 0 || timeout > MAX_TIMEOUT_SECONDS)
        {
            return Err(ConfigError::validation_error(format!(
                "Invalid timeout_seconds '{}'. Must be between 1 and {}",
                timeout, MAX_TIMEOUT_SECONDS
            )));
        }

        if let Some(level) = &self.log_level
            && level.trim().is_empty()
        {
            return Err(ConfigError::validation_error("log_level cannot be empty"));
        }

        Ok(())
    }

    /// 実際に使用するエンドポイント
    pub fn effective_endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(APP_CONFIG.api.endpoint)
    }

    /// 実際に使用するタイムアウト(秒)
    pub fn effective_timeout_seconds(&self) -> u64 {
        self.timeout_seconds
            .unwrap_or(APP_CONFIG.api.timeout_seconds)
    }
}

/// エンドポイントURLの簡易検証
///
/// CLI引数 `--endpoint` の検証にも使用する。
pub fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::validation_error(format!(
            "Invalid endpoint '{}'. It must start with http:// or https://",
            endpoint
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_creates_template_and_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("fupload").join("config.toml");

        let config = UserConfig::load_from(&path).expect("template should load");

        assert!(path.exists(), "template should be written on first load");
        assert_eq!(config, UserConfig::default());
        assert_eq!(config.effective_endpoint(), "http://localhost:8080/fUpload");
        assert_eq!(config.effective_timeout_seconds(), 30);
    }

    #[test]
    fn test_load_overrides() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "endpoint = \"https://uploads.example.com/fUpload\"\ntimeout_seconds = 5\n",
        )
        .unwrap();

        let config = UserConfig::load_from(&path).expect("valid config should load");
        assert_eq!(
            config.effective_endpoint(),
            "https://uploads.example.com/fUpload"
        );
        assert_eq!(config.effective_timeout_seconds(), 5);
    }

    #[test]
    fn test_load_rejects_invalid_endpoint() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "endpoint = \"ftp://example.com\"\n").unwrap();

        let err = UserConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_load_rejects_broken_toml() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "endpoint = ").unwrap();

        let err = UserConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_validate_timeout_range() {
        let mut config = UserConfig::default();
        config.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        config.timeout_seconds = Some(MAX_TIMEOUT_SECONDS + 1);
        assert!(config.validate().is_err());

        config.timeout_seconds = Some(60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_log_level() {
        let config = UserConfig {
            log_level: Some("   ".to_string()),
            ..UserConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
