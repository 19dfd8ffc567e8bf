/// 設定表示コマンド
///
/// 実際に使われるエンドポイント・タイムアウトと受け入れ条件を表示します。
use crate::commands::result::{CommandResult, ConfigResult};
use crate::config::UserConfig;
use crate::domain::validator::ValidationPolicy;
use anyhow::Result;

/// 設定表示コマンドを実行
pub fn execute(user_config: &UserConfig) -> Result<CommandResult> {
    let policy = ValidationPolicy::default();
    let config_path = UserConfig::config_path()
        .ok()
        .map(|path| path.display().to_string());

    Ok(CommandResult::Config(ConfigResult {
        endpoint: user_config.effective_endpoint().to_string(),
        timeout_seconds: user_config.effective_timeout_seconds(),
        allowed_extension: policy.allowed_extension,
        allowed_media_type: policy.allowed_media_type,
        max_size_bytes: policy.max_size_bytes,
        config_path,
    }))
}
