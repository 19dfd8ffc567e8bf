/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層で
/// 人間向けと機械向けの出力フォーマットを決定する。
use crate::domain::session::UploadOutcome;
use serde::Serialize;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Upload(UploadResult),
    Config(ConfigResult),
    Help,
}

/// アップロードコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    /// 指定されたパス
    pub file_path: String,
    /// 送信先エンドポイント
    pub endpoint: String,
    /// セッション結果（選択がキャンセルされた場合は None）
    pub outcome: Option<UploadOutcome>,
}

/// 設定表示コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ConfigResult {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub allowed_extension: String,
    pub allowed_media_type: String,
    pub max_size_bytes: u64,
    /// ユーザー設定ファイルのパス（取得できない環境では None）
    pub config_path: Option<String>,
}

impl CommandResult {
    /// プロセスの終了コード
    ///
    /// アップロードが失敗で終わった場合のみ非0。通知は既に表示済みなので、
    /// エラーとして再表示せずに終了コードだけを反映する。
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandResult::Upload(UploadResult {
                outcome: Some(outcome),
                ..
            }) => outcome.severity().map_or(0, |s| s.exit_code()),
            _ => 0,
        }
    }
}
