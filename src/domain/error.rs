/// ドメイン層のエラー定義
///
/// - `DomainError`: ファイル選択時点での失敗（パスが不正で候補ファイルを作れない）
/// - `FailureReason`: アップロードセッションを終了させた理由。`Display` がそのまま通知文になる
use crate::config::BYTES_PER_KB;
use crate::error_severity::ErrorSeverity;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// ファイルが見つからない
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// ディレクトリが指定された（ファイルが期待される場所）
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },

    /// ファイル名を取得できない
    #[error("cannot determine a file name for '{path}'")]
    EmptyFileName { path: String },
}

impl DomainError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn not_a_file(path: impl Into<String>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    pub fn empty_file_name(path: impl Into<String>) -> Self {
        Self::EmptyFileName { path: path.into() }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::UserError
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::FileNotFound { .. } => {
                Some("Please check the file path and ensure the file exists.")
            }
            Self::NotAFile { .. } => Some("Please specify a file, not a directory."),
            Self::EmptyFileName { .. } => Some("Please specify a path that ends with a file name."),
        }
    }
}

/// セッションが失敗で終わった理由
///
/// 検証での拒否と転送エラーを区別せず、どちらも一度きりの終端状態として扱う。
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// 拡張子・メディアタイプのどちらも許可条件を満たさない
    #[error("Only JSON files are allowed")]
    RejectedType,

    /// サイズ上限を超過
    #[error("File size exceeds maximum allowed size of {}KB", format_kb(.limit_bytes))]
    RejectedSize { limit_bytes: u64 },

    /// ネットワーク・サーバー側の失敗
    #[error("Upload failed: {message}")]
    Transport { message: String },
}

impl FailureReason {
    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RejectedType | Self::RejectedSize { .. } => ErrorSeverity::UserError,
            Self::Transport { .. } => ErrorSeverity::SystemError,
        }
    }
}

/// バイト数をKB表記にする
///
/// 割り切れない場合は小数部を残す（10752 → "10.5"）。
fn format_kb(bytes: &u64) -> String {
    if bytes % BYTES_PER_KB == 0 {
        (bytes / BYTES_PER_KB).to_string()
    } else {
        (*bytes as f64 / BYTES_PER_KB as f64).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages_are_verbatim() {
        assert_eq!(
            FailureReason::RejectedType.to_string(),
            "Only JSON files are allowed"
        );
        assert_eq!(
            FailureReason::RejectedSize { limit_bytes: 10240 }.to_string(),
            "File size exceeds maximum allowed size of 10KB"
        );
        assert_eq!(
            FailureReason::Transport {
                message: "network down".to_string()
            }
            .to_string(),
            "Upload failed: network down"
        );
    }

    #[test]
    fn test_fractional_kb_limit() {
        assert_eq!(
            FailureReason::RejectedSize { limit_bytes: 10752 }.to_string(),
            "File size exceeds maximum allowed size of 10.5KB"
        );
    }

    #[test]
    fn test_severity() {
        assert_eq!(
            FailureReason::RejectedType.severity(),
            ErrorSeverity::UserError
        );
        assert_eq!(
            FailureReason::Transport {
                message: "x".to_string()
            }
            .severity(),
            ErrorSeverity::SystemError
        );
        assert_eq!(
            DomainError::file_not_found("a.json").severity(),
            ErrorSeverity::UserError
        );
    }
}
