/// ドメイン層: ユーザー通知
///
/// セッションの結果をユーザーに伝える通知の値と、それを表示する面（サーフェス）の境界を定義します。
/// 表示方法そのものはプレゼンテーション層の実装に委ねます。
use crate::config::APP_CONFIG;
use crate::domain::session::UploadOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 成功時の通知文
pub const SUCCESS_MESSAGE: &str = "File uploaded successfully";

/// 通知の種別（見た目の区別に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStyle {
    Success,
    Error,
}

impl NotificationStyle {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// ユーザーへの通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub dismiss_label: String,
    /// 自動で閉じるまでの時間(ミリ秒)
    pub duration_ms: u64,
    pub style: NotificationStyle,
    pub issued_at: DateTime<Utc>,
}

impl Notification {
    /// 成功通知（3秒で閉じる）
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(
            message,
            APP_CONFIG.notification.success_duration_ms,
            NotificationStyle::Success,
        )
    }

    /// エラー通知（読む時間を確保するため5秒）
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(
            message,
            APP_CONFIG.notification.error_duration_ms,
            NotificationStyle::Error,
        )
    }

    fn new(message: impl Into<String>, duration_ms: u64, style: NotificationStyle) -> Self {
        Self {
            message: message.into(),
            dismiss_label: APP_CONFIG.notification.dismiss_label.to_string(),
            duration_ms,
            style,
            issued_at: Utc::now(),
        }
    }

    /// セッション結果に対応する通知を作る
    pub fn for_outcome(outcome: &UploadOutcome) -> Self {
        match outcome {
            UploadOutcome::Succeeded { .. } => Self::success(SUCCESS_MESSAGE),
            UploadOutcome::Failed { reason, .. } => Self::error(reason.to_string()),
        }
    }
}

/// 通知の表示先
///
/// 通知と転送中の進捗を受け取る。進捗表示は任意。
pub trait NotificationSurface {
    fn show(&mut self, notification: &Notification);

    fn render_progress(&mut self, _file_name: &str, _percent: u8) {}
}
