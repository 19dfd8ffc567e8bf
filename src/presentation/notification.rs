/// プレゼンテーション層: 端末への通知表示
///
/// 人間向け: stderr に記号付きのメッセージと進捗バーを表示
/// 機械向け: stdout に1行1オブジェクトのJSONを出力
use crate::domain::notification::{Notification, NotificationStyle, NotificationSurface};
use crate::presentation::progress::{ProgressEvent, format_progress_line};
use std::io::{self, Write};

/// 端末を通知面として使う実装
#[derive(Debug, Clone)]
pub struct ConsoleSurface {
    machine_output: bool,
    show_progress: bool,
    progress_line_open: bool,
}

impl ConsoleSurface {
    pub fn new(machine_output: bool, show_progress: bool) -> Self {
        Self {
            machine_output,
            show_progress,
            progress_line_open: false,
        }
    }

    /// 進捗バーの行を閉じる
    fn finish_progress_line(&mut self) {
        if self.progress_line_open {
            eprintln!();
            self.progress_line_open = false;
        }
    }
}

/// 人間向けの1行表示
pub fn format_human(notification: &Notification) -> String {
    let symbol = match notification.style {
        NotificationStyle::Success => "✓",
        NotificationStyle::Error => "✗",
    };
    format!("{} {}", symbol, notification.message)
}

impl NotificationSurface for ConsoleSurface {
    fn show(&mut self, notification: &Notification) {
        tracing::debug!(
            style = notification.style.tag(),
            duration_ms = notification.duration_ms,
            "showing notification"
        );

        if self.machine_output {
            let json = serde_json::json!({
                "event": "notification",
                "notification": notification,
            });
            println!("{}", json);
            return;
        }

        self.finish_progress_line();
        eprintln!("{}", format_human(notification));
    }

    fn render_progress(&mut self, file_name: &str, percent: u8) {
        if !self.show_progress {
            return;
        }

        if self.machine_output {
            match serde_json::to_string(&ProgressEvent::new(file_name, percent)) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!(error = %e, "failed to serialize progress event"),
            }
            return;
        }

        eprint!("\r{}", format_progress_line(file_name, percent));
        let _ = io::stderr().flush();
        self.progress_line_open = true;
    }
}
