/// プレゼンテーション層: 進捗表示の整形
///
/// ドメイン層が求めた進捗率を、端末向けのプログレスバーや
/// 機械向けのJSONイベントに変換します。
use serde::Serialize;

/// プログレスバーの幅（文字数）
const BAR_WIDTH: usize = 20;

/// 機械可読出力用の進捗イベント
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent<'a> {
    pub event: &'static str,
    pub file_name: &'a str,
    pub percent: u8,
}

impl<'a> ProgressEvent<'a> {
    pub fn new(file_name: &'a str, percent: u8) -> Self {
        Self {
            event: "progress",
            file_name,
            percent,
        }
    }
}

/// 進捗率をプログレスバーの文字列にする
///
/// 例: `[##########..........]  50%`
pub fn format_progress_bar(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = BAR_WIDTH * usize::from(percent) / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        percent
    )
}

/// 1行分の進捗表示
pub fn format_progress_line(file_name: &str, percent: u8) -> String {
    format!("Uploading {} {}", file_name, format_progress_bar(percent))
}
