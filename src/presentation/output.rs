/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読）または
/// 機械向け（JSON）形式で出力する責務を担います。
/// CLI使用方法の表示もこのモジュールが担当します。
use crate::commands::result::{CommandResult, ConfigResult, UploadResult};
use crate::config::BYTES_PER_KB;
use anyhow::Result;

/// ヘルプテキスト（単一の情報源）
pub const HELP_TEXT: &str = "fupload
Upload a JSON file to an HTTP endpoint as multipart/form-data

Usage:
  fupload [--machine] [--verbose] <command> [args...]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)
                     Works for notifications, progress, results and errors
  --verbose        - Enable debug logging on stderr (RUST_LOG takes precedence)

Available commands:
  upload <file> [--progress] [--type <mime>] [--endpoint <url>]
                   - Validate and upload a file
                     --progress: Show upload progress
                     --type:     Declared media type (default: inferred from extension)
                     --endpoint: Override the upload endpoint
  config           - Show the effective endpoint, timeout and upload policy
  help             - Display this help message

Upload Policy:
  Only .json files (or files declared as application/json) up to 10KB are accepted.

Exit Codes:
  0  success
  1  file rejected or not found
  2  configuration error
  3  network or server error";

/// コマンド使用方法を表示する
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

/// コマンド結果を適切な形式で出力する
///
/// # Output
/// * `machine_output = false`: 人間向けの詳細メッセージ（stderr）
/// * `machine_output = true`: 機械可読JSON（stdout）
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        println!("{}", machine_readable(result));
    } else {
        output_human_readable(result);
    }

    Ok(())
}

/// 人間向けの詳細メッセージを出力（stderr）
///
/// アップロードの成否は通知として表示済みのため、ここでは補足情報のみを出す。
fn output_human_readable(result: &CommandResult) {
    match result {
        CommandResult::Upload(r) => output_upload_human(r),
        CommandResult::Config(r) => output_config_human(r),
        CommandResult::Help => print_usage(),
    }
}

fn output_upload_human(r: &UploadResult) {
    match &r.outcome {
        None => eprintln!("No file selected."),
        Some(outcome) if outcome.is_success() => {
            eprintln!("---");
            eprintln!("File:     {}", outcome.file_name());
            eprintln!("Endpoint: {}", r.endpoint);
            eprintln!("---");
        }
        Some(_) => {}
    }
}

fn output_config_human(r: &ConfigResult) {
    eprintln!();
    eprintln!("Endpoint:           {}", r.endpoint);
    eprintln!("Timeout:            {}s", r.timeout_seconds);
    eprintln!("Allowed extension:  {}", r.allowed_extension);
    eprintln!("Allowed media type: {}", r.allowed_media_type);
    eprintln!(
        "Max file size:      {} bytes ({} KB)",
        r.max_size_bytes,
        r.max_size_bytes / BYTES_PER_KB
    );
    match &r.config_path {
        Some(path) => eprintln!("Config file:        {}", path),
        None => eprintln!("Config file:        (unavailable)"),
    }
    eprintln!();
}

/// 機械可読JSONを生成
fn machine_readable(result: &CommandResult) -> serde_json::Value {
    match result {
        CommandResult::Upload(r) => {
            serde_json::json!({
                "success": r.outcome.as_ref().is_none_or(|o| o.is_success()),
                "command": "upload",
                "file_path": r.file_path,
                "endpoint": r.endpoint,
                "outcome": r.outcome,
            })
        }
        CommandResult::Config(r) => {
            serde_json::json!({
                "success": true,
                "command": "config",
                "endpoint": r.endpoint,
                "timeout_seconds": r.timeout_seconds,
                "allowed_extension": r.allowed_extension,
                "allowed_media_type": r.allowed_media_type,
                "max_size_bytes": r.max_size_bytes,
                "config_path": r.config_path,
            })
        }
        CommandResult::Help => {
            serde_json::json!({
                "success": true,
                "command": "help"
            })
        }
    }
}

/// エラーを機械可読JSONで出力（stdout）
pub fn output_error_machine(message: &str, exit_code: i32, hint: Option<&str>) {
    let json = serde_json::json!({
        "success": false,
        "error": message,
        "exit_code": exit_code,
        "hint": hint,
    });
    println!("{}", json);
}
