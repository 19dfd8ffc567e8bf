use crate::commands::{self, CommandResult, upload::UploadOptions};
use crate::config::UserConfig;
use anyhow::{Context, Result, bail};

/// 解析済みのCLI引数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    /// 機械可読出力（--machine）
    pub machine_output: bool,
    /// デバッグログ（--verbose）
    pub verbose: bool,
    pub command: Command,
}

/// 実行するコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(UploadOptions),
    Config,
    Help,
}

/// CLI引数を解析する
///
/// グローバルフラグ（--machine, --verbose）は位置を問わず受け付ける。
/// コマンドが無い場合はヘルプを表示する。
pub fn parse_args(args: &[String]) -> Result<Cli> {
    let mut machine_output = false;
    let mut verbose = false;
    let mut rest = Vec::new();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--machine" => machine_output = true,
            "--verbose" => verbose = true,
            _ => rest.push(arg.as_str()),
        }
    }

    let command = match rest.split_first() {
        None => Command::Help,
        Some((&"upload", tail)) => Command::Upload(parse_upload_args(tail)?),
        Some((&"config", _)) => Command::Config,
        Some((&"help", _)) => Command::Help,
        Some((other, _)) => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            other
        ),
    };

    Ok(Cli {
        machine_output,
        verbose,
        command,
    })
}

/// uploadコマンドの引数を解析する
fn parse_upload_args(args: &[&str]) -> Result<UploadOptions> {
    let mut options = UploadOptions::default();
    let mut file_path = None;
    let mut iter = args.iter();

    while let Some(&arg) = iter.next() {
        match arg {
            "--progress" => options.show_progress = true,
            "--type" => {
                let value = iter.next().context("--type requires a media type")?;
                options.media_type = Some(value.to_string());
            }
            "--endpoint" => {
                let value = iter.next().context("--endpoint requires a URL")?;
                options.endpoint = Some(value.to_string());
            }
            flag if flag.starts_with("--") => bail!("Unknown option for upload: '{}'", flag),
            path => {
                if file_path.replace(path.to_string()).is_some() {
                    bail!("Only one file can be uploaded at a time");
                }
            }
        }
    }

    options.file_path = file_path.context("Please specify a file path for upload command")?;
    Ok(options)
}

/// 解析済みコマンドを実行する
pub async fn dispatch(
    command: Command,
    user_config: &UserConfig,
    machine_output: bool,
) -> Result<CommandResult> {
    match command {
        Command::Upload(options) => commands::upload::execute(options, user_config, machine_output)
            .await
            .context("Upload command failed"),
        Command::Config => commands::config::execute(user_config).context("Config command failed"),
        Command::Help => Ok(commands::help::execute()),
    }
}
