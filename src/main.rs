use anyhow::{Context, Result};
use fupload::api::error::InfraError;
use fupload::cli;
use fupload::config::UserConfig;
use fupload::config::error::ConfigError;
use fupload::domain::error::DomainError;
use fupload::logging;
use fupload::presentation::output;
use std::env;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let machine_output = args.iter().any(|arg| arg == "--machine");

    match run(&args).await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => handle_error(e, machine_output),
    }
}

/// アプリケーションのメイン処理
///
/// 戻り値はプロセスの終了コード。
async fn run(args: &[String]) -> Result<i32> {
    let cli = cli::parse_args(args)?;

    let log_filter = logging::init_cli_logger(cli.verbose);

    let user_config = UserConfig::load().context("Failed to load user configuration")?;
    if let Some(handle) = &log_filter {
        logging::apply_configured_level(handle, cli.verbose, user_config.log_level.as_deref());
    }
    tracing::debug!(command = ?cli.command, "starting");

    let result = cli::dispatch(cli.command, &user_config, cli.machine_output).await?;
    output::output_result(&result, cli.machine_output)?;

    Ok(result.exit_code())
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    if machine_output {
        let message = error
            .chain()
            .map(|cause| cause.to_string())
            .collect::<Vec<_>>()
            .join(": ");
        output::output_error_machine(&message, exit_code, hint.as_deref());
        std::process::exit(exit_code);
    }

    eprintln!("Error: {}", error);

    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }

    std::process::exit(exit_code);
}

/// エラーチェーンから適切な終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return domain_err.severity().exit_code();
        }

        if let Some(infra_err) = cause.downcast_ref::<InfraError>() {
            return infra_err.severity().exit_code();
        }

        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.severity().exit_code();
        }
    }

    // 引数エラーなど
    1
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    for cause in error.chain() {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>()
            && let Some(hint) = domain_err.hint()
        {
            return Some(hint.to_string());
        }

        if let Some(config_err) = cause.downcast_ref::<ConfigError>()
            && let Some(hint) = config_err.hint()
        {
            return Some(hint.to_string());
        }
    }

    None
}
