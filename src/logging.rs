/// ログ出力の初期化
///
/// tracing のイベントを stderr に出力する。stdout は機械可読出力のために空けておく。
/// フィルタの優先順位: RUST_LOG > --verbose > ユーザー設定の log_level > 既定値
///
/// ユーザー設定の読み込み中のログも出せるよう、設定より先に初期化し、
/// 読み込み後に `apply_configured_level` でフィルタを差し替える。
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

const DEFAULT_DIRECTIVE: &str = "fupload=warn";
const VERBOSE_DIRECTIVE: &str = "fupload=debug";

/// 初期化後にフィルタを差し替えるためのハンドル
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// RUST_LOG が無い場合に使うフィルタ指定
fn fallback_directive(verbose: bool, configured: Option<&str>) -> &str {
    if verbose {
        return VERBOSE_DIRECTIVE;
    }
    configured
        .filter(|level| EnvFilter::try_new(level).is_ok())
        .unwrap_or(DEFAULT_DIRECTIVE)
}

fn fmt_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
}

/// CLI用のロガーを初期化する
///
/// RUST_LOG が設定されている場合はそれに固定し、`None` を返す。
/// 既に初期化済みの場合も `None`。
pub fn init_cli_logger(verbose: bool) -> Option<FilterHandle> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer())
            .try_init();
        return None;
    }

    let (filter, handle) = reload::Layer::new(EnvFilter::new(fallback_directive(verbose, None)));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer())
        .try_init()
        .ok()
        .map(|_| handle)
}

/// ユーザー設定の log_level をフィルタに反映する
///
/// --verbose が指定されている場合は何もしない。
pub fn apply_configured_level(handle: &FilterHandle, verbose: bool, configured: Option<&str>) {
    if verbose || configured.is_none() {
        return;
    }

    let directive = fallback_directive(verbose, configured);
    if let Err(e) = handle.reload(EnvFilter::new(directive)) {
        tracing::warn!(error = %e, "failed to apply configured log level");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detached_handle() -> (reload::Layer<EnvFilter, Registry>, FilterHandle) {
        reload::Layer::new(EnvFilter::new(DEFAULT_DIRECTIVE))
    }

    fn current_filter(handle: &FilterHandle) -> String {
        handle.with_current(|filter| filter.to_string()).unwrap()
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(fallback_directive(false, None), "fupload=warn");
    }

    #[test]
    fn test_verbose_wins_over_config() {
        assert_eq!(fallback_directive(true, Some("fupload=info")), "fupload=debug");
    }

    #[test]
    fn test_configured_level() {
        assert_eq!(fallback_directive(false, Some("fupload=info")), "fupload=info");
    }

    #[test]
    fn test_invalid_configured_level_falls_back() {
        assert_eq!(fallback_directive(false, Some("fupload=loud")), "fupload=warn");
    }

    #[test]
    fn test_configured_level_replaces_startup_filter() {
        let (_layer, handle) = detached_handle();
        apply_configured_level(&handle, false, Some("fupload=info"));
        assert_eq!(current_filter(&handle), "fupload=info");
    }

    #[test]
    fn test_verbose_keeps_startup_filter() {
        let (_layer, handle) = detached_handle();
        apply_configured_level(&handle, true, Some("fupload=info"));
        assert_eq!(current_filter(&handle), "fupload=warn");
    }

    #[test]
    fn test_missing_configured_level_keeps_startup_filter() {
        let (_layer, handle) = detached_handle();
        apply_configured_level(&handle, false, None);
        assert_eq!(current_filter(&handle), "fupload=warn");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        let _ = init_cli_logger(false);
        assert!(init_cli_logger(true).is_none());
    }
}
