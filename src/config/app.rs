/// アプリケーション設定モジュール
///
/// コンパイル時に確定する静的設定を定義します。
/// 実行時に変更できるのはユーザー設定（`UserConfig`）で上書きできる項目のみです。

/// 1KBあたりのバイト数
pub const BYTES_PER_KB: u64 = 1024;

/// アプリケーション全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub notification: NotificationConfig,
}

/// 送信先APIの設定
#[derive(Debug, Clone, Copy)]
pub struct ApiConfig {
    /// アップロード先エンドポイント（ユーザー設定・CLI引数で上書き可能）
    pub endpoint: &'static str,

    /// HTTPリクエストのタイムアウト(秒)
    pub timeout_seconds: u64,
}

/// アップロード対象の受け入れ条件と送信方法
#[derive(Debug, Clone, Copy)]
pub struct UploadConfig {
    /// 許可する拡張子（ドットを含む）
    pub allowed_extension: &'static str,

    /// 許可するメディアタイプ
    pub allowed_media_type: &'static str,

    /// 最大ファイルサイズ(バイト)
    pub max_size_bytes: u64,

    /// multipartフォームのフィールド名
    pub field_name: &'static str,

    /// 送信時に本文を分割するサイズ(バイト)。分割ごとに進捗を通知する
    pub chunk_size: usize,
}

/// 通知表示の設定
#[derive(Debug, Clone, Copy)]
pub struct NotificationConfig {
    /// 通知を閉じるボタンのラベル
    pub dismiss_label: &'static str,

    /// 成功通知の表示時間(ミリ秒)
    pub success_duration_ms: u64,

    /// エラー通知の表示時間(ミリ秒)
    pub error_duration_ms: u64,
}

/// グローバルなアプリケーション設定
pub const APP_CONFIG: AppConfig = AppConfig {
    api: ApiConfig {
        endpoint: "http://localhost:8080/fUpload",
        timeout_seconds: 30,
    },
    upload: UploadConfig {
        allowed_extension: ".json",
        allowed_media_type: "application/json",
        max_size_bytes: 10 * BYTES_PER_KB,
        field_name: "file",
        chunk_size: 1024,
    },
    notification: NotificationConfig {
        dismiss_label: "Close",
        success_duration_ms: 3000,
        error_duration_ms: 5000,
    },
};
