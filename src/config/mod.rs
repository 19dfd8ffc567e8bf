/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - コンパイル時定数として定義される静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる任意の上書き設定
///
/// # 使用例
///
/// ```rust,ignore
/// use crate::config::{APP_CONFIG, UserConfig};
///
/// let max_size = APP_CONFIG.upload.max_size_bytes;
///
/// let user_config = UserConfig::load()?;
/// let endpoint = user_config.effective_endpoint();
/// ```
pub mod app;
pub mod error;
pub mod user;

pub use app::{APP_CONFIG, BYTES_PER_KB};
pub use user::UserConfig;
