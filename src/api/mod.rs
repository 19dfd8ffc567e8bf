/// インフラ層: HTTP転送
///
/// - `transport`: Upload Controller から見た転送の境界（トレイト）
/// - `client`: reqwest によるmultipart POSTの実装
/// - `error`: インフラ層のエラー
pub mod client;
pub mod error;
pub mod transport;

pub use client::ApiClient;
pub use transport::Transport;
