/// ドメイン層
///
/// アップロードのライフサイクルに関するビジネスルールを定義します。
/// 外部I/Oは行わず、HTTP通信や表示は外側の層に任せます。
pub mod error;
pub mod notification;
pub mod progress;
pub mod session;
pub mod validator;
