//! 終了コードを決めるためのエラー深刻度
//!
//! 各レイヤー（domain, api, config）のエラーはここに分類され、
//! main.rs がプロセスの終了コードを決定する際に参照します。
//! このモジュール自体は他のモジュールに依存しません。

use serde::Serialize;
use std::fmt;

/// エラーの深刻度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// ユーザーが別のファイルを選び直せば解決するエラー
    ///
    /// 存在しないパス、JSON以外のファイル、サイズ超過など。
    ///
    /// **Exit Code: 1**
    UserError,

    /// 設定ファイルや引数の設定値に問題がある
    ///
    /// **Exit Code: 2**
    ConfigError,

    /// ネットワーク障害やサーバーエラーなど、ユーザー側で直せない要因
    ///
    /// **Exit Code: 3**
    SystemError,
}

impl ErrorSeverity {
    /// 対応する終了コードを返す
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserError => write!(f, "user error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SystemError => write!(f, "system error"),
        }
    }
}
