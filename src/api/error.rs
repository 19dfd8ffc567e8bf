use std::io;
/// インフラ層のエラー定義
///
/// ファイル読み込みやHTTP通信で発生するエラーを構造化して定義。
/// `user_message()` は「Upload failed: 」に続けて表示する人間向けの文言を返す。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    /// ネットワークエラー
    #[error("network error: {message}")]
    Network { message: String },

    /// サーバーが2xx以外を返した
    #[error("API error: {endpoint} - {message}")]
    Api {
        endpoint: String,
        message: String,
        status_code: Option<u16>,
    },

    /// タイムアウトエラー
    #[error("operation timed out: {operation}")]
    Timeout { operation: String },

    /// アップロード対象ファイルの読み込み失敗など
    #[error("I/O error")]
    Io(#[from] io::Error),
}

impl InfraError {
    /// ネットワークエラーを作成
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// APIエラーを作成
    pub fn api(
        endpoint: impl Into<String>,
        message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            message: message.into(),
            status_code,
        }
    }

    /// タイムアウトエラーを作成
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// 通知に載せる失敗理由
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { message } => message.clone(),
            Self::Api {
                endpoint, message, ..
            } => format!("Http failure response for {}: {}", endpoint, message),
            Self::Timeout { operation } => format!("request timed out ({})", operation),
            Self::Io(e) => format!("could not read file: {}", e),
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::SystemError
    }
}
