/// ドメインサービス: ファイルバリデーション
///
/// 選択された候補ファイルがアップロード条件を満たすかを判定する。
/// 副作用のない純粋関数で、判定順序は「種別 → サイズ」に固定している。
use crate::config::APP_CONFIG;
use serde::Serialize;
use std::path::PathBuf;

/// 候補ファイルの中身への参照
///
/// バリデーションでは中身を読まない。転送開始時に初めて読み出される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// ファイルシステム上のパス
    Path(PathBuf),
    /// メモリ上のバイト列
    Memory(Vec<u8>),
}

/// ユーザーが選択したアップロード候補ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// ファイル名（ディレクトリ部分を含まない）
    pub name: String,
    /// 宣言されたメディアタイプ（空文字列の場合あり）
    pub media_type: String,
    /// サイズ(バイト)
    pub size: u64,
    /// 中身への参照
    pub source: FileSource,
}

impl CandidateFile {
    /// メモリ上のバイト列から候補ファイルを作る
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: content.len() as u64,
            source: FileSource::Memory(content),
        }
    }
}

/// 受け入れ条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub allowed_extension: String,
    pub allowed_media_type: String,
    pub max_size_bytes: u64,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            allowed_extension: APP_CONFIG.upload.allowed_extension.to_string(),
            allowed_media_type: APP_CONFIG.upload.allowed_media_type.to_string(),
            max_size_bytes: APP_CONFIG.upload.max_size_bytes,
        }
    }
}

/// バリデーション結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ValidationResult {
    Accepted,
    RejectedType,
    /// 上限値をそのまま返し、呼び出し側がKB表記のメッセージを組み立てる
    RejectedSize { limit_bytes: u64 },
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// 候補ファイルを検証する
///
/// メディアタイプが一致するか、ファイル名が許可拡張子で終わっていれば種別チェックを通過する。
/// ブラウザ等がメディアタイプを空で渡すことがあるため、拡張子を代替の判定材料にしている。
/// 種別とサイズの両方に違反している場合は `RejectedType` を返す。
pub fn validate(candidate: &CandidateFile, policy: &ValidationPolicy) -> ValidationResult {
    let type_ok = candidate.media_type == policy.allowed_media_type
        || candidate.name.ends_with(&policy.allowed_extension);
    if !type_ok {
        return ValidationResult::RejectedType;
    }

    if candidate.size > policy.max_size_bytes {
        return ValidationResult::RejectedSize {
            limit_bytes: policy.max_size_bytes,
        };
    }

    ValidationResult::Accepted
}
