/// プレゼンテーション層: ファイル選択コントロール
///
/// CLIで指定されたパスを候補ファイルに変換し、選択値を保持します。
/// 値はセッション終了時に必ずクリアされ、同じファイルをすぐに選び直せます。
use crate::domain::error::DomainError;
use crate::domain::validator::{CandidateFile, FileSource};
use std::fs;
use std::path::{Path, PathBuf};

/// 拡張子から推定するメディアタイプ
const KNOWN_MEDIA_TYPES: &[(&str, &str)] = &[
    ("json", "application/json"),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("xml", "application/xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("pdf", "application/pdf"),
];

/// ファイル選択コントロール
#[derive(Debug, Default)]
pub struct FileInput {
    value: Option<PathBuf>,
    declared_media_type: Option<String>,
}

impl FileInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// 推定の代わりに使うメディアタイプを指定（`--type`）
    pub fn with_media_type(mut self, media_type: Option<String>) -> Self {
        self.declared_media_type = media_type;
        self
    }

    /// 現在の選択値
    pub fn value(&self) -> Option<&Path> {
        self.value.as_deref()
    }

    /// パスを選択して候補ファイルを作る
    ///
    /// 空のパスは選択のキャンセルとして扱い、`Ok(None)` を返す。
    /// ファイルの中身はここでは読まない。
    ///
    /// # Errors
    /// - パスが存在しない
    /// - ディレクトリが指定された
    /// - ファイル名を取得できない
    pub fn select(&mut self, path: &str) -> Result<Option<CandidateFile>, DomainError> {
        if path.trim().is_empty() {
            tracing::debug!("file selection cancelled");
            return Ok(None);
        }

        let file_path = Path::new(path);
        let metadata = fs::metadata(file_path).map_err(|_| DomainError::file_not_found(path))?;
        if metadata.is_dir() {
            return Err(DomainError::not_a_file(path));
        }

        let name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DomainError::empty_file_name(path))?
            .to_string();

        let media_type = self
            .declared_media_type
            .clone()
            .unwrap_or_else(|| guess_media_type(&name).to_string());

        self.value = Some(file_path.to_path_buf());

        Ok(Some(CandidateFile {
            name,
            media_type,
            size: metadata.len(),
            source: FileSource::Path(file_path.to_path_buf()),
        }))
    }

    /// 選択値をクリア
    ///
    /// 実際にクリアした場合のみ true を返す。
    pub fn clear(&mut self) -> bool {
        self.value.take().is_some()
    }
}

/// ファイル名の拡張子からメディアタイプを推定する
///
/// 不明な場合は空文字列（ブラウザが種別を判定できなかった場合と同じ扱い）。
pub fn guess_media_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    extension
        .and_then(|ext| {
            KNOWN_MEDIA_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, media_type)| *media_type)
        })
        .unwrap_or("")
}
