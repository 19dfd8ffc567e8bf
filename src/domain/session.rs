/// ドメイン層: アップロードセッションの状態機械
///
/// 選択 → 検証 → 転送（進捗） → 成功/失敗 → リセット というライフサイクルを、
/// イベントを受け取って状態を遷移させる純粋な型として表現します。
/// 実際の転送や通知は行わず、呼び出し側が実行すべき副作用を `SessionEffect` で返します。
///
/// # 不変条件
/// - アクティブなセッションは常に高々1つ
/// - 1セッション内で進捗率は減少しない
/// - 終端状態（Succeeded / Failed）は `reset` で必ず Idle に戻される
use crate::domain::error::FailureReason;
use crate::domain::progress::TransferProgress;
use crate::domain::validator::ValidationResult;
use crate::error_severity::ErrorSeverity;
use serde::Serialize;

/// セッションの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// 待機中
    Idle,
    /// ファイルが選択され、検証中
    Validating,
    /// 転送中
    Uploading { progress_percent: u8 },
    /// 転送成功（直後にリセットされる）
    Succeeded,
    /// 拒否または転送失敗（直後にリセットされる）
    Failed { reason: FailureReason },
}

/// 状態機械に入力されるイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// ファイルが選択された
    FileSelected { file_name: String },
    /// 検証が完了した
    Validated(ValidationResult),
    /// 転送を開始した
    TransferStarted,
    /// トランスポートからの進捗
    Progress(TransferProgress),
    /// 転送が成功した（2xx応答）
    TransferCompleted,
    /// 転送が失敗した
    TransferFailed { message: String },
}

/// セッションの最終結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UploadOutcome {
    Succeeded {
        file_name: String,
    },
    Failed {
        file_name: String,
        reason: FailureReason,
    },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn file_name(&self) -> &str {
        match self {
            Self::Succeeded { file_name } | Self::Failed { file_name, .. } => file_name,
        }
    }

    /// 失敗時の深刻度（成功時は None）
    pub fn severity(&self) -> Option<ErrorSeverity> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Failed { reason, .. } => Some(reason.severity()),
        }
    }
}

/// イベント処理の結果、呼び出し側が行うべきこと
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// 状態は変わったが、追加の副作用はない
    Transitioned,
    /// 検証を通過した。転送を開始する
    BeginTransfer,
    /// 表示中の進捗率を更新する
    ProgressChanged(u8),
    /// 有効なイベントだが状態は変わらない
    Unchanged,
    /// セッションが終端に達した。通知してリセットする
    Resolved(UploadOutcome),
    /// 現在の状態では受け付けないイベント
    Ignored,
}

/// アップロードセッションの状態
///
/// Upload Controller だけが所有・更新する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession {
    file_name: String,
    state: SessionState,
    accepted: bool,
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadSession {
    /// Idle 状態のセッションを作成
    pub fn new() -> Self {
        Self {
            file_name: String::new(),
            state: SessionState::Idle,
            accepted: false,
        }
    }

    /// 選択中のファイル名（Idle 時は空文字列）
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.state, SessionState::Uploading { .. })
    }

    /// 進捗率。転送中以外は 0
    pub fn progress_percent(&self) -> u8 {
        match self.state {
            SessionState::Uploading { progress_percent } => progress_percent,
            _ => 0,
        }
    }

    /// イベントを適用して状態を遷移させる
    pub fn handle(&mut self, event: SessionEvent) -> SessionEffect {
        match event {
            SessionEvent::FileSelected { file_name } if self.is_idle() => {
                tracing::debug!(%file_name, "file selected");
                self.file_name = file_name;
                self.state = SessionState::Validating;
                SessionEffect::Transitioned
            }
            SessionEvent::Validated(result) if self.state == SessionState::Validating => {
                self.apply_validation(result)
            }
            SessionEvent::TransferStarted
                if self.state == SessionState::Validating && self.accepted =>
            {
                tracing::debug!(file_name = %self.file_name, "transfer started");
                self.state = SessionState::Uploading {
                    progress_percent: 0,
                };
                SessionEffect::Transitioned
            }
            SessionEvent::Progress(progress) if self.is_uploading() => {
                self.apply_progress(progress)
            }
            SessionEvent::TransferCompleted if self.is_uploading() => {
                self.state = SessionState::Succeeded;
                SessionEffect::Resolved(UploadOutcome::Succeeded {
                    file_name: self.file_name.clone(),
                })
            }
            SessionEvent::TransferFailed { message } if self.is_uploading() => {
                self.fail(FailureReason::Transport { message })
            }
            event => {
                tracing::warn!(state = ?self.state, ?event, "ignoring event not valid in current state");
                SessionEffect::Ignored
            }
        }
    }

    fn apply_progress(&mut self, progress: TransferProgress) -> SessionEffect {
        match progress.percent() {
            Some(percent) if percent > self.progress_percent() => {
                self.state = SessionState::Uploading {
                    progress_percent: percent,
                };
                SessionEffect::ProgressChanged(percent)
            }
            _ => SessionEffect::Unchanged,
        }
    }

    fn apply_validation(&mut self, result: ValidationResult) -> SessionEffect {
        tracing::debug!(file_name = %self.file_name, ?result, "validation finished");
        match result {
            ValidationResult::Accepted => {
                self.accepted = true;
                SessionEffect::BeginTransfer
            }
            ValidationResult::RejectedType => self.fail(FailureReason::RejectedType),
            ValidationResult::RejectedSize { limit_bytes } => {
                self.fail(FailureReason::RejectedSize { limit_bytes })
            }
        }
    }

    fn fail(&mut self, reason: FailureReason) -> SessionEffect {
        self.state = SessionState::Failed {
            reason: reason.clone(),
        };
        SessionEffect::Resolved(UploadOutcome::Failed {
            file_name: self.file_name.clone(),
            reason,
        })
    }

    /// Idle に戻す
    ///
    /// 既に Idle でファイル名も空なら何もせず false を返す。
    pub fn reset(&mut self) -> bool {
        if self.is_idle() && self.file_name.is_empty() && !self.accepted {
            return false;
        }
        self.file_name.clear();
        self.state = SessionState::Idle;
        self.accepted = false;
        true
    }
}
