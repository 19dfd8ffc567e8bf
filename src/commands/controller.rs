/// アプリケーション層: Upload Controller
///
/// セッション状態・ファイル選択コントロール・トランスポート・通知面を束ね、
/// 選択イベントと転送イベントを状態遷移と通知に変換します。
///
/// 公開メソッドはエラーを返しません。検証での拒否も転送エラーも
/// 通知とリセットに変換され、結果は `UploadOutcome` として返ります。
use crate::api::transport::Transport;
use crate::domain::notification::{Notification, NotificationSurface};
use crate::domain::progress::{TransferProgress, progress_channel};
use crate::domain::session::{SessionEffect, SessionEvent, UploadOutcome, UploadSession};
use crate::domain::validator::{self, CandidateFile, ValidationPolicy};
use crate::presentation::input::FileInput;

pub struct UploadController<T, S> {
    transport: T,
    surface: S,
    policy: ValidationPolicy,
    session: UploadSession,
    input: FileInput,
}

impl<T, S> UploadController<T, S>
where
    T: Transport,
    S: NotificationSurface,
{
    pub fn new(transport: T, surface: S, policy: ValidationPolicy, input: FileInput) -> Self {
        Self {
            transport,
            surface,
            policy,
            session: UploadSession::new(),
            input,
        }
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    pub fn input(&self) -> &FileInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut FileInput {
        &mut self.input
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// ファイル選択イベントを処理する
    ///
    /// 選択がキャンセルされた場合（`None`）や、セッションが進行中の場合は何もしない。
    pub async fn on_file_selected(
        &mut self,
        selection: Option<CandidateFile>,
    ) -> Option<UploadOutcome> {
        let Some(candidate) = selection else {
            tracing::debug!("no file in selection event");
            return None;
        };

        if candidate.name.is_empty() {
            tracing::warn!("selection ignored: file has no name");
            return None;
        }

        if !self.session.is_idle() {
            tracing::warn!(
                file_name = %candidate.name,
                state = ?self.session.state(),
                "selection ignored while another session is active"
            );
            return None;
        }

        self.session.handle(SessionEvent::FileSelected {
            file_name: candidate.name.clone(),
        });

        let result = validator::validate(&candidate, &self.policy);
        tracing::debug!(
            file_name = %candidate.name,
            size = candidate.size,
            accepted = result.is_accepted(),
            "validated selection"
        );
        match self.session.handle(SessionEvent::Validated(result)) {
            SessionEffect::BeginTransfer => self.upload_file(&candidate).await,
            SessionEffect::Resolved(outcome) => Some(self.finish(outcome)),
            effect => {
                tracing::warn!(?effect, "unexpected effect after validation");
                self.reset_file_input();
                None
            }
        }
    }

    /// 検証済みファイルを1回だけ送信する
    ///
    /// 既に転送中の場合、または検証を通過していないファイルの場合は何もせず `None` を返す。
    pub async fn upload_file(&mut self, candidate: &CandidateFile) -> Option<UploadOutcome> {
        if self.session.is_uploading() {
            tracing::warn!(file_name = %candidate.name, "upload already in progress");
            return None;
        }
        if self.session.file_name() != candidate.name
            || self.session.handle(SessionEvent::TransferStarted) != SessionEffect::Transitioned
        {
            tracing::warn!(file_name = %candidate.name, "file has not been accepted for upload");
            return None;
        }
        self.surface.render_progress(&candidate.name, 0);

        let (progress_tx, mut progress_rx) = progress_channel();
        let result = {
            let transfer = self.transport.send(candidate, progress_tx);
            tokio::pin!(transfer);
            loop {
                tokio::select! {
                    biased;
                    Some(progress) = progress_rx.recv() => {
                        apply_progress(&mut self.session, &mut self.surface, progress);
                    }
                    result = &mut transfer => break result,
                }
            }
        };

        // 終端イベントより前に、残っている進捗をすべて反映する
        while let Ok(progress) = progress_rx.try_recv() {
            apply_progress(&mut self.session, &mut self.surface, progress);
        }

        let event = match result {
            Ok(()) => SessionEvent::TransferCompleted,
            Err(e) => {
                tracing::warn!(error = %e, "transfer failed");
                SessionEvent::TransferFailed {
                    message: e.user_message(),
                }
            }
        };

        match self.session.handle(event) {
            SessionEffect::Resolved(outcome) => Some(self.finish(outcome)),
            effect => {
                tracing::warn!(?effect, "transfer ended without a terminal transition");
                self.reset_file_input();
                None
            }
        }
    }

    /// ファイル名と選択コントロールをクリアして Idle に戻す
    ///
    /// 何かをクリアした場合のみ true。続けて呼んでも副作用はない。
    pub fn reset_file_input(&mut self) -> bool {
        let session_reset = self.session.reset();
        let input_cleared = self.input.clear();
        session_reset || input_cleared
    }

    /// 終端結果を通知し、リセットする
    fn finish(&mut self, outcome: UploadOutcome) -> UploadOutcome {
        match &outcome {
            UploadOutcome::Succeeded { file_name } => {
                tracing::info!(%file_name, "upload session succeeded");
            }
            UploadOutcome::Failed { file_name, reason } => {
                tracing::info!(%file_name, %reason, "upload session failed");
            }
        }

        self.surface.show(&Notification::for_outcome(&outcome));
        self.reset_file_input();
        outcome
    }
}

fn apply_progress<S: NotificationSurface>(
    session: &mut UploadSession,
    surface: &mut S,
    progress: TransferProgress,
) {
    if let SessionEffect::ProgressChanged(percent) = session.handle(SessionEvent::Progress(progress))
    {
        surface.render_progress(session.file_name(), percent);
    }
}
