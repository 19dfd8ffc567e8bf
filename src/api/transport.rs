/// 転送の境界
///
/// Upload Controller はこのトレイトを通してのみHTTP転送を行う。
/// 実装は送信中の進捗を `ProgressSender` に流し、終端結果を戻り値で返す。
/// 戻り値が返った時点で、そのセッションの進捗イベントはすべて送出済みでなければならない。
use crate::api::error::InfraError;
use crate::domain::progress::ProgressSender;
use crate::domain::validator::CandidateFile;
use async_trait::async_trait;

#[async_trait]
pub trait Transport {
    /// 候補ファイルを1回のmultipart POSTで送信する
    async fn send(&self, file: &CandidateFile, progress: ProgressSender)
        -> Result<(), InfraError>;
}
