/// ドメイン層: 転送進捗イベント定義
///
/// トランスポートが送出する進捗イベントと、そこから表示用の割合を求める規則を定義します。
use serde::Serialize;
use tokio::sync::mpsc;

/// 転送中に送出される進捗イベント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransferProgress {
    /// 送信済みバイト数
    pub loaded: u64,
    /// 総バイト数（不明な場合は None）
    pub total: Option<u64>,
}

impl TransferProgress {
    pub fn new(loaded: u64, total: Option<u64>) -> Self {
        Self { loaded, total }
    }

    /// 進捗率(0〜100)を計算する
    ///
    /// `round(100 * loaded / total)` を四捨五入（0.5は切り上げ）で求める。
    /// 総バイト数が不明または0の場合は計算できないため None。
    pub fn percent(&self) -> Option<u8> {
        let total = u128::from(self.total.filter(|&t| t > 0)?);
        let loaded = u128::from(self.loaded);
        let rounded = (200 * loaded + total) / (2 * total);
        Some(rounded.min(100) as u8)
    }
}

/// トランスポートから進捗を受け取るチャネルの送信側
pub type ProgressSender = mpsc::UnboundedSender<TransferProgress>;

/// トランスポートから進捗を受け取るチャネルの受信側
pub type ProgressReceiver = mpsc::UnboundedReceiver<TransferProgress>;

/// 進捗チャネルを作成
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_half() {
        assert_eq!(TransferProgress::new(250, Some(500)).percent(), Some(50));
    }

    #[test]
    fn test_percent_rounds_half_up() {
        // 1/8 = 12.5% → 13
        assert_eq!(TransferProgress::new(1, Some(8)).percent(), Some(13));
        // 1/3 = 33.33% → 33
        assert_eq!(TransferProgress::new(1, Some(3)).percent(), Some(33));
        // 2/3 = 66.67% → 67
        assert_eq!(TransferProgress::new(2, Some(3)).percent(), Some(67));
    }

    #[test]
    fn test_percent_unknown_total() {
        assert_eq!(TransferProgress::new(100, None).percent(), None);
        assert_eq!(TransferProgress::new(100, Some(0)).percent(), None);
    }

    #[test]
    fn test_percent_is_bounded() {
        assert_eq!(TransferProgress::new(0, Some(500)).percent(), Some(0));
        assert_eq!(TransferProgress::new(500, Some(500)).percent(), Some(100));
        assert_eq!(TransferProgress::new(900, Some(500)).percent(), Some(100));
        assert_eq!(
            TransferProgress::new(u64::MAX, Some(u64::MAX)).percent(),
            Some(100)
        );
    }

    #[test]
    fn test_channel_preserves_order() {
        let (tx, mut rx) = progress_channel();
        tx.send(TransferProgress::new(1, Some(3))).unwrap();
        tx.send(TransferProgress::new(2, Some(3))).unwrap();
        drop(tx);

        assert_eq!(rx.try_recv().unwrap().loaded, 1);
        assert_eq!(rx.try_recv().unwrap().loaded, 2);
        assert!(rx.try_recv().is_err());
    }
}
