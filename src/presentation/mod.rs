/// プレゼンテーション層モジュール
///
/// ドメイン層のビジネスロジックと端末表示の橋渡しを行います。
/// プレゼンテーション層はドメイン層に依存しますが、その逆はありません。
///
/// # モジュール
/// - `input`: ファイル選択コントロール
/// - `notification`: 通知面（端末）
/// - `output`: コマンド結果の出力（人間向け・機械向け）
/// - `progress`: 進捗表示の整形
pub mod input;
pub mod notification;
pub mod output;
pub mod progress;
