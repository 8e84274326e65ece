//! newsdata.io の記事一覧をローカルキャッシュと同期するライブラリ
//!
//! - `types`: 設定・エラー・取得結果型
//! - `infra`: HTTPクライアントとSQLiteの初期化
//! - `domain`: 記事モデル、リモート取得元、記事キャッシュ
//! - `app`: 同期コーディネーターと画面状態の遷移

pub mod app;
pub mod domain;
pub mod infra;
pub mod types;
