//! 型定義モジュール
//!
//! アプリケーション全体で使用される共通的な型定義を管理します。
//! - 設定: 環境変数からの読み込みと設定エラー
//! - インフラエラー: HTTP・データベース・シリアライゼーション
//! - 同期エラーと取得結果型

pub mod config;
pub mod error;
pub mod infra;
pub mod result;

// 便利な再エクスポート
pub use config::{database_url_from_env, AppConfig, ConfigError, ConfigResult};
pub use error::{SyncError, NO_DATA_MESSAGE};
pub use infra::{InfraError, InfraResult};
pub use result::NewsResult;
