use crate::types::ConfigError;
use thiserror::Error;

/// インフラストラクチャ層のエラー型
/// HTTP通信、データベース、シリアライゼーションなど基盤的なエラーを定義
#[derive(Error, Debug)]
pub enum InfraError {
    /// HTTP通信エラー（接続失敗、タイムアウト、2xx以外のステータス）
    #[error("HTTPリクエストエラー: {url} - {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// リモート取得エラー（トランスポート以外の理由による失敗）
    #[error("リモート取得エラー: {message}")]
    Remote { message: String },

    /// データベース接続エラー
    #[error("データベース接続エラー: {source}")]
    DatabaseConnection {
        #[source]
        source: sqlx::Error,
    },

    /// データベースクエリエラー
    #[error("データベースクエリエラー: {operation} - {source}")]
    DatabaseQuery {
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    /// マイグレーションエラー
    #[error("データベースマイグレーションエラー: {source}")]
    Migration {
        #[source]
        source: sqlx::migrate::MigrateError,
    },

    /// シリアライゼーションエラー
    #[error("シリアライゼーションエラー: {context} - {source}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// 設定エラー
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl InfraError {
    /// HTTP通信エラーを作成
    pub fn http<U: Into<String>>(url: U, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    /// リモート取得エラーを作成
    pub fn remote<M: Into<String>>(message: M) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// データベース接続エラーを作成
    pub fn database_connection(source: sqlx::Error) -> Self {
        Self::DatabaseConnection { source }
    }

    /// データベースクエリエラーを作成
    pub fn database_query<O: Into<String>>(operation: O, source: sqlx::Error) -> Self {
        Self::DatabaseQuery {
            operation: operation.into(),
            source,
        }
    }

    /// マイグレーションエラーを作成
    pub fn migration(source: sqlx::migrate::MigrateError) -> Self {
        Self::Migration { source }
    }

    /// シリアライゼーションエラーを作成
    pub fn serialization<C: Into<String>>(context: C, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }
}

/// インフラエラーのResult型エイリアス
pub type InfraResult<T> = std::result::Result<T, InfraError>;
