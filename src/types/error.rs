use crate::types::InfraError;
use thiserror::Error;

/// キャッシュが空でリモート取得も失敗した場合のメッセージ
pub const NO_DATA_MESSAGE: &str = "no data";

/// 同期処理のエラー分類
///
/// 呼び出し元へは`Err`として返さず、`NewsResult::Failure`のメッセージに変換して報告する。
#[derive(Error, Debug)]
pub enum SyncError {
    /// リモート取得の失敗（通信、タイムアウト、デコード）
    #[error("{message}")]
    Remote { message: String },

    /// リモート取得に失敗し、キャッシュも空
    #[error("no data")]
    NoData,

    /// 取得成功後のキャッシュ書き込み・読み出しの失敗
    #[error("キャッシュ操作エラー: {message}")]
    Cache { message: String },
}

impl SyncError {
    /// リモート取得エラーを作成
    pub fn remote(source: &InfraError) -> Self {
        Self::Remote {
            message: source.to_string(),
        }
    }

    /// キャッシュ操作エラーを作成
    pub fn cache(source: &InfraError) -> Self {
        Self::Cache {
            message: source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_message() {
        assert_eq!(SyncError::NoData.to_string(), NO_DATA_MESSAGE);
    }

    #[test]
    fn test_remote_message_passthrough() {
        let err = SyncError::remote(&InfraError::remote("接続がタイムアウトしました"));
        assert!(err.to_string().contains("接続がタイムアウトしました"));
    }
}
