use crate::types::SyncError;
use serde::{Deserialize, Serialize};

/// 取得処理の結果
///
/// 失敗は例外として伝播させず、人が読めるメッセージとして保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsResult<T> {
    Success(T),
    Failure(String),
}

impl<T> NewsResult<T> {
    /// 同期エラーから失敗結果を作成
    pub fn failure(error: SyncError) -> Self {
        Self::Failure(error.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// 成功時の値を参照する
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// 失敗時のメッセージを参照する
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }
}

impl<T> From<SyncError> for NewsResult<T> {
    fn from(error: SyncError) -> Self {
        Self::failure(error)
    }
}
