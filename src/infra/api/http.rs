use crate::types::{InfraError, InfraResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// HTTPクライアントの抽象化トレイト
///
/// このトレイトは、実際のHTTP通信とモック実装の両方を
/// 統一的に扱えるようにするためのインターフェースです。
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// 指定されたURLにクエリパラメータ付きでGETし、本文テキストを取得する
    ///
    /// # Arguments
    /// * `url` - 取得対象のURL
    /// * `query` - クエリパラメータ
    /// * `timeout_secs` - タイムアウト時間（秒）
    async fn get_text(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout_secs: u64,
    ) -> InfraResult<String>;
}

/// `reqwest` を使用した本番用のHTTPクライアント実装
///
/// 2xx以外のステータスはエラーとして扱う。
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// 新しいHTTPクライアントを作成
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get_text(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout_secs: u64,
    ) -> InfraResult<String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(Duration::from_secs(timeout_secs))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| InfraError::http(url, e.without_url()))?;

        response.text().await.map_err(|e| InfraError::http(url, e.without_url()))
    }
}

/// テスト用のモックHTTPクライアント
///
/// この実装はテスト時にDIされ、実際のHTTPリクエストを行わずに
/// 定義済みのレスポンスやエラーを返します。
pub struct MockHttpClient {
    /// モック時に返すレスポンス内容
    pub mock_response: String,
    /// モック時に返すステータス（成功/失敗の制御）
    pub should_succeed: bool,
    /// エラー時に返すメッセージ
    pub error_message: Option<String>,
}

impl MockHttpClient {
    /// 成功レスポンスを返すモッククライアントを作成
    pub fn new_success(mock_response: &str) -> Self {
        Self {
            mock_response: mock_response.to_string(),
            should_succeed: true,
            error_message: None,
        }
    }

    /// エラーレスポンスを返すモッククライアントを作成
    pub fn new_error(error_message: &str) -> Self {
        Self {
            mock_response: String::new(),
            should_succeed: false,
            error_message: Some(error_message.to_string()),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get_text(
        &self,
        _url: &str,
        _query: &[(&str, &str)],
        _timeout_secs: u64,
    ) -> InfraResult<String> {
        if self.should_succeed {
            Ok(self.mock_response.clone())
        } else {
            let error_msg = self.error_message.as_deref().unwrap_or("Mock HTTP error");
            Err(InfraError::remote(format!("モックHTTPエラー: {}", error_msg)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_http_client_success() {
        let mock_client = MockHttpClient::new_success(r#"{"status":"success"}"#);

        let result = mock_client
            .get_text("https://example.com/api/1/latest", &[("language", "en")], 30)
            .await;

        assert!(result.is_ok());
        assert!(result.unwrap().contains("success"));
    }

    #[tokio::test]
    async fn test_mock_http_client_error() {
        let mock_client = MockHttpClient::new_error("接続失敗");

        let result = mock_client
            .get_text("https://example.com/api/1/latest", &[], 30)
            .await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("接続失敗"));
    }

    /// 軽量オンラインテスト - 実際のHTTP通信での基本接続確認
    #[cfg(feature = "online")]
    #[tokio::test]
    async fn test_http_online_basic() -> Result<(), anyhow::Error> {
        let client = ReqwestHttpClient::new();
        let result = client
            .get_text("https://httpbin.org/get", &[("language", "en")], 10)
            .await;

        match result {
            Ok(content) => {
                assert!(content.contains("language"), "クエリが送信されていない");
                println!("✅ HTTP軽量オンラインテスト成功: {}文字取得", content.len());
            }
            Err(e) => {
                println!("⚠️ HTTPリクエストが失敗: {}", e);
                println!("ネットワーク接続を確認してください");
                // ネットワーク問題の場合は失敗にしない
                return Ok(());
            }
        }

        Ok(())
    }
}
