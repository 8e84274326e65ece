use super::model::ArticlePage;
use crate::types::{InfraError, InfraResult};
use async_trait::async_trait;
use std::collections::HashMap;

/// リモートの記事一覧取得元
///
/// `cursor`が`None`なら先頭ページ、`Some`なら前回返された`next_page`をそのまま渡す。
#[async_trait]
pub trait RemoteNewsSource: Send + Sync {
    async fn fetch(&self, cursor: Option<&str>) -> InfraResult<ArticlePage>;
}

/// テスト用のモック取得元
///
/// カーソルごとに定義済みのページを返す。未定義のカーソルはエラーになる。
#[derive(Debug, Default, Clone)]
pub struct MockNewsSource {
    pages: HashMap<Option<String>, ArticlePage>,
    error_message: Option<String>,
}

impl MockNewsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定カーソルに対するページを登録する
    pub fn with_page(mut self, cursor: Option<&str>, page: ArticlePage) -> Self {
        self.pages.insert(cursor.map(str::to_string), page);
        self
    }

    /// 常に失敗するモックを作成（通信不能を再現）
    pub fn new_error(error_message: &str) -> Self {
        Self {
            pages: HashMap::new(),
            error_message: Some(error_message.to_string()),
        }
    }
}

#[async_trait]
impl RemoteNewsSource for MockNewsSource {
    async fn fetch(&self, cursor: Option<&str>) -> InfraResult<ArticlePage> {
        if let Some(ref message) = self.error_message {
            return Err(InfraError::remote(message.clone()));
        }

        self.pages
            .get(&cursor.map(str::to_string))
            .cloned()
            .ok_or_else(|| InfraError::remote(format!("ページが見つかりません: {:?}", cursor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::model::sample_article;

    #[tokio::test]
    async fn test_mock_source_by_cursor() {
        let source = MockNewsSource::new()
            .with_page(None, ArticlePage::new(vec![sample_article("a")], Some("2".into())))
            .with_page(Some("2"), ArticlePage::new(vec![sample_article("b")], None));

        let first = source.fetch(None).await.unwrap();
        assert_eq!(first.article_ids(), vec!["a"]);
        assert_eq!(first.next_page.as_deref(), Some("2"));

        let second = source.fetch(Some("2")).await.unwrap();
        assert_eq!(second.article_ids(), vec!["b"]);
        assert!(second.next_page.is_none());

        assert!(source.fetch(Some("3")).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_source_error() {
        let source = MockNewsSource::new_error("ネットワーク到達不能");
        let err = source.fetch(None).await.unwrap_err();
        assert!(err.to_string().contains("ネットワーク到達不能"));
    }
}
