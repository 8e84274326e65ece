use super::model::Article;
use super::repository::ArticleCache;
use crate::types::InfraResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// プロセス内メモリに保持する記事キャッシュ
///
/// 永続化は行わない。cloneしたインスタンスは同じ内容を共有する。
#[derive(Debug, Default, Clone)]
pub struct MemoryArticleCache {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl MemoryArticleCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn upsert_into(rows: &mut Vec<Article>, articles: &[Article]) {
        for article in articles {
            match rows.iter_mut().find(|row| row.article_id == article.article_id) {
                Some(row) => *row = article.clone(),
                None => rows.push(article.clone()),
            }
        }
    }
}

#[async_trait]
impl ArticleCache for MemoryArticleCache {
    async fn replace_all(&self, articles: &[Article]) -> InfraResult<()> {
        let mut rows = self.articles.write().await;
        rows.clear();
        Self::upsert_into(&mut rows, articles);
        Ok(())
    }

    async fn upsert_all(&self, articles: &[Article]) -> InfraResult<()> {
        let mut rows = self.articles.write().await;
        Self::upsert_into(&mut rows, articles);
        Ok(())
    }

    async fn read_all(&self) -> InfraResult<Vec<Article>> {
        Ok(self.articles.read().await.clone())
    }

    async fn find_by_id(&self, article_id: &str) -> InfraResult<Option<Article>> {
        let rows = self.articles.read().await;
        Ok(rows.iter().find(|row| row.article_id == article_id).cloned())
    }

    async fn clear(&self) -> InfraResult<()> {
        self.articles.write().await.clear();
        Ok(())
    }
}
