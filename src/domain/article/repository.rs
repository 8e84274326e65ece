use super::model::{Article, ArticleEntity};
use crate::infra::storage::db::setup_memory_database;
use crate::types::{InfraError, InfraResult};
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// 記事IDをキーとする順序付きの記事キャッシュ
///
/// `read_all`は挿入順で返す。既存IDへのupsertは内容を上書きし、位置は変えない。
#[async_trait]
pub trait ArticleCache: Send + Sync {
    /// 全件を削除してから書き込む（1トランザクション）
    async fn replace_all(&self, articles: &[Article]) -> InfraResult<()>;

    /// IDごとに挿入または上書きする
    async fn upsert_all(&self, articles: &[Article]) -> InfraResult<()>;

    async fn read_all(&self) -> InfraResult<Vec<Article>>;

    async fn find_by_id(&self, article_id: &str) -> InfraResult<Option<Article>>;

    async fn clear(&self) -> InfraResult<()>;
}

/// SQLiteによる記事キャッシュ
///
/// プールは共有されるため、cloneしたインスタンスは同じキャッシュを参照する。
#[derive(Debug, Clone)]
pub struct SqliteArticleCache {
    pool: SqlitePool,
}

impl SqliteArticleCache {
    /// マイグレーション済みのプールからキャッシュを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// テスト用のインメモリキャッシュを作成
    pub async fn in_memory() -> InfraResult<Self> {
        let pool = setup_memory_database().await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn begin(&self, operation: &str) -> InfraResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| InfraError::database_query(operation, e))
    }
}

/// トランザクション内で記事をupsertする
async fn upsert_in_tx(
    tx: &mut Transaction<'static, Sqlite>,
    articles: &[Article],
    operation: &str,
) -> InfraResult<()> {
    for article in articles {
        let entity = ArticleEntity::from(article);
        sqlx::query(
            r#"
            INSERT INTO articles
                (article_id, title, description, content, pub_date, source_name, image_url)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (article_id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                content = excluded.content,
                pub_date = excluded.pub_date,
                source_name = excluded.source_name,
                image_url = excluded.image_url
            "#,
        )
        .bind(entity.article_id)
        .bind(entity.title)
        .bind(entity.description)
        .bind(entity.content)
        .bind(entity.pub_date)
        .bind(entity.source_name)
        .bind(entity.image_url)
        .execute(&mut **tx)
        .await
        .map_err(|e| InfraError::database_query(operation, e))?;
    }
    Ok(())
}

#[async_trait]
impl ArticleCache for SqliteArticleCache {
    async fn replace_all(&self, articles: &[Article]) -> InfraResult<()> {
        let operation = "記事キャッシュの置き換え";
        let mut tx = self.begin(operation).await?;

        sqlx::query("DELETE FROM articles")
            .execute(&mut *tx)
            .await
            .map_err(|e| InfraError::database_query(operation, e))?;
        upsert_in_tx(&mut tx, articles, operation).await?;

        tx.commit()
            .await
            .map_err(|e| InfraError::database_query(operation, e))
    }

    async fn upsert_all(&self, articles: &[Article]) -> InfraResult<()> {
        let operation = "記事キャッシュへのupsert";
        let mut tx = self.begin(operation).await?;

        upsert_in_tx(&mut tx, articles, operation).await?;

        tx.commit()
            .await
            .map_err(|e| InfraError::database_query(operation, e))
    }

    async fn read_all(&self) -> InfraResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleEntity>(
            r#"
            SELECT article_id, title, description, content, pub_date, source_name, image_url
            FROM articles
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InfraError::database_query("記事キャッシュの全件取得", e))?;

        Ok(rows.into_iter().map(Article::from).collect())
    }

    async fn find_by_id(&self, article_id: &str) -> InfraResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleEntity>(
            r#"
            SELECT article_id, title, description, content, pub_date, source_name, image_url
            FROM articles
            WHERE article_id = ?
            "#,
        )
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| InfraError::database_query("記事キャッシュのID検索", e))?;

        Ok(row.map(Article::from))
    }

    async fn clear(&self) -> InfraResult<()> {
        sqlx::query("DELETE FROM articles")
            .execute(&self.pool)
            .await
            .map_err(|e| InfraError::database_query("記事キャッシュの削除", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::model::sample_article;

    fn ids(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.article_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_replace_all_discards_previous_rows() -> Result<(), anyhow::Error> {
        let cache = SqliteArticleCache::in_memory().await?;

        cache
            .replace_all(&[sample_article("a"), sample_article("b")])
            .await?;
        cache
            .replace_all(&[sample_article("c"), sample_article("a")])
            .await?;

        let all = cache.read_all().await?;
        assert_eq!(ids(&all), vec!["c", "a"], "置き換え後は新しい内容のみのはず");
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_all_keeps_position_and_overwrites() -> Result<(), anyhow::Error> {
        let cache = SqliteArticleCache::in_memory().await?;
        cache
            .replace_all(&[sample_article("a"), sample_article("b")])
            .await?;

        let mut updated_a = sample_article("a");
        updated_a.title = "更新後".to_string();
        cache
            .upsert_all(&[sample_article("c"), updated_a])
            .await?;

        let all = cache.read_all().await?;
        assert_eq!(ids(&all), vec!["a", "b", "c"]);
        assert_eq!(all[0].title, "更新後", "既存IDは上書きされるべき");

        // 同じページを2回upsertしても行は増えない
        cache.upsert_all(&[sample_article("c")]).await?;
        assert_eq!(cache.read_all().await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_ids_in_one_batch() -> Result<(), anyhow::Error> {
        let cache = SqliteArticleCache::in_memory().await?;
        let mut dup = sample_article("a");
        dup.title = "2件目".to_string();

        cache.replace_all(&[sample_article("a"), dup]).await?;

        let all = cache.read_all().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "2件目");
        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_id_and_clear() -> Result<(), anyhow::Error> {
        let cache = SqliteArticleCache::in_memory().await?;
        cache.upsert_all(&[sample_article("a")]).await?;

        let found = cache.find_by_id("a").await?;
        assert_eq!(found.map(|a| a.content), Some("aの本文".to_string()));
        assert!(cache.find_by_id("missing").await?.is_none());

        cache.clear().await?;
        assert!(cache.read_all().await?.is_empty());
        assert!(cache.find_by_id("a").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_clone_shares_storage() -> Result<(), anyhow::Error> {
        let cache = SqliteArticleCache::in_memory().await?;
        let other = cache.clone();

        cache.upsert_all(&[sample_article("a")]).await?;
        assert_eq!(other.read_all().await?.len(), 1);
        Ok(())
    }
}
