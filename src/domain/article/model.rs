use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

// 記事エンティティ（一覧・詳細表示の共通表現）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub article_id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    /// 配信元が定義する形式の公開日時文字列
    pub pub_date: String,
    pub source_name: String,
    pub image_url: String,
}

// 記事の同一性はIDのみで判定する
impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.article_id == other.article_id
    }
}

impl Eq for Article {}

impl Hash for Article {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.article_id.hash(state);
    }
}

/// 記事一覧の1ページ分
///
/// `next_page`はリモートが返した不透明なカーソルで、次ページ取得時にそのまま渡し返す。
/// `None`は次ページが存在しないことを表す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub next_page: Option<String>,
}

impl ArticlePage {
    pub fn new(articles: Vec<Article>, next_page: Option<String>) -> Self {
        Self {
            articles,
            next_page,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// 記事IDの一覧を順序どおりに返す
    pub fn article_ids(&self) -> Vec<&str> {
        self.articles.iter().map(|a| a.article_id.as_str()).collect()
    }
}

/// 記事IDの重複を取り除く（先に出現したものを残す）
pub fn dedup_articles(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|article| seen.insert(article.article_id.clone()))
        .collect()
}

// キャッシュテーブルの行（Articleの永続化射影、追加フィールドなし）
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ArticleEntity {
    pub article_id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub pub_date: String,
    pub source_name: String,
    pub image_url: String,
}

impl From<ArticleEntity> for Article {
    fn from(entity: ArticleEntity) -> Self {
        Self {
            article_id: entity.article_id,
            title: entity.title,
            description: entity.description,
            content: entity.content,
            pub_date: entity.pub_date,
            source_name: entity.source_name,
            image_url: entity.image_url,
        }
    }
}

impl From<&Article> for ArticleEntity {
    fn from(article: &Article) -> Self {
        Self {
            article_id: article.article_id.clone(),
            title: article.title.clone(),
            description: article.description.clone(),
            content: article.content.clone(),
            pub_date: article.pub_date.clone(),
            source_name: article.source_name.clone(),
            image_url: article.image_url.clone(),
        }
    }
}

/// テスト用の記事を作成する
#[cfg(test)]
pub(crate) fn sample_article(id: &str) -> Article {
    Article {
        article_id: id.to_string(),
        title: format!("{}のタイトル", id),
        description: format!("{}の概要", id),
        content: format!("{}の本文", id),
        pub_date: "2025-08-10 12:30:00".to_string(),
        source_name: "Example News".to_string(),
        image_url: format!("https://example.com/{}.jpg", id),
    }
}
