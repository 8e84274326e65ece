use super::model::{dedup_articles, Article, ArticlePage};
use super::source::RemoteNewsSource;
use crate::infra::api::http::{HttpClient, ReqwestHttpClient};
use crate::types::{AppConfig, InfraError, InfraResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

// newsdata.io の記事一覧レスポンス（必要なフィールドのみ、未知のフィールドは無視）
#[derive(Debug, Deserialize)]
struct NewsListDto {
    #[serde(rename = "nextPage")]
    next_page: Option<String>,
    results: Option<Vec<ArticleDto>>,
}

#[derive(Debug, Deserialize)]
struct ArticleDto {
    article_id: String,
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source_name: Option<String>,
    image_url: Option<String>,
}

impl From<ArticleDto> for Article {
    fn from(dto: ArticleDto) -> Self {
        Self {
            article_id: dto.article_id,
            title: dto.title.unwrap_or_default(),
            description: dto.description.unwrap_or_default(),
            content: dto.content.unwrap_or_default(),
            pub_date: dto.pub_date.unwrap_or_default(),
            source_name: dto.source_name.unwrap_or_default(),
            image_url: dto.image_url.unwrap_or_default(),
        }
    }
}

/// レスポンスJSONをArticlePageに変換する
///
/// `results`が無い場合は空ページ、同一レスポンス内の重複IDは先頭を残して除外する。
pub fn parse_article_page(json: &str) -> InfraResult<ArticlePage> {
    let dto: NewsListDto = serde_json::from_str(json)
        .map_err(|e| InfraError::serialization("記事一覧レスポンスの解析", e))?;

    let articles: Vec<Article> = dto
        .results
        .unwrap_or_default()
        .into_iter()
        .map(Article::from)
        .collect();

    Ok(ArticlePage::new(dedup_articles(articles), dto.next_page))
}

/// newsdata.io を取得元とするRemoteNewsSource実装
pub struct NewsdataSource<H: HttpClient> {
    client: H,
    base_url: String,
    api_key: String,
    language: String,
    timeout_secs: u64,
}

impl NewsdataSource<ReqwestHttpClient> {
    /// 設定からreqwestベースの取得元を作成
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_client(ReqwestHttpClient::new(), config)
    }
}

impl<H: HttpClient> NewsdataSource<H> {
    /// 指定されたHTTPクライアントで取得元を作成
    ///
    /// テスト時にモッククライアントを注入することで実際の通信を避けられる。
    pub fn with_client(client: H, config: &AppConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

#[async_trait]
impl<H: HttpClient> RemoteNewsSource for NewsdataSource<H> {
    async fn fetch(&self, cursor: Option<&str>) -> InfraResult<ArticlePage> {
        let mut query = vec![
            ("apiKey", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];
        if let Some(page) = cursor {
            query.push(("page", page));
        }

        let body = self
            .client
            .get_text(&self.base_url, &query, self.timeout_secs)
            .await?;
        let page = parse_article_page(&body)?;

        debug!(
            cursor = ?cursor,
            count = page.articles.len(),
            next_page = ?page.next_page,
            "リモート記事一覧を取得"
        );
        Ok(page)
    }
}
