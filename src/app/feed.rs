use super::state::{
    can_paginate, reduce_article, reduce_news, ArticleEvent, ArticleState, NewsEvent, NewsState,
};
use super::sync::SyncCoordinator;
use crate::domain::article::{ArticleCache, RemoteNewsSource};
use tracing::debug;

/// 記事一覧セッション
///
/// コーディネーターの呼び出し前後に状態遷移を適用し、現在の画面状態を保持する。
/// `&mut self`を取るため、同一セッション内の取得は自然に直列化される。
pub struct NewsFeed<R: RemoteNewsSource, C: ArticleCache> {
    coordinator: SyncCoordinator<R, C>,
    state: NewsState,
}

impl<R: RemoteNewsSource, C: ArticleCache> NewsFeed<R, C> {
    pub fn new(coordinator: SyncCoordinator<R, C>) -> Self {
        Self {
            coordinator,
            state: NewsState::default(),
        }
    }

    pub fn state(&self) -> &NewsState {
        &self.state
    }

    fn apply(&mut self, event: NewsEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce_news(state, event);
    }

    /// 初回読み込み
    pub async fn load(&mut self) -> &NewsState {
        self.apply(NewsEvent::LoadStarted);
        let result = self.coordinator.refresh().await;
        self.apply(NewsEvent::Loaded(result));
        &self.state
    }

    /// 次ページ読み込み
    ///
    /// カーソルが無い、またはリクエスト中の場合は何もしない。
    /// 実際にリクエストした場合に`true`を返す。
    pub async fn load_more(&mut self) -> bool {
        if !can_paginate(&self.state) {
            debug!("次ページ無し、またはリクエスト中のためスキップ");
            return false;
        }
        let Some(cursor) = self.state.next_page.clone() else {
            return false;
        };

        self.apply(NewsEvent::PaginateStarted);
        let result = self.coordinator.paginate(&cursor).await;
        self.apply(NewsEvent::Paginated(result));
        true
    }

    /// 記事詳細を読み込む
    pub async fn open_article(&self, article_id: &str) -> ArticleState {
        if article_id.trim().is_empty() {
            return reduce_article(ArticleState::default(), ArticleEvent::InvalidId);
        }

        let state = reduce_article(ArticleState::default(), ArticleEvent::LoadStarted);
        let result = self.coordinator.find_article(article_id).await;
        reduce_article(state, ArticleEvent::Loaded(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::model::sample_article;
    use crate::domain::article::{ArticlePage, MemoryArticleCache, MockNewsSource};

    fn feed_with(source: MockNewsSource) -> NewsFeed<MockNewsSource, MemoryArticleCache> {
        NewsFeed::new(SyncCoordinator::new(source, MemoryArticleCache::new()))
    }

    #[tokio::test]
    async fn test_load_and_load_more_until_last_page() {
        let source = MockNewsSource::new()
            .with_page(None, ArticlePage::new(vec![sample_article("A")], Some("2".into())))
            .with_page(Some("2"), ArticlePage::new(vec![sample_article("B")], None));
        let mut feed = feed_with(source);

        let state = feed.load().await;
        assert_eq!(state.article_list.len(), 1);

        assert!(feed.load_more().await, "カーソルがあればリクエストするはず");
        assert_eq!(feed.state().article_list.len(), 2);
        assert!(feed.state().next_page.is_none());

        assert!(!feed.load_more().await, "最終ページ以降はリクエストしない");
        assert_eq!(feed.state().article_list.len(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_then_no_pagination() {
        let mut feed = feed_with(MockNewsSource::new_error("到達不能"));

        let state = feed.load().await;
        assert!(state.is_error);
        assert_eq!(state.error_message.as_deref(), Some("no data"));
        assert!(!feed.load_more().await);
    }

    #[tokio::test]
    async fn test_load_more_failure_keeps_list() {
        // 2ページ目は未登録なので取得に失敗する
        let source = MockNewsSource::new()
            .with_page(None, ArticlePage::new(vec![sample_article("A")], Some("2".into())));
        let mut feed = feed_with(source);
        feed.load().await;

        assert!(feed.load_more().await);
        assert!(feed.state().is_error);
        assert_eq!(feed.state().article_list.len(), 1);
        assert_eq!(feed.state().next_page.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_open_article() {
        let source = MockNewsSource::new()
            .with_page(None, ArticlePage::new(vec![sample_article("A")], None));
        let mut feed = feed_with(source);
        feed.load().await;

        let state = feed.open_article("A").await;
        assert!(!state.is_error);
        assert_eq!(state.article.map(|a| a.content), Some("Aの本文".to_string()));

        assert!(feed.open_article("missing").await.is_error);
        assert!(feed.open_article("").await.is_error);
    }
}
