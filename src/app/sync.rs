use crate::domain::article::{Article, ArticleCache, ArticlePage, RemoteNewsSource};
use crate::types::{NewsResult, SyncError};
use tracing::{debug, error, warn};

/// リモート取得とローカルキャッシュの同期を調整する
///
/// 呼び出しは直列化されている前提（同時に呼ばれた場合は最後に書き込んだ側が残る）。
/// 失敗は`NewsResult::Failure`として返し、エラーを呼び出し元へ伝播させない。
pub struct SyncCoordinator<R: RemoteNewsSource, C: ArticleCache> {
    remote: R,
    cache: C,
}

impl<R: RemoteNewsSource, C: ArticleCache> SyncCoordinator<R, C> {
    pub fn new(remote: R, cache: C) -> Self {
        Self { remote, cache }
    }

    /// 先頭ページを取得してキャッシュを置き換える
    ///
    /// 1. リモートから先頭ページを取得
    /// 2. 成功時: キャッシュを全置換し、キャッシュを読み直した内容と取得したカーソルを返す
    /// 3. 失敗時: キャッシュが空でなければカーソル無しでキャッシュ内容を返し、空なら"no data"
    pub async fn refresh(&self) -> NewsResult<ArticlePage> {
        match self.remote.fetch(None).await {
            Ok(fetched) => {
                debug!(
                    count = fetched.articles.len(),
                    next_page = ?fetched.next_page,
                    "先頭ページ取得成功、キャッシュを置き換え"
                );

                if let Err(e) = self.cache.replace_all(&fetched.articles).await {
                    error!(error = %e, "キャッシュの置き換えに失敗");
                    return SyncError::cache(&e).into();
                }

                // 返却するのは取得ページではなく、書き込み後のキャッシュ内容
                match self.cache.read_all().await {
                    Ok(cached) => {
                        NewsResult::Success(ArticlePage::new(cached, fetched.next_page))
                    }
                    Err(e) => {
                        error!(error = %e, "置き換え後のキャッシュ読み出しに失敗");
                        SyncError::cache(&e).into()
                    }
                }
            }
            Err(remote_err) => {
                warn!(error = %remote_err, "先頭ページ取得失敗、キャッシュにフォールバック");

                match self.cache.read_all().await {
                    Ok(cached) if !cached.is_empty() => {
                        debug!(count = cached.len(), "キャッシュ内容を返却（カーソル無し）");
                        NewsResult::Success(ArticlePage::new(cached, None))
                    }
                    Ok(_) => SyncError::NoData.into(),
                    Err(e) => {
                        error!(error = %e, "フォールバック時のキャッシュ読み出しに失敗");
                        SyncError::NoData.into()
                    }
                }
            }
        }
    }

    /// 次ページを取得してキャッシュへ追記する
    ///
    /// `cursor`は直前に返された`next_page`。`None`のときは呼び出し側で止める前提。
    /// 成功時は今回取得した分だけを返し、失敗時はキャッシュを変更せず失敗を返す。
    pub async fn paginate(&self, cursor: &str) -> NewsResult<ArticlePage> {
        let fetched = match self.remote.fetch(Some(cursor)).await {
            Ok(page) => page,
            Err(e) => {
                warn!(cursor, error = %e, "次ページ取得失敗");
                return SyncError::remote(&e).into();
            }
        };

        debug!(
            cursor,
            count = fetched.articles.len(),
            next_page = ?fetched.next_page,
            "次ページ取得成功、キャッシュへupsert"
        );

        if let Err(e) = self.cache.upsert_all(&fetched.articles).await {
            error!(error = %e, "次ページのキャッシュ書き込みに失敗");
            return SyncError::cache(&e).into();
        }

        NewsResult::Success(fetched)
    }

    /// キャッシュから記事を1件取得する（詳細表示用、読み取りのみ）
    pub async fn find_article(&self, article_id: &str) -> NewsResult<Article> {
        find_cached_article(&self.cache, article_id).await
    }
}

/// リモート取得元なしでキャッシュから記事を1件取得する
pub async fn find_cached_article<C: ArticleCache>(cache: &C, article_id: &str) -> NewsResult<Article> {
    if article_id.trim().is_empty() {
        return NewsResult::Failure("記事IDが空です".to_string());
    }

    match cache.find_by_id(article_id).await {
        Ok(Some(article)) => NewsResult::Success(article),
        Ok(None) => NewsResult::Failure(format!("記事が見つかりません: {}", article_id)),
        Err(e) => SyncError::cache(&e).into(),
    }
}
