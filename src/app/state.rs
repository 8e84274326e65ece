//! 画面状態の遷移関数
//!
//! 画面側の状態保持を (直前の状態, イベント) -> 新しい状態 の純粋関数として表す。
//! UIの仕組みに依存しないため、そのままテストできる。

use crate::domain::article::{Article, ArticlePage};
use crate::types::NewsResult;

/// 次ページ取得失敗時にメッセージが空だった場合の既定文言
pub const PAGINATE_ERROR_MESSAGE: &str = "Failed to load more news";
/// 初回取得失敗時にメッセージが空だった場合の既定文言
pub const LOAD_ERROR_MESSAGE: &str = "Can't load news";

/// 記事一覧画面の状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsState {
    /// 表示中の記事
    pub article_list: Vec<Article>,
    /// 次ページのカーソル（無ければ最終ページ）
    pub next_page: Option<String>,
    pub is_loading: bool,
    pub is_error: bool,
    pub error_message: Option<String>,
}

/// 記事一覧画面のイベント
#[derive(Debug, Clone)]
pub enum NewsEvent {
    LoadStarted,
    Loaded(NewsResult<ArticlePage>),
    PaginateStarted,
    Paginated(NewsResult<ArticlePage>),
}

fn message_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// 記事一覧画面の状態遷移
pub fn reduce_news(state: NewsState, event: NewsEvent) -> NewsState {
    match event {
        NewsEvent::LoadStarted => NewsState {
            is_loading: true,
            ..state
        },
        NewsEvent::Loaded(NewsResult::Success(page)) => NewsState {
            article_list: page.articles,
            next_page: page.next_page,
            is_loading: false,
            is_error: false,
            error_message: None,
        },
        NewsEvent::Loaded(NewsResult::Failure(message)) => NewsState {
            is_loading: false,
            is_error: true,
            error_message: Some(message_or(message, LOAD_ERROR_MESSAGE)),
            ..state
        },
        NewsEvent::PaginateStarted => NewsState {
            is_loading: true,
            is_error: false,
            error_message: None,
            ..state
        },
        NewsEvent::Paginated(NewsResult::Success(page)) => {
            let mut article_list = state.article_list;
            article_list.extend(page.articles);
            NewsState {
                article_list,
                next_page: page.next_page,
                is_loading: false,
                is_error: false,
                error_message: None,
            }
        }
        // 読み込み済みの一覧とカーソルは保持する
        NewsEvent::Paginated(NewsResult::Failure(message)) => NewsState {
            is_loading: false,
            is_error: true,
            error_message: Some(message_or(message, PAGINATE_ERROR_MESSAGE)),
            ..state
        },
    }
}

/// 次ページ取得を開始してよいか
///
/// カーソルが存在し、かつリクエスト中でないこと。
pub fn can_paginate(state: &NewsState) -> bool {
    state.next_page.is_some() && !state.is_loading
}

/// 記事詳細画面の状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleState {
    pub article: Option<Article>,
    pub is_loading: bool,
    pub is_error: bool,
}

/// 記事詳細画面のイベント
#[derive(Debug, Clone)]
pub enum ArticleEvent {
    LoadStarted,
    Loaded(NewsResult<Article>),
    /// 空の記事IDが指定された
    InvalidId,
}

/// 記事詳細画面の状態遷移
pub fn reduce_article(state: ArticleState, event: ArticleEvent) -> ArticleState {
    match event {
        ArticleEvent::LoadStarted => ArticleState {
            is_loading: true,
            is_error: false,
            ..state
        },
        ArticleEvent::Loaded(NewsResult::Success(article)) => ArticleState {
            article: Some(article),
            is_loading: false,
            is_error: false,
        },
        ArticleEvent::Loaded(NewsResult::Failure(_)) => ArticleState {
            is_loading: false,
            is_error: true,
            ..state
        },
        ArticleEvent::InvalidId => ArticleState {
            is_error: true,
            ..state
        },
    }
}
