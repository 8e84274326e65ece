pub mod feed;
pub mod state;
pub mod sync;

pub use feed::NewsFeed;
pub use state::{
    can_paginate, reduce_article, reduce_news, ArticleEvent, ArticleState, NewsEvent, NewsState,
};
pub use sync::{find_cached_article, SyncCoordinator};
