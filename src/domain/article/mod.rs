pub mod memory;
pub mod model;
pub mod repository;
pub mod service;
pub mod source;

// 公開APIの再エクスポート

// model.rsから
pub use model::{dedup_articles, Article, ArticleEntity, ArticlePage};

// repository.rs / memory.rsから
pub use memory::MemoryArticleCache;
pub use repository::{ArticleCache, SqliteArticleCache};

// source.rs / service.rsから
pub use service::{parse_article_page, NewsdataSource};
pub use source::{MockNewsSource, RemoteNewsSource};
