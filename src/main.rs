use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use newsdata_sync::{
    app::{find_cached_article, NewsFeed, SyncCoordinator},
    domain::article::{NewsdataSource, SqliteArticleCache},
    infra::storage::db::setup_database,
    types::{database_url_from_env, AppConfig, NewsResult},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "newsdata-sync")]
#[command(about = "newsdata.io の最新記事を取得してローカルにキャッシュする")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 記事一覧を取得して表示する
    List {
        /// 読み込むページ数（先頭ページを含む）
        #[arg(short, long, default_value = "1")]
        pages: usize,
    },
    /// キャッシュ済みの記事を1件表示する
    Show { article_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // 環境変数を読み込み（.envファイルがあれば使用）
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsdata_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();

    match args.command {
        Command::List { pages } => list(pages).await,
        Command::Show { article_id } => show(&article_id).await,
    }
}

/// 先頭ページを取得し、指定ページ数まで続きを読み込んで表示する
async fn list(pages: usize) -> Result<()> {
    let config = AppConfig::from_env().context("設定の読み込みに失敗")?;
    let pool = setup_database(&config.database_url)
        .await
        .context("記事キャッシュの初期化に失敗")?;

    let coordinator = SyncCoordinator::new(
        NewsdataSource::from_config(&config),
        SqliteArticleCache::new(pool),
    );
    let mut feed = NewsFeed::new(coordinator);

    println!("=== 記事一覧の取得を開始 ===");
    feed.load().await;

    for _ in 1..pages {
        if !feed.load_more().await {
            break;
        }
        if feed.state().is_error {
            break;
        }
    }

    let state = feed.state();
    for article in &state.article_list {
        println!(
            "{}  {}  ({})",
            article.article_id, article.title, article.source_name
        );
    }
    println!(
        "{}件表示、次ページ: {}",
        state.article_list.len(),
        state.next_page.as_deref().unwrap_or("なし")
    );

    if state.is_error {
        bail!(
            "記事を読み込めませんでした: {}",
            state.error_message.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

/// キャッシュ済みの記事を表示する（APIキー不要）
async fn show(article_id: &str) -> Result<()> {
    let pool = setup_database(&database_url_from_env())
        .await
        .context("記事キャッシュの初期化に失敗")?;
    let cache = SqliteArticleCache::new(pool);

    let article = match find_cached_article(&cache, article_id).await {
        NewsResult::Success(article) => article,
        NewsResult::Failure(message) => bail!("記事を表示できませんでした: {}", message),
    };

    println!("{}", article.title);
    println!("{} / {}", article.source_name, article.pub_date);
    if !article.image_url.is_empty() {
        println!("{}", article.image_url);
    }
    println!();
    println!("{}", article.description);
    println!();
    println!("{}", article.content);
    Ok(())
}
