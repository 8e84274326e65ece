use crate::types::{InfraError, InfraResult};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// データベース接続プールを作成
/// 接続URLは設定（NEWS_DATABASE_URL）から渡される
pub async fn create_pool(database_url: &str) -> InfraResult<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(InfraError::database_connection)
}

/// テスト用のインメモリプールを作成
///
/// インメモリDBは接続ごとに別物になるため、接続数は1に固定する。
pub async fn create_memory_pool() -> InfraResult<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .map_err(InfraError::database_connection)
}

/// データベースの初期化（マイグレーション実行）
pub async fn initialize_database(pool: &SqlitePool) -> InfraResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(InfraError::migration)
}

/// プールの作成とデータベース初期化を一括で行う便利関数
pub async fn setup_database(database_url: &str) -> InfraResult<SqlitePool> {
    let pool = create_pool(database_url).await?;
    initialize_database(&pool).await?;
    Ok(pool)
}

/// インメモリ版のsetup_database
pub async fn setup_memory_database() -> InfraResult<SqlitePool> {
    let pool = create_memory_pool().await?;
    initialize_database(&pool).await?;
    Ok(pool)
}
