use thiserror::Error;

/// 設定関連のエラー型
/// 環境変数、設定値の検証など設定に関するエラーを定義
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 環境変数が見つからない
    #[error("環境変数が見つかりません: {name}")]
    MissingEnvironmentVariable { name: String },

    /// 設定値が不正
    #[error("設定値が不正です: {reason}")]
    InvalidValue { reason: String },
}

impl ConfigError {
    /// 環境変数不足エラーを作成
    pub fn missing_env_var<N: Into<String>>(name: N) -> Self {
        Self::MissingEnvironmentVariable { name: name.into() }
    }

    /// 不正な設定値エラーを作成
    pub fn invalid_value<R: Into<String>>(reason: R) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

/// 設定エラーのResult型エイリアス
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

pub const DEFAULT_BASE_URL: &str = "https://newsdata.io/api/1/latest";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_DATABASE_URL: &str = "sqlite:article_db.db?mode=rwc";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// アプリケーション設定
///
/// 環境変数から読み込む。`.env`ファイルの読み込みはバイナリ側で行う。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// newsdata.io のAPIキー
    pub api_key: String,
    /// 記事一覧エンドポイント
    pub base_url: String,
    /// 言語フィルター
    pub language: String,
    /// 記事キャッシュのSQLite接続URL
    pub database_url: String,
    /// HTTPタイムアウト（秒）
    pub timeout_secs: u64,
}

impl AppConfig {
    /// プロセスの環境変数から設定を読み込む
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// テストで環境変数を書き換えずに設定を組み立てるために使う。
    /// 空白のみの値は未設定として扱う。
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = get("NEWS_API_KEY").ok_or_else(|| ConfigError::missing_env_var("NEWS_API_KEY"))?;

        let timeout_secs = match get("NEWS_HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::invalid_value(format!(
                        "NEWS_HTTP_TIMEOUT_SECSは正の整数である必要があります: {}",
                        raw
                    )))
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            base_url: get("NEWS_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            language: get("NEWS_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            database_url: database_url_from_lookup(&lookup),
            timeout_secs,
        })
    }
}

/// キャッシュ接続URLだけを環境変数から読み込む
///
/// APIキーを必要としないキャッシュ読み取り専用の処理で使う。
pub fn database_url_from_env() -> String {
    database_url_from_lookup(|name| std::env::var(name).ok())
}

pub fn database_url_from_lookup<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("NEWS_DATABASE_URL")
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}
