use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// HTTPクライアント設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// リクエスト先のベースURL（省略可、デフォルト: http://localhost:8080）
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// 認証設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// 401応答時に遷移するサインインページのパス（省略可、デフォルト: /signin）
    #[serde(default = "default_signin_path")]
    pub signin_path: String,
}

fn default_signin_path() -> String {
    crate::auth::DEFAULT_SIGNIN_PATH.to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signin_path: default_signin_path(),
        }
    }
}

/// ログ設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// ログレベル（省略可、デフォルト: info）
    #[serde(default = "default_log_level")]
    pub level: String,

    /// ログファイルのパス（省略可、デフォルト: 標準エラー出力のみ）
    #[serde(default)]
    pub file_path: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: None,
        }
    }
}

/// メイン設定構造体
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTPクライアント設定
    #[serde(default)]
    pub client: ClientConfig,

    /// 認証設定
    #[serde(default)]
    pub auth: AuthConfig,

    /// ログ設定
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn base_url(&self) -> &str {
        &self.client.base_url
    }

    pub fn signin_path(&self) -> &str {
        &self.auth.signin_path
    }

    pub fn log_level(&self) -> &str {
        &self.logging.level
    }

    pub fn log_file_path(&self) -> Option<&str> {
        self.logging.file_path.as_deref()
    }
}

/// 設定ファイルのパスを取得
fn config_file_path() -> PathBuf {
    let mut path = dirs::config_dir()
        .unwrap_or_else(|| std::env::current_dir().expect("現在のディレクトリが取得できません"));
    path.push("hx-auth");
    path.push("config.toml");
    path
}

/// 設定ファイルを読み込む
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_file_path())
}

/// 指定されたパスから設定ファイルを読み込む
pub fn load_config_from(config_path: &Path) -> Result<Config, ConfigError> {
    if config_path.exists() {
        let contents = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    } else {
        // ファイルが存在しない場合はデフォルト設定を返す
        Ok(Config::default())
    }
}
