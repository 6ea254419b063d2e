use std::sync::Arc;

use clap::Parser;
use hx_auth::auth::{AUTHENTICATION, AuthHeaderExtension};
use hx_auth::cli::Cli;
use hx_auth::client::HypermediaClient;
use hx_auth::config::{load_config, load_config_from};
use hx_auth::extension::ExtensionRegistry;
use hx_auth::logger::setup_logging;
use hx_auth::navigate::PendingNavigator;
use hx_auth::session::{MemorySessionStore, SessionStore};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load config first to get log level
    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}", e);
        std::process::exit(1);
    });

    // Keep the guard alive to ensure log messages are flushed
    let _guard = setup_logging(&config);

    tracing::info!("hx-auth starting");

    // セッションストア、ナビゲータ、認証拡張を初期化
    let store = Arc::new(MemorySessionStore::new());
    if let Some(token) = &cli.token {
        store.set(AUTHENTICATION, token);
    } else if cli.prompt_token {
        let token = rpassword::prompt_password("Session token: ").unwrap_or_else(|e| {
            eprintln!("Failed to read token: {}", e);
            std::process::exit(1);
        });
        if !token.is_empty() {
            store.set(AUTHENTICATION, &token);
        }
    }

    let navigator = Arc::new(PendingNavigator::new());

    let mut registry = ExtensionRegistry::new();
    registry.register(Arc::new(AuthHeaderExtension::with_signin_path(
        store.clone(),
        navigator.clone(),
        config.signin_path(),
    )));

    let client = HypermediaClient::new(config.base_url(), registry).unwrap_or_else(|e| {
        eprintln!("Invalid base URL: {}", e);
        std::process::exit(1);
    });

    let response = client.get(&cli.url).await.unwrap_or_else(|e| {
        eprintln!("Request failed: {}", e);
        std::process::exit(1);
    });

    if !response.status.is_success() {
        tracing::warn!("Server returned {}", response.status);
    }

    println!("{}", response.body);

    if cli.show_token {
        match store.get(AUTHENTICATION) {
            Some(token) => eprintln!("Session token: {}", token),
            None => eprintln!("Session token: (none)"),
        }
    }

    // 401 を受けた場合はここでサインイン誘導して終了する
    if let Some(location) = navigator.take_requested() {
        eprintln!("Sign-in required: please authenticate at {}", location);
        std::process::exit(1);
    }
}
