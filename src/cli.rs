use clap::Parser;
use std::path::PathBuf;

/// hx-auth - Fetch hypermedia fragments with session authentication
#[derive(Parser)]
#[command(name = "hx-auth")]
#[command(
    about = "A hypermedia client that attaches and refreshes session auth tokens",
    long_about = None
)]
pub struct Cli {
    /// URL or path to fetch, resolved against the configured base URL
    #[arg(value_name = "URL")]
    pub url: String,

    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Session token to seed the session store with
    #[arg(short, long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Read the session token from an interactive prompt
    #[arg(long, conflicts_with = "token")]
    pub prompt_token: bool,

    /// Print the stored session token after the request completes
    #[arg(long)]
    pub show_token: bool,
}
