pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod errors;
pub mod extension;
pub mod logger;
pub mod navigate;
pub mod session;

pub use auth::{AUTHENTICATION, AuthHeaderExtension, DEFAULT_SIGNIN_PATH, EXTENSION_NAME};
pub use client::{HX_REQUEST, HypermediaClient, HypermediaResponse};
pub use context::{RequestContext, ResponseView};
pub use errors::{AppError, ClientError, ConfigError};
pub use extension::{Extension, ExtensionRegistry};
pub use navigate::{Navigator, PendingNavigator};
pub use session::{MemorySessionStore, SessionStore};
