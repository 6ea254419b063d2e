use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{HeaderName, HeaderValue};

use crate::context::{RequestContext, ResponseView};
use crate::extension::Extension;
use crate::navigate::Navigator;
use crate::session::SessionStore;

/// セッションストレージのキーと HTTP ヘッダ名（同名で共用する）
pub const AUTHENTICATION: &str = "Authentication";

/// 拡張の登録名
pub const EXTENSION_NAME: &str = "authentication-header";

/// 認証切れ時の遷移先デフォルト
pub const DEFAULT_SIGNIN_PATH: &str = "/signin";

/// 認証トークンをリクエストへ添付し、レスポンスから回収する拡張
///
/// リクエスト送信前にセッションストレージの `Authentication` キーを読み、
/// 値があれば同名ヘッダとして添付する。レスポンスが 401 の場合はサインイン
/// ページへの遷移を要求し、それ以外で `Authentication` ヘッダが返って
/// いればストレージへ保存する。レスポンス本文には一切手を加えない。
pub struct AuthHeaderExtension {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    signin_path: String,
}

impl AuthHeaderExtension {
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_signin_path(store, navigator, DEFAULT_SIGNIN_PATH)
    }

    /// サインインページのパスを指定して作成する
    pub fn with_signin_path(
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        signin_path: impl Into<String>,
    ) -> Self {
        AuthHeaderExtension {
            store,
            navigator,
            signin_path: signin_path.into(),
        }
    }
}

impl Extension for AuthHeaderExtension {
    fn name(&self) -> &str {
        EXTENSION_NAME
    }

    fn on_configure_request(&self, ctx: &mut RequestContext) {
        let Some(token) = self.store.get(AUTHENTICATION) else {
            tracing::debug!("No session token, sending request without auth header");
            return;
        };

        match HeaderValue::from_str(&token) {
            Ok(value) => {
                ctx.headers
                    .insert(HeaderName::from_static("authentication"), value);
                tracing::debug!("Attached auth header to {}", ctx.url);
            }
            Err(_) => {
                // 制御文字などヘッダに載らない値は添付しない
                tracing::warn!("Stored session token is not a valid header value, skipping");
            }
        }
    }

    fn on_transform_response(&self, text: String, response: &ResponseView) -> String {
        if response.status == StatusCode::UNAUTHORIZED {
            tracing::info!("Received 401, requesting navigation to {}", self.signin_path);
            self.navigator.navigate_to(&self.signin_path);
            return text;
        }

        if let Some(token) = response.header(AUTHENTICATION) {
            tracing::debug!("Persisting refreshed session token");
            self.store.set(AUTHENTICATION, token);
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigate::PendingNavigator;
    use crate::session::MemorySessionStore;
    use reqwest::Method;
    use reqwest::header::HeaderMap;
    use url::Url;

    fn extension() -> (
        AuthHeaderExtension,
        Arc<MemorySessionStore>,
        Arc<PendingNavigator>,
    ) {
        let store = Arc::new(MemorySessionStore::new());
        let navigator = Arc::new(PendingNavigator::new());
        let ext = AuthHeaderExtension::new(store.clone(), navigator.clone());
        (ext, store, navigator)
    }

    fn request_context() -> RequestContext {
        let url = Url::parse("http://localhost:8080/streams/abc").unwrap();
        RequestContext::new(Method::GET, url)
    }

    fn response(status: StatusCode, token: Option<&str>) -> ResponseView {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                HeaderName::from_static("authentication"),
                HeaderValue::from_str(token).unwrap(),
            );
        }
        ResponseView::new(status, headers)
    }

    #[test]
    fn test_attaches_stored_token_on_request() {
        let (ext, store, _) = extension();
        store.set(AUTHENTICATION, "abc123");

        let mut ctx = request_context();
        ext.on_configure_request(&mut ctx);

        assert_eq!(ctx.headers.get("Authentication").unwrap(), "abc123");
    }

    #[test]
    fn test_no_token_leaves_request_untouched() {
        let (ext, _, _) = extension();

        let mut ctx = request_context();
        ext.on_configure_request(&mut ctx);

        assert!(ctx.headers.get("Authentication").is_none());
    }

    #[test]
    fn test_token_with_control_characters_is_not_attached() {
        let (ext, store, _) = extension();
        store.set(AUTHENTICATION, "bad\ntoken");

        let mut ctx = request_context();
        ext.on_configure_request(&mut ctx);

        assert!(ctx.headers.get("Authentication").is_none());
    }

    #[test]
    fn test_unauthorized_requests_signin_navigation() {
        let (ext, _, navigator) = extension();

        let out = ext.on_transform_response(
            "denied".to_string(),
            &response(StatusCode::UNAUTHORIZED, None),
        );

        assert_eq!(out, "denied");
        assert_eq!(navigator.requested(), Some("/signin".to_string()));
    }

    #[test]
    fn test_unauthorized_does_not_persist_token() {
        // 401 はナビゲーションで打ち切り、同梱のヘッダは保存しない
        let (ext, store, navigator) = extension();

        ext.on_transform_response(
            String::new(),
            &response(StatusCode::UNAUTHORIZED, Some("stale")),
        );

        assert_eq!(store.get(AUTHENTICATION), None);
        assert!(navigator.requested().is_some());
    }

    #[test]
    fn test_custom_signin_path() {
        let store = Arc::new(MemorySessionStore::new());
        let navigator = Arc::new(PendingNavigator::new());
        let ext =
            AuthHeaderExtension::with_signin_path(store, navigator.clone(), "/account/login");

        ext.on_transform_response(String::new(), &response(StatusCode::UNAUTHORIZED, None));

        assert_eq!(navigator.requested(), Some("/account/login".to_string()));
    }

    #[test]
    fn test_persists_token_from_response_header() {
        let (ext, store, navigator) = extension();

        let out = ext.on_transform_response(
            "<div>ok</div>".to_string(),
            &response(StatusCode::OK, Some("xyz789")),
        );

        assert_eq!(out, "<div>ok</div>");
        assert_eq!(store.get(AUTHENTICATION), Some("xyz789".to_string()));
        assert_eq!(navigator.requested(), None);
    }

    #[test]
    fn test_response_token_overwrites_previous() {
        let (ext, store, _) = extension();
        store.set(AUTHENTICATION, "old");

        ext.on_transform_response(String::new(), &response(StatusCode::OK, Some("new")));

        assert_eq!(store.get(AUTHENTICATION), Some("new".to_string()));
    }

    #[test]
    fn test_transform_twice_stores_same_token_as_once() {
        let (ext, store, _) = extension();

        ext.on_transform_response(String::new(), &response(StatusCode::OK, Some("same")));
        ext.on_transform_response(String::new(), &response(StatusCode::OK, Some("same")));

        assert_eq!(store.get(AUTHENTICATION), Some("same".to_string()));
    }

    #[test]
    fn test_response_without_token_leaves_store_unchanged() {
        let (ext, store, navigator) = extension();
        store.set(AUTHENTICATION, "keep");

        let out = ext.on_transform_response("body".to_string(), &response(StatusCode::OK, None));

        assert_eq!(out, "body");
        assert_eq!(store.get(AUTHENTICATION), Some("keep".to_string()));
        assert_eq!(navigator.requested(), None);
    }

    #[test]
    fn test_text_is_never_modified() {
        let (ext, _, _) = extension();
        let html = "<ul><li>item</li></ul>".to_string();

        let out = ext.on_transform_response(html.clone(), &response(StatusCode::OK, Some("t")));
        assert_eq!(out, html);

        let out = ext.on_transform_response(html.clone(), &response(StatusCode::NOT_FOUND, None));
        assert_eq!(out, html);
    }

    #[test]
    fn test_round_trip_persist_then_attach() {
        // レスポンスで受け取ったトークンが次のリクエストに載ること
        let (ext, _, _) = extension();

        ext.on_transform_response(String::new(), &response(StatusCode::OK, Some("fresh")));

        let mut ctx = request_context();
        ext.on_configure_request(&mut ctx);

        assert_eq!(ctx.headers.get("Authentication").unwrap(), "fresh");
    }

    #[test]
    fn test_extension_name() {
        let (ext, _, _) = extension();
        assert_eq!(ext.name(), "authentication-header");
    }
}
