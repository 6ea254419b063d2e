use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use url::Url;

use crate::context::{RequestContext, ResponseView};
use crate::errors::{AppError, ClientError};
use crate::extension::ExtensionRegistry;

/// ハイパーメディアリクエストであることをサーバに伝えるマーカーヘッダ
/// （`HeaderName::from_static` の要請で小文字。ヘッダ名は大文字小文字を区別しない）
pub const HX_REQUEST: &str = "hx-request";

/// Final result of a request after all transform hooks have run.
#[derive(Debug, Clone)]
pub struct HypermediaResponse {
    pub status: StatusCode,
    pub body: String,
}

/// 拡張フックを通してリクエストを送るHTTPクライアント
///
/// 各リクエストは送信前に登録済み拡張の configure フックを通り、
/// レスポンス本文は transform フックを通ってから呼び出し元へ返る。
pub struct HypermediaClient {
    client: Client,
    base_url: Url,
    registry: ExtensionRegistry,
}

impl HypermediaClient {
    /// 新しいクライアントを作成
    pub fn new(base_url: &str, registry: ExtensionRegistry) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder()
            .user_agent(concat!("hx-auth/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HypermediaClient {
            client,
            base_url,
            registry,
        })
    }

    /// Resolves the path against the base URL and runs the configure hooks.
    /// An absolute URL as `path` replaces the base entirely.
    fn prepare(&self, method: Method, path: &str) -> Result<RequestContext, ClientError> {
        let url = self.base_url.join(path)?;
        let mut ctx = RequestContext::new(method, url);
        ctx.headers.insert(
            HeaderName::from_static(HX_REQUEST),
            HeaderValue::from_static("true"),
        );
        self.registry.configure_request(&mut ctx);
        Ok(ctx)
    }

    /// GETリクエストを送信
    pub async fn get(&self, path: &str) -> Result<HypermediaResponse, AppError> {
        self.request(Method::GET, path).await
    }

    /// リクエストを送信し、変換済みのレスポンス本文を返す
    pub async fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<HypermediaResponse, AppError> {
        let ctx = self.prepare(method, path)?;
        tracing::debug!("Sending {} {}", ctx.method, ctx.url);

        let response = self
            .client
            .request(ctx.method, ctx.url)
            .headers(ctx.headers)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;
        tracing::debug!("Received {} ({} bytes)", status, text.len());

        let view = ResponseView::new(status, headers);
        let body = self.registry.transform_response(text, &view);

        Ok(HypermediaResponse { status, body })
    }
}
