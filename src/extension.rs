use std::sync::Arc;

use crate::context::{RequestContext, ResponseView};

/// Hook interface for request/response processing.
///
/// An extension sees every request before it is sent and every response
/// body before it is handed back to the caller. Both hooks default to
/// no-ops so an extension only overrides the phase it cares about.
pub trait Extension: Send + Sync {
    /// Unique name used for registration and replacement.
    fn name(&self) -> &str;

    /// Called before the request is sent. May mutate headers, URL or method.
    fn on_configure_request(&self, _ctx: &mut RequestContext) {}

    /// Called with the response body text. Returns the (possibly rewritten)
    /// text that the caller will see.
    fn on_transform_response(&self, text: String, _response: &ResponseView) -> String {
        text
    }
}

/// 登録済み拡張を保持し、リクエスト/レスポンスの各フェーズで呼び出す
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: Vec<Arc<dyn Extension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        ExtensionRegistry {
            extensions: Vec::new(),
        }
    }

    /// Registers an extension. A previously registered extension with the
    /// same name is replaced in place, keeping its dispatch position.
    pub fn register(&mut self, extension: Arc<dyn Extension>) {
        if let Some(existing) = self
            .extensions
            .iter_mut()
            .find(|e| e.name() == extension.name())
        {
            tracing::debug!("Replacing extension: {}", extension.name());
            *existing = extension;
        } else {
            tracing::debug!("Registering extension: {}", extension.name());
            self.extensions.push(extension);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Runs every configure hook against the request, in registration order.
    pub fn configure_request(&self, ctx: &mut RequestContext) {
        for extension in &self.extensions {
            extension.on_configure_request(ctx);
        }
    }

    /// Runs every transform hook over the response text, in registration
    /// order. Each hook receives the previous hook's output.
    pub fn transform_response(&self, text: String, response: &ResponseView) -> String {
        let mut text = text;
        for extension in &self.extensions {
            text = extension.on_transform_response(text, response);
        }
        text
    }
}
