//! Routes requests to handlers by `requestType`.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::account::AccountResolver;
use crate::config::ApiConfig;
use crate::crypto::CryptoProvider;
use crate::handler::{ApiRequestHandler, ApiTag};
use crate::handlers::{DecryptFrom, SignTransaction};
use crate::request::ApiRequest;
use crate::response::ApiResponse;

/// Maps request types to their handlers.
///
/// Every call yields an [`ApiResponse`]; unknown or disabled request types
/// and parameter failures become error responses.
pub struct ApiDispatcher {
    handlers: BTreeMap<&'static str, Arc<dyn ApiRequestHandler>>,
    disabled: HashSet<String>,
}

impl ApiDispatcher {
    /// An empty dispatcher honouring the disabled list in `config`.
    pub fn new(config: &ApiConfig) -> Self {
        ApiDispatcher {
            handlers: BTreeMap::new(),
            disabled: config.disabled_apis.clone(),
        }
    }

    /// A dispatcher serving `decryptFrom` and `signTransaction`.
    pub fn with_default_handlers(
        config: &ApiConfig,
        accounts: Arc<dyn AccountResolver>,
        crypto: Arc<dyn CryptoProvider>,
    ) -> Self {
        let mut dispatcher = Self::new(config);
        dispatcher
            .register(Arc::new(DecryptFrom::new(accounts, crypto.clone())))
            .register(Arc::new(SignTransaction::new(crypto)));
        info!(
            handlers = dispatcher.handlers.len(),
            disabled = dispatcher.disabled.len(),
            "API dispatcher ready"
        );
        dispatcher
    }

    /// Add a handler, replacing any with the same request type.
    pub fn register(&mut self, handler: Arc<dyn ApiRequestHandler>) -> &mut Self {
        if self.handlers.insert(handler.request_type(), handler).is_some() {
            warn!("replaced an already registered API handler");
        }
        self
    }

    pub fn handle(&self, req: &ApiRequest) -> ApiResponse {
        let Some(request_type) = req.request_type() else {
            return ApiResponse::incorrect_request();
        };
        if self.disabled.contains(request_type) {
            warn!(request_type, "request for disabled API");
            return ApiResponse::api_disabled();
        }
        let Some(handler) = self.handlers.get(request_type) else {
            debug!(request_type, "unknown request type");
            return ApiResponse::incorrect_request();
        };

        let response = match handler.process_request(req) {
            Ok(response) => response,
            Err(e) => e.into_response(),
        };
        if let Some(code) = response.error_code() {
            debug!(request_type, error_code = code, "API request failed");
        }
        response
    }

    /// Registered request types, sorted.
    pub fn request_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// Registered request types carrying `tag`, sorted.
    pub fn request_types_by_tag(&self, tag: ApiTag) -> Vec<&'static str> {
        self.handlers
            .iter()
            .filter(|(_, h)| h.tags().contains(&tag))
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn handler(&self, request_type: &str) -> Option<&Arc<dyn ApiRequestHandler>> {
        self.handlers.get(request_type)
    }
}
