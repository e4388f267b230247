//! Request authentication.
//!
//! The SDK authenticates with the OAuth 2.0 implicit grant: the caller sends the
//! user to the URL returned by
//! [`ImplicitAuth::build_authorization_url`], receives an access token on the
//! redirect URI, and passes it to the client as an [`OAuthToken`]. Implicit
//! grant tokens cannot be refreshed. Once a token expires every authenticated
//! call fails with [`Error::Unauthorized`] until a client is built with a new
//! token.
//!
//! [`OAuthToken`]: crate::models::OAuthToken
//! [`Error::Unauthorized`]: crate::Error::Unauthorized

mod implicit;

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::http::HttpRequest;

pub use implicit::{ImplicitAuth, ImplicitAuthCredentials, ImplicitAuthManager};

/// Registry key of the implicit-grant auth manager.
pub const GLOBAL_AUTH_KEY: &str = "global";

/// Auth managers keyed by name.
pub type AuthManagers = HashMap<String, Arc<dyn AuthManager>>;

/// Decorates outgoing requests with credentials.
#[async_trait]
pub trait AuthManager: Send + Sync {
    /// Add authentication information to the request.
    ///
    /// On error the request is left untouched.
    fn apply(&self, request: &mut HttpRequest) -> Result<()>;

    /// Awaitable form of [`apply`](Self::apply) for the async request pipeline.
    async fn apply_async(&self, request: &mut HttpRequest) -> Result<()> {
        self.apply(request)
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}
