use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use super::AuthManager;
use crate::api_helper::{append_url_with_query_parameters, clean_url};
use crate::config::{BaseUri, Server};
use crate::error::{Error, Result};
use crate::http::HttpRequest;
use crate::models::{join_scopes, OAuthScope, OAuthToken};

/// Credentials for the implicit grant.
pub trait ImplicitAuth: Send + Sync {
    fn client_id(&self) -> &str;

    fn redirect_uri(&self) -> &str;

    fn token(&self) -> Option<&OAuthToken>;

    fn scopes(&self) -> Option<&[OAuthScope]>;

    /// Whether `credentials` describe the same credential set as this one.
    fn matches(&self, credentials: &ImplicitAuthCredentials) -> bool;

    /// Whether the current token is past its expiry.
    ///
    /// Fails with [`Error::InvalidState`] when there is no token at all.
    fn is_token_expired(&self) -> Result<bool>;

    /// Build the URL that takes the user's consent at the authorization server.
    ///
    /// `additional_parameters` are appended after the standard ones, in order.
    fn build_authorization_url(
        &self,
        state: Option<&str>,
        additional_parameters: &[(&str, &str)],
    ) -> Result<String>;
}

/// Immutable credential tuple: client id, redirect URI, token and scopes.
///
/// Two tuples are equal when every field is equal; scope lists compare
/// element-wise and in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplicitAuthCredentials {
    client_id: String,
    redirect_uri: String,
    token: Option<OAuthToken>,
    scopes: Option<Vec<OAuthScope>>,
}

impl ImplicitAuthCredentials {
    pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            token: None,
            scopes: None,
        }
    }

    pub fn with_token(mut self, token: Option<OAuthToken>) -> Self {
        self.token = token;
        self
    }

    pub fn with_scopes(mut self, scopes: Option<Vec<OAuthScope>>) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn token(&self) -> Option<&OAuthToken> {
        self.token.as_ref()
    }

    pub fn scopes(&self) -> Option<&[OAuthScope]> {
        self.scopes.as_deref()
    }
}

/// Auth manager for the OAuth 2.0 implicit grant.
pub struct ImplicitAuthManager {
    credentials: ImplicitAuthCredentials,
    base_uri: Arc<dyn BaseUri>,
}

impl ImplicitAuthManager {
    pub fn new(credentials: ImplicitAuthCredentials, base_uri: Arc<dyn BaseUri>) -> Self {
        Self {
            credentials,
            base_uri,
        }
    }

    pub fn credentials(&self) -> &ImplicitAuthCredentials {
        &self.credentials
    }

    /// Expiry check against an explicit Unix timestamp.
    pub fn is_token_expired_at(&self, now: i64) -> Result<bool> {
        self.credentials
            .token()
            .map(|token| token.is_expired_at(now))
            .ok_or_else(|| Error::InvalidState("OAuth token is missing.".to_string()))
    }

    fn check_authorization(&self) -> Result<&OAuthToken> {
        let Some(token) = self.credentials.token() else {
            warn!("Rejecting request: no OAuth token configured");
            return Err(Error::Unauthorized(
                "Client is not authorized. An OAuth token is needed to make API calls."
                    .to_string(),
            ));
        };

        if token.is_expired_at(Utc::now().timestamp()) {
            warn!("Rejecting request: OAuth token expired at {:?}", token.expiry);
            return Err(Error::Unauthorized(
                "OAuth token is expired. A valid token is needed to make API calls.".to_string(),
            ));
        }

        Ok(token)
    }
}

impl ImplicitAuth for ImplicitAuthManager {
    fn client_id(&self) -> &str {
        self.credentials.client_id()
    }

    fn redirect_uri(&self) -> &str {
        self.credentials.redirect_uri()
    }

    fn token(&self) -> Option<&OAuthToken> {
        self.credentials.token()
    }

    fn scopes(&self) -> Option<&[OAuthScope]> {
        self.credentials.scopes()
    }

    fn matches(&self, credentials: &ImplicitAuthCredentials) -> bool {
        self.credentials == *credentials
    }

    fn is_token_expired(&self) -> Result<bool> {
        self.is_token_expired_at(Utc::now().timestamp())
    }

    fn build_authorization_url(
        &self,
        state: Option<&str>,
        additional_parameters: &[(&str, &str)],
    ) -> Result<String> {
        let mut url = self.base_uri.base_uri(Server::AuthServer)?;
        url.push_str("/authorize");

        let scope = join_scopes(self.credentials.scopes());
        append_url_with_query_parameters(
            &mut url,
            [
                ("response_type", Some("token")),
                ("client_id", Some(self.credentials.client_id())),
                ("redirect_uri", Some(self.credentials.redirect_uri())),
                ("scope", scope.as_deref()),
                ("state", state),
            ],
        );
        append_url_with_query_parameters(
            &mut url,
            additional_parameters
                .iter()
                .map(|(key, value)| (*key, Some(*value))),
        );

        clean_url(&url)
    }
}

impl AuthManager for ImplicitAuthManager {
    fn apply(&self, request: &mut HttpRequest) -> Result<()> {
        let token = self.check_authorization()?;
        request
            .headers
            .retain(|name, _| !name.eq_ignore_ascii_case("authorization"));
        request.headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", token.access_token),
        );
        debug!("Applied bearer token to {} {}", request.method, request.url);
        Ok(())
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl fmt::Debug for ImplicitAuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplicitAuthManager")
            .field("client_id", &self.credentials.client_id())
            .field("redirect_uri", &self.credentials.redirect_uri())
            .field("has_token", &self.credentials.token().is_some())
            .field("scopes", &self.credentials.scopes())
            .finish()
    }
}
