//! Environments, server aliases and client configuration.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::{AuthManagers, ImplicitAuth, ImplicitAuthCredentials};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfiguration};
use crate::models::{OAuthScope, OAuthToken};

pub const ENVIRONMENT_VAR: &str = "SWAGGER_PETSTORE_ENVIRONMENT";
pub const O_AUTH_CLIENT_ID_VAR: &str = "SWAGGER_PETSTORE_O_AUTH_CLIENT_ID";
pub const O_AUTH_REDIRECT_URI_VAR: &str = "SWAGGER_PETSTORE_O_AUTH_REDIRECT_URI";

/// Available API environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
}

/// Server aliases within an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Server {
    #[default]
    Server1,
    Server2,
    AuthServer,
}

impl Environment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Environment::Production => "production",
        }
    }

    fn server_url(self, server: Server) -> Option<&'static str> {
        match (self, server) {
            (Environment::Production, Server::Server1) => Some("https://petstore.swagger.io/v2"),
            (Environment::Production, Server::Server2) => Some("http://petstore.swagger.io/v2"),
            (Environment::Production, Server::AuthServer) => {
                Some("https://petstore.swagger.io/oauth")
            }
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("production") {
            Ok(Environment::Production)
        } else {
            Err(Error::Configuration(format!("Unknown environment: {s}")))
        }
    }
}

/// Resolves a server alias to its base URI.
pub trait BaseUri: Send + Sync {
    fn base_uri(&self, server: Server) -> Result<String>;
}

impl BaseUri for Environment {
    fn base_uri(&self, server: Server) -> Result<String> {
        self.server_url(server)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::Configuration(format!("No URL for server {server:?} in environment {self}"))
            })
    }
}

/// The view of a client that SDK components consume.
pub trait Configuration: BaseUri {
    /// Current API environment.
    fn environment(&self) -> Environment;

    /// Credentials used with implicit-grant authentication.
    fn implicit_auth(&self) -> &dyn ImplicitAuth;
}

/// Everything needed to build a [`PetstoreClient`](crate::PetstoreClient).
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub environment: Environment,
    pub client_id: String,
    pub redirect_uri: String,
    pub token: Option<OAuthToken>,
    pub scopes: Option<Vec<OAuthScope>>,
    pub http_client_config: HttpClientConfiguration,
    pub http_client: Option<Arc<dyn HttpClient>>,
    pub auth_managers: AuthManagers,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Credentials are only applied when both the client id and the redirect
    /// URI are present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(environment) = lookup(ENVIRONMENT_VAR) {
            config.environment = environment.parse()?;
        }

        match (lookup(O_AUTH_CLIENT_ID_VAR), lookup(O_AUTH_REDIRECT_URI_VAR)) {
            (Some(client_id), Some(redirect_uri)) => {
                config = config.with_implicit_auth(client_id, redirect_uri);
            }
            _ => debug!("Implicit auth credentials not found in environment"),
        }

        Ok(config)
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_implicit_auth(
        mut self,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        self.client_id = client_id.into();
        self.redirect_uri = redirect_uri.into();
        self
    }

    pub fn with_token(mut self, token: Option<OAuthToken>) -> Self {
        self.token = token;
        self
    }

    pub fn with_scopes(mut self, scopes: Option<Vec<OAuthScope>>) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn with_http_client_config(mut self, config: HttpClientConfiguration) -> Self {
        self.http_client_config = config;
        self
    }

    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn with_auth_managers(mut self, auth_managers: AuthManagers) -> Self {
        self.auth_managers = auth_managers;
        self
    }

    /// The credential tuple this configuration describes.
    pub fn credentials(&self) -> ImplicitAuthCredentials {
        ImplicitAuthCredentials::new(&self.client_id, &self.redirect_uri)
            .with_token(self.token.clone())
            .with_scopes(self.scopes.clone())
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(token) = &self.token {
            if token.access_token.is_empty() {
                return Err(Error::InvalidArgument(
                    "OAuth token must carry a non-empty access token".to_string(),
                ));
            }
            if self.client_id.is_empty() || self.redirect_uri.is_empty() {
                return Err(Error::InvalidArgument(
                    "OAuth client id and redirect URI are required when a token is supplied"
                        .to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("environment", &self.environment)
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("has_token", &self.token.is_some())
            .field("scopes", &self.scopes)
            .field("http_client_config", &self.http_client_config)
            .field("auth_managers", &self.auth_managers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_table() {
        let env = Environment::Production;
        assert_eq!(
            env.base_uri(Server::Server1).unwrap(),
            "https://petstore.swagger.io/v2"
        );
        assert_eq!(
            env.base_uri(Server::Server2).unwrap(),
            "http://petstore.swagger.io/v2"
        );
        assert_eq!(
            env.base_uri(Server::AuthServer).unwrap(),
            "https://petstore.swagger.io/oauth"
        );
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "Production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert!(matches!(
            "staging".parse::<Environment>(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_from_lookup_requires_both_credentials() {
        let config = ClientConfig::from_lookup(|name| match name {
            O_AUTH_CLIENT_ID_VAR => Some("abc".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.client_id, "");
        assert_eq!(config.redirect_uri, "");

        let config = ClientConfig::from_lookup(|name| match name {
            ENVIRONMENT_VAR => Some("production".to_string()),
            O_AUTH_CLIENT_ID_VAR => Some("abc".to_string()),
            O_AUTH_REDIRECT_URI_VAR => Some("https://app/cb".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.client_id, "abc");
        assert_eq!(config.redirect_uri, "https://app/cb");
    }

    #[test]
    fn test_from_lookup_rejects_unknown_environment() {
        let result = ClientConfig::from_lookup(|name| match name {
            ENVIRONMENT_VAR => Some("mars".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_empty_access_token() {
        let config = ClientConfig::new()
            .with_implicit_auth("abc", "https://app/cb")
            .with_token(Some(OAuthToken::new("")));
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidArgument(_))
        ));

        let config = ClientConfig::new().with_token(Some(OAuthToken::new("tok")));
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidArgument(_))
        ));
    }
}
