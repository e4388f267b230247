use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use crate::auth::{AuthManagers, ImplicitAuth, ImplicitAuthManager, GLOBAL_AUTH_KEY};
use crate::config::{BaseUri, ClientConfig, Configuration, Environment, Server};
use crate::controllers::{BaseController, PetController, StoreController, UserController};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfiguration, ReqwestHttpClient};

/// Entry point of the SDK. Holds the configuration and hands out the
/// per-resource controllers.
pub struct PetstoreClient {
    environment: Environment,
    http_client: Arc<dyn HttpClient>,
    http_client_config: HttpClientConfiguration,
    auth_managers: Arc<AuthManagers>,
    implicit_auth_manager: Arc<ImplicitAuthManager>,
    pet: OnceLock<PetController>,
    store: OnceLock<StoreController>,
    user: OnceLock<UserController>,
}

impl PetstoreClient {
    /// Validate `config` and build a client.
    ///
    /// If `config.auth_managers` already holds an implicit-grant manager with
    /// the same credentials, that manager is reused; otherwise a new one
    /// replaces it.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let credentials = config.credentials();

        let http_client: Arc<dyn HttpClient> = match config.http_client {
            Some(http_client) => http_client,
            None => Arc::new(ReqwestHttpClient::new(&config.http_client_config)?),
        };

        let mut auth_managers = config.auth_managers;
        let existing = auth_managers
            .get(GLOBAL_AUTH_KEY)
            .cloned()
            .and_then(|manager| manager.into_any().downcast::<ImplicitAuthManager>().ok());

        let implicit_auth_manager = match existing {
            Some(manager) if manager.matches(&credentials) => {
                debug!("Reusing implicit auth manager with unchanged credentials");
                manager
            }
            _ => {
                debug!("Registering new implicit auth manager");
                let manager = Arc::new(ImplicitAuthManager::new(
                    credentials,
                    Arc::new(config.environment),
                ));
                auth_managers.insert(GLOBAL_AUTH_KEY.to_string(), manager.clone());
                manager
            }
        };

        info!("Petstore client created for environment {}", config.environment);

        Ok(Self {
            environment: config.environment,
            http_client,
            http_client_config: config.http_client_config,
            auth_managers: Arc::new(auth_managers),
            implicit_auth_manager,
            pet: OnceLock::new(),
            store: OnceLock::new(),
            user: OnceLock::new(),
        })
    }

    /// Build a client from `SWAGGER_PETSTORE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn pet_controller(&self) -> &PetController {
        self.pet
            .get_or_init(|| PetController::new(self.base_controller()))
    }

    pub fn store_controller(&self) -> &StoreController {
        self.store
            .get_or_init(|| StoreController::new(self.base_controller()))
    }

    pub fn user_controller(&self) -> &UserController {
        self.user
            .get_or_init(|| UserController::new(self.base_controller()))
    }

    pub fn http_client_config(&self) -> &HttpClientConfiguration {
        &self.http_client_config
    }

    pub fn auth_managers(&self) -> &AuthManagers {
        &self.auth_managers
    }

    pub fn implicit_auth_manager(&self) -> &Arc<ImplicitAuthManager> {
        &self.implicit_auth_manager
    }

    /// Snapshot this client's settings into a configuration that can be
    /// modified and passed back to [`PetstoreClient::new`].
    pub fn to_config(&self) -> ClientConfig {
        let credentials = self.implicit_auth_manager.credentials();
        ClientConfig::new()
            .with_environment(self.environment)
            .with_implicit_auth(credentials.client_id(), credentials.redirect_uri())
            .with_token(credentials.token().cloned())
            .with_scopes(credentials.scopes().map(<[_]>::to_vec))
            .with_http_client_config(self.http_client_config.clone())
            .with_http_client(Arc::clone(&self.http_client))
            .with_auth_managers((*self.auth_managers).clone())
    }

    fn base_controller(&self) -> BaseController {
        BaseController::new(
            Arc::new(self.environment),
            Arc::clone(&self.http_client),
            self.http_client_config.clone(),
            Arc::clone(&self.auth_managers),
        )
    }
}

impl BaseUri for PetstoreClient {
    fn base_uri(&self, server: Server) -> Result<String> {
        self.environment.base_uri(server)
    }
}

impl Configuration for PetstoreClient {
    fn environment(&self) -> Environment {
        self.environment
    }

    fn implicit_auth(&self) -> &dyn ImplicitAuth {
        self.implicit_auth_manager.as_ref()
    }
}

impl fmt::Display for PetstoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Environment = {}, HttpClientConfiguration = {}, ",
            self.environment, self.http_client_config
        )
    }
}

impl fmt::Debug for PetstoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PetstoreClient")
            .field("environment", &self.environment)
            .field("http_client_config", &self.http_client_config)
            .field("implicit_auth_manager", &self.implicit_auth_manager)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OAuthScope, OAuthToken};
    use crate::testutils::MockHttpClient;

    fn config() -> ClientConfig {
        ClientConfig::new()
            .with_implicit_auth("abc", "https://app/cb")
            .with_token(Some(OAuthToken::new("tok")))
            .with_scopes(Some(vec![OAuthScope::ReadPets]))
            .with_http_client(Arc::new(MockHttpClient::new()))
    }

    #[test]
    fn test_client_registers_global_manager() {
        let client = PetstoreClient::new(config()).unwrap();
        assert!(client.auth_managers().contains_key(GLOBAL_AUTH_KEY));
        assert_eq!(client.implicit_auth().client_id(), "abc");
        assert_eq!(client.environment(), Environment::Production);
    }

    #[test]
    fn test_controllers_are_cached() {
        let client = PetstoreClient::new(config()).unwrap();
        let first = client.pet_controller() as *const PetController;
        let second = client.pet_controller() as *const PetController;
        assert_eq!(first, second);
        assert!(std::ptr::eq(client.user_controller(), client.user_controller()));
        assert!(std::ptr::eq(client.store_controller(), client.store_controller()));
    }

    #[test]
    fn test_display() {
        let client = PetstoreClient::new(config()).unwrap();
        assert!(client
            .to_string()
            .starts_with("Environment = production, HttpClientConfiguration = Timeout = "));
    }
}
