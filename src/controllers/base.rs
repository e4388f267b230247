use std::sync::Arc;

use tracing::debug;

use crate::api_helper::{append_url_with_template_parameters, clean_url};
use crate::auth::AuthManagers;
use crate::config::{BaseUri, Server};
use crate::error::{Error, Result};
use crate::http::{with_retry, HttpClient, HttpClientConfiguration, HttpRequest, HttpResponse};

/// State shared by every controller of a client.
#[derive(Clone)]
pub struct BaseController {
    base_uri: Arc<dyn BaseUri>,
    http_client: Arc<dyn HttpClient>,
    http_client_config: HttpClientConfiguration,
    auth_managers: Arc<AuthManagers>,
}

impl BaseController {
    pub(crate) fn new(
        base_uri: Arc<dyn BaseUri>,
        http_client: Arc<dyn HttpClient>,
        http_client_config: HttpClientConfiguration,
        auth_managers: Arc<AuthManagers>,
    ) -> Self {
        Self {
            base_uri,
            http_client,
            http_client_config,
            auth_managers,
        }
    }

    /// Base URI of the default server joined with `path`, placeholders filled.
    pub(crate) fn url(&self, path: &str, template: &[(&str, &str)]) -> Result<String> {
        let mut url = self.base_uri.base_uri(Server::Server1)?;
        url.push_str(path);
        append_url_with_template_parameters(&mut url, template);
        Ok(url)
    }

    /// Authenticate with the manager registered under `auth` (if any), send the
    /// request and fail on non-2xx responses.
    pub(crate) async fn execute(
        &self,
        mut request: HttpRequest,
        auth: Option<&str>,
    ) -> Result<HttpResponse> {
        request.url = clean_url(&request.url)?;

        if let Some(key) = auth {
            let manager = self.auth_managers.get(key).ok_or_else(|| {
                Error::Configuration(format!("No auth manager registered under '{key}'"))
            })?;
            manager.apply_async(&mut request).await?;
        }

        debug!("Sending {} {}", request.method, request.url);
        let method = request.method.clone();
        let http_client = Arc::clone(&self.http_client);
        let response = with_retry(&self.http_client_config, &method, move || {
            let http_client = Arc::clone(&http_client);
            let request = request.clone();
            async move { http_client.execute(request).await }
        })
        .await?;
        debug!("Received HTTP {}", response.status);

        response.error_for_status()
    }
}
