use http::Method;

use super::BaseController;
use crate::api_helper::append_url_with_query_parameters;
use crate::error::Result;
use crate::http::HttpRequest;
use crate::models::User;

/// Operations on `/user`.
pub struct UserController {
    base: BaseController,
}

impl UserController {
    pub(crate) fn new(base: BaseController) -> Self {
        Self { base }
    }

    pub async fn create_user(&self, body: &User) -> Result<()> {
        self.post_json("/user", body).await
    }

    pub async fn create_users_with_array_input(&self, body: &[User]) -> Result<()> {
        self.post_json("/user/createWithArray", body).await
    }

    pub async fn create_users_with_list_input(&self, body: &[User]) -> Result<()> {
        self.post_json("/user/createWithList", body).await
    }

    /// Log the user in and return the session message from the server.
    pub async fn login_user(&self, username: &str, password: &str) -> Result<String> {
        let mut url = self.base.url("/user/login", &[])?;
        append_url_with_query_parameters(
            &mut url,
            [("username", Some(username)), ("password", Some(password))],
        );
        let response = self
            .base
            .execute(HttpRequest::new(Method::GET, url), None)
            .await?;
        Ok(response.text())
    }

    pub async fn logout_user(&self) -> Result<()> {
        let url = self.base.url("/user/logout", &[])?;
        self.base
            .execute(HttpRequest::new(Method::GET, url), None)
            .await?;
        Ok(())
    }

    pub async fn get_user_by_name(&self, username: &str) -> Result<User> {
        let url = self.base.url("/user/{username}", &[("username", username)])?;
        let request =
            HttpRequest::new(Method::GET, url).with_header("accept", "application/json");
        self.base.execute(request, None).await?.json()
    }

    pub async fn update_user(&self, username: &str, body: &User) -> Result<()> {
        let url = self.base.url("/user/{username}", &[("username", username)])?;
        let request = HttpRequest::new(Method::PUT, url).with_json(body)?;
        self.base.execute(request, None).await?;
        Ok(())
    }

    pub async fn delete_user(&self, username: &str) -> Result<()> {
        let url = self.base.url("/user/{username}", &[("username", username)])?;
        self.base
            .execute(HttpRequest::new(Method::DELETE, url), None)
            .await?;
        Ok(())
    }

    async fn post_json<T: serde::Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<()> {
        let url = self.base.url(path, &[])?;
        let request = HttpRequest::new(Method::POST, url).with_json(body)?;
        self.base.execute(request, None).await?;
        Ok(())
    }
}
