use http::Method;

use super::BaseController;
use crate::auth::GLOBAL_AUTH_KEY;
use crate::api_helper::append_url_with_query_parameters;
use crate::error::Result;
use crate::http::HttpRequest;
use crate::models::{Pet, PetStatus};

/// Operations on `/pet`. Every call is authenticated.
pub struct PetController {
    base: BaseController,
}

impl PetController {
    pub(crate) fn new(base: BaseController) -> Self {
        Self { base }
    }

    /// Add a new pet to the store.
    pub async fn add_pet(&self, body: &Pet) -> Result<()> {
        let url = self.base.url("/pet", &[])?;
        let request = HttpRequest::new(Method::POST, url).with_json(body)?;
        self.base.execute(request, Some(GLOBAL_AUTH_KEY)).await?;
        Ok(())
    }

    /// Update an existing pet.
    pub async fn update_pet(&self, body: &Pet) -> Result<()> {
        let url = self.base.url("/pet", &[])?;
        let request = HttpRequest::new(Method::PUT, url).with_json(body)?;
        self.base.execute(request, Some(GLOBAL_AUTH_KEY)).await?;
        Ok(())
    }

    /// Find pets matching any of the given statuses.
    pub async fn find_pets_by_status(&self, status: &[PetStatus]) -> Result<Vec<Pet>> {
        let mut url = self.base.url("/pet/findByStatus", &[])?;
        append_url_with_query_parameters(
            &mut url,
            status.iter().map(|s| ("status", Some(s.as_str()))),
        );
        let request =
            HttpRequest::new(Method::GET, url).with_header("accept", "application/json");
        self.base
            .execute(request, Some(GLOBAL_AUTH_KEY))
            .await?
            .json()
    }

    /// Find pets carrying any of the given tags.
    pub async fn find_pets_by_tags(&self, tags: &[&str]) -> Result<Vec<Pet>> {
        let mut url = self.base.url("/pet/findByTags", &[])?;
        append_url_with_query_parameters(&mut url, tags.iter().map(|t| ("tags", Some(*t))));
        let request =
            HttpRequest::new(Method::GET, url).with_header("accept", "application/json");
        self.base
            .execute(request, Some(GLOBAL_AUTH_KEY))
            .await?
            .json()
    }

    pub async fn get_pet_by_id(&self, pet_id: i64) -> Result<Pet> {
        let pet_id = pet_id.to_string();
        let url = self.base.url("/pet/{petId}", &[("petId", pet_id.as_str())])?;
        let request =
            HttpRequest::new(Method::GET, url).with_header("accept", "application/json");
        self.base
            .execute(request, Some(GLOBAL_AUTH_KEY))
            .await?
            .json()
    }

    /// Update a pet with form data.
    pub async fn update_pet_with_form(
        &self,
        pet_id: i64,
        name: Option<&str>,
        status: Option<PetStatus>,
    ) -> Result<()> {
        let pet_id = pet_id.to_string();
        let url = self.base.url("/pet/{petId}", &[("petId", pet_id.as_str())])?;
        let request = HttpRequest::new(Method::POST, url)
            .with_form([("name", name), ("status", status.map(PetStatus::as_str))]);
        self.base.execute(request, Some(GLOBAL_AUTH_KEY)).await?;
        Ok(())
    }

    pub async fn delete_pet(&self, pet_id: i64, api_key: Option<&str>) -> Result<()> {
        let pet_id = pet_id.to_string();
        let url = self.base.url("/pet/{petId}", &[("petId", pet_id.as_str())])?;
        let mut request = HttpRequest::new(Method::DELETE, url);
        if let Some(api_key) = api_key {
            request = request.with_header("api_key", api_key);
        }
        self.base.execute(request, Some(GLOBAL_AUTH_KEY)).await?;
        Ok(())
    }
}
