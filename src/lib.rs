//! # swagger-petstore
//!
//! A typed Rust client for the Swagger Petstore API.
//!
//! ## Overview
//!
//! [`PetstoreClient`] wires together the environment table, the transport and the
//! OAuth 2.0 implicit-grant [`ImplicitAuthManager`]. Resource controllers are
//! created on first use and share the client's transport and auth managers.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use swagger_petstore::{
//!     models::{OAuthScope, OAuthToken, PetStatus},
//!     ClientConfig, Configuration, PetstoreClient, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::new()
//!         .with_implicit_auth("my-client-id", "https://app.example.com/callback")
//!         .with_scopes(Some(vec![OAuthScope::ReadPets, OAuthScope::WritePets]));
//!     let client = PetstoreClient::new(config)?;
//!
//!     // Send the user here; the token comes back on the redirect URI.
//!     let url = client
//!         .implicit_auth()
//!         .build_authorization_url(Some("opaque-state"), &[])?;
//!     println!("Authorize at {url}");
//!
//!     let client = PetstoreClient::new(
//!         client
//!             .to_config()
//!             .with_token(Some(OAuthToken::new("token-from-redirect"))),
//!     )?;
//!     let pets = client
//!         .pet_controller()
//!         .find_pets_by_status(&[PetStatus::Available])
//!         .await?;
//!     println!("{} pets available", pets.len());
//!     Ok(())
//! }
//! ```

mod api_helper;
mod client;
mod error;

pub mod auth;
pub mod config;
pub mod controllers;
pub mod http;
pub mod models;
pub mod testutils;

pub use api_helper::{
    append_url_with_query_parameters, append_url_with_template_parameters, clean_url,
};
pub use auth::{
    AuthManager, AuthManagers, ImplicitAuth, ImplicitAuthCredentials, ImplicitAuthManager,
    GLOBAL_AUTH_KEY,
};
pub use client::PetstoreClient;
pub use config::{BaseUri, ClientConfig, Configuration, Environment, Server};
pub use error::{Error, Result};
