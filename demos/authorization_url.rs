//! Print the OAuth 2.0 implicit-grant authorization URL for a client.
//!
//! Usage:
//!   cargo run --example authorization_url -- --client-id my-app \
//!       --redirect-uri https://app.example.com/callback --scope read:pets --state xyz

use clap::Parser;
use swagger_petstore::{
    models::OAuthScope, ClientConfig, Configuration, Environment, PetstoreClient, Result,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "authorization_url")]
#[command(about = "Print the authorization URL for the Swagger Petstore implicit grant")]
struct Args {
    /// OAuth client identifier
    #[arg(long, env = "SWAGGER_PETSTORE_O_AUTH_CLIENT_ID")]
    client_id: String,

    /// Redirect URI registered for the client
    #[arg(long, env = "SWAGGER_PETSTORE_O_AUTH_REDIRECT_URI")]
    redirect_uri: String,

    /// Scopes to request (repeatable)
    #[arg(long = "scope")]
    scopes: Vec<OAuthScope>,

    /// Opaque state echoed back on the redirect
    #[arg(long)]
    state: Option<String>,

    #[arg(long, env = "SWAGGER_PETSTORE_ENVIRONMENT", default_value = "production")]
    environment: Environment,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let scopes = (!args.scopes.is_empty()).then_some(args.scopes);

    let client = PetstoreClient::new(
        ClientConfig::new()
            .with_environment(args.environment)
            .with_implicit_auth(args.client_id, args.redirect_uri)
            .with_scopes(scopes),
    )?;
    info!("{}", client);

    let url = client
        .implicit_auth()
        .build_authorization_url(args.state.as_deref(), &[])?;
    println!("{url}");

    Ok(())
}
