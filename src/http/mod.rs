//! Request/response types and the transport seam.

mod client;
mod configuration;
mod request;
mod response;
mod retry;

pub use client::{HttpClient, ReqwestHttpClient};
pub use configuration::HttpClientConfiguration;
pub use request::HttpRequest;
pub use response::HttpResponse;
pub use retry::with_retry;
