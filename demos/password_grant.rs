//! Requests a token from a running `oauthsrv` with the password grant and probes its health
//! endpoint.
//!
//! Point `OAUTHSRV_BASE_URL` at the server (defaults to `http://localhost:8080`).

// std
use std::env;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauthsrv_client::{flows::ReqwestRequester, provider::ProviderDescriptor};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let base = env::var("OAUTHSRV_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
	let requester = ReqwestRequester::new(ProviderDescriptor::oauthsrv(Url::parse(&base)?)?)?;

	requester.health_check().await?;

	let response = requester.request_password_token("test@email.com", "root").await?;

	println!("Obtained access token: {}", response.access_token().secret());

	Ok(())
}
