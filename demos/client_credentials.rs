//! Requests a machine token with the client credentials grant.
//!
//! The stock `oauthsrv` answers this grant with a `jwt` field instead of `access_token`, so
//! the grant is disabled in [`ProviderDescriptor::oauthsrv`]. This demo enables it explicitly,
//! so it is expected to fail with `MissingField` and a non-zero exit status against an
//! unmodified server.

// std
use std::env;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauthsrv_client::{
	flows::ReqwestRequester,
	provider::{GrantType, ProviderDescriptor},
};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let base = env::var("OAUTHSRV_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
	let mut descriptor = ProviderDescriptor::oauthsrv(Url::parse(&base)?)?;

	descriptor.supported_grants = descriptor.supported_grants.enable(GrantType::ClientCredentials);

	let requester = ReqwestRequester::new(descriptor)?;
	let response = requester
		.request_client_credentials_token("<MY-CLIENT-ID>", "<MY-CLIENT-PASSWORD>", "*")
		.await?;

	println!("Obtained access token: {}", response.access_token().secret());

	Ok(())
}
