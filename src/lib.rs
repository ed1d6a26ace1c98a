//! Typed OAuth 2.0 token client for `oauthsrv`: request a token with the `password` or
//! `client_credentials` grant, validate the response envelope, and get typed errors back.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use oauthsrv_client::{flows::ReqwestRequester, provider::ProviderDescriptor, url::Url};
//!
//! let descriptor = ProviderDescriptor::oauthsrv(Url::parse("http://localhost:8080")?)?;
//! let requester = ReqwestRequester::new(descriptor)?;
//! let response = requester.request_password_token("test@email.com", "root").await?;
//!
//! println!("Obtained access token: {}", response.access_token().secret());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod ext;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{flows::ReqwestRequester, http::ReqwestHttpClient, provider::ProviderDescriptor};

	/// Short timeout applied by test clients so hung mocks fail fast.
	pub const TEST_TIMEOUT: Duration = Duration::seconds(5);

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client).with_timeout(TEST_TIMEOUT)
	}

	/// Constructs a [`ReqwestRequester`] for `descriptor` backed by the test transport.
	pub fn build_reqwest_test_requester(descriptor: ProviderDescriptor) -> ReqwestRequester {
		ReqwestRequester::with_http_client(
			descriptor,
			test_reqwest_http_client(),
			crate::oauth::ReqwestTransportErrorMapper,
		)
	}

	/// Builds a descriptor that points at `/oauth/v2/auth` and `/healthcheck` on a mock server
	/// base URL and enables the provided grants.
	pub fn mock_descriptor<I>(base: &str, grants: I) -> ProviderDescriptor
	where
		I: IntoIterator<Item = crate::provider::GrantType>,
	{
		let base = Url::parse(base).expect("Mock server base URL should parse.");

		ProviderDescriptor::builder(
			crate::auth::ProviderId::new("mock-oauthsrv")
				.expect("Mock provider identifier should be valid."),
		)
		.token_endpoint(base.join("/oauth/v2/auth").expect("Mock token endpoint should join."))
		.health_endpoint(base.join("/healthcheck").expect("Mock health endpoint should join."))
		.support_grants(grants)
		.build()
		.expect("Mock provider descriptor should build.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::Duration;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
