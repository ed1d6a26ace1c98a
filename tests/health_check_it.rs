// crates.io
use httpmock::prelude::*;
// self
use oauthsrv_client::{
	_preludet::*,
	auth::ProviderId,
	error::ConfigError,
	provider::{GrantType, ProviderDescriptor},
};

#[tokio::test]
async fn health_check_accepts_ok() {
	let server = MockServer::start_async().await;
	let requester =
		build_reqwest_test_requester(mock_descriptor(&server.base_url(), [GrantType::Password]));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/healthcheck");
			then.status(200).body("Ok!");
		})
		.await;

	requester.health_check().await.expect("Healthy server should pass the probe.");

	mock.assert_async().await;
}

#[tokio::test]
async fn health_check_reports_unhealthy_status() {
	let server = MockServer::start_async().await;
	let requester =
		build_reqwest_test_requester(mock_descriptor(&server.base_url(), [GrantType::Password]));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/healthcheck");
			then.status(503).body("down");
		})
		.await;
	let err = requester.health_check().await.expect_err("503 must fail the probe.");

	match err {
		Error::UnexpectedStatus { status, body } => {
			assert_eq!(status, 503);
			assert_eq!(body, "down");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_async().await;
}

#[tokio::test]
async fn health_check_requires_endpoint() {
	let descriptor =
		ProviderDescriptor::builder(ProviderId::new("no-health").expect("Identifier is valid."))
			.token_endpoint(
				Url::parse("http://localhost:8080/oauth/v2/auth").expect("Endpoint should parse."),
			)
			.support_grant(GrantType::Password)
			.build()
			.expect("Descriptor without health endpoint should build.");
	let err = build_reqwest_test_requester(descriptor)
		.health_check()
		.await
		.expect_err("Missing health endpoint must fail.");

	match err {
		Error::Config(ConfigError::MissingHealthEndpoint { descriptor }) => {
			assert_eq!(descriptor, "no-health");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}
