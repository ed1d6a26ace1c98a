// self
use crate::_prelude::*;

/// OAuth 2.0 grant types the client can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Resource Owner Password Credentials grant.
	Password,
	/// Client Credentials grant for machine-to-machine tokens.
	ClientCredentials,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::Password => "password",
			GrantType::ClientCredentials => "client_credentials",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Collection of grant flags wired into the descriptor.
///
/// A flag stays off until the server is known to implement the grant; requesters refuse
/// disabled grants before touching the network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportedGrants {
	/// Indicates whether the Password grant is enabled.
	pub password: bool,
	/// Indicates whether the Client Credentials grant is enabled.
	pub client_credentials: bool,
}
impl SupportedGrants {
	/// Returns true if the provided grant is supported.
	pub fn supports(self, grant: GrantType) -> bool {
		match grant {
			GrantType::Password => self.password,
			GrantType::ClientCredentials => self.client_credentials,
		}
	}

	/// Marks a grant as supported.
	pub fn enable(mut self, grant: GrantType) -> Self {
		match grant {
			GrantType::Password => self.password = true,
			GrantType::ClientCredentials => self.client_credentials = true,
		}

		self
	}

	/// Returns true when no grants are enabled.
	pub fn is_empty(self) -> bool {
		!self.password && !self.client_credentials
	}
}
