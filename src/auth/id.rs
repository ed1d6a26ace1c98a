//! Validated identifier for authorization server descriptors.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("Provider identifier cannot be empty.")]
	Empty,
	/// The identifier contains whitespace characters.
	#[error("Provider identifier contains whitespace.")]
	ContainsWhitespace,
	/// The identifier exceeded the allowed character count.
	#[error("Provider identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Identifier for an authorization server descriptor, used in errors and span fields.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);
impl ProviderId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for ProviderId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for ProviderId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<ProviderId> for String {
	fn from(value: ProviderId) -> Self {
		value.0
	}
}
impl TryFrom<String> for ProviderId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Debug for ProviderId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Provider({})", self.0)
	}
}
impl Display for ProviderId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for ProviderId {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace);
	}
	if view.chars().count() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_blank_and_spaced_values() {
		assert_eq!(ProviderId::new(""), Err(IdentifierError::Empty));
		assert_eq!(ProviderId::new(" oauthsrv"), Err(IdentifierError::ContainsWhitespace));
		assert_eq!(ProviderId::new("oauth\u{00A0}srv"), Err(IdentifierError::ContainsWhitespace));

		let id = ProviderId::new("oauthsrv").expect("Provider fixture should be valid.");

		assert_eq!(id.as_ref(), "oauthsrv");
		assert_eq!(format!("{id:?}"), "Provider(oauthsrv)");
	}

	#[test]
	fn length_limit_is_inclusive() {
		ProviderId::new("a".repeat(IDENTIFIER_MAX_LEN)).expect("Exact length should succeed.");

		assert_eq!(
			ProviderId::new("a".repeat(IDENTIFIER_MAX_LEN + 1)),
			Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN })
		);
	}

	#[test]
	fn length_limit_counts_characters() {
		ProviderId::new("é".repeat(IDENTIFIER_MAX_LEN))
			.expect("Multi-byte characters should count once each.");

		assert_eq!(
			ProviderId::new("é".repeat(IDENTIFIER_MAX_LEN + 1)),
			Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN })
		);
	}

	#[test]
	fn serde_enforces_validation() {
		let id: ProviderId =
			serde_json::from_str("\"local\"").expect("Provider should deserialize successfully.");

		assert_eq!(&*id, "local");
		assert!(serde_json::from_str::<ProviderId>("\"with space\"").is_err());
	}
}
