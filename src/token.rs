use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long an issued token stays valid.
pub const TOKEN_LIFETIME_DAYS: i64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("token expired")]
	Expired,
	#[error("invalid token: {0}")]
	Invalid(#[source] jsonwebtoken::errors::Error),
	#[error("failed to sign token: {0}")]
	Sign(#[source] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
	/// The administrator the token was issued to.
	sub: Uuid,
	iat: i64,
	exp: i64,
}

/// Issues and verifies the signed bearer tokens used by administrators.
///
/// Tokens are HS256 JWTs carrying the admin id and an expiry. Nothing is stored
/// server side, so a token stays valid until it expires.
#[derive(Clone)]
pub struct TokenIssuer {
	encoding: EncodingKey,
	decoding: DecodingKey,
	validation: Validation,
}

impl TokenIssuer {
	pub fn new(secret: &[u8]) -> Self {
		let mut validation = Validation::new(Algorithm::HS256);
		validation.leeway = 0;

		Self {
			encoding: EncodingKey::from_secret(secret),
			decoding: DecodingKey::from_secret(secret),
			validation,
		}
	}

	pub fn issue(&self, admin_id: Uuid) -> Result<String, Error> {
		self.issue_at(admin_id, Utc::now())
	}

	pub fn issue_at(&self, admin_id: Uuid, issued_at: DateTime<Utc>) -> Result<String, Error> {
		let claims = Claims {
			sub: admin_id,
			iat: issued_at.timestamp(),
			exp: (issued_at + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp(),
		};

		jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
			.map_err(Error::Sign)
	}

	/// Checks the signature and expiry, returning the admin id the token was issued to.
	pub fn verify(&self, token: &str) -> Result<Uuid, Error> {
		jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
			.map(|data| data.claims.sub)
			.map_err(|error| match error.kind() {
				ErrorKind::ExpiredSignature => Error::Expired,
				_ => Error::Invalid(error),
			})
	}
}
