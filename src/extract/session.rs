use aide::OperationInput;
use axum::{
	extract::{FromRef, FromRequestParts},
	http::{header, request},
};

use crate::{
	error::Error,
	model::Admin,
	openapi::SECURITY_SCHEME_BEARER,
	route::auth,
	store::{CredentialStore, Credentials},
	token::TokenIssuer,
};

pub const AUTHORIZATION_PREFIX: &str = "Bearer ";

/// The administrator a request was made by, proven with a bearer token.
///
/// If no token is sent, a [`auth::Error::NoToken`] is returned.
/// Expired and forged tokens are rejected with the matching [`crate::token::Error`],
/// and a valid token for a deleted admin with [`auth::Error::AdminNotFound`].
///
/// ```rust
/// async fn route(session: Session) {
///   println!("{}", session.admin.email);
/// }
/// ```
#[derive(Debug)]
pub struct Session {
	pub admin: Admin,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
	Credentials: FromRef<S>,
	TokenIssuer: FromRef<S>,
	S: Sync + Send,
{
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let token = parts
			.headers
			.get(header::AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.and_then(|value| value.strip_prefix(AUTHORIZATION_PREFIX))
			.map(str::trim)
			.filter(|token| !token.is_empty())
			.ok_or(auth::Error::NoToken)?;

		let admin_id = TokenIssuer::from_ref(state).verify(token)?;

		let admin = Credentials::from_ref(state)
			.find_admin(admin_id)
			.await?
			.ok_or(auth::Error::AdminNotFound)?;

		Ok(Self { admin })
	}
}

impl OperationInput for Session {
	/// Adds the bearer token requirement to the `OpenAPI` operation.
	fn operation_input(_ctx: &mut aide::gen::GenContext, operation: &mut aide::openapi::Operation) {
		operation.security.push(
			[(SECURITY_SCHEME_BEARER.to_string(), Vec::new())]
				.into_iter()
				.collect(),
		);
	}
}
