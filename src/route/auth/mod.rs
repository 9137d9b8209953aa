use aide::axum::{routing::post_with, ApiRouter};

use crate::AppState;

pub mod model;
pub mod route;

/// An error that can occur during authentication.
///
/// Note that the messages are presented to the client, so they should not contain
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid credentials")]
	InvalidCredentials,
	#[error("password validation error")]
	Argon(#[from] argon2::Error),
	#[error("Not authorized, no token provided")]
	NoToken,
	#[error("Not authorized, admin not found")]
	AdminNotFound,
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new().api_route("/login", post_with(login, login_docs))
}
