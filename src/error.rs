use aide::OperationOutput;
use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{json, Value};

use crate::{gallery, moderation, route::auth, store, token};

pub type Map = serde_json::Map<String, Value>;

/// Error type for the application.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("query error: {0}")]
	Query(#[from] rejection::QueryRejection),
	#[error("path error: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("auth error: {0}")]
	Auth(#[from] auth::Error),
	#[error("token error: {0}")]
	Token(#[from] token::Error),
	#[error("moderation error: {0}")]
	Moderation(#[from] moderation::Error),
	#[error("gallery error: {0}")]
	Gallery(#[from] gallery::Error),
	#[error("store error: {0}")]
	Store(#[from] store::Error),
}

/// The body of every error response.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse {
	pub success: bool,
	/// A short, human-readable description.
	pub message: String,
	/// Individual problems with the request, if any.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<String>,
	/// Identifiers related to the error.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub details: Map,
}

impl ErrorResponse {
	fn new(message: impl Into<String>) -> Self {
		Self {
			success: false,
			message: message.into(),
			errors: Vec::new(),
			details: Map::new(),
		}
	}

	fn errors(mut self, errors: Vec<String>) -> Self {
		self.errors = errors;
		self
	}

	fn detail(mut self, key: &str, value: impl Serialize) -> Self {
		self.details.insert(key.into(), json!(value));
		self
	}
}

const SERVER_ERROR: &str = "Server error";

impl Error {
	fn parts(&self) -> (StatusCode, ErrorResponse) {
		match self {
			Self::Validation(errors) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new("Invalid request").errors(
					errors
						.field_errors()
						.into_iter()
						.flat_map(|(field, errors)| {
							errors.iter().map(move |error| format!("{field}: {error}"))
						})
						.collect(),
				),
			),
			Self::Json(rejection) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new("Invalid request body").errors(vec![rejection.body_text()]),
			),
			Self::Query(rejection) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new("Invalid query").errors(vec![rejection.body_text()]),
			),
			// Path parameters are ids, and a malformed id names nothing that exists.
			Self::Path(rejection) => (
				StatusCode::NOT_FOUND,
				ErrorResponse::new("Not found").errors(vec![rejection.body_text()]),
			),
			Self::Auth(auth::Error::Argon(..)) => server_error(),
			Self::Auth(error) => (StatusCode::UNAUTHORIZED, ErrorResponse::new(error.to_string())),
			Self::Token(token::Error::Expired) => (
				StatusCode::UNAUTHORIZED,
				ErrorResponse::new("Token expired. Please login again."),
			),
			Self::Token(token::Error::Invalid(..)) => (
				StatusCode::UNAUTHORIZED,
				ErrorResponse::new("Not authorized, token failed"),
			),
			Self::Token(token::Error::Sign(..)) => server_error(),
			Self::Moderation(error @ moderation::Error::UnknownPoem(id)) => (
				StatusCode::NOT_FOUND,
				ErrorResponse::new(error.to_string()).detail("poetry", id),
			),
			Self::Moderation(error @ moderation::Error::UnknownComment(id)) => (
				StatusCode::NOT_FOUND,
				ErrorResponse::new(error.to_string()).detail("comment", id),
			),
			Self::Gallery(error @ gallery::Error::InvalidCategory(category)) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new(error.to_string()).detail("category", category),
			),
			Self::Gallery(error @ gallery::Error::UnknownPoem(id)) => (
				StatusCode::NOT_FOUND,
				ErrorResponse::new(error.to_string()).detail("poetry", id),
			),
			Self::Gallery(error @ gallery::Error::EmptyComment) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new(error.to_string()),
			),
			Self::Moderation(moderation::Error::Store(..))
			| Self::Gallery(gallery::Error::Store(..))
			| Self::Store(..) => server_error(),
		}
	}
}

fn server_error() -> (StatusCode, ErrorResponse) {
	(
		StatusCode::INTERNAL_SERVER_ERROR,
		ErrorResponse::new(SERVER_ERROR),
	)
}

impl IntoResponse for Error {
	fn into_response(self) -> Response<Body> {
		let (status, body) = self.parts();

		if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
		} else {
			tracing::debug!(error = %self, %status, "request rejected");
		}

		(status, axum::Json(body)).into_response()
	}
}

impl OperationOutput for Error {
	type Inner = ErrorResponse;
}
