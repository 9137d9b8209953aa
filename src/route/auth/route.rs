use axum::extract::State;
use macros::route;

use crate::{
	extract::Json,
	model::normalize_email,
	openapi::tag,
	password::verify_password,
	store::CredentialStore,
	AppState,
};

use super::{model, Error};

/// Log in
/// Exchanges administrator credentials for a bearer token.
#[route(tag = tag::AUTH, response(status = 401, description = "Invalid credentials."))]
pub async fn login(
	State(state): State<AppState>,
	Json(input): Json<model::LoginInput>,
) -> Result<Json<model::Login>, crate::Error> {
	let email = normalize_email(&input.email);

	let Some(admin) = state.credentials.find_admin_by_email(&email).await? else {
		tracing::info!(%email, "login failed: unknown admin");
		return Err(Error::InvalidCredentials.into());
	};

	let matches = verify_password(&state.hasher, &input.password, &admin.id, &admin.password)
		.map_err(Error::Argon)?;

	if !matches {
		tracing::info!(%email, "login failed: wrong password");
		return Err(Error::InvalidCredentials.into());
	}

	let token = state.tokens.issue(admin.id)?;

	tracing::info!(%email, "admin logged in");

	Ok(Json(model::Login {
		token,
		admin: model::Admin {
			id: admin.id,
			email: admin.email,
		},
	}))
}
