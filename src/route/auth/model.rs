use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, JsonSchema)]
pub struct LoginInput {
	#[validate(length(min = 1))]
	pub email: String,
	#[validate(length(min = 1))]
	pub password: String,
}

/// The public part of an administrator account.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Admin {
	pub id: Uuid,
	pub email: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct Login {
	/// Bearer token for the `Authorization` header, valid for 30 days.
	pub token: String,
	pub admin: Admin,
}
