pub use crate::model::Comment;

use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{gallery::NewComment, route::model::validate_not_blank};

#[derive(Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentInput {
	/// The approved poem to comment on.
	pub poetry_id: Uuid,
	#[validate(custom(function = "validate_not_blank"))]
	pub text: String,
	/// Defaults to "Anonymous".
	pub author: Option<String>,
}

impl From<CreateCommentInput> for NewComment {
	fn from(input: CreateCommentInput) -> Self {
		Self {
			poetry_id: input.poetry_id,
			text: input.text,
			author: input.author,
		}
	}
}
