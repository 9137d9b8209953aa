pub use crate::route::model::{IdInput, Poem};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
	moderation::Draft,
	route::model::{parse_category, validate_category, validate_not_blank},
};

#[derive(Debug, Serialize, JsonSchema)]
pub struct Likes {
	/// The like count after this like.
	pub likes: i64,
}

/// A poem created for review. It stays hidden until approved.
#[derive(Deserialize, Validate, JsonSchema)]
pub struct SubmitPoemInput {
	#[validate(custom(function = "validate_not_blank"))]
	pub title: String,
	#[validate(custom(function = "validate_not_blank"))]
	pub content: String,
	/// One of `sad`, `romantic`, `broken`, `mother` or `love`, in any case.
	#[validate(custom(function = "validate_category"))]
	pub category: String,
	/// Defaults to "Manav".
	pub author: Option<String>,
}

impl SubmitPoemInput {
	pub fn into_draft(self) -> Result<Draft, crate::Error> {
		Ok(Draft {
			category: parse_category(&self.category)?,
			title: self.title,
			content: self.content,
			author: self.author,
			date: None,
		})
	}
}
