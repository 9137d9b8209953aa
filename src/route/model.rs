use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
	gallery,
	model::{self, parse_date, Category, Status},
};

#[derive(Deserialize, Validate, JsonSchema)]
pub struct IdInput {
	pub id: Uuid,
}

/// A poem as returned to clients.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Poem {
	/// The unique identifier of the poem.
	pub id: Uuid,
	pub title: String,
	pub content: String,
	pub category: Category,
	pub author: String,
	/// The moderation status.
	pub status: Status,
	/// Whether the poem is publicly visible, always equal to `status == "approved"`.
	pub approved: bool,
	/// The publication date.
	pub date: DateTime<Utc>,
	pub likes: i64,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<model::Poem> for Poem {
	fn from(poem: model::Poem) -> Self {
		Self {
			approved: poem.status.is_approved(),
			id: poem.id,
			title: poem.title,
			content: poem.content,
			category: poem.category,
			author: poem.author,
			status: poem.status,
			date: poem.date,
			likes: poem.likes,
			created_at: poem.created_at,
			updated_at: poem.updated_at,
		}
	}
}

pub fn poems(poems: Vec<model::Poem>) -> Vec<Poem> {
	poems.into_iter().map(Poem::from).collect()
}

/// A plain confirmation, e.g. after a delete.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Confirmation {
	pub message: String,
}

impl Confirmation {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
	if value.trim().is_empty() {
		return Err(ValidationError::new("blank"));
	}

	Ok(())
}

pub fn validate_category(value: &str) -> Result<(), ValidationError> {
	value
		.parse::<Category>()
		.map(|_| ())
		.map_err(|_| ValidationError::new("invalid_category"))
}

/// Parses a category that already passed [`validate_category`].
pub fn parse_category(value: &str) -> Result<Category, gallery::Error> {
	value
		.parse()
		.map_err(|_| gallery::Error::InvalidCategory(value.to_owned()))
}

pub fn validate_date(value: &str) -> Result<(), ValidationError> {
	match parse_date(value) {
		Some(_) => Ok(()),
		None if value.trim().is_empty() => Ok(()),
		None => Err(ValidationError::new("invalid_date")),
	}
}

/// Parses a date that already passed [`validate_date`], blank values mean "not given".
pub fn optional_date(value: Option<&str>) -> Option<DateTime<Utc>> {
	value.and_then(parse_date)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_approved_flag_follows_status() {
		let now = Utc::now();

		for status in [Status::Pending, Status::Approved, Status::Rejected] {
			let poem = Poem::from(model::Poem {
				id: Uuid::new_v4(),
				title: "Rain".into(),
				content: "...".into(),
				category: Category::Sad,
				author: "Manav".into(),
				status,
				date: now,
				likes: 0,
				created_at: now,
				updated_at: now,
			});

			assert_eq!(poem.approved, status == Status::Approved);
		}
	}

	#[test]
	fn test_validators() {
		assert!(validate_not_blank("Rain").is_ok());
		assert!(validate_not_blank("  ").is_err());
		assert!(validate_category("Romantic").is_ok());
		assert!(validate_category("invalidcat").is_err());
		assert!(validate_date("2024-02-29").is_ok());
		assert!(validate_date("").is_ok());
		assert!(validate_date("someday").is_err());
	}
}
