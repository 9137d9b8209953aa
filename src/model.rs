use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_POEM_AUTHOR: &str = "Manav";
pub const DEFAULT_COMMENT_AUTHOR: &str = "Anonymous";

/// The closed set of categories a poem can be filed under.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "poem_category", rename_all = "lowercase")]
pub enum Category {
	Sad,
	Romantic,
	Broken,
	Mother,
	Love,
}

impl Category {
	pub const ALL: [Category; 5] = [
		Self::Sad,
		Self::Romantic,
		Self::Broken,
		Self::Mother,
		Self::Love,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Sad => "sad",
			Self::Romantic => "romantic",
			Self::Broken => "broken",
			Self::Mother => "mother",
			Self::Love => "love",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
	type Err = UnknownCategory;

	/// Case-insensitive, surrounding whitespace is ignored.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.trim().to_ascii_lowercase();

		Self::ALL
			.into_iter()
			.find(|category| category.as_str() == normalized)
			.ok_or_else(|| UnknownCategory(s.to_owned()))
	}
}

/// Moderation status of a poem. This is the only stored representation of
/// approval, the `approved` flag clients see is derived from it.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "poem_status", rename_all = "lowercase")]
pub enum Status {
	Pending,
	Approved,
	Rejected,
}

impl Status {
	/// Approved poems are the only ones listed, liked or commented on publicly.
	pub fn is_approved(self) -> bool {
		matches!(self, Self::Approved)
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Approved => "approved",
			Self::Rejected => "rejected",
		}
	}
}

/// A single poem.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Poem {
	pub id: Uuid,
	pub title: String,
	pub content: String,
	pub category: Category,
	pub author: String,
	pub status: Status,
	/// Publication date shown to readers, may be backdated by the admin.
	pub date: DateTime<Utc>,
	pub likes: i64,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// A reader comment attached to a poem.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
	pub id: Uuid,
	pub poetry_id: Uuid,
	pub text: String,
	pub author: String,
	pub created_at: DateTime<Utc>,
}

/// An administrator account.
///
/// The password is an Argon2 hash salted with the admin's `id`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
	pub id: Uuid,
	pub email: String,
	pub password: Vec<u8>,
	pub created_at: DateTime<Utc>,
}

/// Emails are compared case-insensitively, so they are stored trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
	email.trim().to_lowercase()
}

/// Parses a publication date given either as `YYYY-MM-DD` (midnight UTC)
/// or as a full RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
	let value = value.trim();

	if let Ok(date) = DateTime::parse_from_rfc3339(value) {
		return Some(date.with_timezone(&Utc));
	}

	NaiveDate::parse_from_str(value, "%Y-%m-%d")
		.ok()
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|date| date.and_utc())
}

/// Returns the trimmed value, or the fallback when it is missing or blank.
pub fn or_default_author(author: Option<&str>, fallback: &str) -> String {
	author
		.map(str::trim)
		.filter(|author| !author.is_empty())
		.unwrap_or(fallback)
		.to_owned()
}

#[cfg(test)]
mod test {
	use chrono::{Datelike, Timelike};

	use super::*;

	#[test]
	fn test_category_is_case_insensitive() {
		assert_eq!("SAD".parse::<Category>().unwrap(), Category::Sad);
		assert_eq!(" Mother ".parse::<Category>().unwrap(), Category::Mother);
		assert_eq!("love".parse::<Category>().unwrap(), Category::Love);
	}

	#[test]
	fn test_category_rejects_unknown() {
		for value in ["happy", "", "invalidcat", "sadness"] {
			assert!(value.parse::<Category>().is_err(), "{value} parsed");
		}
	}

	#[test]
	fn test_only_approved_status_is_approved() {
		assert!(Status::Approved.is_approved());
		assert!(!Status::Pending.is_approved());
		assert!(!Status::Rejected.is_approved());
	}

	#[test]
	fn test_parse_date() {
		let date = parse_date("2021-03-04").unwrap();
		assert_eq!((date.year(), date.month(), date.day()), (2021, 3, 4));
		assert_eq!(date.hour(), 0);

		let date = parse_date("2021-03-04T10:30:00+02:00").unwrap();
		assert_eq!(date.hour(), 8);

		assert!(parse_date("yesterday").is_none());
	}

	#[test]
	fn test_author_fallback() {
		assert_eq!(or_default_author(None, DEFAULT_POEM_AUTHOR), "Manav");
		assert_eq!(or_default_author(Some("   "), DEFAULT_COMMENT_AUTHOR), "Anonymous");
		assert_eq!(or_default_author(Some(" Mira "), DEFAULT_COMMENT_AUTHOR), "Mira");
	}

	#[test]
	fn test_normalize_email() {
		assert_eq!(normalize_email("  Admin@Example.COM "), "admin@example.com");
	}
}
