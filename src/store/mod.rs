//! Persistence contracts for administrators and content.
//!
//! Handlers and domain logic only talk to [`CredentialStore`] and [`ContentStore`],
//! the PostgreSQL implementation backs the running service.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{Admin, Category, Comment, Poem, Status};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("migration error: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T> = std::result::Result<T, Error>;

pub type Credentials = Arc<dyn CredentialStore>;
pub type Content = Arc<dyn ContentStore>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
	#[default]
	Created,
	Category,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
	Asc,
	#[default]
	Desc,
}

/// Filter and ordering for poem listings.
///
/// Sorting by category orders alphabetically, ties are broken newest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoemQuery {
	pub category: Option<Category>,
	pub status: Option<Status>,
	pub sort_by: SortBy,
	pub order: Order,
}

impl PoemQuery {
	/// Approved poems of a category, newest first.
	pub fn visible(category: Category) -> Self {
		Self {
			category: Some(category),
			status: Some(Status::Approved),
			..Self::default()
		}
	}

	pub fn with_status(status: Status) -> Self {
		Self {
			status: Some(status),
			..Self::default()
		}
	}
}

/// Administrator records.
#[async_trait]
pub trait CredentialStore: Send + Sync {
	async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>>;
	/// Looks up by an already normalized email.
	async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>>;
	/// Inserts the admin unless one with the same email exists, returning whether it was inserted.
	async fn insert_admin(&self, admin: &Admin) -> Result<bool>;
}

/// Poem and comment records.
#[async_trait]
pub trait ContentStore: Send + Sync {
	async fn insert_poem(&self, poem: &Poem) -> Result<()>;
	async fn find_poem(&self, id: Uuid) -> Result<Option<Poem>>;
	async fn list_poems(&self, query: PoemQuery) -> Result<Vec<Poem>>;
	/// Writes every field except `likes`, returning whether the poem exists.
	async fn update_poem(&self, poem: &Poem) -> Result<bool>;
	/// Deletes the poem together with all of its comments.
	async fn delete_poem(&self, id: Uuid) -> Result<bool>;
	/// Atomically adds one like to an approved poem, returning the new count.
	async fn increment_likes(&self, id: Uuid) -> Result<Option<i64>>;

	/// Inserts the comment only if its poem exists and is approved.
	async fn insert_comment(&self, comment: &Comment) -> Result<bool>;
	/// Comments of a poem, newest first.
	async fn list_comments(&self, poetry_id: Uuid) -> Result<Vec<Comment>>;
	async fn delete_comment(&self, id: Uuid) -> Result<bool>;
}
