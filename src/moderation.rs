//! The moderation state machine for poems.
//!
//! ```text
//!            approve                reject
//! pending ───────────▶ approved ◀──────────▶ rejected
//!    │                    approve               ▲
//!    └──────────────────────────────────────────┘
//!                        reject
//! ```
//!
//! Nothing returns to `pending`. Every operation takes the verified [`Admin`]
//! principal, so it can only be reached through a checked bearer token.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
	model::{or_default_author, Admin, Category, Poem, Status, DEFAULT_POEM_AUTHOR},
	store::{self, ContentStore},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Poetry not found")]
	UnknownPoem(Uuid),
	#[error("Comment not found")]
	UnknownComment(Uuid),
	#[error(transparent)]
	Store(#[from] store::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	Approve,
	Reject,
}

impl Status {
	/// The status after applying `action`. Repeating an action is a no-op.
	pub fn apply(self, action: Action) -> Status {
		match action {
			Action::Approve => Status::Approved,
			Action::Reject => Status::Rejected,
		}
	}
}

/// A validated poem that has not been stored yet.
#[derive(Debug, Clone)]
pub struct Draft {
	pub title: String,
	pub content: String,
	pub category: Category,
	pub author: Option<String>,
	pub date: Option<DateTime<Utc>>,
}

impl Draft {
	fn into_poem(self, status: Status) -> Poem {
		let now = Utc::now();

		Poem {
			id: Uuid::new_v4(),
			title: self.title.trim().to_owned(),
			content: self.content,
			category: self.category,
			author: or_default_author(self.author.as_deref(), DEFAULT_POEM_AUTHOR),
			status,
			date: self.date.unwrap_or(now),
			likes: 0,
			created_at: now,
			updated_at: now,
		}
	}
}

/// Field changes for an edit. Missing and blank values leave the field untouched.
///
/// `category` is kept raw: a value outside the fixed set is ignored rather than rejected.
#[derive(Debug, Clone, Default)]
pub struct Patch {
	pub title: Option<String>,
	pub content: Option<String>,
	pub category: Option<String>,
	pub author: Option<String>,
	pub date: Option<DateTime<Utc>>,
}

fn present(value: Option<String>) -> Option<String> {
	value.filter(|value| !value.trim().is_empty())
}

impl Patch {
	/// Applies the patch in place. The status is never changed.
	pub fn apply(self, poem: &mut Poem) {
		if let Some(title) = present(self.title) {
			poem.title = title.trim().to_owned();
		}

		if let Some(content) = present(self.content) {
			poem.content = content;
		}

		if let Some(category) = present(self.category) {
			match category.parse::<Category>() {
				Ok(category) => poem.category = category,
				Err(error) => tracing::warn!(poem = %poem.id, %error, "ignoring category change"),
			}
		}

		if let Some(author) = present(self.author) {
			poem.author = author.trim().to_owned();
		}

		if let Some(date) = self.date {
			poem.date = date;
		}
	}
}

/// Mutating operations on poems and comments, performed on behalf of an admin.
pub struct Moderator<'a> {
	store: &'a dyn ContentStore,
	admin: &'a Admin,
}

impl<'a> Moderator<'a> {
	pub fn new(store: &'a dyn ContentStore, admin: &'a Admin) -> Self {
		Self { store, admin }
	}

	/// Stores a poem written by the admin. It is approved immediately.
	pub async fn publish(&self, draft: Draft) -> Result<Poem, Error> {
		self.create(draft, Status::Approved).await
	}

	/// Stores a poem that still has to go through review.
	pub async fn submit(&self, draft: Draft) -> Result<Poem, Error> {
		self.create(draft, Status::Pending).await
	}

	async fn create(&self, draft: Draft, status: Status) -> Result<Poem, Error> {
		let poem = draft.into_poem(status);

		self.store.insert_poem(&poem).await?;
		tracing::info!(admin = %self.admin.email, poem = %poem.id, status = status.as_str(), "poem created");

		Ok(poem)
	}

	pub async fn approve(&self, id: Uuid) -> Result<Poem, Error> {
		self.transition(id, Action::Approve).await
	}

	pub async fn reject(&self, id: Uuid) -> Result<Poem, Error> {
		self.transition(id, Action::Reject).await
	}

	async fn transition(&self, id: Uuid, action: Action) -> Result<Poem, Error> {
		let mut poem = self.find(id).await?;
		let from = poem.status;

		poem.status = from.apply(action);

		if poem.status == from {
			return Ok(poem);
		}

		poem.updated_at = Utc::now();
		self.save(&poem).await?;

		tracing::info!(
			admin = %self.admin.email,
			poem = %id,
			from = from.as_str(),
			to = poem.status.as_str(),
			"poem moderated"
		);

		Ok(poem)
	}

	pub async fn edit(&self, id: Uuid, patch: Patch) -> Result<Poem, Error> {
		let mut poem = self.find(id).await?;

		patch.apply(&mut poem);
		poem.updated_at = Utc::now();
		self.save(&poem).await?;

		tracing::info!(admin = %self.admin.email, poem = %id, "poem edited");

		Ok(poem)
	}

	/// Removes the poem and every comment on it.
	pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
		if !self.store.delete_poem(id).await? {
			return Err(Error::UnknownPoem(id));
		}

		tracing::info!(admin = %self.admin.email, poem = %id, "poem deleted");
		Ok(())
	}

	pub async fn delete_comment(&self, id: Uuid) -> Result<(), Error> {
		if !self.store.delete_comment(id).await? {
			return Err(Error::UnknownComment(id));
		}

		tracing::info!(admin = %self.admin.email, comment = %id, "comment deleted");
		Ok(())
	}

	async fn find(&self, id: Uuid) -> Result<Poem, Error> {
		self.store
			.find_poem(id)
			.await?
			.ok_or(Error::UnknownPoem(id))
	}

	async fn save(&self, poem: &Poem) -> Result<(), Error> {
		if !self.store.update_poem(poem).await? {
			return Err(Error::UnknownPoem(poem.id));
		}

		Ok(())
	}
}
