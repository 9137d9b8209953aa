//! Public reads and interactions. Only approved poems are visible here.
//!
//! Likes are not deduplicated per reader. Clients remember what they liked
//! locally, the server counts every request.

use chrono::Utc;
use uuid::Uuid;

use crate::{
	model::{or_default_author, Category, Comment, Poem, DEFAULT_COMMENT_AUTHOR},
	store::{self, ContentStore, PoemQuery},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid category")]
	InvalidCategory(String),
	#[error("Poetry not found or not approved")]
	UnknownPoem(Uuid),
	#[error("Comment text cannot be empty")]
	EmptyComment,
	#[error(transparent)]
	Store(#[from] store::Error),
}

/// A reader comment that has passed boundary validation.
#[derive(Debug, Clone)]
pub struct NewComment {
	pub poetry_id: Uuid,
	pub text: String,
	pub author: Option<String>,
}

/// Approved poems of a category, newest first.
pub async fn list_by_category(store: &dyn ContentStore, category: &str) -> Result<Vec<Poem>, Error> {
	let category = category
		.parse::<Category>()
		.map_err(|_| Error::InvalidCategory(category.to_owned()))?;

	Ok(store.list_poems(PoemQuery::visible(category)).await?)
}

/// Adds one like, returning the new count.
pub async fn like(store: &dyn ContentStore, id: Uuid) -> Result<i64, Error> {
	store
		.increment_likes(id)
		.await?
		.ok_or(Error::UnknownPoem(id))
}

pub async fn add_comment(store: &dyn ContentStore, input: NewComment) -> Result<Comment, Error> {
	let text = input.text.trim();

	if text.is_empty() {
		return Err(Error::EmptyComment);
	}

	let comment = Comment {
		id: Uuid::new_v4(),
		poetry_id: input.poetry_id,
		text: text.to_owned(),
		author: or_default_author(input.author.as_deref(), DEFAULT_COMMENT_AUTHOR),
		created_at: Utc::now(),
	};

	if !store.insert_comment(&comment).await? {
		return Err(Error::UnknownPoem(input.poetry_id));
	}

	Ok(comment)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{model::Status, store::memory::MemoryStore};

	async fn poem(store: &MemoryStore, category: Category, status: Status) -> Poem {
		let now = Utc::now();
		let poem = Poem {
			id: Uuid::new_v4(),
			title: "Rain".into(),
			content: "grey clouds, grey streets".into(),
			category,
			author: "Manav".into(),
			status,
			date: now,
			likes: 0,
			created_at: now,
			updated_at: now,
		};

		store.insert_poem(&poem).await.unwrap();
		poem
	}

	fn comment(poetry_id: Uuid, text: &str) -> NewComment {
		NewComment {
			poetry_id,
			text: text.into(),
			author: None,
		}
	}

	#[tokio::test]
	async fn test_list_only_shows_approved_poems_newest_first() {
		let store = MemoryStore::new();
		let older = poem(&store, Category::Sad, Status::Approved).await;
		poem(&store, Category::Sad, Status::Pending).await;
		poem(&store, Category::Sad, Status::Rejected).await;
		poem(&store, Category::Love, Status::Approved).await;
		let newer = poem(&store, Category::Sad, Status::Approved).await;

		let poems = list_by_category(&store, "SAD").await.unwrap();
		let ids = poems.iter().map(|poem| poem.id).collect::<Vec<_>>();

		assert_eq!(ids, vec![newer.id, older.id]);
		assert!(poems.iter().all(|poem| poem.status.is_approved()));
	}

	#[tokio::test]
	async fn test_list_rejects_unknown_category() {
		let store = MemoryStore::new();

		for category in ["happy", "invalidcat", ""] {
			assert!(matches!(
				list_by_category(&store, category).await,
				Err(Error::InvalidCategory(..))
			));
		}
	}

	#[tokio::test]
	async fn test_likes_accumulate() {
		let store = MemoryStore::new();
		let poem = poem(&store, Category::Romantic, Status::Approved).await;

		for expected in 1..=3 {
			assert_eq!(like(&store, poem.id).await.unwrap(), expected);
		}

		assert_eq!(store.find_poem(poem.id).await.unwrap().unwrap().likes, 3);
	}

	#[tokio::test]
	async fn test_hidden_poems_cannot_be_liked() {
		let store = MemoryStore::new();
		let pending = poem(&store, Category::Romantic, Status::Pending).await;

		assert!(matches!(like(&store, pending.id).await, Err(Error::UnknownPoem(..))));
		assert!(matches!(
			like(&store, Uuid::new_v4()).await,
			Err(Error::UnknownPoem(..))
		));
		assert_eq!(store.find_poem(pending.id).await.unwrap().unwrap().likes, 0);
	}

	#[tokio::test]
	async fn test_comments_require_an_approved_poem() {
		let store = MemoryStore::new();

		for status in [Status::Pending, Status::Rejected] {
			let hidden = poem(&store, Category::Mother, status).await;

			assert!(matches!(
				add_comment(&store, comment(hidden.id, "lovely")).await,
				Err(Error::UnknownPoem(..))
			));
			assert_eq!(store.comment_count(hidden.id).await, 0);
		}

		assert!(matches!(
			add_comment(&store, comment(Uuid::new_v4(), "lovely")).await,
			Err(Error::UnknownPoem(..))
		));
	}

	#[tokio::test]
	async fn test_comment_is_trimmed_and_defaults_author() {
		let store = MemoryStore::new();
		let poem = poem(&store, Category::Mother, Status::Approved).await;

		let created = add_comment(&store, comment(poem.id, "  so true  ")).await.unwrap();

		assert_eq!(created.text, "so true");
		assert_eq!(created.author, "Anonymous");
		assert_eq!(store.list_comments(poem.id).await.unwrap(), vec![created]);
	}

	#[tokio::test]
	async fn test_blank_comment_is_rejected() {
		let store = MemoryStore::new();
		let poem = poem(&store, Category::Mother, Status::Approved).await;

		assert!(matches!(
			add_comment(&store, comment(poem.id, "   ")).await,
			Err(Error::EmptyComment)
		));
	}
}
