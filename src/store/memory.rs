use std::{cmp::Reverse, collections::HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ContentStore, CredentialStore, Order, PoemQuery, Result, SortBy};
use crate::model::{Admin, Comment, Poem};

#[derive(Default)]
struct Tables {
	admins: HashMap<Uuid, Admin>,
	poems: HashMap<Uuid, Poem>,
	comments: HashMap<Uuid, Comment>,
}

/// In-process store with the same semantics as the PostgreSQL one.
#[derive(Default)]
pub struct MemoryStore {
	tables: RwLock<Tables>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn comment_count(&self, poetry_id: Uuid) -> usize {
		self.tables
			.read()
			.await
			.comments
			.values()
			.filter(|comment| comment.poetry_id == poetry_id)
			.count()
	}

	pub async fn remove_admin(&self, id: Uuid) {
		self.tables.write().await.admins.remove(&id);
	}
}

#[async_trait]
impl CredentialStore for MemoryStore {
	async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>> {
		Ok(self.tables.read().await.admins.get(&id).cloned())
	}

	async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>> {
		let tables = self.tables.read().await;

		Ok(tables
			.admins
			.values()
			.find(|admin| admin.email == email)
			.cloned())
	}

	async fn insert_admin(&self, admin: &Admin) -> Result<bool> {
		let mut tables = self.tables.write().await;

		if tables.admins.values().any(|other| other.email == admin.email) {
			return Ok(false);
		}

		tables.admins.insert(admin.id, admin.clone());
		Ok(true)
	}
}

#[async_trait]
impl ContentStore for MemoryStore {
	async fn insert_poem(&self, poem: &Poem) -> Result<()> {
		self.tables.write().await.poems.insert(poem.id, poem.clone());
		Ok(())
	}

	async fn find_poem(&self, id: Uuid) -> Result<Option<Poem>> {
		Ok(self.tables.read().await.poems.get(&id).cloned())
	}

	async fn list_poems(&self, query: PoemQuery) -> Result<Vec<Poem>> {
		let tables = self.tables.read().await;
		let mut poems = tables
			.poems
			.values()
			.filter(|poem| query.category.map_or(true, |category| poem.category == category))
			.filter(|poem| query.status.map_or(true, |status| poem.status == status))
			.cloned()
			.collect::<Vec<_>>();

		match (query.sort_by, query.order) {
			(SortBy::Created, Order::Asc) => poems.sort_by_key(|poem| poem.created_at),
			(SortBy::Created, Order::Desc) => poems.sort_by_key(|poem| Reverse(poem.created_at)),
			(SortBy::Category, Order::Asc) => {
				poems.sort_by_key(|poem| (poem.category.as_str(), Reverse(poem.created_at)));
			}
			(SortBy::Category, Order::Desc) => {
				poems.sort_by_key(|poem| (Reverse(poem.category.as_str()), Reverse(poem.created_at)));
			}
		}

		Ok(poems)
	}

	async fn update_poem(&self, poem: &Poem) -> Result<bool> {
		let mut tables = self.tables.write().await;
		let Some(stored) = tables.poems.get_mut(&poem.id) else {
			return Ok(false);
		};

		*stored = Poem {
			likes: stored.likes,
			created_at: stored.created_at,
			..poem.clone()
		};

		Ok(true)
	}

	async fn delete_poem(&self, id: Uuid) -> Result<bool> {
		let mut tables = self.tables.write().await;

		tables.comments.retain(|_, comment| comment.poetry_id != id);
		Ok(tables.poems.remove(&id).is_some())
	}

	async fn increment_likes(&self, id: Uuid) -> Result<Option<i64>> {
		let mut tables = self.tables.write().await;

		Ok(tables
			.poems
			.get_mut(&id)
			.filter(|poem| poem.status.is_approved())
			.map(|poem| {
				poem.likes += 1;
				poem.likes
			}))
	}

	async fn insert_comment(&self, comment: &Comment) -> Result<bool> {
		let mut tables = self.tables.write().await;
		let visible = tables
			.poems
			.get(&comment.poetry_id)
			.is_some_and(|poem| poem.status.is_approved());

		if visible {
			tables.comments.insert(comment.id, comment.clone());
		}

		Ok(visible)
	}

	async fn list_comments(&self, poetry_id: Uuid) -> Result<Vec<Comment>> {
		let tables = self.tables.read().await;
		let mut comments = tables
			.comments
			.values()
			.filter(|comment| comment.poetry_id == poetry_id)
			.cloned()
			.collect::<Vec<_>>();

		comments.sort_by_key(|comment| Reverse(comment.created_at));
		Ok(comments)
	}

	async fn delete_comment(&self, id: Uuid) -> Result<bool> {
		Ok(self.tables.write().await.comments.remove(&id).is_some())
	}
}
