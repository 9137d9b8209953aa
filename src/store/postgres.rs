use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{ContentStore, CredentialStore, Order, PoemQuery, Result, SortBy};
use crate::{
	model::{Admin, Comment, Poem},
	Database,
};

/// PostgreSQL-backed implementation of both store contracts.
#[derive(Clone)]
pub struct PgStore {
	database: Database,
}

impl PgStore {
	pub fn new(database: Database) -> Self {
		Self { database }
	}

	/// Connects to the database and applies pending migrations.
	pub async fn connect(url: &str) -> Result<Self> {
		let database = PgPoolOptions::new()
			.max_connections(10)
			.connect(url)
			.await?;

		sqlx::migrate!("./migrations").run(&database).await?;

		Ok(Self::new(database))
	}
}

#[async_trait]
impl CredentialStore for PgStore {
	async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>> {
		let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admin WHERE id = $1")
			.bind(id)
			.fetch_optional(&self.database)
			.await?;

		Ok(admin)
	}

	async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>> {
		let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admin WHERE email = $1")
			.bind(email)
			.fetch_optional(&self.database)
			.await?;

		Ok(admin)
	}

	async fn insert_admin(&self, admin: &Admin) -> Result<bool> {
		let status = sqlx::query(
			r#"
				INSERT INTO admin (id, email, password, created_at)
				VALUES ($1, $2, $3, $4)
				ON CONFLICT (email) DO NOTHING
			"#,
		)
		.bind(admin.id)
		.bind(&admin.email)
		.bind(&admin.password)
		.bind(admin.created_at)
		.execute(&self.database)
		.await?;

		Ok(status.rows_affected() == 1)
	}
}

#[async_trait]
impl ContentStore for PgStore {
	async fn insert_poem(&self, poem: &Poem) -> Result<()> {
		sqlx::query(
			r#"
				INSERT INTO poetry (id, title, content, category, author, status, date, likes, created_at, updated_at)
				VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
			"#,
		)
		.bind(poem.id)
		.bind(&poem.title)
		.bind(&poem.content)
		.bind(poem.category)
		.bind(&poem.author)
		.bind(poem.status)
		.bind(poem.date)
		.bind(poem.likes)
		.bind(poem.created_at)
		.bind(poem.updated_at)
		.execute(&self.database)
		.await?;

		Ok(())
	}

	async fn find_poem(&self, id: Uuid) -> Result<Option<Poem>> {
		let poem = sqlx::query_as::<_, Poem>("SELECT * FROM poetry WHERE id = $1")
			.bind(id)
			.fetch_optional(&self.database)
			.await?;

		Ok(poem)
	}

	async fn list_poems(&self, query: PoemQuery) -> Result<Vec<Poem>> {
		let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM poetry WHERE TRUE");

		if let Some(category) = query.category {
			builder.push(" AND category = ").push_bind(category);
		}

		if let Some(status) = query.status {
			builder.push(" AND status = ").push_bind(status);
		}

		let direction = match query.order {
			Order::Asc => "ASC",
			Order::Desc => "DESC",
		};

		match query.sort_by {
			SortBy::Created => builder.push(format!(" ORDER BY created_at {direction}")),
			SortBy::Category => builder.push(format!(
				" ORDER BY category::text {direction}, created_at DESC"
			)),
		};

		let poems = builder
			.build_query_as::<Poem>()
			.fetch_all(&self.database)
			.await?;

		Ok(poems)
	}

	async fn update_poem(&self, poem: &Poem) -> Result<bool> {
		let status = sqlx::query(
			r#"
				UPDATE poetry
				SET title = $2, content = $3, category = $4, author = $5,
					status = $6, date = $7, updated_at = $8
				WHERE id = $1
			"#,
		)
		.bind(poem.id)
		.bind(&poem.title)
		.bind(&poem.content)
		.bind(poem.category)
		.bind(&poem.author)
		.bind(poem.status)
		.bind(poem.date)
		.bind(poem.updated_at)
		.execute(&self.database)
		.await?;

		Ok(status.rows_affected() == 1)
	}

	async fn delete_poem(&self, id: Uuid) -> Result<bool> {
		let mut tx = self.database.begin().await?;

		sqlx::query("DELETE FROM comment WHERE poetry_id = $1")
			.bind(id)
			.execute(&mut *tx)
			.await?;

		let status = sqlx::query("DELETE FROM poetry WHERE id = $1")
			.bind(id)
			.execute(&mut *tx)
			.await?;

		tx.commit().await?;

		Ok(status.rows_affected() == 1)
	}

	async fn increment_likes(&self, id: Uuid) -> Result<Option<i64>> {
		let likes = sqlx::query_scalar::<_, i64>(
			r#"
				UPDATE poetry SET likes = likes + 1
				WHERE id = $1 AND status = 'approved'
				RETURNING likes
			"#,
		)
		.bind(id)
		.fetch_optional(&self.database)
		.await?;

		Ok(likes)
	}

	async fn insert_comment(&self, comment: &Comment) -> Result<bool> {
		let status = sqlx::query(
			r#"
				INSERT INTO comment (id, poetry_id, text, author, created_at)
				SELECT $1, $2, $3, $4, $5
				WHERE EXISTS (
					SELECT 1 FROM poetry WHERE id = $2 AND status = 'approved'
				)
			"#,
		)
		.bind(comment.id)
		.bind(comment.poetry_id)
		.bind(&comment.text)
		.bind(&comment.author)
		.bind(comment.created_at)
		.execute(&self.database)
		.await?;

		Ok(status.rows_affected() == 1)
	}

	async fn list_comments(&self, poetry_id: Uuid) -> Result<Vec<Comment>> {
		let comments = sqlx::query_as::<_, Comment>(
			r#"
				SELECT * FROM comment
				WHERE poetry_id = $1
				ORDER BY created_at DESC
			"#,
		)
		.bind(poetry_id)
		.fetch_all(&self.database)
		.await?;

		Ok(comments)
	}

	async fn delete_comment(&self, id: Uuid) -> Result<bool> {
		let status = sqlx::query("DELETE FROM comment WHERE id = $1")
			.bind(id)
			.execute(&self.database)
			.await?;

		Ok(status.rows_affected() == 1)
	}
}
