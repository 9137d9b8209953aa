use argon2::Argon2;
use chrono::Utc;
use uuid::Uuid;

use crate::{
	config::SeedConfig,
	model::Admin,
	password::hash_password,
	store::{self, CredentialStore},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("password hashing failed: {0}")]
	Argon(#[from] argon2::Error),
	#[error("gave up after {attempts} attempts: {last}")]
	Exhausted { attempts: u32, last: store::Error },
}

/// Makes sure the configured administrator exists, creating it if needed.
///
/// Running it again is a no-op. Store failures are retried with a fixed delay,
/// up to `config.attempts` times.
pub async fn ensure_admin(
	store: &dyn CredentialStore,
	hasher: &Argon2<'_>,
	config: &SeedConfig,
) -> Result<Admin, Error> {
	let mut attempt = 1;

	loop {
		match try_ensure_admin(store, hasher, config).await {
			Ok(admin) => return Ok(admin),
			Err(AttemptError::Argon(error)) => return Err(error.into()),
			Err(AttemptError::Store(last)) if attempt >= config.attempts => {
				return Err(Error::Exhausted {
					attempts: attempt,
					last,
				});
			}
			Err(AttemptError::Store(error)) => {
				tracing::warn!(
					%error,
					attempt,
					max = config.attempts,
					"admin seeding failed, retrying in {:?}",
					config.delay
				);

				tokio::time::sleep(config.delay).await;
				attempt += 1;
			}
		}
	}
}

#[derive(Debug, thiserror::Error)]
enum AttemptError {
	#[error(transparent)]
	Store(#[from] store::Error),
	#[error(transparent)]
	Argon(#[from] argon2::Error),
}

async fn try_ensure_admin(
	store: &dyn CredentialStore,
	hasher: &Argon2<'_>,
	config: &SeedConfig,
) -> Result<Admin, AttemptError> {
	if let Some(admin) = store.find_admin_by_email(&config.email).await? {
		tracing::info!(email = %admin.email, "admin already exists");
		return Ok(admin);
	}

	let id = Uuid::new_v4();
	let admin = Admin {
		id,
		email: config.email.clone(),
		password: hash_password(hasher, &config.password, &id)?.to_vec(),
		created_at: Utc::now(),
	};

	if store.insert_admin(&admin).await? {
		tracing::info!(email = %admin.email, "admin created");
		return Ok(admin);
	}

	// Inserted concurrently by another instance.
	store
		.find_admin_by_email(&config.email)
		.await?
		.ok_or_else(|| store::Error::Database(sqlx::Error::RowNotFound).into())
}

#[cfg(test)]
mod test {
	use std::{
		sync::atomic::{AtomicU32, Ordering},
		time::Duration,
	};

	use async_trait::async_trait;

	use super::*;
	use crate::{
		password::verify_password,
		store::{memory::MemoryStore, Result},
		test::hasher,
	};

	fn config(attempts: u32) -> SeedConfig {
		SeedConfig {
			email: "admin@example.com".into(),
			password: "manav@123".into(),
			attempts,
			delay: Duration::ZERO,
		}
	}

	/// Fails the first `failures` lookups, then behaves like the memory store.
	struct Flaky {
		failures: u32,
		calls: AtomicU32,
		inner: MemoryStore,
	}

	impl Flaky {
		fn new(failures: u32) -> Self {
			Self {
				failures,
				calls: AtomicU32::new(0),
				inner: MemoryStore::new(),
			}
		}
	}

	#[async_trait]
	impl CredentialStore for Flaky {
		async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>> {
			self.inner.find_admin(id).await
		}

		async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>> {
			if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
				return Err(sqlx::Error::PoolTimedOut.into());
			}

			self.inner.find_admin_by_email(email).await
		}

		async fn insert_admin(&self, admin: &Admin) -> Result<bool> {
			self.inner.insert_admin(admin).await
		}
	}

	#[tokio::test]
	async fn test_seeding_is_idempotent() {
		let store = MemoryStore::new();
		let hasher = hasher();

		let first = ensure_admin(&store, &hasher, &config(1)).await.unwrap();
		let second = ensure_admin(&store, &hasher, &config(1)).await.unwrap();

		assert_eq!(first.id, second.id);
		assert!(verify_password(&hasher, "manav@123", &first.id, &first.password).unwrap());
	}

	#[tokio::test]
	async fn test_transient_failures_are_retried() {
		let store = Flaky::new(2);

		let admin = ensure_admin(&store, &hasher(), &config(3)).await.unwrap();

		assert_eq!(admin.email, "admin@example.com");
		assert_eq!(store.calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test]
	async fn test_retries_are_bounded() {
		let store = Flaky::new(u32::MAX);

		let error = ensure_admin(&store, &hasher(), &config(3)).await.unwrap_err();

		assert!(matches!(error, Error::Exhausted { attempts: 3, .. }));
		assert_eq!(store.calls.load(Ordering::SeqCst), 3);
	}
}
