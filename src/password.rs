use argon2::Argon2;
use uuid::Uuid;

pub const KEY_LENGTH: usize = 32;

/// Hashes a password with Argon2, using the admin's id as the salt.
pub fn hash_password(
	hasher: &Argon2,
	password: &str,
	id: &Uuid,
) -> Result<[u8; KEY_LENGTH], argon2::Error> {
	let mut hash = [0; KEY_LENGTH];

	hasher.hash_password_into(password.as_bytes(), id.as_bytes(), &mut hash)?;
	Ok(hash)
}

/// Re-hashes `password` and compares it with the stored hash.
pub fn verify_password(
	hasher: &Argon2,
	password: &str,
	id: &Uuid,
	stored: &[u8],
) -> Result<bool, argon2::Error> {
	Ok(hash_password(hasher, password, id)?.as_slice() == stored)
}
