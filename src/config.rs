use std::{net::IpAddr, str::FromStr, time::Duration};

use crate::model::normalize_email;

const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-this-in-production";
const DEFAULT_ADMIN_EMAIL: &str = "manavdiary@001.com";
const DEFAULT_ADMIN_PASSWORD: &str = "manav@123";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{0} must be set")]
	Missing(&'static str),
	#[error("{key} has an invalid value {value:?}")]
	Invalid { key: &'static str, value: String },
}

/// Settings for the administrator created at startup.
#[derive(Debug, Clone)]
pub struct SeedConfig {
	pub email: String,
	pub password: String,
	pub attempts: u32,
	pub delay: Duration,
}

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
	pub database_url: String,
	pub jwt_secret: String,
	pub host: IpAddr,
	pub port: u16,
	pub seed: SeedConfig,
	pub otlp_endpoint: Option<String>,
}

impl Config {
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		let database_url = lookup("DATABASE_URL")
			.filter(|url| !url.trim().is_empty())
			.ok_or(Error::Missing("DATABASE_URL"))?;

		Ok(Self {
			database_url,
			jwt_secret: lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.into()),
			host: parse(&lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?,
			port: parse(&lookup, "PORT", 5000)?,
			seed: SeedConfig {
				email: normalize_email(
					&lookup("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.into()),
				),
				password: lookup("ADMIN_PASSWORD").unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.into()),
				attempts: parse::<u32>(&lookup, "ADMIN_SEED_ATTEMPTS", 10)?.max(1),
				delay: Duration::from_millis(parse(&lookup, "ADMIN_SEED_DELAY_MS", 3000)?),
			},
			otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|url| !url.is_empty()),
		})
	}

	/// Names of the secrets still set to their public built-in defaults.
	pub fn insecure_defaults(&self) -> Vec<&'static str> {
		let mut defaults = Vec::new();

		if self.jwt_secret == DEFAULT_JWT_SECRET {
			defaults.push("JWT_SECRET");
		}

		if self.seed.password == DEFAULT_ADMIN_PASSWORD {
			defaults.push("ADMIN_PASSWORD");
		}

		defaults
	}
}

fn parse<T: FromStr>(
	lookup: &impl Fn(&str) -> Option<String>,
	key: &'static str,
	default: T,
) -> Result<T, Error> {
	match lookup(key) {
		Some(value) => value
			.trim()
			.parse()
			.map_err(|_| Error::Invalid { key, value }),
		None => Ok(default),
	}
}

#[cfg(test)]
mod test {
	use std::collections::HashMap;

	use super::*;

	fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
		let vars = vars
			.iter()
			.map(|(key, value)| (key.to_string(), value.to_string()))
			.collect::<HashMap<_, _>>();

		Config::from_lookup(|key| vars.get(key).cloned())
	}

	#[test]
	fn test_database_url_is_required() {
		assert!(matches!(config(&[]), Err(Error::Missing("DATABASE_URL"))));
		assert!(matches!(
			config(&[("DATABASE_URL", " ")]),
			Err(Error::Missing("DATABASE_URL"))
		));
	}

	#[test]
	fn test_defaults() {
		let config = config(&[("DATABASE_URL", "postgres://localhost/poetry")]).unwrap();

		assert_eq!(config.port, 5000);
		assert_eq!(config.jwt_secret, DEFAULT_JWT_SECRET);
		assert_eq!(config.seed.email, DEFAULT_ADMIN_EMAIL);
		assert_eq!(config.seed.attempts, 10);
		assert_eq!(config.seed.delay, Duration::from_secs(3));
		assert!(config.otlp_endpoint.is_none());
		assert_eq!(config.insecure_defaults(), vec!["JWT_SECRET", "ADMIN_PASSWORD"]);
	}

	#[test]
	fn test_overrides() {
		let config = config(&[
			("DATABASE_URL", "postgres://localhost/poetry"),
			("PORT", "8080"),
			("JWT_SECRET", "hunter2"),
			("ADMIN_EMAIL", "  Poet@Example.com"),
			("ADMIN_SEED_ATTEMPTS", "0"),
		])
		.unwrap();

		assert_eq!(config.port, 8080);
		assert_eq!(config.jwt_secret, "hunter2");
		assert_eq!(config.seed.email, "poet@example.com");
		assert_eq!(config.seed.attempts, 1);
		assert_eq!(config.insecure_defaults(), vec!["ADMIN_PASSWORD"]);
	}

	#[test]
	fn test_invalid_port() {
		assert!(matches!(
			config(&[("DATABASE_URL", "postgres://localhost/poetry"), ("PORT", "http")]),
			Err(Error::Invalid { key: "PORT", .. })
		));
	}
}
