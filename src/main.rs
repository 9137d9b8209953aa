#![warn(clippy::pedantic)]

mod config;
mod error;
mod extract;
mod gallery;
mod model;
mod moderation;
mod openapi;
mod password;
mod route;
mod seed;
mod store;
mod token;
mod trace;

use std::{process::ExitCode, sync::Arc};

use aide::{axum::ApiRouter, openapi::OpenApi};
use argon2::Argon2;
use axum::{body::Body, http::Request, Extension, Router};
use tower::ServiceBuilder;
use tower_http::{
	cors::CorsLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};

use crate::{
	config::Config,
	store::{postgres::PgStore, Content, Credentials},
	token::TokenIssuer,
};

pub use error::Error;

pub type Database = sqlx::Pool<sqlx::Postgres>;
pub type AppState = State;

/// The shared application state.
///
/// Stores are trait objects so the router can be built over PostgreSQL
/// or, in tests, over the in-memory store.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub content: Content,
	pub credentials: Credentials,
	pub hasher: Argon2<'static>,
	pub tokens: TokenIssuer,
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
	#[error(transparent)]
	Store(#[from] store::Error),
	#[error("failed to seed the administrator: {0}")]
	Seed(#[from] seed::Error),
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}

/// Builds the complete router, including the generated `OpenAPI` document.
pub fn app(state: State) -> Router {
	let mut api = OpenApi::default();

	ApiRouter::new()
		.nest("/api/auth", route::auth::routes())
		.nest("/api/poetry", route::poetry::routes())
		.nest("/api/comments", route::comment::routes())
		.nest("/api/admin", route::admin::routes())
		.nest("/docs", route::docs::routes())
		.finish_api_with(&mut api, openapi::docs)
		.layer(Extension(Arc::new(api)))
		.layer(
			ServiceBuilder::new()
				.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
				.layer(
					TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
						let request_id = request
							.headers()
							.get("x-request-id")
							.and_then(|value| value.to_str().ok())
							.unwrap_or_default();

						tracing::info_span!(
							"request",
							method = %request.method(),
							uri = %request.uri(),
							request_id
						)
					}),
				)
				.layer(PropagateRequestIdLayer::x_request_id())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

async fn serve(config: Config) -> Result<(), StartupError> {
	let store = Arc::new(PgStore::connect(&config.database_url).await?);
	let hasher = Argon2::default();

	tracing::info!("connected to database");

	let admin = seed::ensure_admin(&*store, &hasher, &config.seed).await?;

	tracing::info!(email = %admin.email, "administrator ready");

	let state = State {
		content: store.clone(),
		credentials: store,
		hasher,
		tokens: TokenIssuer::new(config.jwt_secret.as_bytes()),
	};

	let listener = tokio::net::TcpListener::bind((config.host, config.port)).await?;

	tracing::info!(address = %listener.local_addr()?, "listening");

	axum::serve(listener, app(state)).await?;

	Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
	dotenvy::dotenv().ok();

	let config = match Config::from_env() {
		Ok(config) => config,
		Err(error) => {
			eprintln!("invalid configuration: {error}");
			return ExitCode::FAILURE;
		}
	};

	let _guard = match trace::init(config.otlp_endpoint.as_deref()) {
		Ok(guard) => guard,
		Err(error) => {
			eprintln!("failed to initialize tracing: {error}");
			return ExitCode::FAILURE;
		}
	};

	for key in config.insecure_defaults() {
		tracing::warn!(key, "using the built-in default, set it before deploying");
	}

	match serve(config).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(error) => {
			tracing::error!(%error, "server stopped");
			ExitCode::FAILURE
		}
	}
}
