use axum::extract::State;
use macros::route;

use crate::{
	extract::{Created, Json, Path, Session},
	gallery,
	moderation::Moderator,
	openapi::tag,
	route::model::poems,
	store::Content,
};

use super::model;

/// List poems of a category
/// Returns the approved poems of a category, newest first. The category is case-insensitive.
#[route(tag = tag::POETRY, response(status = 400, description = "Invalid category."))]
pub async fn list_poems(
	State(content): State<Content>,
	axum::extract::Path(category): axum::extract::Path<String>,
) -> Result<Json<Vec<model::Poem>>, crate::Error> {
	let found = gallery::list_by_category(&*content, &category).await?;

	Ok(Json(poems(found)))
}

/// Like poem
/// Adds one like to an approved poem and returns the new count.
#[route(tag = tag::POETRY, response(status = 404, description = "Poetry not found or not approved."))]
pub async fn like_poem(
	State(content): State<Content>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Likes>, crate::Error> {
	let likes = gallery::like(&*content, path.id).await?;

	Ok(Json(model::Likes { likes }))
}

/// Submit poem
/// Creates a poem in pending status, it becomes public once approved.
#[route(tag = tag::POETRY, tag = tag::ADMIN, response(status = 401, description = "Missing, invalid or expired token."))]
pub async fn submit_poem(
	State(content): State<Content>,
	session: Session,
	Json(input): Json<model::SubmitPoemInput>,
) -> Result<Created<model::Poem>, crate::Error> {
	let poem = Moderator::new(&*content, &session.admin)
		.submit(input.into_draft()?)
		.await?;

	Ok(Created(poem.into()))
}
