use axum::extract::State;
use macros::route;

use crate::{
	extract::{Created, Json, Path, Query, Session},
	model::Status,
	moderation::Moderator,
	openapi::tag,
	route::model::poems,
	store::{Content, ContentStore, PoemQuery},
};

use super::model;

/// Add poem
/// Publishes a poem right away, it is approved on creation.
#[route(tag = tag::ADMIN, response(status = 401, description = "Missing, invalid or expired token."))]
pub async fn add_poem(
	State(content): State<Content>,
	session: Session,
	Json(input): Json<model::AddPoemInput>,
) -> Result<Created<model::Poem>, crate::Error> {
	let poem = Moderator::new(&*content, &session.admin)
		.publish(input.into_draft()?)
		.await?;

	Ok(Created(poem.into()))
}

/// List all poems
/// Every poem regardless of status. Sorted by date (newest first) unless `sortBy` and `order` say otherwise.
#[route(tag = tag::ADMIN)]
pub async fn list_all_poems(
	State(content): State<Content>,
	_session: Session,
	Query(query): Query<model::ListPoemsQuery>,
) -> Result<Json<Vec<model::Poem>>, crate::Error> {
	let Some(query) = query.to_query() else {
		return Ok(Json(Vec::new()));
	};

	Ok(Json(poems(content.list_poems(query).await?)))
}

/// List pending poems
#[route(tag = tag::ADMIN)]
pub async fn list_pending_poems(
	State(content): State<Content>,
	_session: Session,
) -> Result<Json<Vec<model::Poem>>, crate::Error> {
	let pending = content
		.list_poems(PoemQuery::with_status(Status::Pending))
		.await?;

	Ok(Json(poems(pending)))
}

/// Edit poem
/// Updates the given fields. The moderation status is not affected.
#[route(tag = tag::ADMIN, response(status = 404, description = "Poetry not found."))]
pub async fn edit_poem(
	State(content): State<Content>,
	session: Session,
	Path(path): Path<model::IdInput>,
	Json(input): Json<model::EditPoemInput>,
) -> Result<Json<model::Poem>, crate::Error> {
	let poem = Moderator::new(&*content, &session.admin)
		.edit(path.id, input.into())
		.await?;

	Ok(Json(poem.into()))
}

/// Delete poem
/// Deletes the poem and all of its comments.
#[route(tag = tag::ADMIN, response(status = 404, description = "Poetry not found."))]
pub async fn delete_poem(
	State(content): State<Content>,
	session: Session,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Confirmation>, crate::Error> {
	Moderator::new(&*content, &session.admin)
		.delete(path.id)
		.await?;

	Ok(Json(model::Confirmation::new("Poetry deleted successfully")))
}

/// Approve poem
/// Makes the poem public. Approving an approved poem changes nothing.
#[route(tag = tag::ADMIN, response(status = 404, description = "Poetry not found."))]
pub async fn approve_poem(
	State(content): State<Content>,
	session: Session,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Poem>, crate::Error> {
	let poem = Moderator::new(&*content, &session.admin)
		.approve(path.id)
		.await?;

	Ok(Json(poem.into()))
}

/// Reject poem
/// Hides the poem from readers, including a previously approved one.
#[route(tag = tag::ADMIN, response(status = 404, description = "Poetry not found."))]
pub async fn reject_poem(
	State(content): State<Content>,
	session: Session,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Poem>, crate::Error> {
	let poem = Moderator::new(&*content, &session.admin)
		.reject(path.id)
		.await?;

	Ok(Json(poem.into()))
}

/// List comments of a poem
/// Newest first.
#[route(tag = tag::ADMIN, tag = tag::COMMENT)]
pub async fn list_comments(
	State(content): State<Content>,
	_session: Session,
	Path(path): Path<model::IdInput>,
) -> Result<Json<Vec<crate::model::Comment>>, crate::Error> {
	Ok(Json(content.list_comments(path.id).await?))
}

/// Delete comment
#[route(tag = tag::ADMIN, tag = tag::COMMENT, response(status = 404, description = "Comment not found."))]
pub async fn delete_comment(
	State(content): State<Content>,
	session: Session,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Confirmation>, crate::Error> {
	Moderator::new(&*content, &session.admin)
		.delete_comment(path.id)
		.await?;

	Ok(Json(model::Confirmation::new("Comment deleted successfully")))
}
