use axum::extract::State;
use macros::route;

use crate::{
	extract::{Created, Json},
	gallery,
	openapi::tag,
	store::Content,
};

use super::model;

/// Comment on a poem
/// Anyone may comment on an approved poem, the author defaults to "Anonymous".
#[route(tag = tag::COMMENT, response(status = 404, description = "Poetry not found or not approved."))]
pub async fn create_comment(
	State(content): State<Content>,
	Json(input): Json<model::CreateCommentInput>,
) -> Result<Created<model::Comment>, crate::Error> {
	let comment = gallery::add_comment(&*content, input.into()).await?;

	Ok(Created(comment))
}
