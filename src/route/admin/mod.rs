use aide::axum::{
	routing::{delete_with, get_with, post_with, put_with},
	ApiRouter,
};

use crate::AppState;

pub mod model;
pub mod route;

/// The moderation dashboard. Every route needs a bearer token.
pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route("/add-poetry", post_with(add_poem, add_poem_docs))
		.api_route("/all-poetry", get_with(list_all_poems, list_all_poems_docs))
		.api_route(
			"/pending-poetry",
			get_with(list_pending_poems, list_pending_poems_docs),
		)
		.api_route("/edit-poetry/:id", put_with(edit_poem, edit_poem_docs))
		.api_route("/delete-poetry/:id", delete_with(delete_poem, delete_poem_docs))
		.api_route("/approve-poetry/:id", put_with(approve_poem, approve_poem_docs))
		.api_route("/reject-poetry/:id", put_with(reject_poem, reject_poem_docs))
		.api_route(
			"/poetry/:id/comments",
			get_with(list_comments, list_comments_docs),
		)
		.api_route("/comment/:id", delete_with(delete_comment, delete_comment_docs))
}
