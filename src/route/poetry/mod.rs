use aide::axum::{
	routing::{get_with, post_with},
	ApiRouter,
};

use crate::AppState;

pub mod model;
pub mod route;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	// One parameter name per segment: `:id` is a category name on the listing.
	ApiRouter::new()
		.api_route("/", post_with(submit_poem, submit_poem_docs))
		.api_route("/:id", get_with(list_poems, list_poems_docs))
		.api_route("/:id/like", post_with(like_poem, like_poem_docs))
}
