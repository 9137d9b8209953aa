use aide::{
	openapi::{SecurityScheme, Tag},
	transform::TransformOpenApi,
};

use crate::{error::ErrorResponse, extract::Json};

pub const SECURITY_SCHEME_BEARER: &str = "Bearer";

pub mod tag {
	pub const AUTH: &str = "Auth";
	pub const POETRY: &str = "Poetry";
	pub const COMMENT: &str = "Comment";
	pub const ADMIN: &str = "Admin";
}

fn describe(name: &str, description: &str) -> Tag {
	Tag {
		name: name.into(),
		description: Some(description.into()),
		..Default::default()
	}
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Poetry Gallery")
		.summary("Poetry gallery with a moderated admin dashboard")
		.description(include_str!("../README.md"))
		.tag(describe(tag::AUTH, "Administrator login"))
		.tag(describe(tag::POETRY, "Browsing and liking poems"))
		.tag(describe(tag::COMMENT, "Reader comments"))
		.tag(describe(tag::ADMIN, "Moderation dashboard"))
		.security_scheme(
			SECURITY_SCHEME_BEARER,
			SecurityScheme::Http {
				scheme: "bearer".into(),
				bearer_format: Some("JWT".into()),
				description: Some("A token returned by /api/auth/login".into()),
				extensions: Default::default(),
			},
		)
		.default_response_with::<Json<ErrorResponse>, _>(|res| {
			res.example(ErrorResponse {
				success: false,
				message: "Poetry not found".into(),
				errors: Vec::new(),
				details: Default::default(),
			})
		})
}
