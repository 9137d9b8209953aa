mod route;

use proc_macro::TokenStream;

/// Derives the OpenAPI operation docs of a handler, emitted as a sibling function
/// named after the handler with the suffix `_docs`.
///
/// The first doc comment line becomes the summary and the remaining lines the description.
/// `tag = ...` and `response(status = ..., shape = "...", description = "...")` may be repeated.
#[proc_macro_attribute]
pub fn route(args: TokenStream, input: TokenStream) -> TokenStream {
	route::from_input(args, input)
}
