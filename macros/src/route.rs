use darling::{ast, FromMeta};
use proc_macro::TokenStream;
use quote::{format_ident, quote};

#[derive(FromMeta)]
struct RouteArgs {
	#[darling(multiple)]
	tag: Vec<syn::Expr>,
	#[darling(multiple)]
	response: Vec<ResponseArgs>,
}

#[derive(FromMeta)]
struct ResponseArgs {
	status: syn::LitInt,
	shape: Option<syn::Type>,
	description: Option<String>,
}

pub fn from_input(args: TokenStream, input: TokenStream) -> TokenStream {
	let args = match ast::NestedMeta::parse_meta_list(args.into()) {
		Ok(x) => x,
		Err(e) => return e.into_compile_error().into(),
	};

	let args = match RouteArgs::from_list(&args) {
		Ok(x) => x,
		Err(e) => return e.write_errors().into(),
	};

	let function = syn::parse_macro_input!(input as syn::ItemFn);

	let Some((summary, description)) = split_doc_comment(&function.attrs) else {
		return syn::Error::new_spanned(
			&function.sig.ident,
			"#[route] handlers need a doc comment, its first line is the summary",
		)
		.into_compile_error()
		.into();
	};

	let docs_ident = format_ident!("{}_docs", function.sig.ident);
	let vis = &function.vis;
	let tags = args.tag.iter();

	let description = description.map(|text| quote!(.description(#text)));
	let responses = args.response.into_iter().map(|response| {
		let status = response.status;
		let shape = response.shape.map_or_else(|| quote!(()), |ty| quote!(#ty));

		match response.description {
			Some(text) => quote! {
				.response_with::<#status, #shape, _>(|res| res.description(#text))
			},
			None => quote! {
				.response::<#status, #shape>()
			},
		}
	});

	quote! {
		#function

		#vis fn #docs_ident(op: aide::transform::TransformOperation) -> aide::transform::TransformOperation {
			op.summary(#summary)
				#description
				#(.tag(#tags))*
				#(#responses)*
		}
	}
	.into()
}

/// Collects `///` lines into a summary (the first line) and an optional
/// description made of every following line.
fn split_doc_comment(attrs: &[syn::Attribute]) -> Option<(String, Option<String>)> {
	let lines = attrs
		.iter()
		.filter(|attr| attr.path().is_ident("doc"))
		.filter_map(|attr| match &attr.meta {
			syn::Meta::NameValue(syn::MetaNameValue {
				value:
					syn::Expr::Lit(syn::ExprLit {
						lit: syn::Lit::Str(text),
						..
					}),
				..
			}) => Some(text.value().trim().to_owned()),
			_ => None,
		})
		.collect::<Vec<_>>();

	let (summary, rest) = lines.split_first()?;

	if summary.is_empty() {
		return None;
	}

	let description = rest
		.iter()
		.filter(|line| !line.is_empty())
		.cloned()
		.collect::<Vec<_>>()
		.join(" ");

	Some((
		summary.clone(),
		(!description.is_empty()).then_some(description),
	))
}
