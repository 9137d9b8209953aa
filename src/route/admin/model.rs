pub use crate::route::model::{Confirmation, IdInput, Poem};

use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

use crate::{
	model::Category,
	moderation::{Draft, Patch},
	route::model::{
		optional_date, parse_category, validate_category, validate_date, validate_not_blank,
	},
	store::{Order, PoemQuery, SortBy},
};

#[derive(Deserialize, Validate, JsonSchema)]
pub struct AddPoemInput {
	#[validate(custom(function = "validate_not_blank"))]
	pub title: String,
	#[validate(custom(function = "validate_not_blank"))]
	pub content: String,
	/// One of `sad`, `romantic`, `broken`, `mother` or `love`, in any case.
	#[validate(custom(function = "validate_category"))]
	pub category: String,
	/// Defaults to "Manav".
	pub author: Option<String>,
	/// `YYYY-MM-DD` or RFC 3339, defaults to now.
	#[validate(custom(function = "validate_date"))]
	pub date: Option<String>,
}

impl AddPoemInput {
	pub fn into_draft(self) -> Result<Draft, crate::Error> {
		Ok(Draft {
			category: parse_category(&self.category)?,
			date: optional_date(self.date.as_deref()),
			title: self.title,
			content: self.content,
			author: self.author,
		})
	}
}

/// Changes to a poem. Omitted and blank fields are left as they are,
/// an unknown category is ignored.
#[derive(Deserialize, Validate, JsonSchema)]
pub struct EditPoemInput {
	pub title: Option<String>,
	pub content: Option<String>,
	pub category: Option<String>,
	pub author: Option<String>,
	#[validate(custom(function = "validate_date"))]
	pub date: Option<String>,
}

impl From<EditPoemInput> for Patch {
	fn from(input: EditPoemInput) -> Self {
		Self {
			date: optional_date(input.date.as_deref()),
			title: input.title,
			content: input.content,
			category: input.category,
			author: input.author,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
	#[default]
	Date,
	Category,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
	Asc,
	#[default]
	Desc,
}

#[derive(Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListPoemsQuery {
	#[serde(default)]
	pub sort_by: SortField,
	#[serde(default)]
	pub order: SortOrder,
	/// A category name, `all` or nothing for every category.
	pub category: Option<String>,
}

impl ListPoemsQuery {
	/// The store query, or `None` when the category filter can match nothing.
	pub fn to_query(&self) -> Option<PoemQuery> {
		let category = match self.category.as_deref().map(str::trim) {
			None | Some("") => None,
			Some(all) if all.eq_ignore_ascii_case("all") => None,
			Some(name) => Some(name.parse::<Category>().ok()?),
		};

		Some(PoemQuery {
			category,
			status: None,
			sort_by: match self.sort_by {
				SortField::Date => SortBy::Created,
				SortField::Category => SortBy::Category,
			},
			order: match self.order {
				SortOrder::Asc => Order::Asc,
				SortOrder::Desc => Order::Desc,
			},
		})
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn query(category: Option<&str>) -> ListPoemsQuery {
		ListPoemsQuery {
			sort_by: SortField::Category,
			order: SortOrder::Asc,
			category: category.map(Into::into),
		}
	}

	#[test]
	fn test_category_filter() {
		assert_eq!(query(None).to_query().unwrap().category, None);
		assert_eq!(query(Some("all")).to_query().unwrap().category, None);
		assert_eq!(query(Some("ALL")).to_query().unwrap().category, None);
		assert_eq!(
			query(Some("Mother")).to_query().unwrap().category,
			Some(Category::Mother)
		);
		assert!(query(Some("happy")).to_query().is_none());
	}

	#[test]
	fn test_sorting() {
		let query = query(None).to_query().unwrap();

		assert_eq!(query.sort_by, SortBy::Category);
		assert_eq!(query.order, Order::Asc);
		assert_eq!(query.status, None);
	}
}
