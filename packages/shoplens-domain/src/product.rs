use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Canonical result unit returned to callers regardless of which tier
/// produced it. Provider-native, exact-match, and semantic hits are all
/// normalized into this shape at the adapter boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
	pub content: String,
	pub url: String,
	pub title: String,
	pub similarity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
	InStock,
	OnBackorder,
	OutOfStock,
}
impl StockStatus {
	pub fn from_label(label: &str) -> Option<Self> {
		match label {
			"instock" => Some(Self::InStock),
			"onbackorder" => Some(Self::OnBackorder),
			"outofstock" => Some(Self::OutOfStock),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::InStock => "instock",
			Self::OnBackorder => "onbackorder",
			Self::OutOfStock => "outofstock",
		}
	}
}

/// Ranking-engine input: one candidate product with the business signals
/// the search tier carried along.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommerceProduct {
	pub id: String,
	pub name: String,
	pub price: f64,
	pub stock_status: StockStatus,
	pub total_sales: u64,
	#[serde(with = "crate::time_serde")]
	pub date_created: OffsetDateTime,
	pub similarity: f32,
	pub relevance: f32,
}
