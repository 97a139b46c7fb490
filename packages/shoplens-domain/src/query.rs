use regex::Regex;
use serde::{Deserialize, Serialize};

/// How a product query should be routed through the fallback chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
	Sku,
	ProductName,
}
impl QueryKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Sku => "sku",
			Self::ProductName => "product_name",
		}
	}
}

/// Classifies a query as SKU-shaped or free-text. Pure and total: every
/// string maps to exactly one kind.
pub fn classify(query: &str) -> QueryKind {
	let trimmed = query.trim();
	let is_sku = Regex::new(r"(?i)^[A-Z0-9-]{6,}$")
		.map(|re| re.is_match(trimmed))
		.unwrap_or(false);

	if is_sku { QueryKind::Sku } else { QueryKind::ProductName }
}
