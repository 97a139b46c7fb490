pub mod html;
pub mod shopify;
pub mod woocommerce;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use shoplens_domain::{CommerceProduct, SearchResult};

/// Commerce platforms with a native adapter. Platform-specific response
/// shapes never leak past this crate: everything collapses into the
/// canonical [`SearchResult`] / [`CommerceProduct`] here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
	WooCommerce,
	Shopify,
}
impl Platform {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::WooCommerce => "woocommerce",
			Self::Shopify => "shopify",
		}
	}
}

/// Collapses a platform-native product into the canonical result shape.
/// `None` means the native shape is malformed; callers continue to the next
/// strategy rather than failing.
pub fn format_product(platform: Platform, native: &Value, domain: &str) -> Option<SearchResult> {
	match platform {
		Platform::WooCommerce => woocommerce::format_product(native, domain),
		Platform::Shopify => shopify::format_product(native, domain),
	}
}

/// Extracts the ranking-engine input from a platform-native product.
/// Similarity and relevance are left at zero; the search tier that produced
/// the candidate fills them in.
pub fn parse_commerce_product(platform: Platform, native: &Value) -> Option<CommerceProduct> {
	match platform {
		Platform::WooCommerce => woocommerce::parse_commerce_product(native),
		Platform::Shopify => shopify::parse_commerce_product(native),
	}
}

/// Collapses a platform-native order into the canonical result shape.
pub fn format_order(platform: Platform, native: &Value, domain: &str) -> Option<SearchResult> {
	match platform {
		Platform::WooCommerce => woocommerce::format_order(native, domain),
		Platform::Shopify => shopify::format_order(native, domain),
	}
}

pub(crate) fn value_string(native: &Value, key: &str) -> Option<String> {
	native.get(key).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn value_f64(native: &Value, key: &str) -> Option<f64> {
	let value = native.get(key)?;

	match value {
		Value::Number(number) => number.as_f64(),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}

pub(crate) fn value_u64(native: &Value, key: &str) -> Option<u64> {
	let value = native.get(key)?;

	match value {
		Value::Number(number) => number.as_u64(),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}

pub(crate) fn value_id(native: &Value, key: &str) -> Option<String> {
	let value = native.get(key)?;

	match value {
		Value::Number(number) => Some(number.to_string()),
		Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
		_ => None,
	}
}

/// Platform timestamps arrive as RFC 3339 or as a bare local datetime
/// (WooCommerce `date_created`). The bare form is read as UTC.
pub(crate) fn parse_datetime(text: &str) -> Option<OffsetDateTime> {
	OffsetDateTime::parse(text, &Rfc3339)
		.or_else(|_| OffsetDateTime::parse(&format!("{text}Z"), &Rfc3339))
		.ok()
}

pub(crate) fn currency_symbol(code: &str) -> String {
	match code.to_ascii_uppercase().as_str() {
		"GBP" => "£".to_string(),
		"USD" => "$".to_string(),
		"EUR" => "€".to_string(),
		other => format!("{other} "),
	}
}
