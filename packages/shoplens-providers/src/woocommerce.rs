use serde_json::Value;
use time::OffsetDateTime;

use crate::html::strip_html;
use shoplens_domain::{CommerceProduct, SearchResult, StockStatus};

pub fn format_product(native: &Value, domain: &str) -> Option<SearchResult> {
	let name = crate::value_string(native, "name").filter(|value| !value.trim().is_empty())?;
	let id = crate::value_id(native, "id")?;
	let url = crate::value_string(native, "permalink")
		.filter(|value| !value.trim().is_empty())
		.unwrap_or_else(|| format!("https://{domain}/?p={id}"));
	let description = crate::value_string(native, "short_description")
		.filter(|value| !value.trim().is_empty())
		.or_else(|| crate::value_string(native, "description"))
		.map(|value| strip_html(&value))
		.unwrap_or_default();
	let mut content = description;

	if let Some(price) = crate::value_f64(native, "price") {
		if !content.is_empty() {
			content.push(' ');
		}

		content.push_str(&format!("Price: {price:.2}."));
	}
	if let Some(sku) = crate::value_string(native, "sku").filter(|value| !value.trim().is_empty())
	{
		content.push_str(&format!(" SKU: {sku}."));
	}
	if let Some(status) = crate::value_string(native, "stock_status") {
		content.push_str(&format!(" Stock: {status}."));
	}

	Some(SearchResult { content: content.trim().to_string(), url, title: name, similarity: 1.0 })
}

pub fn parse_commerce_product(native: &Value) -> Option<CommerceProduct> {
	let id = crate::value_id(native, "id")?;
	let name = crate::value_string(native, "name").filter(|value| !value.trim().is_empty())?;
	let price = crate::value_f64(native, "price")
		.or_else(|| crate::value_f64(native, "regular_price"))
		.unwrap_or(0.0);
	let stock_status = crate::value_string(native, "stock_status")
		.as_deref()
		.and_then(StockStatus::from_label)
		.unwrap_or(StockStatus::OutOfStock);
	let total_sales = crate::value_u64(native, "total_sales").unwrap_or(0);
	let date_created = crate::value_string(native, "date_created")
		.as_deref()
		.and_then(crate::parse_datetime)
		.unwrap_or(OffsetDateTime::UNIX_EPOCH);

	Some(CommerceProduct {
		id,
		name,
		price,
		stock_status,
		total_sales,
		date_created,
		similarity: 0.0,
		relevance: 0.0,
	})
}

pub fn format_order(native: &Value, domain: &str) -> Option<SearchResult> {
	let id = crate::value_id(native, "id")?;
	let number = crate::value_string(native, "number").unwrap_or_else(|| id.clone());
	let status = crate::value_string(native, "status")?;
	let symbol = crate::value_string(native, "currency")
		.map(|code| crate::currency_symbol(&code))
		.unwrap_or_default();
	let mut content = format!("Status: {status}.");

	if let Some(total) = crate::value_string(native, "total") {
		content.push_str(&format!(" Total: {symbol}{total}."));
	}
	if let Some(items) = native.get("line_items").and_then(Value::as_array) {
		let summary: Vec<String> = items
			.iter()
			.filter_map(|item| {
				let name = crate::value_string(item, "name")?;
				let quantity = crate::value_u64(item, "quantity").unwrap_or(1);

				Some(format!("{quantity} x {name}"))
			})
			.collect();

		if !summary.is_empty() {
			content.push_str(&format!(" Items: {}.", summary.join(", ")));
		}
	}
	if let Some(created) = crate::value_string(native, "date_created") {
		content.push_str(&format!(" Placed: {created}."));
	}

	Some(SearchResult {
		content,
		url: format!("https://{domain}/my-account/view-order/{id}/"),
		title: format!("Order #{number}"),
		similarity: 1.0,
	})
}
