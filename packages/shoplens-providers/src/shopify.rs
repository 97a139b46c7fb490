use serde_json::Value;
use time::OffsetDateTime;

use crate::html::strip_html;
use shoplens_domain::{CommerceProduct, SearchResult, StockStatus};

pub fn format_product(native: &Value, domain: &str) -> Option<SearchResult> {
	let title = crate::value_string(native, "title").filter(|value| !value.trim().is_empty())?;
	let id = crate::value_id(native, "id")?;
	let url = crate::value_string(native, "handle")
		.filter(|value| !value.trim().is_empty())
		.map(|handle| format!("https://{domain}/products/{handle}"))
		.unwrap_or_else(|| format!("https://{domain}/products/{id}"));
	let description = crate::value_string(native, "body_html")
		.map(|value| strip_html(&value))
		.unwrap_or_default();
	let mut content = description;

	if let Some(variant) = first_variant(native) {
		if let Some(price) = crate::value_f64(variant, "price") {
			if !content.is_empty() {
				content.push(' ');
			}

			content.push_str(&format!("Price: {price:.2}."));
		}
		if let Some(sku) =
			crate::value_string(variant, "sku").filter(|value| !value.trim().is_empty())
		{
			content.push_str(&format!(" SKU: {sku}."));
		}
	}

	Some(SearchResult { content: content.trim().to_string(), url, title, similarity: 1.0 })
}

pub fn parse_commerce_product(native: &Value) -> Option<CommerceProduct> {
	let id = crate::value_id(native, "id")?;
	let name = crate::value_string(native, "title").filter(|value| !value.trim().is_empty())?;
	let variant = first_variant(native);
	let price = variant.and_then(|value| crate::value_f64(value, "price")).unwrap_or(0.0);
	let stock_status = variant.map(variant_stock_status).unwrap_or(StockStatus::OutOfStock);
	let date_created = crate::value_string(native, "created_at")
		.as_deref()
		.and_then(crate::parse_datetime)
		.unwrap_or(OffsetDateTime::UNIX_EPOCH);

	Some(CommerceProduct {
		id,
		name,
		price,
		stock_status,
		// Shopify does not expose a sales counter on the product shape.
		total_sales: 0,
		date_created,
		similarity: 0.0,
		relevance: 0.0,
	})
}

pub fn format_order(native: &Value, domain: &str) -> Option<SearchResult> {
	let id = crate::value_id(native, "id")?;
	let number = crate::value_string(native, "name").unwrap_or_else(|| format!("#{id}"));
	let status = crate::value_string(native, "financial_status")?;
	let symbol = crate::value_string(native, "currency")
		.map(|code| crate::currency_symbol(&code))
		.unwrap_or_default();
	let mut content = format!("Status: {status}.");

	if let Some(fulfillment) = crate::value_string(native, "fulfillment_status") {
		content.push_str(&format!(" Fulfillment: {fulfillment}."));
	}
	if let Some(total) = crate::value_string(native, "total_price") {
		content.push_str(&format!(" Total: {symbol}{total}."));
	}
	if let Some(items) = native.get("line_items").and_then(Value::as_array) {
		let summary: Vec<String> = items
			.iter()
			.filter_map(|item| {
				let title = crate::value_string(item, "title")?;
				let quantity = crate::value_u64(item, "quantity").unwrap_or(1);

				Some(format!("{quantity} x {title}"))
			})
			.collect();

		if !summary.is_empty() {
			content.push_str(&format!(" Items: {}.", summary.join(", ")));
		}
	}

	Some(SearchResult {
		content,
		url: format!("https://{domain}/account/orders/{id}"),
		title: format!("Order {number}"),
		similarity: 1.0,
	})
}

fn first_variant(native: &Value) -> Option<&Value> {
	native.get("variants").and_then(Value::as_array).and_then(|variants| variants.first())
}

fn variant_stock_status(variant: &Value) -> StockStatus {
	let quantity = variant.get("inventory_quantity").and_then(Value::as_i64).unwrap_or(0);

	if quantity > 0 {
		return StockStatus::InStock;
	}

	let backorderable = crate::value_string(variant, "inventory_policy")
		.map(|policy| policy == "continue")
		.unwrap_or(false);

	if backorderable { StockStatus::OnBackorder } else { StockStatus::OutOfStock }
}
