use serde::Deserialize;

use crate::{Error, Result};
use shoplens_config::Limits;

#[derive(Clone, Debug, Deserialize)]
pub struct ProductDetailsRequest {
	pub product_query: String,
	#[serde(default = "default_true")]
	pub include_specs: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProductSearchRequest {
	pub query: String,
	#[serde(default)]
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CategorySearchRequest {
	pub category: String,
	#[serde(default)]
	pub limit: Option<u32>,
	#[serde(default)]
	pub threshold: Option<f32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OrderLookupRequest {
	pub order_id: String,
	#[serde(default)]
	pub email: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StockCheckRequest {
	pub product_id: String,
}

impl ProductDetailsRequest {
	pub fn validate(&self, limits: &Limits) -> Result<()> {
		check_text("product_query", &self.product_query, limits.max_query_chars)
	}
}

impl ProductSearchRequest {
	pub fn validate(&self, limits: &Limits) -> Result<()> {
		check_text("query", &self.query, limits.max_query_chars)?;

		if let Some(limit) = self.limit {
			check_limit("limit", limit, limits.max_search_limit)?;
		}

		Ok(())
	}
}

impl CategorySearchRequest {
	pub fn validate(&self, limits: &Limits) -> Result<()> {
		check_text("category", &self.category, limits.max_category_chars)?;

		if let Some(limit) = self.limit {
			check_limit("limit", limit, limits.max_search_limit)?;
		}
		if let Some(threshold) = self.threshold
			&& !(0.0..=1.0).contains(&threshold)
		{
			return Err(validation("threshold", "must be between 0 and 1"));
		}

		Ok(())
	}
}

impl OrderLookupRequest {
	pub fn validate(&self, limits: &Limits) -> Result<()> {
		check_text("order_id", &self.order_id, limits.max_order_id_chars)?;

		if let Some(email) = self.email.as_deref()
			&& !is_valid_email(email.trim())
		{
			return Err(validation("email", "must be a valid email address"));
		}

		Ok(())
	}
}

impl StockCheckRequest {
	pub fn validate(&self, limits: &Limits) -> Result<()> {
		check_text("product_id", &self.product_id, limits.max_order_id_chars)
	}
}

fn check_text(field: &str, value: &str, max_chars: u32) -> Result<()> {
	let trimmed = value.trim();

	if trimmed.is_empty() {
		return Err(validation(field, "must not be empty"));
	}
	if trimmed.chars().count() as u32 > max_chars {
		return Err(validation(field, &format!("must be at most {max_chars} characters")));
	}

	Ok(())
}

fn check_limit(field: &str, value: u32, max: u32) -> Result<()> {
	if value == 0 || value > max {
		return Err(validation(field, &format!("must be between 1 and {max}")));
	}

	Ok(())
}

fn is_valid_email(value: &str) -> bool {
	let mut parts = value.splitn(2, '@');
	let Some(local) = parts.next() else { return false };
	let Some(host) = parts.next() else { return false };

	!local.is_empty()
		&& !host.is_empty()
		&& host.contains('.')
		&& !host.starts_with('.')
		&& !host.ends_with('.')
		&& !value.chars().any(char::is_whitespace)
		&& !host.contains('@')
}

fn validation(field: &str, reason: &str) -> Error {
	Error::Validation { field: field.to_string(), reason: reason.to_string() }
}

fn default_true() -> bool {
	true
}
