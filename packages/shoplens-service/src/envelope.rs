use std::time::Instant;

use serde::Serialize;
use serde_json::Value;

use crate::Error;

/// Stable failure codes surfaced through the envelope. `success: false`
/// plus one of these is the only failure signal a consumer must handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	InvalidDomain,
	ValidationError,
	NoProvider,
	ProductNotFound,
	OrderNotFound,
	ProviderError,
	GetProductDetailsError,
	SearchError,
	LookupOrderError,
	CheckStockError,
}
impl ErrorCode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::InvalidDomain => "INVALID_DOMAIN",
			Self::ValidationError => "VALIDATION_ERROR",
			Self::NoProvider => "NO_PROVIDER",
			Self::ProductNotFound => "PRODUCT_NOT_FOUND",
			Self::OrderNotFound => "ORDER_NOT_FOUND",
			Self::ProviderError => "PROVIDER_ERROR",
			Self::GetProductDetailsError => "GET_PRODUCT_DETAILS_ERROR",
			Self::SearchError => "SEARCH_ERROR",
			Self::LookupOrderError => "LOOKUP_ORDER_ERROR",
			Self::CheckStockError => "CHECK_STOCK_ERROR",
		}
	}
}

#[derive(Clone, Debug, Serialize)]
pub struct EnvelopeError {
	pub code: ErrorCode,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Value>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EnvelopeMetadata {
	pub execution_time_ms: u64,
	/// Always false at this layer; caching, if any, belongs to a wrapping
	/// collaborator.
	pub cached: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
}

/// Uniform wrapper returned by every public operation. `success` reflects
/// the business outcome: a completed not-found is `success: false` even
/// though the call finished normally.
#[derive(Clone, Debug, Serialize)]
pub struct ResultEnvelope<T> {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<EnvelopeError>,
	pub metadata: EnvelopeMetadata,
}
impl<T> ResultEnvelope<T> {
	pub fn success(data: T, started: Instant, source: Option<String>) -> Self {
		Self {
			success: true,
			data: Some(data),
			error: None,
			metadata: metadata(started, source),
		}
	}

	pub fn not_found(
		code: ErrorCode,
		message: String,
		details: Option<Value>,
		started: Instant,
		source: Option<String>,
	) -> Self {
		Self {
			success: false,
			data: None,
			error: Some(EnvelopeError { code, message, details }),
			metadata: metadata(started, source),
		}
	}

	pub fn fatal(code: ErrorCode, message: String, started: Instant) -> Self {
		Self {
			success: false,
			data: None,
			error: Some(EnvelopeError { code, message, details: None }),
			metadata: metadata(started, None),
		}
	}

	pub fn invalid_domain(started: Instant) -> Self {
		Self::fatal(
			ErrorCode::InvalidDomain,
			"The store domain is missing or not usable.".to_string(),
			started,
		)
	}

	/// Maps a propagated error onto its envelope, using `fallback` for the
	/// operation-level catch-all (exceptions that escaped every tier).
	pub fn from_error(err: Error, fallback: ErrorCode, started: Instant) -> Self {
		let code = match &err {
			Error::InvalidDomain { .. } => ErrorCode::InvalidDomain,
			Error::Validation { .. } => ErrorCode::ValidationError,
			Error::NoProvider => ErrorCode::NoProvider,
			Error::Provider { .. } => ErrorCode::ProviderError,
			Error::Lookup { .. } => fallback,
		};

		Self::fatal(code, err.to_string(), started)
	}
}

fn metadata(started: Instant, source: Option<String>) -> EnvelopeMetadata {
	EnvelopeMetadata {
		execution_time_ms: started.elapsed().as_millis() as u64,
		cached: false,
		source,
	}
}
