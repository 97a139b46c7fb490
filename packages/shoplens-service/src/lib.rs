pub mod details;
pub mod envelope;
pub mod error;
pub mod orders;
pub mod ranking;
pub mod requests;
pub mod search;
pub mod strategy;
pub mod telemetry;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

pub use envelope::{EnvelopeError, EnvelopeMetadata, ErrorCode, ResultEnvelope};
pub use error::{Error, Result};
pub use ranking::{RankOptions, RankedProduct, RankingSignals, rank};
pub use requests::{
	CategorySearchRequest, OrderLookupRequest, ProductDetailsRequest, ProductSearchRequest,
	StockCheckRequest,
};
pub use strategy::{Source, StrategyResult};
pub use telemetry::{
	FailureKind, LookupFailureEvent, TelemetryRecorder, TelemetrySink, TracingSink,
};

use shoplens_config::Config;
use shoplens_domain::{QueryKind, SearchResult};
use shoplens_providers::Platform;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Outcome of a provider detail call: a genuine product, a fuzzy-match
/// suggestion list, or a plain miss.
#[derive(Clone, Debug)]
pub enum ProductLookup {
	Found(Value),
	Suggestions(Vec<String>),
	NotFound,
}

/// Uniform contract over platform-specific product/order APIs. Each method
/// may return native data, a miss, or fail (the platform client "threw").
pub trait CommerceProvider
where
	Self: Send + Sync,
{
	fn platform(&self) -> Platform;

	fn get_product_details<'a>(
		&'a self,
		query: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<ProductLookup>>;

	fn search_products<'a>(
		&'a self,
		query: &'a str,
		limit: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Value>>>;

	fn lookup_order<'a>(
		&'a self,
		order_id: &'a str,
		email: Option<&'a str>,
	) -> BoxFuture<'a, color_eyre::Result<Option<Value>>>;

	fn check_stock<'a>(
		&'a self,
		product_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<Value>>>;
}

/// Maps a normalized domain to its commerce provider, when one is
/// configured for the tenant. Resolution is per-domain: contexts with
/// different domains never observe each other's provider state.
pub trait ProviderResolver
where
	Self: Send + Sync,
{
	fn resolve(&self, domain: &str) -> Option<Arc<dyn CommerceProvider>>;
}

/// Exact-identifier index over known SKUs and product handles.
pub trait ExactMatchIndex
where
	Self: Send + Sync,
{
	fn exact_match_search<'a>(
		&'a self,
		query: &'a str,
		domain: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<SearchResult>>>;
}

/// Opaque semantic-search capability over indexed store content.
pub trait SemanticSearch
where
	Self: Send + Sync,
{
	fn search_similar_content<'a>(
		&'a self,
		query: &'a str,
		domain: &'a str,
		limit: u32,
		min_similarity: f32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<SearchResult>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub commerce: Arc<dyn ProviderResolver>,
	pub exact: Arc<dyn ExactMatchIndex>,
	pub semantic: Arc<dyn SemanticSearch>,
}
impl Providers {
	pub fn new(
		commerce: Arc<dyn ProviderResolver>,
		exact: Arc<dyn ExactMatchIndex>,
		semantic: Arc<dyn SemanticSearch>,
	) -> Self {
		Self { commerce, exact, semantic }
	}
}

/// Immutable per-request execution context. Created fresh for every call
/// and never shared mutably across requests.
#[derive(Clone, Debug)]
pub struct ExecutionContext {
	pub tenant_id: String,
	pub domain: String,
	pub trace_id: Uuid,
	pub platform_hint: Option<Platform>,
}
impl ExecutionContext {
	pub fn new(tenant_id: impl Into<String>, domain: impl Into<String>) -> Self {
		Self {
			tenant_id: tenant_id.into(),
			domain: domain.into(),
			trace_id: Uuid::new_v4(),
			platform_hint: None,
		}
	}

	pub fn with_platform_hint(mut self, platform: Platform) -> Self {
		self.platform_hint = Some(platform);

		self
	}
}

pub struct LookupService {
	pub cfg: Config,
	pub providers: Providers,
	telemetry: TelemetryRecorder,
}
impl LookupService {
	/// Builds a service with the default structured-log telemetry sink.
	/// Must be called inside a tokio runtime: the telemetry drain task is
	/// spawned here.
	pub fn new(cfg: Config, providers: Providers) -> Self {
		Self::with_telemetry(cfg, providers, TelemetryRecorder::spawn(Arc::new(TracingSink)))
	}

	pub fn with_telemetry(
		cfg: Config,
		providers: Providers,
		telemetry: TelemetryRecorder,
	) -> Self {
		Self { cfg, providers, telemetry }
	}

	pub(crate) fn record_failure(
		&self,
		query: &str,
		query_type: QueryKind,
		error_type: FailureKind,
		platform: Option<Platform>,
		suggestions: Vec<String>,
	) {
		self.telemetry.record(LookupFailureEvent {
			query: query.to_string(),
			query_type,
			error_type,
			platform,
			suggestions,
			timestamp: OffsetDateTime::now_utc(),
		});
	}
}
