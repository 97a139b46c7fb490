//! Scripted collaborator doubles for exercising the lookup pipeline
//! without real platform clients, index, or embedding search.

use std::{
	collections::HashMap,
	sync::{
		Arc, Mutex,
		atomic::{AtomicU32, AtomicUsize, Ordering},
	},
	time::Duration,
};

use color_eyre::eyre;
use serde_json::Value;

use shoplens_config::Config;
use shoplens_domain::SearchResult;
use shoplens_providers::Platform;
use shoplens_service::{
	BoxFuture, CommerceProvider, ExactMatchIndex, LookupFailureEvent, LookupService,
	ProductLookup, ProviderResolver, Providers, SemanticSearch, TelemetryRecorder,
	TelemetrySink,
};

#[derive(Clone, Debug)]
pub enum DetailScript {
	Found(Value),
	Suggestions(Vec<String>),
	NotFound,
	Fail(String),
}

#[derive(Clone, Debug)]
pub enum SearchScript {
	Results(Vec<Value>),
	Fail(String),
}

#[derive(Clone, Debug)]
pub enum OrderScript {
	Found(Value),
	NotFound,
	Fail(String),
}

/// Commerce provider that answers every call from a fixed script and
/// counts how often each endpoint was hit.
pub struct ScriptedCommerceProvider {
	platform: Platform,
	detail: DetailScript,
	search: SearchScript,
	order: OrderScript,
	stock: OrderScript,
	pub detail_calls: AtomicUsize,
	pub search_calls: AtomicUsize,
	pub order_calls: AtomicUsize,
	pub stock_calls: AtomicUsize,
	pub last_search_limit: AtomicU32,
}
impl ScriptedCommerceProvider {
	pub fn new(platform: Platform) -> Self {
		Self {
			platform,
			detail: DetailScript::NotFound,
			search: SearchScript::Results(Vec::new()),
			order: OrderScript::NotFound,
			stock: OrderScript::NotFound,
			detail_calls: AtomicUsize::new(0),
			search_calls: AtomicUsize::new(0),
			order_calls: AtomicUsize::new(0),
			stock_calls: AtomicUsize::new(0),
			last_search_limit: AtomicU32::new(0),
		}
	}

	pub fn with_detail(mut self, script: DetailScript) -> Self {
		self.detail = script;

		self
	}

	pub fn with_search(mut self, script: SearchScript) -> Self {
		self.search = script;

		self
	}

	pub fn with_order(mut self, script: OrderScript) -> Self {
		self.order = script;

		self
	}

	pub fn with_stock(mut self, script: OrderScript) -> Self {
		self.stock = script;

		self
	}
}
impl CommerceProvider for ScriptedCommerceProvider {
	fn platform(&self) -> Platform {
		self.platform
	}

	fn get_product_details<'a>(
		&'a self,
		_query: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<ProductLookup>> {
		self.detail_calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			match &self.detail {
				DetailScript::Found(native) => Ok(ProductLookup::Found(native.clone())),
				DetailScript::Suggestions(list) =>
					Ok(ProductLookup::Suggestions(list.clone())),
				DetailScript::NotFound => Ok(ProductLookup::NotFound),
				DetailScript::Fail(message) => Err(eyre::eyre!(message.clone())),
			}
		})
	}

	fn search_products<'a>(
		&'a self,
		_query: &'a str,
		limit: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Value>>> {
		self.search_calls.fetch_add(1, Ordering::SeqCst);
		self.last_search_limit.store(limit, Ordering::SeqCst);

		Box::pin(async move {
			match &self.search {
				SearchScript::Results(natives) => Ok(natives.clone()),
				SearchScript::Fail(message) => Err(eyre::eyre!(message.clone())),
			}
		})
	}

	fn lookup_order<'a>(
		&'a self,
		_order_id: &'a str,
		_email: Option<&'a str>,
	) -> BoxFuture<'a, color_eyre::Result<Option<Value>>> {
		self.order_calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			match &self.order {
				OrderScript::Found(native) => Ok(Some(native.clone())),
				OrderScript::NotFound => Ok(None),
				OrderScript::Fail(message) => Err(eyre::eyre!(message.clone())),
			}
		})
	}

	fn check_stock<'a>(
		&'a self,
		_product_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<Value>>> {
		self.stock_calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			match &self.stock {
				OrderScript::Found(native) => Ok(Some(native.clone())),
				OrderScript::NotFound => Ok(None),
				OrderScript::Fail(message) => Err(eyre::eyre!(message.clone())),
			}
		})
	}
}

/// Fixed domain-to-provider map; unknown domains resolve to nothing.
#[derive(Default)]
pub struct StaticResolver {
	providers: HashMap<String, Arc<dyn CommerceProvider>>,
}
impl StaticResolver {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, domain: &str, provider: Arc<dyn CommerceProvider>) -> Self {
		self.providers.insert(domain.to_string(), provider);

		self
	}
}
impl ProviderResolver for StaticResolver {
	fn resolve(&self, domain: &str) -> Option<Arc<dyn CommerceProvider>> {
		self.providers.get(domain).cloned()
	}
}

#[derive(Clone, Debug)]
pub enum IndexScript {
	Results(Vec<SearchResult>),
	Fail(String),
}

pub struct ScriptedExactIndex {
	script: IndexScript,
	pub calls: AtomicUsize,
}
impl ScriptedExactIndex {
	pub fn new(script: IndexScript) -> Self {
		Self { script, calls: AtomicUsize::new(0) }
	}

	pub fn empty() -> Self {
		Self::new(IndexScript::Results(Vec::new()))
	}
}
impl ExactMatchIndex for ScriptedExactIndex {
	fn exact_match_search<'a>(
		&'a self,
		_query: &'a str,
		_domain: &'a str,
		_max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<SearchResult>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			match &self.script {
				IndexScript::Results(results) => Ok(results.clone()),
				IndexScript::Fail(message) => Err(eyre::eyre!(message.clone())),
			}
		})
	}
}

pub struct ScriptedSemanticSearch {
	script: IndexScript,
	pub calls: AtomicUsize,
	pub last_query: Mutex<Option<String>>,
	pub last_limit: AtomicU32,
	pub last_min_similarity: Mutex<Option<f32>>,
}
impl ScriptedSemanticSearch {
	pub fn new(script: IndexScript) -> Self {
		Self {
			script,
			calls: AtomicUsize::new(0),
			last_query: Mutex::new(None),
			last_limit: AtomicU32::new(0),
			last_min_similarity: Mutex::new(None),
		}
	}

	pub fn empty() -> Self {
		Self::new(IndexScript::Results(Vec::new()))
	}
}
impl SemanticSearch for ScriptedSemanticSearch {
	fn search_similar_content<'a>(
		&'a self,
		query: &'a str,
		_domain: &'a str,
		limit: u32,
		min_similarity: f32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<SearchResult>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.last_limit.store(limit, Ordering::SeqCst);
		*self.last_query.lock().unwrap_or_else(|err| err.into_inner()) =
			Some(query.to_string());
		*self.last_min_similarity.lock().unwrap_or_else(|err| err.into_inner()) =
			Some(min_similarity);

		Box::pin(async move {
			match &self.script {
				IndexScript::Results(results) => Ok(results.clone()),
				IndexScript::Fail(message) => Err(eyre::eyre!(message.clone())),
			}
		})
	}
}

/// Sink that keeps every recorded event for later assertions.
#[derive(Default)]
pub struct CapturingSink {
	events: Mutex<Vec<LookupFailureEvent>>,
}
impl CapturingSink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn events(&self) -> Vec<LookupFailureEvent> {
		self.events.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	/// Polls until `count` events arrived or a short deadline passes; the
	/// recorder drains through a background task, so tests must wait.
	pub async fn wait_for_events(&self, count: usize) -> Vec<LookupFailureEvent> {
		for _ in 0..200 {
			let events = self.events();

			if events.len() >= count {
				return events;
			}

			tokio::time::sleep(Duration::from_millis(5)).await;
		}

		self.events()
	}
}
impl TelemetrySink for CapturingSink {
	fn record(&self, event: &LookupFailureEvent) -> color_eyre::Result<()> {
		self.events.lock().unwrap_or_else(|err| err.into_inner()).push(event.clone());

		Ok(())
	}
}

/// Wires a service around the given doubles, returning the capturing sink
/// alongside it.
pub fn build_service(
	resolver: Arc<dyn ProviderResolver>,
	exact: Arc<dyn ExactMatchIndex>,
	semantic: Arc<dyn SemanticSearch>,
) -> (LookupService, Arc<CapturingSink>) {
	let sink = Arc::new(CapturingSink::new());
	let recorder = TelemetryRecorder::spawn(sink.clone());
	let service = LookupService::with_telemetry(
		Config::default(),
		Providers::new(resolver, exact, semantic),
		recorder,
	);

	(service, sink)
}

pub fn search_result(title: &str, url: &str, similarity: f32) -> SearchResult {
	SearchResult {
		content: format!("{title} description"),
		url: url.to_string(),
		title: title.to_string(),
		similarity,
	}
}

pub fn woo_product(id: u64, name: &str, price: &str) -> Value {
	serde_json::json!({
		"id": id,
		"name": name,
		"price": price,
		"sku": format!("SKU-{id}"),
		"permalink": format!("https://shop.example.com/product/{id}/"),
		"short_description": format!("<p>{name}</p>"),
		"stock_status": "instock",
		"total_sales": 10,
		"date_created": "2024-02-01T12:00:00"
	})
}
