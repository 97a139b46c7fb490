use serde::Serialize;

use shoplens_domain::{QueryKind, SearchResult};
use shoplens_providers::Platform;

/// Which tier produced a result. The tag is load-bearing: callers and
/// telemetry distinguish *why* a result exists, not just whether the lookup
/// succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
	ProviderDetail(Platform),
	ProviderSearch(Platform),
	ProviderOrder(Platform),
	ProviderStock(Platform),
	ExactMatch,
	ExactMatchAfterProvider,
	ExactMatchAfterError,
	ExactMatchNoProvider,
	Semantic,
	NotFound,
	Error,
}
impl Source {
	pub fn label(&self) -> String {
		match self {
			Self::ProviderDetail(platform) => format!("{}-detail", platform.as_str()),
			Self::ProviderSearch(platform) => format!("{}-search", platform.as_str()),
			Self::ProviderOrder(platform) => format!("{}-order", platform.as_str()),
			Self::ProviderStock(platform) => format!("{}-stock", platform.as_str()),
			Self::ExactMatch => "exact-match".to_string(),
			Self::ExactMatchAfterProvider => "exact-match-after-provider".to_string(),
			Self::ExactMatchAfterError => "exact-match-after-error".to_string(),
			Self::ExactMatchNoProvider => "exact-match-no-provider".to_string(),
			Self::Semantic => "semantic".to_string(),
			Self::NotFound => "not-found".to_string(),
			Self::Error => "error".to_string(),
		}
	}
}

/// How the exact-match tier was reached; decides the tier-specific tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExactMatchPath {
	SearchFirst,
	AfterProvider,
	AfterError,
	NoProvider,
}
impl ExactMatchPath {
	pub fn source(&self) -> Source {
		match self {
			Self::SearchFirst => Source::ExactMatch,
			Self::AfterProvider => Source::ExactMatchAfterProvider,
			Self::AfterError => Source::ExactMatchAfterError,
			Self::NoProvider => Source::ExactMatchNoProvider,
		}
	}
}

/// Per-tier exception policy, attached to the plan as data rather than
/// scattered conditionals. The provider tier recovers by falling back one
/// tier; the exact-match and semantic tiers propagate to the top-level
/// envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPolicy {
	Recover,
	Propagate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
	Provider,
	ExactMatch(ExactMatchPath),
	Semantic,
}

#[derive(Clone, Copy, Debug)]
pub struct PlannedTier {
	pub tier: Tier,
	pub on_error: ErrorPolicy,
}
impl PlannedTier {
	pub fn provider() -> Self {
		Self { tier: Tier::Provider, on_error: ErrorPolicy::Recover }
	}

	pub fn exact(path: ExactMatchPath) -> Self {
		Self { tier: Tier::ExactMatch(path), on_error: ErrorPolicy::Propagate }
	}

	pub fn semantic() -> Self {
		Self { tier: Tier::Semantic, on_error: ErrorPolicy::Propagate }
	}
}

/// Outcome of one run of a fallback chain.
#[derive(Clone, Debug, Serialize)]
pub struct StrategyResult {
	pub success: bool,
	pub results: Vec<SearchResult>,
	#[serde(skip)]
	pub source: Source,
	pub error_message: Option<String>,
	pub suggestions: Vec<String>,
	pub platform: Option<Platform>,
}
impl StrategyResult {
	pub fn hit(results: Vec<SearchResult>, source: Source, platform: Option<Platform>) -> Self {
		Self {
			success: true,
			results,
			source,
			error_message: None,
			suggestions: Vec::new(),
			platform,
		}
	}

	pub fn miss(message: &str, suggestions: Vec<String>, platform: Option<Platform>) -> Self {
		Self {
			success: false,
			results: Vec::new(),
			source: Source::NotFound,
			error_message: Some(message.to_string()),
			suggestions,
			platform,
		}
	}
}

/// Opening plan for a product-details lookup. The remainder is replanned
/// once the provider tier's outcome is known.
pub fn initial_detail_plan(provider_configured: bool, kind: QueryKind) -> Vec<PlannedTier> {
	if provider_configured {
		return vec![PlannedTier::provider()];
	}

	match kind {
		QueryKind::Sku => vec![
			PlannedTier::exact(ExactMatchPath::NoProvider),
			PlannedTier::semantic(),
		],
		QueryKind::ProductName => vec![PlannedTier::semantic()],
	}
}

/// After a provider miss the chain terminates in not-found (via the exact
/// tier for SKU queries); semantic search is not consulted on this path.
pub fn detail_plan_after_provider_miss(kind: QueryKind) -> Vec<PlannedTier> {
	match kind {
		QueryKind::Sku => vec![PlannedTier::exact(ExactMatchPath::AfterProvider)],
		QueryKind::ProductName => Vec::new(),
	}
}

/// After a provider exception the chain keeps degrading all the way to
/// semantic search.
pub fn detail_plan_after_provider_error(kind: QueryKind) -> Vec<PlannedTier> {
	match kind {
		QueryKind::Sku => vec![
			PlannedTier::exact(ExactMatchPath::AfterError),
			PlannedTier::semantic(),
		],
		QueryKind::ProductName => vec![PlannedTier::semantic()],
	}
}

/// Plan for a plain product search: SKU queries hit the exact index before
/// any provider call; free-text queries go provider-then-semantic.
pub fn search_plan(kind: QueryKind) -> Vec<PlannedTier> {
	match kind {
		QueryKind::Sku => vec![
			PlannedTier::exact(ExactMatchPath::SearchFirst),
			PlannedTier::provider(),
			PlannedTier::semantic(),
		],
		QueryKind::ProductName => vec![PlannedTier::provider(), PlannedTier::semantic()],
	}
}
