use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub search: Search,
	pub ranking: Ranking,
	pub limits: Limits,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Search {
	/// Result cap sent to the semantic-search tier.
	#[serde(default = "default_semantic_limit")]
	pub semantic_limit: u32,
	/// Minimum similarity for semantic matches.
	#[serde(default = "default_min_similarity")]
	pub min_similarity: f32,
	/// Queries with more words than this are treated as unconstrained
	/// free text and get a tighter provider result cap.
	#[serde(default = "default_adaptive_word_limit")]
	pub adaptive_word_limit: u32,
	/// Provider result cap applied to unconstrained free-text queries.
	#[serde(default = "default_adaptive_result_cap")]
	pub adaptive_result_cap: u32,
	/// Result cap for the exact-identifier index.
	#[serde(default = "default_exact_match_limit")]
	pub exact_match_limit: u32,
}

/// Signal weights for the ranking blend. The defaults are a tuning
/// constant: an in-stock product must outrank an out-of-stock one at any
/// realistic similarity gap, and a product past twice the caller's budget
/// must rank below every in-budget candidate.
#[derive(Clone, Debug, Deserialize)]
pub struct Ranking {
	#[serde(default = "default_similarity_weight")]
	pub similarity_weight: f32,
	#[serde(default = "default_price_weight")]
	pub price_weight: f32,
	#[serde(default = "default_stock_weight")]
	pub stock_weight: f32,
	#[serde(default = "default_popularity_weight")]
	pub popularity_weight: f32,
	#[serde(default = "default_recency_weight")]
	pub recency_weight: f32,
	/// Recency decay constant in days.
	#[serde(default = "default_recency_tau_days")]
	pub recency_tau_days: f32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Limits {
	#[serde(default = "default_max_query_chars")]
	pub max_query_chars: u32,
	#[serde(default = "default_max_category_chars")]
	pub max_category_chars: u32,
	#[serde(default = "default_max_order_id_chars")]
	pub max_order_id_chars: u32,
	#[serde(default = "default_search_limit")]
	pub default_search_limit: u32,
	#[serde(default = "default_max_search_limit")]
	pub max_search_limit: u32,
	#[serde(default = "default_category_threshold")]
	pub default_category_threshold: f32,
}

impl Default for Config {
	fn default() -> Self {
		Self { search: Search::default(), ranking: Ranking::default(), limits: Limits::default() }
	}
}
impl Default for Search {
	fn default() -> Self {
		Self {
			semantic_limit: default_semantic_limit(),
			min_similarity: default_min_similarity(),
			adaptive_word_limit: default_adaptive_word_limit(),
			adaptive_result_cap: default_adaptive_result_cap(),
			exact_match_limit: default_exact_match_limit(),
		}
	}
}
impl Default for Ranking {
	fn default() -> Self {
		Self {
			similarity_weight: default_similarity_weight(),
			price_weight: default_price_weight(),
			stock_weight: default_stock_weight(),
			popularity_weight: default_popularity_weight(),
			recency_weight: default_recency_weight(),
			recency_tau_days: default_recency_tau_days(),
		}
	}
}
impl Default for Limits {
	fn default() -> Self {
		Self {
			max_query_chars: default_max_query_chars(),
			max_category_chars: default_max_category_chars(),
			max_order_id_chars: default_max_order_id_chars(),
			default_search_limit: default_search_limit(),
			max_search_limit: default_max_search_limit(),
			default_category_threshold: default_category_threshold(),
		}
	}
}

fn default_semantic_limit() -> u32 {
	10
}

fn default_min_similarity() -> f32 {
	0.2
}

fn default_adaptive_word_limit() -> u32 {
	3
}

fn default_adaptive_result_cap() -> u32 {
	50
}

fn default_exact_match_limit() -> u32 {
	5
}

fn default_similarity_weight() -> f32 {
	0.4
}

fn default_price_weight() -> f32 {
	0.2
}

fn default_stock_weight() -> f32 {
	0.2
}

fn default_popularity_weight() -> f32 {
	0.1
}

fn default_recency_weight() -> f32 {
	0.1
}

fn default_recency_tau_days() -> f32 {
	365.0
}

fn default_max_query_chars() -> u32 {
	500
}

fn default_max_category_chars() -> u32 {
	200
}

fn default_max_order_id_chars() -> u32 {
	100
}

fn default_search_limit() -> u32 {
	100
}

fn default_max_search_limit() -> u32 {
	1000
}

fn default_category_threshold() -> f32 {
	0.15
}
