use std::cmp::Ordering;

use serde::Serialize;
use time::OffsetDateTime;

use shoplens_config::Ranking as RankingWeights;
use shoplens_domain::{CommerceProduct, StockStatus};

/// Fully populated signal record attached to every ranked product before
/// the sort comparison runs. Missing or non-finite inputs score 0.0 (worst
/// case); nothing propagates as "missing" through the comparator.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RankingSignals {
	pub similarity: f32,
	pub price_match: f32,
	pub stock_availability: f32,
	pub popularity: f32,
	pub recency: f32,
}

#[derive(Clone, Debug, Serialize)]
pub struct RankedProduct {
	pub product: CommerceProduct,
	pub signals: RankingSignals,
	pub final_score: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RankOptions {
	pub user_budget: Option<f64>,
}

/// Scores candidates in input order without reordering them. Output is
/// aligned index-for-index with `products`.
pub fn compute_signals(
	products: &[CommerceProduct],
	options: &RankOptions,
	weights: &RankingWeights,
	now: OffsetDateTime,
) -> Vec<(RankingSignals, f32)> {
	let max_sales = products.iter().map(|product| product.total_sales).max().unwrap_or(0);

	products
		.iter()
		.map(|product| {
			let signals = RankingSignals {
				similarity: clamp_signal(product.similarity),
				price_match: price_match(product.price, options.user_budget),
				stock_availability: stock_availability(product.stock_status),
				popularity: popularity(product.total_sales, max_sales),
				recency: recency(product.date_created, now, weights.recency_tau_days),
			};
			let final_score = weights.similarity_weight * signals.similarity
				+ weights.price_weight * signals.price_match
				+ weights.stock_weight * signals.stock_availability
				+ weights.popularity_weight * signals.popularity
				+ weights.recency_weight * signals.recency;

			(signals, final_score)
		})
		.collect()
}

/// Annotates every product with its signals and sorts by weighted score,
/// descending. The sort is stable: equally scored candidates keep their
/// original relative order.
pub fn rank(
	products: Vec<CommerceProduct>,
	options: &RankOptions,
	weights: &RankingWeights,
	now: OffsetDateTime,
) -> Vec<RankedProduct> {
	let scored = compute_signals(&products, options, weights, now);
	let mut ranked: Vec<RankedProduct> = products
		.into_iter()
		.zip(scored)
		.map(|(product, (signals, final_score))| RankedProduct { product, signals, final_score })
		.collect();

	ranked.sort_by(|a, b| cmp_f32_desc(a.final_score, b.final_score));

	ranked
}

/// 1.0 at or under budget, 0.0 past twice the budget, linear in between.
/// Neutral (1.0) when no budget was supplied.
fn price_match(price: f64, user_budget: Option<f64>) -> f32 {
	let Some(budget) = user_budget.filter(|budget| *budget > 0.0) else {
		return 1.0;
	};

	if !price.is_finite() || price < 0.0 {
		return 0.0;
	}
	if price <= budget {
		return 1.0;
	}
	if price > 2.0 * budget {
		return 0.0;
	}

	(1.0 - (price - budget) / budget) as f32
}

fn stock_availability(status: StockStatus) -> f32 {
	match status {
		StockStatus::InStock => 1.0,
		StockStatus::OnBackorder => 0.5,
		StockStatus::OutOfStock => 0.0,
	}
}

fn popularity(total_sales: u64, max_sales: u64) -> f32 {
	if max_sales == 0 {
		return 0.0;
	}

	(total_sales as f32 / max_sales as f32).clamp(0.0, 1.0)
}

fn recency(date_created: OffsetDateTime, now: OffsetDateTime, tau_days: f32) -> f32 {
	if tau_days <= 0.0 {
		return 1.0;
	}

	let age_days = (now - date_created).as_seconds_f32() / 86_400.0;

	if age_days <= 0.0 {
		return 1.0;
	}

	(-age_days / tau_days).exp().clamp(0.0, 1.0)
}

fn clamp_signal(value: f32) -> f32 {
	if !value.is_finite() {
		return 0.0;
	}

	value.clamp(0.0, 1.0)
}

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

/// Share of query tokens present in a product name; the similarity a
/// provider-native candidate enters the ranking with.
pub fn lexical_overlap(query: &str, name: &str) -> f32 {
	let query_tokens: Vec<String> = tokenize(query);

	if query_tokens.is_empty() {
		return 0.0;
	}

	let name_tokens: Vec<String> = tokenize(name);
	let matched =
		query_tokens.iter().filter(|token| name_tokens.contains(token)).count();

	matched as f32 / query_tokens.len() as f32
}

fn tokenize(text: &str) -> Vec<String> {
	text.split(|ch: char| !ch.is_alphanumeric())
		.filter(|token| !token.is_empty())
		.map(|token| token.to_lowercase())
		.collect()
}
