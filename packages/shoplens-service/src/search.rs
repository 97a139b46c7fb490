use std::time::Instant;

use serde_json::Value;
use time::OffsetDateTime;

use shoplens_domain::{CommerceProduct, QueryKind, SearchResult, classify, extract_budget, normalize_domain};
use shoplens_providers::Platform;

use crate::{
	ErrorCode, ExecutionContext, LookupService, ProductSearchRequest, CategorySearchRequest,
	Result, ResultEnvelope,
	ranking::{self, RankOptions},
	strategy::{ErrorPolicy, Source, StrategyResult, Tier, search_plan},
	telemetry::FailureKind,
};

impl LookupService {
	/// Plain product search. SKU-shaped queries consult the exact index
	/// before any provider call; free-text queries go provider-then-semantic,
	/// with provider results re-ranked on business signals.
	pub async fn search_products(
		&self,
		ctx: &ExecutionContext,
		req: ProductSearchRequest,
	) -> ResultEnvelope<Vec<SearchResult>> {
		let started = Instant::now();

		if let Err(err) = req.validate(&self.cfg.limits) {
			return ResultEnvelope::from_error(err, ErrorCode::SearchError, started);
		}

		let Some(domain) = normalize_domain(&ctx.domain) else {
			return ResultEnvelope::invalid_domain(started);
		};
		let query = req.query.trim().to_string();
		let kind = classify(&query);
		let limit = req.limit.unwrap_or(self.cfg.limits.default_search_limit);

		tracing::info!(
			trace_id = %ctx.trace_id,
			tenant_id = %ctx.tenant_id,
			domain = %domain,
			query_type = kind.as_str(),
			limit,
			"Product search started."
		);

		match self.run_search_chain(ctx, &domain, &query, kind, limit).await {
			Ok(outcome) if outcome.success => {
				let source = outcome.source.label();

				ResultEnvelope::success(outcome.results, started, Some(source))
			},
			Ok(outcome) => ResultEnvelope::not_found(
				ErrorCode::ProductNotFound,
				outcome.error_message.unwrap_or_else(|| "No products found.".to_string()),
				None,
				started,
				Some(outcome.source.label()),
			),
			Err(err) => {
				tracing::warn!(trace_id = %ctx.trace_id, error = %err, "Product search failed.");

				ResultEnvelope::from_error(err, ErrorCode::SearchError, started)
			},
		}
	}

	/// Category lookup: a semantic pass over the category text at the
	/// caller-supplied threshold. Category names are free text, never
	/// SKU-shaped, so no other tier applies.
	pub async fn search_category(
		&self,
		ctx: &ExecutionContext,
		req: CategorySearchRequest,
	) -> ResultEnvelope<Vec<SearchResult>> {
		let started = Instant::now();

		if let Err(err) = req.validate(&self.cfg.limits) {
			return ResultEnvelope::from_error(err, ErrorCode::SearchError, started);
		}

		let Some(domain) = normalize_domain(&ctx.domain) else {
			return ResultEnvelope::invalid_domain(started);
		};
		let category = req.category.trim();
		let limit = req.limit.unwrap_or(self.cfg.limits.default_search_limit);
		let threshold =
			req.threshold.unwrap_or(self.cfg.limits.default_category_threshold);
		let lookup = async {
			let results: Vec<SearchResult> = self
				.providers
				.semantic
				.search_similar_content(category, &domain, limit, threshold)
				.await?;

			Result::Ok(results)
		};

		match lookup.await {
			Ok(results) =>
				ResultEnvelope::success(results, started, Some(Source::Semantic.label())),
			Err(err) => {
				tracing::warn!(trace_id = %ctx.trace_id, error = %err, "Category search failed.");

				ResultEnvelope::from_error(err, ErrorCode::SearchError, started)
			},
		}
	}

	async fn run_search_chain(
		&self,
		ctx: &ExecutionContext,
		domain: &str,
		query: &str,
		kind: QueryKind,
		limit: u32,
	) -> Result<StrategyResult> {
		let provider = self.providers.commerce.resolve(domain);
		let platform = provider.as_ref().map(|provider| provider.platform());
		let plan = search_plan(kind);

		for entry in plan {
			match entry.tier {
				Tier::ExactMatch(path) => {
					let results = self
						.providers
						.exact
						.exact_match_search(query, domain, self.cfg.search.exact_match_limit)
						.await?;

					if !results.is_empty() {
						return Ok(StrategyResult::hit(results, path.source(), platform));
					}
				},
				Tier::Provider => {
					let Some(provider) = provider.as_ref() else { continue };
					let capped = self.adaptive_limit(query, limit);

					match provider.search_products(query, capped).await {
						Ok(natives) => {
							let results = self.rank_provider_results(
								query,
								provider.platform(),
								&natives,
								domain,
							);

							if !results.is_empty() {
								return Ok(StrategyResult::hit(
									results,
									Source::ProviderSearch(provider.platform()),
									platform,
								));
							}
						},
						Err(err) => match entry.on_error {
							ErrorPolicy::Recover => {
								tracing::warn!(
									trace_id = %ctx.trace_id,
									error = %err,
									"Provider search failed; falling back to semantic search."
								);
								self.record_failure(
									query,
									kind,
									FailureKind::ApiError,
									platform,
									Vec::new(),
								);
							},
							ErrorPolicy::Propagate =>
								return Err(crate::Error::Provider { message: err.to_string() }),
						},
					}
				},
				Tier::Semantic => {
					let results = self.semantic_lookup(query, domain, false).await?;

					return Ok(StrategyResult::hit(results, Source::Semantic, platform));
				},
			}
		}

		self.record_failure(query, kind, FailureKind::NotFound, platform, Vec::new());

		Ok(StrategyResult::miss("No products found.", Vec::new(), platform))
	}

	/// Queries with more words than the configured threshold are
	/// unconstrained free text; their provider result cap is tightened to
	/// bound latency.
	fn adaptive_limit(&self, query: &str, requested: u32) -> u32 {
		let words = query.split_whitespace().count() as u32;

		if words > self.cfg.search.adaptive_word_limit {
			requested.min(self.cfg.search.adaptive_result_cap)
		} else {
			requested
		}
	}

	fn rank_provider_results(
		&self,
		query: &str,
		platform: Platform,
		natives: &[Value],
		domain: &str,
	) -> Vec<SearchResult> {
		let mut candidates: Vec<(CommerceProduct, SearchResult)> = Vec::new();

		for native in natives {
			let Some(mut product) = shoplens_providers::parse_commerce_product(platform, native)
			else {
				continue;
			};
			let Some(formatted) = shoplens_providers::format_product(platform, native, domain)
			else {
				continue;
			};
			let overlap = ranking::lexical_overlap(query, &product.name);

			product.similarity = overlap;
			product.relevance = overlap;

			candidates.push((product, formatted));
		}

		if candidates.is_empty() {
			return Vec::new();
		}

		let products: Vec<CommerceProduct> =
			candidates.iter().map(|(product, _)| product.clone()).collect();
		let options = RankOptions { user_budget: extract_budget(query) };
		let scored = ranking::compute_signals(
			&products,
			&options,
			&self.cfg.ranking,
			OffsetDateTime::now_utc(),
		);
		let mut order: Vec<(usize, f32)> = scored
			.iter()
			.enumerate()
			.map(|(idx, (_, final_score))| (idx, *final_score))
			.collect();

		order.sort_by(|a, b| ranking::cmp_f32_desc(a.1, b.1));

		order
			.into_iter()
			.map(|(idx, final_score)| {
				let mut result = candidates[idx].1.clone();

				result.similarity = final_score.clamp(0.0, 1.0);

				result
			})
			.collect()
	}
}
