use std::time::Instant;

use shoplens_domain::{QueryKind, SearchResult, classify, normalize_domain};

use crate::{
	Error, ErrorCode, ExecutionContext, LookupService, ProductDetailsRequest, ProductLookup,
	Result, ResultEnvelope,
	strategy::{
		ErrorPolicy, Source, StrategyResult, Tier, detail_plan_after_provider_error,
		detail_plan_after_provider_miss, initial_detail_plan,
	},
	telemetry::FailureKind,
};

impl LookupService {
	/// Single-product detail lookup: provider first, then the exact index
	/// and semantic search per the fallback rules for the query kind.
	pub async fn product_details(
		&self,
		ctx: &ExecutionContext,
		req: ProductDetailsRequest,
	) -> ResultEnvelope<Vec<SearchResult>> {
		let started = Instant::now();

		if let Err(err) = req.validate(&self.cfg.limits) {
			return ResultEnvelope::from_error(err, ErrorCode::GetProductDetailsError, started);
		}

		let Some(domain) = normalize_domain(&ctx.domain) else {
			return ResultEnvelope::invalid_domain(started);
		};
		let query = req.product_query.trim().to_string();
		let kind = classify(&query);

		tracing::info!(
			trace_id = %ctx.trace_id,
			tenant_id = %ctx.tenant_id,
			domain = %domain,
			query_type = kind.as_str(),
			"Product detail lookup started."
		);

		match self.run_detail_chain(ctx, &domain, &query, kind, req.include_specs).await {
			Ok(outcome) if outcome.success => {
				let source = outcome.source.label();

				ResultEnvelope::success(outcome.results, started, Some(source))
			},
			Ok(outcome) => {
				let details = (!outcome.suggestions.is_empty())
					.then(|| serde_json::json!({ "suggestions": outcome.suggestions }));
				let message = outcome
					.error_message
					.unwrap_or_else(|| "Product not found.".to_string());

				ResultEnvelope::not_found(
					ErrorCode::ProductNotFound,
					message,
					details,
					started,
					Some(outcome.source.label()),
				)
			},
			Err(err) => {
				tracing::warn!(trace_id = %ctx.trace_id, error = %err, "Product detail lookup failed.");

				ResultEnvelope::from_error(err, ErrorCode::GetProductDetailsError, started)
			},
		}
	}

	async fn run_detail_chain(
		&self,
		ctx: &ExecutionContext,
		domain: &str,
		query: &str,
		kind: QueryKind,
		include_specs: bool,
	) -> Result<StrategyResult> {
		let provider = self.providers.commerce.resolve(domain);
		let platform = provider.as_ref().map(|provider| provider.platform());
		let mut plan = initial_detail_plan(provider.is_some(), kind);
		let mut suggestions: Vec<String> = Vec::new();
		let mut next = 0;

		while next < plan.len() {
			let entry = plan[next];

			next += 1;

			match entry.tier {
				Tier::Provider => {
					let Some(provider) = provider.as_ref() else { continue };

					match provider.get_product_details(query).await {
						Ok(ProductLookup::Found(native)) => {
							if let Some(result) = shoplens_providers::format_product(
								provider.platform(),
								&native,
								domain,
							) {
								return Ok(StrategyResult::hit(
									vec![result],
									Source::ProviderDetail(provider.platform()),
									platform,
								));
							}

							tracing::warn!(
								trace_id = %ctx.trace_id,
								platform = provider.platform().as_str(),
								"Provider product could not be formatted; continuing to the next tier."
							);

							plan = detail_plan_after_provider_miss(kind);
							next = 0;
						},
						Ok(ProductLookup::Suggestions(list)) => {
							// Fuzzy matches are a miss with hints attached,
							// never a success.
							suggestions = list;
							plan = detail_plan_after_provider_miss(kind);
							next = 0;
						},
						Ok(ProductLookup::NotFound) => {
							plan = detail_plan_after_provider_miss(kind);
							next = 0;
						},
						Err(err) => match entry.on_error {
							ErrorPolicy::Recover => {
								tracing::warn!(
									trace_id = %ctx.trace_id,
									error = %err,
									"Provider detail call failed; falling back one tier."
								);
								self.record_failure(
									query,
									kind,
									FailureKind::ApiError,
									platform,
									Vec::new(),
								);

								plan = detail_plan_after_provider_error(kind);
								next = 0;
							},
							ErrorPolicy::Propagate =>
								return Err(Error::Provider { message: err.to_string() }),
						},
					}
				},
				Tier::ExactMatch(path) => {
					// Exact-index exceptions bypass the semantic fallback by
					// contract: `?` carries them to the operation's
					// top-level catch.
					let results = self
						.providers
						.exact
						.exact_match_search(query, domain, self.cfg.search.exact_match_limit)
						.await?;

					if !results.is_empty() {
						return Ok(StrategyResult::hit(results, path.source(), platform));
					}
				},
				Tier::Semantic => {
					let results = self.semantic_lookup(query, domain, include_specs).await?;

					// Semantic search never signals not-found, only "zero
					// matches above threshold".
					return Ok(StrategyResult::hit(results, Source::Semantic, platform));
				},
			}
		}

		self.record_failure(query, kind, FailureKind::NotFound, platform, suggestions.clone());

		Ok(StrategyResult::miss("Product not found.", suggestions, platform))
	}

	pub(crate) async fn semantic_lookup(
		&self,
		query: &str,
		domain: &str,
		expand_specs: bool,
	) -> Result<Vec<SearchResult>> {
		let expanded = if expand_specs {
			format!("{query} specifications technical details features")
		} else {
			query.to_string()
		};
		let results = self
			.providers
			.semantic
			.search_similar_content(
				&expanded,
				domain,
				self.cfg.search.semantic_limit,
				self.cfg.search.min_similarity,
			)
			.await?;

		Ok(results)
	}
}
