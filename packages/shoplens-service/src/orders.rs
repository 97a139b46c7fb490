use std::time::Instant;

use serde_json::Value;

use shoplens_domain::{SearchResult, classify, normalize_domain};

use crate::{
	Error, ErrorCode, ExecutionContext, LookupService, OrderLookupRequest, ResultEnvelope,
	StockCheckRequest, strategy::Source, telemetry::FailureKind,
};

impl LookupService {
	/// Order lookup has no fallback tiers: without a configured platform it
	/// fails with `NO_PROVIDER`, and a provider exception surfaces as
	/// `PROVIDER_ERROR`.
	pub async fn lookup_order(
		&self,
		ctx: &ExecutionContext,
		req: OrderLookupRequest,
	) -> ResultEnvelope<Vec<SearchResult>> {
		let started = Instant::now();

		if let Err(err) = req.validate(&self.cfg.limits) {
			return ResultEnvelope::from_error(err, ErrorCode::LookupOrderError, started);
		}

		let Some(domain) = normalize_domain(&ctx.domain) else {
			return ResultEnvelope::invalid_domain(started);
		};
		let Some(provider) = self.providers.commerce.resolve(&domain) else {
			return ResultEnvelope::from_error(Error::NoProvider, ErrorCode::LookupOrderError, started);
		};
		let order_id = req.order_id.trim();
		let email = req.email.as_deref().map(str::trim);
		let platform = provider.platform();

		tracing::info!(
			trace_id = %ctx.trace_id,
			tenant_id = %ctx.tenant_id,
			platform = platform.as_str(),
			"Order lookup started."
		);

		match provider.lookup_order(order_id, email).await {
			Ok(Some(native)) => {
				let Some(result) = shoplens_providers::format_order(platform, &native, &domain)
				else {
					return ResultEnvelope::fatal(
						ErrorCode::LookupOrderError,
						"Order payload could not be read.".to_string(),
						started,
					);
				};

				ResultEnvelope::success(
					vec![result],
					started,
					Some(Source::ProviderOrder(platform).label()),
				)
			},
			Ok(None) => {
				self.record_failure(
					order_id,
					classify(order_id),
					FailureKind::NotFound,
					Some(platform),
					Vec::new(),
				);

				ResultEnvelope::not_found(
					ErrorCode::OrderNotFound,
					format!("Order {order_id} was not found."),
					None,
					started,
					Some(Source::NotFound.label()),
				)
			},
			Err(err) => {
				tracing::warn!(trace_id = %ctx.trace_id, error = %err, "Order lookup failed.");
				self.record_failure(
					order_id,
					classify(order_id),
					FailureKind::ApiError,
					Some(platform),
					Vec::new(),
				);

				ResultEnvelope::fatal(ErrorCode::ProviderError, err.to_string(), started)
			},
		}
	}

	/// Stock probe for a single product id, passed through the provider.
	pub async fn check_stock(
		&self,
		ctx: &ExecutionContext,
		req: StockCheckRequest,
	) -> ResultEnvelope<Value> {
		let started = Instant::now();

		if let Err(err) = req.validate(&self.cfg.limits) {
			return ResultEnvelope::from_error(err, ErrorCode::CheckStockError, started);
		}

		let Some(domain) = normalize_domain(&ctx.domain) else {
			return ResultEnvelope::invalid_domain(started);
		};
		let Some(provider) = self.providers.commerce.resolve(&domain) else {
			return ResultEnvelope::from_error(Error::NoProvider, ErrorCode::CheckStockError, started);
		};
		let product_id = req.product_id.trim();
		let platform = provider.platform();

		match provider.check_stock(product_id).await {
			Ok(Some(native)) => ResultEnvelope::success(
				native,
				started,
				Some(Source::ProviderStock(platform).label()),
			),
			Ok(None) => ResultEnvelope::not_found(
				ErrorCode::ProductNotFound,
				format!("Product {product_id} was not found."),
				None,
				started,
				Some(Source::NotFound.label()),
			),
			Err(err) => {
				tracing::warn!(trace_id = %ctx.trace_id, error = %err, "Stock check failed.");

				ResultEnvelope::fatal(ErrorCode::ProviderError, err.to_string(), started)
			},
		}
	}
}
