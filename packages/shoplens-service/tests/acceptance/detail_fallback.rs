use std::sync::{Arc, atomic::Ordering};

use shoplens_service::{ErrorCode, ProductDetailsRequest};
use shoplens_testkit::{
	DetailScript, IndexScript, ScriptedExactIndex, ScriptedSemanticSearch, search_result,
	woo_product,
};

use super::{ctx, service_with, service_without_provider, woo};

fn details(query: &str) -> ProductDetailsRequest {
	ProductDetailsRequest { product_query: query.to_string(), include_specs: true }
}

#[tokio::test]
async fn provider_hit_skips_every_fallback_tier() {
	let provider = Arc::new(
		woo().with_detail(DetailScript::Found(woo_product(88, "Trail Running Shoes", "89.00"))),
	);
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_with(provider.clone(), exact.clone(), semantic.clone());

	let envelope = service.product_details(&ctx(), details("TRS-88-BLK")).await;

	assert!(envelope.success);
	assert_eq!(envelope.metadata.source.as_deref(), Some("woocommerce-detail"));

	let results = envelope.data.unwrap();

	assert_eq!(results.len(), 1);
	assert_eq!(results[0].title, "Trail Running Shoes");
	assert_eq!(exact.calls.load(Ordering::SeqCst), 0);
	assert_eq!(semantic.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn sku_miss_with_provider_falls_to_exact_index() {
	let provider = Arc::new(woo().with_detail(DetailScript::NotFound));
	let exact = Arc::new(ScriptedExactIndex::new(IndexScript::Results(vec![search_result(
		"Trail Running Shoes",
		"https://shop.example.com/product/88/",
		1.0,
	)])));
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_with(provider, exact.clone(), semantic.clone());

	let envelope = service.product_details(&ctx(), details("TRS-88-BLK")).await;

	assert!(envelope.success);
	assert_eq!(envelope.metadata.source.as_deref(), Some("exact-match-after-provider"));
	assert_eq!(exact.calls.load(Ordering::SeqCst), 1);
	assert_eq!(semantic.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn sku_miss_with_provider_terminates_without_semantic() {
	let provider = Arc::new(woo().with_detail(DetailScript::NotFound));
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_with(provider, exact.clone(), semantic.clone());

	let envelope = service.product_details(&ctx(), details("TRS-88-BLK")).await;

	assert!(!envelope.success);
	assert_eq!(envelope.error.unwrap().code, ErrorCode::ProductNotFound);
	assert_eq!(envelope.metadata.source.as_deref(), Some("not-found"));
	assert_eq!(semantic.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn provider_error_reaches_exact_index_with_its_own_tag() {
	let provider = Arc::new(woo().with_detail(DetailScript::Fail("upstream 500".to_string())));
	let exact = Arc::new(ScriptedExactIndex::new(IndexScript::Results(vec![search_result(
		"Trail Running Shoes",
		"https://shop.example.com/product/88/",
		1.0,
	)])));
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_with(provider, exact, semantic.clone());

	let envelope = service.product_details(&ctx(), details("TRS-88-BLK")).await;

	assert!(envelope.success);
	assert_eq!(envelope.metadata.source.as_deref(), Some("exact-match-after-error"));
	assert_eq!(semantic.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn provider_error_on_name_query_degrades_to_semantic() {
	let provider = Arc::new(woo().with_detail(DetailScript::Fail("upstream 500".to_string())));
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::new(IndexScript::Results(vec![
		search_result("Trail Running Shoes", "https://shop.example.com/product/88/", 0.7),
	])));
	let (service, _sink) = service_with(provider, exact.clone(), semantic.clone());

	let envelope = service.product_details(&ctx(), details("trail running shoes")).await;

	assert!(envelope.success);
	assert_eq!(envelope.metadata.source.as_deref(), Some("semantic"));
	assert_eq!(exact.calls.load(Ordering::SeqCst), 0);
	assert_eq!(semantic.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn sku_without_provider_tries_exact_then_semantic() {
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::new(IndexScript::Results(vec![
		search_result("Trail Running Shoes", "https://shop.example.com/product/88/", 0.6),
	])));
	let (service, _sink) = service_without_provider(exact.clone(), semantic.clone());

	let envelope = service.product_details(&ctx(), details("TRS-88-BLK")).await;

	assert!(envelope.success);
	assert_eq!(envelope.metadata.source.as_deref(), Some("semantic"));
	assert_eq!(exact.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn sku_without_provider_tags_exact_hits_accordingly() {
	let exact = Arc::new(ScriptedExactIndex::new(IndexScript::Results(vec![search_result(
		"Trail Running Shoes",
		"https://shop.example.com/product/88/",
		1.0,
	)])));
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_without_provider(exact, semantic.clone());

	let envelope = service.product_details(&ctx(), details("TRS-88-BLK")).await;

	assert!(envelope.success);
	assert_eq!(envelope.metadata.source.as_deref(), Some("exact-match-no-provider"));
	assert_eq!(semantic.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn exact_index_failure_bypasses_semantic_search() {
	let provider = Arc::new(woo().with_detail(DetailScript::NotFound));
	let exact =
		Arc::new(ScriptedExactIndex::new(IndexScript::Fail("index offline".to_string())));
	let semantic = Arc::new(ScriptedSemanticSearch::new(IndexScript::Results(vec![
		search_result("Trail Running Shoes", "https://shop.example.com/product/88/", 0.9),
	])));
	let (service, _sink) = service_with(provider, exact, semantic.clone());

	let envelope = service.product_details(&ctx(), details("TRS-88-BLK")).await;

	assert!(!envelope.success);
	assert_eq!(envelope.error.unwrap().code, ErrorCode::GetProductDetailsError);
	assert_eq!(semantic.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fuzzy_suggestions_surface_in_the_not_found_details() {
	let provider = Arc::new(
		woo().with_detail(DetailScript::Suggestions(vec!["Trail Running Shoes".to_string()])),
	);
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_with(provider, exact, semantic);

	let envelope = service.product_details(&ctx(), details("TRS-88-XXX")).await;

	assert!(!envelope.success);

	let error = envelope.error.unwrap();

	assert_eq!(error.code, ErrorCode::ProductNotFound);
	assert_eq!(
		error.details.unwrap(),
		serde_json::json!({ "suggestions": ["Trail Running Shoes"] }),
	);
}

#[tokio::test]
async fn include_specs_expands_the_semantic_query() {
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_without_provider(exact, semantic.clone());

	let envelope = service.product_details(&ctx(), details("ceramic mug")).await;

	// Zero matches above threshold is still a completed semantic pass.
	assert!(envelope.success);
	assert_eq!(envelope.metadata.source.as_deref(), Some("semantic"));

	let query = semantic.last_query.lock().unwrap().clone().unwrap();

	assert_eq!(query, "ceramic mug specifications technical details features");
	assert_eq!(semantic.last_limit.load(Ordering::SeqCst), 10);
	assert_eq!(*semantic.last_min_similarity.lock().unwrap(), Some(0.2));
}

#[tokio::test]
async fn plain_lookup_keeps_the_query_verbatim() {
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_without_provider(exact, semantic.clone());
	let req = ProductDetailsRequest {
		product_query: "  ceramic mug  ".to_string(),
		include_specs: false,
	};

	let envelope = service.product_details(&ctx(), req).await;

	assert!(envelope.success);
	assert_eq!(
		semantic.last_query.lock().unwrap().as_deref(),
		Some("ceramic mug"),
	);
}
