use std::sync::{Arc, atomic::Ordering};

use shoplens_service::{CategorySearchRequest, ErrorCode, ProductSearchRequest};
use shoplens_testkit::{
	IndexScript, ScriptedExactIndex, ScriptedSemanticSearch, SearchScript, search_result,
	woo_product,
};

use super::{ctx, service_with, woo};

fn search(query: &str) -> ProductSearchRequest {
	ProductSearchRequest { query: query.to_string(), limit: None }
}

#[tokio::test]
async fn sku_search_consults_the_exact_index_before_the_provider() {
	let provider = Arc::new(woo());
	let exact = Arc::new(ScriptedExactIndex::new(IndexScript::Results(vec![search_result(
		"Trail Running Shoes",
		"https://shop.example.com/product/88/",
		1.0,
	)])));
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_with(provider.clone(), exact, semantic);

	let envelope = service.search_products(&ctx(), search("TRS-88-BLK")).await;

	assert!(envelope.success);
	assert_eq!(envelope.metadata.source.as_deref(), Some("exact-match"));
	assert_eq!(provider.search_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn free_text_search_returns_ranked_provider_results() {
	let provider = Arc::new(woo().with_search(SearchScript::Results(vec![
		woo_product(1, "Premium Mug", "250"),
		woo_product(2, "Budget Mug", "65"),
	])));
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_with(provider.clone(), exact.clone(), semantic.clone());

	let envelope = service.search_products(&ctx(), search("mug")).await;

	assert!(envelope.success);
	assert_eq!(envelope.metadata.source.as_deref(), Some("woocommerce-search"));
	assert_eq!(envelope.data.unwrap().len(), 2);
	assert_eq!(provider.last_search_limit.load(Ordering::SeqCst), 100);
	assert_eq!(exact.calls.load(Ordering::SeqCst), 0);
	assert_eq!(semantic.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn budget_in_the_query_prefers_products_under_it() {
	let provider = Arc::new(woo().with_search(SearchScript::Results(vec![
		woo_product(1, "Premium Mug", "250"),
		woo_product(2, "Budget Mug", "65"),
	])));
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_with(provider, exact, semantic);

	let envelope = service.search_products(&ctx(), search("mug under £100")).await;
	let results = envelope.data.unwrap();

	assert_eq!(results[0].title, "Budget Mug");
	assert_eq!(results[1].title, "Premium Mug");
}

#[tokio::test]
async fn long_queries_tighten_the_provider_result_cap() {
	let provider = Arc::new(woo().with_search(SearchScript::Results(vec![woo_product(
		1,
		"Waterproof Hiking Jacket",
		"120",
	)])));
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_with(provider.clone(), exact, semantic);
	let req = ProductSearchRequest {
		query: "waterproof jacket for winter hiking".to_string(),
		limit: Some(200),
	};

	let envelope = service.search_products(&ctx(), req).await;

	assert!(envelope.success);
	assert_eq!(provider.last_search_limit.load(Ordering::SeqCst), 50);
}

#[tokio::test]
async fn provider_search_failure_recovers_through_semantic() {
	let provider = Arc::new(woo().with_search(SearchScript::Fail("upstream 500".to_string())));
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::new(IndexScript::Results(vec![
		search_result("Trail Running Shoes", "https://shop.example.com/product/88/", 0.8),
	])));
	let (service, _sink) = service_with(provider, exact, semantic.clone());

	let envelope = service.search_products(&ctx(), search("trail shoes")).await;

	assert!(envelope.success);
	assert_eq!(envelope.metadata.source.as_deref(), Some("semantic"));
	assert_eq!(semantic.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_provider_results_fall_through_to_semantic() {
	let provider = Arc::new(woo().with_search(SearchScript::Results(Vec::new())));
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::new(IndexScript::Results(vec![
		search_result("Trail Running Shoes", "https://shop.example.com/product/88/", 0.8),
	])));
	let (service, _sink) = service_with(provider, exact, semantic);

	let envelope = service.search_products(&ctx(), search("trail shoes")).await;

	assert!(envelope.success);
	assert_eq!(envelope.metadata.source.as_deref(), Some("semantic"));
}

#[tokio::test]
async fn semantic_failure_surfaces_as_a_search_error() {
	let provider = Arc::new(woo().with_search(SearchScript::Results(Vec::new())));
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic =
		Arc::new(ScriptedSemanticSearch::new(IndexScript::Fail("vectors offline".to_string())));
	let (service, _sink) = service_with(provider, exact, semantic);

	let envelope = service.search_products(&ctx(), search("trail shoes")).await;

	assert!(!envelope.success);
	assert_eq!(envelope.error.unwrap().code, ErrorCode::SearchError);
}

#[tokio::test]
async fn category_search_passes_the_caller_threshold_through() {
	let provider = Arc::new(woo());
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::new(IndexScript::Results(vec![
		search_result("Trail Running Shoes", "https://shop.example.com/product/88/", 0.5),
	])));
	let (service, _sink) = service_with(provider, exact, semantic.clone());
	let req = CategorySearchRequest {
		category: "running footwear".to_string(),
		limit: Some(25),
		threshold: Some(0.4),
	};

	let envelope = service.search_category(&ctx(), req).await;

	assert!(envelope.success);
	assert_eq!(envelope.metadata.source.as_deref(), Some("semantic"));
	assert_eq!(semantic.last_limit.load(Ordering::SeqCst), 25);
	assert_eq!(*semantic.last_min_similarity.lock().unwrap(), Some(0.4));
}

#[tokio::test]
async fn category_search_defaults_the_threshold_when_unset() {
	let provider = Arc::new(woo());
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, _sink) = service_with(provider, exact, semantic.clone());
	let req = CategorySearchRequest {
		category: "running footwear".to_string(),
		limit: None,
		threshold: None,
	};

	let envelope = service.search_category(&ctx(), req).await;

	assert!(envelope.success);
	assert_eq!(*semantic.last_min_similarity.lock().unwrap(), Some(0.15));
}
