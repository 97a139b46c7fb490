use std::sync::Arc;

use shoplens_providers::Platform;
use shoplens_service::{FailureKind, ProductDetailsRequest};
use shoplens_testkit::{
	DetailScript, IndexScript, ScriptedExactIndex, ScriptedSemanticSearch, search_result,
};

use super::{ctx, service_with, woo};

fn details(query: &str) -> ProductDetailsRequest {
	ProductDetailsRequest { product_query: query.to_string(), include_specs: true }
}

#[tokio::test]
async fn exhausted_chain_records_a_not_found_event_with_suggestions() {
	let provider = Arc::new(
		woo().with_detail(DetailScript::Suggestions(vec!["Trail Running Shoes".to_string()])),
	);
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, sink) = service_with(provider, exact, semantic);

	let envelope = service.product_details(&ctx(), details("TRS-88-XXX")).await;

	assert!(!envelope.success);

	let events = sink.wait_for_events(1).await;

	assert_eq!(events.len(), 1);
	assert_eq!(events[0].query, "TRS-88-XXX");
	assert_eq!(events[0].error_type, FailureKind::NotFound);
	assert_eq!(events[0].platform, Some(Platform::WooCommerce));
	assert_eq!(events[0].suggestions, vec!["Trail Running Shoes".to_string()]);
}

#[tokio::test]
async fn recovered_provider_failure_still_records_an_api_error() {
	let provider = Arc::new(woo().with_detail(DetailScript::Fail("upstream 500".to_string())));
	let exact = Arc::new(ScriptedExactIndex::new(IndexScript::Results(vec![search_result(
		"Trail Running Shoes",
		"https://shop.example.com/product/88/",
		1.0,
	)])));
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, sink) = service_with(provider, exact, semantic);

	let envelope = service.product_details(&ctx(), details("TRS-88-BLK")).await;

	// The lookup itself recovered; only the event trail shows the failure.
	assert!(envelope.success);

	let events = sink.wait_for_events(1).await;

	assert_eq!(events.len(), 1);
	assert_eq!(events[0].error_type, FailureKind::ApiError);
	assert_eq!(events[0].platform, Some(Platform::WooCommerce));
}

#[tokio::test]
async fn successful_lookups_record_nothing() {
	let provider = Arc::new(woo().with_detail(DetailScript::Found(
		shoplens_testkit::woo_product(88, "Trail Running Shoes", "89.00"),
	)));
	let exact = Arc::new(ScriptedExactIndex::empty());
	let semantic = Arc::new(ScriptedSemanticSearch::empty());
	let (service, sink) = service_with(provider, exact, semantic);

	let envelope = service.product_details(&ctx(), details("TRS-88-BLK")).await;

	assert!(envelope.success);

	tokio::time::sleep(std::time::Duration::from_millis(50)).await;

	assert!(sink.events().is_empty());
}
