use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::mpsc;

use shoplens_domain::QueryKind;
use shoplens_providers::Platform;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
	NotFound,
	ApiError,
}
impl FailureKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::NotFound => "not_found",
			Self::ApiError => "api_error",
		}
	}
}

/// One user-visible lookup miss, written once and never mutated.
#[derive(Clone, Debug, Serialize)]
pub struct LookupFailureEvent {
	pub query: String,
	pub query_type: QueryKind,
	pub error_type: FailureKind,
	pub platform: Option<Platform>,
	pub suggestions: Vec<String>,
	#[serde(with = "shoplens_domain::time_serde")]
	pub timestamp: OffsetDateTime,
}

/// Destination for failure events. Implementations may fail; the recorder
/// logs and drops such failures instead of surfacing them.
pub trait TelemetrySink
where
	Self: Send + Sync,
{
	fn record(&self, event: &LookupFailureEvent) -> color_eyre::Result<()>;
}

/// Default sink: structured log line per event.
pub struct TracingSink;

impl TelemetrySink for TracingSink {
	fn record(&self, event: &LookupFailureEvent) -> color_eyre::Result<()> {
		tracing::info!(
			query = %event.query,
			query_type = event.query_type.as_str(),
			error_type = event.error_type.as_str(),
			platform = event.platform.map(|platform| platform.as_str()),
			suggestions = event.suggestions.len(),
			"Lookup failure recorded."
		);

		Ok(())
	}
}

/// Fire-and-forget recorder: `record` enqueues and returns immediately, a
/// background task drains into the sink. Never blocks the response path and
/// never propagates an error into the caller.
#[derive(Clone)]
pub struct TelemetryRecorder {
	tx: mpsc::UnboundedSender<LookupFailureEvent>,
}
impl TelemetryRecorder {
	pub fn spawn(sink: Arc<dyn TelemetrySink>) -> Self {
		let (tx, mut rx) = mpsc::unbounded_channel::<LookupFailureEvent>();

		tokio::spawn(async move {
			while let Some(event) = rx.recv().await {
				if let Err(err) = sink.record(&event) {
					tracing::warn!(error = %err, "Telemetry sink rejected a lookup-failure event.");
				}
			}
		});

		Self { tx }
	}

	pub fn record(&self, event: LookupFailureEvent) {
		if self.tx.send(event).is_err() {
			tracing::warn!("Telemetry drain task is gone; lookup-failure event dropped.");
		}
	}
}
