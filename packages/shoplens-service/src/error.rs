pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid domain: {message}")]
	InvalidDomain { message: String },
	#[error("Validation failed: {field}: {reason}")]
	Validation { field: String, reason: String },
	#[error("No commerce platform is configured for this store.")]
	NoProvider,
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Lookup error: {message}")]
	Lookup { message: String },
}
impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Lookup { message: err.to_string() }
	}
}
