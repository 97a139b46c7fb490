/// Normalizes a raw tenant domain into a lowercase host with the scheme,
/// `www.` prefix, and any path suffix removed.
///
/// Returns `None` for empty input and for loopback hosts; callers must check
/// the sentinel before running any lookup strategy.
pub fn normalize_domain(raw: &str) -> Option<String> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}

	let mut host = trimmed.to_ascii_lowercase();

	for scheme in ["https://", "http://"] {
		if let Some(rest) = host.strip_prefix(scheme) {
			host = rest.to_string();

			break;
		}
	}

	if let Some(rest) = host.strip_prefix("www.") {
		host = rest.to_string();
	}
	if let Some(idx) = host.find(['/', '?', '#']) {
		host.truncate(idx);
	}

	let bare = host.split(':').next().unwrap_or("");

	if bare.is_empty() || bare == "localhost" || bare == "127.0.0.1" {
		return None;
	}

	Some(host)
}
