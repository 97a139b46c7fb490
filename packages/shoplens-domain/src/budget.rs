use regex::Regex;

const AMOUNT: &str = r"[£$€]?\s*(\d+(?:\.\d+)?)";

/// Extracts a budget magnitude from free-text phrasing such as
/// `under £100`, `less than $50`, `budget of 200`, `around €75`,
/// `up to £150`, `max $300`, or `maximum £500`.
///
/// The currency symbol is optional and discarded; only the magnitude is
/// returned. `None` when no budget phrase is present.
pub fn extract_budget(text: &str) -> Option<f64> {
	let phrases = [
		r"(?i)\bunder\s*",
		r"(?i)\bless\s+than\s*",
		r"(?i)\bcheaper\s+than\s*",
		r"(?i)\bbudget(?:\s+of)?\s*:?\s*",
		r"(?i)\b(?:around|about)\s*",
		r"(?i)\bup\s+to\s*",
		r"(?i)\bmax(?:imum)?\s*(?:of\s*)?",
	];

	for phrase in phrases {
		let Ok(re) = Regex::new(&format!("{phrase}{AMOUNT}")) else { continue };

		if let Some(caps) = re.captures(text)
			&& let Some(value) = caps.get(1)
			&& let Ok(parsed) = value.as_str().parse::<f64>()
		{
			return Some(parsed);
		}
	}

	None
}
