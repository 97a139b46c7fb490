/// Strips markup from provider-supplied HTML descriptions: tags are
/// removed, the common entities decoded, and whitespace collapsed.
pub fn strip_html(raw: &str) -> String {
	let mut text = String::with_capacity(raw.len());
	let mut in_tag = false;

	for ch in raw.chars() {
		match ch {
			'<' => in_tag = true,
			'>' if in_tag => {
				in_tag = false;

				text.push(' ');
			},
			_ if in_tag => {},
			_ => text.push(ch),
		}
	}

	let decoded = decode_entities(&text);

	collapse_whitespace(&decoded)
}

fn decode_entities(text: &str) -> String {
	let replacements = [
		("&amp;", "&"),
		("&lt;", "<"),
		("&gt;", ">"),
		("&quot;", "\""),
		("&#039;", "'"),
		("&#39;", "'"),
		("&apos;", "'"),
		("&nbsp;", " "),
		("&ndash;", "-"),
		("&mdash;", "-"),
	];
	let mut out = text.to_string();

	for (entity, plain) in replacements {
		if out.contains(entity) {
			out = out.replace(entity, plain);
		}
	}

	out
}

fn collapse_whitespace(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	let mut prev_space = false;

	for ch in raw.chars() {
		if ch.is_whitespace() {
			if !prev_space {
				out.push(' ');

				prev_space = true;
			}

			continue;
		}

		out.push(ch);

		prev_space = false;
	}

	out.trim().to_string()
}
