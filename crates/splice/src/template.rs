/// Splits a template element's source text into `(prefix, body, suffix)`.
///
/// `text` is the exact source slice of the element, delimiters included, and
/// `raw` its raw chunk text. The body is located by searching for `raw` rather
/// than by offsetting from the span ends, since delimiter widths differ between
/// the first, middle and last chunks. Returns `None` when `raw` is empty or
/// cannot be found.
pub fn split_template_element<'a>(text: &'a str, raw: &str) -> Option<(&'a str, &'a str, &'a str)> {
	if raw.is_empty() {
		return None;
	}
	let start = text.find(raw)?;
	let end = start + raw.len();
	Some((&text[..start], &text[start..end], &text[end..]))
}
