/// Interleaves `tokens` with `whitespace` following the head/tail layout.
///
/// Without head space each token is followed by the run at its index; with head
/// space each token is preceded by it. When the list has both head and tail
/// space the last token is wrapped by its own run and the final (tail) run.
pub fn assemble(tokens: &[&str], whitespace: &[&str], head_space: bool, tail_space: bool) -> String {
	let capacity = tokens.iter().chain(whitespace).map(|s| s.len()).sum();
	let mut out = String::with_capacity(capacity);
	let last = tokens.len().saturating_sub(1);

	for (i, token) in tokens.iter().enumerate() {
		let space = whitespace.get(i).copied().unwrap_or_default();

		if i == last && head_space && tail_space {
			out.push_str(space);
			out.push_str(token);
			out.push_str(whitespace.last().copied().unwrap_or_default());
		} else if head_space {
			out.push_str(space);
			out.push_str(token);
		} else {
			out.push_str(token);
			out.push_str(space);
		}
	}

	out
}
