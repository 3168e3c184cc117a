/// Tokens and whitespace runs left after duplicate removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduped<'a> {
	/// Surviving tokens, no two adjacent ones equal.
	pub tokens: Vec<&'a str>,
	/// Whitespace runs matching the surviving tokens.
	pub whitespace: Vec<&'a str>,
}

/// Removes tokens equal to their immediate predecessor in `tokens`.
///
/// Every dropped token takes exactly one whitespace run with it. Without head
/// space the run before the duplicate goes (`index - 1`), with head space the
/// run at the duplicate's own index goes. Indices are computed in the original
/// index space and removed back to front, so earlier removals never shift later
/// ones.
///
/// Returns the input unchanged when `enabled` is false.
pub fn dedupe<'a>(
	tokens: &[&'a str],
	whitespace: &[&'a str],
	head_space: bool,
	tail_space: bool,
	enabled: bool,
) -> Deduped<'a> {
	if !enabled {
		return Deduped {
			tokens: tokens.to_vec(),
			whitespace: whitespace.to_vec(),
		};
	}

	debug_assert!(
		tokens.is_empty()
			|| whitespace.len() == tokens.len() - 1 + usize::from(head_space) + usize::from(tail_space),
		"whitespace runs out of step with tokens"
	);

	let mut kept = Vec::with_capacity(tokens.len());
	let mut dropped = Vec::new();
	for (i, &token) in tokens.iter().enumerate() {
		if i > 0 && token == tokens[i - 1] {
			dropped.push(if head_space { i } else { i - 1 });
		} else {
			kept.push(token);
		}
	}

	let mut runs = whitespace.to_vec();
	for index in dropped.into_iter().rev() {
		if index < runs.len() {
			runs.remove(index);
		}
	}

	Deduped {
		tokens: kept,
		whitespace: runs,
	}
}
