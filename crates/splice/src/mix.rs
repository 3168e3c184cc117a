use crate::{AttributePart, Node, Violation};

/// Rule name of mixed literal/mustache class attribute violations.
pub const MIX_RULE: &str = "no-literal-mustache-mix";
const MIX_MESSAGE: &str = "do not mix literal classes with mustache expressions";

/// Checks that a quoted class attribute keeps its literal classes and its
/// mustache expressions in two groups.
///
/// Literal chunks are trimmed and joined by single spaces, mustaches are joined
/// by single spaces, and the two groups are concatenated mustaches first when
/// the value starts with a mustache and literals first otherwise. Anything that
/// is not a quoted [`Node::ClassAttribute`] with two or more parts passes.
pub fn check_mustache_mix(source: &str, node: &Node) -> Option<Violation> {
	let Node::ClassAttribute {
		span,
		quoted: true,
		parts,
	} = node
	else {
		return None;
	};
	if parts.len() < 2 || span.len() < 2 {
		return None;
	}

	let inner = span.start + 1..span.end - 1;
	let current = source.get(inner.clone())?;

	let mut literals = Vec::new();
	let mut mustaches = Vec::new();
	for part in parts {
		let text = source.get(part.span().clone())?;
		match part {
			AttributePart::Text { .. } => {
				let text = text.trim();
				if !text.is_empty() {
					literals.push(text);
				}
			}
			AttributePart::Mustache { .. } => mustaches.push(text),
		}
	}

	let literals = literals.join(" ");
	let mustaches = mustaches.join(" ");
	let mustaches_first = matches!(parts.first(), Some(AttributePart::Mustache { .. }));
	let grouped = if mustaches_first {
		format!("{mustaches} {literals}")
	} else {
		format!("{literals} {mustaches}")
	};
	let grouped = grouped.trim();

	(grouped != current).then(|| Violation {
		rule: MIX_RULE,
		range: inner,
		replacement: grouped.to_string(),
		message: MIX_MESSAGE.to_string(),
	})
}
