use crate::{Span, Violation};

/// Rule name of `@apply` in a style block not marked as PostCSS.
pub const STYLE_LANG_RULE: &str = "at-apply-require-postcss";
const STYLE_LANG_MESSAGE: &str = "using '@apply' requires setting style lang to postcss";
const POSTCSS_LANG: &str = "lang=\"postcss\"";

/// A `<style>` element of a markup document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBlock {
	/// Index of the `>` closing the start tag.
	pub tag_end: usize,
	/// The start tag's `lang` attribute.
	pub lang: Option<LangAttribute>,
	/// Element content.
	pub body: Span,
}

/// A `lang` attribute of a style start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangAttribute {
	/// Whole attribute, name through value.
	pub span: Span,
	/// Value without quotes; `None` for a bare `lang`.
	pub value: Option<Span>,
}

/// Checks that a style block using `@apply` is marked `lang="postcss"`.
///
/// The fix replaces an existing `lang` attribute, or inserts one just before
/// the end of the start tag.
pub fn check_style_lang(source: &str, style: &StyleBlock) -> Option<Violation> {
	let lang = style
		.lang
		.as_ref()
		.and_then(|lang| lang.value.clone())
		.and_then(|value| source.get(value));
	if lang == Some("postcss") || !uses_apply(source.get(style.body.clone())?) {
		return None;
	}

	let (range, replacement) = match &style.lang {
		Some(attribute) => (attribute.span.clone(), POSTCSS_LANG.to_string()),
		None => (style.tag_end..style.tag_end, format!(" {POSTCSS_LANG}")),
	};
	Some(Violation {
		rule: STYLE_LANG_RULE,
		range,
		replacement,
		message: STYLE_LANG_MESSAGE.to_string(),
	})
}

/// Returns true when `css` holds an `@apply` at-rule outside comments and strings.
fn uses_apply(css: &str) -> bool {
	let bytes = css.as_bytes();
	let mut i = 0;
	while let Some(&byte) = bytes.get(i) {
		match byte {
			b'/' if bytes.get(i + 1) == Some(&b'*') => {
				i = css[i + 2..].find("*/").map_or(bytes.len(), |end| i + 2 + end + 2);
			}
			quote @ (b'"' | b'\'') => {
				i += 1;
				while let Some(&b) = bytes.get(i) {
					i += if b == b'\\' { 2 } else { 1 };
					if b == quote {
						break;
					}
				}
			}
			b'@' if css[i + 1..].starts_with("apply")
				&& !bytes
					.get(i + 6)
					.is_some_and(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_')) =>
			{
				return true;
			}
			_ => i += 1,
		}
	}
	false
}
