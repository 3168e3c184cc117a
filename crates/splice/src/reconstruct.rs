//! Candidate collection and class list rewriting.

use tracing::debug;
use weft_classlist::{Classlist, has_placeholder};
use weft_order::{OrderResolver, sort_tokens};

use crate::{AttributePart, Node, Property, Result, SortOptions, Span, TemplateElement, Violation, split_template_element};

/// Rule name of unsorted class list violations.
pub const SORT_RULE: &str = "sort-classes";
const SORT_MESSAGE: &str = "classes should be sorted";

/// A located class-bearing span.
///
/// A fix replaces `range` with `prefix`, the rebuilt body and `suffix`; the
/// prefix and suffix are the delimiters a template chunk span carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'s> {
	/// Replaced source range.
	pub range: Span,
	/// Text kept before the body.
	pub prefix: &'s str,
	/// Class text.
	pub body: &'s str,
	/// Text kept after the body.
	pub suffix: &'s str,
}

/// Collects every sortable class span reachable from `roots`.
///
/// Spans holding a `{{` placeholder or fewer than two classes are left out.
pub fn collect_candidates<'s>(source: &'s str, roots: &[Node], options: &SortOptions) -> Vec<Candidate<'s>> {
	let mut collector = Collector {
		source,
		options,
		out: Vec::new(),
	};
	for root in roots {
		collector.root(root);
	}
	collector.out
}

/// Checks `roots` and returns a violation for every span whose classes are
/// out of order or duplicated.
///
/// All distinct tokens of the file are resolved in one batch. Violations are
/// ordered by range start.
pub fn sort_classes(
	source: &str,
	roots: &[Node],
	options: &SortOptions,
	resolver: &OrderResolver,
) -> Result<Vec<Violation>> {
	let candidates = collect_candidates(source, roots, options);
	if candidates.is_empty() {
		return Ok(Vec::new());
	}

	let lists: Vec<Classlist<'_>> = candidates.iter().map(|c| Classlist::parse(c.body)).collect();
	let orders = resolver.resolve(lists.iter().flat_map(|list| list.tokens.iter().copied()))?;
	debug!(spans = candidates.len(), tokens = orders.len(), "resolved class order");

	let mut violations: Vec<Violation> = candidates
		.iter()
		.zip(&lists)
		.filter_map(|(candidate, list)| {
			let sorted = sort_tokens(&list.tokens, &orders);
			let rebuilt = list.rebuild(&sorted, options.remove_duplicates);
			(rebuilt != candidate.body).then(|| Violation {
				rule: SORT_RULE,
				range: candidate.range.clone(),
				replacement: format!("{}{}{}", candidate.prefix, rebuilt, candidate.suffix),
				message: SORT_MESSAGE.to_string(),
			})
		})
		.collect();

	violations.sort_by_key(|v| (v.range.start, v.range.end));
	violations.dedup_by(|a, b| a.range == b.range);
	Ok(violations)
}

/// Sorts a bare class string; placeholder and single-class strings come back unchanged.
pub fn sort_class_string(raw: &str, resolver: &OrderResolver, remove_duplicates: bool) -> Result<String> {
	if has_placeholder(raw) {
		return Ok(raw.to_string());
	}
	let list = Classlist::parse(raw);
	if !list.is_sortable() {
		return Ok(raw.to_string());
	}
	let orders = resolver.resolve(list.tokens.iter().copied())?;
	Ok(list.rebuild(&sort_tokens(&list.tokens, &orders), remove_duplicates))
}

struct Collector<'s, 'o> {
	source: &'s str,
	options: &'o SortOptions,
	out: Vec<Candidate<'s>>,
}

impl<'s> Collector<'s, '_> {
	/// Entry points: calls, tagged templates, declarators and class attributes.
	fn root(&mut self, node: &Node) {
		match node {
			Node::Call { callee, arguments, .. } => {
				if callee.name().is_some_and(|name| self.options.is_callee(&name)) {
					for arg in arguments {
						self.visit(arg);
					}
				}
			}
			Node::TaggedTemplate { tag, quasi, .. } => {
				if tag.name().is_some_and(|name| self.options.is_tag(&name)) {
					self.visit(quasi);
				}
			}
			Node::Declarator { .. } => self.visit(node),
			Node::ClassAttribute { parts, .. } => {
				for part in parts {
					match part {
						AttributePart::Text { span } => self.push_text(span.clone()),
						AttributePart::Mustache { expression, .. } => match expression {
							Node::Call { .. } => self.root(expression),
							_ => self.visit(expression),
						},
					}
				}
			}
			_ => {}
		}
	}

	fn visit(&mut self, node: &Node) {
		match node {
			Node::Array { elements, .. } => {
				for element in elements {
					self.visit(element);
				}
			}
			Node::Binary { left, right, .. } => {
				self.visit(left);
				self.visit(right);
			}
			Node::Logical { right, .. } => self.visit(right),
			Node::Conditional {
				consequent, alternate, ..
			} => {
				self.visit(consequent);
				self.visit(alternate);
			}
			Node::Literal { span } => {
				if span.len() >= 2 {
					self.push_text(span.start + 1..span.end - 1);
				}
			}
			Node::Object { properties, .. } => {
				for property in properties {
					if let Property::KeyValue { key, value } = property
						&& !self.is_ignored_key(key)
					{
						self.visit(key);
						self.visit(value);
					}
				}
			}
			Node::Template {
				quasis, expressions, ..
			} => {
				for expression in expressions {
					self.visit(expression);
				}
				for quasi in quasis {
					self.push_template(quasi);
				}
			}
			Node::Declarator { name, init, .. } => {
				if let Some(name) = name
					&& let Some(init) = init
					&& self.options.declarations.matches(name)
				{
					self.visit(init);
				}
			}
			Node::Identifier { .. }
			| Node::TaggedTemplate { .. }
			| Node::Call { .. }
			| Node::ClassAttribute { .. }
			| Node::Other { .. } => {}
		}
	}

	fn is_ignored_key(&self, key: &Node) -> bool {
		match key {
			Node::Identifier { name, .. } => self.options.is_ignored_key(name),
			Node::Literal { span } if span.len() >= 2 => self
				.source
				.get(span.start + 1..span.end - 1)
				.is_some_and(|name| self.options.is_ignored_key(name)),
			_ => false,
		}
	}

	fn push_text(&mut self, range: Span) {
		if let Some(body) = self.source.get(range.clone()) {
			self.push(Candidate {
				range,
				prefix: "",
				body,
				suffix: "",
			});
		}
	}

	fn push_template(&mut self, element: &TemplateElement) {
		let Some(text) = self.source.get(element.span.clone()) else {
			return;
		};
		if let Some((prefix, body, suffix)) = split_template_element(text, &element.raw) {
			self.push(Candidate {
				range: element.span.clone(),
				prefix,
				body,
				suffix,
			});
		}
	}

	fn push(&mut self, candidate: Candidate<'s>) {
		if has_placeholder(candidate.body) || !Classlist::parse(candidate.body).is_sortable() {
			return;
		}
		self.out.push(candidate);
	}
}

#[cfg(test)]
mod tests;
