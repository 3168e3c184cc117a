//! Lowering of tree-sitter JavaScript and TypeScript trees into splice nodes.

use tree_sitter::{Node as TsNode, Tree};
use weft_splice::{Callee, Node, Property, Span, TemplateElement};

/// Lowers nodes of a tree parsed from `text`, which starts at byte `offset`
/// of the enclosing file.
pub(crate) struct Lowerer<'t> {
	text: &'t str,
	offset: usize,
}

impl<'t> Lowerer<'t> {
	pub(crate) fn new(text: &'t str, offset: usize) -> Self {
		Self { text, offset }
	}

	/// Appends every call, tagged template and variable declarator of `tree`.
	///
	/// Nested calls are roots of their own, in pre-order.
	pub(crate) fn roots(&self, tree: &Tree, out: &mut Vec<Node>) {
		let mut cursor = tree.walk();
		loop {
			let node = cursor.node();
			match node.kind() {
				"call_expression" => out.push(self.call(node)),
				"variable_declarator" => out.push(self.declarator(node)),
				_ => {}
			}

			if cursor.goto_first_child() {
				continue;
			}
			while !cursor.goto_next_sibling() {
				if !cursor.goto_parent() {
					return;
				}
			}
		}
	}

	/// Lowers the lone expression of a program parsed from `(expression)`.
	pub(crate) fn wrapped_expression(&self, tree: &Tree) -> Option<Node> {
		let statement = named_children(tree.root_node()).into_iter().next()?;
		if statement.kind() != "expression_statement" {
			return None;
		}
		let expression = named_children(statement).into_iter().next()?;
		Some(self.expression(expression))
	}

	fn expression(&self, node: TsNode<'_>) -> Node {
		let span = self.span(node);
		match node.kind() {
			"parenthesized_expression" | "as_expression" | "satisfies_expression" | "non_null_expression" => {
				match named_children(node).into_iter().next() {
					Some(inner) => self.expression(inner),
					None => Node::Other { span },
				}
			}
			"string" => Node::Literal { span },
			"identifier" => Node::Identifier {
				span,
				name: self.text(node).to_string(),
			},
			"array" => Node::Array {
				span,
				elements: named_children(node).into_iter().map(|e| self.expression(e)).collect(),
			},
			"binary_expression" => self.binary(node),
			"ternary_expression" => self.conditional(node),
			"object" => Node::Object {
				span,
				properties: named_children(node)
					.into_iter()
					.filter_map(|p| self.property(p))
					.collect(),
			},
			"template_string" => self.template(node),
			"call_expression" => self.call(node),
			"variable_declarator" => self.declarator(node),
			_ => Node::Other { span },
		}
	}

	fn binary(&self, node: TsNode<'_>) -> Node {
		let span = self.span(node);
		let (Some(left), Some(right)) = (node.child_by_field_name("left"), node.child_by_field_name("right")) else {
			return Node::Other { span };
		};
		let left = Box::new(self.expression(left));
		let right = Box::new(self.expression(right));
		match node.child_by_field_name("operator").map(|op| op.kind()) {
			Some("&&" | "||" | "??") => Node::Logical { span, left, right },
			_ => Node::Binary { span, left, right },
		}
	}

	fn conditional(&self, node: TsNode<'_>) -> Node {
		let span = self.span(node);
		match (
			node.child_by_field_name("condition"),
			node.child_by_field_name("consequence"),
			node.child_by_field_name("alternative"),
		) {
			(Some(test), Some(consequent), Some(alternate)) => Node::Conditional {
				span,
				test: Box::new(self.expression(test)),
				consequent: Box::new(self.expression(consequent)),
				alternate: Box::new(self.expression(alternate)),
			},
			_ => Node::Other { span },
		}
	}

	fn property(&self, node: TsNode<'_>) -> Option<Property> {
		match node.kind() {
			"pair" => Some(Property::KeyValue {
				key: self.key(node.child_by_field_name("key")?),
				value: self.expression(node.child_by_field_name("value")?),
			}),
			"shorthand_property_identifier" => {
				let name = Node::Identifier {
					span: self.span(node),
					name: self.text(node).to_string(),
				};
				Some(Property::KeyValue {
					key: name.clone(),
					value: name,
				})
			}
			"method_definition" => Some(Property::KeyValue {
				key: self.key(node.child_by_field_name("name")?),
				value: Node::Other { span: self.span(node) },
			}),
			"spread_element" => Some(Property::Spread { span: self.span(node) }),
			_ => None,
		}
	}

	fn key(&self, node: TsNode<'_>) -> Node {
		let span = self.span(node);
		match node.kind() {
			"property_identifier" => Node::Identifier {
				span,
				name: self.text(node).to_string(),
			},
			"string" => Node::Literal { span },
			"computed_property_name" => match named_children(node).into_iter().next() {
				Some(inner) => self.expression(inner),
				None => Node::Other { span },
			},
			_ => Node::Other { span },
		}
	}

	/// Splits a template into chunks whose spans carry their delimiters: the
	/// first starts at the backtick, later ones at the closing brace of the
	/// previous substitution.
	fn template(&self, node: TsNode<'_>) -> Node {
		let mut quasis = Vec::new();
		let mut expressions = Vec::new();
		let mut chunk_start = node.start_byte();

		for child in named_children(node) {
			if child.kind() != "template_substitution" {
				continue;
			}
			let open = child.start_byte();
			quasis.push(self.template_element(chunk_start, open + 2, open));
			let expression = named_children(child).into_iter().next();
			expressions.push(match expression {
				Some(expression) => self.expression(expression),
				None => Node::Other { span: self.span(child) },
			});
			chunk_start = child.end_byte().saturating_sub(1);
		}

		let end = node.end_byte();
		quasis.push(self.template_element(chunk_start, end, end.saturating_sub(1)));

		Node::Template {
			span: self.span(node),
			quasis,
			expressions,
		}
	}

	fn template_element(&self, start: usize, end: usize, raw_end: usize) -> TemplateElement {
		let raw = self.text.get(start + 1..raw_end).unwrap_or_default();
		TemplateElement {
			span: start + self.offset..end + self.offset,
			raw: raw.to_string(),
		}
	}

	fn call(&self, node: TsNode<'_>) -> Node {
		let span = self.span(node);
		let callee = node
			.child_by_field_name("function")
			.map_or(Callee::Other, |function| self.callee(function));
		let Some(arguments) = node.child_by_field_name("arguments") else {
			return Node::Other { span };
		};

		if arguments.kind() == "template_string" {
			return Node::TaggedTemplate {
				span,
				tag: callee,
				quasi: Box::new(self.template(arguments)),
			};
		}

		Node::Call {
			span,
			callee,
			arguments: named_children(arguments).into_iter().map(|a| self.expression(a)).collect(),
		}
	}

	fn callee(&self, node: TsNode<'_>) -> Callee {
		match node.kind() {
			"identifier" => Callee::Identifier(self.text(node).to_string()),
			"member_expression" => {
				let object = node.child_by_field_name("object");
				let property = node.child_by_field_name("property");
				match (object, property) {
					(Some(object), Some(property))
						if object.kind() == "identifier" && property.kind() == "property_identifier" =>
					{
						Callee::Member {
							object: self.text(object).to_string(),
							property: self.text(property).to_string(),
						}
					}
					_ => Callee::Other,
				}
			}
			_ => Callee::Other,
		}
	}

	fn declarator(&self, node: TsNode<'_>) -> Node {
		let name = node
			.child_by_field_name("name")
			.filter(|name| name.kind() == "identifier")
			.map(|name| self.text(name).to_string());
		Node::Declarator {
			span: self.span(node),
			name,
			init: node
				.child_by_field_name("value")
				.map(|value| Box::new(self.expression(value))),
		}
	}

	fn span(&self, node: TsNode<'_>) -> Span {
		node.start_byte() + self.offset..node.end_byte() + self.offset
	}

	fn text(&self, node: TsNode<'_>) -> &'t str {
		self.text.get(node.start_byte()..node.end_byte()).unwrap_or_default()
	}
}

fn named_children(node: TsNode<'_>) -> Vec<TsNode<'_>> {
	let mut cursor = node.walk();
	node.named_children(&mut cursor)
		.filter(|child| !child.is_extra())
		.collect()
}
