//! Syntax tree shapes the reconstructor understands.
//!
//! Front ends lower their own parse trees into these nodes. Every span is a
//! byte range into the source text the tree was parsed from.

use std::ops::Range;

/// Byte range into the source text.
pub type Span = Range<usize>;

/// One syntactic form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	/// A string literal; `span` includes the quotes.
	Literal {
		/// Literal span, quotes included.
		span: Span,
	},
	/// A plain identifier.
	Identifier {
		/// Identifier span.
		span: Span,
		/// Identifier text.
		name: String,
	},
	/// `[a, b, ...]`; holes are omitted.
	Array {
		/// Whole expression.
		span: Span,
		/// Elements in source order.
		elements: Vec<Node>,
	},
	/// Any binary operator other than the logical ones.
	Binary {
		/// Whole expression.
		span: Span,
		/// Left operand.
		left: Box<Node>,
		/// Right operand.
		right: Box<Node>,
	},
	/// `&&`, `||` or `??`.
	Logical {
		/// Whole expression.
		span: Span,
		/// Left operand.
		left: Box<Node>,
		/// Right operand.
		right: Box<Node>,
	},
	/// `test ? consequent : alternate`.
	Conditional {
		/// Whole expression.
		span: Span,
		/// Condition.
		test: Box<Node>,
		/// Branch taken when the condition holds.
		consequent: Box<Node>,
		/// Branch taken otherwise.
		alternate: Box<Node>,
	},
	/// `{ key: value, ...spread }`.
	Object {
		/// Whole expression.
		span: Span,
		/// Properties in source order.
		properties: Vec<Property>,
	},
	/// A template literal.
	Template {
		/// Whole literal, backticks included.
		span: Span,
		/// Static chunks; always one more than `expressions`.
		quasis: Vec<TemplateElement>,
		/// Interpolated expressions.
		expressions: Vec<Node>,
	},
	/// `` tag`...` ``.
	TaggedTemplate {
		/// Whole expression.
		span: Span,
		/// The tag.
		tag: Callee,
		/// The template, a [`Node::Template`].
		quasi: Box<Node>,
	},
	/// `callee(arguments...)`.
	Call {
		/// Whole expression.
		span: Span,
		/// The called expression.
		callee: Callee,
		/// Arguments in source order.
		arguments: Vec<Node>,
	},
	/// `name = init` in a variable declaration.
	Declarator {
		/// Whole declarator.
		span: Span,
		/// Bound identifier; `None` for destructuring patterns.
		name: Option<String>,
		/// Initializer.
		init: Option<Box<Node>>,
	},
	/// A markup `class` attribute value.
	ClassAttribute {
		/// Attribute value, quotes included when `quoted`.
		span: Span,
		/// Whether the value is wrapped in quotes.
		quoted: bool,
		/// Static text and mustache chunks in source order.
		parts: Vec<AttributePart>,
	},
	/// Anything else; never descended into.
	Other {
		/// Node span.
		span: Span,
	},
}

impl Node {
	/// Source range of the node.
	pub fn span(&self) -> &Span {
		match self {
			Self::Literal { span }
			| Self::Identifier { span, .. }
			| Self::Array { span, .. }
			| Self::Binary { span, .. }
			| Self::Logical { span, .. }
			| Self::Conditional { span, .. }
			| Self::Object { span, .. }
			| Self::Template { span, .. }
			| Self::TaggedTemplate { span, .. }
			| Self::Call { span, .. }
			| Self::Declarator { span, .. }
			| Self::ClassAttribute { span, .. }
			| Self::Other { span } => span,
		}
	}
}

/// An object literal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
	/// `key: value`, shorthand and methods included.
	KeyValue {
		/// Property key.
		key: Node,
		/// Property value.
		value: Node,
	},
	/// `...expr`.
	Spread {
		/// Spread span.
		span: Span,
	},
}

/// A static chunk of a template literal.
///
/// `span` includes the adjacent delimiters (`` ` ``, `${`, `}`) while `raw` is
/// the chunk's raw text without them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateElement {
	/// Chunk span, delimiters included.
	pub span: Span,
	/// Raw chunk text.
	pub raw: String,
}

/// The called expression of a call or the tag of a tagged template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee {
	/// `name`.
	Identifier(String),
	/// `object.property` with both sides plain identifiers.
	Member {
		/// Left side.
		object: String,
		/// Right side.
		property: String,
	},
	/// Computed, nested or otherwise unnamed callees.
	Other,
}

impl Callee {
	/// Name matched against configured callees: `name` or `object.property`.
	pub fn name(&self) -> Option<String> {
		match self {
			Self::Identifier(name) => Some(name.clone()),
			Self::Member { object, property } => Some(format!("{object}.{property}")),
			Self::Other => None,
		}
	}
}

/// One chunk of a class attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributePart {
	/// Static text.
	Text {
		/// Text span.
		span: Span,
	},
	/// `{expression}`.
	Mustache {
		/// Mustache span, braces included.
		span: Span,
		/// The enclosed expression.
		expression: Node,
	},
}

impl AttributePart {
	/// Source range of the part.
	pub fn span(&self) -> &Span {
		match self {
			Self::Text { span } | Self::Mustache { span, .. } => span,
		}
	}
}
