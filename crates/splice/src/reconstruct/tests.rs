use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use weft_oracle::{OrderTable, TableContext};

use super::*;
use crate::{AttributePart, Callee, apply_violations};

const TABLE: &str = r#"{
	"layers": { "components": "5" },
	"order": {
		"container": "10",
		"bg-blue-500": "100",
		"px-8": "200",
		"py-4": "210",
		"text-white": "300",
		"font-bold": "310"
	}
}"#;

fn resolver() -> OrderResolver {
	let table = OrderTable::from_json(TABLE).unwrap();
	OrderResolver::new(Arc::new(TableContext::new(table)))
}

fn span_of(source: &str, needle: &str) -> Span {
	let start = source.find(needle).unwrap();
	start..start + needle.len()
}

fn lit(source: &str, quoted: &str) -> Node {
	Node::Literal {
		span: span_of(source, quoted),
	}
}

fn call(source: &str, name: &str, arguments: Vec<Node>) -> Node {
	Node::Call {
		span: 0..source.len(),
		callee: Callee::Identifier(name.to_string()),
		arguments,
	}
}

fn check(source: &str, roots: &[Node], options: &SortOptions) -> String {
	let violations = sort_classes(source, roots, options, &resolver()).unwrap();
	apply_violations(source, &violations).unwrap().output
}

#[test]
fn test_sorts_call_argument() {
	let source = r#"clsx("px-8 py-4 text-white bg-blue-500")"#;
	let roots = [call(source, "clsx", vec![lit(source, r#""px-8 py-4 text-white bg-blue-500""#)])];

	let violations = sort_classes(source, &roots, &SortOptions::default(), &resolver()).unwrap();
	assert_eq!(violations.len(), 1);
	assert_eq!(violations[0].rule, SORT_RULE);
	assert_eq!(violations[0].range, 6..38);
	assert_eq!(violations[0].replacement, "bg-blue-500 px-8 py-4 text-white");
}

#[test]
fn test_duplicates_removed_or_kept() {
	let source = r#"clsx("px-8 py-4 text-white bg-blue-500 bg-blue-500")"#;
	let roots = [call(
		source,
		"clsx",
		vec![lit(source, r#""px-8 py-4 text-white bg-blue-500 bg-blue-500""#)],
	)];

	assert_eq!(
		check(source, &roots, &SortOptions::default()),
		r#"clsx("bg-blue-500 px-8 py-4 text-white")"#
	);

	let keep = SortOptions {
		remove_duplicates: false,
		..SortOptions::default()
	};
	assert_eq!(
		check(source, &roots, &keep),
		r#"clsx("bg-blue-500 bg-blue-500 px-8 py-4 text-white")"#
	);
}

#[test]
fn test_single_class_is_not_reported() {
	let source = r#"clsx("foo")"#;
	let roots = [call(source, "clsx", vec![lit(source, r#""foo""#)])];
	assert!(collect_candidates(source, &roots, &SortOptions::default()).is_empty());
	assert!(sort_classes(source, &roots, &SortOptions::default(), &resolver())
		.unwrap()
		.is_empty());
}

#[test]
fn test_unresolved_classes_go_first_in_order() {
	let source = r#"clsx("foo px-8 bar")"#;
	let roots = [call(source, "clsx", vec![lit(source, r#""foo px-8 bar""#)])];
	assert_eq!(check(source, &roots, &SortOptions::default()), r#"clsx("foo bar px-8")"#);
}

#[test]
fn test_template_chunks_and_interpolations_sort_independently() {
	let source = r#"clsx(`py-4 px-8 ${cond && "text-white bg-blue-500"}`)"#;
	let chunk = span_of(source, "`py-4 px-8 ${");
	let tail = span_of(source, "}`");
	let template = Node::Template {
		span: span_of(source, r#"`py-4 px-8 ${cond && "text-white bg-blue-500"}`"#),
		quasis: vec![
			TemplateElement {
				span: chunk,
				raw: "py-4 px-8 ".to_string(),
			},
			TemplateElement {
				span: tail,
				raw: String::new(),
			},
		],
		expressions: vec![Node::Logical {
			span: span_of(source, r#"cond && "text-white bg-blue-500""#),
			left: Box::new(Node::Identifier {
				span: span_of(source, "cond"),
				name: "cond".into(),
			}),
			right: Box::new(lit(source, r#""text-white bg-blue-500""#)),
		}],
	};
	let roots = [call(source, "clsx", vec![template])];

	assert_eq!(
		check(source, &roots, &SortOptions::default()),
		r#"clsx(`px-8 py-4 ${cond && "bg-blue-500 text-white"}`)"#
	);
}

#[test]
fn test_multiline_template_keeps_layout() {
	let source = "tw`\n  text-white\n  px-8\n  px-8\n`";
	let template = Node::Template {
		span: 2..source.len(),
		quasis: vec![TemplateElement {
			span: 2..source.len(),
			raw: "\n  text-white\n  px-8\n  px-8\n".into(),
		}],
		expressions: Vec::new(),
	};
	let roots = [Node::TaggedTemplate {
		span: 0..source.len(),
		tag: Callee::Identifier("tw".into()),
		quasi: Box::new(template),
	}];

	let options = SortOptions {
		tags: vec!["tw".into()],
		..SortOptions::default()
	};
	assert_eq!(check(source, &roots, &options), "tw`\n  px-8\n  text-white\n`");
	assert_eq!(check(source, &roots, &SortOptions::default()), source);
}

#[test]
fn test_unlisted_and_unnamed_callees_are_skipped() {
	let source = r#"other("py-4 px-8")"#;
	let arg = lit(source, r#""py-4 px-8""#);
	assert_eq!(check(source, &[call(source, "other", vec![arg.clone()])], &SortOptions::default()), source);

	let computed = Node::Call {
		span: 0..source.len(),
		callee: Callee::Other,
		arguments: vec![arg.clone()],
	};
	assert_eq!(check(source, &[computed], &SortOptions::default()), source);

	let member = Node::Call {
		span: 0..source.len(),
		callee: Callee::Member {
			object: "util".into(),
			property: "cn".into(),
		},
		arguments: vec![arg],
	};
	let options = SortOptions {
		callees: vec!["util.cn".into()],
		..SortOptions::default()
	};
	assert_eq!(check(source, &[member], &options), r#"other("px-8 py-4")"#);
}

#[test]
fn test_object_keys_values_and_ignored_keys() {
	let source = r#"cva({ "py-4 px-8": on, base: "text-white bg-blue-500", defaultVariants: { size: "py-4 px-8" }, ...rest })"#;
	let object = Node::Object {
		span: span_of(source, "{ \"py-4"),
		properties: vec![
			Property::KeyValue {
				key: lit(source, r#""py-4 px-8""#),
				value: Node::Identifier {
					span: span_of(source, "on"),
					name: "on".into(),
				},
			},
			Property::KeyValue {
				key: Node::Identifier {
					span: span_of(source, "base"),
					name: "base".into(),
				},
				value: lit(source, r#""text-white bg-blue-500""#),
			},
			Property::KeyValue {
				key: Node::Identifier {
					span: span_of(source, "defaultVariants"),
					name: "defaultVariants".into(),
				},
				value: Node::Object {
					span: span_of(source, r#"{ size: "py-4 px-8" }"#),
					properties: vec![Property::KeyValue {
						key: Node::Identifier {
							span: span_of(source, "size"),
							name: "size".into(),
						},
						value: Node::Literal {
							span: {
								let start = source.rfind(r#""py-4 px-8""#).unwrap();
								start..start + 11
							},
						},
					}],
				},
			},
			Property::Spread {
				span: span_of(source, "...rest"),
			},
		],
	};
	let roots = [call(source, "cva", vec![object])];

	assert_eq!(
		check(source, &roots, &SortOptions::default()),
		r#"cva({ "px-8 py-4": on, base: "bg-blue-500 text-white", defaultVariants: { size: "py-4 px-8" }, ...rest })"#
	);
}

#[test]
fn test_logical_left_side_and_conditional_test_untouched() {
	let source = r#"clsx("py-4 px-8" || "py-4 px-8", "py-4 px-8" ? "py-4 px-8" : "text-white bg-blue-500")"#;
	let mut literals = source.match_indices(r#""py-4 px-8""#).map(|(i, m)| Node::Literal {
		span: i..i + m.len(),
	});
	let (a, b, c, d) = (
		literals.next().unwrap(),
		literals.next().unwrap(),
		literals.next().unwrap(),
		literals.next().unwrap(),
	);
	let roots = [call(
		source,
		"clsx",
		vec![
			Node::Logical {
				span: 5..31,
				left: Box::new(a),
				right: Box::new(b),
			},
			Node::Conditional {
				span: 33..source.len() - 1,
				test: Box::new(c),
				consequent: Box::new(d),
				alternate: Box::new(lit(source, r#""text-white bg-blue-500""#)),
			},
		],
	)];

	assert_eq!(
		check(source, &roots, &SortOptions::default()),
		r#"clsx("py-4 px-8" || "px-8 py-4", "py-4 px-8" ? "px-8 py-4" : "bg-blue-500 text-white")"#
	);
}

#[test]
fn test_declarator_name_matching() {
	let source = r#"const buttonClasses = ["py-4 px-8", "text-white container"]"#;
	let declarator = |name: &str| Node::Declarator {
		span: 6..source.len(),
		name: Some(name.to_string()),
		init: Some(Box::new(Node::Array {
			span: span_of(source, "["),
			elements: vec![
				lit(source, r#""py-4 px-8""#),
				lit(source, r#""text-white container""#),
			],
		})),
	};

	let options = SortOptions {
		declarations: crate::Declarations {
			suffix: vec!["Classes".into()],
			..Default::default()
		},
		..SortOptions::default()
	};
	assert_eq!(
		check(source, &[declarator("buttonClasses")], &options),
		r#"const buttonClasses = ["px-8 py-4", "container text-white"]"#
	);
	assert_eq!(check(source, &[declarator("buttonStyles")], &options), source);
	assert_eq!(check(source, &[declarator("buttonClasses")], &SortOptions::default()), source);
}

#[test]
fn test_placeholder_spans_are_skipped() {
	let source = r#"clsx("py-4 {{ size }} px-8", "py-4 px-8")"#;
	let roots = [call(
		source,
		"clsx",
		vec![lit(source, r#""py-4 {{ size }} px-8""#), lit(source, r#""py-4 px-8""#)],
	)];
	assert_eq!(
		check(source, &roots, &SortOptions::default()),
		r#"clsx("py-4 {{ size }} px-8", "px-8 py-4")"#
	);
}

#[test]
fn test_class_attribute_text_and_mustaches() {
	let source = r#"<div class="py-4 px-8 {clsx('text-white bg-blue-500')} {ok ? 'py-4 px-8' : ''}">"#;
	let text = span_of(source, "py-4 px-8 ");
	let first = span_of(source, "{clsx('text-white bg-blue-500')}");
	let second = span_of(source, "{ok ? 'py-4 px-8' : ''}");
	let attribute = Node::ClassAttribute {
		span: span_of(source, r#""py-4 px-8 {clsx"#).start..source.len() - 1,
		quoted: true,
		parts: vec![
			AttributePart::Text { span: text },
			AttributePart::Mustache {
				span: first.clone(),
				expression: Node::Call {
					span: first.start + 1..first.end - 1,
					callee: Callee::Identifier("clsx".into()),
					arguments: vec![lit(source, "'text-white bg-blue-500'")],
				},
			},
			AttributePart::Text {
				span: first.end..second.start,
			},
			AttributePart::Mustache {
				span: second.clone(),
				expression: Node::Conditional {
					span: second.start + 1..second.end - 1,
					test: Box::new(Node::Identifier {
						span: span_of(source, "ok"),
						name: "ok".into(),
					}),
					consequent: Box::new(lit(source, "'py-4 px-8'")),
					alternate: Box::new(lit(source, "''")),
				},
			},
		],
	};

	assert_eq!(
		check(source, &[attribute], &SortOptions::default()),
		r#"<div class="px-8 py-4 {clsx('bg-blue-500 text-white')} {ok ? 'px-8 py-4' : ''}">"#
	);
}

#[test]
fn test_file_tokens_resolve_in_one_batch() {
	let source = r#"clsx("py-4 px-8", "px-8 foo")"#;
	let roots = [call(
		source,
		"clsx",
		vec![lit(source, r#""py-4 px-8""#), lit(source, r#""px-8 foo""#)],
	)];
	let resolver = resolver();
	sort_classes(source, &roots, &SortOptions::default(), &resolver).unwrap();
	assert_eq!(resolver.cached(), 3);
}

#[test]
fn test_sort_class_string() {
	let resolver = resolver();
	assert_eq!(
		sort_class_string(" text-white  px-8 ", &resolver, true).unwrap(),
		" px-8  text-white "
	);
	assert_eq!(sort_class_string("{{ a }} px-8", &resolver, true).unwrap(), "{{ a }} px-8");
	assert_eq!(sort_class_string("solo", &resolver, true).unwrap(), "solo");
}

const KNOWN: [&str; 8] = [
	"container",
	"bg-blue-500",
	"px-8",
	"py-4",
	"text-white",
	"font-bold",
	"foo",
	"bar",
];

fn class_source() -> impl Strategy<Value = String> {
	(
		prop::collection::vec(prop::sample::select(KNOWN.to_vec()), 0..8),
		prop::collection::vec(prop::sample::select(vec![" ", "  ", "\n\t", "\t"]), 8),
		any::<bool>(),
		any::<bool>(),
	)
		.prop_map(|(tokens, seps, head, tail)| {
			let mut body = String::new();
			if head {
				body.push_str(seps[7]);
			}
			for (i, token) in tokens.iter().enumerate() {
				if i > 0 {
					body.push_str(seps[i - 1]);
				}
				body.push_str(token);
			}
			if tail {
				body.push_str(seps[6]);
			}
			format!("clsx(\"{body}\")")
		})
}

proptest! {
	#[test]
	fn prop_fixed_source_is_stable(source in class_source(), remove_duplicates in any::<bool>()) {
		let options = SortOptions { remove_duplicates, ..SortOptions::default() };
		let root = |src: &str| call(src, "clsx", vec![Node::Literal { span: 5..src.len() - 1 }]);

		let once = check(&source, &[root(&source)], &options);
		let twice = check(&once, &[root(&once)], &options);
		prop_assert_eq!(twice, once);
	}

	#[test]
	fn prop_sorting_without_dedupe_keeps_tokens(source in class_source()) {
		let options = SortOptions { remove_duplicates: false, ..SortOptions::default() };
		let root = call(&source, "clsx", vec![Node::Literal { span: 5..source.len() - 1 }]);
		let fixed = check(&source, &[root], &options);

		let mut before: Vec<&str> = source[6..source.len() - 2].split_whitespace().collect();
		let mut after: Vec<&str> = fixed[6..fixed.len() - 2].split_whitespace().collect();
		before.sort_unstable();
		after.sort_unstable();
		prop_assert_eq!(before, after);
		prop_assert_eq!(fixed.len(), source.len());
	}
}
