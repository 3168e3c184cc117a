use serde::{Deserialize, Serialize};

/// Call names checked by default.
pub const DEFAULT_CALLEES: [&str; 5] = ["classnames", "clsx", "ctl", "cva", "tv"];
/// Object keys skipped by default.
pub const DEFAULT_IGNORED_KEYS: [&str; 2] = ["compoundVariants", "defaultVariants"];

/// Which variable declarators hold class lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Declarations {
	/// Name prefixes, e.g. `tw` matches `twButton`.
	pub prefix: Vec<String>,
	/// Name suffixes, e.g. `Classes` matches `buttonClasses`.
	pub suffix: Vec<String>,
	/// Exact names.
	pub names: Vec<String>,
}

impl Declarations {
	/// Whether a declarator named `name` is checked.
	pub fn matches(&self, name: &str) -> bool {
		self.prefix.iter().any(|p| name.starts_with(p.as_str()))
			|| self.suffix.iter().any(|s| name.ends_with(s.as_str()))
			|| self.names.iter().any(|n| n == name)
	}
}

/// Traversal and rewrite options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortOptions {
	/// Call names whose arguments hold class lists; `object.property` allowed.
	pub callees: Vec<String>,
	/// Variable declarators whose initializers hold class lists.
	pub declarations: Declarations,
	/// Object keys whose entries are skipped entirely.
	pub ignored_keys: Vec<String>,
	/// Template tags whose templates hold class lists.
	pub tags: Vec<String>,
	/// Drop adjacent duplicate classes after sorting.
	pub remove_duplicates: bool,
}

impl Default for SortOptions {
	fn default() -> Self {
		Self {
			callees: DEFAULT_CALLEES.map(String::from).to_vec(),
			declarations: Declarations::default(),
			ignored_keys: DEFAULT_IGNORED_KEYS.map(String::from).to_vec(),
			tags: Vec::new(),
			remove_duplicates: true,
		}
	}
}

impl SortOptions {
	pub(crate) fn is_callee(&self, name: &str) -> bool {
		self.callees.iter().any(|c| c == name)
	}

	pub(crate) fn is_tag(&self, name: &str) -> bool {
		self.tags.iter().any(|t| t == name)
	}

	pub(crate) fn is_ignored_key(&self, key: &str) -> bool {
		self.ignored_keys.iter().any(|k| k == key)
	}
}
