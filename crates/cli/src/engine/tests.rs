use std::fs;

use pretty_assertions::assert_eq;
use serde_json::json;
use weft_oracle::{OrderTable, TableFactory};
use weft_order::ConfigSource;

use super::*;
use crate::Settings;

fn table(version: u32) -> Arc<dyn ContextFactory> {
	let table = json!({
		"version": version,
		"layers": { "components": "5" },
		"order": {
			"container": "10",
			"bg-blue-500": "100",
			"px-8": "200",
			"py-4": "210",
			"text-white": "300"
		}
	});
	Arc::new(TableFactory::fixed(OrderTable::from_json(&table.to_string()).unwrap()))
}

fn inline_settings() -> Settings {
	Settings {
		config: ConfigSource::Inline(json!({})),
		..Settings::default()
	}
}

fn engine(settings: Settings, cwd: &Path) -> Engine {
	Engine::new(settings, cwd.to_path_buf(), table(3))
}

#[test]
fn test_check_script() {
	let mut engine = engine(inline_settings(), Path::new("/"));
	let source = r#"const a = clsx("text-white px-8 bg-blue-500", "px-8 py-4");"#;
	let violations = engine.check(Path::new("/a.ts"), source).unwrap();

	assert_eq!(violations.len(), 1);
	assert_eq!(violations[0].rule, "sort-classes");
	assert_eq!(violations[0].replacement, "bg-blue-500 px-8 text-white");
	assert_eq!(&source[violations[0].range.clone()], "text-white px-8 bg-blue-500");
}

#[test]
fn test_unsupported_and_rootless_files() {
	let tmp = tempfile::tempdir().unwrap();
	let mut engine = engine(Settings::default(), tmp.path());

	assert!(engine.check(&tmp.path().join("a.css"), ".a { }").unwrap().is_empty());
	// No roots, so the missing config file is never looked at.
	assert!(engine.check(&tmp.path().join("a.js"), "1 + 1;").unwrap().is_empty());
}

#[test]
fn test_missing_config_is_an_error() {
	let tmp = tempfile::tempdir().unwrap();
	let mut engine = engine(Settings::default(), tmp.path());
	let err = engine
		.check(&tmp.path().join("a.js"), r#"clsx("px-8 bg-blue-500")"#)
		.unwrap_err();
	assert!(err.to_string().contains("config file not found"), "{err:#}");
}

#[test]
fn test_fix_markup_runs_until_stable() {
	let mut engine = engine(inline_settings(), Path::new("/"));
	let source = r#"<div class="{a} py-4 px-8 {b}"></div>"#;

	let outcome = engine.fix(Path::new("/App.svelte"), source).unwrap();
	assert_eq!(outcome.output, r#"<div class="{a} {b} px-8 py-4"></div>"#);
	assert_eq!(outcome.passes, 2);
	assert!(outcome.remaining.is_empty());
}

#[test]
fn test_fix_is_identity_on_clean_source() {
	let mut engine = engine(inline_settings(), Path::new("/"));
	let source = r#"clsx("bg-blue-500 px-8", cond && "py-4 text-white")"#;
	let outcome = engine.fix(Path::new("/a.js"), source).unwrap();
	assert_eq!(outcome.output, source);
	assert_eq!(outcome.passes, 0);
}

#[test]
fn test_monorepo_uses_nearest_config() {
	let tmp = tempfile::tempdir().unwrap();
	let package = tmp.path().join("packages/app");
	fs::create_dir_all(package.join("src")).unwrap();
	fs::write(package.join("tailwind.config.js"), "module.exports = {}").unwrap();

	let settings = Settings {
		monorepo: true,
		..Settings::default()
	};
	let file = package.join("src/a.js");
	let mut engine = Engine::new(settings.clone(), tmp.path().to_path_buf(), table(3));
	let violations = engine.check(&file, r#"clsx("px-8 bg-blue-500")"#).unwrap();
	assert_eq!(violations.len(), 1);

	let mut engine = Engine::new(settings, tmp.path().to_path_buf(), table(4));
	let err = engine.check(&file, r#"clsx("px-8 bg-blue-500")"#).unwrap_err();
	assert!(err.to_string().contains("monorepo"), "{err:#}");
}

#[test]
fn test_svelte_style_needs_postcss_lang() {
	let tmp = tempfile::tempdir().unwrap();
	// The default config path does not exist; style checks never need it.
	let mut engine = engine(Settings::default(), tmp.path());
	let path = tmp.path().join("Card.svelte");

	let source = "<p>hi</p>\n<style>\n\t.a {\n\t\t@apply px-8;\n\t}\n</style>\n";
	let violations = engine.check(&path, source).unwrap();
	assert_eq!(violations.len(), 1);
	assert_eq!(violations[0].rule, "at-apply-require-postcss");

	let outcome = engine.fix(&path, source).unwrap();
	assert_eq!(
		outcome.output,
		"<p>hi</p>\n<style lang=\"postcss\">\n\t.a {\n\t\t@apply px-8;\n\t}\n</style>\n"
	);
	assert_eq!(outcome.passes, 1);

	let replaced = engine
		.fix(&path, "<style lang=\"scss\">.a { @apply px-8; }</style>")
		.unwrap();
	assert_eq!(replaced.output, "<style lang=\"postcss\">.a { @apply px-8; }</style>");

	assert!(engine.check(&path, "<style>.a { color: red; }</style>").unwrap().is_empty());
	assert!(
		engine
			.check(&tmp.path().join("index.html"), "<style>.a { @apply px-8; }</style>")
			.unwrap()
			.is_empty()
	);
}
