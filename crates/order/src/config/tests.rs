use std::fs::{self, File};
use std::time::SystemTime;

use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;

fn touch(path: &Path, secs: u64) {
	let file = File::options().write(true).open(path).unwrap();
	file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
		.unwrap();
}

#[test]
fn test_relative_path_resolves_against_cwd() {
	let tmp = tempfile::tempdir().unwrap();
	fs::write(tmp.path().join("tailwind.config.js"), "").unwrap();
	touch(&tmp.path().join("tailwind.config.js"), 1_000);

	let mut resolver = ConfigResolver::default();
	let config = resolver
		.resolve(&ConfigSource::Path("tailwind.config.js".into()), tmp.path())
		.unwrap();

	assert_eq!(config.path(), Some(tmp.path().join("tailwind.config.js").as_path()));
	assert_eq!(config.stamp(), 1_000_000);
	assert_eq!(
		config.payload(),
		json!(tmp.path().join("tailwind.config.js").to_string_lossy())
	);
}

#[test]
fn test_missing_file_is_an_error() {
	let tmp = tempfile::tempdir().unwrap();
	let mut resolver = ConfigResolver::default();
	let err = resolver
		.resolve(&ConfigSource::Path("missing.css".into()), tmp.path())
		.unwrap_err();
	assert!(matches!(err, Error::ConfigNotFound(path) if path.ends_with("missing.css")));
}

#[test]
fn test_modification_is_seen_after_refresh_interval() {
	let tmp = tempfile::tempdir().unwrap();
	let path = tmp.path().join("app.css");
	fs::write(&path, "").unwrap();
	touch(&path, 10);

	let source = ConfigSource::Path(path.clone());
	let mut resolver = ConfigResolver::new(Duration::from_millis(1_000));
	let t0 = Instant::now();
	let first = resolver.resolve_at(&source, tmp.path(), t0).unwrap();

	touch(&path, 20);
	let within = resolver
		.resolve_at(&source, tmp.path(), t0 + Duration::from_millis(500))
		.unwrap();
	assert_eq!(within.identity, first.identity);

	let after = resolver
		.resolve_at(&source, tmp.path(), t0 + Duration::from_millis(1_500))
		.unwrap();
	assert_ne!(after.identity, first.identity);
	assert_eq!(after.stamp(), 20_000);
}

#[test]
fn test_unchanged_file_keeps_identity() {
	let tmp = tempfile::tempdir().unwrap();
	let path = tmp.path().join("app.css");
	fs::write(&path, "").unwrap();
	touch(&path, 10);

	let source = ConfigSource::Path(path);
	let mut resolver = ConfigResolver::new(Duration::ZERO);
	let t0 = Instant::now();
	let first = resolver.resolve_at(&source, tmp.path(), t0).unwrap();
	let second = resolver
		.resolve_at(&source, tmp.path(), t0 + Duration::from_secs(5))
		.unwrap();
	assert_eq!(first, second);
}

#[test]
fn test_inline_identity_is_by_value() {
	let mut resolver = ConfigResolver::default();
	let cwd = Path::new("/");
	let a = resolver
		.resolve(&ConfigSource::Inline(json!({"prefix": "tw-"})), cwd)
		.unwrap();
	let b = resolver
		.resolve(&ConfigSource::Inline(json!({"prefix": "tw-"})), cwd)
		.unwrap();
	let c = resolver
		.resolve(&ConfigSource::Inline(json!({"prefix": "x-"})), cwd)
		.unwrap();

	assert_eq!(a.identity, b.identity);
	assert_ne!(a.identity, c.identity);
	assert_eq!(a.stamp(), 0);
	assert_eq!(a.payload(), json!({"prefix": "tw-"}));
}

#[test]
fn test_source_deserializes_untagged() {
	let path: ConfigSource = serde_json::from_value(json!("./tailwind.config.js")).unwrap();
	assert_eq!(path, ConfigSource::Path("./tailwind.config.js".into()));

	let inline: ConfigSource = serde_json::from_value(json!({"theme": {}})).unwrap();
	assert!(matches!(inline, ConfigSource::Inline(_)));
}
