use std::fs;

use crate::texts::{self, Texts};

#[test]
fn defaults() {
	let texts = Texts::default();
	assert_eq!(
		texts.get(texts::ROLL_SYNTAX),
		Some("Syntax: `/roll <rolls>d<die>+[roll/modifier] [dis/adv] [x<qty>]`")
	);
	assert!(texts.get(texts::HELP).is_some_and(|help| help.contains("/roll")));
	assert!(texts.get(texts::ABOUT).is_some());
	assert_eq!(texts.get("nonexistent"), None);
}

#[test]
fn load_overrides_and_trims() {
	let dir = tempfile::tempdir().unwrap();
	fs::write(dir.path().join(texts::HELP), "\n  Custom help\nsecond line  \n\n").unwrap();
	fs::write(dir.path().join("greeting"), "Hello!").unwrap();

	let texts = Texts::load(dir.path()).unwrap();
	assert_eq!(texts.get(texts::HELP), Some("Custom help\nsecond line"));
	assert_eq!(texts.get("greeting"), Some("Hello!"));
	assert_eq!(texts.get(texts::ROLL_SYNTAX), Texts::default().get(texts::ROLL_SYNTAX));
}

#[test]
fn load_skips_directories() {
	let dir = tempfile::tempdir().unwrap();
	fs::create_dir(dir.path().join("nested")).unwrap();
	fs::write(dir.path().join("nested").join(texts::ABOUT), "hidden").unwrap();

	let texts = Texts::load(dir.path()).unwrap();
	assert_eq!(texts.get("nested"), None);
	assert_eq!(texts.get(texts::ABOUT), Texts::default().get(texts::ABOUT));
}

#[test]
fn load_missing_directory() {
	let dir = tempfile::tempdir().unwrap();
	assert!(Texts::load(dir.path().join("missing")).is_err());
}
