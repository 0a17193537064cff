//! Display texts, keyed by name, loaded once at startup.

use std::{collections::HashMap, fs, io, path::Path};

use tracing::debug;

/// Key of the text shown when a roll command has invalid syntax
pub const ROLL_SYNTAX: &str = "roll_syntax";

/// Key of the text shown for the help command
pub const HELP: &str = "help";

/// Key of the text shown for the about and start commands
pub const ABOUT: &str = "about";

/// Built-in texts, used for any key a loaded directory doesn't provide
const DEFAULTS: [(&str, &str); 3] = [
	(ROLL_SYNTAX, "Syntax: `/roll <rolls>d<die>+[roll/modifier] [dis/adv] [x<qty>]`"),
	(
		HELP,
		"Roll some dice with /roll, for example:\n\
		`/roll 1d20`\n\
		`/roll 1d20+2d8-4`\n\
		`/roll 1d6+2 adv x2`\n\
		`/roll 1d20 dis 2d4+6`\n\
		Save a roll with `/save <name> <roll>`, roll it again with `/use <name>`, and remove it with `/delete <name>`.",
	),
	(ABOUT, "A dice-rolling bot. Use /roll to roll some dice, or /help for more."),
];

/// Read-only collection of display texts
#[derive(Debug, Clone)]
pub struct Texts {
	/// Text contents by key
	texts: HashMap<String, String>,
}

impl Texts {
	/// Loads every file in a directory as a text, keyed by its file name, with surrounding whitespace trimmed.
	/// Keys that aren't present in the directory keep their built-in text.
	///
	/// # Errors
	/// If the directory or any file in it can't be read, the I/O error is returned.
	pub fn load(dir: impl AsRef<Path>) -> io::Result<Self> {
		let mut texts = Self::default();
		for entry in fs::read_dir(dir)? {
			let entry = entry?;
			if !entry.file_type()?.is_file() {
				continue;
			}

			let key = entry.file_name().to_string_lossy().into_owned();
			let contents = fs::read_to_string(entry.path())?;
			debug!(key = %key, "loaded text");
			texts.texts.insert(key, contents.trim().to_owned());
		}
		Ok(texts)
	}

	/// Gets the text for a key.
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&str> {
		self.texts.get(key).map(String::as_str)
	}
}

impl Default for Texts {
	/// Creates a collection of only the built-in texts.
	fn default() -> Self {
		Self {
			texts: DEFAULTS
				.iter()
				.map(|&(key, text)| (key.to_owned(), text.to_owned()))
				.collect(),
		}
	}
}
