//! The command layer of a dice-rolling chat bot: turns a command line into the reply to send back.

use tracing::{debug, warn};

use crate::{
	command::RollCommand,
	dice::Roller,
	error::Error,
	store::{Owner, SavedRolls},
	texts::{self, Texts},
};

/// Handles chat commands using a roller, a saved-roll store, and a set of display texts.
///
/// Recognized commands (the leading `/` is optional):
/// - `roll <args…>` rolls a [`RollCommand`]
/// - `save <name> <args…>` saves a roll command for later
/// - `use <name>` rolls a saved roll command
/// - `delete <name>` deletes a saved roll command
/// - `help`, `about`, and `start` reply with their texts
///
/// # Examples
/// ```
/// use rollbot::{dice::roller::Max as MaxRoller, store::{MemoryStore, Owner}, texts::Texts, Bot};
///
/// let mut bot = Bot::new(MaxRoller, MemoryStore::default(), Texts::default());
/// let owner = Owner { user: 1, chat: 1 };
///
/// assert_eq!(bot.handle(owner, "/roll 2d6+1").as_deref(), Some("Total: 13\n2d6: 12 | 6, 6\nModifier: 1"));
/// assert_eq!(bot.handle(owner, "/save fireball 8d6").as_deref(), Some("Saved roll \"fireball\"."));
/// assert_eq!(bot.handle(owner, "/use fireball").as_deref(), Some("8d6: 48 | 6, 6, 6, 6, 6, 6, 6, 6"));
/// ```
#[derive(Debug)]
pub struct Bot<R, S> {
	/// Source of die values, shared by every command
	roller: R,

	/// Saved roll commands
	store: S,

	/// Display texts
	texts: Texts,

	/// Maximum number of evaluations a single command may expand into
	max_rolls: Option<u32>,
}

impl<R: Roller, S: SavedRolls> Bot<R, S> {
	/// Creates a bot with no limit on the number of evaluations per command.
	#[must_use]
	pub const fn new(roller: R, store: S, texts: Texts) -> Self {
		Self {
			roller,
			store,
			texts,
			max_rolls: None,
		}
	}

	/// Sets the maximum number of evaluations (counting repeats) a single command may expand into.
	#[must_use]
	pub const fn with_max_rolls(mut self, max_rolls: Option<u32>) -> Self {
		self.max_rolls = max_rolls;
		self
	}

	/// Saved roll commands
	#[must_use]
	#[inline]
	pub const fn store(&self) -> &S {
		&self.store
	}

	/// Handles a single command line, returning the reply. Blank lines get no reply.
	///
	/// Syntax errors are answered with the roll syntax text; any other error is answered with its message.
	pub fn handle(&mut self, owner: Owner, line: &str) -> Option<String> {
		let mut words = line.split_whitespace();
		let command = words.next()?;
		let command = command.strip_prefix('/').unwrap_or(command);
		let args = words.collect::<Vec<_>>();
		debug!(command, args = args.len(), "handling command");

		let result = match command {
			"roll" => self.roll(args.as_slice()),
			"save" => self.save(owner, &args),
			"use" => self.use_saved(owner, &args),
			"delete" => self.delete(owner, &args),
			"help" => Ok(self.text(texts::HELP)),
			"about" | "start" => Ok(self.text(texts::ABOUT)),
			_ => Ok(format!("Unknown command \"{command}\". Try /help.")),
		};

		Some(result.unwrap_or_else(|err| self.reply_to_error(&err)))
	}

	/// Parses and evaluates a roll command.
	fn roll<A: AsRef<str>>(&mut self, args: &[A]) -> Result<String, Error> {
		let command = self.parse_command(args)?;
		Ok(command.evaluate_and_render(&mut self.roller))
	}

	/// Parses a roll command and checks it against the configured roll cap.
	fn parse_command<A: AsRef<str>>(&self, args: &[A]) -> Result<RollCommand, Error> {
		let command = RollCommand::from_args(args)?;
		if let Some(max) = self.max_rolls {
			command.ensure_max_rolls(max)?;
		}
		Ok(command)
	}

	/// Saves the roll command following the name, as long as it could be rolled right now.
	fn save(&mut self, owner: Owner, args: &[&str]) -> Result<String, Error> {
		let Some((name, rest)) = args.split_first() else {
			return Err(Error::syntax("", "expected a name for the roll"));
		};

		self.parse_command(rest)?;
		self.store.save(owner, name, rest.iter().map(|&arg| arg.to_owned()).collect())?;
		Ok(format!("Saved roll \"{name}\"."))
	}

	/// Rolls a saved roll command.
	fn use_saved(&mut self, owner: Owner, args: &[&str]) -> Result<String, Error> {
		let name = single_name(args)?;
		let saved = self.store.get(owner, name)?;
		self.roll(saved.as_slice())
	}

	/// Deletes a saved roll command.
	fn delete(&mut self, owner: Owner, args: &[&str]) -> Result<String, Error> {
		let name = single_name(args)?;
		self.store.delete(owner, name)?;
		Ok(format!("Deleted roll \"{name}\"."))
	}

	/// Gets a display text, falling back to its key if it somehow isn't present.
	fn text(&self, key: &str) -> String {
		self.texts.get(key).unwrap_or(key).to_owned()
	}

	/// Maps an error to the message shown to the user.
	fn reply_to_error(&self, err: &Error) -> String {
		match err {
			Error::InvalidSyntax { .. } => {
				debug!(%err, "invalid syntax");
				self.text(texts::ROLL_SYNTAX)
			}
			Error::NotANumber(..) => {
				warn!(%err, "unexpected non-numeric value");
				err.to_string()
			}
			_ => {
				debug!(%err, "command failed");
				err.to_string()
			}
		}
	}
}

/// Extracts the single name argument of a command.
fn single_name<'a>(args: &[&'a str]) -> Result<&'a str, Error> {
	match *args {
		[name] => Ok(name),
		_ => Err(Error::syntax(args.join(" "), "expected exactly one roll name")),
	}
}
