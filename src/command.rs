//! Parsing of a full roll command's arguments into one or more [`Roll`]s with repeat counts.

use tracing::debug;

use crate::{
	dice::Roller,
	error::{bounded, Error},
	roll::{Mode, Roll, RollOutcome},
};

/// Word that any non-empty prefix of selects [`Mode::Advantage`]
const ADVANTAGE: &str = "advantage";

/// Word that any non-empty prefix of selects [`Mode::Disadvantage`]
const DISADVANTAGE: &str = "disadvantage";

/// A single roll of a command along with how many times to evaluate it
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Entry {
	/// Roll to evaluate
	pub roll: Roll,

	/// Number of independent evaluations, at least 1
	pub repeat: u32,
}

/// A full command's worth of [`Roll`]s, each with a repeat count, in the order they were given.
///
/// # Examples
/// ```
/// use rollbot::{dice::roller::Iter as IterRoller, Mode, RollCommand};
///
/// let command = RollCommand::from_args(["1d20", "adv", "x2", "2d4+1"])?;
/// assert_eq!(command.entries().len(), 2);
/// assert_eq!(command.entries()[0].roll.mode(), Mode::Advantage);
/// assert_eq!(command.entries()[0].repeat, 2);
/// assert_eq!(command.total_rolls(), 3);
///
/// let mut roller = IterRoller::new([4, 11, 20, 20, 2, 3]);
/// assert_eq!(
/// 	command.evaluate_and_render(&mut roller),
/// 	"Total: 11\n1d20: 11\nOther roll: 4\n\nTotal: 20\n1d20: 20\nOther roll: 20\n\nTotal: 6\n2d4: 5 | 2, 3\nModifier: 1",
/// );
/// # Ok::<(), rollbot::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollCommand {
	/// Rolls in the order they were given
	entries: Vec<Entry>,
}

impl RollCommand {
	/// Parses a command's whitespace-delimited arguments.
	///
	/// An argument starting with a digit begins a new roll (see [`Roll::from_expr()`]). Any following arguments up to
	/// the next roll apply to it:
	/// - any non-empty prefix of `advantage` or `disadvantage` sets its mode
	/// - `x<count>` sets how many times it is evaluated
	///
	/// # Errors
	/// - [`Error::InvalidSyntax`] if there are no arguments, an argument isn't recognized, an option comes before any
	///   roll, or a roll is given both advantage and disadvantage
	/// - [`Error::OutOfRange`] if a repeat count is zero or too large
	/// - any error from parsing the rolls themselves
	pub fn from_args<I, S>(args: I) -> Result<Self, Error>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut entries = Vec::new();
		let mut current: Option<EntryBuilder> = None;

		for arg in args {
			let arg = arg.as_ref();
			if arg.starts_with(|c: char| c.is_ascii_digit()) {
				let roll = Roll::from_expr(arg, Mode::Normal)?;
				if let Some(done) = current.replace(EntryBuilder::new(roll)) {
					entries.push(done.build());
				}
				continue;
			}

			let Some(entry) = current.as_mut() else {
				return Err(Error::syntax(arg, "expected a roll before any options"));
			};

			if let Some(mode) = mode_for(arg) {
				if entry.mode != Mode::Normal && entry.mode != mode {
					return Err(Error::syntax(arg, "a roll can't have both advantage and disadvantage"));
				}
				entry.mode = mode;
			} else if let Some(digits) = repeat_digits(arg) {
				entry.repeat = bounded(digits, "Roll count", 1..=u32::MAX)?;
			} else {
				return Err(Error::syntax(arg, "expected a roll, advantage/disadvantage, or x<count>"));
			}
		}

		match current {
			Some(last) => entries.push(last.build()),
			None => return Err(Error::syntax("", "expected at least one roll")),
		}

		debug!(entries = entries.len(), "parsed roll command");
		Ok(Self { entries })
	}

	/// Rolls in the order they were given
	#[must_use]
	#[inline]
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Total number of evaluations across all entries, counting repeats.
	#[must_use]
	pub fn total_rolls(&self) -> u64 {
		self.entries.iter().map(|entry| u64::from(entry.repeat)).sum()
	}

	/// Checks that the command doesn't expand into more than `max` evaluations.
	///
	/// # Errors
	/// If [`Self::total_rolls()`] exceeds `max`, an [`Error::OutOfRange`] is returned.
	///
	/// # Examples
	/// ```
	/// use rollbot::{Error, RollCommand};
	///
	/// let command = RollCommand::from_args(["1d20", "x10", "1d6", "x5"])?;
	/// assert!(command.ensure_max_rolls(15).is_ok());
	/// assert!(matches!(command.ensure_max_rolls(14), Err(Error::OutOfRange { .. })));
	/// # Ok::<(), rollbot::Error>(())
	/// ```
	pub fn ensure_max_rolls(&self, max: u32) -> Result<(), Error> {
		let total = self.total_rolls();
		if total > u64::from(max) {
			return Err(Error::OutOfRange {
				what: "Total number of rolls",
				value: total.to_string(),
				min: 1,
				max: max.into(),
			});
		}
		Ok(())
	}

	/// Evaluates every entry its repeat count of times, in order. Each evaluation is independent.
	pub fn evaluate(&self, roller: &mut impl Roller) -> Vec<RollOutcome> {
		let mut outcomes = Vec::new();
		for entry in &self.entries {
			for _ in 0..entry.repeat {
				outcomes.push(entry.roll.evaluate(roller));
			}
		}
		outcomes
	}

	/// Evaluates the command (see [`Self::evaluate()`]) and joins every rendered outcome with a blank line.
	pub fn evaluate_and_render(&self, roller: &mut impl Roller) -> String {
		self.evaluate(roller)
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join("\n\n")
	}
}

/// In-progress entry while scanning a command's arguments
#[derive(Debug)]
struct EntryBuilder {
	/// Roll parsed from the entry's leading argument
	roll: Roll,

	/// Mode given for the entry, if any
	mode: Mode,

	/// Most recently given repeat count
	repeat: u32,
}

impl EntryBuilder {
	/// Starts a new entry for a roll with the default mode and a single evaluation.
	const fn new(roll: Roll) -> Self {
		Self {
			roll,
			mode: Mode::Normal,
			repeat: 1,
		}
	}

	/// Finishes the entry, applying the accumulated mode to its roll.
	fn build(self) -> Entry {
		Entry {
			roll: self.roll.with_mode(self.mode),
			repeat: self.repeat,
		}
	}
}

/// Determines which mode an argument selects, if any.
fn mode_for(arg: &str) -> Option<Mode> {
	if arg.is_empty() {
		None
	} else if ADVANTAGE.starts_with(arg) {
		Some(Mode::Advantage)
	} else if DISADVANTAGE.starts_with(arg) {
		Some(Mode::Disadvantage)
	} else {
		None
	}
}

/// Extracts the digits of an `x<count>` argument.
fn repeat_digits(arg: &str) -> Option<&str> {
	arg.strip_prefix('x')
		.filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
