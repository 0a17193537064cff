//! Complete rolls: several [`Die`] terms and integer modifiers summed together, optionally rolled with advantage or
//! disadvantage, and the outcomes of evaluating them.

use std::{fmt, str::FromStr};

use chumsky::Parser;
use tracing::trace;

use crate::{
	dice::{Die, DieOutcome, Roller},
	error::{bounded, in_bounds, Error},
	parse::{self, Component},
};

/// Maximum number of components (dice terms and modifiers combined) in a single roll
pub const MAX_COMPONENTS: usize = 25;

/// Maximum magnitude of a single modifier
pub const MAX_MODIFIER: i32 = 1000;

/// How a [`Roll`] picks between alternative evaluations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[expect(clippy::exhaustive_enums, reason = "There are only ever the three")]
pub enum Mode {
	/// Evaluate once
	#[default]
	Normal,

	/// Evaluate twice and keep the higher total
	Advantage,

	/// Evaluate twice and keep the lower total
	Disadvantage,
}

/// One or more [`Die`] terms plus integer modifiers, evaluated together under a [`Mode`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Roll {
	/// Dice terms, in the order they were written
	dice: Vec<Die>,

	/// Signed modifiers, in the order they were written
	modifiers: Vec<i32>,

	/// Advantage mode
	mode: Mode,
}

impl Roll {
	/// Parses a whitespace-free roll expression such as `1d20+4d6+5-2`.
	///
	/// The expression is a dice term or integer followed by any number of further terms, each preceded by `+` or `-`.
	///
	/// # Errors
	/// - [`Error::InvalidSyntax`] if the expression doesn't match the grammar or contains no dice terms
	/// - [`Error::TooManyComponents`] if there are more than [`MAX_COMPONENTS`] terms
	/// - [`Error::OutOfRange`] if any dice term or modifier is out of bounds
	///
	/// # Examples
	/// ```
	/// use rollbot::{Die, Mode, Roll};
	///
	/// let roll = Roll::from_expr("1d20+4d6+5-2", Mode::Normal)?;
	/// assert_eq!(roll.dice(), [Die::new(1, 20, false)?, Die::new(4, 6, false)?]);
	/// assert_eq!(roll.modifiers(), [5, -2]);
	/// # Ok::<(), rollbot::Error>(())
	/// ```
	pub fn from_expr(expr: &str, mode: Mode) -> Result<Self, Error> {
		let normalized = parse::normalize(expr);
		let offset = normalized.len().saturating_sub(expr.len());
		let components = parse::roll()
			.parse(&normalized)
			.into_result()
			.map_err(|errs| parse::syntax_error(expr, &errs, offset))?;

		if components.len() > MAX_COMPONENTS {
			return Err(Error::TooManyComponents {
				count: components.len(),
				max: MAX_COMPONENTS,
			});
		}

		let mut dice = Vec::new();
		let mut modifiers = Vec::new();
		for component in &components {
			match component {
				Component::Dice(spec) => dice.push(Die::from_spec(spec)?),
				Component::Modifier(spec) => {
					let sign = if spec.negative { "-" } else { "" };
					let digits = format!("{sign}{}", spec.magnitude);
					modifiers.push(bounded(&digits, "Modifier", -MAX_MODIFIER..=MAX_MODIFIER)?);
				}
			}
		}

		if dice.is_empty() {
			return Err(Error::syntax(expr, "a roll needs at least one dice term"));
		}

		Ok(Self { dice, modifiers, mode })
	}

	/// Creates a roll from already-validated dice and modifiers.
	///
	/// # Errors
	/// - [`Error::InvalidSyntax`] if `dice` is empty
	/// - [`Error::TooManyComponents`] if there are more than [`MAX_COMPONENTS`] dice and modifiers combined
	/// - [`Error::OutOfRange`] if the magnitude of any modifier exceeds [`MAX_MODIFIER`]
	pub fn new(dice: Vec<Die>, modifiers: Vec<i32>, mode: Mode) -> Result<Self, Error> {
		let roll = Self { dice, modifiers, mode };
		if roll.dice.is_empty() {
			return Err(Error::syntax(roll.to_string(), "a roll needs at least one dice term"));
		}

		let count = roll.dice.len().saturating_add(roll.modifiers.len());
		if count > MAX_COMPONENTS {
			return Err(Error::TooManyComponents {
				count,
				max: MAX_COMPONENTS,
			});
		}

		for &modifier in &roll.modifiers {
			in_bounds(modifier, "Modifier", &(-MAX_MODIFIER..=MAX_MODIFIER))?;
		}

		Ok(roll)
	}

	/// Replaces the roll's mode.
	#[must_use]
	#[inline]
	pub fn with_mode(self, mode: Mode) -> Self {
		Self { mode, ..self }
	}

	/// Dice terms, in the order they were written
	#[must_use]
	#[inline]
	pub fn dice(&self) -> &[Die] {
		&self.dice
	}

	/// Signed modifiers, in the order they were written
	#[must_use]
	#[inline]
	pub fn modifiers(&self) -> &[i32] {
		&self.modifiers
	}

	/// Advantage mode
	#[must_use]
	#[inline]
	pub const fn mode(&self) -> Mode {
		self.mode
	}

	/// Evaluates the roll, rolling every dice term once with the given roller.
	///
	/// With advantage or disadvantage, every dice term is rolled a second time. The set of outcomes with the
	/// higher (advantage) or lower (disadvantage) aggregate total is kept as a whole, and the other set's total is
	/// recorded as the [losing total](RollOutcome::losing_total). When the totals are equal, the first set is kept.
	///
	/// # Examples
	/// ```
	/// use rollbot::{dice::roller::Iter as IterRoller, Mode, Roll};
	///
	/// let roll = Roll::from_expr("1d20+2", Mode::Advantage)?;
	/// let outcome = roll.evaluate(&mut IterRoller::new([7, 15]));
	/// assert_eq!(outcome.total(), 17);
	/// assert_eq!(outcome.losing_total(), Some(9));
	/// # Ok::<(), rollbot::Error>(())
	/// ```
	pub fn evaluate(&self, roller: &mut impl Roller) -> RollOutcome {
		let first = self.roll_dice(roller);
		let (dice, losing_total) = if self.mode == Mode::Normal {
			(first, None)
		} else {
			let second = self.roll_dice(roller);
			let (first_total, second_total) = (aggregate_total(&first), aggregate_total(&second));
			let keep_second = match self.mode {
				Mode::Normal => false,
				Mode::Advantage => second_total > first_total,
				Mode::Disadvantage => second_total < first_total,
			};

			if keep_second {
				(second, Some(first_total.saturating_add(self.modifier_total())))
			} else {
				(first, Some(second_total.saturating_add(self.modifier_total())))
			}
		};

		let outcome = RollOutcome {
			dice,
			modifiers: self.modifiers.clone(),
			mode: self.mode,
			losing_total,
		};
		trace!(roll = %self, total = outcome.total(), losing_total = ?outcome.losing_total, "evaluated roll");
		outcome
	}

	/// Rolls every dice term once, in order.
	fn roll_dice(&self, roller: &mut impl Roller) -> Vec<DieOutcome> {
		self.dice.iter().map(|die| roller.roll(die)).collect()
	}

	/// Sum of all modifiers
	fn modifier_total(&self) -> i32 {
		self.modifiers.iter().sum()
	}
}

impl FromStr for Roll {
	type Err = Error;

	/// Parses a roll expression in [`Mode::Normal`]. See [`Roll::from_expr()`].
	#[inline]
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_expr(s, Mode::Normal)
	}
}

impl fmt::Display for Roll {
	/// Formats the roll as an expression such as `1d20-1d4+5`. Dice terms come first, followed by the modifiers.
	/// The mode isn't included.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (idx, die) in self.dice.iter().enumerate() {
			if idx > 0 && !die.is_negative() {
				f.write_str("+")?;
			}
			write!(f, "{die}")?;
		}
		for modifier in &self.modifiers {
			write!(f, "{modifier:+}")?;
		}
		Ok(())
	}
}

/// Calculates the aggregate signed total of a set of dice outcomes.
#[must_use]
pub fn aggregate_total(outcomes: &[DieOutcome]) -> i32 {
	outcomes.iter().map(DieOutcome::signed_total).sum()
}

/// Representation of the result from evaluating a [`Roll`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
	/// Outcome of every dice term in the kept evaluation
	dice: Vec<DieOutcome>,

	/// Signed modifiers of the roll
	modifiers: Vec<i32>,

	/// Mode the roll was evaluated in
	mode: Mode,

	/// Total of the discarded evaluation, for advantage and disadvantage
	losing_total: Option<i32>,
}

impl RollOutcome {
	/// Outcome of every dice term in the kept evaluation
	#[must_use]
	#[inline]
	pub fn dice(&self) -> &[DieOutcome] {
		&self.dice
	}

	/// Signed modifiers of the roll
	#[must_use]
	#[inline]
	pub fn modifiers(&self) -> &[i32] {
		&self.modifiers
	}

	/// Mode the roll was evaluated in
	#[must_use]
	#[inline]
	pub const fn mode(&self) -> Mode {
		self.mode
	}

	/// Total of the discarded alternative evaluation (including modifiers). Only present for advantage and
	/// disadvantage.
	#[must_use]
	#[inline]
	pub const fn losing_total(&self) -> Option<i32> {
		self.losing_total
	}

	/// Sum of all dice outcomes, each counted negatively if its dice are negative
	#[must_use]
	pub fn roll_total(&self) -> i32 {
		aggregate_total(&self.dice)
	}

	/// Sum of all modifiers
	#[must_use]
	pub fn modifier_total(&self) -> i32 {
		self.modifiers.iter().sum()
	}

	/// Final result of the roll: dice plus modifiers
	#[must_use]
	pub fn total(&self) -> i32 {
		self.roll_total().saturating_add(self.modifier_total())
	}
}

impl fmt::Display for RollOutcome {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// A plain roll of a single dice term is formatted exactly like its [`DieOutcome`]. Anything else starts with a
	/// `Total:` line, followed by one line per dice term, a line summarizing the modifiers (if there are any), and
	/// finally the losing total for advantage and disadvantage.
	///
	/// # Examples
	/// ```
	/// use rollbot::{dice::roller::Iter as IterRoller, Mode, Roll};
	///
	/// let roll = Roll::from_expr("1d20+2d6+5-2", Mode::Normal)?;
	/// let outcome = roll.evaluate(&mut IterRoller::new([12, 3, 4]));
	/// assert_eq!(outcome.to_string(), "Total: 22\n1d20: 12\n2d6: 7 | 3, 4\nModifiers: 3 | 5, -2");
	/// # Ok::<(), rollbot::Error>(())
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let ([single], [], Mode::Normal) = (self.dice.as_slice(), self.modifiers.as_slice(), self.mode) {
			return write!(f, "{single}");
		}

		write!(f, "Total: {}", self.total())?;
		for outcome in &self.dice {
			write!(f, "\n{outcome}")?;
		}

		match self.modifiers.as_slice() {
			[] => {}
			[_] => write!(f, "\nModifier: {}", self.modifier_total())?,
			modifiers => {
				let list = modifiers.iter().map(ToString::to_string).collect::<Vec<_>>();
				write!(f, "\nModifiers: {} | {}", self.modifier_total(), list.join(", "))?;
			}
		}

		if let Some(losing_total) = self.losing_total {
			write!(f, "\nOther roll: {losing_total}")?;
		}

		Ok(())
	}
}
