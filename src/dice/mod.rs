//! All functionality for directly creating dice, rolling them, and working with their resulting rolls.
//!
//! This is the home of the dice "primitives". For combining several of them with modifiers, see [`Roll`].
//!
//! [`Roll`]: crate::roll::Roll

pub mod roller;

use std::{fmt, str::FromStr};

use chumsky::Parser;

pub use self::roller::Roller;
use crate::{
	error::{bounded, in_bounds, Error},
	parse::{self, DieSpec},
};

/// Maximum number of dice in a single [`Die`] term
pub const MAX_DICE: u8 = 100;

/// Minimum number of sides per die
pub const MIN_SIDES: u16 = 2;

/// Maximum number of sides per die
pub const MAX_SIDES: u16 = 1000;

/// A single `NdM` term: some number of dice with a specific number of sides, optionally subtracted from the total
/// of the roll it belongs to.
///
/// A `Die` can only be constructed with a valid count and number of sides, and is immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Die {
	/// Number of dice to roll
	count: u8,

	/// Number of sides for each die
	sides: u16,

	/// Whether the dice's total is subtracted rather than added
	negative: bool,
}

impl Die {
	/// Creates a new set of dice with a given count and number of sides.
	///
	/// # Errors
	/// If `count` isn't within `1..=MAX_DICE` or `sides` isn't within `MIN_SIDES..=MAX_SIDES`, an
	/// [`Error::OutOfRange`] is returned.
	///
	/// # Examples
	/// ```
	/// use rollbot::{Die, Error};
	///
	/// let die = Die::new(2, 6, false)?;
	/// assert_eq!(die.to_string(), "2d6");
	///
	/// assert!(matches!(Die::new(0, 6, false), Err(Error::OutOfRange { .. })));
	/// assert!(matches!(Die::new(1, 1, false), Err(Error::OutOfRange { .. })));
	/// # Ok::<(), rollbot::Error>(())
	/// ```
	pub fn new(count: u8, sides: u16, negative: bool) -> Result<Self, Error> {
		Ok(Self {
			count: in_bounds(count, "Number of dice", &(1..=MAX_DICE))?,
			sides: in_bounds(sides, "Number of sides", &(MIN_SIDES..=MAX_SIDES))?,
			negative,
		})
	}

	/// Parses a single die token such as `2d6`, `+1d20`, or `-1d4`. The whole token must match.
	///
	/// # Errors
	/// If the token doesn't match `[+-]?<digits>d<digits>`, an [`Error::InvalidSyntax`] is returned.
	/// If the count or number of sides is out of bounds, an [`Error::OutOfRange`] is returned.
	///
	/// # Examples
	/// ```
	/// use rollbot::Die;
	///
	/// let die = Die::from_token("-3d8")?;
	/// assert_eq!(die.count(), 3);
	/// assert_eq!(die.sides(), 8);
	/// assert!(die.is_negative());
	/// # Ok::<(), rollbot::Error>(())
	/// ```
	pub fn from_token(token: &str) -> Result<Self, Error> {
		let spec = parse::die()
			.parse(token)
			.into_result()
			.map_err(|errs| parse::syntax_error(token, &errs, 0))?;
		Self::from_spec(&spec)
	}

	/// Validates a parsed dice term.
	pub(crate) fn from_spec(spec: &DieSpec) -> Result<Self, Error> {
		Ok(Self {
			count: bounded(&spec.count, "Number of dice", 1..=MAX_DICE)?,
			sides: bounded(&spec.sides, "Number of sides", MIN_SIDES..=MAX_SIDES)?,
			negative: spec.negative,
		})
	}

	/// Number of dice to roll
	#[must_use]
	#[inline]
	pub const fn count(&self) -> u8 {
		self.count
	}

	/// Number of sides for each die
	#[must_use]
	#[inline]
	pub const fn sides(&self) -> u16 {
		self.sides
	}

	/// Indicates whether the dice's total is subtracted from the roll they're part of.
	#[must_use]
	#[inline]
	pub const fn is_negative(&self) -> bool {
		self.negative
	}

	/// Sign prefix used when displaying the dice
	const fn sign(&self) -> &'static str {
		if self.negative {
			"-"
		} else {
			""
		}
	}
}

impl FromStr for Die {
	type Err = Error;

	#[inline]
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_token(s)
	}
}

impl fmt::Display for Die {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}{}d{}", self.sign(), self.count, self.sides)
	}
}

/// Representation of the result from rolling a [`Die`] term once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DieOutcome {
	/// Dice that were rolled to produce this
	die: Die,

	/// Each individual value that was rolled, in the order it was rolled
	rolls: Vec<u16>,
}

impl DieOutcome {
	/// Creates an outcome from a term and the values rolled for it, in the order they were rolled.
	pub(crate) const fn new(die: Die, rolls: Vec<u16>) -> Self {
		Self { die, rolls }
	}

	/// Dice that were rolled to produce this
	#[must_use]
	#[inline]
	pub const fn die(&self) -> &Die {
		&self.die
	}

	/// Each individual value that was rolled, in the order it was rolled
	#[must_use]
	#[inline]
	pub fn rolls(&self) -> &[u16] {
		&self.rolls
	}

	/// Calculates the unsigned sum of all rolled values.
	///
	/// # Examples
	/// ```
	/// use rollbot::{dice::roller::{Iter as IterRoller, Roller}, Die};
	///
	/// let die = Die::from_token("-3d6")?;
	/// let outcome = IterRoller::new([2, 5, 6]).roll(&die);
	/// assert_eq!(outcome.subtotal(), 13);
	/// assert_eq!(outcome.signed_total(), -13);
	/// # Ok::<(), rollbot::Error>(())
	/// ```
	#[must_use]
	pub fn subtotal(&self) -> i32 {
		self.rolls.iter().map(|&val| i32::from(val)).sum()
	}

	/// Calculates what this outcome contributes to its roll's total: the subtotal, negated for negative dice.
	#[must_use]
	pub fn signed_total(&self) -> i32 {
		if self.die.negative {
			-self.subtotal()
		} else {
			self.subtotal()
		}
	}
}

impl fmt::Display for DieOutcome {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The format is `{dice}: {subtotal}`. When more than one die was rolled, the individual values are appended
	/// after a `|`, in the order they were rolled.
	///
	/// # Examples
	/// ```
	/// use rollbot::{dice::roller::{Iter as IterRoller, Roller}, Die};
	///
	/// let mut roller = IterRoller::new([17, 3, 6, 1]);
	/// assert_eq!(roller.roll(&"1d20".parse::<Die>()?).to_string(), "1d20: 17");
	/// assert_eq!(roller.roll(&"3d6".parse::<Die>()?).to_string(), "3d6: 10 | 3, 6, 1");
	/// # Ok::<(), rollbot::Error>(())
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.die, self.subtotal())?;
		if self.rolls.len() > 1 {
			let rolls = self.rolls.iter().map(ToString::to_string).collect::<Vec<_>>();
			write!(f, " | {}", rolls.join(", "))?;
		}
		Ok(())
	}
}
