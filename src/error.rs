//! The error type shared by parsing, evaluation, and saved-roll storage.

use std::{
	num::{IntErrorKind, ParseIntError},
	ops::{Range, RangeInclusive},
	str::FromStr,
};

/// An error resulting from parsing a roll, validating it, or looking one up in storage.
///
/// Every variant is recoverable and meant to be shown to whoever issued the command.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The input doesn't match the roll grammar, or a structural rule was violated
	/// (no dice in a roll, option before any roll, unrecognized token, empty input).
	///
	/// # Examples
	/// ```
	/// use rollbot::{Die, Error};
	///
	/// let err = Die::from_token("d20").unwrap_err();
	/// assert!(matches!(err, Error::InvalidSyntax { .. }));
	/// ```
	#[error("invalid syntax in \"{input}\": {reason}")]
	InvalidSyntax {
		/// Text that failed to parse
		input: String,

		/// Byte range within `input` where the problem was found
		span: Range<usize>,

		/// Description of what was expected
		reason: String,
	},

	/// A number (dice count, sides, modifier magnitude, repeat count) is outside its allowed bounds.
	///
	/// # Examples
	/// ```
	/// use rollbot::{Die, Error};
	///
	/// let err = Die::from_token("101d20").unwrap_err();
	/// assert!(matches!(err, Error::OutOfRange { what: "Number of dice", .. }));
	/// ```
	#[error("{what} must be between {min} and {max} (got {value})")]
	OutOfRange {
		/// Name of the value that was checked
		what: &'static str,

		/// Value as it was written
		value: String,

		/// Smallest allowed value
		min: i64,

		/// Largest allowed value
		max: i64,
	},

	/// A single roll has more dice and modifiers combined than allowed.
	#[error("a roll may only have up to {max} parts ({count} given)")]
	TooManyComponents {
		/// Number of components found
		count: usize,

		/// Maximum number of components
		max: usize,
	},

	/// A matched numeric string couldn't be converted to a number.
	/// The grammar only admits ASCII digits, so this shouldn't happen in practice.
	#[error("\"{0}\" is not a number")]
	NotANumber(String),

	/// No saved roll exists with the given name for the given owner.
	#[error("no saved roll named \"{name}\"")]
	DoesNotExist {
		/// Name that was looked up
		name: String,
	},
}

impl Error {
	/// Creates an [`Error::InvalidSyntax`] covering the whole of `input`.
	#[must_use]
	pub fn syntax(input: impl Into<String>, reason: impl Into<String>) -> Self {
		let input = input.into();
		Self::InvalidSyntax {
			span: 0..input.len(),
			input,
			reason: reason.into(),
		}
	}

	/// Indicates whether this is an [`Error::InvalidSyntax`].
	#[must_use]
	#[inline]
	pub const fn is_syntax(&self) -> bool {
		matches!(self, Self::InvalidSyntax { .. })
	}
}

/// Checks a number against `bounds`, producing an [`Error::OutOfRange`] naming `what` if it falls outside them.
pub(crate) fn in_bounds<T>(val: T, what: &'static str, bounds: &RangeInclusive<T>) -> Result<T, Error>
where
	T: PartialOrd + Copy + Into<i64> + ToString,
{
	if bounds.contains(&val) {
		Ok(val)
	} else {
		Err(Error::OutOfRange {
			what,
			value: val.to_string(),
			min: (*bounds.start()).into(),
			max: (*bounds.end()).into(),
		})
	}
}

/// Converts a digit string to a number and checks it against `bounds`.
///
/// Digit strings too large for `T` are out of range rather than not-a-number.
pub(crate) fn bounded<T>(digits: &str, what: &'static str, bounds: RangeInclusive<T>) -> Result<T, Error>
where
	T: FromStr<Err = ParseIntError> + PartialOrd + Copy + Into<i64> + ToString,
{
	let val = digits.parse::<T>().map_err(|err| match err.kind() {
		IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Error::OutOfRange {
			what,
			value: digits.to_owned(),
			min: (*bounds.start()).into(),
			max: (*bounds.end()).into(),
		},
		_ => Error::NotANumber(digits.to_owned()),
	})?;

	in_bounds(val, what, &bounds)
}
