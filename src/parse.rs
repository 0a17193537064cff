//! Parser generators for die tokens and roll expressions.
//!
//! The parsers only recognize structure; they yield the raw digit strings in a typed [`Component`] tree. Bounds
//! checking happens when the components are turned into [`Die`](crate::Die)s and modifiers.

use chumsky::{prelude::*, span::Span as _};

use crate::error::Error;

/// A single signed term of a roll expression
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Component {
	/// Dice term, such as `+4d6`
	Dice(DieSpec),

	/// Flat integer term, such as `-2`
	Modifier(ModifierSpec),
}

/// Unvalidated dice term
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Mirrors the grammar exactly")]
pub struct DieSpec {
	/// Whether the term was preceded by `-`
	pub negative: bool,

	/// Digits before the `d`
	pub count: String,

	/// Digits after the `d`
	pub sides: String,
}

/// Unvalidated modifier term
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Mirrors the grammar exactly")]
pub struct ModifierSpec {
	/// Whether the term was preceded by `-`
	pub negative: bool,

	/// Digits of the modifier, without its sign
	pub magnitude: String,
}

/// Prepares a roll expression for [`roll()`] by giving its first term the implicit `+` sign, so that every component
/// carries exactly one leading sign.
///
/// # Examples
/// ```
/// assert_eq!(rollbot::parse::normalize("1d20+4"), "+1d20+4");
/// ```
#[must_use]
pub fn normalize(expr: &str) -> String {
	format!("+{expr}")
}

/// Generates a parser for one or more ASCII digits.
fn digits<'src>() -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
	any()
		.filter(|c: &char| c.is_ascii_digit())
		.repeated()
		.at_least(1)
		.collect::<String>()
		.labelled("digits")
}

/// Generates a parser for a `+` or `-` sign, yielding whether it is negative.
fn sign<'src>() -> impl Parser<'src, &'src str, bool, extra::Err<Rich<'src, char>>> + Clone {
	choice((just('+').to(false), just('-').to(true))).labelled("sign")
}

/// Generates a parser for the unsigned `<count>d<sides>` part of a dice term.
fn dice_part<'src>() -> impl Parser<'src, &'src str, (String, String), extra::Err<Rich<'src, char>>> + Clone {
	digits().then_ignore(just('d')).then(digits())
}

/// Generates a parser for a standalone die token like "2d6", "+1d20", or "-1d4", and expects end of input.
pub fn die<'src>() -> impl Parser<'src, &'src str, DieSpec, extra::Err<Rich<'src, char>>> + Clone {
	sign()
		.or_not()
		.then(dice_part())
		.then_ignore(end())
		.map(|(sign, (count, sides))| DieSpec {
			negative: sign.unwrap_or(false),
			count,
			sides,
		})
}

/// Generates a parser for a [normalized](normalize) roll expression like "+1d20+4d6+5-2", and expects end of input.
///
/// Every component must start with a sign, and the sign must be followed directly by a dice term or an integer.
pub fn roll<'src>() -> impl Parser<'src, &'src str, Vec<Component>, extra::Err<Rich<'src, char>>> + Clone {
	let term = choice((
		dice_part().map(|(count, sides)| Term::Dice(count, sides)),
		digits().map(Term::Num),
	));

	sign()
		.then(term)
		.map(|(negative, term)| match term {
			Term::Dice(count, sides) => Component::Dice(DieSpec {
				negative,
				count,
				sides,
			}),
			Term::Num(magnitude) => Component::Modifier(ModifierSpec { negative, magnitude }),
		})
		.repeated()
		.at_least(1)
		.collect::<Vec<_>>()
		.then_ignore(end())
}

/// Unsigned term, before its sign is attached
#[derive(Debug, Clone)]
enum Term {
	/// Count and sides digits
	Dice(String, String),

	/// Integer digits
	Num(String),
}

/// Converts the first of a parser's errors into an [`Error::InvalidSyntax`] for `input`.
///
/// `offset` is the number of bytes that were prepended to `input` before parsing, and is subtracted from the span.
pub(crate) fn syntax_error(input: &str, errs: &[Rich<'_, char>], offset: usize) -> Error {
	let Some(err) = errs.first() else {
		return Error::syntax(input, "unrecognized roll");
	};

	let span = err.span();
	let start = span.start().saturating_sub(offset).min(input.len());
	let end = span.end().saturating_sub(offset).clamp(start, input.len());

	Error::InvalidSyntax {
		input: input.to_owned(),
		span: start..end,
		reason: err.to_string(),
	}
}
