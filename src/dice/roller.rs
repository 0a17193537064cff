//! Abstractions for drawing die values using various means.

use std::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::{Die, DieOutcome};

/// Rolls dice - what else is there to say?
///
/// Implementors only need to draw single values; [`Roller::roll()`] takes care of rolling a whole [`Die`] term.
pub trait Roller {
	/// Draws a single value, which should be within `1..=sides`.
	#[must_use]
	fn roll_die(&mut self, sides: u16) -> u16;

	/// Rolls every die of a term once, in order. Drawn values are clamped to `1..=sides`, so the resulting outcome
	/// always holds valid values even if the roller doesn't.
	fn roll(&mut self, die: &Die) -> DieOutcome
	where
		Self: Sized,
	{
		let sides = die.sides();
		let rolls = (0..die.count())
			.map(|_| self.roll_die(sides).clamp(1, sides))
			.collect();
		DieOutcome::new(*die, rolls)
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use rollbot::{dice::roller::{FastRand as FastRandRoller, Roller}, Die};
///
/// let mut roller = FastRandRoller::default();
///
/// let die = Die::new(4, 6, false)?;
/// let _ = roller.roll(&die);
/// let _ = roller.roll(&die);
/// # Ok::<(), rollbot::Error>(())
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use rollbot::{dice::roller::{FastRand as FastRandRoller, Roller}, Die};
///
/// let die = Die::new(4, 6, false)?;
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&die);
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&die);
/// assert_eq!(first, second);
/// # Ok::<(), rollbot::Error>(())
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone, Default)]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Draws a single value using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, sides: u16) -> u16 {
		self.0.u16(1..=sides.max(1))
	}
}

/// Generates rolls that always have a specific value (clamped to the die's sides).
///
/// # Examples
/// ```
/// use rollbot::{dice::roller::{Roller, Val as ValRoller}, Die};
///
/// let mut roller = ValRoller(4);
///
/// let outcome = roller.roll(&Die::new(3, 6, false)?);
/// assert_eq!(outcome.rolls(), [4, 4, 4]);
///
/// let outcome = roller.roll(&Die::new(2, 2, false)?);
/// assert_eq!(outcome.rolls(), [2, 2]);
/// # Ok::<(), rollbot::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u16);

impl Roller for Val {
	/// Draws a single value, always the same one.
	#[inline]
	fn roll_die(&mut self, _sides: u16) -> u16 {
		self.0
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use rollbot::{dice::roller::{Max as MaxRoller, Roller}, Die};
///
/// let mut roller = MaxRoller;
///
/// let outcome = roller.roll(&Die::new(4, 6, false)?);
/// assert!(outcome.rolls().iter().all(|&val| val == 6));
///
/// let outcome = roller.roll(&Die::new(2, 20, false)?);
/// assert!(outcome.rolls().iter().all(|&val| val == 20));
/// # Ok::<(), rollbot::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Draws a single value, always the max value (same as the number of sides).
	#[inline]
	fn roll_die(&mut self, sides: u16) -> u16 {
		sides
	}
}

/// Generates rolls from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use rollbot::{dice::roller::{Iter as IterRoller, Roller}, Die};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 10]);
/// let outcome = roller.roll(&Die::new(5, 10, false)?);
/// assert_eq!(outcome.rolls(), [1, 2, 3, 4, 10]);
/// assert!(!roller.can_roll());
/// # Ok::<(), rollbot::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u16>>(Peekable<I>);

impl<I: Iterator<Item = u16>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u16>> Roller for Iter<I> {
	/// Draws the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _sides: u16) -> u16 {
		self.0.next().expect("iterator is finished")
	}
}
