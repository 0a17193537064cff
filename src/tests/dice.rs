use crate::{
	dice::{
		roller::{FastRand as FastRandRoller, Iter as IterRoller, Max as MaxRoller, Roller, Val as ValRoller},
		Die, DieOutcome, MAX_DICE, MAX_SIDES, MIN_SIDES,
	},
	Error,
};

#[test]
fn single_d20() {
	let die = construct_plain(1, 20);
	let outcome = rolls_in_range(&die);
	assert_eq!(outcome.rolls().len(), 1);
	assert_eq!(outcome.die(), &die);
}

#[test]
fn double_d8() {
	let die = construct_plain(2, 8);
	let outcome = rolls_in_range(&die);
	assert_eq!(outcome.rolls().len(), 2);
}

#[test]
fn max_dice() {
	let die = construct_plain(MAX_DICE, MAX_SIDES);
	let outcome = rolls_in_range(&die);
	assert_eq!(outcome.rolls().len(), usize::from(MAX_DICE));
}

#[test]
fn valid_bounds_roll_in_range() {
	let mut roller = FastRandRoller::with_seed(0x5eed);
	for count in [1, 2, 7, 50, MAX_DICE] {
		for sides in [MIN_SIDES, 3, 6, 20, 100, 999, MAX_SIDES] {
			let die = Die::new(count, sides, false).unwrap();
			let outcome = roller.roll(&die);
			assert_eq!(outcome.rolls().len(), usize::from(count));
			assert!(outcome.rolls().iter().all(|val| (1..=sides).contains(val)));
		}
	}
}

#[test]
fn all_dice_sides_occur() {
	let die = construct_plain(MAX_DICE, 20);
	let mut roller = FastRandRoller::default();
	let mut rolls = Vec::new();

	for _ in 1..=100 {
		rolls.extend_from_slice(roller.roll(&die).rolls());
	}

	for side in 1..=20 {
		assert!(rolls.iter().any(|&val| val == side));
	}
}

#[test]
fn construct_out_of_range() {
	for (count, sides) in [(0, 20), (101, 20), (1, 1), (1, 1001), (1, 0)] {
		let result = Die::new(count, sides, false);
		assert!(
			matches!(result, Err(Error::OutOfRange { .. })),
			"{count}d{sides} should be out of range"
		);
	}
}

#[test]
fn parse_token() {
	let die = Die::from_token("4d6").unwrap();
	assert_eq!((die.count(), die.sides(), die.is_negative()), (4, 6, false));

	let die = Die::from_token("+1d20").unwrap();
	assert_eq!((die.count(), die.sides(), die.is_negative()), (1, 20, false));

	let die = Die::from_token("-2d4").unwrap();
	assert_eq!((die.count(), die.sides(), die.is_negative()), (2, 4, true));

	let die: Die = "007d010".parse().unwrap();
	assert_eq!((die.count(), die.sides()), (7, 10));
}

#[test]
fn parse_token_invalid_syntax() {
	for token in ["", "d20", "1d", "1d20+1", "1d20x", " 1d20", "1D20", "+-1d20", "1d2d3", "one d20"] {
		let result = Die::from_token(token);
		assert!(
			matches!(result, Err(Error::InvalidSyntax { .. })),
			"\"{token}\" should be invalid, got {result:?}"
		);
	}
}

#[test]
fn parse_token_out_of_range() {
	for token in ["0d20", "101d20", "1d1", "1d1001", "99999999999999999999d6", "1d99999999999"] {
		let result = Die::from_token(token);
		assert!(
			matches!(result, Err(Error::OutOfRange { .. })),
			"\"{token}\" should be out of range, got {result:?}"
		);
	}
}

#[test]
fn syntax_error_points_at_problem() {
	let Err(Error::InvalidSyntax { input, span, .. }) = Die::from_token("12x6") else {
		panic!("expected a syntax error");
	};
	assert_eq!(input, "12x6");
	assert_eq!(span.start, 2);
}

#[test]
fn display() {
	assert_eq!(Die::new(3, 8, false).unwrap().to_string(), "3d8");
	assert_eq!(Die::new(1, 4, true).unwrap().to_string(), "-1d4");
}

#[test]
fn render_single_die_omits_breakdown() {
	let outcome = IterRoller::new([13]).roll(&construct_plain(1, 20));
	assert_eq!(outcome.to_string(), "1d20: 13");
}

#[test]
fn render_multiple_dice_lists_rolls_in_order() {
	let outcome = IterRoller::new([6, 1, 4]).roll(&construct_plain(3, 6));
	assert_eq!(outcome.to_string(), "3d6: 11 | 6, 1, 4");
}

#[test]
fn render_negative() {
	let outcome = IterRoller::new([2, 3]).roll(&Die::new(2, 4, true).unwrap());
	assert_eq!(outcome.to_string(), "-2d4: 5 | 2, 3");
	assert_eq!(outcome.subtotal(), 5);
	assert_eq!(outcome.signed_total(), -5);
}

#[test]
fn rollers_stay_in_range() {
	let die = construct_plain(4, 6);
	assert_eq!(MaxRoller.roll(&die).rolls(), [6, 6, 6, 6]);
	assert_eq!(ValRoller(3).roll(&die).rolls(), [3, 3, 3, 3]);
	assert_eq!(ValRoller(42).roll(&die).rolls(), [6, 6, 6, 6]);
	assert_eq!(ValRoller(0).roll(&die).rolls(), [1, 1, 1, 1]);
}

#[test]
fn seeded_rolls_are_reproducible() {
	let die = construct_plain(10, 20);
	let first = FastRandRoller::with_seed(42).roll(&die);
	let second = FastRandRoller::with_seed(42).roll(&die);
	assert_eq!(first, second);
	assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn seeded_roll_fixtures() {
	let d20 = construct_plain(1, 20);
	assert_eq!(FastRandRoller::with_seed(42).roll(&d20).to_string(), "1d20: 10");

	let outcome = FastRandRoller::with_seed(42).roll(&construct_plain(4, 6));
	assert_eq!(outcome.rolls(), [3, 2, 5, 3]);
	assert_eq!(outcome.to_string(), "4d6: 13 | 3, 2, 5, 3");
}

fn construct_plain(count: u8, sides: u16) -> Die {
	let die = Die::new(count, sides, false).unwrap();
	assert_eq!(die.count(), count);
	assert_eq!(die.sides(), sides);
	assert!(!die.is_negative());
	die
}

fn rolls_in_range(die: &Die) -> DieOutcome {
	let outcome = FastRandRoller::default().roll(die);
	assert!(!outcome.rolls().iter().any(|&val| val < 1 || val > die.sides()));
	outcome
}
