use crate::{
	dice::{
		roller::{FastRand as FastRandRoller, Iter as IterRoller, Max as MaxRoller},
		Die,
	},
	roll::Mode,
	Error, RollCommand,
};

#[test]
fn single_roll() {
	let command = RollCommand::from_args(["1d20"]).unwrap();
	assert_eq!(command.entries().len(), 1);

	let entry = &command.entries()[0];
	assert_eq!(entry.roll.dice(), [Die::new(1, 20, false).unwrap()]);
	assert_eq!(entry.roll.mode(), Mode::Normal);
	assert_eq!(entry.repeat, 1);
}

#[test]
fn advantage_with_repeat() {
	let command = RollCommand::from_args(["1d20", "adv", "x2"]).unwrap();
	assert_eq!(command.entries().len(), 1);

	let entry = &command.entries()[0];
	assert_eq!(entry.roll.mode(), Mode::Advantage);
	assert_eq!(entry.repeat, 2);

	let rendered = command.evaluate_and_render(&mut IterRoller::new([3, 9, 15, 2]));
	assert_eq!(
		rendered,
		"Total: 9\n1d20: 9\nOther roll: 3\n\nTotal: 15\n1d20: 15\nOther roll: 2"
	);
	assert_eq!(rendered.split("\n\n").count(), 2);
}

#[test]
fn mode_prefixes() {
	for arg in ["a", "ad", "adv", "advan", "advantage"] {
		let command = RollCommand::from_args(["1d20", arg]).unwrap();
		assert_eq!(command.entries()[0].roll.mode(), Mode::Advantage, "{arg}");
	}

	for arg in ["d", "di", "dis", "disadv", "disadvantage"] {
		let command = RollCommand::from_args(["1d20", arg]).unwrap();
		assert_eq!(command.entries()[0].roll.mode(), Mode::Disadvantage, "{arg}");
	}
}

#[test]
fn conflicting_modes_are_invalid() {
	for args in [["1d20", "adv", "dis"], ["1d20", "d", "a"], ["1d20", "disadvantage", "advantage"]] {
		let result = RollCommand::from_args(args);
		assert!(matches!(result, Err(Error::InvalidSyntax { .. })), "{args:?}");
	}
}

#[test]
fn repeated_mode_is_allowed() {
	let command = RollCommand::from_args(["1d20", "adv", "a", "x2", "2d6", "dis", "d"]).unwrap();
	assert_eq!(command.entries()[0].roll.mode(), Mode::Advantage);
	assert_eq!(command.entries()[1].roll.mode(), Mode::Disadvantage);
}

#[test]
fn options_apply_to_preceding_roll() {
	let command = RollCommand::from_args(["1d20+5", "x3", "2d6", "dis", "1d4", "a", "x2"]).unwrap();
	let entries = command.entries();
	assert_eq!(entries.len(), 3);

	assert_eq!(entries[0].roll.modifiers(), [5]);
	assert_eq!((entries[0].roll.mode(), entries[0].repeat), (Mode::Normal, 3));
	assert_eq!((entries[1].roll.mode(), entries[1].repeat), (Mode::Disadvantage, 1));
	assert_eq!((entries[2].roll.mode(), entries[2].repeat), (Mode::Advantage, 2));
	assert_eq!(command.total_rolls(), 6);
}

#[test]
fn render_order() {
	let command = RollCommand::from_args(["1d6", "x2", "1d8"]).unwrap();
	let rendered = command.evaluate_and_render(&mut IterRoller::new([1, 2, 3]));
	assert_eq!(rendered, "1d6: 1\n\n1d6: 2\n\n1d8: 3");
}

#[test]
fn repeats_are_independent() {
	let command = RollCommand::from_args(["1d20", "x3"]).unwrap();
	let outcomes = command.evaluate(&mut IterRoller::new([4, 8, 15]));
	let totals = outcomes.iter().map(|outcome| outcome.total()).collect::<Vec<_>>();
	assert_eq!(totals, [4, 8, 15]);
}

#[test]
fn empty_is_invalid() {
	let result = RollCommand::from_args(Vec::<String>::new());
	assert!(matches!(result, Err(Error::InvalidSyntax { .. })));
}

#[test]
fn option_before_roll_is_invalid() {
	for args in [vec!["adv"], vec!["x2", "1d20"], vec!["dis", "1d20"]] {
		let result = RollCommand::from_args(&args);
		assert!(matches!(result, Err(Error::InvalidSyntax { .. })), "{args:?}");
	}
}

#[test]
fn unknown_argument_is_invalid() {
	for args in [
		vec!["1d20", "foo"],
		vec!["1d20", "x"],
		vec!["1d20", "x2a"],
		vec!["1d20", "advantages"],
		vec!["1d20", ""],
		vec!["1d20", "+5"],
		vec!["1d20", "-1d4"],
	] {
		let result = RollCommand::from_args(&args);
		assert!(matches!(result, Err(Error::InvalidSyntax { .. })), "{args:?}");
	}
}

#[test]
fn invalid_roll_is_reported() {
	assert!(matches!(
		RollCommand::from_args(["1d20+"]),
		Err(Error::InvalidSyntax { .. })
	));
	assert!(matches!(
		RollCommand::from_args(["1d20", "adv", "0d6"]),
		Err(Error::OutOfRange { .. })
	));
	assert!(matches!(
		RollCommand::from_args(["1d20", "5"]),
		Err(Error::InvalidSyntax { .. })
	));
}

#[test]
fn repeat_bounds() {
	assert!(matches!(
		RollCommand::from_args(["1d20", "x0"]),
		Err(Error::OutOfRange { .. })
	));
	assert!(matches!(
		RollCommand::from_args(["1d20", "x99999999999"]),
		Err(Error::OutOfRange { .. })
	));

	let command = RollCommand::from_args(["1d20", "x4294967295"]).unwrap();
	assert_eq!(command.total_rolls(), u64::from(u32::MAX));
}

#[test]
fn max_rolls() {
	let command = RollCommand::from_args(["1d20", "x10", "2d6", "x10"]).unwrap();
	assert_eq!(command.total_rolls(), 20);
	assert!(command.ensure_max_rolls(20).is_ok());
	assert!(matches!(
		command.ensure_max_rolls(19),
		Err(Error::OutOfRange { max: 19, .. })
	));
}

#[test]
fn max_render() {
	let command = RollCommand::from_args(["2d6+1d4-3", "adv"]).unwrap();
	assert_eq!(
		command.evaluate_and_render(&mut MaxRoller),
		"Total: 13\n2d6: 12 | 6, 6\n1d4: 4\nModifier: -3\nOther roll: 13"
	);
}

#[test]
fn seeded_renders_are_reproducible() {
	let command = RollCommand::from_args(["1d20+4d6+5-2", "adv", "x3", "2d8", "dis"]).unwrap();
	let first = command.evaluate_and_render(&mut FastRandRoller::with_seed(0x750c38d574400));
	let second = command.evaluate_and_render(&mut FastRandRoller::with_seed(0x750c38d574400));
	assert_eq!(first, second);
	assert_eq!(first.split("\n\n").count(), 4);
}

#[test]
fn seeded_render_fixture() {
	let command = RollCommand::from_args(["1d20-1d4+5", "adv", "x2", "2d8", "dis"]).unwrap();
	assert_eq!(
		command.evaluate_and_render(&mut FastRandRoller::with_seed(42)),
		"Total: 18\n1d20: 15\n-1d4: 2\nModifier: 5\nOther roll: 13\n\n\
		Total: 17\n1d20: 13\n-1d4: 1\nModifier: 5\nOther roll: 11\n\n\
		Total: 9\n2d8: 9 | 2, 7\nOther roll: 13"
	);
}

#[test]
fn roller_is_reused_across_commands() {
	let mut roller = IterRoller::new([2, 19]);
	let command = RollCommand::from_args(["1d20"]).unwrap();
	assert_eq!(command.evaluate_and_render(&mut roller), "1d20: 2");
	assert_eq!(command.evaluate_and_render(&mut roller), "1d20: 19");
	assert!(!roller.can_roll());
}
