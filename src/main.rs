//! rollbot - roll dice from the command line, or answer a stream of bot commands from stdin

use std::{
	io::{self, BufRead},
	ops::Range,
	path::PathBuf,
	process::ExitCode,
};

use anyhow::{Context, Result};
use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use rollbot::{
	dice::roller::FastRand as FastRandRoller,
	store::{MemoryStore, Owner},
	texts::{self, Texts},
	Bot, Error, RollCommand,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Owner of saved rolls made from this process
const LOCAL_OWNER: Owner = Owner { user: 0, chat: 0 };

/// Dice roller for tabletop roll notation
#[derive(Parser, Debug)]
#[command(
	name = "rollbot",
	version,
	about = "Roll dice like `1d20+5 adv x2`, or answer bot commands read from stdin"
)]
struct Args {
	/// Seed for the dice roller, for reproducible results
	#[arg(long, env = "ROLLBOT_SEED")]
	seed: Option<u64>,

	/// Maximum number of rolls (counting repeats) a single command may expand into
	#[arg(long, env = "ROLLBOT_MAX_ROLLS")]
	max_rolls: Option<u32>,

	/// Directory of text files overriding the built-in texts
	#[arg(long, env = "ROLLBOT_TEXTS")]
	texts: Option<PathBuf>,

	/// Roll command to evaluate; bot commands are read from stdin if omitted
	#[arg(trailing_var_arg = true)]
	roll: Vec<String>,
}

fn main() -> Result<ExitCode> {
	// Initialize tracing
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "rollbot=info".into()))
		.with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
		.init();

	let args = Args::parse();

	let texts = match &args.texts {
		Some(dir) => Texts::load(dir).with_context(|| format!("Failed to load texts from {}", dir.display()))?,
		None => Texts::default(),
	};

	let mut roller = args.seed.map_or_else(FastRandRoller::default, FastRandRoller::with_seed);

	if !args.roll.is_empty() {
		return roll_once(&args.roll, &mut roller, args.max_rolls, &texts);
	}

	info!(seed = ?args.seed, max_rolls = ?args.max_rolls, "reading commands from stdin");
	let mut bot = Bot::new(roller, MemoryStore::default(), texts).with_max_rolls(args.max_rolls);
	for line in io::stdin().lock().lines() {
		let line = line.context("Failed to read from stdin")?;
		if let Some(reply) = bot.handle(LOCAL_OWNER, &line) {
			println!("{reply}\n");
		}
	}

	Ok(ExitCode::SUCCESS)
}

/// Evaluates a single roll command given as arguments and prints the result.
fn roll_once(args: &[String], roller: &mut FastRandRoller, max_rolls: Option<u32>, texts: &Texts) -> Result<ExitCode> {
	let command = RollCommand::from_args(args).and_then(|command| {
		if let Some(max) = max_rolls {
			command.ensure_max_rolls(max)?;
		}
		Ok(command)
	});

	match command {
		Ok(command) => {
			println!("{}", command.evaluate_and_render(roller));
			Ok(ExitCode::SUCCESS)
		}
		Err(Error::InvalidSyntax { input, span, reason }) => {
			report_syntax(&input, span, &reason)?;
			eprintln!("{}", texts.get(texts::ROLL_SYNTAX).unwrap_or_default());
			Ok(ExitCode::FAILURE)
		}
		Err(err) => {
			eprintln!("{err}");
			Ok(ExitCode::FAILURE)
		}
	}
}

/// Prints a diagnostic pointing at the part of a roll that couldn't be parsed.
fn report_syntax(input: &str, span: Range<usize>, reason: &str) -> Result<()> {
	Report::build(ReportKind::Error, ("roll", span.clone()))
		.with_message("Invalid roll syntax")
		.with_label(
			Label::new(("roll", span))
				.with_message(reason)
				.with_color(Color::Red),
		)
		.finish()
		.eprint(("roll", Source::from(input)))
		.context("Failed to print diagnostic")
}
