use std::{error::Error, io::Write, str::FromStr, time::Duration};

use clap::Parser;
use log::{debug, info};
use strum::{Display, IntoEnumIterator};

use rubiks_ida::prelude::*;
use rubiks_ida::solve::{heuristic::DEFAULT_DEFLATION, DEFAULT_CEILING};

#[derive(
	PartialEq, Eq, Default, Debug, Display, Copy, Clone, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
enum HeuristicKind {
	/// Misplaced facelets divided by --deflation
	#[default]
	Misplaced,
	/// Misplaced facelets, deflated until it never overestimates
	Admissible,
}

impl HeuristicKind {
	fn build(self, deflation: usize) -> MisplacedFacelets {
		match self {
			HeuristicKind::Misplaced => MisplacedFacelets::new(deflation),
			HeuristicKind::Admissible => MisplacedFacelets::admissible(),
		}
	}
}

/// Rubik's Cube solver using IDA* over the six clockwise quarter turns
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// File with the cube as 9 lines of up to 12 color characters.
	/// The solved cube is used if omitted.
	input: Option<String>,

	/// Print the output to a file rather to the stdout
	output: Option<String>,

	/// Use a sequence to apply on the cube
	#[arg(short, default_value_t = String::new())]
	sequence: String,

	/// Solve the cube (the output is a sequence)
	#[arg(long, default_value_t = false)]
	solve: bool,

	/// Output length of sequence (if --solve is used)
	#[arg(short, long, default_value_t = false)]
	length: bool,

	/// Output the cube as text rather than colored
	#[arg(short, long, default_value_t = false)]
	char_print: bool,

	/// Scramble the cube
	#[arg(short, long, default_value_t = false)]
	random: bool,

	/// Time budget of the search in milliseconds
	#[arg(long, default_value_t = 9700)]
	budget_ms: u64,

	/// Largest threshold to search before giving up
	#[arg(long, default_value_t = DEFAULT_CEILING)]
	ceiling: usize,

	/// Divisor of the misplaced facelet count
	#[arg(long, default_value_t = DEFAULT_DEFLATION)]
	deflation: usize,

	/// Specify the heuristic used for solving
	#[arg(long, default_value_t = HeuristicKind::default())]
	heuristic: HeuristicKind,

	/// Print all possible heuristics and quit
	#[arg(long, default_value_t = false)]
	list_heuristics: bool,

	/// Search the root moves in parallel
	#[arg(long, default_value_t = false)]
	parallel: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
	pretty_env_logger::init();

	let args = Args::parse();
	debug!("{:?}", args);
	// Whether to redirect it to the stdout or a file
	let mut out: Box<dyn std::io::Write> = match &args.output {
		None => Box::new(std::io::stdout()),
		Some(path) => Box::new(std::fs::File::create(path)?),
	};

	// List the heuristics and exit
	if args.list_heuristics {
		for kind in HeuristicKind::iter() {
			writeln!(out, "{}", kind)?;
		}
		return Ok(());
	}

	let mut grid = FaceletGrid::new();

	// Generate a random input cube
	if args.random {
		grid = FaceletGrid::from(&CubieCube::random());
	}

	// Parses the cube out of the input file
	if let Some(path) = &args.input {
		let text = std::fs::read_to_string(path)?;
		grid = FaceletGrid::from_str(&text)?;
		info!("Read the cube from {}", path);
	}

	grid.apply_sequence(&args.sequence)?;

	// Solve the cube and only output the sequence
	if args.solve {
		let cube = CubieCube::try_from(&grid)?;
		info!("Solving with the {} heuristic", args.heuristic);

		let config = SearchConfig::default()
			.with_ceiling(args.ceiling)
			.with_budget(Duration::from_millis(args.budget_ms))
			.with_parallel(args.parallel);
		let solver = Solver::with_heuristic(config, args.heuristic.build(args.deflation));

		let solution = solver.solve(&cube)?;

		#[cfg(debug_assertions)]
		{
			let mut c = cube;
			c.apply_moves(solution.moves.iter().copied());
			assert!(c.is_solved());
		}

		if args.length {
			writeln!(out, "{} (len={})", solution, solution.len())?;
		} else {
			writeln!(out, "{}", solution)?;
		}
		return Ok(());
	}

	// Print the resulting cube (either as text or with colors)
	if args.char_print || args.output.is_some() {
		write!(out, "{}", grid)?;
	} else {
		grid.print();
	}

	Ok(())
}
