use std::{str::FromStr, time::Duration};

use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rubiks_ida::prelude::*;

fn solve_grid(text: &str, config: SearchConfig) -> Result<Solution, SolveError> {
	let grid = FaceletGrid::from_str(text).unwrap();
	let cube = CubieCube::try_from(&grid).unwrap();
	Solver::new(config).solve(&cube)
}

#[test_log::test]
fn solve_from_text() {
	let mut grid = FaceletGrid::new();
	grid.apply_sequence("RUF").unwrap();
	let text = grid.to_string();

	let solution = solve_grid(&text, SearchConfig::default()).unwrap();
	info!("{} after {:?}", solution, solution.stats);

	grid.apply_moves(solution.moves.iter().copied());
	assert!(grid.is_solved());
	assert_eq!(solution.to_string(), "FFFUUURRR");
}

#[test_log::test]
fn solved_text_gives_an_empty_solution() {
	let text = FaceletGrid::new().to_string();
	let solution = solve_grid(&text, SearchConfig::default()).unwrap();
	assert_eq!(solution.to_string(), "");
}

#[test_log::test]
fn scrambles_solve_sequential_and_parallel() {
	let mut rng = StdRng::seed_from_u64(7);

	for _ in 0..5 {
		let scramble = random_sequence(3, &mut rng);
		let mut start = CubieCube::new();
		start.apply_moves(scramble.iter().copied());

		for parallel in [false, true] {
			let config = SearchConfig::default().with_parallel(parallel);
			let solution = Solver::new(config).solve(&start).unwrap();
			info!(
				"{} solved by {} (parallel: {})",
				format_moves(&scramble),
				solution,
				parallel
			);

			let mut cube = start.clone();
			cube.apply_moves(solution.moves);
			assert!(cube.is_solved());
		}
	}
}

#[test_log::test]
fn failures_are_distinguishable() {
	let mut cube = CubieCube::new();
	cube.apply_sequence("RUFLDB").unwrap();

	let timed_out = Solver::new(SearchConfig::default().with_budget(Duration::ZERO)).solve(&cube);
	assert!(matches!(timed_out, Err(SolveError::TimedOut { .. })));

	let ceiling = Solver::new(SearchConfig::default().with_ceiling(1)).solve(&cube);
	assert_eq!(ceiling, Err(SolveError::ThresholdExceeded { ceiling: 1 }));

	assert_ne!(
		timed_out.unwrap_err().to_string(),
		ceiling.unwrap_err().to_string()
	);
}

#[test_log::test]
fn grid_errors_surface() {
	assert_eq!(FaceletGrid::from_str(""), Err(GridError::Empty));

	let mut text = FaceletGrid::new().to_string();
	text.push_str("   RRR\n");
	assert_eq!(FaceletGrid::from_str(&text), Err(GridError::LineCount(10)));
}

#[test_log::test]
fn cube_state_serializes() {
	let mut cube = CubieCube::random();
	cube.apply_sequence("FBRLUD").unwrap();

	let bytes = bincode::serialize(&cube).unwrap();
	let back: CubieCube = bincode::deserialize(&bytes).unwrap();
	assert_eq!(back, cube);

	let config = SearchConfig::default().with_parallel(true);
	let bytes = bincode::serialize(&(config, MisplacedFacelets::admissible())).unwrap();
	let (c, h): (SearchConfig, MisplacedFacelets) = bincode::deserialize(&bytes).unwrap();
	assert_eq!(c, config);
	assert_eq!(h.deflation, 20);
}
