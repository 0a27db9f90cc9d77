use std::str::FromStr;

use rubiks_ida::prelude::*;

// The solved cube after "FR"
const SCRAMBLED: &str = "   OOW
   OOW
   GGW
GGRWWBOOOGYY
GGRWWRBBBOYY
GGRWWRBBBOYY
   BBY
   RRY
   RRY
";

fn main() {
	let grid = FaceletGrid::from_str(SCRAMBLED).unwrap();
	grid.print();

	let mut cube = CubieCube::try_from(&grid).unwrap();
	let solution = Solver::new(SearchConfig::default()).solve(&cube).unwrap();
	println!("{} ({} nodes)", solution, solution.stats.nodes);

	cube.apply_moves(solution.moves);
	assert!(cube.is_solved());
}
