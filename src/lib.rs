//! This is a simple example how to solve the cube.
//!
//! ```
//! use rubiks_ida::prelude::*;
//!
//! let mut cube = CubieCube::new();
//! cube.apply_sequence("RUF").unwrap();
//!
//! let solver = Solver::new(SearchConfig::default());
//! let solution = solver.solve(&cube).unwrap();
//!
//! cube.apply_moves(solution.moves);
//! assert!(cube.is_solved());
//! ```
//!
//! Only the six clockwise quarter turns F, B, R, L, U and D exist.
//! A counterclockwise turn is written as three quarter turns.

pub mod cube;
pub mod solve;

pub mod prelude {
	pub use crate::cube::{cubiecube::*, facelet::*, turn::*, *};
	pub use crate::solve::{
		heuristic::{Heuristic, MisplacedFacelets},
		ida::Solver,
		SearchConfig, SearchStats, Solution, SolveError,
	};
}
