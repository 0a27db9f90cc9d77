use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::cube::{cubiecube::CubieCube, facelet::FaceletGrid, Face};

/// Divisor used by the default heuristic. Fast, but it overestimates.
pub const DEFAULT_DEFLATION: usize = 4;

/// A quarter turn moves at most 20 facelets, so this divisor never overestimates.
pub const ADMISSIBLE_DEFLATION: usize = 20;

/// Estimates the number of moves still needed to solve a cube.
/// Has to return 0 exactly for the solved cube.
pub trait Heuristic: Send + Sync {
	fn estimate(&self, cube: &CubieCube) -> usize;
}

/// Counts the facelets not showing the color of their face,
/// divided by the deflation and at least 1 for unsolved cubes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisplacedFacelets {
	pub deflation: usize,
}

impl Default for MisplacedFacelets {
	fn default() -> Self {
		Self { deflation: DEFAULT_DEFLATION }
	}
}

impl MisplacedFacelets {
	/// A deflation of 0 is treated as 1
	pub fn new(deflation: usize) -> Self {
		Self { deflation: deflation.max(1) }
	}

	pub fn admissible() -> Self {
		Self::new(ADMISSIBLE_DEFLATION)
	}

	pub fn grid_estimate(&self, grid: &FaceletGrid) -> usize {
		let misplaced: usize = Face::iter().map(|face| grid.misplaced(face)).sum();
		if misplaced == 0 {
			return 0;
		}
		(misplaced / self.deflation.max(1)).max(1)
	}
}

impl Heuristic for MisplacedFacelets {
	fn estimate(&self, cube: &CubieCube) -> usize {
		self.grid_estimate(&FaceletGrid::from(cube))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cube::{turn::Move, RubiksCube};
	use crate::solve::distances_to_solved;

	#[test]
	fn solved_and_single_moves() {
		let h = MisplacedFacelets::default();
		assert_eq!(h.estimate(&CubieCube::new()), 0);

		for m in Move::iter() {
			let mut cube = CubieCube::new();
			cube.apply_move(m);
			// 12 misplaced facelets
			assert_eq!(h.estimate(&cube), 3);
			assert_eq!(MisplacedFacelets::admissible().estimate(&cube), 1);
			assert_eq!(MisplacedFacelets::new(1).estimate(&cube), 12);
		}
	}

	#[test]
	fn deflation_is_clamped() {
		let mut grid = FaceletGrid::new();
		grid.apply_sequence("RUF").unwrap();

		assert_eq!(MisplacedFacelets::new(0), MisplacedFacelets::new(1));
		assert_eq!(MisplacedFacelets::new(1000).grid_estimate(&grid), 1);
		assert_eq!(MisplacedFacelets::new(0).grid_estimate(&grid), 28);
	}

	#[test]
	/// The admissible preset never overestimates the true distance
	fn admissible_preset() {
		let h = MisplacedFacelets::admissible();
		for (cube, dist) in distances_to_solved(4) {
			assert!(h.estimate(&cube) <= dist, "Overestimated {:?}", cube);
		}
	}
}
