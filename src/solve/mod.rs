pub mod heuristic;
pub mod ida;

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::cube::turn::{format_moves, Move};

/// The search fails once the threshold grows beyond this
pub const DEFAULT_CEILING: usize = 35;

/// Wall-clock time a search may take
pub const DEFAULT_BUDGET: Duration = Duration::from_millis(9700);

/// Knobs of a single search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
	/// Largest threshold still searched
	pub ceiling: usize,
	pub budget: Duration,
	/// Search the six root branches on the rayon pool
	pub parallel: bool,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			ceiling: DEFAULT_CEILING,
			budget: DEFAULT_BUDGET,
			parallel: false,
		}
	}
}

impl SearchConfig {
	pub fn with_ceiling(mut self, ceiling: usize) -> Self {
		self.ceiling = ceiling;
		self
	}

	pub fn with_budget(mut self, budget: Duration) -> Self {
		self.budget = budget;
		self
	}

	pub fn with_parallel(mut self, parallel: bool) -> Self {
		self.parallel = parallel;
		self
	}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
	#[error("No solution found within {budget:?}, the threshold reached {threshold}")]
	TimedOut { budget: Duration, threshold: usize },
	#[error("The threshold exceeded the ceiling of {ceiling} without a solution")]
	ThresholdExceeded { ceiling: usize },
	#[error("Every state was pruned at threshold {threshold}")]
	Exhausted { threshold: usize },
}

/// What a search did on its way to the solution
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
	/// Number of visited DFS nodes, summed over all iterations
	pub nodes: usize,
	/// Number of bounded depth first searches
	pub iterations: usize,
	/// The threshold of the last iteration
	pub threshold: usize,
	pub elapsed: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
	pub moves: Vec<Move>,
	pub stats: SearchStats,
}

impl Solution {
	pub fn len(&self) -> usize {
		self.moves.len()
	}

	pub fn is_empty(&self) -> bool {
		self.moves.is_empty()
	}
}

impl fmt::Display for Solution {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", format_moves(&self.moves))
	}
}

/// Breadth first search for exact distances to the solved cube.
#[cfg(test)]
pub(crate) fn distances_to_solved(
	max_depth: usize,
) -> std::collections::HashMap<crate::cube::cubiecube::CubieCube, usize> {
	use crate::cube::{cubiecube::CubieCube, RubiksCube};
	use std::collections::HashMap;

	let mut dist = HashMap::from([(CubieCube::new(), 0)]);
	let mut frontier = vec![CubieCube::new()];

	// Undoing a move backwards from the solved cube reaches the states that move solves
	for depth in 1..=max_depth {
		let mut next = Vec::new();
		for cube in frontier {
			for m in Move::ALL {
				let mut c = cube.clone();
				c.apply_moves([m; 3]);
				if !dist.contains_key(&c) {
					dist.insert(c.clone(), depth);
					next.push(c);
				}
			}
		}
		frontier = next;
	}

	dist
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_builder() {
		let config = SearchConfig::default()
			.with_ceiling(12)
			.with_budget(Duration::from_secs(1))
			.with_parallel(true);

		assert_eq!(config.ceiling, 12);
		assert_eq!(config.budget, Duration::from_secs(1));
		assert!(config.parallel);

		let default = SearchConfig::default();
		assert_eq!(default.ceiling, 35);
		assert_eq!(default.budget, Duration::from_millis(9700));
		assert!(!default.parallel);
	}

	#[test]
	fn bfs_distances() {
		let dist = distances_to_solved(3);
		let count = |depth: usize| dist.values().filter(|d| **d == depth).count();

		assert_eq!(count(0), 1);
		assert_eq!(count(1), 6);
		// 36 pairs, of which the 3 opposite pairs commute
		assert_eq!(count(2), 33);
		assert_eq!(count(3), 180);
	}
}
