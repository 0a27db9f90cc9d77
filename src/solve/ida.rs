use std::{
	sync::atomic::{AtomicBool, Ordering},
	time::{Duration, Instant},
};

use log::{debug, info, warn};
use rayon::prelude::*;

use super::{
	heuristic::{Heuristic, MisplacedFacelets},
	SearchConfig, SearchStats, Solution, SolveError,
};
use crate::cube::{cubiecube::CubieCube, turn::Move, RubiksCube};

/// Result of one bounded depth first search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Probe {
	/// The path of the context solves the cube
	Found,
	/// Smallest f-value which exceeded the limit
	Bound(usize),
	/// No state left to continue with
	Exhausted,
	/// The time budget ran out
	Expired,
	/// Another branch found a solution
	Cancelled,
}

#[derive(Clone, Copy, Debug)]
struct Deadline {
	start: Instant,
	budget: Duration,
}

impl Deadline {
	fn start(budget: Duration) -> Self {
		Self {
			start: Instant::now(),
			budget,
		}
	}

	fn expired(&self) -> bool {
		self.start.elapsed() >= self.budget
	}
}

/// Everything a single bounded search mutates.
/// The cube is turned in place and restored on the way back up.
struct SearchContext<'a, H> {
	heuristic: &'a H,
	deadline: Deadline,
	cancel: Option<&'a AtomicBool>,
	cube: CubieCube,
	path: Vec<Move>,
	nodes: usize,
}

impl<'a, H: Heuristic> SearchContext<'a, H> {
	fn new(heuristic: &'a H, deadline: Deadline, cube: CubieCube) -> Self {
		Self {
			heuristic,
			deadline,
			cancel: None,
			cube,
			path: Vec::new(),
			nodes: 0,
		}
	}

	fn cancelled(&self) -> bool {
		self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
	}

	/// `prev` was the last move and has been applied `run` times in a row.
	fn dfs(&mut self, g: usize, limit: usize, prev: Option<Move>, run: usize) -> Probe {
		if self.deadline.expired() {
			return Probe::Expired;
		}
		if self.cancelled() {
			return Probe::Cancelled;
		}
		self.nodes += 1;

		let f = g + self.heuristic.estimate(&self.cube);
		if f > limit {
			return Probe::Bound(f);
		}
		if self.cube.is_solved() {
			return Probe::Found;
		}

		let mut min = None;
		for m in Move::ALL {
			if prev.is_some_and(|p| !m.may_follow(p, run)) {
				continue;
			}
			let next_run = if prev == Some(m) { run + 1 } else { 1 };

			self.cube.apply_move(m);
			self.path.push(m);

			let probe = self.dfs(g + 1, limit, Some(m), next_run);
			if probe == Probe::Found {
				return probe;
			}

			self.path.pop();
			// Three more quarter turns undo the move
			self.cube.apply_moves([m; 3]);

			match probe {
				Probe::Bound(b) => min = Some(min.map_or(b, |x: usize| x.min(b))),
				Probe::Exhausted => (),
				_ => return probe,
			}
		}

		min.map_or(Probe::Exhausted, Probe::Bound)
	}
}

/// Iterative deepening A* over the six quarter turns.
///
/// ```
/// use rubiks_ida::prelude::*;
///
/// let mut cube = CubieCube::new();
/// cube.apply_sequence("UF").unwrap();
///
/// let solution = Solver::new(SearchConfig::default()).solve(&cube).unwrap();
/// cube.apply_moves(solution.moves);
/// assert!(cube.is_solved());
/// ```
pub struct Solver<H = MisplacedFacelets> {
	config: SearchConfig,
	heuristic: H,
}

impl Solver {
	pub fn new(config: SearchConfig) -> Self {
		Self::with_heuristic(config, MisplacedFacelets::default())
	}
}

impl<H: Heuristic> Solver<H> {
	pub fn with_heuristic(config: SearchConfig, heuristic: H) -> Self {
		Self { config, heuristic }
	}

	pub fn config(&self) -> &SearchConfig {
		&self.config
	}

	pub fn heuristic(&self) -> &H {
		&self.heuristic
	}

	/// Search a sequence of moves solving the cube.
	/// Fails once the time budget runs out or the threshold passes the ceiling.
	pub fn solve(&self, cube: &CubieCube) -> Result<Solution, SolveError> {
		let deadline = Deadline::start(self.config.budget);
		let mut stats = SearchStats::default();

		if cube.is_solved() {
			info!("The cube is already solved");
			return Ok(Solution {
				moves: Vec::new(),
				stats,
			});
		}

		let mut threshold = self.heuristic.estimate(cube);
		info!(
			"Searching for a solution, initial threshold {}{}",
			threshold,
			if self.config.parallel { " (parallel)" } else { "" }
		);

		loop {
			stats.threshold = threshold;

			if deadline.expired() {
				warn!(
					"Gave up after {:.3}s at threshold {}, {} nodes visited",
					deadline.start.elapsed().as_secs_f64(),
					threshold,
					stats.nodes
				);
				return Err(SolveError::TimedOut {
					budget: self.config.budget,
					threshold,
				});
			}
			if threshold > self.config.ceiling {
				warn!(
					"Threshold {} exceeds the ceiling of {}, {} nodes visited",
					threshold, self.config.ceiling, stats.nodes
				);
				return Err(SolveError::ThresholdExceeded {
					ceiling: self.config.ceiling,
				});
			}

			debug!("Searching threshold {}...", threshold);
			let iteration_start = Instant::now();

			let (probe, path, nodes) = if self.config.parallel {
				self.search_parallel(cube, threshold, deadline)
			} else {
				self.search(cube, threshold, deadline)
			};
			stats.nodes += nodes;
			stats.iterations += 1;

			debug!(
				"Traversed {} nodes in {:.3}s",
				nodes,
				iteration_start.elapsed().as_secs_f64()
			);

			match probe {
				Probe::Found => {
					stats.elapsed = deadline.start.elapsed();
					info!(
						"Solution of length {} found in {:.3}s at threshold {}",
						path.len(),
						stats.elapsed.as_secs_f64(),
						threshold
					);
					return Ok(Solution { moves: path, stats });
				}
				// The threshold never shrinks
				Probe::Bound(next) => threshold = next.max(threshold),
				Probe::Exhausted => {
					warn!("No state left to search at threshold {}", threshold);
					return Err(SolveError::Exhausted { threshold });
				}
				Probe::Expired | Probe::Cancelled => {
					warn!(
						"Time budget of {:.3}s ran out at threshold {}, {} nodes visited",
						self.config.budget.as_secs_f64(),
						threshold,
						stats.nodes
					);
					return Err(SolveError::TimedOut {
						budget: self.config.budget,
						threshold,
					});
				}
			}
		}
	}

	/// One bounded search on the current thread
	fn search(&self, cube: &CubieCube, limit: usize, deadline: Deadline) -> (Probe, Vec<Move>, usize) {
		let mut ctx = SearchContext::new(&self.heuristic, deadline, cube.clone());
		let probe = ctx.dfs(0, limit, None, 0);
		(probe, ctx.path, ctx.nodes)
	}

	/// One bounded search with every root move in its own rayon task.
	/// The first branch in move order holding a solution wins.
	fn search_parallel(
		&self,
		cube: &CubieCube,
		limit: usize,
		deadline: Deadline,
	) -> (Probe, Vec<Move>, usize) {
		// The root itself, exactly like the sequential search
		if deadline.expired() {
			return (Probe::Expired, Vec::new(), 0);
		}
		let f = self.heuristic.estimate(cube);
		if f > limit {
			return (Probe::Bound(f), Vec::new(), 1);
		}

		let found = AtomicBool::new(false);
		let branches: Vec<(Probe, Vec<Move>, usize)> = Move::ALL
			.par_iter()
			.map(|&m| {
				let mut ctx = SearchContext::new(&self.heuristic, deadline, cube.clone());
				ctx.cancel = Some(&found);
				ctx.cube.apply_move(m);
				ctx.path.push(m);

				let probe = ctx.dfs(1, limit, Some(m), 1);
				if probe == Probe::Found {
					found.store(true, Ordering::Relaxed);
				}
				(probe, ctx.path, ctx.nodes)
			})
			.collect();

		let nodes = 1 + branches.iter().map(|(_, _, n)| n).sum::<usize>();

		let mut min = None;
		let mut expired = false;
		for (probe, path, _) in branches {
			match probe {
				Probe::Found => return (Probe::Found, path, nodes),
				Probe::Bound(b) => min = Some(min.map_or(b, |x: usize| x.min(b))),
				Probe::Expired => expired = true,
				Probe::Exhausted | Probe::Cancelled => (),
			}
		}

		if expired {
			return (Probe::Expired, Vec::new(), nodes);
		}
		(min.map_or(Probe::Exhausted, Probe::Bound), Vec::new(), nodes)
	}
}
