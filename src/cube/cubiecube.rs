use const_for::const_for;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::facelet::FaceletGrid;
use crate::cube::*;

/// Corner twist (0..3) or edge flip (0..2)
pub type Ori = u8;

type CornerList = [(Corner, Ori); NUM_CORNERS];
type EdgeList = [(Edge, Ori); NUM_EDGES];

/// The cube as a permutation of its 8 corner and 12 edge pieces,
/// each with an orientation.
///
/// `corners[i]` is the piece sitting at position i.
/// Much cheaper to turn and compare than the facelet grid.
#[derive(PartialEq, Eq, Clone, Hash, Debug, Serialize, Deserialize)]
pub struct CubieCube {
	pub corners: CornerList,
	pub edges: EdgeList,
}

// ===== Tranformation-Corners =====
#[rustfmt::skip]
const TC_BASE: CornerList = [
	(Corner::UFL, 0), (Corner::UFR, 0), (Corner::UBL, 0), (Corner::UBR, 0),
	(Corner::DFL, 0), (Corner::DFR, 0), (Corner::DBL, 0), (Corner::DBR, 0),
];
#[rustfmt::skip]
const TC_FRONT: CornerList = [
	(Corner::DFL, 2), (Corner::UFL, 1), (Corner::UBL, 0), (Corner::UBR, 0),
	(Corner::DFR, 1), (Corner::UFR, 2), (Corner::DBL, 0), (Corner::DBR, 0),
];
#[rustfmt::skip]
const TC_BACK: CornerList = [
	(Corner::UFL, 0), (Corner::UFR, 0), (Corner::UBR, 1), (Corner::DBR, 2),
	(Corner::DFL, 0), (Corner::DFR, 0), (Corner::UBL, 2), (Corner::DBL, 1),
];
#[rustfmt::skip]
const TC_RIGHT: CornerList = [
	(Corner::UFL, 0), (Corner::DFR, 2), (Corner::UBL, 0), (Corner::UFR, 1),
	(Corner::DFL, 0), (Corner::DBR, 1), (Corner::DBL, 0), (Corner::UBR, 2),
];
#[rustfmt::skip]
const TC_LEFT: CornerList = [
	(Corner::UBL, 1), (Corner::UFR, 0), (Corner::DBL, 2), (Corner::UBR, 0),
	(Corner::UFL, 2), (Corner::DFR, 0), (Corner::DFL, 1), (Corner::DBR, 0),
];
#[rustfmt::skip]
const TC_UP: CornerList = [
	(Corner::UFR, 0), (Corner::UBR, 0), (Corner::UFL, 0), (Corner::UBL, 0),
	(Corner::DFL, 0), (Corner::DFR, 0), (Corner::DBL, 0), (Corner::DBR, 0),
];
#[rustfmt::skip]
const TC_DOWN: CornerList = [
	(Corner::UFL, 0), (Corner::UFR, 0), (Corner::UBL, 0), (Corner::UBR, 0),
	(Corner::DBL, 0), (Corner::DFL, 0), (Corner::DBR, 0), (Corner::DFR, 0),
];

// Sorted like Move: F, B, R, L, U, D
const CORNER_TRANSFORM: [CornerList; NUM_MOVES] =
	[TC_FRONT, TC_BACK, TC_RIGHT, TC_LEFT, TC_UP, TC_DOWN];

const fn chain_corners(t1: CornerList, t2: CornerList) -> CornerList {
	let mut out = TC_BASE;

	const_for!(i in 0..NUM_CORNERS => {
		let (c2, o2) = t2[i];
		let (c1, o1) = t1[c2 as usize];
		out[i] = (c1, (o1 + o2) % 3);
	});

	out
}

// ===== Edge Transformations =====
#[rustfmt::skip]
const TE_BASE: EdgeList = [
	(Edge::UF, 0), (Edge::UL, 0), (Edge::UR, 0), (Edge::UB, 0),
	(Edge::DF, 0), (Edge::DL, 0), (Edge::DR, 0), (Edge::DB, 0),
	(Edge::FL, 0), (Edge::FR, 0), (Edge::BL, 0), (Edge::BR, 0),
];
#[rustfmt::skip]
const TE_FRONT: EdgeList = [
	(Edge::FL, 1), (Edge::UL, 0), (Edge::UR, 0), (Edge::UB, 0),
	(Edge::FR, 1), (Edge::DL, 0), (Edge::DR, 0), (Edge::DB, 0),
	(Edge::DF, 1), (Edge::UF, 1), (Edge::BL, 0), (Edge::BR, 0),
];
#[rustfmt::skip]
const TE_BACK: EdgeList = [
	(Edge::UF, 0), (Edge::UL, 0), (Edge::UR, 0), (Edge::BR, 1),
	(Edge::DF, 0), (Edge::DL, 0), (Edge::DR, 0), (Edge::BL, 1),
	(Edge::FL, 0), (Edge::FR, 0), (Edge::UB, 1), (Edge::DB, 1),
];
#[rustfmt::skip]
const TE_RIGHT: EdgeList = [
	(Edge::UF, 0), (Edge::UL, 0), (Edge::FR, 0), (Edge::UB, 0),
	(Edge::DF, 0), (Edge::DL, 0), (Edge::BR, 0), (Edge::DB, 0),
	(Edge::FL, 0), (Edge::DR, 0), (Edge::BL, 0), (Edge::UR, 0),
];
#[rustfmt::skip]
const TE_LEFT: EdgeList = [
	(Edge::UF, 0), (Edge::BL, 0), (Edge::UR, 0), (Edge::UB, 0),
	(Edge::DF, 0), (Edge::FL, 0), (Edge::DR, 0), (Edge::DB, 0),
	(Edge::UL, 0), (Edge::FR, 0), (Edge::DL, 0), (Edge::BR, 0),
];
#[rustfmt::skip]
const TE_UP: EdgeList = [
	(Edge::UR, 0), (Edge::UF, 0), (Edge::UB, 0), (Edge::UL, 0),
	(Edge::DF, 0), (Edge::DL, 0), (Edge::DR, 0), (Edge::DB, 0),
	(Edge::FL, 0), (Edge::FR, 0), (Edge::BL, 0), (Edge::BR, 0),
];
#[rustfmt::skip]
const TE_DOWN: EdgeList = [
	(Edge::UF, 0), (Edge::UL, 0), (Edge::UR, 0), (Edge::UB, 0),
	(Edge::DL, 0), (Edge::DB, 0), (Edge::DF, 0), (Edge::DR, 0),
	(Edge::FL, 0), (Edge::FR, 0), (Edge::BL, 0), (Edge::BR, 0),
];

const EDGE_TRANSFORM: [EdgeList; NUM_MOVES] = [TE_FRONT, TE_BACK, TE_RIGHT, TE_LEFT, TE_UP, TE_DOWN];

const fn chain_edges(t1: EdgeList, t2: EdgeList) -> EdgeList {
	let mut out = TE_BASE;

	const_for!(i in 0..NUM_EDGES => {
		let (e2, o2) = t2[i];
		let (e1, o1) = t1[e2 as usize];
		out[i] = (e1, (o1 + o2) & 1);
	});

	out
}

// ==========

/// Number of inversions of the given permutation
fn count_inversions(perm: &[usize]) -> usize {
	let mut n = 0;
	for i in 0..perm.len() {
		for j in i + 1..perm.len() {
			if perm[i] > perm[j] {
				n += 1;
			}
		}
	}
	n
}

impl Default for CubieCube {
	fn default() -> Self {
		Self::new()
	}
}

impl CubieCube {
	pub const fn new() -> Self {
		CubieCube {
			corners: TC_BASE,
			edges: TE_BASE,
		}
	}

	/// Get the corner and orientation at position 'c'
	pub const fn corner(&self, c: Corner) -> (Corner, Ori) {
		self.corners[c as usize]
	}

	/// Get the edge and orientation at position 'e'
	pub const fn edge(&self, e: Edge) -> (Edge, Ori) {
		self.edges[e as usize]
	}

	pub fn apply_transformation(&mut self, tc: CornerList, te: EdgeList) {
		self.corners = chain_corners(self.corners, tc);
		self.edges = chain_edges(self.edges, te);
	}

	/// A uniformly random solvable cube
	pub fn random() -> Self {
		Self::random_with(&mut rand::thread_rng())
	}

	pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
		let mut corners: Vec<Corner> = Corner::iter().collect();
		let mut edges: Vec<Edge> = Edge::iter().collect();
		corners.shuffle(rng);
		edges.shuffle(rng);

		let mut out = CubieCube::new();
		for (i, c) in corners.into_iter().enumerate() {
			out.corners[i] = (c, rng.gen_range(0..3));
		}
		for (i, e) in edges.into_iter().enumerate() {
			out.edges[i] = (e, rng.gen_range(0..2));
		}

		// Fix the orientation sums with the last pieces
		let twist: Ori = out.corners[..NUM_CORNERS - 1].iter().map(|(_, o)| o).sum();
		out.corners[NUM_CORNERS - 1].1 = (3 - twist % 3) % 3;
		let flip: Ori = out.edges[..NUM_EDGES - 1].iter().map(|(_, o)| o).sum();
		out.edges[NUM_EDGES - 1].1 = flip & 1;

		// Swapping two edges fixes an odd permutation
		if out.permutation_parity() == 1 {
			let (a, b) = (out.edges[0].0, out.edges[1].0);
			out.edges[0].0 = b;
			out.edges[1].0 = a;
		}

		out
	}

	/// Parity of the combined corner and edge permutation, 0 or 1
	fn permutation_parity(&self) -> usize {
		let cperm: Vec<_> = self.corners.iter().map(|(c, _)| *c as usize).collect();
		let eperm: Vec<_> = self.edges.iter().map(|(e, _)| *e as usize).collect();
		(count_inversions(&cperm) + count_inversions(&eperm)) % 2
	}

	/// Check that the cube could be reached from the solved cube by turning.
	pub fn check_solvability(&self) -> Result<(), CubeError> {
		// Check that all cubies are there once
		let mut contains = [false; NUM_CORNERS];
		for (c, _) in self.corners.iter() {
			contains[*c as usize] = true;
		}
		if contains.into_iter().any(|b| !b) {
			return Err(CubeError::Cubies);
		}
		let mut contains = [false; NUM_EDGES];
		for (e, _) in self.edges.iter() {
			contains[*e as usize] = true;
		}
		if contains.into_iter().any(|b| !b) {
			return Err(CubeError::Cubies);
		}

		// The sum of the corner orientations have to be divisible by 3
		let cori = self.corners.iter().map(|(_, o)| *o as usize).sum::<usize>();
		if cori % 3 != 0 {
			return Err(CubeError::CornerOrientation(cori % 3));
		}

		// The sum of the edge orientations have to be divisible by 2
		let eori = self.edges.iter().map(|(_, o)| *o as usize).sum::<usize>();
		if eori % 2 != 0 {
			return Err(CubeError::EdgeOrientation);
		}

		// There must be an even number of swaps throughout the permutations
		if self.permutation_parity() != 0 {
			return Err(CubeError::Permutation);
		}

		Ok(())
	}

	pub fn is_solvable(&self) -> bool {
		self.check_solvability().is_ok()
	}
}

impl RubiksCube for CubieCube {
	fn apply_move(&mut self, m: Move) {
		self.apply_transformation(CORNER_TRANSFORM[m as usize], EDGE_TRANSFORM[m as usize]);
	}

	fn is_solved(&self) -> bool {
		self.edges == TE_BASE && self.corners == TC_BASE
	}
}

impl TryFrom<&FaceletGrid> for CubieCube {
	type Error = CubeError;

	/// Identify every piece of the grid and check that the result is solvable.
	fn try_from(value: &FaceletGrid) -> Result<Self, Self::Error> {
		for face in Face::iter() {
			let (r, c) = face.origin();
			if let Some(found) = value.get(r + 1, c + 1).filter(|col| *col != face.color()) {
				return Err(CubeError::Center { face, found });
			}
		}

		let mut out = CubieCube::new();
		for corner in Corner::iter() {
			out.corners[corner as usize] = value.get_corner_at_pos(corner)?;
		}
		for edge in Edge::iter() {
			out.edges[edge as usize] = value.get_edge_at_pos(edge)?;
		}

		out.check_solvability()?;
		Ok(out)
	}
}

impl TryFrom<FaceletGrid> for CubieCube {
	type Error = CubeError;

	fn try_from(value: FaceletGrid) -> Result<Self, Self::Error> {
		CubieCube::try_from(&value)
	}
}

impl From<&CubieCube> for FaceletGrid {
	/// Paint the pieces onto a grid. Centers never move.
	fn from(val: &CubieCube) -> Self {
		let mut out = FaceletGrid::new();

		for pos in Corner::iter() {
			let (c, o) = val.corner(pos);
			let cols = c.colors();
			for (k, cell) in pos.facelets().into_iter().enumerate() {
				out.set(cell, cols[(k + 3 - o as usize) % 3]);
			}
		}

		for pos in Edge::iter() {
			let (e, o) = val.edge(pos);
			let cols = e.colors();
			for (k, cell) in pos.facelets().into_iter().enumerate() {
				out.set(cell, cols[(k + o as usize) % 2]);
			}
		}

		out
	}
}

impl From<CubieCube> for FaceletGrid {
	fn from(val: CubieCube) -> Self {
		FaceletGrid::from(&val)
	}
}
