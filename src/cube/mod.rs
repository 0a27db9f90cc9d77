pub mod cubiecube;
pub mod facelet;
pub mod turn;

use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use turn::*;

/// The dimension of the cube
pub const CUBE_DIM: usize = 3;

/// The number of facelets per side
pub const CUBE_AREA: usize = CUBE_DIM * CUBE_DIM;

/// The number of sides of a cube
pub const NUM_SIDES: usize = 6;

/// Rows of the unfolded net
pub const GRID_ROWS: usize = 3 * CUBE_DIM;

/// Columns of the unfolded net
pub const GRID_COLS: usize = 4 * CUBE_DIM;

/// A (row, column) position inside the unfolded net
pub type Coord = (usize, usize);

/// The sticker colors of the fixed color scheme.
/// The discriminant doubles as the bit index when identifying pieces.
#[derive(
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	Debug,
	strum::Display,
	strum::EnumString,
	strum::EnumIter,
	strum::EnumCount,
	strum::FromRepr,
	Serialize,
	Deserialize,
)]
#[repr(u8)]
pub enum Color {
	O, // orange
	G, // green
	W, // white
	B, // blue
	Y, // yellow
	R, // red
}

impl Color {
	/// The character used for this color in the text grid
	pub const fn to_byte(self) -> u8 {
		match self {
			Color::O => b'O',
			Color::G => b'G',
			Color::W => b'W',
			Color::B => b'B',
			Color::Y => b'Y',
			Color::R => b'R',
		}
	}

	/// Parse a grid character. Blanks and unknown characters return None.
	pub const fn from_byte(byte: u8) -> Option<Self> {
		match byte {
			b'O' => Some(Color::O),
			b'G' => Some(Color::G),
			b'W' => Some(Color::W),
			b'B' => Some(Color::B),
			b'Y' => Some(Color::Y),
			b'R' => Some(Color::R),
			_ => None,
		}
	}

	/// Whether this is the color of the up or the down face
	pub const fn is_up_down(self) -> bool {
		matches!(self, Color::O | Color::R)
	}
}

/// Returns the ANSI-colorcode for the given color.
pub fn get_ansii_color(col: Color) -> &'static str {
	match col {
		Color::O => "\x1b[38;5;208m",
		Color::G => "\x1b[32m",
		Color::W => "\x1b[00m",
		Color::B => "\x1b[34m",
		Color::Y => "\x1b[93m",
		Color::R => "\x1b[31m",
	}
}

/// The sides of the cube, in the order they appear in the net
#[derive(
	Clone, Copy, PartialEq, Eq, Hash, Debug, strum::Display, strum::EnumIter, strum::EnumCount,
)]
#[repr(u8)]
pub enum Face {
	Up,
	Left,
	Front,
	Right,
	Back,
	Down,
}

impl Face {
	/// The color every facelet of this face has on the solved cube
	pub const fn color(self) -> Color {
		match self {
			Face::Up => Color::O,
			Face::Left => Color::G,
			Face::Front => Color::W,
			Face::Right => Color::B,
			Face::Back => Color::Y,
			Face::Down => Color::R,
		}
	}

	/// The top-left cell of this face inside the net
	pub const fn origin(self) -> Coord {
		match self {
			Face::Up => (0, 3),
			Face::Left => (3, 0),
			Face::Front => (3, 3),
			Face::Right => (3, 6),
			Face::Back => (3, 9),
			Face::Down => (6, 3),
		}
	}

	/// The face on the other side of the cube
	pub const fn opposite(self) -> Face {
		match self {
			Face::Up => Face::Down,
			Face::Down => Face::Up,
			Face::Left => Face::Right,
			Face::Right => Face::Left,
			Face::Front => Face::Back,
			Face::Back => Face::Front,
		}
	}

	/// Returns the face containing the given cell, or None if the cell lies off the net.
	pub const fn at(row: usize, col: usize) -> Option<Face> {
		if row >= GRID_ROWS || col >= GRID_COLS {
			return None;
		}
		let band = row / CUBE_DIM;
		let slot = col / CUBE_DIM;
		match (band, slot) {
			(0, 1) => Some(Face::Up),
			(2, 1) => Some(Face::Down),
			(1, 0) => Some(Face::Left),
			(1, 1) => Some(Face::Front),
			(1, 2) => Some(Face::Right),
			(1, 3) => Some(Face::Back),
			_ => None,
		}
	}

	/// Color of the given cell when the cube is solved.
	/// Only meaningful for sticker coordinates, off-net cells fall back to orange.
	const fn solved_color(cell: Coord) -> Color {
		match Face::at(cell.0, cell.1) {
			Some(face) => face.color(),
			None => Color::O,
		}
	}
}

fn color_mask(cols: &[Color]) -> u8 {
	cols.iter().fold(0, |m, c| m | 1 << *c as u8)
}

// ===== Edge Piece =====

/// All the different position names for an Edge
#[derive(
	Clone,
	Copy,
	Default,
	PartialEq,
	Eq,
	Hash,
	strum::EnumIter,
	strum::EnumCount,
	strum::Display,
	strum::FromRepr,
	Debug,
	Serialize,
	Deserialize,
)]
#[repr(usize)]
#[rustfmt::skip]
pub enum Edge {
	#[default]
	UF, UL, UR, UB, // up edges
	DF, DL, DR, DB, // down edges
	FL, FR, BL, BR, // middle layer
}

pub const NUM_EDGES: usize = Edge::COUNT;

/// The two stickers of every edge position.
/// The first one lies on the up/down face, or on the front/back face for the middle layer.
#[rustfmt::skip]
const EDGE_FACELETS: [[Coord; 2]; NUM_EDGES] = [
	[(2, 4), (3, 4)],  [(1, 3), (3, 1)], [(1, 5), (3, 7)], [(0, 4), (3, 10)],
	[(6, 4), (5, 4)],  [(7, 3), (5, 1)], [(7, 5), (5, 7)], [(8, 4), (5, 10)],
	[(4, 3), (4, 2)],  [(4, 5), (4, 6)], [(4, 11), (4, 0)], [(4, 9), (4, 8)],
];

impl Edge {
	/// The grid cells of this edge position
	pub const fn facelets(self) -> [Coord; 2] {
		EDGE_FACELETS[self as usize]
	}

	/// The colors of this edge piece, in the order of its home stickers
	pub const fn colors(self) -> [Color; 2] {
		let [a, b] = self.facelets();
		[Face::solved_color(a), Face::solved_color(b)]
	}

	/// Parse the edge from the given colors.
	/// Returns None if there exist no Edge with the given colors.
	pub fn parse_edge(col: [Color; 2]) -> Option<Self> {
		let hash = color_mask(&col);
		Edge::iter().find(|e| color_mask(&e.colors()) == hash)
	}
}

// ===== Corner Piece =====

/// All the different position names for a corner
#[derive(
	Clone,
	Copy,
	Default,
	PartialEq,
	Eq,
	Hash,
	Debug,
	strum::EnumIter,
	strum::EnumString,
	strum::EnumCount,
	strum::Display,
	strum::FromRepr,
	Serialize,
	Deserialize,
)]
#[allow(clippy::upper_case_acronyms)]
#[repr(usize)]
#[rustfmt::skip]
pub enum Corner {
	#[default]
	UFL, UFR, UBL, UBR,
	DFL, DFR, DBL, DBR,
}

pub const NUM_CORNERS: usize = Corner::COUNT;

/// The three stickers of every corner position: the up/down sticker first,
/// then clockwise around the corner as seen from outside.
/// The twist of a piece relies on this cyclic order, don't reorder!
#[rustfmt::skip]
const CORNER_FACELETS: [[Coord; 3]; NUM_CORNERS] = [
	[(2, 3), (3, 3), (3, 2)], [(2, 5), (3, 6), (3, 5)],
	[(0, 3), (3, 0), (3, 11)], [(0, 5), (3, 9), (3, 8)],
	[(6, 3), (5, 2), (5, 3)], [(6, 5), (5, 5), (5, 6)],
	[(8, 3), (5, 11), (5, 0)], [(8, 5), (5, 8), (5, 9)],
];

impl Corner {
	/// The grid cells of this corner position
	pub const fn facelets(self) -> [Coord; 3] {
		CORNER_FACELETS[self as usize]
	}

	/// The colors of this corner piece, in the order of its home stickers
	pub const fn colors(self) -> [Color; 3] {
		let [a, b, c] = self.facelets();
		[
			Face::solved_color(a),
			Face::solved_color(b),
			Face::solved_color(c),
		]
	}

	/// Parse the corner from the given colors.
	/// If no corner with the given colors exist, the function returns None.
	pub fn parse_corner(col: [Color; 3]) -> Option<Self> {
		let hash = color_mask(&col);
		Corner::iter().find(|c| color_mask(&c.colors()) == hash)
	}
}

/// It contains all the different ways a cube configuration
/// could be illegal.
/// From it, you are able to know how to fix the cube.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CubeError {
	#[error("The center of the {face} face is {found}, expected {}", .face.color())]
	Center { face: Face, found: Color },
	#[error("The corner at position {0} has a invalid color combination")]
	Corner(Corner),
	#[error("The corner at position {0} has a invalid color permutation")]
	CornerOrder(Corner),
	#[error("The edge at position {0} has a invalid color combination")]
	Edge(Edge),
	#[error("Not all cubies are present on the cube")]
	Cubies,
	#[error("The orientation-parity of the corners are off by +{0}")]
	CornerOrientation(usize),
	#[error("The orientation-parity of the edges are off by 1")]
	EdgeOrientation,
	#[error("The number of swaps needed is odd")]
	Permutation,
}

/// The RubiksCube trait, implemented by every cube representation.
pub trait RubiksCube {
	/// Apply a single clockwise quarter turn.
	fn apply_move(&mut self, m: Move);

	fn is_solved(&self) -> bool;

	/// Apply the given sequence of moves, left to right.
	fn apply_moves<I>(&mut self, moves: I)
	where
		I: IntoIterator<Item = Move>,
		Self: Sized,
	{
		for m in moves {
			self.apply_move(m);
		}
	}

	/// Parse a move string such as "RUF" and apply it.
	fn apply_sequence(&mut self, sequence: &str) -> Result<(), ParseMoveError>
	where
		Self: Sized,
	{
		let moves = parse_moves(sequence)?;
		self.apply_moves(moves);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::{cubiecube::*, facelet::*, *};

	#[test]
	/// Every piece is identified by its own home colors
	fn pieces_parse_their_colors() {
		for corner in Corner::iter() {
			assert_eq!(Corner::parse_corner(corner.colors()), Some(corner));
			let [a, b, c] = corner.colors();
			assert_eq!(Corner::parse_corner([c, a, b]), Some(corner));
		}
		for edge in Edge::iter() {
			assert_eq!(Edge::parse_edge(edge.colors()), Some(edge));
			let [a, b] = edge.colors();
			assert_eq!(Edge::parse_edge([b, a]), Some(edge));
		}

		// Opposite colors never share a piece
		assert_eq!(Edge::parse_edge([Color::O, Color::R]), None);
		assert_eq!(Corner::parse_corner([Color::W, Color::Y, Color::O]), None);
	}

	#[test]
	/// Stickers start at the up/down face and lie on three distinct faces
	fn facelet_tables_are_consistent() {
		for corner in Corner::iter() {
			let cols = corner.colors();
			assert!(cols[0].is_up_down());
			assert_ne!(cols[1], cols[2]);
		}
		for edge in Edge::iter() {
			let cols = edge.colors();
			match edge {
				Edge::FL | Edge::FR => assert_eq!(cols[0], Color::W),
				Edge::BL | Edge::BR => assert_eq!(cols[0], Color::Y),
				_ => assert!(cols[0].is_up_down()),
			}
		}
	}

	#[test]
	fn faces_and_colors() {
		for face in Face::iter() {
			assert_ne!(face, face.opposite());
			assert_eq!(face, face.opposite().opposite());
			let (r, c) = face.origin();
			assert_eq!(Face::at(r + 1, c + 1), Some(face));
		}
		assert_eq!(Face::at(0, 0), None);
		assert_eq!(Face::at(8, 11), None);
		for col in Color::iter() {
			assert_eq!(Color::from_byte(col.to_byte()), Some(col));
		}
		assert_eq!(Color::from_byte(b' '), None);
	}

	#[test]
	/// Both representations agree on what a move sequence does
	fn both_representations_turn_alike() {
		let mut grid = FaceletGrid::new();
		let mut cubie = CubieCube::new();

		grid.apply_sequence("RUFFLDBBR").unwrap();
		cubie.apply_sequence("RUFFLDBBR").unwrap();

		assert_eq!(FaceletGrid::from(&cubie), grid);
		assert!(!grid.is_solved());
		assert!(!cubie.is_solved());
	}
}
