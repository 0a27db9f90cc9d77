use std::{fmt, str::FromStr};

use const_for::const_for;

use super::cubiecube::Ori;
use crate::cube::*;

type GridData = [[u8; GRID_COLS]; GRID_ROWS];

/// The unfolded net of the cube as a 9x12 grid of color characters.
///
/// ```text
///    UUU
///    UUU
///    UUU
/// LLLFFFRRRBBB
/// LLLFFFRRRBBB
/// LLLFFFRRRBBB
///    DDD
///    DDD
///    DDD
/// ```
///
/// Cells outside the net are blank and no move ever touches them.
/// Easy to read and write, but clunky when needing insights about corners and edges.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FaceletGrid {
	cells: GridData,
}

const fn solved_cells() -> GridData {
	let mut out = [[b' '; GRID_COLS]; GRID_ROWS];

	const_for!(r in 0..GRID_ROWS => {
		const_for!(c in 0..GRID_COLS => {
			if let Some(face) = Face::at(r, c) {
				out[r][c] = face.color().to_byte();
			}
		});
	});

	out
}

const T_SOLVED: GridData = solved_cells();

/// The four strips of three cells bordering each face.
/// On a clockwise turn strip i moves onto strip i+1, cell by cell.
type Strips = [[Coord; CUBE_DIM]; 4];

// Sorted like Move: F, B, R, L, U, D
#[rustfmt::skip]
const STRIPS: [Strips; NUM_SIDES] = [
	// front: up -> right -> down -> left
	[[(2, 3), (2, 4), (2, 5)], [(3, 6), (4, 6), (5, 6)], [(6, 5), (6, 4), (6, 3)], [(5, 2), (4, 2), (3, 2)]],
	// back: up -> left -> down -> right
	[[(0, 3), (0, 4), (0, 5)], [(5, 0), (4, 0), (3, 0)], [(8, 5), (8, 4), (8, 3)], [(3, 8), (4, 8), (5, 8)]],
	// right: up -> back -> down -> front
	[[(0, 5), (1, 5), (2, 5)], [(5, 9), (4, 9), (3, 9)], [(6, 5), (7, 5), (8, 5)], [(3, 5), (4, 5), (5, 5)]],
	// left: up -> front -> down -> back
	[[(0, 3), (1, 3), (2, 3)], [(3, 3), (4, 3), (5, 3)], [(6, 3), (7, 3), (8, 3)], [(5, 11), (4, 11), (3, 11)]],
	// up: front -> left -> back -> right
	[[(3, 3), (3, 4), (3, 5)], [(3, 0), (3, 1), (3, 2)], [(3, 9), (3, 10), (3, 11)], [(3, 6), (3, 7), (3, 8)]],
	// down: front -> right -> back -> left
	[[(5, 3), (5, 4), (5, 5)], [(5, 6), (5, 7), (5, 8)], [(5, 9), (5, 10), (5, 11)], [(5, 0), (5, 1), (5, 2)]],
];

// =========

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GridError {
	#[error("The cube description is empty")]
	Empty,
	#[error("Expected {} lines, found {0}", GRID_ROWS)]
	LineCount(usize),
	#[error("Line {line} has {len} characters, at most {} are allowed", GRID_COLS)]
	LineLength { line: usize, len: usize },
	#[error("Invalid character {found:?} at row {row}, column {col}")]
	InvalidCharacter { row: usize, col: usize, found: char },
	#[error("The cell at row {row}, column {col} is outside of the cube net but not blank")]
	OffNet { row: usize, col: usize },
	#[error("The facelet at row {row}, column {col} is blank")]
	MissingFacelet { row: usize, col: usize },
}

impl FromStr for FaceletGrid {
	type Err = GridError;

	/// Parse the 9 line text form. Short lines are padded with blanks.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut lines: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();
		while lines.last().is_some_and(|l| l.trim().is_empty()) {
			lines.pop();
		}

		if lines.is_empty() {
			return Err(GridError::Empty);
		}
		if lines.len() != GRID_ROWS {
			return Err(GridError::LineCount(lines.len()));
		}

		let mut cells = [[b' '; GRID_COLS]; GRID_ROWS];

		for (row, line) in lines.into_iter().enumerate() {
			let len = line.chars().count();
			if len > GRID_COLS {
				return Err(GridError::LineLength { line: row, len });
			}

			for (col, found) in line.chars().enumerate() {
				if found == ' ' {
					continue;
				}
				let color = u8::try_from(found)
					.ok()
					.and_then(Color::from_byte)
					.ok_or(GridError::InvalidCharacter { row, col, found })?;
				if Face::at(row, col).is_none() {
					return Err(GridError::OffNet { row, col });
				}
				cells[row][col] = color.to_byte();
			}
		}

		// Every sticker of the net has to be there
		for (row, line) in cells.iter().enumerate() {
			for (col, cell) in line.iter().enumerate() {
				if *cell == b' ' && Face::at(row, col).is_some() {
					return Err(GridError::MissingFacelet { row, col });
				}
			}
		}

		Ok(Self { cells })
	}
}

impl fmt::Display for FaceletGrid {
	/// The up and down rows only print the first 6 columns, the middle rows all 12.
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for (row, line) in self.cells.iter().enumerate() {
			let width = if (CUBE_DIM..2 * CUBE_DIM).contains(&row) {
				GRID_COLS
			} else {
				2 * CUBE_DIM
			};
			for cell in &line[..width] {
				write!(f, "{}", *cell as char)?;
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

impl RubiksCube for FaceletGrid {
	fn apply_move(&mut self, m: Move) {
		let bef = self.cells;

		// Rotate the face itself clockwise
		let (r0, c0) = m.face().origin();
		for r in 0..CUBE_DIM {
			for c in 0..CUBE_DIM {
				self.cells[r0 + r][c0 + c] = bef[r0 + CUBE_DIM - 1 - c][c0 + r];
			}
		}

		// Move the strips around it
		let strips = &STRIPS[m as usize];
		for (i, src) in strips.iter().enumerate() {
			let dst = &strips[(i + 1) % strips.len()];
			for (&(sr, sc), &(dr, dc)) in src.iter().zip(dst.iter()) {
				self.cells[dr][dc] = bef[sr][sc];
			}
		}
	}

	fn is_solved(&self) -> bool {
		self.cells == T_SOLVED
	}
}

impl Default for FaceletGrid {
	/// Creates a *solved* cube!
	fn default() -> Self {
		Self { cells: T_SOLVED }
	}
}

impl FaceletGrid {
	pub fn new() -> Self {
		Self::default()
	}

	/// The raw grid bytes, blanks included
	pub fn cells(&self) -> &GridData {
		&self.cells
	}

	/// The color at the given cell, None for blanks and cells outside the grid.
	pub fn get(&self, row: usize, col: usize) -> Option<Color> {
		self.cells
			.get(row)
			.and_then(|line| line.get(col))
			.and_then(|cell| Color::from_byte(*cell))
	}

	pub(crate) fn set(&mut self, (row, col): Coord, color: Color) {
		self.cells[row][col] = color.to_byte();
	}

	/// Number of non-blank facelets of the given face which don't show the face's color.
	pub fn misplaced(&self, face: Face) -> usize {
		let (r0, c0) = face.origin();
		let target = face.color().to_byte();

		self.cells[r0..r0 + CUBE_DIM]
			.iter()
			.flat_map(|line| line[c0..c0 + CUBE_DIM].iter())
			.filter(|cell| **cell != b' ' && **cell != target)
			.count()
	}

	/// Returns the corner at the position and it's orientation.
	/// The orientation is the index of the up/down sticker within the position's stickers:
	/// 0, if it's correctly in it's place
	/// 1, if it's rotated once in clockwise
	/// 2, if it's rotated once counterclockwise.
	pub fn get_corner_at_pos(&self, pos: Corner) -> Result<(Corner, Ori), CubeError> {
		let [a, b, c] = pos.facelets().map(|(r, c)| self.get(r, c));
		let (Some(a), Some(b), Some(c)) = (a, b, c) else {
			return Err(CubeError::Corner(pos));
		};
		let cols = [a, b, c];

		let corner = Corner::parse_corner(cols).ok_or(CubeError::Corner(pos))?;
		let ori = cols
			.iter()
			.position(|c| c.is_up_down())
			.ok_or(CubeError::Corner(pos))?;

		// The other two colors have to follow in the same cyclic order,
		// otherwise the corner is a mirror image.
		let home = corner.colors();
		for (j, col) in home.iter().enumerate() {
			if cols[(ori + j) % 3] != *col {
				return Err(CubeError::CornerOrder(pos));
			}
		}

		Ok((corner, ori as Ori))
	}

	/// Returns the edge at the position and it's orientation
	/// 0, if the primary color (up/down, or front/back for the middle layer) is on the primary sticker
	/// 1, if it's flipped.
	pub fn get_edge_at_pos(&self, pos: Edge) -> Result<(Edge, Ori), CubeError> {
		let [a, b] = pos.facelets().map(|(r, c)| self.get(r, c));
		let (Some(a), Some(b)) = (a, b) else {
			return Err(CubeError::Edge(pos));
		};

		let edge = Edge::parse_edge([a, b]).ok_or(CubeError::Edge(pos))?;
		let ori = a != edge.colors()[0];

		Ok((edge, ori as Ori))
	}

	/// Print the cube in the *standard output* with ANSI-colors
	pub fn print(&self) {
		for line in self.cells.iter() {
			for cell in line.iter() {
				match Color::from_byte(*cell) {
					Some(col) => print!("{}■ ", get_ansii_color(col)),
					None => print!("  "),
				}
			}
			println!();
		}
		// Reset ansii color
		println!("\x1b[00m");
	}
}

// ===== Tests =====

#[cfg(test)]
mod tests {
	use super::*;
	use strum::IntoEnumIterator;

	const SOLVED_TEXT: &str = "   OOO
   OOO
   OOO
GGGWWWBBBYYY
GGGWWWBBBYYY
GGGWWWBBBYYY
   RRR
   RRR
   RRR
";

	#[test]
	/// The text form parses into the solved grid and prints back unchanged
	fn text_round_trip() {
		let grid = FaceletGrid::from_str(SOLVED_TEXT).unwrap();
		assert_eq!(grid, FaceletGrid::new());
		assert!(grid.is_solved());
		assert_eq!(grid.to_string(), SOLVED_TEXT);

		// Windows line endings and trailing empty lines are fine
		let crlf = SOLVED_TEXT.replace('\n', "\r\n") + "\r\n";
		assert_eq!(FaceletGrid::from_str(&crlf).unwrap(), grid);

		// A scrambled grid survives printing and parsing
		let mut scrambled = FaceletGrid::new();
		scrambled.apply_sequence("RUFDLB").unwrap();
		assert_eq!(FaceletGrid::from_str(&scrambled.to_string()).unwrap(), scrambled);
	}

	#[test]
	fn malformed_text() {
		assert_eq!(FaceletGrid::from_str(""), Err(GridError::Empty));
		assert_eq!(FaceletGrid::from_str("\n\n"), Err(GridError::Empty));

		let missing_line: String = SOLVED_TEXT.lines().skip(1).map(|l| format!("{l}\n")).collect();
		assert_eq!(FaceletGrid::from_str(&missing_line), Err(GridError::LineCount(8)));

		let long = SOLVED_TEXT.replacen("GGGWWWBBBYYY", "GGGWWWBBBYYYY", 1);
		assert_eq!(
			FaceletGrid::from_str(&long),
			Err(GridError::LineLength { line: 3, len: 13 })
		);

		let invalid = SOLVED_TEXT.replacen("WWW", "WXW", 1);
		assert_eq!(
			FaceletGrid::from_str(&invalid),
			Err(GridError::InvalidCharacter { row: 3, col: 4, found: 'X' })
		);

		let off_net = SOLVED_TEXT.replacen("   OOO", "O  OOO", 1);
		assert_eq!(
			FaceletGrid::from_str(&off_net),
			Err(GridError::OffNet { row: 0, col: 0 })
		);

		let short = SOLVED_TEXT.replacen("   RRR\n", "   RR\n", 1);
		assert_eq!(
			FaceletGrid::from_str(&short),
			Err(GridError::MissingFacelet { row: 6, col: 5 })
		);
	}

	#[test]
	/// Four quarter turns result to the neutral element
	fn grid_turns_have_order_four() {
		let mut cube = FaceletGrid::new();
		cube.apply_sequence("LBRRUDFLLURDB").unwrap();
		let bef = cube.clone();

		for m in Move::iter() {
			for i in 0..4 {
				cube.apply_move(m);
				if i < 3 {
					assert_ne!(cube, bef, "Move {} is the identity", m);
				}
			}
			assert_eq!(cube, bef, "Move {} doesn't result to neutral after 4 turns", m);
		}
	}

	#[test]
	/// "F" followed by "FFF" restores every byte of the grid
	fn inverse_by_three_quarters() {
		let mut cube = FaceletGrid::new();
		cube.apply_sequence("F").unwrap();
		assert!(!cube.is_solved());
		cube.apply_sequence("FFF").unwrap();
		assert!(cube.is_solved());
		assert_eq!(cube.cells(), FaceletGrid::new().cells());
	}

	#[test]
	/// Moves never write outside of the net
	fn blanks_stay_blank() {
		let mut cube = FaceletGrid::new();
		cube.apply_sequence("FBRLUDFFRRUULLDDBB").unwrap();
		for (row, line) in cube.cells().iter().enumerate() {
			for (col, cell) in line.iter().enumerate() {
				assert_eq!(*cell == b' ', Face::at(row, col).is_none());
			}
		}
	}

	#[test]
	fn misplaced_facelets() {
		let solved = FaceletGrid::new();
		assert!(Face::iter().all(|f| solved.misplaced(f) == 0));

		let mut cube = FaceletGrid::new();
		cube.apply_move(Move::F);
		assert_eq!(cube.misplaced(Face::Front), 0);
		assert_eq!(cube.misplaced(Face::Back), 0);
		for face in [Face::Up, Face::Right, Face::Down, Face::Left] {
			assert_eq!(cube.misplaced(face), 3);
		}

		let mut cube = FaceletGrid::new();
		cube.apply_move(Move::U);
		assert_eq!(cube.misplaced(Face::Up), 0);
		assert_eq!(cube.misplaced(Face::Front), 3);
		assert_eq!(cube.misplaced(Face::Down), 0);
	}

	#[test]
	/// Test for corner and edge parsing
	fn corner_edge_checking() {
		let mut cube = FaceletGrid::new();

		for edge in Edge::iter() {
			assert_eq!(cube.get_edge_at_pos(edge), Ok((edge, 0)));
		}
		for corner in Corner::iter() {
			assert_eq!(cube.get_corner_at_pos(corner), Ok((corner, 0)));
		}

		cube.apply_move(Move::F);

		// A front quarter flips all four front edges
		let flips: Ori = Edge::iter().map(|e| cube.get_edge_at_pos(e).unwrap().1).sum();
		assert_eq!(flips, 4);
		assert_eq!(cube.get_edge_at_pos(Edge::FR), Ok((Edge::UF, 1)));

		// ...and twists the four front corners
		assert_eq!(cube.get_corner_at_pos(Corner::UFR), Ok((Corner::UFL, 1)));
		assert_eq!(cube.get_corner_at_pos(Corner::UFL), Ok((Corner::DFL, 2)));
		assert_eq!(cube.get_corner_at_pos(Corner::UBR), Ok((Corner::UBR, 0)));
	}

	#[test]
	/// Mirrored corners and impossible color combinations are rejected
	fn broken_pieces() {
		let mut cube = FaceletGrid::new();
		// Swap the front and left sticker of the UFL corner
		cube.set((3, 3), Color::G);
		cube.set((3, 2), Color::W);
		assert_eq!(
			cube.get_corner_at_pos(Corner::UFL),
			Err(CubeError::CornerOrder(Corner::UFL))
		);

		let mut cube = FaceletGrid::new();
		cube.set((3, 4), Color::R);
		assert_eq!(cube.get_edge_at_pos(Edge::UF), Err(CubeError::Edge(Edge::UF)));

		let mut cube = FaceletGrid::new();
		cube.set((0, 3), Color::R);
		assert_eq!(cube.get_corner_at_pos(Corner::UBL), Err(CubeError::Corner(Corner::UBL)));
	}
}
