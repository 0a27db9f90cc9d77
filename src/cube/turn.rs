use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Face;

/// Total number of moves
pub const NUM_MOVES: usize = 6;

/// A clockwise quarter turn of one face.
///
/// Counterclockwise and half turns are not part of the move set,
/// they are written as three or two quarter turns.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter, strum::EnumCount)]
#[derive(Serialize, Deserialize)]
#[repr(u8)]
pub enum Move {
	F,
	B,
	R,
	L,
	U,
	D,
}

impl Move {
	/// All moves in search order
	pub const ALL: [Move; NUM_MOVES] = [Move::F, Move::B, Move::R, Move::L, Move::U, Move::D];

	/// The face turned by this move
	pub const fn face(self) -> Face {
		match self {
			Move::F => Face::Front,
			Move::B => Face::Back,
			Move::R => Face::Right,
			Move::L => Face::Left,
			Move::U => Face::Up,
			Move::D => Face::Down,
		}
	}

	/// The move turning the opposite face. Both commute.
	pub const fn opposite(self) -> Move {
		match self {
			Move::F => Move::B,
			Move::B => Move::F,
			Move::R => Move::L,
			Move::L => Move::R,
			Move::U => Move::D,
			Move::D => Move::U,
		}
	}

	/// Whether this move comes first in its commuting pair
	const fn leads_pair(self) -> bool {
		matches!(self, Move::F | Move::R | Move::U)
	}

	/// Whether this move may directly follow `prev`, which has just been
	/// applied `run` times in a row.
	///
	/// Opposite faces commute, so of "FB" and "BF" only the first is kept.
	/// Four equal quarter turns are the identity and are never searched.
	pub const fn may_follow(self, prev: Move, run: usize) -> bool {
		if self as u8 == prev as u8 {
			return run < 3;
		}
		!(prev.opposite() as u8 == self as u8 && self.leads_pair())
	}

	pub const fn from_char(c: char) -> Option<Move> {
		match c {
			'F' => Some(Move::F),
			'B' => Some(Move::B),
			'R' => Some(Move::R),
			'L' => Some(Move::L),
			'U' => Some(Move::U),
			'D' => Some(Move::D),
			_ => None,
		}
	}

	pub const fn to_char(self) -> char {
		match self {
			Move::F => 'F',
			Move::B => 'B',
			Move::R => 'R',
			Move::L => 'L',
			Move::U => 'U',
			Move::D => 'D',
		}
	}
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseMoveError {
	#[error("Invalid move '{found}' at position {index}, expected one of F, B, R, L, U, D")]
	InvalidMove { index: usize, found: char },
}

/// Parse a move string like "RUF". Whitespace is skipped.
pub fn parse_moves(string: &str) -> Result<Vec<Move>, ParseMoveError> {
	string
		.chars()
		.enumerate()
		.filter(|(_, c)| !c.is_whitespace())
		.map(|(index, found)| Move::from_char(found).ok_or(ParseMoveError::InvalidMove { index, found }))
		.collect()
}

/// Write the moves in their compact string form
pub fn format_moves(moves: &[Move]) -> String {
	moves.iter().map(|m| m.to_char()).collect()
}

/// Generate a random sequence of `len` moves
pub fn random_sequence<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<Move> {
	(0..len)
		.map(|_| Move::ALL[rng.gen_range(0..NUM_MOVES)])
		.collect()
}
