use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }
}

pub type Board = [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveHistoryEntry {
    pub from: [usize; 2],
    pub to: [usize; 2],
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub timestamp: DateTime<Utc>,
}

/// Pieces each side has taken from the other.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapturedPieces {
    pub white: Vec<Piece>,
    pub black: Vec<Piece>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChessState {
    pub board: Board,
    pub side_to_move: Side,
    pub move_history: Vec<MoveHistoryEntry>,
    pub captured_pieces: CapturedPieces,
    pub in_check: bool,
    pub is_game_over: bool,
    pub winner: Option<Side>,
}

impl ChessState {
    /// Standard starting position. Black occupies rows 0-1, White rows 6-7,
    /// and White moves toward row 0.
    pub fn new() -> Self {
        let mut board: Board = [[None; BOARD_SIZE]; BOARD_SIZE];
        board[0] = back_rank(Side::Black);
        board[1] = pawn_rank(Side::Black);
        board[6] = pawn_rank(Side::White);
        board[7] = back_rank(Side::White);
        ChessState {
            board,
            side_to_move: Side::White,
            move_history: vec![],
            captured_pieces: CapturedPieces::default(),
            in_check: false,
            is_game_over: false,
            winner: None,
        }
    }
}

impl Default for ChessState {
    fn default() -> Self {
        Self::new()
    }
}

fn back_rank(side: Side) -> [Option<Piece>; BOARD_SIZE] {
    use PieceKind::*;
    [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook].map(|kind| Some(Piece { kind, side }))
}

fn pawn_rank(side: Side) -> [Option<Piece>; BOARD_SIZE] {
    [Some(Piece::new(PieceKind::Pawn, side)); BOARD_SIZE]
}
