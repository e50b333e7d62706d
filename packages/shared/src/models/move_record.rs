use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessMovePayload {
    pub from: [usize; 2],
    pub to: [usize; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuMovePayload {
    pub row: usize,
    pub col: usize,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovePayload {
    Chess(ChessMovePayload),
    Sudoku(SudokuMovePayload),
}

/// Append-only audit entry for one submitted move. Never mutated or deleted
/// once written; `move_number` is gap-free and strictly increasing per game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub game_id: String,
    pub player_id: String,
    pub move_number: u64,
    pub payload: MovePayload,
    pub created_at: DateTime<Utc>,
}

impl MoveRecord {
    pub fn new(game_id: &str, player_id: &str, move_number: u64, payload: MovePayload) -> Self {
        MoveRecord {
            game_id: game_id.to_string(),
            player_id: player_id.to_string(),
            move_number,
            payload,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chess_payload_deserializes_untagged() {
        let payload: MovePayload = serde_json::from_str("{\"from\":[6,4],\"to\":[4,4]}").unwrap();

        assert_eq!(
            payload,
            MovePayload::Chess(ChessMovePayload {
                from: [6, 4],
                to: [4, 4],
            })
        );
    }

    #[test]
    fn test_sudoku_payload_deserializes_untagged() {
        let payload: MovePayload =
            serde_json::from_str("{\"row\":2,\"col\":7,\"value\":5}").unwrap();

        assert_eq!(
            payload,
            MovePayload::Sudoku(SudokuMovePayload {
                row: 2,
                col: 7,
                value: 5,
            })
        );
    }

    #[test]
    fn test_move_record_round_trip() {
        let record = MoveRecord::new(
            "game-1",
            "player-1",
            3,
            MovePayload::Sudoku(SudokuMovePayload {
                row: 0,
                col: 0,
                value: 9,
            }),
        );

        let serialized = serde_json::to_string(&record).unwrap();
        let deserialized: MoveRecord = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.game_id, "game-1");
        assert_eq!(deserialized.move_number, 3);
        assert_eq!(deserialized.payload, record.payload);
    }
}
