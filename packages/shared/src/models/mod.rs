pub mod auth;
pub mod chess;
pub mod game;
pub mod move_record;
pub mod requests;
pub mod responses;
pub mod stats;
pub mod sudoku;
pub mod user;
