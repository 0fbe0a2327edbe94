//! Chessly GUI application
//!
//! A graphical interface for:
//! - Playing chess with click-to-move input
//! - Reviewing move history and captured pieces
//! - Undoing moves and resuming a saved session

mod app;
mod board;
mod styles;

use app::ChesslyApp;
use iced::application;

fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    application("Chessly", ChesslyApp::update, ChesslyApp::view)
        .theme(ChesslyApp::theme)
        .window_size((1150.0, 820.0))
        .run_with(ChesslyApp::new)
}
