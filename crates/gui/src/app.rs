//! Main application state and logic

use chessly_core::{side_name, Color as Side, FileStore, Notice, Session, Severity};
use iced::widget::{
    button, column, container, horizontal_rule, row, scrollable, text, vertical_space,
};
use iced::{Element, Length, Task, Theme};

use crate::board::{BoardMessage, BoardView};
use crate::styles::{self, PANEL_WIDTH};

/// Main application state
pub struct ChesslyApp {
    /// The game session (position, ledger, selection, persistence)
    session: Session,
    /// Board flipped?
    board_flipped: bool,
    /// Most recent notice, shown in the side panel
    notice: Option<Notice>,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Board interaction
    Board(BoardMessage),

    // Game controls
    NewGame,
    UndoMove,
    FlipBoard,
}

impl ChesslyApp {
    pub fn new() -> (Self, Task<Message>) {
        let session = Session::load(Box::new(FileStore::from_env()));
        (
            Self {
                session,
                board_flipped: false,
                notice: None,
            },
            Task::none(),
        )
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Board(BoardMessage::SquareClicked(row, col)) => {
                if let Some(notice) = self.session.click(row, col) {
                    self.notice = Some(notice);
                }
            }

            Message::NewGame => {
                self.session.restart();
                self.notice = None;
            }

            Message::UndoMove => {
                self.notice = Some(self.session.undo_last());
            }

            Message::FlipBoard => {
                self.board_flipped = !self.board_flipped;
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let board = BoardView::new(&self.session, self.board_flipped)
            .view()
            .map(Message::Board);

        let panel = self.control_panel();

        row![
            board,
            container(panel)
                .width(PANEL_WIDTH)
                .height(Length::Fill)
                .padding(15),
        ]
        .spacing(20)
        .padding(20)
        .into()
    }

    /// Render the control panel
    fn control_panel(&self) -> Element<'_, Message> {
        let new_game_btn = button(text("New Game"))
            .on_press(Message::NewGame)
            .style(button::primary)
            .width(Length::Fill);

        let undo_btn = button(text("Undo Last Move"))
            .on_press(Message::UndoMove)
            .style(button::secondary)
            .width(Length::Fill);

        let flip_btn = button(text("Flip Board"))
            .on_press(Message::FlipBoard)
            .style(button::secondary)
            .width(Length::Fill);

        let turn_text = text(format!(
            "Current Turn: {}",
            side_name(self.session.side_to_move())
        ))
        .size(16);

        let notice_text: Element<'_, Message> = match &self.notice {
            Some(notice) => text(notice.text.clone())
                .size(14)
                .color(notice_color(notice))
                .into(),
            None => text("").size(14).into(),
        };

        let captured_title = text("Captured Pieces").size(16);
        let captured_white = text(format!(
            "By White: {}",
            roster_line(self.session.ledger().captured_by(Side::White))
        ))
        .size(14);
        let captured_black = text(format!(
            "By Black: {}",
            roster_line(self.session.ledger().captured_by(Side::Black))
        ))
        .size(14);

        // Move history
        let moves_title = text("Move History").size(16);
        let mut moves_list = column![].spacing(2);
        for (i, record) in self.session.ledger().records().iter().enumerate() {
            moves_list = moves_list.push(text(format!("{}. {}", i + 1, record.text)).size(13));
        }
        let moves_scroll = scrollable(moves_list).height(Length::Fill);

        column![
            new_game_btn,
            undo_btn,
            flip_btn,
            vertical_space().height(20),
            turn_text,
            notice_text,
            vertical_space().height(10),
            horizontal_rule(1),
            vertical_space().height(10),
            captured_title,
            captured_white,
            captured_black,
            vertical_space().height(10),
            horizontal_rule(1),
            vertical_space().height(10),
            moves_title,
            moves_scroll,
        ]
        .spacing(5)
        .into()
    }
}

fn notice_color(notice: &Notice) -> iced::Color {
    match notice.severity {
        Severity::Success => styles::NOTICE_SUCCESS,
        Severity::Info => styles::NOTICE_INFO,
        Severity::Error => styles::NOTICE_ERROR,
    }
}

fn roster_line(glyphs: &[char]) -> String {
    let mut line = String::new();
    for &glyph in glyphs {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push(glyph);
    }
    line
}
