//! Chess board widget rendering

use chessly_core::{piece_glyph, square_at, Session};
use iced::widget::{button, column, container, row, text};
use iced::{Color, Element, Length};

use crate::styles::{self, SQUARE_SIZE};

/// Message type for board interactions
#[derive(Debug, Clone)]
pub enum BoardMessage {
    SquareClicked(usize, usize),
}

/// Renders the chess board
pub struct BoardView<'a> {
    session: &'a Session,
    flipped: bool,
}

impl<'a> BoardView<'a> {
    pub fn new(session: &'a Session, flipped: bool) -> Self {
        Self { session, flipped }
    }

    /// Create the board view element
    pub fn view(&self) -> Element<'a, BoardMessage> {
        let mut board_column = column![].spacing(0);

        for display_row in 0..8 {
            let row_idx = if self.flipped { 7 - display_row } else { display_row };
            let mut rank_row = row![].spacing(0);

            for display_col in 0..8 {
                let col_idx = if self.flipped { 7 - display_col } else { display_col };
                rank_row = rank_row.push(self.render_square(row_idx, col_idx));
            }

            board_column = board_column.push(rank_row);
        }

        container(board_column)
            .style(|_theme| container::Style {
                border: iced::Border {
                    color: Color::from_rgb(0.3, 0.3, 0.3),
                    width: 2.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    /// Render a single square
    fn render_square(&self, row: usize, col: usize) -> Element<'a, BoardMessage> {
        let square = square_at(row, col);
        let is_light = (row + col) % 2 == 0;
        let mut bg_color = if is_light {
            styles::LIGHT_SQUARE
        } else {
            styles::DARK_SQUARE
        };

        // Highlight selected square
        if self.session.selection().armed() == Some(square) {
            bg_color = styles::SELECTED_SQUARE;
        }

        // Highlight last move
        if let Some((from, to)) = self.session.last_move() {
            if square == from || square == to {
                bg_color = blend_colors(bg_color, styles::LAST_MOVE_SQUARE);
            }
        }

        let piece_text = self
            .session
            .grid()
            .piece(row, col)
            .map(|(piece, side)| piece_glyph(piece, side));

        let content: Element<'a, BoardMessage> = if let Some(glyph) = piece_text {
            text(glyph.to_string()).size(SQUARE_SIZE * 0.75).center().into()
        } else {
            text("").into()
        };

        button(
            container(content)
                .width(SQUARE_SIZE)
                .height(SQUARE_SIZE)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .width(SQUARE_SIZE)
        .height(SQUARE_SIZE)
        .style(move |_theme, status| {
            let hover_overlay = match status {
                button::Status::Hovered => 0.1,
                button::Status::Pressed => 0.2,
                _ => 0.0,
            };
            button::Style {
                background: Some(iced::Background::Color(if hover_overlay > 0.0 {
                    blend_colors(bg_color, Color::from_rgba(1.0, 1.0, 1.0, hover_overlay))
                } else {
                    bg_color
                })),
                border: iced::Border::default(),
                text_color: Color::BLACK,
                ..Default::default()
            }
        })
        .on_press(BoardMessage::SquareClicked(row, col))
        .into()
    }
}

/// Blend two colors together
fn blend_colors(base: Color, overlay: Color) -> Color {
    let alpha = overlay.a;
    Color::from_rgb(
        base.r * (1.0 - alpha) + overlay.r * alpha,
        base.g * (1.0 - alpha) + overlay.g * alpha,
        base.b * (1.0 - alpha) + overlay.b * alpha,
    )
}
