//! Styling constants and theme configuration

use iced::Color;

// Board colors
pub const LIGHT_SQUARE: Color = Color::from_rgb(0.94, 0.85, 0.71); // Wheat
pub const DARK_SQUARE: Color = Color::from_rgb(0.71, 0.53, 0.39); // Sienna
pub const SELECTED_SQUARE: Color = Color::from_rgb(0.68, 0.85, 0.37); // Yellow-green
pub const LAST_MOVE_SQUARE: Color = Color::from_rgba(0.9, 0.9, 0.0, 0.4); // Yellow overlay

// Notice colors by severity
pub const NOTICE_SUCCESS: Color = Color::from_rgb(0.45, 0.85, 0.45);
pub const NOTICE_INFO: Color = Color::from_rgb(0.55, 0.75, 0.95);
pub const NOTICE_ERROR: Color = Color::from_rgb(0.95, 0.45, 0.45);

// Dimensions
pub const SQUARE_SIZE: f32 = 70.0;
pub const PANEL_WIDTH: f32 = 340.0;
