/// Side panel geometry.
pub const PANEL_OPEN_WIDTH: f32 = 320.0;
pub const PANEL_CLOSED_WIDTH: f32 = 32.0;

/// Text sizes used across the panel.
pub const TITLE_FONT_SIZE: f32 = 18.0;
pub const TAB_FONT_SIZE: f32 = 15.0;
pub const ROW_FONT_SIZE: f32 = 14.0;
pub const HINT_FONT_SIZE: f32 = 12.0;

pub const CHECKBOX_SIZE: f32 = 16.0;
pub const ROW_HEIGHT: f32 = 26.0;
