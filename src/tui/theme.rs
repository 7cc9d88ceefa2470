use ratatui::style::Color;

use crate::model::{Status, ThemeMode, UiConfig};
use crate::view::{DropTarget, Quadrant};

/// Resolved color palette for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub blue: Color,
    pub selection_bg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            surface: Color::Rgb(0x1A, 0x0D, 0x2E),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            blue: Color::Rgb(0x44, 0x88, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
        }
    }

    pub fn light() -> Self {
        Theme {
            background: Color::Rgb(0xF7, 0xF5, 0xFF),
            surface: Color::Rgb(0xEC, 0xE8, 0xFA),
            text: Color::Rgb(0x3A, 0x33, 0x6B),
            text_bright: Color::Rgb(0x12, 0x0A, 0x2A),
            highlight: Color::Rgb(0xC8, 0x1D, 0x6E),
            dim: Color::Rgb(0x8A, 0x85, 0xB0),
            red: Color::Rgb(0xC6, 0x28, 0x28),
            yellow: Color::Rgb(0xA8, 0x6B, 0x00),
            green: Color::Rgb(0x1E, 0x8E, 0x4E),
            cyan: Color::Rgb(0x00, 0x83, 0x9E),
            blue: Color::Rgb(0x28, 0x5C, 0xC8),
            selection_bg: Color::Rgb(0xF3, 0xD3, 0xE6),
        }
    }

    /// Palette for `mode` with `[ui.colors]` overrides applied
    pub fn new(mode: ThemeMode, ui: &UiConfig) -> Self {
        let mut theme = match mode {
            ThemeMode::Dark => Theme::dark(),
            ThemeMode::Light => Theme::light(),
        };
        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "surface" => theme.surface = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "cyan" => theme.cyan = color,
                "blue" => theme.blue = color,
                "selection_bg" => theme.selection_bg = color,
                _ => {}
            }
        }
        theme
    }

    /// Accent used for a list's title and border
    pub fn list_color(&self, target: DropTarget) -> Color {
        match target {
            DropTarget::Column(Status::Backlog) => self.dim,
            DropTarget::Column(Status::Todo) => self.cyan,
            DropTarget::Column(Status::InProgress) => self.yellow,
            DropTarget::Column(Status::Done) => self.green,
            DropTarget::Quadrant(Quadrant::UrgentImportant) => self.red,
            DropTarget::Quadrant(Quadrant::NotUrgentImportant) => self.blue,
            DropTarget::Quadrant(Quadrant::UrgentNotImportant) => self.yellow,
            DropTarget::Quadrant(Quadrant::NotUrgentNotImportant) => self.dim,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
