//! Colour palette and style helpers
//!
//! Warm "movie night" palette on a near-black background.

use ratatui::style::{Color, Modifier, Style};

/// PopcornTUI colour palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #121016 (projector-room black)
    pub const BACKGROUND: Color = Color::Rgb(0x12, 0x10, 0x16);

    /// Primary: #ffd43b (butter yellow)
    pub const PRIMARY: Color = Color::Rgb(0xff, 0xd4, 0x3b);

    /// Secondary: #ff8787 (soft red)
    pub const SECONDARY: Color = Color::Rgb(0xff, 0x87, 0x87);

    /// Accent: #74c0fc (screen blue)
    pub const ACCENT: Color = Color::Rgb(0x74, 0xc0, 0xfc);

    /// Text: #dee2e6
    pub const TEXT: Color = Color::Rgb(0xde, 0xe2, 0xe6);

    /// Dim: #868e96
    pub const DIM: Color = Color::Rgb(0x86, 0x8e, 0x96);

    /// Error: #fa5252
    pub const ERROR: Color = Color::Rgb(0xfa, 0x52, 0x52);

    /// Border: #495057
    pub const BORDER: Color = Color::Rgb(0x49, 0x50, 0x57);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Highlighted list row (inverted with primary color)
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn rating() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn keybind() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::DIM).bg(Self::BACKGROUND)
    }
}
