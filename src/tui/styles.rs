//! Color palette and preset styles.
//!
//! Tier and category colors come from the domain as hex strings and are
//! converted here; everything else uses the fixed palette.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskTier;

/// Application color palette.
pub struct AirTheme;

impl AirTheme {
    // === Primary Colors ===

    /// Sky blue, primary accent
    pub const PRIMARY: Color = Color::Rgb(14, 165, 233); // #0EA5E9

    /// Lighter sky for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(125, 211, 252); // #7DD3FC

    /// Darker sky for the header bar
    pub const PRIMARY_DARK: Color = Color::Rgb(3, 105, 161); // #0369A1

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    pub const SUCCESS: Color = Color::Rgb(56, 142, 60); // #388E3C
    pub const WARNING: Color = Color::Rgb(245, 124, 0); // #F57C00
    pub const DANGER: Color = Color::Rgb(211, 47, 47); // #D32F2F

    // === Background / Text ===

    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Selected tab or list row
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for a risk tier when no assessment color is at hand
    #[must_use]
    pub fn risk_tier(tier: RiskTier) -> Style {
        match tier {
            RiskTier::Low => Self::success(),
            RiskTier::Moderate => Self::warning(),
            RiskTier::High => Self::danger(),
        }
    }

    /// Bold foreground in the given hex color.
    #[must_use]
    pub fn hex_fg(hex: &str) -> Style {
        Style::default()
            .fg(hex_color(hex).unwrap_or(Self::TEXT_PRIMARY))
            .add_modifier(Modifier::BOLD)
    }
}

/// Parse `#rgb` or `#rrggbb`.
#[must_use]
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match digits.len() {
        3 => {
            let mut it = digits.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(Color::Rgb(it.next()??, it.next()??, it.next()??))
        }
        6 => Some(Color::Rgb(
            channel(digits.get(0..2)?)?,
            channel(digits.get(2..4)?)?,
            channel(digits.get(4..6)?)?,
        )),
        _ => None,
    }
}

/// Small inline logo
pub const LOGO_SMALL: &str = "Airsense";
