//! Color palette and preset styles for the prediction screen.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::ConfidenceTier;

pub struct CardioTheme;

impl CardioTheme {
    // === Brand ===

    /// Crimson, the accent for focus and primary actions
    pub const ACCENT: Color = Color::Rgb(225, 29, 72); // #E11D48
    pub const ACCENT_SOFT: Color = Color::Rgb(251, 113, 133); // #FB7185
    pub const ACCENT_DEEP: Color = Color::Rgb(159, 18, 57); // #9F1239

    // === Tiers ===

    pub const TIER_HIGH: Color = Color::Rgb(239, 68, 68); // #EF4444
    pub const TIER_MEDIUM: Color = Color::Rgb(245, 158, 11); // #F59E0B
    pub const TIER_LOW: Color = Color::Rgb(34, 197, 94); // #22C55E

    // === Surfaces and text ===

    pub const SURFACE: Color = Color::Rgb(24, 24, 27); // #18181B
    pub const TRACK: Color = Color::Rgb(63, 63, 70); // #3F3F46
    pub const OUTLINE: Color = Color::Rgb(113, 113, 122); // #71717A
    pub const TEXT: Color = Color::Rgb(244, 244, 245); // #F4F4F5
    pub const TEXT_DIM: Color = Color::Rgb(161, 161, 170); // #A1A1AA
    pub const TEXT_FAINT: Color = Color::Rgb(113, 113, 122); // #71717A
    pub const INVALID: Color = Color::Rgb(248, 113, 113); // #F87171

    #[must_use]
    pub fn title() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    #[must_use]
    pub fn text_dim() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    /// Placeholder hints and disabled captions
    #[must_use]
    pub fn text_faint() -> Style {
        Style::default().fg(Self::TEXT_FAINT)
    }

    #[must_use]
    pub fn invalid() -> Style {
        Style::default().fg(Self::INVALID)
    }

    #[must_use]
    pub fn invalid_border() -> Style {
        Style::default()
            .fg(Self::INVALID)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn outline() -> Style {
        Style::default().fg(Self::OUTLINE)
    }

    #[must_use]
    pub fn outline_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    #[must_use]
    pub fn label_focused() -> Style {
        Style::default()
            .fg(Self::ACCENT_SOFT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::ACCENT_SOFT)
    }

    /// Enabled button
    #[must_use]
    pub fn button() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::ACCENT_DEEP)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn button_disabled() -> Style {
        Style::default().fg(Self::TEXT_FAINT).bg(Self::TRACK)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT_SOFT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    #[must_use]
    pub fn tier_color(tier: ConfidenceTier) -> Color {
        match tier {
            ConfidenceTier::High => Self::TIER_HIGH,
            ConfidenceTier::Medium => Self::TIER_MEDIUM,
            ConfidenceTier::Low => Self::TIER_LOW,
        }
    }

    #[must_use]
    pub fn tier(tier: ConfidenceTier) -> Style {
        Style::default()
            .fg(Self::tier_color(tier))
            .add_modifier(Modifier::BOLD)
    }

    /// Confidence bar: tier color on the track
    #[must_use]
    pub fn bar(tier: ConfidenceTier) -> Style {
        Style::default().fg(Self::tier_color(tier)).bg(Self::TRACK)
    }

    /// Blend a particle color towards the surface as it fades out.
    #[must_use]
    pub fn particle(color: (u8, u8, u8), opacity: f64) -> Color {
        let Color::Rgb(sr, sg, sb) = Self::SURFACE else {
            return Color::Rgb(color.0, color.1, color.2);
        };
        let a = opacity.clamp(0.0, 1.0);
        let mix = |fg: u8, base: u8| (f64::from(fg) * a + f64::from(base) * (1.0 - a)).round() as u8;
        Color::Rgb(mix(color.0, sr), mix(color.1, sg), mix(color.2, sb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_fades_to_surface() {
        assert_eq!(CardioTheme::particle((255, 0, 0), 1.0), Color::Rgb(255, 0, 0));
        assert_eq!(CardioTheme::particle((255, 0, 0), 0.0), CardioTheme::SURFACE);
    }

    #[test]
    fn test_tier_colors_differ() {
        assert_ne!(
            CardioTheme::tier_color(ConfidenceTier::High),
            CardioTheme::tier_color(ConfidenceTier::Low)
        );
    }
}
