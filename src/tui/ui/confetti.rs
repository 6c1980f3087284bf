//! Particle overlay drawn on top of the whole screen.

use ratatui::{layout::Rect, Frame};

use crate::application::ParticleFrame;
use crate::tui::styles::CardioTheme;

/// Approximate width of one terminal cell in pixels, used to turn drift
/// into columns.
const CELL_WIDTH_PX: f64 = 8.0;

/// Cell a particle lands on within `area`, if any.
#[must_use]
pub fn particle_cell(particle: &ParticleFrame, area: Rect) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let col = f64::from(area.width) * particle.x_pct / 100.0 + particle.drift_px / CELL_WIDTH_PX;
    let row = f64::from(area.height) * particle.y_pct / 100.0;
    if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
        return None;
    }

    let (col, row) = (col.floor() as u16, row.floor() as u16);
    if col >= area.width || row >= area.height {
        return None;
    }
    Some((area.x + col, area.y + row))
}

/// Whether a square particle currently sits tilted towards a diamond.
fn is_tilted(rotation_deg: f64) -> bool {
    let phase = rotation_deg.rem_euclid(90.0);
    (22.5..67.5).contains(&phase)
}

fn particle_symbol(particle: &ParticleFrame) -> &'static str {
    let large = particle.size_px >= 9.0;
    if particle.round {
        return if large { "●" } else { "•" };
    }
    match (is_tilted(particle.rotation_deg), large) {
        (true, true) => "◆",
        (true, false) => "⬩",
        (false, true) => "■",
        (false, false) => "▪",
    }
}

pub fn render_confetti<I>(f: &mut Frame, area: Rect, particles: I)
where
    I: IntoIterator<Item = ParticleFrame>,
{
    let buffer = f.buffer_mut();
    for particle in particles {
        if particle.opacity <= 0.0 {
            continue;
        }
        let Some(position) = particle_cell(&particle, area) else {
            continue;
        };
        if let Some(cell) = buffer.cell_mut(position) {
            cell.set_symbol(particle_symbol(&particle))
                .set_fg(CardioTheme::particle(particle.color, particle.opacity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(x_pct: f64, y_pct: f64, drift_px: f64) -> ParticleFrame {
        ParticleFrame {
            x_pct,
            y_pct,
            drift_px,
            size_px: 10.0,
            color: (255, 0, 0),
            round: true,
            rotation_deg: 0.0,
            opacity: 1.0,
        }
    }

    #[test]
    fn test_particle_cell_maps_percentages() {
        let area = Rect::new(2, 1, 100, 50);
        assert_eq!(particle_cell(&particle(50.0, 10.0, 0.0), area), Some((52, 6)));
        assert_eq!(particle_cell(&particle(50.0, 10.0, 80.0), area), Some((62, 6)));
    }

    #[test]
    fn test_particle_cell_clips_outside() {
        let area = Rect::new(0, 0, 40, 20);
        assert_eq!(particle_cell(&particle(0.0, 10.0, -100.0), area), None);
        assert_eq!(particle_cell(&particle(100.0, 10.0, 0.0), area), None);
        assert_eq!(particle_cell(&particle(50.0, f64::NAN, 0.0), area), None);
        assert_eq!(particle_cell(&particle(50.0, 50.0, 0.0), Rect::new(0, 0, 0, 0)), None);
    }

    #[test]
    fn test_symbols_by_shape_and_size() {
        let mut p = particle(0.0, 0.0, 0.0);
        assert_eq!(particle_symbol(&p), "●");
        p.round = false;
        p.size_px = 6.0;
        assert_eq!(particle_symbol(&p), "▪");
    }

    #[test]
    fn test_square_symbol_follows_rotation() {
        let mut p = particle(0.0, 0.0, 0.0);
        p.round = false;
        p.rotation_deg = 45.0;
        assert_eq!(particle_symbol(&p), "◆");
        p.rotation_deg = -45.0;
        assert_eq!(particle_symbol(&p), "◆");
        p.rotation_deg = 90.0;
        assert_eq!(particle_symbol(&p), "■");
        p.size_px = 6.0;
        p.rotation_deg = 400.0;
        assert_eq!(particle_symbol(&p), "⬩");
    }
}
