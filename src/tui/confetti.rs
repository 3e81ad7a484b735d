//! Confetti burst drawn over the board after a win.
//!
//! Particles live in a virtual pixel space (8x16 px per terminal cell) and
//! advance at a fixed 60 steps per second regardless of the frame rate. The
//! effect reads no game state.

use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Color};
use std::time::Duration;
use tracing::debug;

/// Particles per burst.
pub const PARTICLE_COUNT: usize = 150;

/// How long a burst stays on screen.
pub const BURST_LENGTH: Duration = Duration::from_secs(3);

const STEP: Duration = Duration::from_micros(16_667);
const CELL_WIDTH_PX: f64 = 8.0;
const CELL_HEIGHT_PX: f64 = 16.0;

/// A single confetti strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    x: f64,
    y: f64,
    r: f64,
    d: f64,
    hue: f64,
    tilt: f64,
    tilt_angle: f64,
    tilt_angle_increment: f64,
}

impl Particle {
    /// Spawns a particle somewhere in the band just above a `width` x `height` px view.
    fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64) -> Self {
        Self {
            x: rng.gen_range(0.0..width.max(1.0)),
            y: rng.gen_range(0.0..height.max(1.0)) - height,
            r: rng.gen_range(4.0..10.0),
            d: rng.gen_range(10.0..30.0),
            hue: rng.gen_range(0.0..360.0),
            tilt: rng.gen_range(-10.0..0.0),
            tilt_angle: 0.0,
            tilt_angle_increment: rng.gen_range(0.05..0.12),
        }
    }

    fn step(&mut self) {
        self.tilt_angle += self.tilt_angle_increment;
        self.y += (self.d.cos() + 3.0 + self.r / 2.0) / 2.0;
        self.tilt = self.tilt_angle.sin() * 15.0;
    }

    /// Terminal cell (column, row) the particle currently covers.
    fn cell(&self) -> (f64, f64) {
        ((self.x + self.tilt) / CELL_WIDTH_PX, self.y / CELL_HEIGHT_PX)
    }

    /// Glyph approximating the strip's slant.
    fn glyph(&self) -> char {
        let dy = self.tilt + self.r / 2.0;
        if dy > 2.0 {
            '/'
        } else if dy < -2.0 {
            '\\'
        } else {
            '-'
        }
    }

    fn color(&self) -> Color {
        let (r, g, b) = hue_to_rgb(self.hue);
        Color::Rgb(r, g, b)
    }

    /// Vertical position in virtual pixels.
    pub fn y(&self) -> f64 {
        self.y
    }
}

/// A running (or finished) confetti burst.
#[derive(Debug, Clone, Default)]
pub struct Confetti {
    particles: Vec<Particle>,
    elapsed: Duration,
    carry: Duration,
}

impl Confetti {
    /// Creates an idle effect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new burst sized for a `width` x `height` cell area, replacing
    /// any burst in flight.
    pub fn burst<R: Rng>(&mut self, rng: &mut R, width: u16, height: u16) {
        let width_px = f64::from(width) * CELL_WIDTH_PX;
        let height_px = f64::from(height) * CELL_HEIGHT_PX;
        self.particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::spawn(&mut *rng, width_px, height_px))
            .collect();
        self.elapsed = Duration::ZERO;
        self.carry = Duration::ZERO;
        debug!(width, height, "Confetti burst started");
    }

    /// Advances the simulation by `dt` of wall time.
    pub fn tick(&mut self, dt: Duration) {
        if !self.is_active() {
            return;
        }

        self.elapsed += dt;
        if self.elapsed >= BURST_LENGTH {
            self.stop();
            return;
        }

        self.carry += dt;
        while self.carry >= STEP {
            self.carry -= STEP;
            self.particles.iter_mut().for_each(Particle::step);
        }
    }

    /// Ends the burst immediately.
    pub fn stop(&mut self) {
        if self.is_active() {
            debug!("Confetti burst finished");
        }
        self.particles.clear();
    }

    /// Returns true while a burst is on screen.
    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    /// The live particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Paints visible particles into `buf` within `area`.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        for particle in &self.particles {
            let (col, row) = particle.cell();
            if col < 0.0 || row < 0.0 || col >= f64::from(area.width) || row >= f64::from(area.height) {
                continue;
            }
            let x = area.x + col as u16;
            let y = area.y + row as u16;
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(particle.glyph()).set_fg(particle.color());
            }
        }
    }
}

/// Converts a hue (degrees) at full saturation and 50% lightness to RGB.
pub fn hue_to_rgb(hue: f64) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - ((h % 2.0) - 1.0).abs();
    let (r, g, b) = match h as u8 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let to_byte = |v: f64| (v * 255.0).round() as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}
