//! Terminal indicator rendering
//!
//! Draws each indicator as one line: a direction glyph for the dial
//! position plus the numeric angle, colored by display slot when ANSI
//! colors are enabled.

use horizon_panel::{Indicator, IndicatorRenderer, Rgb};

pub struct TermRenderer {
    color: bool,
    lines: Vec<String>,
}

impl TermRenderer {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            lines: Vec::new(),
        }
    }

    fn format(&self, indicator: &Indicator) -> String {
        let glyph = dial_glyph(indicator.angle_degrees);
        let text = format!(
            "{:<20} {:>5} {} {:>8.2}°",
            indicator.topic,
            indicator.axis.as_str(),
            glyph,
            indicator.angle_degrees,
        );
        if self.color {
            let Rgb(r, g, b) = indicator.color;
            format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m")
        } else {
            text
        }
    }
}

impl IndicatorRenderer for TermRenderer {
    fn begin_frame(&mut self) {
        self.lines.clear();
    }

    fn draw(&mut self, indicator: Indicator) {
        self.lines.push(self.format(&indicator));
    }

    fn end_frame(&mut self) {
        for line in &self.lines {
            println!("{line}");
        }
        if !self.lines.is_empty() {
            println!();
        }
    }

    fn release(&mut self) {
        // Leave the terminal in its default state.
        if self.color {
            print!("\x1b[0m");
        }
    }
}

/// Map an angle in degrees to one of eight compass-dial arrows.
fn dial_glyph(angle_degrees: f64) -> char {
    const ARROWS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];
    let normalized = angle_degrees.rem_euclid(360.0);
    let sector = ((normalized + 22.5) / 45.0) as usize % 8;
    ARROWS[sector]
}
