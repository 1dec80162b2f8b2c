//! Terminal rendering of the unfolded cube.

use std::fmt::Write;

use cubetrainer_core::{Face, FaceletState};
use cubetrainer_sim::Visualizer;
use owo_colors::OwoColorize;

/// Returns the RGB display color of stickers of a color.
fn rgb(color: Face) -> (u8, u8, u8) {
    match color {
        Face::U => (255, 213, 0),
        Face::R => (0, 70, 173),
        Face::F => (255, 88, 0),
        Face::D => (255, 255, 255),
        Face::L => (0, 155, 72),
        Face::B => (183, 18, 52),
    }
}

fn sticker(out: &mut String, color: Face, colored: bool) {
    let text = format!(" {} ", color.symbol());
    if colored {
        let (r, g, b) = rgb(color);
        let _ = write!(out, "{}", text.black().on_truecolor(r, g, b));
    } else {
        out.push_str(&text);
    }
}

/// Renders the cube as an unfolded net:
///
/// ```text
///          U
///       L  F  R  B
///          D
/// ```
pub fn render(state: &FaceletState, colored: bool) -> String {
    let mut out = String::new();
    let indent = " ".repeat(9);
    let row = |out: &mut String, face: Face, r: usize| {
        for &color in &state.face(face).colors()[r * 3..r * 3 + 3] {
            sticker(out, color, colored);
        }
    };

    for r in 0..3 {
        out.push_str(&indent);
        row(&mut out, Face::U, r);
        out.push('\n');
    }
    for r in 0..3 {
        for face in [Face::L, Face::F, Face::R, Face::B] {
            row(&mut out, face, r);
        }
        out.push('\n');
    }
    for r in 0..3 {
        out.push_str(&indent);
        row(&mut out, Face::D, r);
        out.push('\n');
    }
    out
}

/// Visualizer that prints the net to stdout.
#[derive(Debug, Default)]
pub struct NetPrinter {
    pub colored: bool,
    refreshes: usize,
}
impl NetPrinter {
    pub fn new(colored: bool) -> Self {
        Self {
            colored,
            refreshes: 0,
        }
    }
}
impl Visualizer for NetPrinter {
    fn refresh(&mut self, state: &FaceletState) {
        if self.refreshes > 0 {
            println!();
        }
        self.refreshes += 1;
        println!("{state}");
        print!("{}", render(state, self.colored));
    }
}

#[cfg(test)]
mod tests {
    use cubetrainer_core::PieceRegistry;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_after_u() {
        let mut registry = PieceRegistry::solved();
        registry.apply_move("U".parse().unwrap()).unwrap();
        let state = FaceletState::capture(&registry).unwrap();
        let expected = "
          U  U  U
          U  U  U
          U  U  U
 F  F  F  R  R  R  B  B  B  L  L  L
 L  L  L  F  F  F  R  R  R  B  B  B
 L  L  L  F  F  F  R  R  R  B  B  B
          D  D  D
          D  D  D
          D  D  D
";
        let actual = render(&state, false)
            .lines()
            .map(|line| format!("{}\n", line.trim_end()))
            .collect::<String>();
        assert_eq!(actual, &expected[1..]);
    }
}
