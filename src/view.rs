use crossterm::style::Color;

use crate::fruit::{Rgb, FRUIT_TABLE};
use crate::game::Snapshot;
use crate::grid::Cell;
use crate::term::{Glyph, TermManager};
use crate::turbo::TurboPhase;
use crate::{Coords, TermInt};

// Every board cell is two columns wide so it comes out roughly square
const CELL_WIDTH: TermInt = 2;
const GAUGE_WIDTH: usize = 16;
const LEADERBOARD_ROWS: usize = 15;
const ERROR_WRAP: usize = 60;

const BOARD_BG: Color = Color::Rgb { r: 18, g: 18, b: 18 };
const SNAKE_COLOR: Color = Color::Rgb { r: 60, g: 205, b: 120 };
const SNAKE_HEAD_COLOR: Color = Color::Rgb { r: 40, g: 180, b: 100 };
const DEAD_SNAKE_CHAR: char = 'X';
const DIM: Color = Color::Rgb { r: 180, g: 180, b: 180 };

pub fn rgb(color: Rgb) -> Color {
    Color::Rgb { r: color.0, g: color.1, b: color.2 }
}

/// Fully saturated, full brightness colour for `hue` in `[0, 1)`.
pub fn hue_color(hue: f64) -> Color {
    let h = hue.rem_euclid(1.0) * 6.0;
    let f = h - h.floor();
    let (q, t) = (1.0 - f, f);

    let (r, g, b) = match h.floor() as u8 {
        0 => (1.0, t, 0.0),
        1 => (q, 1.0, 0.0),
        2 => (0.0, 1.0, t),
        3 => (0.0, q, 1.0),
        4 => (t, 0.0, 1.0),
        _ => (1.0, 0.0, q),
    };

    let scale = |c: f64| (c * 255.0) as u8;
    Color::Rgb { r: scale(r), g: scale(g), b: scale(b) }
}

/// Size of the bordered board plus the status row above it.
pub fn required_size(grid_size: i32) -> Coords {
    let n = grid_size as TermInt;
    (n * CELL_WIDTH + 2, n + 3)
}

pub fn draw_game(term: &mut TermManager, snap: &Snapshot) {
    let (need_w, need_h) = required_size(snap.grid_size);
    let (w, h) = term.get_terminal_size();

    if w < need_w || h < need_h {
        let need = format!("Need at least {}x{}", need_w, need_h);
        term.show_message(&["Terminal too small", need.as_str(), "", "Esc for menu"]);
        return;
    }

    let left = (w - need_w) / 2;
    let top = (h - need_h) / 2;
    let board_origin = (left, top + 1);

    draw_status(term, (left, top), need_w, snap);
    term.draw_borders(board_origin, (need_w, need_h - 1));

    let n = snap.grid_size;
    for y in 0..n {
        for x in 0..n {
            paint_cell(term, board_origin, Cell::new(x, y), [' ', ' '], Color::Reset, BOARD_BG);
        }
    }

    if let Some(cells) = snap.mega {
        let color = hue_color(snap.mega_hue);
        for cell in cells.iter() {
            paint_cell(term, board_origin, *cell, ['*', '*'], Color::Black, color);
        }
    }

    if let Some(fruit) = snap.fruit {
        paint_cell(term, board_origin, fruit.cell, ['(', ')'], Color::Black, rgb(fruit.kind.color));
    }

    let body_color = snap.glow_hue.map(hue_color).unwrap_or(SNAKE_COLOR);
    let last = snap.body.len().saturating_sub(1);
    for (i, cell) in snap.body.iter().enumerate() {
        if snap.game_over {
            paint_cell(term, board_origin, *cell, [DEAD_SNAKE_CHAR, ' '], Color::Red, BOARD_BG);
        } else if i == last {
            let chars = [snap.head_char, ' '];
            paint_cell(term, board_origin, *cell, chars, Color::Black, SNAKE_HEAD_COLOR);
        } else {
            paint_cell(term, board_origin, *cell, [' ', ' '], Color::Reset, body_color);
        }
    }

    if snap.game_over {
        let score = format!("Score: {}", snap.score);
        term.show_message(&[
            "Game over!",
            score.as_str(),
            "",
            "R to play again,",
            "Enter or Esc for the menu",
        ]);
    }
}

fn paint_cell(
    term: &mut TermManager,
    origin: Coords,
    cell: Cell,
    chars: [char; 2],
    fg: Color,
    bg: Color,
) {
    let x = origin.0 + 1 + cell.x as TermInt * CELL_WIDTH;
    let y = origin.1 + 1 + cell.y as TermInt;
    term.put((x, y), Glyph::new(chars[0], fg, bg));
    term.put((x + 1, y), Glyph::new(chars[1], fg, bg));
}

fn draw_status(term: &mut TermManager, pos: Coords, width: TermInt, snap: &Snapshot) {
    let mut left = format!("Score: {}", snap.score);
    if let Some(fruit) = snap.fruit {
        left.push_str(&format!("   {} +{}", fruit.kind.name, fruit.kind.points));
    }
    term.print_at(pos, &left, Color::White, Color::Reset);

    let filled = ((snap.turbo.ratio * GAUGE_WIDTH as f64) as usize).min(GAUGE_WIDTH);
    let gauge: String = std::iter::repeat('#').take(filled)
        .chain(std::iter::repeat('.').take(GAUGE_WIDTH - filled))
        .collect();
    let color = match snap.turbo.phase {
        TurboPhase::Active => Color::Rgb { r: 255, g: 100, b: 80 },
        TurboPhase::Ready => Color::Rgb { r: 90, g: 200, b: 120 },
        TurboPhase::Cooldown => Color::Rgb { r: 120, g: 170, b: 255 },
    };

    let label = format!("TURBO [{}]", gauge);
    let x = pos.0 + width.saturating_sub(label.len() as TermInt);
    term.print_at((x, pos.1), "TURBO ", Color::White, Color::Reset);
    term.print_at((x + 6, pos.1), &format!("[{}]", gauge), color, Color::Reset);
}

pub fn draw_menu(term: &mut TermManager, options: &[&str], selected: usize) {
    let (_, h) = term.get_terminal_size();
    let top = (h / 2).saturating_sub(options.len() as TermInt + 3);

    term.print_centered(top, "Snake 32x32", Color::Green);
    for (i, option) in options.iter().enumerate() {
        let y = top + 3 + i as TermInt * 2;
        if i == selected {
            term.print_centered(y, &format!("> {} <", option), Color::White);
        } else {
            term.print_centered(y, option, DIM);
        }
    }

    let hint = "Arrows/WASD to choose, Enter to select, Ctrl+C to quit";
    term.print_centered(h.saturating_sub(2), hint, DIM);
}

pub fn draw_leaderboard(term: &mut TermManager, scores: &[u32]) {
    let (_, h) = term.get_terminal_size();
    term.print_centered(1, "Leaderboard", Color::White);

    if scores.is_empty() {
        term.print_centered(h / 2, "No scores yet", DIM);
    } else {
        for (idx, score) in scores.iter().take(LEADERBOARD_ROWS).enumerate() {
            let line = format!("{:2}. {:>6}", idx + 1, score);
            term.print_centered(3 + idx as TermInt, &line, Color::White);
        }
    }

    term.print_centered(h.saturating_sub(2), "Press Esc or Backspace to return", DIM);
}

pub fn draw_fruits(term: &mut TermManager) {
    let (_, h) = term.get_terminal_size();
    term.print_centered(1, "Fruits", Color::White);

    let mut y = 4;
    for kind in FRUIT_TABLE.iter() {
        term.print_at((10, y), "  ", Color::Reset, rgb(kind.color));
        let label = format!("{:<10} +{}", kind.name, kind.points);
        term.print_at((14, y), &label, Color::White, Color::Reset);
        y += 2;
    }

    y += 1;
    for dy in 0..2 {
        term.print_at((10, y + dy), "    ", Color::Reset, Color::Rgb { r: 255, g: 100, b: 100 });
    }
    term.print_at((16, y), "Mega Fruit (2x2 center)  +10", Color::White, Color::Reset);
    term.print_at((16, y + 1), "Rare, and gone after 5 seconds", DIM, Color::Reset);

    term.print_centered(h.saturating_sub(2), "Press Esc or Backspace to return", DIM);
}

/// Shown in place of a frame that failed, so the screen is never left blank.
pub fn draw_error(term: &mut TermManager, message: &str) {
    let chars: Vec<char> = message.chars().collect();
    for (i, chunk) in chars.chunks(ERROR_WRAP).take(10).enumerate() {
        let line: String = chunk.iter().collect();
        let color = Color::Rgb { r: 255, g: 80, b: 80 };
        term.print_at((2, 2 + i as TermInt), &line, color, Color::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::GameState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn game() -> GameState<ChaCha8Rng> {
        GameState::new_with_rng(GameConfig::default(), 0, ChaCha8Rng::seed_from_u64(9))
    }

    #[test]
    fn hue_wheel_primaries() {
        assert_eq!(hue_color(0.0), Color::Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(hue_color(1.0 / 3.0), Color::Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(hue_color(2.0 / 3.0), Color::Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(hue_color(1.0), hue_color(0.0));
    }

    #[test]
    fn board_shows_the_snake_head() {
        let game = game();
        let (w, h) = required_size(32);
        let mut term = TermManager::offscreen(w, h);

        draw_game(&mut term, &game.snapshot(0));

        assert_eq!(term.row(0).trim_start().get(..8), Some("Score: 0"));
        assert!(term.row(1).starts_with("+---"));
        // head at (16, 16) sits on screen row 16 + 2, column 16 * 2 + 1
        assert_eq!(term.glyph_at((33, 18)).ch, '>');
        assert_eq!(term.glyph_at((33, 18)).bg, SNAKE_HEAD_COLOR);
        assert_eq!(term.glyph_at((31, 18)).bg, SNAKE_COLOR);
    }

    #[test]
    fn small_terminal_gets_a_hint() {
        let game = game();
        let mut term = TermManager::offscreen(40, 12);
        draw_game(&mut term, &game.snapshot(0));
        assert!((0..12).any(|y| term.row(y).contains("Terminal too small")));
    }

    #[test]
    fn empty_leaderboard() {
        let mut term = TermManager::offscreen(40, 20);
        draw_leaderboard(&mut term, &[]);
        assert!(term.row(10).contains("No scores yet"));

        draw_leaderboard(&mut term, &[30, 12]);
        assert!(term.row(3).contains(" 1.     30"));
        assert!(term.row(4).contains(" 2.     12"));
    }

    #[test]
    fn long_errors_wrap() {
        let mut term = TermManager::offscreen(80, 20);
        draw_error(&mut term, &"x".repeat(130));
        assert_eq!(term.row(2).trim().len(), ERROR_WRAP);
        assert_eq!(term.row(4).trim().len(), 10);
    }
}
