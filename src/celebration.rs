use rand::seq::SliceRandom;
use rand::Rng;

const SYMBOLS: [char; 6] = ['*', '+', 'o', '#', '~', '^'];
const PIECE_COUNT: usize = 120;

/// One piece of confetti drifting down the completed screen.
#[derive(Debug, Clone)]
pub struct ConfettiPiece {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
}

impl ConfettiPiece {
    fn new(width: f64, height: f64) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            // Spawn anywhere horizontally, up to a full screen above the top
            // so the shower builds up instead of arriving as one sheet.
            x: rng.gen_range(0.0..width.max(1.0)),
            y: rng.gen_range(-height.max(1.0)..0.0),
            vel_x: rng.gen_range(-0.5..0.5),
            vel_y: rng.gen_range(0.8..2.0),
            symbol: *SYMBOLS.choose(&mut rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
        }
    }
}

/// Endless confetti shower shown while the completed screen is up. Pieces
/// that fall off the bottom re-enter from the top, so the animation runs
/// until the user leaves the screen.
#[derive(Debug, Default)]
pub struct Confetti {
    pub pieces: Vec<ConfettiPiece>,
    pub is_active: bool,
    width: f64,
    height: f64,
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, width: u16, height: u16) {
        self.width = width as f64;
        self.height = height as f64;
        self.is_active = true;
        self.pieces = (0..PIECE_COUNT)
            .map(|_| ConfettiPiece::new(self.width, self.height))
            .collect();
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.pieces.clear();
    }

    /// Advance one animation frame (called on every UI tick).
    pub fn update(&mut self) {
        if !self.is_active {
            return;
        }
        let mut rng = rand::thread_rng();
        for piece in &mut self.pieces {
            piece.x += piece.vel_x;
            piece.y += piece.vel_y;
            if piece.y > self.height {
                piece.y = -1.0;
                piece.x = rng.gen_range(0.0..self.width.max(1.0));
            }
            if piece.x < 0.0 {
                piece.x += self.width;
            } else if piece.x > self.width {
                piece.x -= self.width;
            }
        }
    }

    /// Track a terminal resize without restarting the shower.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width as f64;
        self.height = height as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive_and_empty() {
        let confetti = Confetti::new();
        assert!(!confetti.is_active);
        assert!(confetti.pieces.is_empty());
    }

    #[test]
    fn start_spawns_pieces_above_or_on_screen() {
        let mut confetti = Confetti::new();
        confetti.start(80, 24);
        assert!(confetti.is_active);
        assert_eq!(confetti.pieces.len(), PIECE_COUNT);
        for piece in &confetti.pieces {
            assert!(piece.x >= 0.0 && piece.x <= 80.0);
            assert!(piece.y < 24.0);
        }
    }

    #[test]
    fn update_moves_pieces_downward_on_average() {
        let mut confetti = Confetti::new();
        confetti.start(80, 24);
        let before: f64 = confetti.pieces.iter().map(|p| p.y).sum();
        confetti.update();
        let after: f64 = confetti.pieces.iter().map(|p| p.y).sum();
        assert!(after > before);
    }

    #[test]
    fn pieces_wrap_instead_of_dying() {
        let mut confetti = Confetti::new();
        confetti.start(20, 10);
        for _ in 0..1000 {
            confetti.update();
        }
        assert_eq!(confetti.pieces.len(), PIECE_COUNT);
        for piece in &confetti.pieces {
            assert!(piece.y <= 10.0 + 2.0, "piece below wrap line: {}", piece.y);
        }
    }

    #[test]
    fn stop_clears_the_shower() {
        let mut confetti = Confetti::new();
        confetti.start(80, 24);
        confetti.stop();
        assert!(!confetti.is_active);
        assert!(confetti.pieces.is_empty());
    }

    #[test]
    fn update_is_noop_while_inactive() {
        let mut confetti = Confetti::new();
        confetti.update();
        assert!(confetti.pieces.is_empty());
    }
}
