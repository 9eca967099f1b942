use serde::Serialize;

/// Points awarded per cleared line. Multi-line clears are rewarded linearly.
pub const POINTS_PER_LINE: usize = 100;

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: `POINTS_PER_LINE` for every cleared line, nothing else
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: Count of locks clearing 0, 1, 2, 3 and 4 lines
/// - **Hard drop distance**: Total rows travelled by hard drops
///
/// The hard drop distance is recorded but does not affect the score.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(2);
/// stats.complete_piece_drop(0);
///
/// assert_eq!(stats.score(), 200);
/// assert_eq!(stats.completed_pieces(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    hard_drop_distance: usize,
}

impl GameStats {
    /// Creates a new statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
            hard_drop_distance: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared (index 0..=4).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    #[must_use]
    pub const fn hard_drop_distance(&self) -> usize {
        self.hard_drop_distance
    }

    /// Updates statistics after a piece locks.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        self.score += cleared_lines * POINTS_PER_LINE;
    }

    pub const fn record_hard_drop(&mut self, distance: usize) {
        self.hard_drop_distance += distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_linear_in_lines() {
        for lines in 0..=4 {
            let mut stats = GameStats::new();
            stats.complete_piece_drop(lines);
            assert_eq!(stats.score(), lines * POINTS_PER_LINE);
        }
    }

    #[test]
    fn test_hard_drop_is_score_neutral() {
        let mut stats = GameStats::new();
        stats.record_hard_drop(17);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.hard_drop_distance(), 17);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = GameStats::new();
        for lines in [0, 1, 1, 4, 0] {
            stats.complete_piece_drop(lines);
        }
        assert_eq!(stats.completed_pieces(), 5);
        assert_eq!(stats.total_cleared_lines(), 6);
        assert_eq!(stats.line_cleared_counter(), &[2, 2, 0, 0, 1]);
        assert_eq!(stats.score(), 600);
    }
}
