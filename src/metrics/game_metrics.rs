use std::time::Duration;

/// Per-session statistics shown next to the score
#[derive(Debug, Clone, Default)]
pub struct GameMetrics {
    /// Play time of the current game; only ticks that moved the snake count
    pub elapsed_time: Duration,
    /// Best score of any game closed this session
    pub high_score: u32,
    /// Games closed by a collision, a full board or a restart
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tick(&mut self, tick: Duration) {
        self.elapsed_time += tick;
    }

    pub fn on_game_start(&mut self) {
        self.elapsed_time = Duration::ZERO;
    }

    /// Close out a game. Returns true if its score beats every earlier game.
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.games_played += 1;
        let record = final_score > self.high_score;
        self.high_score = self.high_score.max(final_score);
        record
    }

    /// Session best, counting the game still in progress
    pub fn best_with(&self, current_score: u32) -> u32 {
        self.high_score.max(current_score)
    }

    /// `MM:SS`; minutes keep counting past the hour
    pub fn format_time(&self) -> String {
        let secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_millis(59_900);
        assert_eq!(metrics.format_time(), "00:59");

        metrics.elapsed_time = Duration::from_secs(2 * 3600 + 5);
        assert_eq!(metrics.format_time(), "120:05");
    }

    #[test]
    fn test_records_only_on_strictly_better_scores() {
        let mut metrics = GameMetrics::new();

        assert!(!metrics.on_game_over(0));
        assert!(metrics.on_game_over(30));
        assert!(!metrics.on_game_over(30));
        assert!(!metrics.on_game_over(10));

        assert_eq!(metrics.high_score, 30);
        assert_eq!(metrics.games_played, 4);
    }

    #[test]
    fn test_best_includes_current_game() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(40);

        assert_eq!(metrics.best_with(20), 40);
        assert_eq!(metrics.best_with(60), 60);
        assert_eq!(metrics.high_score, 40);
    }

    #[test]
    fn test_ticks_accumulate_and_reset() {
        let mut metrics = GameMetrics::new();
        for _ in 0..20 {
            metrics.record_tick(Duration::from_millis(150));
        }
        assert_eq!(metrics.elapsed_time, Duration::from_secs(3));
        assert_eq!(metrics.format_time(), "00:03");

        metrics.on_game_start();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
        assert_eq!(metrics.games_played, 0);
    }
}
