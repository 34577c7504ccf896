use std::time::{Duration, Instant};

/// Play statistics for the running process. Nothing here outlives it.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Best final score so far, if any game has finished
    pub high_score: Option<i64>,
    pub games_played: u32,
    /// Food eaten by the player in the current game
    pub fruit_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: None,
            games_played: 0,
            fruit_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.fruit_eaten = 0;
    }

    pub fn on_fruit_eaten(&mut self, count: usize) {
        self.fruit_eaten += count as u32;
    }

    /// Scores can go negative when the rival eats, so the first finished
    /// game always sets the high score.
    pub fn on_game_over(&mut self, final_score: i64) {
        self.games_played += 1;
        self.high_score = Some(self.high_score.map_or(final_score, |best| best.max(final_score)));
    }

    pub fn format_high_score(&self) -> String {
        self.high_score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        assert_eq!(metrics.format_high_score(), "-");

        metrics.on_game_over(-35);
        assert_eq!(metrics.high_score, Some(-35));
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(-80);
        assert_eq!(metrics.high_score, Some(-35)); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(95);
        assert_eq!(metrics.high_score, Some(95)); // Should update
        assert_eq!(metrics.format_high_score(), "95");
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_fruit_counter_resets_per_game() {
        let mut metrics = GameMetrics::new();
        metrics.on_fruit_eaten(2);
        metrics.on_fruit_eaten(1);
        assert_eq!(metrics.fruit_eaten, 3);

        metrics.on_game_start();
        assert_eq!(metrics.fruit_eaten, 0);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
