use std::time::{Duration, Instant};

/// Per-process play statistics shown in the HUD. Nothing here outlives the process.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            running: false,
        }
    }

    /// Refresh the elapsed time; the clock stands still between sessions
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_session_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    /// Session ended, by game over or by returning to the menu
    pub fn on_session_end(&mut self, final_score: u32) {
        if !self.running {
            return;
        }
        self.update();
        self.running = false;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
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

        for (score, best) in [(10, 10), (5, 10), (15, 15)] {
            metrics.on_session_start();
            metrics.on_session_end(score);
            assert_eq!(metrics.high_score, best);
        }
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_end_without_start_is_ignored() {
        let mut metrics = GameMetrics::new();
        metrics.on_session_end(7);
        assert_eq!(metrics.games_played, 0);
        assert_eq!(metrics.high_score, 0);
    }

    #[test]
    fn test_clock_stops_between_sessions() {
        let mut metrics = GameMetrics::new();
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);

        metrics.on_session_start();
        std::thread::sleep(Duration::from_millis(20));
        metrics.on_session_end(0);
        let frozen = metrics.elapsed_time;
        assert!(frozen.as_millis() >= 20);

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);
    }
}
