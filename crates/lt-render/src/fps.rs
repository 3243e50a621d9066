use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Compteur FPS par fenêtre glissante. Zéro allocation après init.
///
/// The caller passes the timestamp so the scheduler can reuse the instant it
/// already took for pacing.
///
/// # Example
/// ```
/// use std::time::{Duration, Instant};
/// use lt_render::fps::FpsCounter;
///
/// let mut counter = FpsCounter::new(8);
/// let t0 = Instant::now();
/// counter.tick(t0);
/// counter.tick(t0 + Duration::from_millis(100));
/// assert!((counter.fps() - 10.0).abs() < 1e-6);
/// ```
pub struct FpsCounter {
    /// Timestamps des dernières N frames.
    timestamps: VecDeque<Instant>,
    window: usize,
    fps: f64,
    frame_time: Duration,
}

impl FpsCounter {
    /// Create a counter averaging over the last `window` frames (at least 2).
    #[must_use]
    pub fn new(window: usize) -> Self {
        let window = window.max(2);
        Self {
            timestamps: VecDeque::with_capacity(window + 1),
            window,
            fps: 0.0,
            frame_time: Duration::ZERO,
        }
    }

    /// Appeler une fois par frame, APRÈS l'écriture.
    pub fn tick(&mut self, now: Instant) {
        if let Some(&last) = self.timestamps.back() {
            self.frame_time = now.saturating_duration_since(last);
        }
        self.timestamps.push_back(now);
        if self.timestamps.len() > self.window {
            self.timestamps.pop_front();
        }
        if let Some(&first) = self.timestamps.front() {
            let secs = now.saturating_duration_since(first).as_secs_f64();
            if self.timestamps.len() >= 2 && secs > 0.0 {
                self.fps = (self.timestamps.len() - 1) as f64 / secs;
            }
        }
    }

    /// FPS moyen sur la fenêtre.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Interval between the last two ticks.
    #[must_use]
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }
}
