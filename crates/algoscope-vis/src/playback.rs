//! Playback controls for a step sequence.

use std::time::Duration;

use algoscope_core::Step;
use serde::{Deserialize, Serialize};

/// Allowed playback speeds. A higher speed gives a shorter tick period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl SpeedRange {
    pub const DEFAULT: SpeedRange = SpeedRange {
        min: 10,
        max: 290,
        default: 150,
    };

    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

/// Playback speed, always inside its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Speed(u32);

impl Speed {
    pub fn new(value: u32, range: &SpeedRange) -> Self {
        Speed(range.clamp(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Tick period: `max_period - speed` milliseconds, never below one.
    pub fn period(&self, max_period: Duration) -> Duration {
        max_period
            .saturating_sub(Duration::from_millis(u64::from(self.0)))
            .max(Duration::from_millis(1))
    }
}

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// No steps loaded
    Idle,
    /// Steps loaded, positioned at the first one
    Ready,
    /// Advancing on every tick
    Playing,
    /// Stopped mid-sequence
    Paused,
    /// Positioned at the last step
    Finished,
}

/// Player over one generated step sequence.
pub struct Player {
    steps: Vec<Step>,
    index: usize,
    state: PlaybackState,
    speed: Speed,
    range: SpeedRange,
    max_period: Duration,
    generation: u64,
}

impl Player {
    pub fn new(speed: u32, range: SpeedRange, max_period: Duration) -> Self {
        Self {
            steps: Vec::new(),
            index: 0,
            state: PlaybackState::Idle,
            speed: Speed::new(speed, &range),
            range,
            max_period,
            generation: 0,
        }
    }

    /// Replace the sequence and rewind.
    pub fn load(&mut self, steps: Vec<Step>) {
        self.steps = steps;
        self.rewind();
    }

    fn rewind(&mut self) {
        self.index = 0;
        self.generation += 1;
        self.state = if self.steps.is_empty() {
            PlaybackState::Idle
        } else {
            PlaybackState::Ready
        };
    }

    /// Start playing. Returns whether playback started.
    pub fn play(&mut self) -> bool {
        let can_start = matches!(self.state, PlaybackState::Ready | PlaybackState::Paused)
            && self.index + 1 < self.steps.len();
        if can_start {
            self.state = PlaybackState::Playing;
        }
        can_start
    }

    /// Pause playback. Returns whether it was playing.
    pub fn pause(&mut self) -> bool {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            true
        } else {
            false
        }
    }

    /// Advance one step while playing. Returns whether the index moved.
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.index += 1;
        if self.index + 1 >= self.steps.len() {
            self.state = PlaybackState::Finished;
        }
        true
    }

    /// Back to the first step, ready to play.
    pub fn reset(&mut self) {
        self.rewind();
    }

    /// Manual step forward. Ignored while playing.
    pub fn step_forward(&mut self) -> bool {
        if self.index + 1 >= self.steps.len() {
            return false;
        }
        self.seek(self.index + 1)
    }

    /// Manual step backward. Ignored while playing.
    pub fn step_backward(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.seek(self.index - 1)
    }

    /// Jump to `index`, clamped to the sequence. Ignored while playing or idle.
    pub fn seek(&mut self, index: usize) -> bool {
        if matches!(self.state, PlaybackState::Playing | PlaybackState::Idle) {
            return false;
        }
        self.index = index.min(self.steps.len() - 1);
        self.state = if self.index + 1 == self.steps.len() {
            PlaybackState::Finished
        } else {
            PlaybackState::Paused
        };
        true
    }

    /// Set the speed, clamped to the configured range.
    pub fn set_speed(&mut self, value: u32) -> Speed {
        self.speed = Speed::new(value, &self.range);
        self.speed
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Current tick period.
    pub fn period(&self) -> Duration {
        self.speed.period(self.max_period)
    }

    /// Step at the current index. `None` before anything is loaded.
    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.index)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Bumped on every load and reset, so a timer can tell its sequence was replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Calculate progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        match self.steps.len() {
            0 => 0.0,
            1 => 1.0,
            n => self.index as f64 / (n - 1) as f64,
        }
    }
}

/// Playback status for sending to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub index: usize,
    pub len: usize,
    pub state: PlaybackState,
    pub speed: Speed,
    pub period_ms: u64,
    pub progress: f64,
}

impl From<&Player> for PlaybackStatus {
    fn from(player: &Player) -> Self {
        Self {
            index: player.index,
            len: player.len(),
            state: player.state,
            speed: player.speed,
            period_ms: u64::try_from(player.period().as_millis()).unwrap_or(u64::MAX),
            progress: player.progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_steps(count: usize) -> Vec<Step> {
        (0..count).map(|i| Step::notice(format!("step {i}"))).collect()
    }

    fn player(count: usize) -> Player {
        let mut player = Player::new(150, SpeedRange::DEFAULT, Duration::from_millis(300));
        player.load(make_steps(count));
        player
    }

    #[test]
    fn load_positions_at_start() {
        let player = player(5);
        assert_eq!(player.index(), 0);
        assert_eq!(player.state(), PlaybackState::Ready);
        assert_eq!(player.current_step().unwrap().message(), "step 0");
    }

    #[test]
    fn empty_sequence_is_idle() {
        let mut player = player(0);
        assert_eq!(player.state(), PlaybackState::Idle);
        assert!(player.current_step().is_none());
        assert!(!player.play());
        assert!(!player.seek(3));
    }

    #[test]
    fn ticks_run_to_finish() {
        let mut player = player(3);
        assert!(player.play());
        assert!(player.tick());
        assert_eq!(player.state(), PlaybackState::Playing);
        assert!(player.tick());
        assert_eq!(player.index(), 2);
        assert_eq!(player.state(), PlaybackState::Finished);

        // No advance after finishing.
        assert!(!player.tick());
        assert!(!player.play());
        assert_eq!(player.index(), 2);
    }

    #[test]
    fn single_step_cannot_play() {
        let mut player = player(1);
        assert!(!player.play());
        assert_eq!(player.state(), PlaybackState::Ready);
        assert_eq!(player.progress(), 1.0);
    }

    #[test]
    fn pause_and_resume() {
        let mut player = player(4);
        player.play();
        player.tick();
        assert!(player.pause());
        assert!(!player.tick());
        assert_eq!(player.index(), 1);
        assert!(player.play());
        player.tick();
        assert_eq!(player.index(), 2);
    }

    #[test]
    fn reset_rewinds_and_bumps_generation() {
        let mut player = player(4);
        let generation = player.generation();
        player.play();
        player.tick();
        player.reset();
        assert_eq!(player.index(), 0);
        assert_eq!(player.state(), PlaybackState::Ready);
        assert!(player.generation() > generation);
    }

    #[test]
    fn manual_stepping_clamps() {
        let mut player = player(3);
        assert!(!player.step_backward());
        assert!(player.step_forward());
        assert_eq!(player.state(), PlaybackState::Paused);
        assert!(player.step_forward());
        assert_eq!(player.state(), PlaybackState::Finished);
        assert!(!player.step_forward());
        assert!(player.step_backward());
        assert_eq!(player.index(), 1);
        assert_eq!(player.state(), PlaybackState::Paused);
    }

    #[test]
    fn seek_clamps_and_is_ignored_while_playing() {
        let mut player = player(10);
        assert!(player.seek(100));
        assert_eq!(player.index(), 9);
        assert_eq!(player.state(), PlaybackState::Finished);

        player.reset();
        player.play();
        assert!(!player.seek(5));
        assert_eq!(player.index(), 0);
    }

    #[test]
    fn speed_is_clamped_and_sets_period() {
        let mut player = player(2);
        assert_eq!(player.period(), Duration::from_millis(150));
        assert_eq!(player.set_speed(1000).value(), 290);
        assert_eq!(player.period(), Duration::from_millis(10));
        assert_eq!(player.set_speed(0).value(), 10);
        assert_eq!(player.period(), Duration::from_millis(290));
    }

    #[test]
    fn status_conversion() {
        let mut player = player(5);
        player.seek(2);
        let status = PlaybackStatus::from(&player);
        assert_eq!(status.index, 2);
        assert_eq!(status.len, 5);
        assert_eq!(status.state, PlaybackState::Paused);
        assert_eq!(status.period_ms, 150);
        assert_eq!(status.progress, 0.5);

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["state"], "paused");
        assert_eq!(json["speed"], 150);
    }
}
