//! Timer-driven playback over a shared session.
//!
//! The [`Controller`] owns at most one interval task. Every operation that
//! replaces the sequence or stops playback aborts that task first, so a
//! `Playing` player always has exactly one live timer and a stopped one has
//! none.

use std::sync::Arc;
use std::time::Duration;

use algoscope_core::{Algorithm, Family};
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock, RwLockReadGuard};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::error::Result;
use crate::playback::{PlaybackState, PlaybackStatus};
use crate::session::Session;

/// Direction for manual stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

/// Drives one session's player from a tokio interval.
pub struct Controller {
    session: Arc<RwLock<Session>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Controller {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            timer: Mutex::new(None),
        }
    }

    /// Read access to the session. Mutations go through the controller.
    pub async fn session(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().await
    }

    pub async fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(self.session.read().await.player())
    }

    /// Whether an interval task is currently running.
    pub async fn is_timer_live(&self) -> bool {
        self.timer
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Start playback. Already playing is a no-op that keeps the running timer.
    pub async fn play(&self) -> PlaybackStatus {
        let mut session = self.session.write().await;
        if session.player().state() != PlaybackState::Playing {
            self.stop_timer().await;
            if session.player_mut().play() {
                self.start_timer(&session).await;
            }
        }
        PlaybackStatus::from(session.player())
    }

    pub async fn pause(&self) -> PlaybackStatus {
        self.with_stopped(|session| {
            session.player_mut().pause();
        })
        .await
    }

    pub async fn reset(&self) -> PlaybackStatus {
        self.with_stopped(|session| session.player_mut().reset()).await
    }

    /// Change speed. A running animation continues at the new period.
    pub async fn set_speed(&self, speed: u32) -> PlaybackStatus {
        let mut session = self.session.write().await;
        self.stop_timer().await;
        session.player_mut().set_speed(speed);
        if session.player().state() == PlaybackState::Playing {
            self.start_timer(&session).await;
        }
        PlaybackStatus::from(session.player())
    }

    /// Manual step. Pauses a running animation first.
    pub async fn step(&self, direction: Direction) -> PlaybackStatus {
        self.with_stopped(|session| {
            let player = session.player_mut();
            player.pause();
            match direction {
                Direction::Forward => player.step_forward(),
                Direction::Backward => player.step_backward(),
            };
        })
        .await
    }

    pub async fn seek(&self, index: usize) -> PlaybackStatus {
        self.with_stopped(|session| {
            let player = session.player_mut();
            player.pause();
            player.seek(index);
        })
        .await
    }

    pub async fn select_family(&self, family: Family) -> PlaybackStatus {
        self.with_stopped(|session| session.select_family(family))
            .await
    }

    pub async fn select_algorithm(&self, algorithm: Algorithm) -> Result<PlaybackStatus> {
        self.try_with_stopped(|session| session.select_algorithm(algorithm))
            .await
    }

    pub async fn new_data(&self) -> PlaybackStatus {
        self.with_stopped(|session| session.new_data()).await
    }

    pub async fn set_custom_array(&self, raw: &str) -> Result<PlaybackStatus> {
        self.try_with_stopped(|session| session.set_custom_array(raw))
            .await
    }

    pub async fn set_custom_strings(&self, text: &str, pattern: &str) -> Result<PlaybackStatus> {
        self.try_with_stopped(|session| session.set_custom_strings(text, pattern))
            .await
    }

    async fn with_stopped<F>(&self, change: F) -> PlaybackStatus
    where
        F: FnOnce(&mut Session),
    {
        let mut session = self.session.write().await;
        self.stop_timer().await;
        change(&mut session);
        settle(&mut session);
        PlaybackStatus::from(session.player())
    }

    async fn try_with_stopped<F>(&self, change: F) -> Result<PlaybackStatus>
    where
        F: FnOnce(&mut Session) -> Result<()>,
    {
        let mut session = self.session.write().await;
        self.stop_timer().await;
        let outcome = change(&mut session);
        settle(&mut session);
        outcome.map(|()| PlaybackStatus::from(session.player()))
    }

    async fn stop_timer(&self) {
        if let Some(handle) = self.timer.lock().await.take() {
            handle.abort();
            debug!("playback timer stopped");
        }
    }

    async fn start_timer(&self, session: &Session) {
        let player = session.player();
        let handle = spawn_ticker(self.session.clone(), player.period(), player.generation());
        debug!(period_ms = player.period().as_millis() as u64, "playback timer started");
        *self.timer.lock().await = Some(handle);
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.get_mut().take() {
            handle.abort();
        }
    }
}

// With the timer gone the player must not stay `Playing`.
fn settle(session: &mut Session) {
    session.player_mut().pause();
}

fn spawn_ticker(session: Arc<RwLock<Session>>, period: Duration, generation: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            let mut session = session.write().await;
            let player = session.player_mut();
            if player.generation() != generation {
                break;
            }
            player.tick();
            if player.state() != PlaybackState::Playing {
                debug!(index = player.index(), "playback finished");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisConfig;

    fn controller() -> Controller {
        let config = VisConfig::default().with_seed(5);
        Controller::new(Session::new(&config))
    }

    // Default speed 150 against a 300 ms ceiling.
    const PERIOD: Duration = Duration::from_millis(150);

    #[tokio::test(start_paused = true)]
    async fn ticks_advance_one_step_per_period() {
        let controller = controller();
        let status = controller.play().await;
        assert_eq!(status.state, PlaybackState::Playing);
        assert!(controller.is_timer_live().await);

        tokio::time::sleep(PERIOD * 3 + PERIOD / 2).await;
        assert_eq!(controller.status().await.index, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn runs_to_finish_and_releases_timer() {
        let controller = controller();
        let len = controller.status().await.len;
        controller.play().await;

        tokio::time::sleep(PERIOD * (len as u32 + 2)).await;
        let status = controller.status().await;
        assert_eq!(status.state, PlaybackState::Finished);
        assert_eq!(status.index, len - 1);
        assert!(!controller.is_timer_live().await);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_the_timer() {
        let controller = controller();
        controller.play().await;
        tokio::time::sleep(PERIOD * 2 + PERIOD / 2).await;

        let paused = controller.pause().await;
        assert_eq!(paused.state, PlaybackState::Paused);
        assert!(!controller.is_timer_live().await);

        tokio::time::sleep(PERIOD * 5).await;
        assert_eq!(controller.status().await.index, paused.index);
    }

    #[tokio::test(start_paused = true)]
    async fn data_change_cancels_playback() {
        let controller = controller();
        controller.play().await;
        tokio::time::sleep(PERIOD * 2 + PERIOD / 2).await;

        let status = controller.new_data().await;
        assert_eq!(status.index, 0);
        assert_eq!(status.state, PlaybackState::Ready);
        assert!(!controller.is_timer_live().await);

        tokio::time::sleep(PERIOD * 3).await;
        assert_eq!(controller.status().await.index, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn speed_change_restarts_timer_with_new_period() {
        let controller = controller();
        controller.play().await;

        // Fastest speed: 300 - 290 = 10 ms.
        let status = controller.set_speed(290).await;
        assert_eq!(status.period_ms, 10);
        assert_eq!(status.state, PlaybackState::Playing);
        assert!(controller.is_timer_live().await);

        tokio::time::sleep(Duration::from_millis(55)).await;
        assert_eq!(controller.status().await.index, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_step_pauses_playback() {
        let controller = controller();
        controller.play().await;
        tokio::time::sleep(PERIOD + PERIOD / 2).await;

        let status = controller.step(Direction::Forward).await;
        assert_eq!(status.index, 2);
        assert_eq!(status.state, PlaybackState::Paused);
        assert!(!controller.is_timer_live().await);

        let status = controller.step(Direction::Backward).await;
        assert_eq!(status.index, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_algorithm_keeps_session() {
        let controller = controller();
        let err = controller.select_algorithm(Algorithm::Prim).await;
        assert!(err.is_err());

        let status = controller.select_algorithm(Algorithm::MergeSort).await.unwrap();
        assert_eq!(status.state, PlaybackState::Ready);
        assert_eq!(controller.session().await.algorithm(), Algorithm::MergeSort);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_the_timer() {
        let controller = controller();
        let session = controller.session.clone();
        controller.play().await;
        tokio::time::sleep(PERIOD + PERIOD / 2).await;
        drop(controller);

        let index = session.read().await.player().index();
        tokio::time::sleep(PERIOD * 4).await;
        assert_eq!(session.read().await.player().index(), index);
    }

    #[tokio::test(start_paused = true)]
    async fn play_while_playing_keeps_timer() {
        let controller = controller();
        controller.play().await;
        tokio::time::sleep(PERIOD + PERIOD / 2).await;

        let status = controller.play().await;
        assert_eq!(status.state, PlaybackState::Playing);
        assert_eq!(status.index, 1);
        assert!(controller.is_timer_live().await);

        tokio::time::sleep(PERIOD * 2).await;
        assert_eq!(controller.status().await.index, 3);
    }

    async fn assert_timer_matches_state(controller: &Controller, after: &str) {
        let playing = controller.status().await.state == PlaybackState::Playing;
        assert_eq!(controller.is_timer_live().await, playing, "after {after}");
    }

    #[tokio::test(start_paused = true)]
    async fn playing_always_has_a_live_timer() {
        let controller = controller();
        assert_timer_matches_state(&controller, "new").await;

        controller.play().await;
        assert_timer_matches_state(&controller, "play").await;
        controller.play().await;
        assert_timer_matches_state(&controller, "second play").await;
        tokio::time::sleep(PERIOD + PERIOD / 2).await;
        assert_timer_matches_state(&controller, "tick").await;

        controller.set_speed(200).await;
        assert_timer_matches_state(&controller, "speed change").await;
        controller.pause().await;
        assert_timer_matches_state(&controller, "pause").await;
        controller.play().await;
        assert_timer_matches_state(&controller, "resume").await;
        controller.step(Direction::Forward).await;
        assert_timer_matches_state(&controller, "step").await;
        controller.play().await;
        controller.seek(2).await;
        assert_timer_matches_state(&controller, "seek").await;
        controller.play().await;
        controller.reset().await;
        assert_timer_matches_state(&controller, "reset").await;
        controller.play().await;
        controller.new_data().await;
        assert_timer_matches_state(&controller, "new data").await;
        controller.play().await;
        controller.select_family(Family::Graph).await;
        assert_timer_matches_state(&controller, "family change").await;
        controller.play().await;
        controller.select_algorithm(Algorithm::Prim).await.unwrap();
        assert_timer_matches_state(&controller, "algorithm change").await;

        let len = controller.status().await.len;
        controller.play().await;
        tokio::time::sleep(PERIOD * (len as u32 + 2)).await;
        assert_eq!(controller.status().await.state, PlaybackState::Finished);
        assert_timer_matches_state(&controller, "finish").await;
    }
}
