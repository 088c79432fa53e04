//! Real-time playback driver.
//!
//! Runs a [`MatchClock`] on a background thread. The command channel's
//! `recv_timeout` doubles as the timer: it waits for the next tick and
//! wakes early when a control command arrives. Dropping the
//! [`PlaybackHandle`] cancels the pending tick and joins the thread.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::debug;

use super::clock::{LiveSnapshot, MatchClock, PlaybackSpeed};
use crate::config::PlaybackConfig;
use crate::models::MatchTimeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Pause,
    Resume,
    SetSpeed(PlaybackSpeed),
    SkipToEnd,
    Stop,
}

pub struct LivePlayback;

impl LivePlayback {
    /// Start playing `timeline`; snapshots are published on `tx`, starting
    /// with the minute-0 state.
    pub fn spawn(
        timeline: Arc<MatchTimeline>,
        config: &PlaybackConfig,
        speed: PlaybackSpeed,
        tx: Sender<LiveSnapshot>,
    ) -> PlaybackHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let base_tick = config.base_tick();
        let thread = thread::spawn(move || {
            let mut clock = MatchClock::with_base_tick(base_tick, speed);
            clock.start(timeline);
            run(clock, cmd_rx, tx);
        });
        PlaybackHandle { cmd_tx, thread: Some(thread) }
    }
}

fn run(mut clock: MatchClock, cmd_rx: Receiver<PlaybackCommand>, tx: Sender<LiveSnapshot>) {
    let publish = |snapshot: Option<LiveSnapshot>| match snapshot {
        Some(s) => tx.send(s).is_ok(),
        None => true,
    };

    if !publish(clock.snapshot()) {
        return;
    }

    loop {
        if clock.is_finished() {
            break;
        }

        let command = match clock.time_until_next_tick() {
            Some(wait) => {
                let waited_from = Instant::now();
                match cmd_rx.recv_timeout(wait) {
                    Ok(cmd) => {
                        let ticks = clock.advance(waited_from.elapsed());
                        if !ticks.into_iter().all(|s| publish(Some(s))) {
                            break;
                        }
                        cmd
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        let ticks = clock.advance(wait);
                        if !ticks.into_iter().all(|s| publish(Some(s))) {
                            break;
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            // Paused: block until told otherwise.
            None => match cmd_rx.recv() {
                Ok(cmd) => cmd,
                Err(_) => break,
            },
        };

        let published = match command {
            PlaybackCommand::Pause => clock.pause().then(|| clock.snapshot()).flatten(),
            PlaybackCommand::Resume => clock.resume().then(|| clock.snapshot()).flatten(),
            PlaybackCommand::SetSpeed(speed) => {
                clock.set_speed(speed);
                clock.snapshot()
            }
            PlaybackCommand::SkipToEnd => clock.skip_to_end(),
            PlaybackCommand::Stop => break,
        };
        if !publish(published) {
            break;
        }
    }

    clock.stop();
    debug!("playback thread exiting");
}

/// Control surface of a running playback. Cancels on drop.
pub struct PlaybackHandle {
    cmd_tx: Sender<PlaybackCommand>,
    thread: Option<JoinHandle<()>>,
}

impl PlaybackHandle {
    fn send(&self, cmd: PlaybackCommand) {
        // The thread exits on its own at full time; late commands are moot.
        let _ = self.cmd_tx.send(cmd);
    }

    pub fn pause(&self) {
        self.send(PlaybackCommand::Pause);
    }

    pub fn resume(&self) {
        self.send(PlaybackCommand::Resume);
    }

    pub fn set_speed(&self, speed: PlaybackSpeed) {
        self.send(PlaybackCommand::SetSpeed(speed));
    }

    pub fn skip_to_end(&self) {
        self.send(PlaybackCommand::SkipToEnd);
    }

    /// Stop playback and wait for the driver thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Wait for playback to reach full time on its own.
    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    fn shutdown(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.send(PlaybackCommand::Stop);
            let _ = thread.join();
        }
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
