//! Headless overlay driver for native targets.
//!
//! Runs an [`OverlayMachine`] inside a single tokio task. Timers are
//! `tokio::time::sleep` tasks whose abort handles live in [`TimerSlots`],
//! so shutting the driver down (or dropping it) aborts every pending timer.
//! State changes are published on a `watch` channel.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::{AbortHandle, JoinHandle};

use crate::overlay::{OverlayMachine, OverlayOptions, OverlaySnapshot, TimerCommand, TimerToken};
use crate::timers::{TimerHandle, TimerSlots};

enum DriverMessage {
    SetActivation(bool),
    SetDuration(Duration),
    Shutdown,
}

struct SleepTimer(AbortHandle);

impl TimerHandle for SleepTimer {
    fn cancel(self) {
        self.0.abort();
    }
}

pub struct OverlayDriver {
    tx: mpsc::UnboundedSender<DriverMessage>,
    state: watch::Receiver<OverlaySnapshot>,
    task: Option<JoinHandle<()>>,
}

impl OverlayDriver {
    /// Mount a new overlay with the given initial activation.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(options: OverlayOptions, activation: bool) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(OverlaySnapshot::default());
        let task = tokio::spawn(run(OverlayMachine::new(options), activation, rx, state_tx));

        Self {
            tx,
            state,
            task: Some(task),
        }
    }

    pub fn set_activation(&self, activation: bool) {
        let _ = self.tx.send(DriverMessage::SetActivation(activation));
    }

    pub fn set_duration(&self, duration: Duration) {
        let _ = self.tx.send(DriverMessage::SetDuration(duration));
    }

    /// Latest published state.
    pub fn snapshot(&self) -> OverlaySnapshot {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<OverlaySnapshot> {
        self.state.clone()
    }

    /// Tear the overlay down and wait for the driver task to finish.
    ///
    /// Returns the final snapshot.
    pub async fn shutdown(mut self) -> OverlaySnapshot {
        let _ = self.tx.send(DriverMessage::Shutdown);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "overlay driver task ended abnormally");
            }
        }
        *self.state.borrow()
    }
}

impl Drop for OverlayDriver {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run(
    mut machine: OverlayMachine,
    activation: bool,
    mut rx: mpsc::UnboundedReceiver<DriverMessage>,
    state_tx: watch::Sender<OverlaySnapshot>,
) {
    let (fired_tx, mut fired_rx) = mpsc::unbounded_channel::<TimerToken>();
    let mut slots: TimerSlots<SleepTimer> = TimerSlots::new();

    let spawn_sleep = |token: TimerToken, after: Duration| {
        let fired_tx = fired_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = fired_tx.send(token);
        });
        SleepTimer(handle.abort_handle())
    };

    let commands = machine.mount(activation);
    slots.apply(commands, &spawn_sleep);
    publish(&state_tx, &machine);

    loop {
        let commands: Vec<TimerCommand> = tokio::select! {
            message = rx.recv() => match message {
                Some(DriverMessage::SetActivation(active)) => machine.set_activation(active),
                Some(DriverMessage::SetDuration(duration)) => machine.set_duration(duration),
                Some(DriverMessage::Shutdown) | None => {
                    let commands = machine.teardown();
                    slots.apply(commands, &spawn_sleep);
                    publish(&state_tx, &machine);
                    tracing::debug!("overlay driver shut down");
                    break;
                }
            },
            Some(token) = fired_rx.recv() => {
                slots.release(token);
                machine.fire(token)
            }
        };
        slots.apply(commands, &spawn_sleep);
        publish(&state_tx, &machine);
    }
}

fn publish(state_tx: &watch::Sender<OverlaySnapshot>, machine: &OverlayMachine) {
    state_tx.send_if_modified(|current| {
        let next = machine.snapshot();
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::Phase;
    use tokio::time::Instant;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn follows_splash_schedule() {
        let start = Instant::now();
        let driver = OverlayDriver::spawn(OverlayOptions::from_millis(3500), true);
        let mut state = driver.subscribe();

        state.wait_for(|s| s.phase == Phase::Displaying).await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);

        state.wait_for(|s| s.entrance_active).await.unwrap();
        assert_eq!(start.elapsed(), ms(300));

        state.wait_for(|s| s.exiting).await.unwrap();
        assert_eq!(start.elapsed(), ms(3500));

        state.wait_for(|s| s.phase == Phase::Removed).await.unwrap();
        assert_eq!(start.elapsed(), ms(4000));
        assert!(!driver.snapshot().renders());
    }

    #[tokio::test(start_paused = true)]
    async fn early_deactivation_fades_at_that_moment() {
        let start = Instant::now();
        let driver = OverlayDriver::spawn(OverlayOptions::from_millis(3000), true);
        let mut state = driver.subscribe();

        tokio::time::sleep(ms(1000)).await;
        driver.set_activation(false);

        state.wait_for(|s| s.exiting).await.unwrap();
        assert_eq!(start.elapsed(), ms(1000));

        state.wait_for(|s| s.phase == Phase::Removed).await.unwrap();
        assert_eq!(start.elapsed(), ms(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_timers() {
        let driver = OverlayDriver::spawn(OverlayOptions::from_millis(3500), true);
        let mut state = driver.subscribe();
        state.wait_for(|s| s.phase == Phase::Displaying).await.unwrap();

        let last = driver.shutdown().await;
        assert!(!last.renders());
        assert_eq!(last.phase, Phase::Displaying);

        tokio::time::sleep(ms(10_000)).await;
        let final_state = *state.borrow();
        assert_eq!(final_state.phase, Phase::Displaying);
        assert!(!final_state.entrance_active);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_driver_stops_timers() {
        let driver = OverlayDriver::spawn(OverlayOptions::from_millis(3500), true);
        let mut state = driver.subscribe();
        state.wait_for(|s| s.phase == Phase::Displaying).await.unwrap();

        drop(driver);
        tokio::time::sleep(ms(10_000)).await;

        assert_eq!(state.borrow().phase, Phase::Displaying);
        assert!(state.has_changed().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn inactive_mount_goes_straight_to_removal() {
        let start = Instant::now();
        let driver = OverlayDriver::spawn(OverlayOptions::default(), false);
        let mut state = driver.subscribe();

        state.wait_for(|s| s.phase == Phase::Removed).await.unwrap();
        assert_eq!(start.elapsed(), ms(500));
        assert!(!state.borrow().entrance_active);
    }
}
