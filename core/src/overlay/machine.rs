use std::time::Duration;

use ideal_types::{DEFAULT_SPLASH_DURATION_MS, clamp_duration_ms};

/// Delay between mount and the start of the entrance animation.
pub const ENTRANCE_DELAY: Duration = Duration::from_millis(300);

/// Time the fade-out transition is given before the overlay is removed.
pub const FADE_GRACE: Duration = Duration::from_millis(500);

/// Display duration when the caller does not specify one.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(DEFAULT_SPLASH_DURATION_MS);

// ─────────────────────────────────────────────────────────────────────────────
// Timers
// ─────────────────────────────────────────────────────────────────────────────

/// The three one-shot timers an overlay can have pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Mount → entrance animation
    Entrance,
    /// Displaying → fade-out
    Duration,
    /// Fade-out → removal
    Grace,
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [Self::Entrance, Self::Duration, Self::Grace];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Entrance => 0,
            Self::Duration => 1,
            Self::Grace => 2,
        }
    }
}

/// Identifies one scheduled timer. A token that no longer matches the
/// machine's pending timer of the same kind is stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    generation: u64,
}

impl TimerToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Work the host must perform after a machine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start a one-shot timer and call [`OverlayMachine::fire`] with `token` when it elapses.
    /// Replaces any timer of the same kind still held by the host.
    Schedule { token: TimerToken, after: Duration },
    /// Drop the pending timer of this kind without firing it.
    Cancel { kind: TimerKind },
}

// ─────────────────────────────────────────────────────────────────────────────
// State
// ─────────────────────────────────────────────────────────────────────────────

/// Overlay configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayOptions {
    pub duration: Duration,
}

impl OverlayOptions {
    /// Build options from a signed millisecond count, clamping negatives to zero.
    pub fn from_millis(ms: i64) -> Self {
        Self {
            duration: Duration::from_millis(clamp_duration_ms(ms)),
        }
    }

    /// `None` falls back to [`DEFAULT_DURATION`].
    pub fn from_optional_millis(ms: Option<i64>) -> Self {
        ms.map(Self::from_millis).unwrap_or_default()
    }
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// First render has not completed
    #[default]
    Initializing,
    /// Fully opaque, counting down the display duration
    Displaying,
    /// Transitioning to zero opacity, ignores pointer input
    FadingOut,
    /// Produces no output
    Removed,
}

/// Read-only view of an overlay's per-mount UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySnapshot {
    pub phase: Phase,
    pub mount_ready: bool,
    pub entrance_active: bool,
    pub visible: bool,
    pub exiting: bool,
}

impl OverlaySnapshot {
    /// Whether the host should emit any markup at all.
    pub fn renders(&self) -> bool {
        self.mount_ready && self.visible
    }
}

impl Default for OverlaySnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Initializing,
            mount_ready: false,
            entrance_active: false,
            visible: true,
            exiting: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Machine
// ─────────────────────────────────────────────────────────────────────────────

/// Show / wait / fade / remove lifecycle of one overlay instance.
#[derive(Debug, Clone)]
pub struct OverlayMachine {
    duration: Duration,
    phase: Phase,
    /// Last activation value seen, used for edge detection
    activation: bool,
    entrance_active: bool,
    torn_down: bool,
    next_generation: u64,
    pending: [Option<TimerToken>; 3],
}

impl OverlayMachine {
    pub fn new(options: OverlayOptions) -> Self {
        Self {
            duration: options.duration,
            phase: Phase::Initializing,
            activation: false,
            entrance_active: false,
            torn_down: false,
            next_generation: 0,
            pending: [None; 3],
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Pointer input is only accepted while fully displayed.
    pub fn is_interactive(&self) -> bool {
        !self.torn_down && self.phase == Phase::Displaying
    }

    /// Kinds of timers the machine is currently waiting on.
    pub fn pending_timers(&self) -> impl Iterator<Item = TimerKind> + '_ {
        self.pending.iter().flatten().map(|token| token.kind)
    }

    pub fn snapshot(&self) -> OverlaySnapshot {
        let exiting = matches!(self.phase, Phase::FadingOut | Phase::Removed);
        OverlaySnapshot {
            phase: self.phase,
            mount_ready: self.phase != Phase::Initializing,
            entrance_active: self.entrance_active,
            visible: !self.torn_down && self.phase != Phase::Removed,
            exiting,
        }
    }

    /// First render pass completed.
    ///
    /// Ignored unless the machine is still initializing.
    pub fn mount(&mut self, activation: bool) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if self.torn_down || self.phase != Phase::Initializing {
            return out;
        }

        self.activation = activation;
        if activation {
            self.enter_displaying(&mut out);
        } else {
            self.begin_fade(&mut out);
        }
        out
    }

    /// Feed the current value of the activation input.
    ///
    /// Only a `true → false` change while displaying starts the fade early,
    /// and only a `false → true` change after fading restarts the lifecycle.
    /// Repeating the previous value never does anything.
    pub fn set_activation(&mut self, activation: bool) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if self.torn_down {
            return out;
        }

        let previous = std::mem::replace(&mut self.activation, activation);
        match (self.phase, previous, activation) {
            // Recorded, applied by mount
            (Phase::Initializing, _, _) => {}
            (Phase::Displaying, _, false) => {
                tracing::debug!("overlay deactivated early, fading out");
                self.begin_fade(&mut out);
            }
            (Phase::FadingOut | Phase::Removed, false, true) => {
                tracing::debug!(phase = ?self.phase, "overlay reactivated, restarting lifecycle");
                self.cancel_all(&mut out);
                self.enter_displaying(&mut out);
            }
            _ => {}
        }
        out
    }

    /// Change the display duration. While displaying, the countdown restarts
    /// from now with the new value.
    pub fn set_duration(&mut self, duration: Duration) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if self.torn_down || duration == self.duration {
            return out;
        }

        self.duration = duration;
        if self.phase == Phase::Displaying {
            self.cancel(TimerKind::Duration, &mut out);
            self.schedule(TimerKind::Duration, duration, &mut out);
        }
        out
    }

    /// A scheduled timer elapsed.
    pub fn fire(&mut self, token: TimerToken) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if self.torn_down {
            tracing::trace!(?token, "timer fired after teardown, ignoring");
            return out;
        }

        let slot = &mut self.pending[token.kind.index()];
        if *slot != Some(token) {
            tracing::trace!(?token, "stale overlay timer, ignoring");
            return out;
        }
        *slot = None;

        match token.kind {
            TimerKind::Entrance => {
                if self.phase == Phase::Displaying {
                    self.entrance_active = true;
                }
            }
            TimerKind::Duration => {
                if self.phase == Phase::Displaying {
                    tracing::debug!(duration_ms = self.duration.as_millis() as u64, "overlay duration elapsed");
                    self.begin_fade(&mut out);
                }
            }
            TimerKind::Grace => {
                if self.phase == Phase::FadingOut {
                    tracing::debug!("overlay removed");
                    self.phase = Phase::Removed;
                }
            }
        }
        out
    }

    /// Release every pending timer. Safe to call more than once; after the
    /// first call all other operations are no-ops.
    pub fn teardown(&mut self) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if self.torn_down {
            return out;
        }
        self.torn_down = true;
        self.cancel_all(&mut out);
        out
    }

    fn enter_displaying(&mut self, out: &mut Vec<TimerCommand>) {
        self.phase = Phase::Displaying;
        self.entrance_active = false;
        self.schedule(TimerKind::Entrance, ENTRANCE_DELAY, out);
        self.schedule(TimerKind::Duration, self.duration, out);
    }

    fn begin_fade(&mut self, out: &mut Vec<TimerCommand>) {
        self.phase = Phase::FadingOut;
        self.cancel(TimerKind::Entrance, out);
        self.cancel(TimerKind::Duration, out);
        self.schedule(TimerKind::Grace, FADE_GRACE, out);
    }

    fn schedule(&mut self, kind: TimerKind, after: Duration, out: &mut Vec<TimerCommand>) {
        self.next_generation += 1;
        let token = TimerToken {
            kind,
            generation: self.next_generation,
        };
        self.pending[kind.index()] = Some(token);
        out.push(TimerCommand::Schedule { token, after });
    }

    fn cancel(&mut self, kind: TimerKind, out: &mut Vec<TimerCommand>) {
        if self.pending[kind.index()].take().is_some() {
            out.push(TimerCommand::Cancel { kind });
        }
    }

    fn cancel_all(&mut self, out: &mut Vec<TimerCommand>) {
        for kind in TimerKind::ALL {
            self.cancel(kind, out);
        }
    }
}

impl Default for OverlayMachine {
    fn default() -> Self {
        Self::new(OverlayOptions::default())
    }
}
