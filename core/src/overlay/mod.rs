//! Timed overlay lifecycle
//!
//! The overlay is a host-agnostic state machine. It never touches a clock
//! itself: every operation returns the [`TimerCommand`]s the host has to
//! enact (browser timeouts in the web app, tokio sleeps in the native
//! driver, a virtual queue in `timeline` for tests). Elapsed timers are fed back
//! through [`OverlayMachine::fire`].
//!
//! # Lifecycle
//!
//! ```text
//!  Initializing ──mount(true)──▶ Displaying ──duration / active=false──▶ FadingOut
//!       │                           ▲                                       │
//!       └──────mount(false)─────────┼──────────────────────────────────────▶│
//!                                   │                                   grace
//!                                   │                                       ▼
//!                                   └─────────active false→true──────── Removed
//! ```
//!
//! The entrance timer runs alongside `Displaying` and only toggles the
//! entrance animation flag.

mod machine;


pub use machine::{
    DEFAULT_DURATION, ENTRANCE_DELAY, FADE_GRACE, OverlayMachine, OverlayOptions, OverlaySnapshot,
    Phase, TimerCommand, TimerKind, TimerToken,
};
