pub mod config;
pub mod overlay;
pub mod timers;

#[cfg(any(test, feature = "test-util"))]
pub mod timeline;

#[cfg(feature = "runtime")]
pub mod driver;

// Re-exports for convenience
pub use config::{ConfigError, load_site_config, parse_site_config};
pub use overlay::{
    DEFAULT_DURATION, ENTRANCE_DELAY, FADE_GRACE, OverlayMachine, OverlayOptions, OverlaySnapshot,
    Phase, TimerCommand, TimerKind, TimerToken,
};
pub use timers::{TimerHandle, TimerSlots};
