//! Full-screen loading overlay shown while the site is "coming soon".
//!
//! The lifecycle lives in [`OverlayMachine`]; this component only binds it to
//! browser timers. Every timer is a Dioxus task awaiting `setTimeout` (via
//! `gloo-timers`), and the task handles are kept in [`TimerSlots`] so a
//! superseded timer is cancelled on the transition that replaces it and
//! everything left is cancelled on unmount.

use std::time::Duration;

use dioxus::dioxus_core::Task;
use dioxus::prelude::*;
use dioxus_logger::tracing;
use ideal_core::{
    OverlayMachine, OverlayOptions, OverlaySnapshot, Phase, TimerCommand, TimerHandle,
    TimerSlots, TimerToken,
};
use ideal_types::{LogoConfig, SocialConfig, SplashConfig};

use super::SocialLinksRow;

const SPLASH_CSS: Asset = asset!("/assets/splash.css");

/// A pending `setTimeout` wrapped in a scoped task
struct BrowserTimer(Task);

impl TimerHandle for BrowserTimer {
    fn cancel(self) {
        self.0.cancel();
    }
}

/// Per-instance state. All fields are owned by the component scope.
#[derive(Clone, Copy)]
struct OverlayHost {
    machine: CopyValue<OverlayMachine>,
    timers: CopyValue<TimerSlots<BrowserTimer>>,
    snapshot: Signal<OverlaySnapshot>,
}

impl OverlayHost {
    fn new(options: OverlayOptions) -> Self {
        Self {
            machine: CopyValue::new(OverlayMachine::new(options)),
            timers: CopyValue::new(TimerSlots::new()),
            snapshot: Signal::new(OverlaySnapshot::default()),
        }
    }

    /// Push the current props into the machine. The first call mounts it.
    fn sync(mut self, active: bool, duration: Duration) {
        let commands = {
            let mut machine = self.machine.write();
            if machine.phase() == Phase::Initializing {
                let mut commands = machine.set_duration(duration);
                commands.extend(machine.mount(active));
                tracing::debug!(active, duration_ms = duration.as_millis() as u64, "Splash mounted");
                commands
            } else {
                let mut commands = machine.set_duration(duration);
                commands.extend(machine.set_activation(active));
                commands
            }
        };
        self.enact(commands);
    }

    fn fire(mut self, token: TimerToken) {
        if let Ok(mut timers) = self.timers.try_write() {
            timers.release(token);
        }
        let commands = match self.machine.try_write() {
            Ok(mut machine) => machine.fire(token),
            Err(_) => return,
        };
        self.enact(commands);
    }

    fn teardown(mut self) {
        if let Ok(mut machine) = self.machine.try_write() {
            machine.teardown();
        }
        if let Ok(mut timers) = self.timers.try_write() {
            timers.cancel_all();
        }
    }

    fn enact(mut self, commands: Vec<TimerCommand>) {
        if !commands.is_empty() {
            let host = self;
            if let Ok(mut timers) = self.timers.try_write() {
                timers.apply(commands, move |token, after| {
                    let task = spawn(async move {
                        sleep(after).await;
                        host.fire(token);
                    });
                    BrowserTimer(task)
                });
            }
        }
        if let Ok(machine) = self.machine.try_read() {
            let next = machine.snapshot();
            if *self.snapshot.peek() != next {
                self.snapshot.set(next);
            }
        }
    }
}

/// Longest delay `setTimeout` honours. Larger values wrap negative and fire at once.
#[cfg(any(target_arch = "wasm32", test))]
const MAX_TIMEOUT_MS: u128 = i32::MAX as u128;

/// Split a delay into `setTimeout`-sized steps. Always yields at least one step.
#[cfg(any(target_arch = "wasm32", test))]
fn timeout_steps(after: Duration) -> impl Iterator<Item = u32> {
    let mut remaining = Some(after.as_millis());
    std::iter::from_fn(move || {
        let left = remaining?;
        let step = left.min(MAX_TIMEOUT_MS);
        remaining = (left > step).then_some(left - step);
        Some(step as u32)
    })
}

#[cfg(target_arch = "wasm32")]
async fn sleep(after: Duration) {
    for step in timeout_steps(after) {
        gloo_timers::future::TimeoutFuture::new(step).await;
    }
}

// No browser event loop off wasm (server rendering, tests). Timers stay
// pending until cancelled.
#[cfg(not(target_arch = "wasm32"))]
async fn sleep(_after: Duration) {
    std::future::pending::<()>().await
}

/// CSS classes for the overlay root.
///
/// `is-exiting` fades to zero opacity and disables pointer events.
pub fn overlay_class(snapshot: &OverlaySnapshot) -> String {
    let mut class = String::from("splash-overlay");
    if snapshot.entrance_active {
        class.push_str(" is-entered");
    }
    if snapshot.exiting {
        class.push_str(" is-exiting");
    }
    class
}

/// Timed splash overlay.
///
/// Shows for `duration_ms` (default 3000) while `active`, then fades out and
/// removes itself. Toggling `active` off fades immediately; toggling it back
/// on after the fade restarts the whole sequence.
#[component]
pub fn LoadingScreen(
    active: bool,
    duration_ms: Option<i64>,
    logo: LogoConfig,
    content: SplashConfig,
    social: SocialConfig,
) -> Element {
    let host = use_hook(|| OverlayHost::new(OverlayOptions::from_optional_millis(duration_ms)));

    use_effect(use_reactive!(|(active, duration_ms)| {
        let duration = OverlayOptions::from_optional_millis(duration_ms).duration;
        host.sync(active, duration);
    }));

    use_drop(move || host.teardown());

    let snapshot = (host.snapshot)();
    if !snapshot.renders() {
        return rsx! {};
    }

    let class = overlay_class(&snapshot);
    let busy = !snapshot.exiting;
    let links = social.visible_links();

    rsx! {
        document::Stylesheet { href: SPLASH_CSS }

        div {
            class: "{class}",
            role: "status",
            aria_live: "polite",
            aria_busy: "{busy}",

            div { class: "splash-stage",
                // Animated background sweeps
                div { class: "splash-sweeps",
                    div { class: "splash-sweep" }
                    div { class: "splash-light" }
                }

                div { class: "splash-content",
                    div { class: "splash-spacer" }
                    div { class: "splash-halo" }

                    div { class: "splash-card",
                        div { class: "splash-logo",
                            img {
                                class: "splash-logo-img",
                                src: "{logo.src}",
                                alt: "{logo.alt}",
                            }
                            svg {
                                class: "splash-check",
                                view_box: "0 0 24 24",
                                fill: "none",
                                stroke: "currentColor",
                                stroke_width: "2.5",
                                path {
                                    d: "M20 6L9 17L4 12",
                                    stroke_linecap: "round",
                                    stroke_linejoin: "round",
                                }
                            }
                            div { class: "splash-logo-glow" }
                        }
                    }

                    div { class: "splash-copy",
                        p { class: "splash-message", "{content.message}" }
                        p { class: "splash-tagline", "{content.tagline}" }
                    }

                    div { class: "splash-progress",
                        div { class: "splash-track",
                            div { class: "splash-bar" }
                        }
                        p { class: "splash-status", "{content.status_text}" }
                    }

                    if !links.is_empty() {
                        SocialLinksRow { links }
                    }

                    div { class: "splash-spacer" }
                }

                div { class: "splash-orb splash-orb-a" }
                div { class: "splash-orb splash-orb-b" }
                div { class: "splash-orb splash-orb-c" }
            }
        }
    }
}
