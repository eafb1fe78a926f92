//! Section transition state machine.
//!
//! Navigating between sections plays a three-beat overlay animation: fade
//! the overlay in, switch sections under it, hold, fade back out. The site
//! originally drove this with nested timeouts; here it is an explicit timed
//! state machine so the sequence is testable with a hand-fed clock and the
//! durations live in [`TransitionConfig`].
//!
//! ```text
//! Idle --begin--> FadingIn --fade_in_ms--> Holding --hold_ms--> FadingOut
//!   ^                        (section switches here)                |
//!   +------------------------- fade_out_ms -----------------------+
//! ```
//!
//! `begin` while a transition is running is refused — the user can't stack
//! navigations. Callers pass the current instant into `begin` and `tick`;
//! nothing in here reads a real clock.

use std::time::{Duration, Instant};

use crate::config::TransitionConfig;

/// The destination that never switches sections — it's already under the
/// overlay when the transition starts.
pub const HOME_SECTION: &str = "home";

/// Where the machine is in the overlay animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FadingIn,
    Holding,
    FadingOut,
}

/// Side effects the caller must realize, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hide every section except the named one, update the active nav state.
    SwitchSection(String),
    /// Start the overlay fade-out animation.
    BeginFadeOut,
    /// Transition complete: clear overlay classes, accept input again.
    Finished,
}

/// Timed state machine for the section transition overlay.
#[derive(Debug)]
pub struct TransitionMachine {
    config: TransitionConfig,
    phase: Phase,
    phase_started: Option<Instant>,
    destination: Option<String>,
}

impl TransitionMachine {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            phase_started: None,
            destination: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Start a transition toward `destination`.
    ///
    /// Returns `true` and enters `FadingIn` (caller shows the overlay) when
    /// idle; returns `false` while a transition is already running.
    pub fn begin(&mut self, destination: &str, now: Instant) -> bool {
        if self.is_transitioning() {
            return false;
        }
        self.phase = Phase::FadingIn;
        self.phase_started = Some(now);
        self.destination = Some(destination.to_string());
        true
    }

    /// Advance the machine to `now`, returning the effects that became due.
    ///
    /// A single call crosses as many phase boundaries as the elapsed time
    /// covers, emitting their effects in order.
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        loop {
            let Some(started) = self.phase_started else {
                break;
            };
            let due = match self.phase {
                Phase::Idle => break,
                Phase::FadingIn => Duration::from_millis(self.config.fade_in_ms),
                Phase::Holding => Duration::from_millis(self.config.hold_ms),
                Phase::FadingOut => Duration::from_millis(self.config.fade_out_ms),
            };
            if now.duration_since(started) < due {
                break;
            }
            let boundary = started + due;
            match self.phase {
                Phase::Idle => unreachable!("handled above"),
                Phase::FadingIn => {
                    let destination = self.destination.clone().unwrap_or_default();
                    if destination != HOME_SECTION {
                        effects.push(Effect::SwitchSection(destination));
                    }
                    self.phase = Phase::Holding;
                    self.phase_started = Some(boundary);
                }
                Phase::Holding => {
                    effects.push(Effect::BeginFadeOut);
                    self.phase = Phase::FadingOut;
                    self.phase_started = Some(boundary);
                }
                Phase::FadingOut => {
                    effects.push(Effect::Finished);
                    self.phase = Phase::Idle;
                    self.phase_started = None;
                    self.destination = None;
                }
            }
        }
        effects
    }
}
