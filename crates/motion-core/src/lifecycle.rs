//! Capability gating and mount/unmount ordering.

use crate::config::{EffectConfig, ReducedMotionPolicy};

/// What the host reported once, before anything was allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub fine_pointer: bool,
    pub reduced_motion: bool,
    /// Host could hand out a 2D drawing context.
    pub canvas_2d: bool,
}

/// Immutable per-instance behavior derived from capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionMode {
    /// Render nothing and register no listeners.
    Disabled,
    /// Paint once; repaint on resize only.
    Static,
    /// Tick, but without drift, impulses or streaks.
    Calm,
    Full,
}

impl MotionMode {
    pub fn resolve(caps: &Capabilities, config: &EffectConfig) -> Self {
        if !caps.canvas_2d {
            return MotionMode::Disabled;
        }
        if config.requires_fine_pointer && !caps.fine_pointer {
            return MotionMode::Disabled;
        }
        if caps.reduced_motion {
            return match config.reduced_motion {
                ReducedMotionPolicy::StaticFrame => MotionMode::Static,
                ReducedMotionPolicy::Calm => MotionMode::Calm,
            };
        }
        MotionMode::Full
    }

    #[inline]
    pub fn renders(self) -> bool {
        self != MotionMode::Disabled
    }

    #[inline]
    pub fn ticks(self) -> bool {
        matches!(self, MotionMode::Calm | MotionMode::Full)
    }

    /// Velocity-driven motion: drift, pointer impulses, streaks.
    #[inline]
    pub fn dynamics(self) -> bool {
        self == MotionMode::Full
    }

    #[inline]
    pub fn listens_to_input(self) -> bool {
        self == MotionMode::Full
    }

    #[inline]
    pub fn listens_to_resize(self) -> bool {
        self.renders()
    }
}

/// Host actions needed to tear an instance down, in the order they must run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeardownStep {
    RemoveListeners,
    CancelFrame,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Detached,
    Mounted,
    Unmounted,
}

/// Tracks whether an instance is live and hands out the teardown order.
#[derive(Clone, Debug)]
pub struct LifecycleGate {
    mode: MotionMode,
    phase: Phase,
}

impl LifecycleGate {
    pub fn new(caps: &Capabilities, config: &EffectConfig) -> Self {
        Self {
            mode: MotionMode::resolve(caps, config),
            phase: Phase::Detached,
        }
    }

    #[inline]
    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    /// Returns false when there is nothing to mount or it already happened.
    pub fn mount(&mut self) -> bool {
        if self.phase != Phase::Detached || !self.mode.renders() {
            return false;
        }
        self.phase = Phase::Mounted;
        true
    }

    /// Listeners go first so no late event writes into state that is about
    /// to be dropped. Empty if the instance never mounted or is already gone.
    pub fn unmount(&mut self) -> &'static [TeardownStep] {
        if self.phase != Phase::Mounted {
            return &[];
        }
        self.phase = Phase::Unmounted;
        &[TeardownStep::RemoveListeners, TeardownStep::CancelFrame]
    }
}
