//! A configured set of gestures driven by one input pipeline.
//!
//! The profile owns the shared clock, the binding scheduler, and the device
//! density scale, and builds gestures from validated configuration. The
//! binding itself stays opaque: the profile receives it ready-made and only
//! ever hands it to the gesture that will press/release it.

use crate::config::{ConfigError, PinchConfig, SwipeConfig, TapConfig};
use crate::dispatcher::GestureDispatcher;
use crate::gesture::Gesture;
use crate::pinch::PinchGesture;
use crate::swipe::SwipeGesture;
use crate::tap::TapGesture;
use std::rc::Rc;
use tacton_core::{
    BindingScheduler, LifecycleObserver, MonotonicClock, SharedBinding, SharedClock, TouchFrame,
};

/// One active gesture profile: configuration in, frames in, lifecycle
/// notifications and binding invocations out.
pub struct Profile {
    dispatcher: GestureDispatcher,
    clock: SharedClock,
    scheduler: BindingScheduler,
    lines_per_mm: f32,
}

impl Profile {
    /// Create a profile with an injected clock and scheduler. Raw geometric
    /// thresholds are multiplied by `lines_per_mm` before they reach the
    /// state machines.
    #[must_use]
    pub fn new(clock: SharedClock, scheduler: BindingScheduler, lines_per_mm: f32) -> Self {
        Self {
            dispatcher: GestureDispatcher::new(),
            clock,
            scheduler,
            lines_per_mm,
        }
    }

    /// Create a profile with the wall clock and a worker-thread scheduler.
    #[must_use]
    pub fn with_defaults(lines_per_mm: f32) -> Self {
        Self::new(
            Rc::new(MonotonicClock::new()),
            BindingScheduler::spawn(),
            lines_per_mm,
        )
    }

    /// Add a tap or hold.
    pub fn add_tap(
        &mut self,
        config: TapConfig,
        binding: Option<SharedBinding>,
        observers: Vec<LifecycleObserver>,
    ) -> Result<(), ConfigError> {
        let mut gesture = TapGesture::new(
            config,
            Rc::clone(&self.clock),
            self.scheduler.clone(),
            binding,
        )?;
        for observer in observers {
            gesture.lifecycle_mut().observe(observer);
        }
        self.dispatcher.register(Box::new(gesture));
        Ok(())
    }

    /// Add a swipe or pan. The threshold is density-scaled.
    pub fn add_swipe(
        &mut self,
        config: SwipeConfig,
        binding: Option<SharedBinding>,
        observers: Vec<LifecycleObserver>,
    ) -> Result<(), ConfigError> {
        let mut gesture = SwipeGesture::new(
            config.scaled(self.lines_per_mm),
            Rc::clone(&self.clock),
            self.scheduler.clone(),
            binding,
        )?;
        for observer in observers {
            gesture.lifecycle_mut().observe(observer);
        }
        self.dispatcher.register(Box::new(gesture));
        Ok(())
    }

    /// Add a pinch or rotation. The distance threshold is density-scaled.
    pub fn add_pinch(
        &mut self,
        config: PinchConfig,
        binding: Option<SharedBinding>,
        observers: Vec<LifecycleObserver>,
    ) -> Result<(), ConfigError> {
        let mut gesture = PinchGesture::new(
            config.scaled(self.lines_per_mm),
            self.scheduler.clone(),
            binding,
        )?;
        for observer in observers {
            gesture.lifecycle_mut().observe(observer);
        }
        self.dispatcher.register(Box::new(gesture));
        Ok(())
    }

    /// Register a pre-built gesture.
    pub fn register(&mut self, gesture: Box<dyn Gesture>) {
        self.dispatcher.register(gesture);
    }

    /// Drop every configured gesture, keeping clock and scheduler.
    pub fn clear(&mut self) {
        self.dispatcher.clear();
    }

    /// Feed one input frame to the profile's gestures.
    pub fn on_frame(&mut self, frame: &TouchFrame) {
        self.dispatcher.on_frame(frame);
    }

    /// The underlying dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &GestureDispatcher {
        &self.dispatcher
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("dispatcher", &self.dispatcher)
            .field("lines_per_mm", &self.lines_per_mm)
            .finish()
    }
}
