#![forbid(unsafe_code)]

//! Show/hide policy for tooltips.
//!
//! The controller owns no geometry. It decides *when* a tooltip is visible
//! and, once it is, hands fresh measurements to [`compute_placement`].
//!
//! # Policy
//!
//! - Hover: a show is scheduled `show_delay` after the pointer enters a
//!   trigger. Leaving before the delay elapses cancels it.
//! - Focus: a show is scheduled `focus_delay` after focus enters a trigger
//!   (zero by default, i.e. immediate). Hover and focus are timed
//!   independently. Each source keeps its own deadline, and the tooltip is
//!   shown as soon as either is due.
//! - A tooltip stays while any source still holds it: a pointer leaving does
//!   not hide a tooltip whose trigger still has focus, and vice versa.
//! - Viewport changes (resize, scroll) hide the visible tooltip and cancel any
//!   pending show. Nothing is repositioned live; the next show measures anew.
//!
//! Time is passed in by the caller, so the controller is deterministic and
//! testable without sleeping.
//!
//! # Example
//!
//! ```
//! use fetchui_tooltip::{TooltipConfig, TooltipController, TooltipEvent};
//! use std::time::{Duration, Instant};
//!
//! let mut tooltips = TooltipController::new(TooltipConfig::default());
//! let t0 = Instant::now();
//!
//! assert_eq!(tooltips.pointer_enter(7, t0), None);
//! assert_eq!(tooltips.poll(t0 + Duration::from_millis(100)), None);
//! assert_eq!(
//!     tooltips.poll(t0 + Duration::from_millis(300)),
//!     Some(TooltipEvent::Show { target: 7, replaced: None })
//! );
//! ```

use std::time::Instant;

use fetchui_core::geometry::{Rect, Size};

use crate::config::TooltipConfig;
use crate::engine::{PlacementResult, compute_placement};
use crate::placement::Placement;

/// Identifier of a trigger element, assigned by the caller.
pub type TriggerId = u64;

/// What made a tooltip show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerSource {
    Hover,
    Focus,
}

/// Why a tooltip was hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HideReason {
    PointerLeft,
    FocusLost,
    /// The viewport was resized or scrolled.
    ViewportChanged,
    /// Another trigger took over.
    Replaced,
}

/// Visibility change the caller must render.
///
/// Only one tooltip is visible at a time. Scheduling a different trigger
/// hides the current tooltip right away ([`HideReason::Replaced`]); when the
/// new tooltip shows in the same call, the hidden trigger is reported in
/// `replaced` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipEvent {
    Show {
        target: TriggerId,
        replaced: Option<TriggerId>,
    },
    Hide {
        target: TriggerId,
        reason: HideReason,
    },
}

/// The trigger currently owning the tooltip slot.
///
/// Each source carries its own deadline; `None` means the source is not
/// active. The slot is released once neither source remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    target: TriggerId,
    hover: Option<Instant>,
    focus: Option<Instant>,
    visible: bool,
}

impl Slot {
    fn new(target: TriggerId) -> Self {
        Self {
            target,
            hover: None,
            focus: None,
            visible: false,
        }
    }

    fn due(&self, source: TriggerSource) -> Option<Instant> {
        match source {
            TriggerSource::Hover => self.hover,
            TriggerSource::Focus => self.focus,
        }
    }

    fn due_mut(&mut self, source: TriggerSource) -> &mut Option<Instant> {
        match source {
            TriggerSource::Hover => &mut self.hover,
            TriggerSource::Focus => &mut self.focus,
        }
    }

    fn is_active(&self) -> bool {
        self.hover.is_some() || self.focus.is_some()
    }

    /// Earliest deadline among the active sources.
    fn earliest(&self) -> Option<(Instant, TriggerSource)> {
        match (self.hover, self.focus) {
            (Some(h), Some(f)) if f < h => Some((f, TriggerSource::Focus)),
            (Some(h), _) => Some((h, TriggerSource::Hover)),
            (None, Some(f)) => Some((f, TriggerSource::Focus)),
            (None, None) => None,
        }
    }

    fn show(&mut self, source: TriggerSource, replaced: Option<TriggerId>) -> TooltipEvent {
        self.visible = true;
        fetchui_core::debug!(
            trigger = self.target,
            source = ?source,
            replaced = ?replaced,
            "tooltip shown"
        );
        TooltipEvent::Show {
            target: self.target,
            replaced,
        }
    }
}

/// Tracks which tooltip, if any, is visible or about to be.
#[derive(Debug)]
pub struct TooltipController {
    config: TooltipConfig,
    slot: Option<Slot>,
    /// Diagnostic: number of shows emitted.
    shows: u64,
}

impl TooltipController {
    #[must_use]
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            config,
            slot: None,
            shows: 0,
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(TooltipConfig::default())
    }

    #[must_use]
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// The trigger whose tooltip is currently visible.
    #[must_use]
    pub fn visible(&self) -> Option<TriggerId> {
        self.slot.filter(|slot| slot.visible).map(|slot| slot.target)
    }

    /// The trigger waiting for a show delay, and when the earliest of its
    /// sources is due.
    #[must_use]
    pub fn pending(&self) -> Option<(TriggerId, Instant)> {
        let slot = self.slot.filter(|slot| !slot.visible)?;
        slot.earliest().map(|(due, _)| (slot.target, due))
    }

    /// Whether `source` is currently holding `target`'s tooltip, pending or
    /// visible.
    #[must_use]
    pub fn is_active(&self, target: TriggerId, source: TriggerSource) -> bool {
        self.slot
            .is_some_and(|slot| slot.target == target && slot.due(source).is_some())
    }

    /// Total number of `Show` events emitted.
    #[must_use]
    pub fn shows(&self) -> u64 {
        self.shows
    }

    /// Pointer entered `target`.
    pub fn pointer_enter(&mut self, target: TriggerId, now: Instant) -> Option<TooltipEvent> {
        self.schedule(target, TriggerSource::Hover, now)
    }

    /// Pointer left `target`. Clears the hover source only; the tooltip
    /// stays while focus still holds it.
    pub fn pointer_leave(&mut self, target: TriggerId) -> Option<TooltipEvent> {
        self.release(target, TriggerSource::Hover, HideReason::PointerLeft)
    }

    /// Focus moved into `target`.
    pub fn focus_in(&mut self, target: TriggerId, now: Instant) -> Option<TooltipEvent> {
        self.schedule(target, TriggerSource::Focus, now)
    }

    /// Focus left `target`. Clears the focus source only; the tooltip stays
    /// while the pointer still holds it.
    pub fn focus_out(&mut self, target: TriggerId) -> Option<TooltipEvent> {
        self.release(target, TriggerSource::Focus, HideReason::FocusLost)
    }

    /// The viewport was resized or scrolled.
    pub fn viewport_changed(&mut self) -> Option<TooltipEvent> {
        let slot = self.slot.take()?;
        if !slot.visible {
            return None;
        }
        fetchui_core::debug!(trigger = slot.target, "tooltip dismissed by viewport change");
        Some(TooltipEvent::Hide {
            target: slot.target,
            reason: HideReason::ViewportChanged,
        })
    }

    /// Promote a pending show once any of its sources is due.
    pub fn poll(&mut self, now: Instant) -> Option<TooltipEvent> {
        let slot = self.slot.as_mut().filter(|slot| !slot.visible)?;
        let (due, source) = slot.earliest()?;
        if now < due {
            return None;
        }
        self.shows += 1;
        Some(slot.show(source, None))
    }

    /// Place the visible tooltip against fresh measurements.
    ///
    /// Returns `None` while nothing is visible. `preferred` overrides the
    /// configured placement for this trigger.
    #[must_use]
    pub fn place(
        &self,
        trigger: Rect,
        preferred: Option<Placement>,
        tooltip: Size,
        viewport: Size,
    ) -> Option<PlacementResult> {
        self.visible()?;
        let request = self.config.request(trigger, preferred, tooltip, viewport);
        Some(compute_placement(&request))
    }

    fn schedule(
        &mut self,
        target: TriggerId,
        source: TriggerSource,
        now: Instant,
    ) -> Option<TooltipEvent> {
        let delay = match source {
            TriggerSource::Hover => self.config.show_delay,
            TriggerSource::Focus => self.config.focus_delay,
        };

        let replaced = match self.slot {
            Some(slot) if slot.target == target => None,
            Some(slot) => slot.visible.then_some(slot.target),
            None => None,
        };
        let slot = match &mut self.slot {
            Some(slot) if slot.target == target => slot,
            other => other.insert(Slot::new(target)),
        };

        let due = slot.due_mut(source);
        if due.is_some() {
            // Re-entering keeps the original deadline.
            return None;
        }
        *due = Some(now + delay);
        if slot.visible {
            return None;
        }

        if delay.is_zero() {
            self.shows += 1;
            return Some(slot.show(source, replaced));
        }
        replaced.map(|current| {
            fetchui_core::debug!(trigger = current, reason = ?HideReason::Replaced, "tooltip hidden");
            TooltipEvent::Hide {
                target: current,
                reason: HideReason::Replaced,
            }
        })
    }

    fn release(
        &mut self,
        target: TriggerId,
        source: TriggerSource,
        reason: HideReason,
    ) -> Option<TooltipEvent> {
        let slot = self.slot.as_mut().filter(|slot| slot.target == target)?;
        slot.due_mut(source).take()?;
        if slot.is_active() {
            return None;
        }

        let was_visible = slot.visible;
        self.slot = None;
        if !was_visible {
            return None;
        }
        fetchui_core::debug!(trigger = target, reason = ?reason, "tooltip hidden");
        Some(TooltipEvent::Hide { target, reason })
    }
}
