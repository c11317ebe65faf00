#![forbid(unsafe_code)]

//! Tooltips: viewport-aware placement and show/hide policy.
//!
//! - [`placement`]: the eight placements and their fallback order.
//! - [`engine`]: [`compute_placement`], a pure function from measured
//!   geometry to tooltip position and arrow offset.
//! - [`config`]: shared padding, gap, delays and default placement.
//! - [`controller`]: hover/focus show delays and dismissal on viewport change.

pub mod config;
pub mod controller;
pub mod engine;
pub mod placement;

pub use config::{TooltipConfig, TooltipConfigError};
pub use controller::{HideReason, TooltipController, TooltipEvent, TriggerId, TriggerSource};
pub use engine::{
    Candidate, FitKind, PlacementError, PlacementRequest, PlacementResult, compute_placement,
};
pub use placement::{Alignment, ParsePlacementError, Placement, Side};
