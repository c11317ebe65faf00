#![forbid(unsafe_code)]

//! Tooltip configuration.
//!
//! Defaults match the product's tooltip styling. Each value can be overridden
//! from the environment; unparseable overrides are ignored.

use std::fmt;
use std::time::Duration;

use fetchui_core::geometry::{GeometryError, Rect, Size, check_extent};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::{DEFAULT_ARROW_INSET, DEFAULT_GAP, DEFAULT_PADDING, PlacementRequest};
use crate::placement::Placement;

/// Environment variable overriding the viewport padding (pixels).
pub const ENV_PADDING: &str = "FETCHUI_TOOLTIP_PADDING";
/// Environment variable overriding the trigger gap (pixels).
pub const ENV_GAP: &str = "FETCHUI_TOOLTIP_GAP";
/// Environment variable overriding the arrow inset (pixels).
pub const ENV_ARROW_INSET: &str = "FETCHUI_TOOLTIP_ARROW_INSET";
/// Environment variable overriding the hover show delay (milliseconds).
pub const ENV_SHOW_DELAY_MS: &str = "FETCHUI_TOOLTIP_SHOW_DELAY_MS";
/// Environment variable overriding the focus show delay (milliseconds).
pub const ENV_FOCUS_DELAY_MS: &str = "FETCHUI_TOOLTIP_FOCUS_DELAY_MS";
/// Environment variable overriding the default placement (`top`, `bottom-start`, ...).
pub const ENV_PLACEMENT: &str = "FETCHUI_TOOLTIP_PLACEMENT";

/// Configuration shared by every tooltip of a view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TooltipConfig {
    /// Minimum clearance from the viewport edges. Default: 8px
    pub padding: f64,
    /// Spacing between trigger and tooltip. Default: 8px
    pub gap: f64,
    /// Minimum distance from the arrow to a tooltip corner. Default: 8px
    pub arrow_inset: f64,
    /// Pointer dwell time before a hover tooltip shows. Default: 300ms
    pub show_delay: Duration,
    /// Delay before a focus tooltip shows. Default: 0 (immediate)
    pub focus_delay: Duration,
    /// Placement used when a trigger does not ask for one. Default: top
    pub placement: Placement,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            gap: DEFAULT_GAP,
            arrow_inset: DEFAULT_ARROW_INSET,
            show_delay: Duration::from_millis(300),
            focus_delay: Duration::ZERO,
            placement: Placement::Top,
        }
    }
}

impl TooltipConfig {
    /// Defaults with overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(padding) = env_pixels(&get_env, ENV_PADDING) {
            config.padding = padding;
        }
        if let Some(gap) = env_pixels(&get_env, ENV_GAP) {
            config.gap = gap;
        }
        if let Some(inset) = env_pixels(&get_env, ENV_ARROW_INSET) {
            config.arrow_inset = inset;
        }
        if let Some(delay) = env_millis(&get_env, ENV_SHOW_DELAY_MS) {
            config.show_delay = delay;
        }
        if let Some(delay) = env_millis(&get_env, ENV_FOCUS_DELAY_MS) {
            config.focus_delay = delay;
        }
        if let Some(value) = get_env(ENV_PLACEMENT)
            && let Ok(placement) = value.parse::<Placement>()
        {
            config.placement = placement;
        }
        config
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn with_arrow_inset(mut self, arrow_inset: f64) -> Self {
        self.arrow_inset = arrow_inset;
        self
    }

    #[must_use]
    pub fn with_show_delay(mut self, delay: Duration) -> Self {
        self.show_delay = delay;
        self
    }

    #[must_use]
    pub fn with_focus_delay(mut self, delay: Duration) -> Self {
        self.focus_delay = delay;
        self
    }

    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Check that pixel values are finite and non-negative.
    pub fn validate(&self) -> Result<(), TooltipConfigError> {
        for (field, value) in [
            ("padding", self.padding),
            ("gap", self.gap),
            ("arrow_inset", self.arrow_inset),
        ] {
            check_extent(field, value).map_err(TooltipConfigError::Pixels)?;
        }
        Ok(())
    }

    /// Build a placement request for one show.
    ///
    /// `preferred` overrides the configured placement for this trigger.
    #[must_use]
    pub fn request(
        &self,
        trigger: Rect,
        preferred: Option<Placement>,
        tooltip: Size,
        viewport: Size,
    ) -> PlacementRequest {
        PlacementRequest::new(
            trigger,
            preferred.unwrap_or(self.placement),
            tooltip,
            viewport,
        )
        .with_padding(self.padding)
        .with_gap(self.gap)
        .with_arrow_inset(self.arrow_inset)
    }
}

/// Rejected tooltip configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipConfigError {
    Pixels(GeometryError),
}

impl fmt::Display for TooltipConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(err) => write!(f, "invalid tooltip config: {err}"),
        }
    }
}

impl std::error::Error for TooltipConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pixels(err) => Some(err),
        }
    }
}

fn env_pixels<F>(get_env: &F, key: &str) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let value: f64 = get_env(key)?.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn env_millis<F>(get_env: &F, key: &str) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key)?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_millis)
}
