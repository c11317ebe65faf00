#![forbid(unsafe_code)]

//! Viewport-aware tooltip placement.
//!
//! [`compute_placement`] is a pure function of its [`PlacementRequest`]: it
//! never fails and never keeps state between calls.
//!
//! # Algorithm
//!
//! 1. For each candidate (preferred first, then its side's fallback row)
//!    compute the origin that anchors the tooltip `gap` away from the trigger.
//! 2. The first candidate whose whole box lies inside the padded viewport
//!    wins ([`FitKind::Exact`]).
//! 3. Otherwise the first candidate whose anchored axis fits, and whose cross
//!    extent fits the padded viewport, wins ([`FitKind::Shifted`]); clamping
//!    slides it along the trigger edge.
//! 4. Otherwise the last candidate in the list is used ([`FitKind::LastResort`]).
//! 5. The origin is clamped into `[padding, viewport - tooltip - padding]` on
//!    each axis, pinning at `padding` when the tooltip is larger than the
//!    available space.
//! 6. The arrow points at the trigger center, kept `arrow_inset` away from
//!    the tooltip corners.
//!
//! # Invariants
//!
//! 1. If the preferred candidate fits, it is returned unchanged.
//! 2. A tooltip no larger than the padded viewport ends up fully inside it.
//! 3. Identical requests produce identical results.

use std::fmt;

use fetchui_core::geometry::{GeometryError, Offset, Rect, Size, check_extent};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::placement::{Alignment, Placement, Side};

/// Default clearance from the viewport edges, in pixels.
pub const DEFAULT_PADDING: f64 = 8.0;
/// Default spacing between trigger and tooltip, in pixels.
pub const DEFAULT_GAP: f64 = 8.0;
/// Default minimum distance between the arrow and a tooltip corner, in pixels.
pub const DEFAULT_ARROW_INSET: f64 = 8.0;

/// Input to one placement computation.
///
/// Built fresh for every show; nothing is carried between requests.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementRequest {
    /// Measured bounds of the element the tooltip is attached to.
    pub trigger: Rect,
    pub preferred: Placement,
    /// Measured size of the tooltip about to be shown.
    pub tooltip: Size,
    pub viewport: Size,
    /// Minimum clearance from the viewport edges.
    pub padding: f64,
    /// Spacing between trigger and tooltip along the anchored axis.
    pub gap: f64,
    /// Minimum distance between the arrow and the tooltip corners.
    pub arrow_inset: f64,
}

impl PlacementRequest {
    /// Create a request with default padding, gap and arrow inset.
    #[must_use]
    pub fn new(trigger: Rect, preferred: Placement, tooltip: Size, viewport: Size) -> Self {
        Self {
            trigger,
            preferred,
            tooltip,
            viewport,
            padding: DEFAULT_PADDING,
            gap: DEFAULT_GAP,
            arrow_inset: DEFAULT_ARROW_INSET,
        }
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

    /// Check that every measurement is finite and every extent non-negative.
    ///
    /// [`compute_placement`] accepts any request; this is for callers that
    /// want to reject bad measurements before they reach the screen.
    pub fn validate(&self) -> Result<(), PlacementError> {
        if !self.trigger.is_finite() {
            return Err(PlacementError::TriggerNotFinite {
                trigger: self.trigger,
            });
        }
        check_extent("tooltip.width", self.tooltip.width)?;
        check_extent("tooltip.height", self.tooltip.height)?;
        check_extent("viewport.width", self.viewport.width)?;
        check_extent("viewport.height", self.viewport.height)?;
        check_extent("padding", self.padding)?;
        check_extent("gap", self.gap)?;
        check_extent("arrow_inset", self.arrow_inset)?;
        Ok(())
    }
}

/// How the final placement was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FitKind {
    /// The anchored box fit the padded viewport as computed.
    Exact,
    /// The anchored axis fit; the box was slid along the cross axis.
    Shifted,
    /// Nothing fit; the last fallback was clamped into the viewport.
    LastResort,
}

/// Output of one placement computation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementResult {
    pub placement: Placement,
    /// Top-left corner of the tooltip box in viewport coordinates.
    pub position: Offset,
    /// Arrow anchor relative to the tooltip box.
    pub arrow: Offset,
    pub fit: FitKind,
}

impl PlacementResult {
    /// The tooltip box at its final position.
    #[must_use]
    pub fn tooltip_rect(&self, tooltip: Size) -> Rect {
        Rect::from_size(tooltip).with_origin(self.position)
    }
}

/// A candidate placement and how well it fits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub placement: Placement,
    /// Unclamped origin anchored to the trigger.
    pub origin: Offset,
    /// `None` when neither the whole box nor the anchored axis fits.
    pub fit: Option<FitKind>,
}

/// Rejected placement input, see [`PlacementRequest::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementError {
    TriggerNotFinite { trigger: Rect },
    Geometry(GeometryError),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TriggerNotFinite { trigger } => {
                write!(f, "trigger rectangle has non-finite bounds: {trigger:?}")
            }
            Self::Geometry(err) => write!(f, "invalid placement geometry: {err}"),
        }
    }
}

impl std::error::Error for PlacementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geometry(err) => Some(err),
            Self::TriggerNotFinite { .. } => None,
        }
    }
}

impl From<GeometryError> for PlacementError {
    fn from(err: GeometryError) -> Self {
        Self::Geometry(err)
    }
}

/// Origin that anchors a `tooltip` to `trigger` per `placement`.
#[must_use]
pub fn candidate_origin(trigger: &Rect, placement: Placement, tooltip: Size, gap: f64) -> Offset {
    let cross_left = match placement.alignment() {
        Alignment::Center => trigger.center_x() - tooltip.width / 2.0,
        Alignment::Start => trigger.left,
        Alignment::End => trigger.right() - tooltip.width,
    };
    match placement.side() {
        Side::Top => Offset::new(trigger.top - gap - tooltip.height, cross_left),
        Side::Bottom => Offset::new(trigger.bottom() + gap, cross_left),
        Side::Left => Offset::new(
            trigger.center_y() - tooltip.height / 2.0,
            trigger.left - gap - tooltip.width,
        ),
        Side::Right => Offset::new(
            trigger.center_y() - tooltip.height / 2.0,
            trigger.right() + gap,
        ),
    }
}

/// Evaluate every candidate for `request`, in the order they are tried.
pub fn candidates(request: &PlacementRequest) -> impl Iterator<Item = Candidate> + '_ {
    request
        .preferred
        .candidates()
        .map(move |placement| evaluate(request, placement))
}

fn evaluate(request: &PlacementRequest, placement: Placement) -> Candidate {
    let origin = candidate_origin(
        &request.trigger,
        placement,
        request.tooltip,
        non_negative(request.gap),
    );
    Candidate {
        placement,
        origin,
        fit: classify(request, placement, origin),
    }
}

/// Compute where a tooltip goes and where its arrow points.
#[must_use]
pub fn compute_placement(request: &PlacementRequest) -> PlacementResult {
    let _span = fetchui_core::trace_span!(
        "compute_placement",
        preferred = request.preferred.as_str(),
        tooltip_w = request.tooltip.width,
        tooltip_h = request.tooltip.height,
        viewport_w = request.viewport.width,
        viewport_h = request.viewport.height
    )
    .entered();

    // Seeded with the preferred candidate, the first one tried.
    let mut last = evaluate(request, request.preferred);
    let mut shifted: Option<Candidate> = None;

    let (candidate, fit) = 'search: {
        for candidate in candidates(request) {
            match candidate.fit {
                Some(FitKind::Exact) => break 'search (candidate, FitKind::Exact),
                Some(_) if shifted.is_none() => shifted = Some(candidate),
                _ => {}
            }
            fetchui_core::trace!(
                placement = candidate.placement.as_str(),
                top = candidate.origin.top,
                left = candidate.origin.left,
                "tooltip candidate clips"
            );
            last = candidate;
        }
        match shifted {
            Some(candidate) => (candidate, FitKind::Shifted),
            None => (last, FitKind::LastResort),
        }
    };

    if candidate.placement != request.preferred {
        fetchui_core::debug!(
            preferred = request.preferred.as_str(),
            placement = candidate.placement.as_str(),
            fit = ?fit,
            "tooltip placement fell back"
        );
    }

    finish(request, candidate.placement, candidate.origin, fit)
}

fn finish(
    request: &PlacementRequest,
    placement: Placement,
    origin: Offset,
    fit: FitKind,
) -> PlacementResult {
    let padding = non_negative(request.padding);
    let inset = non_negative(request.arrow_inset);
    let tooltip = request.tooltip;
    let position = Offset::new(
        clamp_axis(origin.top, tooltip.height, request.viewport.height, padding),
        clamp_axis(origin.left, tooltip.width, request.viewport.width, padding),
    );

    let arrow = match placement.side() {
        Side::Top | Side::Bottom => Offset::new(
            if placement.side() == Side::Top {
                tooltip.height
            } else {
                0.0
            },
            arrow_along(request.trigger.center_x(), position.left, tooltip.width, inset),
        ),
        Side::Left | Side::Right => Offset::new(
            arrow_along(request.trigger.center_y(), position.top, tooltip.height, inset),
            if placement.side() == Side::Left {
                tooltip.width
            } else {
                0.0
            },
        ),
    };

    PlacementResult {
        placement,
        position,
        arrow,
        fit,
    }
}

fn classify(request: &PlacementRequest, placement: Placement, origin: Offset) -> Option<FitKind> {
    let bounds = Rect::from_size(request.viewport).inset(non_negative(request.padding));
    let tooltip = Rect::from_size(request.tooltip).with_origin(origin);
    if bounds.contains_rect(&tooltip) {
        return Some(FitKind::Exact);
    }
    let (main_fits, cross_fits) = if placement.is_vertical() {
        (
            tooltip.top >= bounds.top && tooltip.bottom() <= bounds.bottom(),
            tooltip.width <= bounds.width,
        )
    } else {
        (
            tooltip.left >= bounds.left && tooltip.right() <= bounds.right(),
            tooltip.height <= bounds.height,
        )
    };
    (main_fits && cross_fits).then_some(FitKind::Shifted)
}

/// Clamp into `[padding, viewport - extent - padding]`, pinning at `padding`
/// when the range is empty.
fn clamp_axis(start: f64, extent: f64, viewport: f64, padding: f64) -> f64 {
    start.min(viewport - extent - padding).max(padding)
}

/// Arrow position along an edge of length `extent` starting at `start`.
///
/// Kept within `[inset, extent - inset]`; edges too short for that range
/// put the arrow at their midpoint.
fn arrow_along(target: f64, start: f64, extent: f64, inset: f64) -> f64 {
    if extent < 2.0 * inset {
        return extent / 2.0;
    }
    (target - start).max(inset).min(extent - inset)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Size {
        Size::new(500.0, 500.0)
    }

    fn request(trigger: Rect, preferred: Placement, tooltip: Size) -> PlacementRequest {
        PlacementRequest::new(trigger, preferred, tooltip, viewport())
    }

    #[test]
    fn origins_follow_anchor_rules() {
        let trigger = Rect::new(200.0, 200.0, 40.0, 20.0);
        let tooltip = Size::new(100.0, 40.0);
        let cases = [
            (Placement::Top, Offset::new(152.0, 170.0)),
            (Placement::Bottom, Offset::new(228.0, 170.0)),
            (Placement::Left, Offset::new(190.0, 92.0)),
            (Placement::Right, Offset::new(190.0, 248.0)),
            (Placement::TopStart, Offset::new(152.0, 200.0)),
            (Placement::TopEnd, Offset::new(152.0, 140.0)),
            (Placement::BottomStart, Offset::new(228.0, 200.0)),
            (Placement::BottomEnd, Offset::new(228.0, 140.0)),
        ];
        for (placement, expected) in cases {
            assert_eq!(
                candidate_origin(&trigger, placement, tooltip, 8.0),
                expected,
                "{placement}"
            );
        }
    }

    #[test]
    fn preferred_placement_kept_when_it_fits() {
        let trigger = Rect::new(200.0, 200.0, 40.0, 20.0);
        for placement in Placement::ALL {
            let result = compute_placement(&request(trigger, placement, Size::new(100.0, 40.0)));
            assert_eq!(result.placement, placement);
            assert_eq!(result.fit, FitKind::Exact);
        }
    }

    #[test]
    fn top_falls_back_to_bottom_near_top_edge() {
        let trigger = Rect::new(200.0, 0.0, 40.0, 20.0);
        let result = compute_placement(&request(trigger, Placement::Top, Size::new(100.0, 40.0)));
        assert_eq!(result.placement, Placement::Bottom);
        assert_eq!(result.fit, FitKind::Exact);
        assert_eq!(result.position, Offset::new(28.0, 170.0));
        assert_eq!(result.arrow, Offset::new(0.0, 50.0));
    }

    #[test]
    fn corner_trigger_slides_bottom_placement() {
        // Trigger near the top-left corner: nothing fits exactly, bottom fits
        // vertically and slides right to the padding.
        let trigger = Rect::from_edges(10.0, 10.0, 50.0, 30.0).unwrap();
        let result = compute_placement(&request(trigger, Placement::Top, Size::new(100.0, 40.0)));
        assert_eq!(result.placement, Placement::Bottom);
        assert_eq!(result.fit, FitKind::Shifted);
        assert_eq!(result.position, Offset::new(38.0, 8.0));
        // Trigger center x = 30, tooltip left = 8.
        assert_eq!(result.arrow, Offset::new(0.0, 22.0));
    }

    #[test]
    fn last_resort_is_final_fallback_clamped() {
        // Tooltip taller and wider than the padded viewport: nothing fits.
        let trigger = Rect::new(40.0, 40.0, 20.0, 20.0);
        let small = Size::new(100.0, 100.0);
        let result = compute_placement(
            &PlacementRequest::new(trigger, Placement::Top, Size::new(120.0, 120.0), small),
        );
        assert_eq!(result.placement, Placement::Left);
        assert_eq!(result.fit, FitKind::LastResort);
        assert_eq!(result.position, Offset::new(8.0, 8.0));

        let result = compute_placement(
            &PlacementRequest::new(trigger, Placement::Left, Size::new(120.0, 120.0), small),
        );
        assert_eq!(result.placement, Placement::Bottom);
    }

    #[test]
    fn clamp_pins_oversized_tooltip_at_padding() {
        assert_eq!(clamp_axis(-40.0, 600.0, 500.0, 8.0), 8.0);
        assert_eq!(clamp_axis(300.0, 600.0, 500.0, 8.0), 8.0);
        assert_eq!(clamp_axis(470.0, 40.0, 500.0, 8.0), 452.0);
        assert_eq!(clamp_axis(100.0, 40.0, 500.0, 8.0), 100.0);
    }

    #[test]
    fn arrow_stays_inside_inset() {
        assert_eq!(arrow_along(0.0, 100.0, 80.0, 8.0), 8.0);
        assert_eq!(arrow_along(500.0, 100.0, 80.0, 8.0), 72.0);
        assert_eq!(arrow_along(140.0, 100.0, 80.0, 8.0), 40.0);
        // Too narrow for the inset range.
        assert_eq!(arrow_along(0.0, 0.0, 10.0, 8.0), 5.0);
    }

    #[test]
    fn horizontal_arrow_mirrors_vertical() {
        let trigger = Rect::new(200.0, 200.0, 40.0, 20.0);
        let tooltip = Size::new(100.0, 40.0);
        let left = compute_placement(&request(trigger, Placement::Left, tooltip));
        assert_eq!(left.arrow, Offset::new(20.0, 100.0));
        let right = compute_placement(&request(trigger, Placement::Right, tooltip));
        assert_eq!(right.arrow, Offset::new(20.0, 0.0));
        let top = compute_placement(&request(trigger, Placement::TopStart, tooltip));
        assert_eq!(top.arrow, Offset::new(40.0, 20.0));
    }

    #[test]
    fn negative_padding_and_gap_treated_as_zero() {
        let trigger = Rect::new(0.0, 100.0, 40.0, 20.0);
        let req = request(trigger, Placement::Bottom, Size::new(40.0, 20.0))
            .with_padding(-5.0)
            .with_gap(f64::NAN);
        let result = compute_placement(&req);
        assert_eq!(result.placement, Placement::Bottom);
        assert_eq!(result.position, Offset::new(120.0, 0.0));
    }

    #[test]
    fn candidates_report_fit_per_placement() {
        let trigger = Rect::new(200.0, 0.0, 40.0, 20.0);
        let req = request(trigger, Placement::Top, Size::new(100.0, 40.0));
        let report: Vec<_> = candidates(&req).map(|c| (c.placement, c.fit)).collect();
        assert_eq!(
            report,
            [
                (Placement::Top, None),
                (Placement::Bottom, Some(FitKind::Exact)),
                (Placement::Right, Some(FitKind::Shifted)),
                (Placement::Left, Some(FitKind::Shifted)),
            ]
        );
    }

    #[test]
    fn validate_reports_bad_measurements() {
        let trigger = Rect::new(0.0, 0.0, 10.0, 10.0);
        let ok = request(trigger, Placement::Top, Size::new(10.0, 10.0));
        assert_eq!(ok.validate(), Ok(()));

        let err = ok.with_gap(-1.0).validate().unwrap_err();
        assert_eq!(
            err,
            PlacementError::Geometry(GeometryError::Negative {
                field: "gap",
                value: -1.0
            })
        );
        assert_eq!(
            err.to_string(),
            "invalid placement geometry: gap must be non-negative, got -1"
        );

        let mut bad = ok;
        bad.trigger.left = f64::NAN;
        assert!(matches!(
            bad.validate(),
            Err(PlacementError::TriggerNotFinite { .. })
        ));
    }

    #[test]
    fn tooltip_rect_uses_position() {
        let result = PlacementResult {
            placement: Placement::Top,
            position: Offset::new(10.0, 20.0),
            arrow: Offset::default(),
            fit: FitKind::Exact,
        };
        assert_eq!(
            result.tooltip_rect(Size::new(30.0, 40.0)),
            Rect::new(20.0, 10.0, 30.0, 40.0)
        );
    }

    #[test]
    fn last_resort_is_the_last_candidate_tried() {
        let trigger = Rect::new(40.0, 40.0, 20.0, 20.0);
        for preferred in Placement::ALL {
            let req = PlacementRequest::new(
                trigger,
                preferred,
                Size::new(300.0, 300.0),
                Size::new(100.0, 100.0),
            );
            let tried: Vec<_> = candidates(&req).collect();
            assert!(tried.iter().all(|c| c.fit.is_none()), "{preferred}");
            let result = compute_placement(&req);
            assert_eq!(result.fit, FitKind::LastResort);
            assert_eq!(Some(result.placement), tried.last().map(|c| c.placement));
        }
    }

    #[test]
    fn tooltip_flush_with_padded_edge_fits_exactly() {
        // Bottom edge lands exactly on `viewport - padding`.
        let trigger = Rect::new(200.0, 456.0, 40.0, 20.0);
        let req = request(trigger, Placement::Top, Size::new(100.0, 16.0)).with_gap(0.0);
        let below = Placement::Bottom;
        let fit = classify(&req, below, candidate_origin(&trigger, below, req.tooltip, 0.0));
        assert_eq!(fit, Some(FitKind::Exact));

        // One pixel lower and it clips below, but still fits beside.
        let lower = Rect::new(200.0, 457.0, 40.0, 20.0);
        let fit = classify(&req, below, candidate_origin(&lower, below, req.tooltip, 0.0));
        assert_eq!(fit, None);
        let beside = Placement::Right;
        let fit = classify(&req, beside, candidate_origin(&lower, beside, req.tooltip, 0.0));
        assert_eq!(fit, Some(FitKind::Exact));
    }

    #[test]
    fn padding_wider_than_viewport_leaves_no_room() {
        let trigger = Rect::new(5.0, 5.0, 2.0, 2.0);
        let req = PlacementRequest::new(
            trigger,
            Placement::Bottom,
            Size::new(4.0, 4.0),
            Size::new(10.0, 10.0),
        );
        assert!(candidates(&req).all(|c| c.fit.is_none()));
        let result = compute_placement(&req);
        assert_eq!(result.position, Offset::new(8.0, 8.0));
    }
}
