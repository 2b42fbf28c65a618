use crate::geo::{Bounds, Envelope, LatLng};

/// Result of checking a completed pan against the envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanOutcome {
    /// Publish these bounds.
    Accepted(Bounds),
    /// Animate back to `recenter`; publish nothing until that settles.
    Rejected { recenter: LatLng },
}

/// Keeps user pans inside a fixed envelope.
///
/// Zoom changes never pass through the guard.
#[derive(Debug, Clone)]
pub struct ViewportGuard {
    envelope: Envelope,
    default_center: LatLng,
    last_good_center: Option<LatLng>,
}

impl ViewportGuard {
    #[must_use]
    pub fn new(envelope: Envelope, default_center: LatLng) -> Self {
        Self {
            envelope,
            default_center,
            last_good_center: None,
        }
    }

    pub fn remember(&mut self, center: LatLng) {
        self.last_good_center = Some(center);
    }

    #[must_use]
    pub fn last_good_center(&self) -> Option<LatLng> {
        self.last_good_center
    }

    /// Check the viewport reached by a pan.
    ///
    /// When both corners are inside the envelope the pan's center becomes the
    /// new last-known-good center. Otherwise the view goes back to the
    /// last-known-good center, or to the default center (which is then
    /// remembered) if none was ever recorded.
    pub fn evaluate_pan(&mut self, bounds: Bounds, center: LatLng) -> PanOutcome {
        if self.envelope.admits(&bounds) {
            self.last_good_center = Some(center);
            return PanOutcome::Accepted(bounds);
        }

        let recenter = *self.last_good_center.get_or_insert(self.default_center);
        PanOutcome::Rejected { recenter }
    }
}
