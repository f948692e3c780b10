use crate::{
    foundation::error::{ScrollError, ScrollResult},
    progress::source::Geometry,
};

/// Whether the host can hold an element at a fixed viewport position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PinSupport {
    #[default]
    Fixed,
    Unsupported,
}

/// `Unpinned -> Pinning -> Pinned -> Unpinning -> Unpinned`.
///
/// `Pinning` and `Unpinning` last exactly one update; they tell the renderer to
/// switch positioning mode on that frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum PinState {
    #[default]
    Unpinned,
    Pinning,
    Pinned,
    Unpinning,
}

impl PinState {
    /// The container is held fixed in this state.
    pub fn is_fixed(self) -> bool {
        matches!(self, Self::Pinning | Self::Pinned)
    }

    fn next(self, inside: bool) -> Self {
        match (self, inside) {
            (Self::Unpinned | Self::Unpinning, true) => Self::Pinning,
            (Self::Pinning | Self::Pinned, true) => Self::Pinned,
            (Self::Pinning | Self::Pinned, false) => Self::Unpinning,
            (Self::Unpinned | Self::Unpinning, false) => Self::Unpinned,
        }
    }
}

/// Scroll position relative to the region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum PinSide {
    #[default]
    Before,
    Inside,
    After,
}

/// Where the container should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Placement {
    /// Normal flow, at the top of its spacer.
    Flow,
    /// Fixed at `top` px from the viewport top.
    Fixed { top: f64 },
    /// In flow, pushed down `offset` px inside its spacer (region passed).
    Parked { offset: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PinLayout {
    pub state: PinState,
    pub side: PinSide,
    pub placement: Placement,
    /// Height the spacer must reserve so content below never jumps.
    pub spacer_height: f64,
}

/// Pin state machine for one region. Its state is written only from the
/// coalesced frame update.
#[derive(Clone, Debug, Default)]
pub struct PinController {
    support: PinSupport,
    state: PinState,
    side: PinSide,
    container_height: f64,
    transitions: u64,
    degraded_reported: bool,
}

impl PinController {
    pub fn new(support: PinSupport) -> Self {
        Self {
            support,
            ..Self::default()
        }
    }

    pub fn state(&self) -> PinState {
        self.state
    }

    pub fn side(&self) -> PinSide {
        self.side
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    pub fn set_container_height(&mut self, height: f64) {
        self.container_height = if height.is_finite() { height.max(0.0) } else { 0.0 };
    }

    pub fn is_degraded(&self) -> bool {
        self.engage().is_err()
    }

    pub fn engage(&self) -> ScrollResult<()> {
        match self.support {
            PinSupport::Fixed => Ok(()),
            PinSupport::Unsupported => Err(ScrollError::capability(
                "fixed positioning is not reliable on this host",
            )),
        }
    }

    pub fn reset(&mut self) {
        self.state = PinState::Unpinned;
        self.side = PinSide::Before;
    }

    /// Advance the state machine for `offset`. Without geometry, or for a degenerate
    /// region, the controller never leaves `Unpinned`.
    pub fn update(&mut self, offset: f64, geometry: Option<&Geometry>) -> PinLayout {
        let Some(g) = geometry else {
            self.set_state(PinState::Unpinned);
            self.side = PinSide::Before;
            return self.flow_layout();
        };

        self.side = if offset.is_nan() || offset <= g.start {
            PinSide::Before
        } else if offset >= g.end() {
            PinSide::After
        } else {
            PinSide::Inside
        };

        if g.is_degenerate() {
            self.set_state(PinState::Unpinned);
            return self.flow_layout();
        }

        if let Err(e) = self.engage() {
            if !self.degraded_reported {
                tracing::warn!(error = %e, "pinning disabled, scenes play unpinned");
                self.degraded_reported = true;
            }
            self.set_state(PinState::Unpinned);
            return self.flow_layout();
        }

        let inside = self.side == PinSide::Inside;
        self.set_state(self.state.next(inside));

        let placement = if self.state.is_fixed() {
            Placement::Fixed { top: g.pin_top }
        } else if self.side == PinSide::After {
            Placement::Parked { offset: g.extent }
        } else {
            Placement::Flow
        };

        PinLayout {
            state: self.state,
            side: self.side,
            placement,
            spacer_height: self.container_height + g.extent,
        }
    }

    fn set_state(&mut self, next: PinState) {
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, side = ?self.side, "pin transition");
            self.transitions += 1;
            self.state = next;
        }
    }

    fn flow_layout(&self) -> PinLayout {
        PinLayout {
            state: self.state,
            side: self.side,
            placement: Placement::Flow,
            spacer_height: self.container_height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pin/controller.rs"]
mod tests;
