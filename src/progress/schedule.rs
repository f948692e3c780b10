//! Coalesces high-frequency input into at most one recomputation per frame.

/// Answer to an input notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum FrameRequest {
    /// First event since the last frame: the host should request an animation frame.
    Schedule,
    /// A frame is already pending; this event folds into it.
    AlreadyScheduled,
}

impl FrameRequest {
    pub fn needs_frame(self) -> bool {
        matches!(self, Self::Schedule)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SchedulerStats {
    /// Frames actually requested from the host.
    pub requested: u64,
    /// Events folded into an already pending frame.
    pub coalesced: u64,
    /// Frame callbacks that found pending work.
    pub frames: u64,
}

/// Single-consumer frame gate. Written only from the host's event and frame callbacks,
/// which run on one thread, so a plain flag is enough.
#[derive(Clone, Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
    stats: SchedulerStats,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self) -> FrameRequest {
        if self.pending {
            self.stats.coalesced += 1;
            return FrameRequest::AlreadyScheduled;
        }
        self.pending = true;
        self.stats.requested += 1;
        FrameRequest::Schedule
    }

    /// Consume the pending flag at the start of a frame callback. Returns false for a
    /// spurious frame with nothing to do.
    pub fn begin_frame(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.stats.frames += 1;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/schedule.rs"]
mod tests;
