//! Scrollreel maps scroll position onto a sequence of animated scenes.
//!
//! A page holds one or more [`ScrollRegion`]s. Each region turns the scroll offset into a
//! bounded progress value, splits that progress across its scenes, interpolates every
//! layer of every scene and pins its container while the sequence plays:
//!
//! - Describe regions with [`RegionConfig`] (or load a [`PageConfig`] from JSON)
//! - Feed host events into a [`Page`] (`on_scroll`, `on_resize`, `invalidate_layout`)
//! - Call [`Page::on_frame`] once per animation frame with a [`LayoutProbe`] and a
//!   [`RenderAdapter`]
//!
//! Evaluation is a pure function of progress, so scrubbing, resizing and re-entrant
//! updates always land on the same visual state.
#![forbid(unsafe_code)]

mod foundation;

/// Easing, layer descriptions and per-layer interpolation.
pub mod animation;
/// Frame evaluation across a whole scene table.
pub mod eval;
/// Pin state machine.
pub mod pin;
/// Scroll-to-progress conversion and frame coalescing.
pub mod progress;
/// Regions, page orchestration and configuration.
pub mod region;
/// Boundary to the presentation layer.
pub mod render;
/// Scene windows over region progress.
pub mod timeline;

pub use crate::foundation::core::{LengthUnit, Rect, Size, Window};
pub use crate::foundation::error::{ScrollError, ScrollResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::layer::{ExitPhase, Layer, LayerKind, VisualState};
pub use crate::eval::evaluator::{EvaluatedFrame, EvaluatedLayer, EvaluatedScene, Evaluator};
pub use crate::pin::controller::{
    PinController, PinLayout, PinSide, PinState, PinSupport, Placement,
};
pub use crate::progress::schedule::{FrameRequest, FrameScheduler, SchedulerStats};
pub use crate::progress::source::{Distance, Geometry, Progress, ProgressSource, TriggerPoint};
pub use crate::region::config::{PageConfig, RegionConfig, RegionSpec};
pub use crate::region::page::{FrameReport, Page};
pub use crate::region::probe::{LayoutProbe, StaticLayout, StaticProbe};
pub use crate::region::scroll_region::{RegionFrame, ScrollCorrection, ScrollRegion};
pub use crate::render::adapter::{AppliedLayer, LayerKey, RecordingAdapter, RenderAdapter};
pub use crate::timeline::scene::{Scene, SceneSpec, SceneTable};
