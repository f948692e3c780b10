use crate::{
    foundation::core::{Size, size_is_usable},
    foundation::error::{ScrollError, ScrollResult},
    progress::schedule::{FrameRequest, FrameScheduler, SchedulerStats},
    region::config::PageConfig,
    region::probe::LayoutProbe,
    region::scroll_region::{ScrollCorrection, ScrollRegion},
    render::adapter::{RenderAdapter, present},
};

/// What happened during one `on_frame` call.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// The frame callback found no pending work.
    pub skipped: bool,
    pub rendered: Vec<String>,
    /// Regions waiting for a usable measurement. Retried on the next frame.
    pub deferred: Vec<String>,
    /// Regions whose output could not be applied, with the reason.
    pub failed: Vec<(String, String)>,
    pub corrections: Vec<ScrollCorrection>,
}

/// All scroll regions of one page behind a single frame scheduler.
///
/// Input callbacks only record state and answer whether a frame is needed; all work
/// happens in [`Page::on_frame`], at most once per frame.
#[derive(Debug, Default)]
pub struct Page {
    regions: Vec<ScrollRegion>,
    scheduler: FrameScheduler,
    viewport: Size,
    offset: f64,
}

impl Page {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Build every region in `config`. A region with invalid configuration is left out
    /// and reported; the rest of the page is unaffected.
    pub fn from_config(config: &PageConfig) -> (Self, Vec<(String, ScrollError)>) {
        let mut page = Self::new(config.viewport);
        let mut rejected = Vec::new();
        for spec in &config.regions {
            let built = ScrollRegion::new(spec.id.clone(), spec.config.clone(), spec.scenes.clone())
                .and_then(|region| page.add_region(region));
            if let Err(e) = built {
                tracing::info!(region = %spec.id, error = %e, "region rejected");
                rejected.push((spec.id.clone(), e));
            }
        }
        (page, rejected)
    }

    pub fn add_region(&mut self, region: ScrollRegion) -> ScrollResult<FrameRequest> {
        if self.region(region.id()).is_some() {
            return Err(ScrollError::config(format!(
                "duplicate region id '{}'",
                region.id()
            )));
        }
        self.regions.push(region);
        Ok(self.scheduler.schedule())
    }

    pub fn remove_region(&mut self, id: &str) -> Option<ScrollRegion> {
        let idx = self.regions.iter().position(|r| r.id() == id)?;
        Some(self.regions.remove(idx))
    }

    pub fn region(&self, id: &str) -> Option<&ScrollRegion> {
        self.regions.iter().find(|r| r.id() == id)
    }

    pub fn region_mut(&mut self, id: &str) -> Option<&mut ScrollRegion> {
        self.regions.iter_mut().find(|r| r.id() == id)
    }

    pub fn regions(&self) -> &[ScrollRegion] {
        &self.regions
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn scheduler_stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    /// Record the latest scroll offset. Cheap; safe to call for every scroll event.
    pub fn on_scroll(&mut self, offset: f64) -> FrameRequest {
        if offset.is_finite() {
            self.offset = offset;
        }
        self.scheduler.schedule()
    }

    /// Record a viewport change. Every region is remeasured on the next frame.
    pub fn on_resize(&mut self, viewport: Size) -> FrameRequest {
        if size_is_usable(viewport) {
            self.viewport = viewport;
        }
        self.invalidate_layout()
    }

    /// Content above or inside regions reflowed (fonts, images, late mounts).
    pub fn invalidate_layout(&mut self) -> FrameRequest {
        for region in &mut self.regions {
            region.invalidate();
        }
        self.scheduler.schedule()
    }

    pub fn set_reduced_motion(&mut self, on: bool) -> FrameRequest {
        for region in &mut self.regions {
            region.set_reduced_motion(on);
        }
        self.scheduler.schedule()
    }

    /// Frame callback: remeasure stale regions, evaluate and present. Never fails; the
    /// worst outcome for a region is that it keeps its last applied state.
    ///
    /// A resize correction is applied to its region before presenting, so the frame
    /// keeps its pre-resize progress.
    #[tracing::instrument(skip_all, fields(offset = self.offset))]
    pub fn on_frame(
        &mut self,
        probe: &dyn LayoutProbe,
        adapter: &mut dyn RenderAdapter,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.scheduler.begin_frame() {
            report.skipped = true;
            return report;
        }

        for region in &mut self.regions {
            let id = region.id().to_owned();
            region.on_scroll(self.offset);

            if region.needs_measure() {
                let Some(anchor) = probe.anchor_rect(&id) else {
                    tracing::debug!(region = %id, "anchor not mounted, deferring");
                    report.deferred.push(id);
                    continue;
                };
                match region.remeasure(anchor, self.viewport, probe.container_height(&id)) {
                    Ok(Some(correction)) => {
                        // Present at the preserved progress while the host catches up.
                        region.on_scroll(correction.offset);
                        report.corrections.push(correction);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::debug!(region = %id, error = %e, "measurement failed, deferring");
                        report.deferred.push(id);
                        continue;
                    }
                }
            }

            let out = match region.update() {
                Ok(out) => out,
                Err(e) if e.is_recoverable() => {
                    report.deferred.push(id);
                    continue;
                }
                Err(e) => {
                    tracing::warn!(region = %id, error = %e, "region update failed");
                    report.failed.push((id, e.to_string()));
                    continue;
                }
            };

            match present(adapter, &id, &out.frame, &out.pin) {
                Ok(()) => report.rendered.push(id),
                Err(e) => {
                    tracing::warn!(region = %id, error = %e, "render adapter failed");
                    report.failed.push((id, e.to_string()));
                }
            }
        }

        // Only one region can be pinned at a time; its correction becomes the page offset
        // so later frames do not snap back before the host scrolls.
        if let [correction] = report.corrections.as_slice() {
            self.offset = correction.offset;
        }
        report
    }
}

#[cfg(test)]
#[path = "../../tests/unit/region/page.rs"]
mod tests;
