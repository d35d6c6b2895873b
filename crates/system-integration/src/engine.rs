//! Rendering engine seam and the registry of live chart instances

use std::cell::RefCell;
use uhi_site_config::ChartSlot;
use uhi_site_shared::{ChartDescriptor, SiteResult};
use uuid::Uuid;

/// Identifies one live chart instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(Uuid);

impl ChartHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl Default for ChartHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// External chart renderer
pub trait RenderEngine {
    /// Draw the descriptor on its target element and keep it live
    fn mount(&self, descriptor: &ChartDescriptor) -> SiteResult<ChartHandle>;

    /// Recompute the layout of a live chart
    fn resize(&self, handle: ChartHandle) -> SiteResult<()>;
}

/// Every chart mounted on the page, regardless of which driver built it
#[derive(Debug, Default)]
pub struct LiveCharts {
    charts: RefCell<Vec<(ChartSlot, ChartHandle)>>,
}

impl LiveCharts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, slot: ChartSlot, handle: ChartHandle) {
        self.charts.borrow_mut().push((slot, handle));
    }

    pub fn len(&self) -> usize {
        self.charts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.borrow().is_empty()
    }

    pub fn handle_for(&self, slot: ChartSlot) -> Option<ChartHandle> {
        self.charts
            .borrow()
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, handle)| *handle)
    }

    pub fn slots(&self) -> Vec<ChartSlot> {
        self.charts.borrow().iter().map(|(slot, _)| *slot).collect()
    }

    /// Ask every live chart to recompute its layout. A failing chart is
    /// logged and skipped. Returns the number resized.
    pub fn resize_all(&self, engine: &dyn RenderEngine) -> usize {
        // Copy out so the engine may register charts while we iterate
        let charts: Vec<_> = self.charts.borrow().clone();
        let mut resized = 0;
        for (slot, handle) in charts {
            match engine.resize(handle) {
                Ok(()) => resized += 1,
                Err(e) => log::warn!("Resize failed for {}: {e}", slot.element_id()),
            }
        }
        log::debug!("Resized {resized} charts");
        resized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingEngine;
    use uhi_site_config::HeatmapGenerator;

    #[test]
    fn test_handles_are_unique() {
        assert_ne!(ChartHandle::new(), ChartHandle::new());
    }

    #[test]
    fn test_resize_all_reaches_every_chart() {
        let engine = RecordingEngine::new();
        let live = LiveCharts::new();
        let mut heatmap = HeatmapGenerator::new(0);

        for slot in [ChartSlot::ModelPerformance, ChartSlot::SeasonalPattern] {
            let handle = engine.mount(&slot.build(&mut heatmap)).unwrap();
            live.register(slot, handle);
        }

        assert_eq!(live.resize_all(&engine), 2);
        for slot in live.slots() {
            let handle = live.handle_for(slot).unwrap();
            assert_eq!(engine.resize_count(handle), 1);
        }
    }
}
