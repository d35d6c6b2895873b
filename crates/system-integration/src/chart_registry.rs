//! Chart slot resolution and construction

use crate::engine::{LiveCharts, RenderEngine};
use crate::page::ElementLookup;
use uhi_site_config::{ChartSlot, Driver, HeatmapGenerator};
use uhi_site_shared::SiteResult;

/// A chart slot and whether the page provides its container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBinding {
    pub slot: ChartSlot,
    pub present: bool,
}

/// The chart slots of one driver, resolved against the page once
#[derive(Debug, Clone)]
pub struct ChartRegistry {
    driver: Driver,
    bindings: Vec<SlotBinding>,
}

impl ChartRegistry {
    pub fn resolve(page: &dyn ElementLookup, driver: Driver) -> Self {
        let bindings = ChartSlot::for_driver(driver)
            .iter()
            .map(|&slot| SlotBinding {
                slot,
                present: page.has_element(slot.element_id()),
            })
            .collect();
        Self { driver, bindings }
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    pub fn bindings(&self) -> &[SlotBinding] {
        &self.bindings
    }

    pub fn present_slots(&self) -> impl Iterator<Item = ChartSlot> + '_ {
        self.bindings.iter().filter(|b| b.present).map(|b| b.slot)
    }

    /// Build and mount every present slot in order. Absent slots are
    /// skipped. An engine failure stops construction and is returned.
    pub fn init_all(
        &self,
        engine: &dyn RenderEngine,
        live: &LiveCharts,
        heatmap: &mut HeatmapGenerator,
    ) -> SiteResult<usize> {
        let mut mounted = 0;
        for slot in self.present_slots() {
            let descriptor = slot.build(heatmap);
            descriptor.validate()?;
            let handle = engine.mount(&descriptor)?;
            live.register(slot, handle);
            mounted += 1;
        }
        log::info!("Mounted {mounted} {:?} charts", self.driver);
        Ok(mounted)
    }
}
