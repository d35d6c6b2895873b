//! Application root: owns both drivers and the state they share

use crate::chart_registry::ChartRegistry;
use crate::engine::{LiveCharts, RenderEngine};
use crate::page::PageSurface;
use crate::scheduler::{Debouncer, ScheduledTask, TimerHost};
use crate::site_controller::SiteController;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use uhi_site_config::{Driver, HeatmapGenerator, SiteConfig};
use uhi_site_shared::SiteResult;

/// The running site.
///
/// Held in an `Rc` by the browser layer; scheduled work keeps only a `Weak`
/// reference so dropping the app cancels nothing but makes pending tasks
/// no-ops.
pub struct SiteApp {
    config: SiteConfig,
    engine: Rc<dyn RenderEngine>,
    timers: Rc<dyn TimerHost>,
    controller: SiteController,
    live: LiveCharts,
    heatmap: RefCell<HeatmapGenerator>,
    deferred_init: ScheduledTask,
    resize: Debouncer,
}

impl SiteApp {
    pub fn new(
        config: SiteConfig,
        page: Rc<dyn PageSurface>,
        engine: Rc<dyn RenderEngine>,
        timers: Rc<dyn TimerHost>,
        heatmap: HeatmapGenerator,
    ) -> Self {
        let resize = Debouncer::new(config.timing.resize_debounce());
        let controller = SiteController::new(page, Rc::clone(&timers), config.clone());
        Self {
            config,
            engine,
            timers,
            controller,
            live: LiveCharts::new(),
            heatmap: RefCell::new(heatmap),
            deferred_init: ScheduledTask::new(),
            resize,
        }
    }

    /// Render the overview charts now and schedule the research charts
    /// after the start-up delay
    pub fn start(app: &Rc<Self>) -> SiteResult<()> {
        app.controller.render_overview_charts(
            app.engine.as_ref(),
            &app.live,
            &mut app.heatmap.borrow_mut(),
        )?;

        let weak: Weak<Self> = Rc::downgrade(app);
        app.deferred_init.schedule(
            app.timers.as_ref(),
            app.config.timing.chart_init_delay(),
            Box::new(move || {
                if let Some(app) = weak.upgrade() {
                    if let Err(e) = app.init_research_charts() {
                        log::error!("Research chart initialisation failed: {e}");
                    }
                }
            }),
        )?;
        log::info!("Urban heat island site initialised");
        Ok(())
    }

    /// Mount the research charts the page provides
    pub fn init_research_charts(&self) -> SiteResult<usize> {
        let registry = ChartRegistry::resolve(self.controller.page().as_ref(), Driver::Research);
        registry.init_all(
            self.engine.as_ref(),
            &self.live,
            &mut self.heatmap.borrow_mut(),
        )
    }

    /// Viewport resize: re-flow every live chart once the burst is over
    pub fn on_resize(app: &Rc<Self>) -> SiteResult<()> {
        let weak = Rc::downgrade(app);
        app.resize.trigger(app.timers.as_ref(), move || {
            if let Some(app) = weak.upgrade() {
                app.live.resize_all(app.engine.as_ref());
            }
        })
    }

    pub fn controller(&self) -> &SiteController {
        &self.controller
    }

    pub fn live_charts(&self) -> &LiveCharts {
        &self.live
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn research_pending(&self) -> bool {
        self.deferred_init.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePage, ManualTimers, RecordingEngine};
    use std::time::Duration;

    #[test]
    fn test_research_charts_wait_for_start_delay() {
        let page = Rc::new(FakePage::with_elements([
            "uhi-distribution-chart",
            "uhiHeatmapChart",
            "modelPerformanceChart",
        ]));
        let engine = Rc::new(RecordingEngine::new());
        let timers = Rc::new(ManualTimers::new());
        let app = Rc::new(SiteApp::new(
            SiteConfig::default(),
            page,
            Rc::clone(&engine) as Rc<dyn RenderEngine>,
            Rc::clone(&timers) as Rc<dyn TimerHost>,
            HeatmapGenerator::new(5),
        ));

        SiteApp::start(&app).unwrap();
        assert_eq!(engine.mounted_ids(), vec!["uhi-distribution-chart"]);
        assert!(app.research_pending());

        timers.advance(Duration::from_millis(99));
        assert_eq!(app.live_charts().len(), 1);

        timers.advance(Duration::from_millis(1));
        assert_eq!(
            engine.mounted_ids(),
            vec!["uhi-distribution-chart", "uhiHeatmapChart", "modelPerformanceChart"]
        );
        assert!(!app.research_pending());
    }

    #[test]
    fn test_dropped_app_ignores_pending_work() {
        let engine = Rc::new(RecordingEngine::new());
        let timers = Rc::new(ManualTimers::new());
        let app = Rc::new(SiteApp::new(
            SiteConfig::default(),
            Rc::new(FakePage::with_elements(["uhiHeatmapChart"])),
            Rc::clone(&engine) as Rc<dyn RenderEngine>,
            Rc::clone(&timers) as Rc<dyn TimerHost>,
            HeatmapGenerator::new(5),
        ));

        SiteApp::start(&app).unwrap();
        drop(app);
        assert_eq!(timers.advance(Duration::from_millis(200)), 1);
        assert!(engine.mounted_ids().is_empty());
    }
}
