//! Site controller: page behavior that is not chart construction

use crate::chart_registry::ChartRegistry;
use crate::engine::{LiveCharts, RenderEngine};
use crate::page::{ids, NotificationId, PageSurface, MAP_INFO_CLASS, SEASON_INFO_CLASS};
use crate::scheduler::TimerHost;
use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::rc::Rc;
use uhi_site_config::{Driver, HeatmapGenerator, SiteConfig};
use uhi_site_shared::{
    NotificationKind, ProjectSnapshot, Season, Shortcut, SiteResult, PROJECT_LOCATION,
    STUDY_AREA_COUNT,
};

pub const EXPORT_SUCCESS_MESSAGE: &str = "Project information exported successfully!";

const MAP_LOADED_BUTTON_HTML: &str = r#"<i class="fas fa-map-marked-alt me-2"></i>Map Loaded"#;

/// Mutable page state. Lives as long as the page; nothing is persisted.
#[derive(Debug, Default)]
pub struct SiteState {
    season: Cell<Season>,
}

impl SiteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn season(&self) -> Season {
        self.season.get()
    }

    pub fn set_season(&self, season: Season) {
        self.season.set(season);
    }
}

pub struct SiteController {
    page: Rc<dyn PageSurface>,
    timers: Rc<dyn TimerHost>,
    config: SiteConfig,
    state: SiteState,
}

impl SiteController {
    pub fn new(page: Rc<dyn PageSurface>, timers: Rc<dyn TimerHost>, config: SiteConfig) -> Self {
        Self {
            page,
            timers,
            config,
            state: SiteState::new(),
        }
    }

    pub fn season(&self) -> Season {
        self.state.season()
    }

    pub fn state(&self) -> &SiteState {
        &self.state
    }

    pub fn page(&self) -> &Rc<dyn PageSurface> {
        &self.page
    }

    /// Mount the overview charts the page provides
    pub fn render_overview_charts(
        &self,
        engine: &dyn RenderEngine,
        live: &LiveCharts,
        heatmap: &mut HeatmapGenerator,
    ) -> SiteResult<usize> {
        ChartRegistry::resolve(self.page.as_ref(), Driver::Overview).init_all(engine, live, heatmap)
    }

    /// Handle a selector change. Unknown codes are rejected and leave the
    /// current season as it was.
    pub fn select_season(&self, code: &str) -> SiteResult<Season> {
        let season: Season = code.parse()?;
        self.state.set_season(season);
        self.update_season_display();
        Ok(season)
    }

    /// Write the current season name into every season-info element
    pub fn update_season_display(&self) -> usize {
        let name = self.season().display_name();
        log::info!("Current season: {name}");
        self.page.set_text_by_class(SEASON_INFO_CLASS, name)
    }

    /// Navbar styling follows the scroll position
    pub fn on_scroll(&self, scroll_y: f64) -> SiteResult<()> {
        let navbar = &self.config.navbar;
        self.page.toggle_class(
            &navbar.selector,
            &navbar.scrolled_class,
            navbar.is_scrolled(scroll_y),
        )
    }

    /// Switch the map panel to its loaded state.
    ///
    /// Repeated calls re-apply the button and panel state; the information
    /// block is only appended the first time. Returns whether it was
    /// appended.
    pub fn show_map_placeholder(&self) -> SiteResult<bool> {
        for id in [ids::MAP_PLACEHOLDER, ids::INTERACTIVE_MAP, ids::LOAD_MAP_BUTTON] {
            if !self.page.has_element(id) {
                return Err(uhi_site_shared::SiteError::missing(id));
            }
        }

        self.page
            .set_inner_html(ids::LOAD_MAP_BUTTON, MAP_LOADED_BUTTON_HTML)?;
        self.page
            .replace_class(ids::LOAD_MAP_BUTTON, "btn-primary", "btn-success")?;
        self.page.set_display(ids::MAP_PLACEHOLDER, "flex")?;
        self.page.set_display(ids::INTERACTIVE_MAP, "none")?;

        if self
            .page
            .has_descendant_with_class(ids::MAP_PLACEHOLDER, MAP_INFO_CLASS)?
        {
            return Ok(false);
        }

        self.page.append_block(
            ids::MAP_PLACEHOLDER,
            &format!("{MAP_INFO_CLASS} mt-4"),
            &self.map_information_html(),
        )?;
        log::debug!("Map information appended");
        Ok(true)
    }

    pub fn map_information_html(&self) -> String {
        format!(
            concat!(
                r#"<div class="alert alert-info">"#,
                r#"<h6><i class="fas fa-info-circle me-2"></i>Map Information</h6>"#,
                r#"<p><strong>Study Area:</strong> {areas} Dissemination Areas in {location}</p>"#,
                r#"<p><strong>Data Source:</strong> Satellite Remote Sensing, GIS, Census</p>"#,
                r#"<p><strong>Update Time:</strong> 2024</p>"#,
                r#"<p><strong>Current Season:</strong> <span class="{class}">{season}</span></p>"#,
                r#"</div>"#,
            ),
            areas = crate::format::format_number(f64::from(STUDY_AREA_COUNT), 0),
            location = PROJECT_LOCATION,
            class = SEASON_INFO_CLASS,
            season = self.season().display_name(),
        )
    }

    /// Show a transient notification, removed after the configured delay
    pub fn show_notification(
        &self,
        message: &str,
        kind: NotificationKind,
    ) -> SiteResult<NotificationId> {
        let id = self.page.show_notification(message, kind)?;
        let page = Rc::clone(&self.page);
        self.timers.set_timeout(
            self.config.timing.notification_dismiss(),
            Box::new(move || page.remove_notification(id)),
        )?;
        Ok(id)
    }

    /// Download the project snapshot for the current season
    pub fn export_data(&self, now: DateTime<Utc>) -> SiteResult<ProjectSnapshot> {
        let snapshot = ProjectSnapshot::capture(self.season(), now);
        let body = snapshot.to_pretty_json()?;
        self.page
            .download(&snapshot.file_name(), "application/json", &body)?;
        log::info!("Exported {}", snapshot.file_name());
        self.show_notification(EXPORT_SUCCESS_MESSAGE, NotificationKind::Success)?;
        Ok(snapshot)
    }

    /// Enter or leave fullscreen; returns whether fullscreen was requested
    pub fn toggle_fullscreen(&self) -> SiteResult<bool> {
        if self.page.is_fullscreen() {
            self.page.exit_fullscreen()?;
            Ok(false)
        } else {
            self.page.request_fullscreen()?;
            Ok(true)
        }
    }

    pub fn handle_shortcut(&self, shortcut: Shortcut, now: DateTime<Utc>) -> SiteResult<()> {
        log::debug!("Shortcut {shortcut:?}");
        match shortcut {
            Shortcut::Export => self.export_data(now).map(|_| ()),
            Shortcut::ToggleFullscreen => self.toggle_fullscreen().map(|_| ()),
            Shortcut::LoadMap => {
                if self.page.has_element(ids::LOAD_MAP_BUTTON) {
                    self.page.click(ids::LOAD_MAP_BUTTON)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePage, ManualTimers};
    use chrono::TimeZone;
    use std::time::Duration;
    use uhi_site_shared::SiteError;

    fn controller_with(page: &Rc<FakePage>, timers: &Rc<ManualTimers>) -> SiteController {
        SiteController::new(
            Rc::clone(page) as Rc<dyn PageSurface>,
            Rc::clone(timers) as Rc<dyn TimerHost>,
            SiteConfig::default(),
        )
    }

    fn map_page() -> Rc<FakePage> {
        let page = FakePage::new();
        page.add_element(ids::MAP_PLACEHOLDER, &[]);
        page.add_element(ids::INTERACTIVE_MAP, &[]);
        page.add_element(ids::LOAD_MAP_BUTTON, &["btn", "btn-primary"]);
        Rc::new(page)
    }

    #[test]
    fn test_default_season() {
        let page = Rc::new(FakePage::new());
        let timers = Rc::new(ManualTimers::new());
        assert_eq!(controller_with(&page, &timers).season(), Season::SummerDay);
    }

    #[test]
    fn test_unknown_season_keeps_state() {
        let page = Rc::new(FakePage::new());
        page.add_element("badge", &[SEASON_INFO_CLASS]);
        let timers = Rc::new(ManualTimers::new());
        let controller = controller_with(&page, &timers);

        controller.select_season("WD").unwrap();
        let err = controller.select_season("XX").unwrap_err();
        assert_eq!(
            err,
            SiteError::UnknownSeason {
                code: "XX".to_string()
            }
        );
        assert_eq!(controller.season(), Season::WinterDay);
        assert_eq!(page.text("badge").as_deref(), Some("Winter Day"));
    }

    #[test]
    fn test_navbar_scroll_threshold() {
        let page = Rc::new(FakePage::new());
        let timers = Rc::new(ManualTimers::new());
        let controller = controller_with(&page, &timers);

        controller.on_scroll(100.0).unwrap();
        assert!(!page.selector_has_class(".navbar", "navbar-scrolled"));
        controller.on_scroll(101.0).unwrap();
        assert!(page.selector_has_class(".navbar", "navbar-scrolled"));
        controller.on_scroll(0.0).unwrap();
        assert!(!page.selector_has_class(".navbar", "navbar-scrolled"));
    }

    #[test]
    fn test_map_placeholder_transition() {
        let page = map_page();
        let timers = Rc::new(ManualTimers::new());
        let controller = controller_with(&page, &timers);

        assert!(controller.show_map_placeholder().unwrap());
        assert!(page.has_class(ids::LOAD_MAP_BUTTON, "btn-success"));
        assert!(!page.has_class(ids::LOAD_MAP_BUTTON, "btn-primary"));
        assert!(page
            .inner_html(ids::LOAD_MAP_BUTTON)
            .unwrap()
            .ends_with("Map Loaded"));
        assert_eq!(page.display(ids::MAP_PLACEHOLDER).as_deref(), Some("flex"));
        assert_eq!(page.display(ids::INTERACTIVE_MAP).as_deref(), Some("none"));

        let blocks = page.blocks(ids::MAP_PLACEHOLDER);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].0, "map-info mt-4");
        assert!(blocks[0].1.contains("1,660 Dissemination Areas in Vancouver Region"));
        assert!(blocks[0].1.contains(r#"<span class="season-info">Summer Day</span>"#));
    }

    #[test]
    fn test_map_controls_must_exist() {
        let page = Rc::new(FakePage::with_elements([ids::MAP_PLACEHOLDER]));
        let timers = Rc::new(ManualTimers::new());
        let controller = controller_with(&page, &timers);

        assert_eq!(
            controller.show_map_placeholder().unwrap_err(),
            SiteError::missing(ids::INTERACTIVE_MAP)
        );
        assert!(page.blocks(ids::MAP_PLACEHOLDER).is_empty());
    }

    #[test]
    fn test_notification_dismissed_after_delay() {
        let page = Rc::new(FakePage::new());
        let timers = Rc::new(ManualTimers::new());
        let controller = controller_with(&page, &timers);

        controller
            .show_notification("hello", NotificationKind::Info)
            .unwrap();
        assert_eq!(page.notifications().len(), 1);

        timers.advance(Duration::from_millis(4999));
        assert_eq!(page.notifications().len(), 1);
        timers.advance(Duration::from_millis(1));
        assert!(page.notifications().is_empty());
    }

    #[test]
    fn test_export_downloads_snapshot() {
        let page = Rc::new(FakePage::new());
        let timers = Rc::new(ManualTimers::new());
        let controller = controller_with(&page, &timers);
        controller.select_season("SN").unwrap();

        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        let snapshot = controller.export_data(now).unwrap();
        assert_eq!(snapshot.season, Season::SummerNight);

        let downloads = page.downloads();
        assert_eq!(downloads.len(), 1);
        assert_eq!(
            downloads[0].file_name,
            "urban_heat_island_info_SN_2024-06-01.json"
        );
        assert_eq!(downloads[0].mime_type, "application/json");

        let notifications = page.notifications();
        assert_eq!(notifications[0].message, EXPORT_SUCCESS_MESSAGE);
        assert_eq!(notifications[0].kind, NotificationKind::Success);
    }

    #[test]
    fn test_toggle_fullscreen() {
        let page = Rc::new(FakePage::new());
        let timers = Rc::new(ManualTimers::new());
        let controller = controller_with(&page, &timers);

        assert!(controller.toggle_fullscreen().unwrap());
        assert!(page.is_fullscreen());
        assert!(!controller.toggle_fullscreen().unwrap());
        assert!(!page.is_fullscreen());
    }

    #[test]
    fn test_load_map_shortcut_clicks_button_when_present() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timers = Rc::new(ManualTimers::new());

        let empty = Rc::new(FakePage::new());
        controller_with(&empty, &timers)
            .handle_shortcut(Shortcut::LoadMap, now)
            .unwrap();
        assert!(empty.clicks().is_empty());

        let page = map_page();
        controller_with(&page, &timers)
            .handle_shortcut(Shortcut::LoadMap, now)
            .unwrap();
        assert_eq!(page.clicks(), vec![ids::LOAD_MAP_BUTTON]);
    }
}
