//! WASM entry point for the urban heat island site
//!
//! Boots the site when the module loads: reads the optional page config,
//! builds the app over the browser implementations of its seams and wires
//! the DOM listeners. Also exports the `UrbanHeatUtils` helpers.

use std::cell::RefCell;
use std::rc::Rc;
use uhi_site_config::{ConfigFormat, HeatmapGenerator, SiteConfig};
use uhi_site_integration::format::{format_locale_time, format_number, format_temperature};
use uhi_site_integration::{PageSurface, RenderEngine, SiteApp, TimerHost};
use uhi_site_shared::NotificationKind;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

pub mod browser_timers;
pub mod chart_engine;
pub mod dom_page;
pub mod listeners;

use browser_timers::BrowserTimers;
use chart_engine::ChartJsEngine;
use dom_page::DomPage;

/// Id of the optional `<script type="application/json">` holding a `SiteConfig`
const CONFIG_ELEMENT_ID: &str = "site-config";

thread_local! {
    static APP: RefCell<Option<Rc<SiteApp>>> = RefCell::new(None);
}

fn current_app() -> Option<Rc<SiteApp>> {
    APP.with(|app| app.borrow().clone())
}

fn window_and_document() -> Result<(Window, Document), JsValue> {
    let window = web_sys::window().ok_or("No window found")?;
    let document = window.document().ok_or("No document found")?;
    Ok((window, document))
}

fn read_config(document: &Document) -> Result<SiteConfig, JsValue> {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(SiteConfig::default());
    };
    let content = element.text_content().unwrap_or_default();
    if content.trim().is_empty() {
        return Ok(SiteConfig::default());
    }
    SiteConfig::load(&content, ConfigFormat::Json).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let (window, document) = window_and_document()?;
    let config = match read_config(&document) {
        Ok(config) => config,
        Err(e) => {
            console_log::init_with_level(log::Level::Info).ok();
            log::error!("Invalid site config, using defaults: {e:?}");
            SiteConfig::default()
        }
    };
    let level = config.logging.level().unwrap_or(log::Level::Info);
    console_log::init_with_level(level).ok();

    if document.ready_state() == "loading" {
        let boot_window = window.clone();
        let boot_document = document.clone();
        let on_ready = Closure::once_into_js(move || {
            if let Err(e) = boot(boot_window, boot_document, config) {
                log::error!("Site initialisation failed: {e:?}");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        Ok(())
    } else {
        boot(window, document, config)
    }
}

fn boot(window: Window, document: Document, config: SiteConfig) -> Result<(), JsValue> {
    let page: Rc<dyn PageSurface> = Rc::new(DomPage::new(document.clone()));
    let engine: Rc<dyn RenderEngine> = Rc::new(ChartJsEngine::new(document.clone()));
    let timers: Rc<dyn TimerHost> = Rc::new(BrowserTimers::new(window.clone()));

    let app = Rc::new(SiteApp::new(
        config,
        page,
        engine,
        timers,
        HeatmapGenerator::from_entropy(),
    ));
    APP.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&app)));

    SiteApp::start(&app)?;
    listeners::wire_all(&window, &document, &app)?;
    log::info!("Urban heat island site initialisation completed");
    Ok(())
}

fn with_app<R>(f: impl FnOnce(&SiteApp) -> Result<R, JsValue>) -> Result<R, JsValue> {
    let app = current_app().ok_or("Site is not initialised")?;
    f(&app)
}

/// Download the project snapshot for the selected season
#[wasm_bindgen(js_name = exportData)]
pub fn export_data() -> Result<JsValue, JsValue> {
    with_app(|app| {
        let snapshot = app.controller().export_data(chrono::Utc::now())?;
        serde_wasm_bindgen::to_value(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

#[wasm_bindgen(js_name = toggleFullscreen)]
pub fn toggle_fullscreen() -> Result<bool, JsValue> {
    with_app(|app| Ok(app.controller().toggle_fullscreen()?))
}

#[wasm_bindgen(js_name = showMapPlaceholder)]
pub fn show_map_placeholder() -> Result<(), JsValue> {
    with_app(|app| {
        app.controller().show_map_placeholder()?;
        Ok(())
    })
}

/// Show a transient notification; `kind` is `info`, `success` or `danger`
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: Option<String>) -> Result<(), JsValue> {
    let kind = match kind.as_deref() {
        None | Some("info") => NotificationKind::Info,
        Some("success") => NotificationKind::Success,
        Some("danger") => NotificationKind::Danger,
        Some(other) => return Err(JsValue::from_str(&format!("Unknown notification type: {other}"))),
    };
    with_app(|app| {
        app.controller().show_notification(message, kind)?;
        Ok(())
    })
}

#[wasm_bindgen(js_name = currentSeason)]
pub fn current_season() -> Option<String> {
    current_app().map(|app| app.controller().season().code().to_string())
}

// UrbanHeatUtils

#[wasm_bindgen(js_name = formatNumber)]
pub fn format_number_js(num: f64, decimals: Option<u32>) -> String {
    format_number(num, decimals.unwrap_or(2) as usize)
}

#[wasm_bindgen(js_name = formatTemperature)]
pub fn format_temperature_js(temp: f64) -> String {
    format_temperature(temp)
}

/// Local time as an en-US locale string
#[wasm_bindgen(js_name = getCurrentTime)]
pub fn get_current_time() -> String {
    let now = js_sys::Date::new_0();
    chrono::NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .and_then(|date| date.and_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds()))
    .map(format_locale_time)
    .unwrap_or_else(|| String::from(now.to_locale_string("en-US", &JsValue::UNDEFINED)))
}

/// Write `text` to the clipboard; failures are logged and reported as `false`
#[wasm_bindgen(js_name = copyToClipboard)]
pub async fn copy_to_clipboard(text: String) -> bool {
    match write_clipboard(&text).await {
        Ok(()) => true,
        Err(e) => {
            log::error!("Copy failed: {e:?}");
            false
        }
    }
}

async fn write_clipboard(text: &str) -> Result<(), JsValue> {
    let (window, _) = window_and_document()?;
    let clipboard = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<js_sys::Function>()?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<js_sys::Promise>()?;
    wasm_bindgen_futures::JsFuture::from(promise).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_defaults() {
        assert_eq!(format_number_js(1234.5, None), "1,234.50");
        assert_eq!(format_number_js(1234.6, Some(0)), "1,235");
        assert_eq!(format_temperature_js(0.0), "+0.0°C");
    }
}
