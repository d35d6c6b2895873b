//! DOM event wiring for the lifetime of the page

use chrono::Utc;
use std::rc::Rc;
use uhi_site_config::RevealConfig;
use uhi_site_integration::error_recovery::report_page_error;
use uhi_site_integration::page::ids;
use uhi_site_integration::SiteApp;
use uhi_site_shared::Shortcut;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, ErrorEvent, Event, EventTarget, HtmlSelectElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

/// Attach a listener that lives as long as the page
fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(move |event: JsValue| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    }) as Box<dyn FnMut(JsValue)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn wire_all(window: &Window, document: &Document, app: &Rc<SiteApp>) -> Result<(), JsValue> {
    season_select(document, app)?;
    navbar_scroll(window, app)?;
    smooth_anchors(document)?;
    map_button(document, app)?;
    reveal_on_scroll(document, &app.config().reveal)?;
    shortcuts(document, app)?;
    resize(window, app)?;
    page_errors(window, app)?;
    load_time(window)?;
    Ok(())
}

fn season_select(document: &Document, app: &Rc<SiteApp>) -> Result<(), JsValue> {
    let Some(select) = document.get_element_by_id(ids::SEASON_SELECT) else {
        return Ok(());
    };
    let app = Rc::clone(app);
    listen(&select, "change", move |event: Event| {
        let Some(select) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        if let Err(e) = app.controller().select_season(&select.value()) {
            log::warn!("Season change ignored: {e}");
        }
    })
}

fn navbar_scroll(window: &Window, app: &Rc<SiteApp>) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let scroll_window = window.clone();
    listen(window, "scroll", move |_: Event| {
        let y = scroll_window.scroll_y().unwrap_or(0.0);
        if let Err(e) = app.controller().on_scroll(y) {
            log::debug!("Navbar update skipped: {e}");
        }
    })
}

fn smooth_anchors(document: &Document) -> Result<(), JsValue> {
    let anchors = document.query_selector_all(r##"a[href^="#"]"##)?;
    for index in 0..anchors.length() {
        let Some(anchor) = anchors.item(index) else {
            continue;
        };
        let Ok(anchor) = anchor.dyn_into::<Element>() else {
            continue;
        };
        let document = document.clone();
        let href_source = anchor.clone();
        listen(&anchor, "click", move |event: Event| {
            event.prevent_default();
            let Some(href) = href_source.get_attribute("href") else {
                return;
            };
            // A bare "#" is not a valid selector
            if let Ok(Some(target)) = document.query_selector(&href) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}

fn map_button(document: &Document, app: &Rc<SiteApp>) -> Result<(), JsValue> {
    let Some(button) = document.get_element_by_id(ids::LOAD_MAP_BUTTON) else {
        return Ok(());
    };
    let app = Rc::clone(app);
    listen(&button, "click", move |_: Event| {
        if let Err(e) = app.controller().show_map_placeholder() {
            log::error!("Map placeholder failed: {e}");
        }
    })
}

/// Reveal animation: elements gain the revealed class once and are then
/// no longer observed
fn reveal_on_scroll(document: &Document, reveal: &RevealConfig) -> Result<(), JsValue> {
    let revealed_class = reveal.revealed_class.clone();
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            let target = entry.target();
            if let Err(e) = target.class_list().add_1(&revealed_class) {
                log::warn!("Reveal failed: {e:?}");
            }
            observer.unobserve(&target);
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(reveal.threshold));
    options.set_root_margin(&reveal.root_margin);

    let observer = match IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(observer) => observer,
        Err(e) => {
            log::warn!("IntersectionObserver unavailable, reveal disabled: {e:?}");
            return Ok(());
        }
    };
    callback.forget();

    let targets = document.query_selector_all(&reveal.selector_list())?;
    for index in 0..targets.length() {
        if let Some(element) = targets.item(index).and_then(|n| n.dyn_into::<Element>().ok()) {
            observer.observe(&element);
        }
    }
    log::debug!("Observing {} reveal targets", targets.length());
    Ok(())
}

fn shortcuts(document: &Document, app: &Rc<SiteApp>) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    listen(document, "keydown", move |event: KeyboardEvent| {
        let Some(shortcut) = Shortcut::from_key(&event.key(), event.ctrl_key(), event.meta_key())
        else {
            return;
        };
        event.prevent_default();
        if let Err(e) = app.controller().handle_shortcut(shortcut, Utc::now()) {
            log::error!("Shortcut {shortcut:?} failed: {e}");
        }
    })
}

fn resize(window: &Window, app: &Rc<SiteApp>) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    listen(window, "resize", move |_: Event| {
        if let Err(e) = SiteApp::on_resize(&app) {
            log::warn!("Resize scheduling failed: {e}");
        }
    })
}

fn page_errors(window: &Window, app: &Rc<SiteApp>) -> Result<(), JsValue> {
    let app = Rc::downgrade(app);
    listen(window, "error", move |event: ErrorEvent| {
        let app = app.upgrade();
        report_page_error(app.as_deref().map(SiteApp::controller), &event.message());
    })
}

fn load_time(window: &Window) -> Result<(), JsValue> {
    let Some(performance) = window.performance() else {
        return Ok(());
    };
    listen(window, "load", move |_: Event| {
        log::info!("Page load time: {:.0}ms", performance.now());
    })
}
