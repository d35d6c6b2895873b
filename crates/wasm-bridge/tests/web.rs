//! Browser checks for the DOM page and timers

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use uhi_site_integration::{ElementLookup, PageSurface, TimerHost};
use uhi_site_shared::{NotificationKind, SiteError};
use uhi_site_wasm::browser_timers::BrowserTimers;
use uhi_site_wasm::dom_page::DomPage;
use wasm_bindgen_test::*;
use web_sys::Document;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn add(document: &Document, id: &str, class: &str) {
    let element = document.create_element("div").unwrap();
    element.set_id(id);
    element.set_class_name(class);
    document.body().unwrap().append_child(&element).unwrap();
}

#[wasm_bindgen_test]
fn season_info_broadcast() {
    let document = document();
    add(&document, "season-a", "season-info");
    add(&document, "season-b", "season-info badge");
    let page = DomPage::new(document.clone());

    assert!(page.set_text_by_class("season-info", "Winter Night") >= 2);
    let text = document
        .get_element_by_id("season-b")
        .unwrap()
        .text_content()
        .unwrap();
    assert_eq!(text, "Winter Night");
}

#[wasm_bindgen_test]
fn missing_element_is_reported() {
    let page = DomPage::new(document());
    assert!(!page.has_element("no-such-element"));
    assert_eq!(
        page.set_display("no-such-element", "flex").unwrap_err(),
        SiteError::missing("no-such-element")
    );
}

#[wasm_bindgen_test]
fn map_block_detection() {
    let document = document();
    add(&document, "map-host", "");
    let page = DomPage::new(document);

    assert!(!page.has_descendant_with_class("map-host", "map-info").unwrap());
    page.append_block("map-host", "map-info mt-4", "<p>info</p>")
        .unwrap();
    assert!(page.has_descendant_with_class("map-host", "map-info").unwrap());
}

#[wasm_bindgen_test]
fn notification_removed() {
    let document = document();
    let page = DomPage::new(document.clone());
    let id = page
        .show_notification("Saved", NotificationKind::Success)
        .unwrap();
    assert!(document.query_selector(".alert-success").unwrap().is_some());

    page.remove_notification(id);
    assert!(document.query_selector(".alert-success").unwrap().is_none());
}

async fn sleep(millis: i32) {
    let wait = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(wait).await.unwrap();
}

#[wasm_bindgen_test]
async fn timer_fires() {
    let timers = BrowserTimers::new(web_sys::window().unwrap());
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    timers
        .set_timeout(Duration::from_millis(5), Box::new(move || flag.set(true)))
        .unwrap();
    assert_eq!(timers.pending_count(), 1);

    sleep(50).await;
    assert!(fired.get());
    assert_eq!(timers.pending_count(), 0);
}

#[wasm_bindgen_test]
async fn cleared_timer_releases_task() {
    let timers = BrowserTimers::new(web_sys::window().unwrap());
    let fired = Rc::new(Cell::new(0));
    let mut ids = Vec::new();
    for _ in 0..10 {
        let counter = Rc::clone(&fired);
        let id = timers
            .set_timeout(
                Duration::from_millis(5),
                Box::new(move || counter.set(counter.get() + 1)),
            )
            .unwrap();
        ids.push(id);
    }
    let last = ids.pop().unwrap();
    for id in ids {
        timers.clear_timeout(id);
    }
    assert_eq!(timers.pending_count(), 1);
    // Cleared tasks dropped their captured counters
    assert_eq!(Rc::strong_count(&fired), 2);

    sleep(50).await;
    assert_eq!(fired.get(), 1);
    assert_eq!(timers.pending_count(), 0);
    assert_eq!(Rc::strong_count(&fired), 1);
    timers.clear_timeout(last);
}
