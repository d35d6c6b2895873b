//! In-memory implementations of the page, engine and timer seams.
//!
//! Used by the unit tests here, the integration tests and anything that
//! wants to drive the site without a browser.

use crate::engine::{ChartHandle, RenderEngine};
use crate::page::{ElementLookup, NotificationId, PageSurface};
use crate::scheduler::{TimerHost, TimerId};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use uhi_site_shared::{ChartDescriptor, NotificationKind, SiteError, SiteResult};

struct PendingTimer {
    id: TimerId,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

/// Virtual clock timer host. Nothing runs until `advance` is called.
#[derive(Default)]
pub struct ManualTimers {
    now: Cell<Duration>,
    next_id: Cell<i32>,
    pending: RefCell<Vec<PendingTimer>>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Move the clock forward, running due tasks in due order. Tasks may
    /// schedule further tasks; those run too if they fall inside the window.
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut ran = 0;

        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                let earliest = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id.0))
                    .map(|(index, _)| index);
                earliest.map(|index| pending.remove(index))
            };

            match next {
                Some(timer) => {
                    self.now.set(timer.due);
                    (timer.task)();
                    ran += 1;
                }
                None => break,
            }
        }

        self.now.set(target);
        ran
    }
}

impl TimerHost for ManualTimers {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> SiteResult<TimerId> {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.pending.borrow_mut().push(PendingTimer {
            id,
            due: self.now.get() + delay,
            task,
        });
        Ok(id)
    }

    fn clear_timeout(&self, id: TimerId) {
        self.pending.borrow_mut().retain(|t| t.id != id);
    }
}

/// Engine that records mounts and resizes
#[derive(Default)]
pub struct RecordingEngine {
    mounted: RefCell<Vec<(ChartHandle, ChartDescriptor)>>,
    resizes: RefCell<HashMap<ChartHandle, usize>>,
    failing_target: RefCell<Option<String>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every mount on `element_id` fail
    pub fn fail_on(&self, element_id: &str) {
        *self.failing_target.borrow_mut() = Some(element_id.to_string());
    }

    pub fn mounted_ids(&self) -> Vec<String> {
        self.mounted
            .borrow()
            .iter()
            .map(|(_, d)| d.target_element_id.clone())
            .collect()
    }

    pub fn descriptor_for(&self, element_id: &str) -> Option<ChartDescriptor> {
        self.mounted
            .borrow()
            .iter()
            .find(|(_, d)| d.target_element_id == element_id)
            .map(|(_, d)| d.clone())
    }

    pub fn resize_count(&self, handle: ChartHandle) -> usize {
        self.resizes.borrow().get(&handle).copied().unwrap_or(0)
    }

    pub fn total_resizes(&self) -> usize {
        self.resizes.borrow().values().sum()
    }

    pub fn handles(&self) -> Vec<ChartHandle> {
        self.mounted.borrow().iter().map(|(h, _)| *h).collect()
    }
}

impl RenderEngine for RecordingEngine {
    fn mount(&self, descriptor: &ChartDescriptor) -> SiteResult<ChartHandle> {
        if self.failing_target.borrow().as_deref() == Some(descriptor.target_element_id.as_str()) {
            return Err(SiteError::engine("Chart is not defined"));
        }
        let handle = ChartHandle::new();
        self.mounted.borrow_mut().push((handle, descriptor.clone()));
        Ok(handle)
    }

    fn resize(&self, handle: ChartHandle) -> SiteResult<()> {
        *self.resizes.borrow_mut().entry(handle).or_insert(0) += 1;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
struct FakeElement {
    classes: BTreeSet<String>,
    text: String,
    inner_html: String,
    display: Option<String>,
    /// Appended blocks as (class list, html)
    blocks: Vec<(String, String)>,
}

/// A transient notification shown by `FakePage`
#[derive(Debug, Clone, PartialEq)]
pub struct FakeNotification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
}

/// A file offered by `FakePage::download`
#[derive(Debug, Clone, PartialEq)]
pub struct FakeDownload {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

/// DOM stand-in keyed by element id
#[derive(Default)]
pub struct FakePage {
    elements: RefCell<HashMap<String, FakeElement>>,
    selector_classes: RefCell<HashMap<String, BTreeSet<String>>>,
    notifications: RefCell<Vec<FakeNotification>>,
    next_notification: Cell<u32>,
    downloads: RefCell<Vec<FakeDownload>>,
    fullscreen: Cell<bool>,
    clicks: RefCell<Vec<String>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with the given element ids
    pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let page = Self::new();
        for id in ids {
            page.add_element(id, &[]);
        }
        page
    }

    pub fn add_element(&self, id: &str, classes: &[&str]) {
        let element = FakeElement {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        };
        self.elements.borrow_mut().insert(id.to_string(), element);
    }

    fn with_element<R>(&self, id: &str, f: impl FnOnce(&mut FakeElement) -> R) -> SiteResult<R> {
        self.elements
            .borrow_mut()
            .get_mut(id)
            .map(f)
            .ok_or_else(|| SiteError::missing(id))
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(|e| e.text.clone())
    }

    pub fn inner_html(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(|e| e.inner_html.clone())
    }

    pub fn display(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).and_then(|e| e.display.clone())
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .borrow()
            .get(id)
            .map(|e| e.classes.contains(class))
            .unwrap_or(false)
    }

    pub fn blocks(&self, id: &str) -> Vec<(String, String)> {
        self.elements
            .borrow()
            .get(id)
            .map(|e| e.blocks.clone())
            .unwrap_or_default()
    }

    pub fn selector_has_class(&self, selector: &str, class: &str) -> bool {
        self.selector_classes
            .borrow()
            .get(selector)
            .map(|set| set.contains(class))
            .unwrap_or(false)
    }

    pub fn notifications(&self) -> Vec<FakeNotification> {
        self.notifications.borrow().clone()
    }

    pub fn downloads(&self) -> Vec<FakeDownload> {
        self.downloads.borrow().clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.clicks.borrow().clone()
    }
}

impl ElementLookup for FakePage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.borrow().contains_key(id)
    }
}

impl PageSurface for FakePage {
    fn set_text_by_class(&self, class: &str, text: &str) -> usize {
        let mut updated = 0;
        for element in self.elements.borrow_mut().values_mut() {
            if element.classes.contains(class) {
                element.text = text.to_string();
                updated += 1;
            }
        }
        updated
    }

    fn set_inner_html(&self, id: &str, html: &str) -> SiteResult<()> {
        self.with_element(id, |e| e.inner_html = html.to_string())
    }

    fn replace_class(&self, id: &str, remove: &str, add: &str) -> SiteResult<()> {
        self.with_element(id, |e| {
            e.classes.remove(remove);
            e.classes.insert(add.to_string());
        })
    }

    fn set_display(&self, id: &str, display: &str) -> SiteResult<()> {
        self.with_element(id, |e| e.display = Some(display.to_string()))
    }

    fn has_descendant_with_class(&self, id: &str, class: &str) -> SiteResult<bool> {
        self.with_element(id, |e| {
            e.blocks
                .iter()
                .any(|(classes, _)| classes.split_whitespace().any(|c| c == class))
        })
    }

    fn append_block(&self, id: &str, class_list: &str, html: &str) -> SiteResult<()> {
        self.with_element(id, |e| {
            e.blocks.push((class_list.to_string(), html.to_string()))
        })
    }

    fn toggle_class(&self, selector: &str, class: &str, on: bool) -> SiteResult<()> {
        let mut selectors = self.selector_classes.borrow_mut();
        let classes = selectors.entry(selector.to_string()).or_default();
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
        Ok(())
    }

    fn show_notification(
        &self,
        message: &str,
        kind: NotificationKind,
    ) -> SiteResult<NotificationId> {
        let id = NotificationId(self.next_notification.get());
        self.next_notification.set(id.0 + 1);
        self.notifications.borrow_mut().push(FakeNotification {
            id,
            message: message.to_string(),
            kind,
        });
        Ok(id)
    }

    fn remove_notification(&self, id: NotificationId) {
        self.notifications.borrow_mut().retain(|n| n.id != id);
    }

    fn download(&self, file_name: &str, mime_type: &str, contents: &str) -> SiteResult<()> {
        self.downloads.borrow_mut().push(FakeDownload {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            contents: contents.to_string(),
        });
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    fn request_fullscreen(&self) -> SiteResult<()> {
        self.fullscreen.set(true);
        Ok(())
    }

    fn exit_fullscreen(&self) -> SiteResult<()> {
        self.fullscreen.set(false);
        Ok(())
    }

    fn click(&self, id: &str) -> SiteResult<()> {
        if !self.has_element(id) {
            return Err(SiteError::missing(id));
        }
        self.clicks.borrow_mut().push(id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_manual_timers_run_in_due_order() {
        let timers = ManualTimers::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for (name, delay) in [("late", 30), ("early", 10), ("middle", 20)] {
            let order = Rc::clone(&order);
            timers
                .set_timeout(
                    Duration::from_millis(delay),
                    Box::new(move || order.borrow_mut().push(name)),
                )
                .unwrap();
        }

        assert_eq!(timers.advance(Duration::from_millis(25)), 2);
        assert_eq!(*order.borrow(), vec!["early", "middle"]);
        assert_eq!(timers.now(), Duration::from_millis(25));
        assert_eq!(timers.pending_count(), 1);
    }

    #[test]
    fn test_fake_page_missing_element() {
        let page = FakePage::new();
        assert_eq!(
            page.set_display("nope", "none").unwrap_err(),
            SiteError::missing("nope")
        );
    }
}
