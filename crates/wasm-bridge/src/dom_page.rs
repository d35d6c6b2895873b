//! DOM-backed page surface

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use uhi_site_integration::{ElementLookup, NotificationId, PageSurface};
use uhi_site_shared::{NotificationKind, SiteError, SiteResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlElement, Url};

const NOTIFICATION_STYLE: &str = "top: 100px; right: 20px; z-index: 9999; min-width: 300px;";

pub struct DomPage {
    document: Document,
    notifications: RefCell<HashMap<NotificationId, Element>>,
    next_notification: Cell<u32>,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            notifications: RefCell::new(HashMap::new()),
            next_notification: Cell::new(0),
        }
    }

    fn element(&self, id: &str) -> SiteResult<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| SiteError::missing(id))
    }

    fn html_element(&self, id: &str) -> SiteResult<HtmlElement> {
        self.element(id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SiteError::JsInterop {
                message: format!("#{id} is not an HTML element"),
            })
    }

    fn body(&self) -> SiteResult<HtmlElement> {
        self.document.body().ok_or_else(|| SiteError::missing("body"))
    }
}

impl ElementLookup for DomPage {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }
}

impl PageSurface for DomPage {
    fn set_text_by_class(&self, class: &str, text: &str) -> usize {
        let elements = self.document.get_elements_by_class_name(class);
        let count = elements.length();
        for index in 0..count {
            if let Some(element) = elements.item(index) {
                element.set_text_content(Some(text));
            }
        }
        count as usize
    }

    fn set_inner_html(&self, id: &str, html: &str) -> SiteResult<()> {
        self.element(id)?.set_inner_html(html);
        Ok(())
    }

    fn replace_class(&self, id: &str, remove: &str, add: &str) -> SiteResult<()> {
        let classes = self.element(id)?.class_list();
        classes.remove_1(remove)?;
        classes.add_1(add)?;
        Ok(())
    }

    fn set_display(&self, id: &str, display: &str) -> SiteResult<()> {
        self.html_element(id)?
            .style()
            .set_property("display", display)?;
        Ok(())
    }

    fn has_descendant_with_class(&self, id: &str, class: &str) -> SiteResult<bool> {
        let found = self.element(id)?.query_selector(&format!(".{class}"))?;
        Ok(found.is_some())
    }

    fn append_block(&self, id: &str, class_list: &str, html: &str) -> SiteResult<()> {
        let parent = self.element(id)?;
        let block = self.document.create_element("div")?;
        block.set_class_name(class_list);
        block.set_inner_html(html);
        parent.append_child(&block)?;
        Ok(())
    }

    fn toggle_class(&self, selector: &str, class: &str, on: bool) -> SiteResult<()> {
        let element = self
            .document
            .query_selector(selector)?
            .ok_or_else(|| SiteError::missing(selector))?;
        element.class_list().toggle_with_force(class, on)?;
        Ok(())
    }

    fn show_notification(
        &self,
        message: &str,
        kind: NotificationKind,
    ) -> SiteResult<NotificationId> {
        let notification = self.document.create_element("div")?;
        notification.set_class_name(&format!(
            "alert alert-{} alert-dismissible fade show position-fixed",
            kind.as_str()
        ));
        notification.set_attribute("style", NOTIFICATION_STYLE)?;
        notification.set_inner_html(&format!(
            r#"{message}<button type="button" class="btn-close" data-bs-dismiss="alert"></button>"#
        ));
        self.body()?.append_child(&notification)?;

        let id = NotificationId(self.next_notification.get());
        self.next_notification.set(id.0.wrapping_add(1));
        self.notifications.borrow_mut().insert(id, notification);
        Ok(id)
    }

    fn remove_notification(&self, id: NotificationId) {
        if let Some(notification) = self.notifications.borrow_mut().remove(&id) {
            // The user may already have closed it
            if notification.parent_node().is_some() {
                notification.remove();
            }
        }
    }

    fn download(&self, file_name: &str, mime_type: &str, contents: &str) -> SiteResult<()> {
        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let options = BlobPropertyBag::new();
        options.set_type(mime_type);
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let anchor = self
            .document
            .create_element("a")?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| SiteError::JsInterop {
                message: "could not create anchor".to_string(),
            })?;
        anchor.set_href(&url);
        anchor.set_download(file_name);

        let body = self.body()?;
        body.append_child(&anchor)?;
        anchor.click();
        body.remove_child(&anchor)?;
        Url::revoke_object_url(&url)?;
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn request_fullscreen(&self) -> SiteResult<()> {
        let root = self
            .document
            .document_element()
            .ok_or_else(|| SiteError::missing("html"))?;
        root.request_fullscreen()?;
        Ok(())
    }

    fn exit_fullscreen(&self) -> SiteResult<()> {
        self.document.exit_fullscreen();
        Ok(())
    }

    fn click(&self, id: &str) -> SiteResult<()> {
        self.html_element(id)?.click();
        Ok(())
    }
}
