//! Page seam: everything the site needs from the DOM

use uhi_site_shared::{NotificationKind, SiteResult};

/// Element ids the page is expected to provide
pub mod ids {
    pub const SEASON_SELECT: &str = "season-select";
    pub const LOAD_MAP_BUTTON: &str = "load-map-btn";
    pub const MAP_PLACEHOLDER: &str = "map-placeholder";
    pub const INTERACTIVE_MAP: &str = "interactive-map";
}

/// Class carried by every element that shows the current season
pub const SEASON_INFO_CLASS: &str = "season-info";
/// Class of the map information block
pub const MAP_INFO_CLASS: &str = "map-info";

/// Handle of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u32);

/// Element presence check, used to resolve chart slots
pub trait ElementLookup {
    fn has_element(&self, id: &str) -> bool;
}

/// DOM operations used by the site controller.
///
/// Methods addressing an element by id fail with `SiteError::MissingElement`
/// when the element is absent.
pub trait PageSurface: ElementLookup {
    /// Set the text of every element carrying `class`; returns how many
    fn set_text_by_class(&self, class: &str, text: &str) -> usize;

    fn set_inner_html(&self, id: &str, html: &str) -> SiteResult<()>;

    fn replace_class(&self, id: &str, remove: &str, add: &str) -> SiteResult<()>;

    /// Set the CSS `display` property
    fn set_display(&self, id: &str, display: &str) -> SiteResult<()>;

    /// Whether any descendant of `id` carries `class`
    fn has_descendant_with_class(&self, id: &str, class: &str) -> SiteResult<bool>;

    /// Append a `div` with the given class list and inner HTML
    fn append_block(&self, id: &str, class_list: &str, html: &str) -> SiteResult<()>;

    /// Add or remove `class` on the first element matching `selector`
    fn toggle_class(&self, selector: &str, class: &str, on: bool) -> SiteResult<()>;

    fn show_notification(&self, message: &str, kind: NotificationKind)
        -> SiteResult<NotificationId>;

    /// Remove a notification if it is still attached
    fn remove_notification(&self, id: NotificationId);

    /// Offer `contents` as a file download
    fn download(&self, file_name: &str, mime_type: &str, contents: &str) -> SiteResult<()>;

    fn is_fullscreen(&self) -> bool;

    fn request_fullscreen(&self) -> SiteResult<()>;

    fn exit_fullscreen(&self) -> SiteResult<()>;

    /// Dispatch a click on the element
    fn click(&self, id: &str) -> SiteResult<()>;
}
