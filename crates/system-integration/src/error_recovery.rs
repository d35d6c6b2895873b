//! Page-level error reporting
//!
//! Uncaught page errors are logged and, once the site controller exists,
//! surfaced as a danger notification. Nothing is retried or repaired.

use crate::site_controller::SiteController;
use uhi_site_shared::NotificationKind;

pub const PAGE_ERROR_MESSAGE: &str = "Page error occurred, please refresh and try again";

/// Report an uncaught page error. Returns whether the user was notified.
pub fn report_page_error(controller: Option<&SiteController>, details: &str) -> bool {
    log::error!("Page error: {details}");

    let Some(controller) = controller else {
        return false;
    };
    match controller.show_notification(PAGE_ERROR_MESSAGE, NotificationKind::Danger) {
        Ok(_) => true,
        Err(e) => {
            log::warn!("Could not show error notification: {e}");
            false
        }
    }
}
