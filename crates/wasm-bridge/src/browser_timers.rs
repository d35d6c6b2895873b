//! `setTimeout`-backed timer host
//!
//! Every timeout goes through one long-lived dispatcher closure that receives
//! a key as its argument. Tasks wait in a table until they fire or are
//! cleared, so cancelled timeouts release what they captured.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use uhi_site_integration::{TimerHost, TimerId};
use uhi_site_shared::SiteResult;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

struct Pending {
    handle: i32,
    task: Box<dyn FnOnce()>,
}

type TaskTable = Rc<RefCell<HashMap<u32, Pending>>>;

pub struct BrowserTimers {
    window: Window,
    tasks: TaskTable,
    next_key: Cell<u32>,
    dispatch: Closure<dyn FnMut(JsValue)>,
}

impl BrowserTimers {
    pub fn new(window: Window) -> Self {
        let tasks: TaskTable = Rc::new(RefCell::new(HashMap::new()));
        let table = Rc::clone(&tasks);
        let dispatch = Closure::wrap(Box::new(move |key: JsValue| {
            let Some(key) = key.as_f64() else {
                return;
            };
            // Release the borrow before running; the task may schedule more work
            let pending = table.borrow_mut().remove(&(key as u32));
            if let Some(pending) = pending {
                (pending.task)();
            }
        }) as Box<dyn FnMut(JsValue)>);

        Self {
            window,
            tasks,
            next_key: Cell::new(0),
            dispatch,
        }
    }

    /// Timeouts scheduled but neither fired nor cleared
    pub fn pending_count(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl TimerHost for BrowserTimers {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> SiteResult<TimerId> {
        let key = self.next_key.get();
        self.next_key.set(key.wrapping_add(1));

        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_1(
                self.dispatch.as_ref().unchecked_ref(),
                millis,
                &JsValue::from(key),
            )?;
        self.tasks
            .borrow_mut()
            .insert(key, Pending { handle, task });
        Ok(TimerId(handle))
    }

    fn clear_timeout(&self, id: TimerId) {
        self.window.clear_timeout_with_handle(id.0);
        self.tasks
            .borrow_mut()
            .retain(|_, pending| pending.handle != id.0);
    }
}
