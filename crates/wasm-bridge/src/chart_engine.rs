//! Chart.js rendering engine
//!
//! Live charts are kept in thread-local storage keyed by handle, together
//! with the callbacks the charts call back into.

use js_sys::{Array, Object, Reflect};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use uhi_site_integration::bridge::{engine_config, tick_label};
use uhi_site_integration::{ChartHandle, RenderEngine};
use uhi_site_shared::{ChartDescriptor, SiteError, SiteResult, TooltipFormat, ValueAxis};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

#[wasm_bindgen]
extern "C" {
    /// The global `Chart` constructor
    #[wasm_bindgen(js_name = Chart)]
    type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(item: &Element, config: &JsValue) -> Result<ChartJs, JsValue>;

    #[wasm_bindgen(method)]
    fn resize(this: &ChartJs);

    #[wasm_bindgen(method)]
    fn destroy(this: &ChartJs);
}

type Callback = Closure<dyn Fn(JsValue, JsValue) -> JsValue>;

struct LiveChart {
    chart: ChartJs,
    _callbacks: Vec<Callback>,
}

thread_local! {
    static LIVE_CHARTS: RefCell<HashMap<Uuid, LiveChart>> = RefCell::new(HashMap::new());
}

/// Rendering engine backed by the page's Chart.js global
pub struct ChartJsEngine {
    document: Document,
}

impl ChartJsEngine {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Number of charts currently alive
    pub fn live_count() -> usize {
        LIVE_CHARTS.with(|charts| charts.borrow().len())
    }

    /// Destroy every chart, e.g. before the module is torn down
    pub fn destroy_all() {
        LIVE_CHARTS.with(|charts| {
            for (_, live) in charts.borrow_mut().drain() {
                live.chart.destroy();
            }
        });
    }
}

impl RenderEngine for ChartJsEngine {
    fn mount(&self, descriptor: &ChartDescriptor) -> SiteResult<ChartHandle> {
        let target = self
            .document
            .get_element_by_id(&descriptor.target_element_id)
            .ok_or_else(|| SiteError::missing(&descriptor.target_element_id))?;

        let config = engine_config(descriptor)
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| SiteError::Serialization {
                message: e.to_string(),
            })?;

        let callbacks = attach_callbacks(&config, descriptor)?;

        let chart = ChartJs::new(&target, &config).map_err(|e| {
            SiteError::engine(
                e.dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
                    .unwrap_or_else(|| format!("{e:?}")),
            )
        })?;

        let handle = ChartHandle::new();
        LIVE_CHARTS.with(|charts| {
            charts.borrow_mut().insert(
                handle.id(),
                LiveChart {
                    chart,
                    _callbacks: callbacks,
                },
            );
        });
        log::debug!("Mounted chart on #{}", descriptor.target_element_id);
        Ok(handle)
    }

    fn resize(&self, handle: ChartHandle) -> SiteResult<()> {
        LIVE_CHARTS
            .with(|charts| charts.borrow().get(&handle.id()).map(|live| live.chart.resize()))
            .ok_or_else(|| SiteError::engine("Chart instance not found"))
    }
}

/// Get `parent[key]`, creating an empty object when absent
fn child_object(parent: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    let existing = Reflect::get(parent, &JsValue::from_str(key))?;
    if existing.is_object() {
        return Ok(existing);
    }
    let created: JsValue = Object::new().into();
    Reflect::set(parent, &JsValue::from_str(key), &created)?;
    Ok(created)
}

fn object_path(root: &JsValue, path: &[&str]) -> Result<JsValue, JsValue> {
    path.iter()
        .try_fold(root.clone(), |node, key| child_object(&node, key))
}

/// Install the tooltip label and tick stride callbacks
fn attach_callbacks(config: &JsValue, descriptor: &ChartDescriptor) -> SiteResult<Vec<Callback>> {
    let mut callbacks = Vec::new();
    let options = &descriptor.options;

    if !options.tooltip.is_default() {
        let format = options.tooltip.clone();
        let callback: Callback = Closure::wrap(Box::new(move |context: JsValue, _: JsValue| {
            tooltip_label(&format, &context)
        }) as Box<dyn Fn(JsValue, JsValue) -> JsValue>);

        let target = object_path(config, &["options", "plugins", "tooltip", "callbacks"])?;
        Reflect::set(&target, &JsValue::from_str("label"), callback.as_ref())?;
        callbacks.push(callback);
    }

    let axes = [("x", options.x_axis.as_ref()), ("y", options.y_axis.as_ref())];
    for (name, axis) in axes {
        let Some(stride) = axis.and_then(|a| a.tick_stride) else {
            continue;
        };
        let labels = descriptor.labels.clone();
        let callback: Callback = Closure::wrap(Box::new(move |_value: JsValue, index: JsValue| {
            let index = index.as_f64().unwrap_or(-1.0);
            if index < 0.0 {
                return JsValue::NULL;
            }
            tick_label(&labels, stride, index as usize)
                .map(JsValue::from_str)
                .unwrap_or(JsValue::NULL)
        }) as Box<dyn Fn(JsValue, JsValue) -> JsValue>);

        let ticks = object_path(config, &["options", "scales", name, "ticks"])?;
        Reflect::set(&ticks, &JsValue::from_str("callback"), callback.as_ref())?;
        callbacks.push(callback);
    }

    Ok(callbacks)
}

/// Build a tooltip label from the engine's hover context
fn tooltip_label(format: &TooltipFormat, context: &JsValue) -> JsValue {
    let get = |target: &JsValue, key: &str| {
        Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
    };

    let label = get(context, "label").as_string().unwrap_or_default();
    let parsed = get(context, "parsed");
    let value = match format.axis() {
        Some(ValueAxis::X) => get(&parsed, "x").as_f64(),
        Some(ValueAxis::Y) => get(&parsed, "y").as_f64(),
        None => parsed.as_f64(),
    }
    .unwrap_or(0.0);

    let data = get(&get(context, "dataset"), "data");
    let dataset: Vec<f64> = if Array::is_array(&data) {
        Array::from(&data).iter().filter_map(|v| v.as_f64()).collect()
    } else {
        Vec::new()
    };

    match format.format(&label, value, &dataset) {
        Some(text) => JsValue::from_str(&text),
        None => JsValue::UNDEFINED,
    }
}
