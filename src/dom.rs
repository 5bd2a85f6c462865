//! Thin helpers over web-sys. Everything the effects mutate goes through
//! here so the rest of the crate deals in plain values.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, Window};

use crate::error::{EffectError, EffectResult};
use crate::throttle::{Admit, Throttle};

pub fn window() -> EffectResult<Window> {
    web_sys::window().ok_or_else(|| EffectError::MissingElement("window".into()))
}

pub fn document() -> EffectResult<Document> {
    window()?
        .document()
        .ok_or_else(|| EffectError::MissingElement("document".into()))
}

pub fn find(document: &Document, selector: &str) -> EffectResult<Option<Element>> {
    Ok(document.query_selector(selector)?)
}

pub fn require(document: &Document, selector: &str) -> EffectResult<Element> {
    find(document, selector)?.ok_or_else(|| EffectError::MissingElement(selector.to_string()))
}

pub fn find_all(document: &Document, selector: &str) -> EffectResult<Vec<Element>> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn as_html(element: &Element) -> EffectResult<HtmlElement> {
    element
        .clone()
        .dyn_into::<HtmlElement>()
        .map_err(|_| EffectError::Js(format!("<{}> is not an HTML element", element.tag_name())))
}

pub fn set_style(element: &Element, property: &str, value: &str) -> EffectResult {
    as_html(element)?.style().set_property(property, value)?;
    Ok(())
}

pub fn set_class(element: &Element, class: &str, on: bool) -> EffectResult {
    let list = element.class_list();
    if on {
        list.add_1(class)?;
    } else {
        list.remove_1(class)?;
    }
    Ok(())
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

pub fn now_ms() -> f64 {
    web_sys::js_sys::Date::now()
}

/// Attaches a listener for the lifetime of the page.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> EffectResult
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Attaches a listener that the browser drops after its first call.
pub fn listen_once(
    target: &EventTarget,
    event: &str,
    handler: impl FnOnce() + 'static,
) -> EffectResult {
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let callback = Closure::once_into_js(handler);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.unchecked_ref(),
        &options,
    )?;
    Ok(())
}

/// An action gated by a [`Throttle`], with the trailing run scheduled on a
/// `gloo` timeout.
#[derive(Clone)]
pub struct Throttled {
    inner: Rc<ThrottledInner>,
}

struct ThrottledInner {
    gate: RefCell<Throttle>,
    action: RefCell<Box<dyn FnMut()>>,
}

impl Throttled {
    pub fn new(interval_ms: u32, action: impl FnMut() + 'static) -> Self {
        Self {
            inner: Rc::new(ThrottledInner {
                gate: RefCell::new(Throttle::new(interval_ms)),
                action: RefCell::new(Box::new(action)),
            }),
        }
    }

    pub fn fire(&self) {
        let admit = self.inner.gate.borrow_mut().admit(now_ms());
        match admit {
            Admit::Now => self.run(),
            Admit::Later(delay) => {
                let this = self.clone();
                Timeout::new(delay, move || {
                    this.inner.gate.borrow_mut().trailing_ran(now_ms());
                    this.run();
                })
                .forget();
            }
            Admit::Skip => {}
        }
    }

    fn run(&self) {
        // A re-entrant fire from inside the action is dropped rather than
        // double-borrowing.
        if let Ok(mut action) = self.inner.action.try_borrow_mut() {
            action();
        }
    }
}
