//! Bindings to the GSAP globals and the tween variables we hand them.
//!
//! Only the handful of calls the effects need are bound: `gsap.to`,
//! `gsap.fromTo`, `gsap.set`, `gsap.registerPlugin`, `ScrollTrigger.create`
//! and `ScrollTrigger.getAll`. All of them are `catch` imports, so a throw
//! inside GSAP comes back as an [`EffectError::Js`].

use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Array, Function, Object, Reflect};
use web_sys::{Element, Window};

use crate::dom;
use crate::error::{EffectError, EffectResult};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = gsap, js_name = "to")]
    fn gsap_to(targets: &JsValue, vars: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = gsap, js_name = "fromTo")]
    fn gsap_from_to(targets: &JsValue, from: &JsValue, to: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = gsap, js_name = "set")]
    fn gsap_set(targets: &JsValue, vars: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = gsap, js_name = "registerPlugin")]
    fn gsap_register_plugin(plugin: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ScrollTrigger, js_name = "create")]
    fn scroll_trigger_create(vars: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ScrollTrigger, js_name = "getAll")]
    fn scroll_trigger_get_all() -> Result<Array, JsValue>;
}

pub mod ease {
    pub const NONE: &str = "none";
    pub const POWER1_IN_OUT: &str = "power1.inOut";
    pub const POWER2_OUT: &str = "power2.out";
    pub const POWER2_IN_OUT: &str = "power2.inOut";
    pub const BACK_OUT: &str = "back.out(1.7)";
}

/// Where a ScrollTrigger starts or ends: a "element viewport" pair such as
/// `"top 85%"`, or an absolute scroll position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Edge {
    At(String),
    Px(f64),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerVars {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Edge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Edge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrub: Option<bool>,
}

impl TriggerVars {
    /// Spans the whole page so `progress` tracks overall scroll depth.
    pub fn whole_page() -> Self {
        Self {
            start: Some(Edge::At("top top".into())),
            end: Some(Edge::Px(99999.0)),
            ..Self::default()
        }
    }
}

/// Tween variables. Unset fields are left out of the JS object so GSAP
/// keeps whatever the element already has.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweenVars {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yoyo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_origin: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_trigger: Option<TriggerVars>,
}

impl TweenVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub fn y_percent(mut self, y_percent: f64) -> Self {
        self.y_percent = Some(y_percent);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = Some(seconds);
        self
    }

    pub fn stagger(mut self, seconds: f64) -> Self {
        self.stagger = Some(seconds);
        self
    }

    pub fn ease(mut self, ease: &'static str) -> Self {
        self.ease = Some(ease);
        self
    }

    /// `-1` repeats forever.
    pub fn repeat(mut self, times: i32) -> Self {
        self.repeat = Some(times);
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = Some(true);
        self
    }

    pub fn transform_origin(mut self, origin: &'static str) -> Self {
        self.transform_origin = Some(origin);
        self
    }

    pub fn overwrite(mut self) -> Self {
        self.overwrite = Some(true);
        self
    }

    pub fn scroll_trigger(mut self, trigger: TriggerVars) -> Self {
        self.scroll_trigger = Some(trigger);
        self
    }

    fn to_js(&self) -> EffectResult<JsValue> {
        Ok(serde_wasm_bindgen::to_value(self)?)
    }
}

/// What a tween acts on.
pub enum Targets<'a> {
    One(&'a Element),
    Many(&'a [Element]),
    Selector(&'a str),
}

impl Targets<'_> {
    fn to_js(&self) -> JsValue {
        match self {
            Targets::One(element) => JsValue::from((*element).clone()),
            Targets::Many(elements) => elements.iter().collect::<Array>().into(),
            Targets::Selector(selector) => JsValue::from_str(selector),
        }
    }
}

/// Proof that the GSAP and ScrollTrigger globals exist. Only
/// [`Gsap::detect`] hands one out, so holding a `Gsap` means the calls below
/// have something to call into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gsap {
    _private: (),
}

impl Gsap {
    pub fn detect() -> Option<Gsap> {
        let global = web_sys::js_sys::global();
        global_value(&global, "gsap")?;
        let scroll_trigger = global_value(&global, "ScrollTrigger")?;

        if let Err(err) = gsap_register_plugin(&scroll_trigger) {
            log::warn!("ScrollTrigger registration failed: {}", EffectError::from(err));
        }
        Some(Gsap { _private: () })
    }

    pub fn to(&self, targets: Targets, vars: &TweenVars) -> EffectResult {
        gsap_to(&targets.to_js(), &vars.to_js()?)?;
        Ok(())
    }

    /// Like [`Gsap::to`], calling `on_complete` once the tween finishes.
    pub fn to_then(
        &self,
        targets: Targets,
        vars: &TweenVars,
        on_complete: impl FnOnce() + 'static,
    ) -> EffectResult {
        let js = vars.to_js()?;
        Reflect::set(&js, &"onComplete".into(), &Closure::once_into_js(on_complete))?;
        gsap_to(&targets.to_js(), &js)?;
        Ok(())
    }

    pub fn from_to(&self, targets: Targets, from: &TweenVars, to: &TweenVars) -> EffectResult {
        gsap_from_to(&targets.to_js(), &from.to_js()?, &to.to_js()?)?;
        Ok(())
    }

    pub fn set(&self, targets: Targets, vars: &TweenVars) -> EffectResult {
        gsap_set(&targets.to_js(), &vars.to_js()?)?;
        Ok(())
    }

    /// Registers a page-wide ScrollTrigger and reports its progress on every
    /// update. The trigger lives until [`Gsap::release_all`].
    pub fn watch_progress(&self, mut on_progress: impl FnMut(f64) + 'static) -> EffectResult {
        let vars = serde_wasm_bindgen::to_value(&TriggerVars::whole_page())?;
        let on_update = Closure::wrap(Box::new(move |trigger: JsValue| {
            let progress = Reflect::get(&trigger, &"progress".into())
                .ok()
                .and_then(|p| p.as_f64());
            if let Some(progress) = progress {
                on_progress(progress);
            }
        }) as Box<dyn FnMut(JsValue)>);
        Reflect::set(&vars, &"onUpdate".into(), on_update.as_ref())?;
        scroll_trigger_create(&vars)?;
        on_update.forget();
        Ok(())
    }

    /// Kills every registered ScrollTrigger. Returns how many were released.
    pub fn release_all(&self) -> EffectResult<u32> {
        let triggers = scroll_trigger_get_all()?;
        let mut released = 0;
        for trigger in triggers.iter() {
            let kill = Reflect::get(&trigger, &"kill".into())?;
            if let Some(kill) = kill.dyn_ref::<Function>() {
                kill.call0(&trigger)?;
                released += 1;
            }
        }
        Ok(released)
    }
}

fn global_value(global: &Object, name: &str) -> Option<JsValue> {
    Reflect::get(global, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Eased, time-based window scrolling without the ScrollTo plugin: GSAP
/// tweens a proxy `{ y }` and every update writes it back to the window.
///
/// A new scroll overwrites one still in flight.
pub struct EasedScroller {
    window: Window,
    proxy: Object,
    on_update: JsValue,
}

impl EasedScroller {
    pub const DURATION: f64 = 1.5;

    /// Takes a [`Gsap`] since every scroll is a GSAP tween.
    pub fn new(_: Gsap, window: Window) -> Self {
        let proxy = Object::new();
        let on_update = {
            let proxy = proxy.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move || {
                if let Some(y) = Reflect::get(&proxy, &"y".into()).ok().and_then(|v| v.as_f64()) {
                    window.scroll_to_with_x_and_y(0.0, y);
                }
            }) as Box<dyn FnMut()>)
            .into_js_value()
        };
        Self {
            window,
            proxy,
            on_update,
        }
    }

    pub fn scroll_to(&self, destination: f64) -> EffectResult {
        Reflect::set(&self.proxy, &"y".into(), &dom::scroll_y(&self.window).into())?;
        let vars = TweenVars::new()
            .y(destination.max(0.0))
            .duration(Self::DURATION)
            .ease(ease::POWER2_IN_OUT)
            .overwrite()
            .to_js()?;
        Reflect::set(&vars, &"onUpdate".into(), &self.on_update)?;
        gsap_to(&self.proxy, &vars)?;
        Ok(())
    }

    /// Scrolls so `element` sits `offset` pixels below the top edge.
    pub fn scroll_to_element(&self, element: &Element, offset: f64) -> EffectResult {
        let top = element.get_bounding_client_rect().top() + dom::scroll_y(&self.window);
        self.scroll_to(top - offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_are_left_out() {
        let vars = TweenVars::new().y(0.0).opacity(1.0).duration(0.8).ease(ease::POWER2_OUT);
        let json = serde_json::to_value(&vars).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "y": 0.0, "opacity": 1.0, "duration": 0.8, "ease": "power2.out" })
        );
    }

    #[test]
    fn parallax_vars_nest_the_trigger() {
        let vars = TweenVars::new().y_percent(-50.0).ease(ease::NONE).scroll_trigger(TriggerVars {
            trigger: Some(".hero".into()),
            start: Some(Edge::At("top bottom".into())),
            end: Some(Edge::At("bottom top".into())),
            scrub: Some(true),
        });
        let json = serde_json::to_value(&vars).unwrap();
        assert_eq!(json["yPercent"], -50.0);
        assert_eq!(json["scrollTrigger"]["trigger"], ".hero");
        assert_eq!(json["scrollTrigger"]["scrub"], true);
    }

    #[test]
    fn whole_page_trigger_ends_at_an_absolute_offset() {
        let json = serde_json::to_value(TriggerVars::whole_page()).unwrap();
        assert_eq!(json, serde_json::json!({ "start": "top top", "end": 99999.0 }));
    }
}
