use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

use crate::context::Context;
use crate::dom::{self, Throttled};
use crate::error::EffectResult;
use crate::gsap::{ease, Gsap, Targets, TweenVars};

pub const HOVER_SECONDS: f64 = 0.3;

/// A symmetric enter/leave tween pair.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverPair {
    pub enter: TweenVars,
    pub leave: TweenVars,
}

impl HoverPair {
    pub fn scale(to: f64) -> Self {
        Self {
            enter: hover_tween().scale(to),
            leave: hover_tween().scale(1.0),
        }
    }

    pub fn lift(by: f64) -> Self {
        Self {
            enter: hover_tween().y(-by),
            leave: hover_tween().y(0.0),
        }
    }

    pub fn wire(&self, gsap: Gsap, element: &Element) -> EffectResult {
        for (event, vars) in [("mouseenter", &self.enter), ("mouseleave", &self.leave)] {
            let target = element.clone();
            let vars = vars.clone();
            dom::listen(element, event, move |_: Event| {
                if let Err(err) = gsap.to(Targets::One(&target), &vars) {
                    log::error!("hover tween failed: {}", err);
                }
            })?;
        }
        Ok(())
    }
}

fn hover_tween() -> TweenVars {
    TweenVars::new().duration(HOVER_SECONDS).ease(ease::POWER2_OUT)
}

/// Cursor position normalized to the viewport, scaled to `distance` px.
/// A zero-sized viewport yields no offset.
pub fn follow_offset(client: (f64, f64), viewport: (f64, f64), distance: f64) -> (f64, f64) {
    let axis = |pos: f64, size: f64| {
        if size > 0.0 {
            (pos / size).clamp(0.0, 1.0) * distance
        } else {
            0.0
        }
    };
    (axis(client.0, viewport.0), axis(client.1, viewport.1))
}

/// Drifts the floating leaves toward the cursor. Pointer moves are
/// throttled; the trailing run always uses the latest position.
pub fn wire_follow(ctx: &Rc<Context>, gsap: Gsap) -> EffectResult {
    let latest = Rc::new(Cell::new((0.0, 0.0)));

    let apply = {
        let ctx = ctx.clone();
        let latest = latest.clone();
        Throttled::new(ctx.config.throttle_ms, move || {
            let (x, y) =
                follow_offset(latest.get(), ctx.viewport_size(), ctx.config.follow_distance);
            let vars = TweenVars::new().x(x).y(y).duration(1.0).ease(ease::POWER2_OUT);
            let leaves = Targets::Selector(&ctx.config.selectors.floating_leaves);
            if let Err(err) = gsap.to(leaves, &vars) {
                log::error!("leaf follow failed: {}", err);
            }
        })
    };

    dom::listen(&ctx.document, "mousemove", move |event: Event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            latest.set((f64::from(mouse.client_x()), f64::from(mouse.client_y())));
            apply.fire();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_scales_with_cursor_position() {
        assert_eq!(follow_offset((0.0, 0.0), (1000.0, 800.0), 20.0), (0.0, 0.0));
        assert_eq!(follow_offset((500.0, 400.0), (1000.0, 800.0), 20.0), (10.0, 10.0));
        assert_eq!(follow_offset((1000.0, 800.0), (1000.0, 800.0), 20.0), (20.0, 20.0));
    }

    #[test]
    fn offset_is_zero_for_empty_viewport() {
        assert_eq!(follow_offset((10.0, 10.0), (0.0, 0.0), 20.0), (0.0, 0.0));
    }

    #[test]
    fn hover_pairs_are_symmetric() {
        let pair = HoverPair::scale(1.05);
        assert_eq!(pair.enter.scale, Some(1.05));
        assert_eq!(pair.leave.scale, Some(1.0));
        assert_eq!(pair.enter.duration, pair.leave.duration);

        let lift = HoverPair::lift(10.0);
        assert_eq!(lift.enter.y, Some(-10.0));
        assert_eq!(lift.leave.y, Some(0.0));
    }
}
