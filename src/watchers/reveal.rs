//! One-shot reveals driven by `IntersectionObserver`.
//!
//! Each [`RevealGroup`] gets its own observer. An element is unobserved as
//! soon as it first intersects, and the [`RevealTracker`] refuses a second
//! reveal for the same index even if the browser reports another entry.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::context::Context;
use crate::dom;
use crate::error::EffectResult;
use crate::gsap::{Gsap, Targets, TweenVars};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Every element is watched and revealed on its own entry.
    EachOnEntry,
    /// Only the first element is watched; its entry reveals the whole group.
    AllOnFirst,
}

#[derive(Debug, Clone)]
pub struct RevealGroup {
    pub name: &'static str,
    pub selector: String,
    /// How far down the viewport the element's top edge has to come, in
    /// percent of viewport height. `85.0` reads as "top 85%".
    pub start_percent: f64,
    pub from: TweenVars,
    pub to: TweenVars,
    pub base_delay: f64,
    /// Extra delay per element index.
    pub step: f64,
    pub grouping: Grouping,
}

impl RevealGroup {
    pub fn delay_for(&self, index: usize) -> f64 {
        self.base_delay + index as f64 * self.step
    }

    pub fn root_margin(&self) -> String {
        root_margin(self.start_percent)
    }
}

/// Shrinks the observer root from the bottom so intersection starts when
/// an element's top crosses `start_percent` of the viewport.
pub fn root_margin(start_percent: f64) -> String {
    let inset = (100.0 - start_percent).clamp(0.0, 100.0);
    format!("0px 0px -{}% 0px", inset)
}

/// An element counts as entered once it intersects the shrunken root, or
/// when it is already above the viewport (the page opened scrolled past it).
pub fn has_entered(is_intersecting: bool, bottom: f64) -> bool {
    is_intersecting || bottom < 0.0
}

#[derive(Debug, Clone)]
pub struct RevealTracker {
    grouping: Grouping,
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(len: usize, grouping: Grouping) -> Self {
        Self {
            grouping,
            revealed: vec![false; len],
        }
    }

    /// Indices to reveal now that element `index` entered the viewport.
    /// Anything already revealed is left out.
    pub fn on_enter(&mut self, index: usize) -> Vec<usize> {
        let candidates: Vec<usize> = match self.grouping {
            Grouping::EachOnEntry => vec![index],
            Grouping::AllOnFirst if index == 0 => (0..self.revealed.len()).collect(),
            Grouping::AllOnFirst => Vec::new(),
        };
        candidates
            .into_iter()
            .filter(|&i| match self.revealed.get_mut(i) {
                Some(done) if !*done => {
                    *done = true;
                    true
                }
                _ => false,
            })
            .collect()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }
}

/// Hides the group's elements at their starting pose and reveals each one
/// the first time it scrolls into view. A group with no matching elements
/// is skipped.
pub fn wire_group(ctx: &Rc<Context>, gsap: Gsap, group: RevealGroup) -> EffectResult {
    let elements = ctx.find_all(&group.selector)?;
    if elements.is_empty() {
        log::debug!("{}: nothing matches {}", group.name, group.selector);
        return Ok(());
    }
    gsap.set(Targets::Many(&elements), &group.from)?;

    let watched: Vec<Element> = match group.grouping {
        Grouping::EachOnEntry => elements.clone(),
        Grouping::AllOnFirst => elements.iter().take(1).cloned().collect(),
    };
    let tracker = RefCell::new(RevealTracker::new(elements.len(), group.grouping));
    let fade_in = ctx.classes.fade_in.clone();
    let margin = group.root_margin();

    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if !has_entered(entry.is_intersecting(), entry.bounding_client_rect().bottom()) {
                continue;
            }
            let target = entry.target();
            observer.unobserve(&target);

            let Some(index) = elements.iter().position(|el| *el == target) else {
                continue;
            };
            for i in tracker.borrow_mut().on_enter(index) {
                let element = &elements[i];
                let vars = group.to.clone().delay(group.delay_for(i));
                let revealed = gsap
                    .to(Targets::One(element), &vars)
                    .and_then(|_| dom::set_class(element, &fade_in, true));
                if let Err(err) = revealed {
                    log::error!("{} reveal failed: {}", group.name, err);
                }
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_root_margin(&margin);
    options.set_threshold(&JsValue::from_f64(0.0));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for element in &watched {
        observer.observe(element);
    }
    callback.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(grouping: Grouping) -> RevealGroup {
        RevealGroup {
            name: "cards",
            selector: ".product-card".into(),
            start_percent: 85.0,
            from: TweenVars::new().y(50.0).opacity(0.0),
            to: TweenVars::new().y(0.0).opacity(1.0),
            base_delay: 0.0,
            step: 0.1,
            grouping,
        }
    }

    #[test]
    fn reveal_fires_once_per_element() {
        let mut tracker = RevealTracker::new(3, Grouping::EachOnEntry);
        assert_eq!(tracker.on_enter(1), vec![1]);
        assert_eq!(tracker.on_enter(1), Vec::<usize>::new());
        assert_eq!(tracker.on_enter(1), Vec::<usize>::new());
        assert!(tracker.is_revealed(1));
        assert!(!tracker.is_revealed(0));
    }

    #[test]
    fn first_element_entry_reveals_the_whole_group() {
        let mut tracker = RevealTracker::new(3, Grouping::AllOnFirst);
        assert_eq!(tracker.on_enter(2), Vec::<usize>::new());
        assert_eq!(tracker.on_enter(0), vec![0, 1, 2]);
        assert_eq!(tracker.on_enter(0), Vec::<usize>::new());
    }

    #[test]
    fn elements_scrolled_past_count_as_entered() {
        assert!(has_entered(true, 400.0));
        assert!(has_entered(false, -10.0));
        assert!(!has_entered(false, 900.0));
        assert!(!has_entered(false, 0.0));
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut tracker = RevealTracker::new(2, Grouping::EachOnEntry);
        assert!(tracker.on_enter(5).is_empty());
    }

    #[test]
    fn delays_grow_with_index() {
        let cards = group(Grouping::EachOnEntry);
        assert_eq!(cards.delay_for(0), 0.0);
        assert!((cards.delay_for(3) - 0.3).abs() < 1e-9);

        let mut described = group(Grouping::EachOnEntry);
        described.base_delay = 0.2;
        assert!((described.delay_for(0) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn start_line_maps_to_bottom_inset() {
        assert_eq!(root_margin(85.0), "0px 0px -15% 0px");
        assert_eq!(root_margin(80.0), "0px 0px -20% 0px");
        assert_eq!(group(Grouping::EachOnEntry).root_margin(), "0px 0px -15% 0px");
    }
}
