//! Hamburger menu and in-page anchor navigation.

use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Element, Event, ScrollBehavior, ScrollIntoViewOptions};

use crate::context::Context;
use crate::dom;
use crate::error::EffectResult;
use crate::gsap::{ease, Targets, TweenVars};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEvent {
    /// The hamburger control was clicked.
    Toggle,
    /// A nav link was selected at the given viewport width.
    LinkSelected { viewport_width: f64 },
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    /// Link selection only closes the menu at or below `breakpoint`.
    pub fn next(self, event: MenuEvent, breakpoint: f64) -> MenuState {
        match (self, event) {
            (MenuState::Closed, MenuEvent::Toggle) => MenuState::Open,
            (MenuState::Open, MenuEvent::Toggle) => MenuState::Closed,
            (MenuState::Open, MenuEvent::LinkSelected { viewport_width })
                if viewport_width <= breakpoint =>
            {
                MenuState::Closed
            }
            (state, MenuEvent::LinkSelected { .. }) => state,
        }
    }
}

/// Owns the menu state; the `active` class on the toggle and the nav
/// container is only ever written from here, and always for both.
struct MenuController {
    ctx: Rc<Context>,
    state: Cell<MenuState>,
    hamburger: Element,
    nav: Element,
    links: Vec<Element>,
}

impl MenuController {
    fn dispatch(&self, event: MenuEvent) -> EffectResult {
        let previous = self.state.get();
        let next = previous.next(event, self.ctx.config.mobile_breakpoint);
        if next == previous {
            return Ok(());
        }
        self.state.set(next);
        self.render(next)?;

        if next.is_open() {
            if let Some(gsap) = self.ctx.gsap() {
                gsap.from_to(
                    Targets::Many(&self.links),
                    &TweenVars::new().y(-20.0).opacity(0.0),
                    &TweenVars::new()
                        .y(0.0)
                        .opacity(1.0)
                        .duration(0.5)
                        .stagger(0.1)
                        .ease(ease::POWER2_OUT),
                )?;
            }
        }
        Ok(())
    }

    fn render(&self, state: MenuState) -> EffectResult {
        let active = &self.ctx.classes.active;
        dom::set_class(&self.hamburger, active, state.is_open())?;
        dom::set_class(&self.nav, active, state.is_open())?;
        Ok(())
    }
}

/// Wires the hamburger toggle and the close-on-select behavior. Pages
/// without a hamburger or nav container simply get neither.
pub fn wire_menu(ctx: &Rc<Context>) -> EffectResult {
    let selectors = &ctx.config.selectors;
    let (Some(hamburger), Some(nav)) = (ctx.find(&selectors.hamburger)?, ctx.find(&selectors.nav)?)
    else {
        log::debug!("no hamburger menu on this page");
        return Ok(());
    };
    let links = ctx.find_all(&selectors.nav_link)?;

    let controller = Rc::new(MenuController {
        ctx: ctx.clone(),
        state: Cell::new(MenuState::Closed),
        hamburger: hamburger.clone(),
        nav,
        links: links.clone(),
    });

    {
        let controller = controller.clone();
        dom::listen(&hamburger, "click", move |_: Event| {
            if let Err(err) = controller.dispatch(MenuEvent::Toggle) {
                log::error!("menu toggle failed: {}", err);
            }
        })?;
    }

    for link in &links {
        let controller = controller.clone();
        dom::listen(link, "click", move |_: Event| {
            let (viewport_width, _) = controller.ctx.viewport_size();
            if let Err(err) = controller.dispatch(MenuEvent::LinkSelected { viewport_width }) {
                log::error!("menu close failed: {}", err);
            }
        })?;
    }
    Ok(())
}

/// The element id an in-page `href` points at, percent-decoded. `"#"` and
/// non-fragment links yield `None`.
pub fn fragment_target(href: &str) -> Option<String> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(fragment)
        .map(|id| id.into_owned())
        .unwrap_or_else(|_| fragment.to_string());
    Some(decoded)
}

/// Intercepts in-page anchor clicks and scrolls smoothly instead of
/// jumping: eased with a header offset when rich, native otherwise.
pub fn wire_smooth_scroll(ctx: &Rc<Context>) -> EffectResult {
    let anchors = ctx.find_all(&ctx.config.selectors.anchor)?;
    for anchor in &anchors {
        let ctx = ctx.clone();
        let source = anchor.clone();
        dom::listen(anchor, "click", move |event: Event| {
            event.prevent_default();
            let Some(id) = source.get_attribute("href").as_deref().and_then(fragment_target) else {
                return;
            };
            let Some(target) = ctx.document.get_element_by_id(&id) else {
                log::debug!("anchor target #{} not found", id);
                return;
            };
            if let Err(err) = scroll_to_target(&ctx, &target) {
                log::error!("smooth scroll to #{} failed: {}", id, err);
            }
        })?;
    }
    log::debug!("smooth scroll wired on {} anchors", anchors.len());
    Ok(())
}

fn scroll_to_target(ctx: &Context, target: &Element) -> EffectResult {
    match ctx.scroller() {
        Some(scroller) => scroller.scroll_to_element(target, ctx.config.anchor_offset),
        None => {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            target.scroll_into_view_with_scroll_into_view_options(&options);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREAKPOINT: f64 = 768.0;

    #[test]
    fn toggle_alternates() {
        let open = MenuState::Closed.next(MenuEvent::Toggle, BREAKPOINT);
        assert_eq!(open, MenuState::Open);
        assert_eq!(open.next(MenuEvent::Toggle, BREAKPOINT), MenuState::Closed);
    }

    #[test]
    fn link_selection_closes_on_mobile_only() {
        let mobile = MenuEvent::LinkSelected { viewport_width: 768.0 };
        let desktop = MenuEvent::LinkSelected { viewport_width: 1024.0 };
        assert_eq!(MenuState::Open.next(mobile, BREAKPOINT), MenuState::Closed);
        assert_eq!(MenuState::Open.next(desktop, BREAKPOINT), MenuState::Open);
    }

    #[test]
    fn link_selection_never_opens() {
        let mobile = MenuEvent::LinkSelected { viewport_width: 320.0 };
        assert_eq!(MenuState::Closed.next(mobile, BREAKPOINT), MenuState::Closed);
    }

    #[test]
    fn fragments_resolve_to_ids() {
        assert_eq!(fragment_target("#about"), Some("about".to_string()));
        assert_eq!(fragment_target("#caf%C3%A9"), Some("café".to_string()));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target("/products"), None);
    }
}
