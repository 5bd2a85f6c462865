use std::rc::Rc;

use crate::context::Context;
use crate::dom;
use crate::error::EffectResult;
use crate::gsap::{ease, Edge, Gsap, Targets, TriggerVars, TweenVars};
use crate::watchers::scroll;

/// Adds the scheme's `scrolled` class to the header past the navbar
/// threshold. Pages without a header are left alone.
pub fn navbar_shrink(ctx: &Rc<Context>) -> EffectResult {
    let Some(header) = ctx.find(&ctx.config.selectors.header)? else {
        log::debug!("no header, navbar shrink skipped");
        return Ok(());
    };
    let threshold = ctx.config.navbar.threshold(ctx.capability.is_rich());
    let scrolled = ctx.classes.scrolled.clone();

    scroll::watch(ctx, threshold, move |past| {
        if let Err(err) = dom::set_class(&header, &scrolled, past) {
            log::error!("navbar class update failed: {}", err);
        }
    })
}

pub fn parallax_vars(hero: &str) -> TweenVars {
    TweenVars::new()
        .y_percent(-50.0)
        .ease(ease::NONE)
        .scroll_trigger(TriggerVars {
            trigger: Some(hero.to_string()),
            start: Some(Edge::At("top bottom".into())),
            end: Some(Edge::At("bottom top".into())),
            scrub: Some(true),
        })
}

pub fn parallax(ctx: &Rc<Context>, gsap: Gsap) -> EffectResult {
    let hero = &ctx.config.selectors.hero;
    if ctx.find(hero)?.is_none() {
        log::debug!("no hero, parallax skipped");
        return Ok(());
    }
    gsap.to(Targets::Selector(hero), &parallax_vars(hero))
}
