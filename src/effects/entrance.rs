//! Load-time entrances and the purely decorative motion around the hero.

use std::rc::Rc;

use crate::context::Context;
use crate::error::EffectResult;
use crate::gsap::{ease, Gsap, Targets, TweenVars};
use crate::text_reveal::TextReveal;
use crate::watchers::pointer::HoverPair;

pub fn header(ctx: &Rc<Context>, gsap: Gsap) -> EffectResult {
    let selectors = &ctx.config.selectors;
    let header = ctx.require(&selectors.header)?;
    let logo = ctx.require(&selectors.logo)?;
    let links = ctx.find_all(&selectors.nav_link)?;

    // Only y and opacity on the header itself; anything else makes it tilt.
    gsap.from_to(
        Targets::One(&header),
        &TweenVars::new().y(-100.0).opacity(0.0),
        &TweenVars::new().y(0.0).opacity(1.0).duration(1.0).ease(ease::POWER2_OUT),
    )?;
    gsap.from_to(
        Targets::One(&logo),
        &TweenVars::new().scale(0.8).opacity(0.0).transform_origin("left center"),
        &TweenVars::new()
            .scale(1.0)
            .opacity(1.0)
            .duration(0.8)
            .delay(0.2)
            .ease(ease::BACK_OUT),
    )?;
    gsap.from_to(
        Targets::Many(&links),
        &TweenVars::new().y(-20.0).opacity(0.0),
        &TweenVars::new()
            .y(0.0)
            .opacity(1.0)
            .duration(0.6)
            .stagger(0.1)
            .delay(0.4)
            .ease(ease::POWER2_OUT),
    )?;
    Ok(())
}

pub fn hero(ctx: &Rc<Context>, gsap: Gsap) -> EffectResult {
    let selectors = &ctx.config.selectors;
    let title = ctx.require(&selectors.hero_title)?;
    let subtitle = ctx.require(&selectors.hero_subtitle)?;
    let button = ctx.require(&selectors.hero_button)?;

    gsap.from_to(
        Targets::One(&title),
        &TweenVars::new().y(50.0).opacity(0.0),
        &TweenVars::new().y(0.0).opacity(1.0).duration(1.0).ease(ease::POWER2_OUT),
    )?;
    gsap.from_to(
        Targets::One(&subtitle),
        &TweenVars::new().y(30.0).opacity(0.0),
        &TweenVars::new()
            .y(0.0)
            .opacity(1.0)
            .duration(1.0)
            .delay(0.3)
            .ease(ease::POWER2_OUT),
    )?;
    gsap.from_to(
        Targets::One(&button),
        &TweenVars::new().y(20.0).opacity(0.0).scale(0.8),
        &TweenVars::new()
            .y(0.0)
            .opacity(1.0)
            .scale(1.0)
            .duration(0.8)
            .delay(0.6)
            .ease(ease::BACK_OUT),
    )?;
    HoverPair::scale(1.05).wire(gsap, &button)
}

pub fn floating_leaves(ctx: &Rc<Context>, gsap: Gsap) -> EffectResult {
    let leaves = ctx.find_all(&ctx.config.selectors.floating_leaves)?;
    for (index, leaf) in leaves.iter().enumerate() {
        let vars = TweenVars::new()
            .y(-20.0)
            .rotation(360.0)
            .duration(3.0 + index as f64)
            .repeat(-1)
            .yoyo()
            .ease(ease::POWER1_IN_OUT)
            .delay(index as f64 * 0.5);
        gsap.to(Targets::One(leaf), &vars)?;
    }
    Ok(())
}

pub fn product_images(ctx: &Rc<Context>, gsap: Gsap) -> EffectResult {
    let images = ctx.find_all(&ctx.config.selectors.product_image)?;
    for (index, image) in images.iter().enumerate() {
        gsap.from_to(
            Targets::One(image),
            &TweenVars::new().scale(1.2).opacity(0.0),
            &TweenVars::new()
                .scale(1.0)
                .opacity(1.0)
                .duration(0.8)
                .delay(index as f64 * 0.2)
                .ease(ease::POWER2_OUT),
        )?;
    }
    Ok(())
}

pub fn hero_title_reveal(ctx: &Rc<Context>, gsap: Gsap) -> EffectResult {
    let mut reveal = ctx.title_reveal.borrow_mut();
    if reveal.is_none() {
        *reveal = ctx.find(&ctx.config.selectors.hero_title)?.map(TextReveal::capture);
    }
    match reveal.as_ref() {
        Some(reveal) => reveal.run(gsap),
        None => Ok(()),
    }
}
