//! Reveal groups for the content sections below the hero.

use std::rc::Rc;

use crate::config::Selectors;
use crate::context::Context;
use crate::error::EffectResult;
use crate::gsap::{ease, Gsap, TweenVars};
use crate::watchers::pointer::HoverPair;
use crate::watchers::reveal::{wire_group, Grouping, RevealGroup};

const SECTION_START: f64 = 80.0;

fn settle() -> TweenVars {
    TweenVars::new().y(0.0).opacity(1.0).duration(0.8).ease(ease::POWER2_OUT)
}

fn rise(from_y: f64) -> TweenVars {
    TweenVars::new().y(from_y).opacity(0.0)
}

fn single(name: &'static str, selector: &str, from_y: f64, base_delay: f64) -> RevealGroup {
    RevealGroup {
        name,
        selector: selector.to_string(),
        start_percent: SECTION_START,
        from: rise(from_y),
        to: settle(),
        base_delay,
        step: 0.0,
        grouping: Grouping::EachOnEntry,
    }
}

pub fn product_card_group(selector: &str) -> RevealGroup {
    RevealGroup {
        name: "product cards",
        selector: selector.to_string(),
        start_percent: 85.0,
        from: rise(50.0),
        to: settle(),
        base_delay: 0.0,
        step: 0.1,
        grouping: Grouping::EachOnEntry,
    }
}

pub fn product_cards(ctx: &Rc<Context>, gsap: Gsap) -> EffectResult {
    let selector = &ctx.config.selectors.product_card;
    wire_group(ctx, gsap, product_card_group(selector))?;

    let lift = HoverPair::lift(10.0);
    for card in ctx.find_all(selector)? {
        lift.wire(gsap, &card)?;
    }
    Ok(())
}

pub fn about(ctx: &Rc<Context>, gsap: Gsap) -> EffectResult {
    let selectors = &ctx.config.selectors;
    wire_group(ctx, gsap, single("about title", &selectors.about_title, 30.0, 0.0))?;
    wire_group(
        ctx,
        gsap,
        single("about description", &selectors.about_description, 20.0, 0.2),
    )?;
    wire_group(
        ctx,
        gsap,
        RevealGroup {
            name: "features",
            selector: selectors.feature.clone(),
            start_percent: SECTION_START,
            from: rise(30.0),
            to: settle(),
            base_delay: 0.0,
            step: 0.2,
            grouping: Grouping::AllOnFirst,
        },
    )
}

/// Title, text and button, in reveal order.
fn contact_groups(selectors: &Selectors) -> [RevealGroup; 3] {
    [
        single("contact title", &selectors.contact_title, 30.0, 0.0),
        single("contact text", &selectors.contact_text, 20.0, 0.2),
        RevealGroup {
            name: "contact button",
            selector: selectors.contact_button.clone(),
            start_percent: SECTION_START,
            from: rise(20.0).scale(0.8),
            to: settle().scale(1.0).ease(ease::BACK_OUT),
            base_delay: 0.4,
            step: 0.0,
            grouping: Grouping::EachOnEntry,
        },
    ]
}

/// A page without the button still reveals the title and text.
pub fn contact(ctx: &Rc<Context>, gsap: Gsap) -> EffectResult {
    let selectors = &ctx.config.selectors;
    for group in contact_groups(selectors) {
        wire_group(ctx, gsap, group)?;
    }
    match ctx.find(&selectors.contact_button)? {
        Some(button) => HoverPair::scale(1.05).wire(gsap, &button),
        None => Ok(()),
    }
}

pub fn footer(ctx: &Rc<Context>, gsap: Gsap) -> EffectResult {
    let mut group = single("footer", &ctx.config.selectors.footer, 30.0, 0.0);
    group.start_percent = 90.0;
    wire_group(ctx, gsap, group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_stagger_by_a_tenth() {
        let group = product_card_group(".product-card");
        assert_eq!(group.root_margin(), "0px 0px -15% 0px");
        assert!((group.delay_for(2) - 0.2).abs() < 1e-9);
        assert_eq!(group.from.y, Some(50.0));
        assert_eq!(group.from.opacity, Some(0.0));
    }

    #[test]
    fn single_targets_use_the_section_start() {
        let group = single("about title", "#about-title", 30.0, 0.0);
        assert_eq!(group.root_margin(), "0px 0px -20% 0px");
        assert_eq!(group.to.duration, Some(0.8));
    }

    #[test]
    fn contact_button_reveals_last() {
        let groups = contact_groups(&Selectors::default());
        let names: Vec<_> = groups.iter().map(|g| g.name).collect();
        assert_eq!(names, ["contact title", "contact text", "contact button"]);
        assert_eq!(groups[2].selector, "#contact-btn");
        assert_eq!(groups[2].from.scale, Some(0.8));
        assert!((groups[2].delay_for(0) - 0.4).abs() < 1e-9);
    }
}
