use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::components::scroll_to_top;
use crate::context::Context;
use crate::effects::{entrance, scroll, sections};
use crate::error::{EffectError, EffectResult};
use crate::gsap::Gsap;
use crate::nav;
use crate::watchers::pointer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectId {
    HeaderEntrance,
    HeroEntrance,
    FloatingLeaves,
    ProductCards,
    AboutReveal,
    ContactReveal,
    FooterReveal,
    NavbarShrink,
    ScrollToTop,
    SmoothScroll,
    TextReveal,
    Parallax,
    MouseFollow,
    ImageStagger,
}

impl EffectId {
    /// Run after the loading overlay has faded, in this order.
    pub const BULK: [EffectId; 12] = [
        EffectId::HeaderEntrance,
        EffectId::HeroEntrance,
        EffectId::FloatingLeaves,
        EffectId::ProductCards,
        EffectId::AboutReveal,
        EffectId::ContactReveal,
        EffectId::FooterReveal,
        EffectId::ScrollToTop,
        EffectId::SmoothScroll,
        EffectId::NavbarShrink,
        EffectId::Parallax,
        EffectId::MouseFollow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectId::HeaderEntrance => "header entrance",
            EffectId::HeroEntrance => "hero entrance",
            EffectId::FloatingLeaves => "floating leaves",
            EffectId::ProductCards => "product cards",
            EffectId::AboutReveal => "about reveal",
            EffectId::ContactReveal => "contact reveal",
            EffectId::FooterReveal => "footer reveal",
            EffectId::NavbarShrink => "navbar shrink",
            EffectId::ScrollToTop => "scroll to top",
            EffectId::SmoothScroll => "smooth scroll",
            EffectId::TextReveal => "text reveal",
            EffectId::Parallax => "parallax",
            EffectId::MouseFollow => "mouse follow",
            EffectId::ImageStagger => "image stagger",
        }
    }

    /// Purely visual effects. Skipped entirely without GSAP.
    pub fn is_decorative(self) -> bool {
        !matches!(
            self,
            EffectId::NavbarShrink | EffectId::ScrollToTop | EffectId::SmoothScroll
        )
    }
}

/// The load-time initializer for a capability: everything when rich, only
/// the functional effects otherwise.
pub fn bulk_plan(rich: bool) -> Vec<EffectId> {
    EffectId::BULK
        .into_iter()
        .filter(|id| rich || !id.is_decorative())
        .collect()
}

/// Runs each effect at most once per page, whichever phase asks for it.
#[derive(Default)]
pub struct Registry {
    started: RefCell<HashSet<EffectId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `id` for initialization; false if it was already claimed.
    pub fn claim(&self, id: EffectId) -> bool {
        self.started.borrow_mut().insert(id)
    }

    pub fn has_run(&self, id: EffectId) -> bool {
        self.started.borrow().contains(&id)
    }

    pub fn run(&self, id: EffectId, ctx: &Rc<Context>) {
        if id.is_decorative() && !ctx.capability.is_rich() {
            log::debug!("skipping {} without gsap", id.name());
            return;
        }
        if !self.claim(id) {
            log::debug!("{} already initialized", id.name());
            return;
        }
        match init(id, ctx) {
            Ok(()) => log::debug!("{} initialized", id.name()),
            Err(err) => log::error!("{} failed: {}", id.name(), err),
        }
    }

    pub fn run_all(&self, ids: &[EffectId], ctx: &Rc<Context>) {
        for &id in ids {
            self.run(id, ctx);
        }
    }
}

fn init(id: EffectId, ctx: &Rc<Context>) -> EffectResult {
    let gsap = || -> EffectResult<Gsap> { ctx.gsap().ok_or(EffectError::NeedsGsap(id.name())) };
    match id {
        EffectId::HeaderEntrance => entrance::header(ctx, gsap()?),
        EffectId::HeroEntrance => entrance::hero(ctx, gsap()?),
        EffectId::FloatingLeaves => entrance::floating_leaves(ctx, gsap()?),
        EffectId::ProductCards => sections::product_cards(ctx, gsap()?),
        EffectId::AboutReveal => sections::about(ctx, gsap()?),
        EffectId::ContactReveal => sections::contact(ctx, gsap()?),
        EffectId::FooterReveal => sections::footer(ctx, gsap()?),
        EffectId::NavbarShrink => scroll::navbar_shrink(ctx),
        EffectId::ScrollToTop => scroll_to_top::mount(ctx),
        EffectId::SmoothScroll => nav::wire_smooth_scroll(ctx),
        EffectId::TextReveal => entrance::hero_title_reveal(ctx, gsap()?),
        EffectId::Parallax => scroll::parallax(ctx, gsap()?),
        EffectId::MouseFollow => pointer::wire_follow(ctx, gsap()?),
        EffectId::ImageStagger => entrance::product_images(ctx, gsap()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_plan_keeps_only_functional_effects() {
        assert_eq!(
            bulk_plan(false),
            vec![EffectId::ScrollToTop, EffectId::SmoothScroll, EffectId::NavbarShrink]
        );
    }

    #[test]
    fn rich_plan_runs_everything_once() {
        let plan = bulk_plan(true);
        assert_eq!(plan.len(), EffectId::BULK.len());
        let unique: HashSet<_> = plan.iter().collect();
        assert_eq!(unique.len(), plan.len());
    }

    #[test]
    fn delayed_effects_are_decorative_and_outside_the_bulk_pass() {
        for id in [EffectId::TextReveal, EffectId::ImageStagger] {
            assert!(id.is_decorative());
            assert!(!EffectId::BULK.contains(&id));
        }
    }

    #[test]
    fn claim_is_idempotent() {
        let registry = Registry::new();
        assert!(registry.claim(EffectId::ScrollToTop));
        assert!(!registry.claim(EffectId::ScrollToTop));
        assert!(registry.has_run(EffectId::ScrollToTop));
        assert!(!registry.has_run(EffectId::NavbarShrink));
    }
}
