use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element, Window};

use crate::capability::Capability;
use crate::config::{ClassScheme, SiteConfig};
use crate::dom;
use crate::error::EffectResult;
use crate::gsap::{EasedScroller, Gsap};
use crate::text_reveal::TextReveal;

/// Everything an effect needs, resolved once at startup and shared by `Rc`.
pub struct Context {
    pub capability: Capability,
    pub config: SiteConfig,
    pub classes: ClassScheme,
    pub window: Window,
    pub document: Document,
    scroller: Option<EasedScroller>,
    /// The hero title, captured on its first reveal.
    pub title_reveal: RefCell<Option<TextReveal>>,
}

impl Context {
    pub fn new(capability: Capability, config: SiteConfig) -> EffectResult<Rc<Self>> {
        let window = dom::window()?;
        let document = dom::document()?;
        let scroller = capability
            .gsap()
            .map(|gsap| EasedScroller::new(gsap, window.clone()));
        let classes = config.class_scheme();

        Ok(Rc::new(Self {
            capability,
            config,
            classes,
            window,
            document,
            scroller,
            title_reveal: RefCell::new(None),
        }))
    }

    pub fn gsap(&self) -> Option<Gsap> {
        self.capability.gsap()
    }

    /// Present exactly when the capability is rich.
    pub fn scroller(&self) -> Option<&EasedScroller> {
        self.scroller.as_ref()
    }

    pub fn find(&self, selector: &str) -> EffectResult<Option<Element>> {
        dom::find(&self.document, selector)
    }

    pub fn require(&self, selector: &str) -> EffectResult<Element> {
        dom::require(&self.document, selector)
    }

    pub fn find_all(&self, selector: &str) -> EffectResult<Vec<Element>> {
        dom::find_all(&self.document, selector)
    }

    pub fn scroll_y(&self) -> f64 {
        dom::scroll_y(&self.window)
    }

    pub fn viewport_size(&self) -> (f64, f64) {
        dom::viewport_size(&self.window)
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}
