use crate::gsap::Gsap;

/// Which implementation set the page runs with. Resolved once at startup
/// and passed to every effect; nothing re-checks the globals afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// GSAP and ScrollTrigger are loaded.
    Rich(Gsap),
    /// Native browser APIs only.
    Basic,
}

impl Capability {
    pub fn detect() -> Self {
        match Gsap::detect() {
            Some(gsap) => Capability::Rich(gsap),
            None => Capability::Basic,
        }
    }

    pub fn gsap(&self) -> Option<Gsap> {
        match *self {
            Capability::Rich(gsap) => Some(gsap),
            Capability::Basic => None,
        }
    }

    pub fn is_rich(&self) -> bool {
        matches!(self, Capability::Rich(_))
    }
}
