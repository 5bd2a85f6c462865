//! Character-by-character title reveal.

use web_sys::Element;

use crate::dom;
use crate::error::{EffectError, EffectResult};
use crate::gsap::{ease, Gsap, Targets, TweenVars};

pub const STEP_SECONDS: f64 = 0.05;
pub const FADE_SECONDS: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharStep {
    pub ch: char,
    pub delay: f64,
}

/// One step per Unicode scalar value, delayed left to right.
pub fn plan(text: &str) -> Vec<CharStep> {
    text.chars()
        .enumerate()
        .map(|(i, ch)| CharStep {
            ch,
            delay: i as f64 * STEP_SECONDS,
        })
        .collect()
}

/// Keeps the element's original text on the Rust side, so the reveal can
/// run again without reading back its own spans.
pub struct TextReveal {
    element: Element,
    original: String,
}

impl TextReveal {
    pub fn capture(element: Element) -> Self {
        let original = element.text_content().unwrap_or_default();
        Self { element, original }
    }

    pub fn run(&self, gsap: Gsap) -> EffectResult {
        let document = self
            .element
            .owner_document()
            .ok_or_else(|| EffectError::MissingElement("document".into()))?;

        self.element.set_text_content(None);
        for step in plan(&self.original) {
            let span = document.create_element("span")?;
            span.set_text_content(Some(&step.ch.to_string()));
            dom::set_style(&span, "opacity", "0")?;
            self.element.append_child(&span)?;

            let vars = TweenVars::new()
                .opacity(1.0)
                .duration(FADE_SECONDS)
                .delay(step.delay)
                .ease(ease::POWER2_OUT);
            gsap.to(Targets::One(&span), &vars)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_letters_become_two_delayed_steps() {
        let steps = plan("Hi");
        assert_eq!(
            steps,
            vec![
                CharStep { ch: 'H', delay: 0.0 },
                CharStep { ch: 'i', delay: 0.05 },
            ]
        );
    }

    #[test]
    fn no_characters_lost_or_duplicated() {
        let title = "Fresh plants, café 🌿";
        let rebuilt: String = plan(title).into_iter().map(|s| s.ch).collect();
        assert_eq!(rebuilt, title);
    }

    #[test]
    fn replanning_is_stable() {
        assert_eq!(plan("Grow"), plan("Grow"));
    }

    #[test]
    fn empty_text_has_no_steps() {
        assert!(plan("").is_empty());
    }
}
