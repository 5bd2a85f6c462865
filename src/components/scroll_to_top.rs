use std::rc::Rc;

use web_sys::{Element, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;
use yew_hooks::use_mount;

use crate::context::Context;
use crate::dom;
use crate::error::{EffectError, EffectResult};
use crate::gsap::{Targets, TweenVars};
use crate::watchers::pointer::HoverPair;
use crate::watchers::scroll;

pub const HOST_ID: &str = "scroll-to-top-root";
const FADE_SECONDS: f64 = 0.3;

#[derive(Properties, PartialEq)]
pub struct ScrollToTopProps {
    pub ctx: Rc<Context>,
}

/// The synthetic "back to top" control. Visible past the scroll-to-top
/// threshold: faded by GSAP when rich, toggled through `display` otherwise.
#[function_component(ScrollToTop)]
pub fn scroll_to_top(props: &ScrollToTopProps) -> Html {
    let ctx = props.ctx.clone();
    let button = use_node_ref();
    let visible = use_state_eq(|| false);

    {
        let ctx = ctx.clone();
        let button = button.clone();
        let visible = visible.clone();
        use_mount(move || {
            let threshold = ctx.config.scroll_top.threshold(ctx.capability.is_rich());
            if let Err(err) = scroll::watch(&ctx, threshold, move |past| visible.set(past)) {
                log::error!("scroll to top watcher failed: {}", err);
            }

            if let (Some(gsap), Some(el)) = (ctx.gsap(), button.cast::<Element>()) {
                if let Err(err) = HoverPair::scale(1.1).wire(gsap, &el) {
                    log::error!("scroll to top hover failed: {}", err);
                }
            }
        });
    }

    {
        let ctx = ctx.clone();
        let button = button.clone();
        use_effect_with_deps(
            move |visible| {
                if let (Some(gsap), Some(el)) = (ctx.gsap(), button.cast::<Element>()) {
                    let opacity = if *visible { 1.0 } else { 0.0 };
                    let faded = gsap
                        .to(
                            Targets::One(&el),
                            &TweenVars::new().opacity(opacity).duration(FADE_SECONDS),
                        )
                        .and_then(|_| {
                            let events = if *visible { "auto" } else { "none" };
                            dom::set_style(&el, "pointer-events", events)
                        });
                    if let Err(err) = faded {
                        log::error!("scroll to top fade failed: {}", err);
                    }
                }
                || ()
            },
            *visible,
        );
    }

    let onclick = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            let scrolled = match ctx.scroller() {
                Some(scroller) => scroller.scroll_to(0.0),
                None => {
                    let options = ScrollToOptions::new();
                    options.set_top(0.0);
                    options.set_behavior(ScrollBehavior::Smooth);
                    ctx.window.scroll_to_with_scroll_to_options(&options);
                    Ok(())
                }
            };
            if let Err(err) = scrolled {
                log::error!("scroll to top failed: {}", err);
            }
        })
    };

    // GSAP owns the inline style in rich mode, so leave it unset there.
    let style = match (ctx.capability.is_rich(), *visible) {
        (true, _) => None,
        (false, true) => Some("display: block;"),
        (false, false) => Some("display: none;"),
    };
    let classes = &ctx.classes;
    let class = classes!(
        classes.scroll_to_top.clone(),
        (*visible).then(|| classes.visible.clone())
    );

    html! {
        <button
            ref={button}
            {class}
            style={style}
            aria-label="Scroll to top"
            {onclick}
        >
            <i class="fa-solid fa-arrow-up"></i>
        </button>
    }
}

/// Renders the button into a fresh host appended to `<body>`.
pub fn mount(ctx: &Rc<Context>) -> EffectResult {
    let body = ctx
        .document
        .body()
        .ok_or_else(|| EffectError::MissingElement("body".into()))?;
    let host = ctx.document.create_element("div")?;
    host.set_id(HOST_ID);
    body.append_child(&host)?;

    yew::Renderer::<ScrollToTop>::with_root_and_props(host, ScrollToTopProps { ctx: ctx.clone() })
        .render();
    Ok(())
}
