//! Page lifecycle: the ready gate, the load sequencer and unload teardown.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, Window};

use crate::context::Context;
use crate::dom;
use crate::error::EffectResult;
use crate::gsap::{ease, Gsap, Targets, TweenVars};
use crate::nav;
use crate::registry::{bulk_plan, EffectId, Registry};

const OVERLAY_FADE_SECONDS: f64 = 1.0;

pub fn start(ctx: Rc<Context>) -> EffectResult {
    let registry = Rc::new(Registry::new());

    if let Some(gsap) = ctx.gsap() {
        wire_teardown(&ctx, gsap)?;
    }

    let document = ctx.document.clone();
    let window = ctx.window.clone();
    {
        let ctx = ctx.clone();
        let registry = registry.clone();
        when_ready(&document, move || on_ready(ctx, registry))?;
    }
    when_loaded(&document, &window, move || on_load(ctx, registry))
}

/// Runs `f` once the document is parsed, immediately if it already is.
fn when_ready(document: &Document, f: impl FnOnce() + 'static) -> EffectResult {
    if document.ready_state() == "loading" {
        dom::listen_once(document, "DOMContentLoaded", f)
    } else {
        f();
        Ok(())
    }
}

/// Runs `f` once every resource has loaded, immediately if it already has.
fn when_loaded(document: &Document, window: &Window, f: impl FnOnce() + 'static) -> EffectResult {
    if document.ready_state() == "complete" {
        f();
        Ok(())
    } else {
        dom::listen_once(window, "load", f)
    }
}

fn overlay(ctx: &Context) -> Option<Element> {
    match ctx.find(&ctx.config.selectors.loading_screen) {
        Ok(overlay) => overlay,
        Err(err) => {
            log::error!("loading overlay lookup failed: {}", err);
            None
        }
    }
}

fn on_ready(ctx: Rc<Context>, registry: Rc<Registry>) {
    log::info!("document ready");

    // In case load is slow, the overlay must not swallow clicks meanwhile.
    if let Some(overlay) = overlay(&ctx) {
        if let Err(err) = dom::set_style(&overlay, "pointer-events", "none") {
            log::error!("loading overlay update failed: {}", err);
        }
    }

    if let Err(err) = nav::wire_menu(&ctx) {
        log::error!("menu wiring failed: {}", err);
    }

    if ctx.capability.is_rich() {
        let delay = ctx.config.text_reveal_delay_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            registry.run(EffectId::TextReveal, &ctx);
        });
    }
}

fn on_load(ctx: Rc<Context>, registry: Rc<Registry>) {
    log::info!("page loaded");
    let overlay = overlay(&ctx);

    let Some(gsap) = ctx.gsap() else {
        if let Some(overlay) = &overlay {
            hide(overlay);
        }
        registry.run_all(&bulk_plan(false), &ctx);
        return;
    };

    {
        let ctx = ctx.clone();
        let registry = registry.clone();
        let delay = ctx.config.image_stagger_delay_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            registry.run(EffectId::ImageStagger, &ctx);
        });
    }

    match overlay {
        Some(overlay) => fade_out_then(gsap, overlay, move || {
            registry.run_all(&bulk_plan(true), &ctx);
        }),
        None => registry.run_all(&bulk_plan(true), &ctx),
    }
}

/// Fades the overlay out and calls `then` once it is gone. If the tween
/// cannot start, the overlay is hidden at once and `then` still runs.
fn fade_out_then(gsap: Gsap, overlay: Element, then: impl FnOnce() + 'static) {
    let vars = TweenVars::new()
        .opacity(0.0)
        .duration(OVERLAY_FADE_SECONDS)
        .ease(ease::POWER2_OUT);

    let target = overlay.clone();
    let then = Rc::new(Cell::new(Some(then)));
    let on_complete = {
        let then = then.clone();
        move || {
            hide(&target);
            if let Some(then) = then.take() {
                then();
            }
        }
    };

    if let Err(err) = gsap.to_then(Targets::One(&overlay), &vars, on_complete) {
        log::error!("loading overlay fade failed: {}", err);
        hide(&overlay);
        if let Some(then) = then.take() {
            then();
        }
    }
}

fn hide(overlay: &Element) {
    if let Err(err) = dom::set_style(overlay, "display", "none") {
        log::error!("loading overlay hide failed: {}", err);
    }
}

fn wire_teardown(ctx: &Context, gsap: Gsap) -> EffectResult {
    dom::listen(&ctx.window, "beforeunload", move |_: Event| {
        match gsap.release_all() {
            Ok(released) => log::info!("released {} scroll triggers", released),
            Err(err) => log::error!("scroll trigger release failed: {}", err),
        }
    })
}
