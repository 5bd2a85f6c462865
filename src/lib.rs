use log::{error, info, warn};
use wasm_bindgen::prelude::*;

pub mod capability;
pub mod config;
pub mod context;
mod dom;
pub mod error;
pub mod gsap;
mod lifecycle;
pub mod nav;
pub mod registry;
pub mod text_reveal;
pub mod throttle;
pub mod watchers {
    pub mod pointer;
    pub mod reveal;
    pub mod scroll;
}
pub mod effects {
    pub mod entrance;
    pub mod scroll;
    pub mod sections;
}
pub mod components {
    pub mod scroll_to_top;
}

use capability::Capability;
use config::SiteConfig;
use context::Context;
use error::EffectResult;

#[wasm_bindgen(start)]
pub fn start() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // A second init only happens if the module is instantiated twice; the
    // first logger stays in place.
    let _ = console_log::init_with_level(config::log_level());

    info!("Starting site effects");
    if let Err(err) = boot() {
        error!("site effects failed to start: {}", err);
    }
}

fn boot() -> EffectResult {
    let capability = Capability::detect();
    let config = SiteConfig::from_document(&dom::document()?).unwrap_or_else(|err| {
        warn!("ignoring inline effects config: {}", err);
        SiteConfig::default()
    });

    info!(
        "effects running in {} mode",
        if capability.is_rich() { "gsap" } else { "basic" }
    );
    let ctx = Context::new(capability, config)?;
    lifecycle::start(ctx)
}
