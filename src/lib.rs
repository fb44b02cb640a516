#![cfg(target_arch = "wasm32")]
use crate::core::{Controller, SeededRandom, ToyConfig, WordPool};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod textures;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn build_audio() -> Option<Rc<audio::AudioEngine>> {
    match audio::AudioEngine::new() {
        Ok(engine) => Some(Rc::new(engine)),
        Err(e) => {
            // the toy still runs silently
            log::warn!("[audio] unavailable: {}", e);
            None
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("flip-deck starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let config = ToyConfig::from_query(&dom::location_search());
    let rng = match config.seed {
        Some(seed) => {
            log::info!("[init] seed {}", seed);
            SeededRandom::new(seed)
        }
        None => SeededRandom::from_entropy(),
    };

    let gpu = frame::init_gpu(&canvas)
        .await
        .ok_or_else(|| anyhow::anyhow!("WebGPU unavailable"))?;
    let textures = textures::CanvasTextureFactory::new(&document, gpu.device(), gpu.queue())?;
    let toy: frame::SharedToy = Rc::new(RefCell::new(Controller::new(
        config,
        WordPool::with_defaults(),
        rng,
        textures,
    )));

    // Autoplay policy keeps the context suspended until the first gesture
    let audio = build_audio();

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        toy: toy.clone(),
        audio: audio.clone(),
    });
    events::wire_global_keydown(toy.clone(), audio, document.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        toy,
        gpu,
        canvas,
        document,
        last_instant: Instant::now(),
        shown_hint: None,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
