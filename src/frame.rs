use crate::core::{Controller, SeededRandom};
use crate::overlay;
use crate::render;
use crate::textures::CanvasTextureFactory;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type Toy = Controller<CanvasTextureFactory, SeededRandom>;
pub type SharedToy = Rc<RefCell<Toy>>;

pub struct FrameContext<'a> {
    pub toy: SharedToy,
    pub gpu: render::GpuState<'a>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub last_instant: Instant,
    // (round, flips) last written to the hint overlay
    pub shown_hint: Option<(u32, u32)>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.gpu.resize_if_needed(w, h);

        let mut toy = self.toy.borrow_mut();
        let (gw, gh) = self.gpu.size();
        toy.set_aspect(gw as f32 / gh.max(1) as f32);
        toy.tick(dt_sec);

        let hint = (toy.deck().round, toy.deck().flips_this_round);
        if self.shown_hint != Some(hint) {
            overlay::update_hint(&self.document, hint.0, hint.1, toy.config().flips_before_reset);
            self.shown_hint = Some(hint);
        }

        match self.gpu.render(&*toy) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
