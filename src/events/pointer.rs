use crate::audio::AudioEngine;
use crate::frame::SharedToy;
use crate::input;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub toy: SharedToy,
    pub audio: Option<Rc<AudioEngine>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerleave(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ndc = input::pointer_ndc(&ev, &w.canvas);
        w.toy.borrow_mut().set_pointer(Some(ndc));
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        // any gesture may unlock audio
        if let Some(audio) = &w.audio {
            audio.resume();
        }
        let ndc = input::pointer_ndc(&ev, &w.canvas);
        let hit = w.toy.borrow().hit_test(ndc);
        let flipped = w.toy.borrow_mut().pick(hit);
        if let (Some(flip), Some(audio)) = (flipped, &w.audio) {
            audio.play_flip(&flip);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(w: &InputWiring) {
    let toy = w.toy.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        toy.borrow_mut().set_pointer(None);
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}
