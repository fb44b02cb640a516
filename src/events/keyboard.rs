use crate::audio::AudioEngine;
use crate::constants::{HINT_KEYS, RESET_KEYS};
use crate::frame::SharedToy;
use crate::overlay;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Reset,
    ToggleHint,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    if RESET_KEYS.contains(&key) {
        Some(KeyAction::Reset)
    } else if HINT_KEYS.contains(&key) {
        Some(KeyAction::ToggleHint)
    } else {
        None
    }
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    toy: &SharedToy,
    audio: Option<&Rc<AudioEngine>>,
    document: &web::Document,
) {
    if ev.repeat() {
        return;
    }
    if let Some(audio) = audio {
        audio.resume();
    }
    match action_for_key(&ev.key()) {
        Some(KeyAction::Reset) => {
            toy.borrow_mut().request_reset();
            ev.prevent_default();
        }
        Some(KeyAction::ToggleHint) => {
            overlay::toggle(document);
            ev.prevent_default();
        }
        None => {}
    }
}

pub fn wire_global_keydown(toy: SharedToy, audio: Option<Rc<AudioEngine>>, document: web::Document) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &toy, audio.as_ref(), &document);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
