use super::Listener;
use crate::input;
use instant::Instant;
use motion_core::MotionEngine;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Pointer samples are read on the window so effects react even when the
/// canvas sits behind other content.
pub fn wire_pointer(
    window: &web::Window,
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    engine: &Rc<RefCell<MotionEngine>>,
    origin: Instant,
) -> anyhow::Result<Vec<Listener>> {
    let mut out = Vec::with_capacity(2);

    // pointermove
    {
        let engine = engine.clone();
        let canvas = canvas.clone();
        out.push(Listener::new(
            window,
            "pointermove",
            move |ev: web::PointerEvent| {
                let rect = canvas.get_bounding_client_rect();
                let pos = input::client_to_local(
                    ev.client_x() as f64,
                    ev.client_y() as f64,
                    rect.left(),
                    rect.top(),
                );
                if let Ok(mut e) = engine.try_borrow_mut() {
                    e.pointer_move(pos, origin.elapsed().as_secs_f64());
                }
            },
        )?);
    }

    // pointerleave: fires on the root element when the pointer exits the page
    if let Some(root) = document.document_element() {
        let engine = engine.clone();
        out.push(Listener::new(
            &root,
            "pointerleave",
            move |_ev: web::PointerEvent| {
                if let Ok(mut e) = engine.try_borrow_mut() {
                    e.pointer_leave();
                }
            },
        )?);
    }

    Ok(out)
}
