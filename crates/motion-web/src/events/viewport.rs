use super::Listener;
use crate::dom;
use crate::render::CanvasPainter;
use motion_core::{MotionEngine, SurfaceChange};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn wire_scroll(window: &web::Window, engine: &Rc<RefCell<MotionEngine>>) -> anyhow::Result<Listener> {
    let engine = engine.clone();
    let w = window.clone();
    Listener::new(
        window,
        "scroll",
        move |_ev: web::Event| {
            if let Ok(mut e) = engine.try_borrow_mut() {
                e.scroll_to(dom::scroll_offset(&w));
            }
        },
    )
}

/// Measure the canvas, feed the engine and resize the backing store.
/// Returns whether the canvas was resized (which also clears it).
pub fn sync_surface(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    engine: &mut MotionEngine,
    painter: &CanvasPainter,
) -> anyhow::Result<bool> {
    let change = engine.resize(dom::css_size(canvas), dom::device_pixel_ratio(window));
    match change.surface() {
        Some(surface) => {
            dom::apply_surface(canvas, painter.context(), &surface)?;
            if matches!(change, SurfaceChange::Regenerated { .. }) {
                log::info!(
                    "[{}] regenerated for {:.0}x{:.0}",
                    engine.config().kind.name(),
                    surface.width,
                    surface.height
                );
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Static surfaces repaint here; ticking ones repaint on their next frame.
pub fn wire_resize(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    engine: &Rc<RefCell<MotionEngine>>,
    painter: &Rc<RefCell<CanvasPainter>>,
) -> anyhow::Result<Listener> {
    let engine = engine.clone();
    let painter = painter.clone();
    let canvas = canvas.clone();
    let w = window.clone();
    Listener::new(
        window,
        "resize",
        move |_ev: web::Event| {
            let (Ok(mut e), Ok(mut p)) = (engine.try_borrow_mut(), painter.try_borrow_mut()) else {
                return;
            };
            match sync_surface(&w, &canvas, &mut e, &p) {
                Ok(true) if !e.mode().ticks() => {
                    e.render(&mut *p);
                    if let Err(err) = p.take_error() {
                        log::error!("[{}] repaint failed: {:?}", e.config().kind.name(), err);
                    }
                }
                Ok(_) => {}
                Err(err) => log::error!("[{}] resize failed: {:?}", e.config().kind.name(), err),
            }
        },
    )
}

/// Drop the timing baseline when the tab comes back so the first frame does
/// not see the whole hidden interval.
pub fn wire_visibility(
    document: &web::Document,
    engine: &Rc<RefCell<MotionEngine>>,
) -> anyhow::Result<Listener> {
    let engine = engine.clone();
    let doc = document.clone();
    Listener::new(
        document,
        "visibilitychange",
        move |_ev: web::Event| {
            if doc.hidden() {
                return;
            }
            if let Ok(mut e) = engine.try_borrow_mut() {
                e.suspend();
                log::debug!("[{}] visible again; clock reset", e.config().kind.name());
            }
        },
    )
}
