use crate::constants::FRAME_LOG_INTERVAL;
use crate::dom;
use crate::render::CanvasPainter;
use instant::Instant;
use motion_core::MotionEngine;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub struct FrameContext {
    pub engine: Rc<RefCell<MotionEngine>>,
    pub painter: Rc<RefCell<CanvasPainter>>,
    /// Shared with the event handlers so pointer timestamps and frame times
    /// use the same clock.
    pub origin: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) -> anyhow::Result<()> {
        let now = self.origin.elapsed().as_secs_f64();
        let mut engine = self
            .engine
            .try_borrow_mut()
            .map_err(|_| anyhow::anyhow!("engine already borrowed"))?;
        let mut painter = self
            .painter
            .try_borrow_mut()
            .map_err(|_| anyhow::anyhow!("painter already borrowed"))?;

        if let Some(step) = engine.frame(now, &mut *painter) {
            if step.frame % FRAME_LOG_INTERVAL == 0 {
                log::debug!(
                    "[{}] frame={} dt={:.2} fps={:.1} particles={}",
                    engine.config().kind.name(),
                    step.frame,
                    step.dt,
                    engine.fps(),
                    engine.field().len()
                );
            }
        }
        painter.take_error()
    }

    #[inline]
    fn label(&self) -> &'static str {
        self.engine
            .try_borrow()
            .map(|e| e.config().kind.name())
            .unwrap_or("surface")
    }
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owns a running requestAnimationFrame chain.
pub struct LoopHandle {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickSlot,
}

impl LoopHandle {
    /// Cancel the pending frame and release the callback.
    pub fn cancel(self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web_sys::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        // The callback holds a clone of its own slot; emptying it breaks the cycle.
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &TickSlot) -> anyhow::Result<i32> {
    let slot = tick.borrow();
    let cb = slot
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("frame callback released"))?;
    dom::window()?
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("requestAnimationFrame: {:?}", e))
}

/// Run `frame_ctx` once per display frame until cancelled. A failing frame
/// stops this loop only; other surfaces keep running.
pub fn start_loop(frame_ctx: FrameContext) -> anyhow::Result<LoopHandle> {
    let frame_ctx = Rc::new(RefCell::new(frame_ctx));
    let tick: TickSlot = Rc::new(RefCell::new(None));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let raf_clone = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_clone.set(None);
        let mut ctx = frame_ctx.borrow_mut();
        if let Err(e) = ctx.frame() {
            log::error!("[{}] frame failed, stopping loop: {:?}", ctx.label(), e);
            return;
        }
        match request_frame(&tick_clone) {
            Ok(id) => raf_clone.set(Some(id)),
            Err(e) => log::error!("[{}] {:?}", ctx.label(), e),
        }
    }) as Box<dyn FnMut()>));

    match request_frame(&tick) {
        Ok(id) => raf_id.set(Some(id)),
        Err(e) => {
            tick.borrow_mut().take();
            return Err(e);
        }
    }
    Ok(LoopHandle { raf_id, tick })
}
