use crate::capability;
use crate::constants::{EFFECT_ATTR, SEED_ATTR, STATE_ATTR};
use crate::dom;
use crate::events::{self, ListenerSet};
use crate::frame::{self, FrameContext, LoopHandle};
use crate::input::{self, SeedChoice};
use crate::render::CanvasPainter;
use instant::Instant;
use motion_core::{EffectConfig, EffectKind, LifecycleGate, MotionEngine, TeardownStep};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

fn effect_config(canvas: &web::HtmlCanvasElement, kind: EffectKind) -> EffectConfig {
    let config = EffectConfig::for_kind(kind);
    match canvas
        .get_attribute(SEED_ATTR)
        .as_deref()
        .and_then(input::parse_seed)
    {
        Some(SeedChoice::Fixed(seed)) => config.with_seed(seed),
        Some(SeedChoice::Random) => config.with_seed(input::seed_from_unit(js_sys::Math::random())),
        None => config,
    }
}

/// One live effect bound to one canvas.
pub struct MountedSurface {
    kind: EffectKind,
    gate: LifecycleGate,
    listeners: ListenerSet,
    frame_loop: Option<LoopHandle>,
    canvas: web::HtmlCanvasElement,
}

impl MountedSurface {
    /// Returns `Ok(None)` when the surface's capabilities rule the effect out.
    pub fn mount(
        window: &web::Window,
        document: &web::Document,
        canvas: web::HtmlCanvasElement,
    ) -> anyhow::Result<Option<Self>> {
        let name = canvas.get_attribute(EFFECT_ATTR).unwrap_or_default();
        let kind = EffectKind::from_name(&name)
            .ok_or_else(|| anyhow::anyhow!("unknown effect '{}'", name))?;

        let ctx = capability::context_2d(&canvas);
        let caps = capability::detect(window, ctx.is_some());
        let config = effect_config(&canvas, kind);
        let mut gate = LifecycleGate::new(&caps, &config);
        let mode = gate.mode();
        if !gate.mount() {
            log::info!("[{}] not mounted (mode={:?})", kind.name(), mode);
            return Ok(None);
        }
        if let Some(state) = input::state_attr(mode) {
            let _ = canvas.set_attribute(STATE_ATTR, state);
        }
        let ctx = ctx.ok_or_else(|| anyhow::anyhow!("no 2d context"))?;

        let engine = MotionEngine::new(config, mode, dom::scroll_offset(window))?;
        let engine = Rc::new(RefCell::new(engine));
        let painter = Rc::new(RefCell::new(CanvasPainter::new(ctx)));
        let origin = Instant::now();

        {
            let mut e = engine.borrow_mut();
            let mut p = painter.borrow_mut();
            events::viewport::sync_surface(window, &canvas, &mut e, &p)?;
            if !mode.ticks() {
                e.render(&mut *p);
                p.take_error()?;
            }
        }

        let mut surface = Self {
            kind,
            gate,
            listeners: ListenerSet::default(),
            frame_loop: None,
            canvas: canvas.clone(),
        };

        // From here on, dropping `surface` on error tears down whatever was wired.
        if mode.listens_to_resize() {
            surface
                .listeners
                .extend([events::wire_resize(window, &canvas, &engine, &painter)?]);
        }
        if mode.listens_to_input() {
            let config = engine.borrow().config().clone();
            if config.pointer.is_some() || config.trail.is_some() {
                surface.listeners.extend(events::wire_pointer(
                    window, document, &canvas, &engine, origin,
                )?);
            }
            if config.streaks.is_some() {
                surface
                    .listeners
                    .extend([events::wire_scroll(window, &engine)?]);
            }
        }
        if mode.ticks() {
            surface
                .listeners
                .extend([events::wire_visibility(document, &engine)?]);
            surface.frame_loop = Some(frame::start_loop(FrameContext {
                engine: engine.clone(),
                painter: painter.clone(),
                origin,
            })?);
        }

        log::info!(
            "[{}] mounted mode={:?} listeners={} particles={}",
            kind.name(),
            mode,
            surface.listeners.len(),
            engine.borrow().field().len()
        );
        Ok(Some(surface))
    }

    /// Listeners go first, then the pending frame. Safe to call twice.
    pub fn unmount(&mut self) {
        let steps = self.gate.unmount();
        if steps.is_empty() {
            return;
        }
        for step in steps {
            match step {
                TeardownStep::RemoveListeners => self.listeners.clear(),
                TeardownStep::CancelFrame => {
                    if let Some(l) = self.frame_loop.take() {
                        l.cancel();
                    }
                }
            }
        }
        let _ = self.canvas.remove_attribute(STATE_ATTR);
        log::info!("[{}] unmounted", self.kind.name());
    }
}

impl Drop for MountedSurface {
    fn drop(&mut self) {
        self.unmount();
    }
}
