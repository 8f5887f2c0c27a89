#![cfg(target_arch = "wasm32")]
mod capability;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod mount;
mod render;

use constants::REDUCED_MOTION_QUERY;
use events::Listener;
use mount::MountedSurface;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys as web;

thread_local! {
    static MOUNTED: RefCell<Vec<MountedSurface>> = const { RefCell::new(Vec::new()) };
    static WATCHERS: RefCell<Vec<Listener>> = const { RefCell::new(Vec::new()) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("motion-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let count = mount_surfaces()?;
    watch_reduced_motion()?;
    log::info!("[mount] {} ambient surfaces live", count);
    Ok(())
}

/// Tear down every surface, then mount all `canvas[data-ambient]` elements
/// currently in the document. Returns how many are live.
#[wasm_bindgen]
pub fn mount_all() -> Result<usize, JsValue> {
    mount_surfaces().map_err(|e| JsValue::from_str(&format!("{:?}", e)))
}

#[wasm_bindgen]
pub fn unmount_all() {
    unmount_surfaces();
}

fn mount_surfaces() -> anyhow::Result<usize> {
    unmount_surfaces();
    let window = dom::window()?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let mut live = Vec::new();
    for canvas in dom::ambient_canvases(&document)? {
        match MountedSurface::mount(&window, &document, canvas) {
            Ok(Some(surface)) => live.push(surface),
            Ok(None) => {}
            // Isolated per surface: one bad canvas must not block the rest.
            Err(e) => log::error!("[mount] {:?}", e),
        }
    }
    let count = live.len();
    MOUNTED.with(|m| m.borrow_mut().extend(live));
    Ok(count)
}

fn unmount_surfaces() {
    let surfaces = MOUNTED.with(|m| std::mem::take(&mut *m.borrow_mut()));
    if !surfaces.is_empty() {
        log::info!("[mount] unmounting {} surfaces", surfaces.len());
    }
    drop(surfaces);
}

/// The motion mode is fixed per instance, so a preference change rebuilds
/// every surface.
fn watch_reduced_motion() -> anyhow::Result<()> {
    let window = dom::window()?;
    let Some(query) = capability::media_query(&window, REDUCED_MOTION_QUERY) else {
        log::warn!("[mount] matchMedia unavailable; reduced-motion changes ignored");
        return Ok(());
    };
    let listener = Listener::new(&query, "change", |ev: web::MediaQueryListEvent| {
        log::info!("[mount] reduced motion now {}; remounting", ev.matches());
        if let Err(e) = mount_surfaces() {
            log::error!("[mount] remount failed: {:?}", e);
        }
    })?;
    WATCHERS.with(|w| w.borrow_mut().push(listener));
    Ok(())
}
