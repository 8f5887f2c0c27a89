use crate::constants::MOUNT_SELECTOR;
use crate::input;
use glam::Vec2;
use motion_core::Surface;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window() -> anyhow::Result<web::Window> {
    web::window().ok_or_else(|| anyhow::anyhow!("no window"))
}

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio(window: &web::Window) -> f32 {
    window.device_pixel_ratio() as f32
}

#[inline]
pub fn scroll_offset(window: &web::Window) -> f32 {
    input::scroll_offset(window.scroll_y().unwrap_or(0.0))
}

/// CSS size of the canvas as laid out by its container.
pub fn css_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(rect.width() as f32, rect.height() as f32)
}

/// Match the backing store to `surface` and scale drawing to logical units.
/// Setting the size clears the canvas, so it only happens on change.
pub fn apply_surface(
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
    surface: &Surface,
) -> anyhow::Result<()> {
    let (w_px, h_px) = surface.backing_size();
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    let [a, b, c, d, e, f] = surface.transform();
    ctx.set_transform(a, b, c, d, e, f)
        .map_err(|e| anyhow::anyhow!("set_transform: {:?}", e))
}

pub fn ambient_canvases(document: &web::Document) -> anyhow::Result<Vec<web::HtmlCanvasElement>> {
    let nodes = document
        .query_selector_all(MOUNT_SELECTOR)
        .map_err(|e| anyhow::anyhow!("query {}: {:?}", MOUNT_SELECTOR, e))?;
    let mut out = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(canvas) = nodes
            .get(i)
            .and_then(|n| n.dyn_into::<web::HtmlCanvasElement>().ok())
        {
            out.push(canvas);
        }
    }
    Ok(out)
}
