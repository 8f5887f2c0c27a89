use crate::constants::{FINE_POINTER_QUERY, REDUCED_MOTION_QUERY};
use motion_core::Capabilities;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn media_query(window: &web::Window, query: &str) -> Option<web::MediaQueryList> {
    window.match_media(query).ok().flatten()
}

#[inline]
pub fn media_matches(window: &web::Window, query: &str) -> bool {
    media_query(window, query).map(|m| m.matches()).unwrap_or(false)
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|obj| obj.dyn_into::<web::CanvasRenderingContext2d>().ok())
}

/// Read once per mount; the resulting mode never changes for that instance.
pub fn detect(window: &web::Window, has_context: bool) -> Capabilities {
    Capabilities {
        fine_pointer: media_matches(window, FINE_POINTER_QUERY),
        reduced_motion: media_matches(window, REDUCED_MOTION_QUERY),
        canvas_2d: has_context,
    }
}
