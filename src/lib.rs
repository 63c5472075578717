//! Ark Passive simulator, in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Service Worker
//! bridge to call. Uses `matchit` for URL routing — the same router
//! engine that powers Axum.
//!
//! The page posts the node catalogue, tooltip templates and the armory
//! snapshot of the character being viewed; the user then edits levels
//! through `/api/ark/*` and gets re-rendered fragments back.

use wasm_bindgen::prelude::*;

pub mod ark;
pub mod config;
pub mod error;
pub mod routes;

/// Process an HTTP-like request and return an HTML fragment or JSON.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method` — HTTP method (e.g., "GET", "POST")
/// * `path`   — URL path (e.g., "/api/ark/board")
/// * `query`  — Query string (e.g., "?category=진화")
/// * `body`   — Request body (form data or JSON). Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    // Build the router. matchit compiles route patterns into a radix tree.
    let mut router = matchit::Router::new();

    // Loading
    router.insert("/api/ark/config", "config").ok();
    router.insert("/api/ark/catalogue", "catalogue").ok();
    router.insert("/api/ark/tooltips", "tooltips").ok();
    router.insert("/api/ark/character", "character").ok();

    // Simulation
    router.insert("/api/ark/board", "board").ok();
    router.insert("/api/ark/adjust", "adjust").ok();
    router.insert("/api/ark/reset", "reset").ok();
    router.insert("/api/ark/apply", "apply").ok();
    router.insert("/api/ark/detail", "detail").ok();
    router.insert("/api/ark/detail/apply", "detail_apply").ok();
    router.insert("/api/ark/detail/close", "detail_close").ok();

    // Read-only views for sibling panels
    router.insert("/api/ark/snapshot", "snapshot").ok();
    router.insert("/api/ark/points", "points").ok();
    router.insert("/api/ark/diff", "diff").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("config", "POST") => routes::ark::handle_config_post(body),
            ("catalogue", "POST") => routes::ark::handle_catalogue_post(body),
            ("tooltips", "POST") => routes::ark::handle_tooltips_post(body),
            ("character", "POST") => routes::ark::handle_character_post(query, body),

            ("board", "GET") => routes::ark::handle_board_get(query),
            ("adjust", "POST") => routes::ark::handle_adjust_post(body),
            ("reset", "POST") => routes::ark::handle_reset_post(body),
            ("apply", "POST") => routes::ark::handle_apply_post(body),
            ("detail", "GET") => routes::ark::handle_detail_get(query),
            ("detail_apply", "POST") => routes::ark::handle_detail_apply_post(body),
            ("detail_close", "POST") => routes::ark::handle_detail_close_post(body),

            ("snapshot", "GET") => routes::ark::handle_snapshot_get(query),
            ("points", "GET") => routes::ark::handle_points_get(query),
            ("diff", "GET") => routes::ark::handle_diff_get(query),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-kip-red">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-kip-red">405 — method not allowed</span>"#.to_string()
}
