//! Browser entry point. Build with `trunk serve --features csr`.

#[cfg(feature = "csr")]
fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(level);
    log::info!("saude-plus: mounting app");
    leptos::mount::mount_to_body(saude_plus_client::app::App);
}

#[cfg(not(feature = "csr"))]
fn main() {}
