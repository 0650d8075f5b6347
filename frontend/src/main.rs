#[cfg(target_arch = "wasm32")]
fn main() {
    tracing_wasm::set_as_global_default();

    if let Err(err) = guidance_frontend::web::start() {
        tracing::error!(?err, "could not start page bindings");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("guidance-frontend runs in the browser; build it for wasm32-unknown-unknown");
}
