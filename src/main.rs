fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    if let Err(error) = hand_write::util::init_logging() {
        // Drawing still works without logging.
        tracing::error!(error = error.to_string());
    }

    #[cfg(target_arch = "wasm32")]
    yew::Renderer::<hand_write::components::App>::new().render();

    #[cfg(not(target_arch = "wasm32"))]
    tracing::error!("hand-write is a browser app; build it for wasm32 (e.g. `trunk serve`)");
}
