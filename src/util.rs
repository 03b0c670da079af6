use anyhow::Context;
use tracing::Level;

/// Stroke samples log at `trace`, so debug builds keep everything.
fn max_level() -> Level {
    if cfg!(debug_assertions) {
        Level::TRACE
    } else {
        Level::INFO
    }
}

/// Sends widget logs to the devtools console in the browser, or to stdout
/// when the core runs natively. Errors if logging was already set up.
pub fn init_logging() -> anyhow::Result<()> {
    #[cfg(target_arch = "wasm32")]
    let subscriber = {
        use tracing_subscriber::layer::SubscriberExt;
        tracing_subscriber::registry().with(tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(max_level())
                .build(),
        ))
    };

    #[cfg(not(target_arch = "wasm32"))]
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(max_level())
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("hand-write logging already initialised")
}
