use leptos::prelude::*;
use streamflow::AppConfig;
use streamflow_frontend::{App, WindowEnv, init_logging};

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    let config = AppConfig::from_source(&WindowEnv);
    init_logging(config.log_level());
    log::info!(
        "NAME: \"{}\", VIDEO API: \"{}\", DEBUG: {}",
        config.app_name,
        config.endpoints.video,
        config.debug_mode
    );

    mount_to_body(move || view! { <App config=config.clone() /> });
}
