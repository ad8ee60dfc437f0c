use app_frontend::AppConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::default();

    // Initialize the logger for WebAssembly
    wasm_logger::init(wasm_logger::Config::new(config.log_level));

    if let Err(err) = app_frontend::start(config) {
        log::error!("application failed to start: {}", err);
    }
}
