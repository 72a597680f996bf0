/// Native demo entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use notch::AppConfig;

    // Optional config file as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => match AppConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    if let Err(e) = notch::demo::run(&config) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
