mod app;
mod config;
mod effects;
mod input;
mod logging;
mod render;

use chat_logging::{chat_info, chat_warn};

fn main() -> anyhow::Result<()> {
    let (config, config_err) = match config::load_from_env() {
        Ok(config) => (config, None),
        Err(err) => (config::ChatConfig::default(), Some(err)),
    };

    logging::initialize(config.log_destination);
    if let Some(err) = config_err {
        chat_warn!("Falling back to default configuration: {}", err);
    }
    chat_info!("Chat widget starting, endpoint={}", config.endpoint);

    app::run(&config)
}
