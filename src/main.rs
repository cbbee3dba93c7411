use std::error::Error;
use tracing::{info, warn};
use wesdra_assistant::{
    cli::run_cli,
    config::load_config,
    gateway::Gateway,
    llm::GeminiClient,
    logging::configure_logging,
    widget::ChatWidget,
};

fn main() -> Result<(), Box<dyn Error>> {
    let config = load_config();
    configure_logging(config.debug);

    info!(model = %config.model, api_addr = %config.api_addr, "starting assistant");
    if !config.has_api_key() {
        warn!("no API key set; replies will fall back to the unavailable message");
    }

    let client = GeminiClient::new(&config);
    let gateway = Gateway::new(client, config.profile.clone(), config.temperature);
    run_cli(ChatWidget::new(gateway))
}
