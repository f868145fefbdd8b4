use greeter_bot::bot::BotService;
use greeter_bot::config::{env_file_path, load_env_file, Settings};
use greeter_bot::logging::init_logging;
use teloxide::Bot;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load the env file first so RUST_LOG / DEBUG_MODE from it take effect
    let env_file = load_env_file(&env_file_path());

    init_logging().map_err(|e| {
        eprintln!("Failed to compile regex patterns: {e}");
        e
    })?;
    env_file.log();

    info!("Starting Greeter Bot...");

    let service = init_service();
    let bot = init_client(&service);

    service.run(bot).await;

    Ok(())
}

fn init_service() -> BotService {
    match Settings::new().and_then(BotService::initialize) {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_client(service: &BotService) -> Bot {
    match service.build_client() {
        Ok(bot) => bot,
        Err(e) => {
            error!("Failed to create bot client: {}", e);
            std::process::exit(1);
        }
    }
}
