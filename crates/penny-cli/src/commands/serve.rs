//! Server command implementation

use anyhow::Result;
use penny_core::AssistantConfig;
use penny_server::ServerConfig;

pub async fn cmd_serve(config: AssistantConfig, host: &str, port: u16) -> Result<()> {
    let server_config = ServerConfig::from_env();

    println!("🚀 Starting Penny web server...");
    println!("   Listening: http://{}:{}", host, port);
    println!(
        "   Responder: {} (PENNY_RESPONDER)",
        server_config.responder.as_str()
    );
    println!("   Currency: {}", config.currency_symbol);
    if !server_config.allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {} (PENNY_ALLOWED_ORIGINS)",
            server_config.allowed_origins.join(", ")
        );
    }
    if let Some(seed) = config.seed {
        println!("   🎲 Fixed template seed: {}", seed);
    }
    println!();

    penny_server::serve(host, port, config, server_config).await
}
