//! Server command implementation

use anyhow::Result;
use marketeer_core::AnalysisConfig;

pub async fn cmd_serve(
    config: AnalysisConfig,
    host: &str,
    port: u16,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Marketeer web server...");
    println!("   Listening: http://{}:{}", host, port);
    if !allowed_origins.is_empty() {
        println!("   CORS origins: {}", allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let server_config = marketeer_server::ServerConfig { allowed_origins };
    marketeer_server::serve_with_config(host, port, config, server_config).await?;

    Ok(())
}
