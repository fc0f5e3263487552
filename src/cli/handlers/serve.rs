//! API server handlers

use crate::api::serve_api;
use crate::AppConfig;
use crate::Result;

pub async fn handle_serve_api(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    cors: bool,
) -> Result<()> {
    // CLI arguments take priority over config
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    println!("🚀 Starting citerag API Server");
    println!("===============================\n");
    println!("📍 Host: {host}");
    println!("🔌 Port: {port}");
    let origins = &config.server.allowed_origins;
    if origins.is_empty() && !cors {
        println!("🌐 CORS: Disabled");
    } else if origins.is_empty() {
        println!("🌐 CORS: any origin");
    } else {
        println!("🌐 CORS: {}", origins.join(", "));
    }
    println!("🏷️  Environment: {}", config.server.environment);
    println!();

    serve_api(config, host, port, cors).await
}
