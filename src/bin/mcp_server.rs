//! Scratch MCP Server
//!
//! Exposes page scratching to MCP clients over stdio or streamable HTTP.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rmcp::{
    ServiceExt,
    transport::{
        stdio,
        streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
    },
};
use scratch::browser::{BrowserSession, ConnectionOptions, LaunchOptions};
use scratch::mcp::ScratchServer;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// HTTP streamable transport
    Http,
}

#[derive(Parser)]
#[command(name = "scratch-mcp")]
#[command(version)]
#[command(about = "Scratch structured JSON out of web pages over MCP", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<String>,

    /// WebSocket endpoint of an already running browser
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<String>,

    /// Disable the Chrome sandbox (needed in some containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for HTTP transport
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// HTTP streamable endpoint path
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

impl Cli {
    fn launch_options(&self) -> LaunchOptions {
        let mut options = LaunchOptions::new().headless(!self.headed).sandbox(!self.no_sandbox);
        if let Some(path) = &self.executable_path {
            options = options.chrome_path(path);
        }
        if let Some(dir) = &self.user_data_dir {
            options = options.user_data_dir(dir);
        }
        options
    }
}

fn create_server(options: &LaunchOptions, ws_endpoint: Option<&str>) -> scratch::Result<ScratchServer> {
    match ws_endpoint {
        Some(url) => Ok(ScratchServer::with_session(BrowserSession::connect(ConnectionOptions::new(url))?)),
        None => ScratchServer::with_options(options.clone()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout carries the stdio transport; env_logger writes to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options = cli.launch_options();
    let ws_endpoint = cli.ws_endpoint.clone();

    log::info!("Scratch MCP Server v{}", env!("CARGO_PKG_VERSION"));
    match &ws_endpoint {
        Some(url) => log::info!("Browser: connecting to {}", url),
        None => log::info!(
            "Browser mode: {}",
            if options.headless { "headless" } else { "headed" }
        ),
    }

    match cli.transport {
        Transport::Stdio => {
            log::info!("Ready to accept MCP connections via stdio");
            let service = create_server(&options, ws_endpoint.as_deref()).context("Failed to create scratch server")?;
            let server = service.serve(stdio()).await?;
            let quit_reason = server.waiting().await?;
            log::info!("Server quit with reason: {:?}", quit_reason);
            // Give a small delay for the browser to shut down
            tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
        }
        Transport::Http => {
            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let service_factory = move || {
                create_server(&options, ws_endpoint.as_deref()).map_err(std::io::Error::other)
            };

            let http_service = StreamableHttpService::new(
                service_factory,
                LocalSessionManager::default().into(),
                Default::default(),
            );

            let router = axum::Router::new().nest_service(&cli.http_path, http_service);

            log::info!(
                "Ready to accept MCP connections at http://{}{}",
                bind_addr,
                cli.http_path
            );

            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                })
                .await?;
        }
    }

    Ok(())
}
