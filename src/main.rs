use anyhow::Context;
use bookwise::{
    api::routes::create_router,
    cli::{Cli, Commands},
    mcp::server::start_stdio_server,
    AppState, BookwiseConfig,
};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse_args();

    match cli.command() {
        Commands::Serve => {
            let config = load_config(&cli.config)?;
            init_tracing(&config.server.log_level, cli.verbose);
            serve(config).await
        }
        Commands::Stdio => {
            let config = load_config(&cli.config)?;
            init_tracing(&config.server.log_level, cli.verbose);
            stdio(config).await
        }
        Commands::Config { validate, default } => show_config(&cli.config, *validate, *default),
    }
}

fn load_config(path: &Path) -> anyhow::Result<BookwiseConfig> {
    BookwiseConfig::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Logs go to stderr so stdout stays free for the stdio transport.
fn init_tracing(log_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("bookwise=debug,bookwise_server=debug,tower_http=debug,rmcp=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "bookwise={level},bookwise_server={level},tower_http={level},rmcp=warn",
                level = log_level
            ))
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn open_state(config: BookwiseConfig) -> anyhow::Result<AppState> {
    let state = AppState::from_config(config).await?;

    match state.store.count_books().await {
        Ok(0) => warn!("Book table is empty; searchBooks will summarize no results"),
        Ok(count) => info!(books = count, "Book table ready"),
        Err(e) => warn!(error = %e, "Could not count books"),
    }
    info!(model = state.llm.model_name(), "Inference backend ready");

    Ok(state)
}

async fn serve(config: BookwiseConfig) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = open_state(config).await?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Bookwise listening on http://{}", addr);
    info!("  SSE endpoint:             http://{}/sse", addr);
    info!("  Streamable HTTP endpoint: http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn stdio(config: BookwiseConfig) -> anyhow::Result<()> {
    let state = open_state(config).await?;
    info!("Serving MCP over stdio");
    start_stdio_server(state.mcp_server()).await?;
    Ok(())
}

fn show_config(path: &Path, validate: bool, default: bool) -> anyhow::Result<()> {
    if default {
        print!("{}", BookwiseConfig::default().to_toml()?);
        return Ok(());
    }

    if validate {
        load_config(path)?;
        println!("Configuration is valid: {}", path.display());
        return Ok(());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = BookwiseConfig::parse(&content)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
