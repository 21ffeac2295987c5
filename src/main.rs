use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use inkdash::api;
use inkdash::assets::AssetLoader;
use inkdash::models::AppConfig;
use inkdash::server;
use inkdash::services::RenderService;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:18000";

#[derive(Parser)]
#[command(name = "inkdash")]
#[command(about = "Countdown dashboard server for monochrome e-paper panels")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render the dashboard once and write it to a file
    Render {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Png)]
        format: OutputFormat,

        /// Dither cutoff in (0, 1), overrides the config
        #[arg(short, long)]
        cutoff: Option<f64>,

        /// Threshold every column from this one on instead of diffusing
        #[arg(long)]
        split_column: Option<u32>,
    },
    /// Dither a raw RGBA file to a packed 1-bit bitmap
    Dither {
        /// Raw RGBA input, 4 bytes per pixel, row-major
        #[arg(short, long)]
        input: PathBuf,

        /// Image width in pixels (multiple of 8)
        #[arg(long)]
        width: u32,

        /// Image height in pixels
        #[arg(long)]
        height: u32,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Dither cutoff in (0, 1)
        #[arg(short, long, default_value_t = mono_dither::DEFAULT_CUTOFF)]
        cutoff: f64,

        /// Threshold every column from this one on instead of diffusing
        #[arg(long)]
        split_column: Option<u32>,

        /// Write the 8-bit mask (one byte per pixel) instead of the packed bitmap
        #[arg(long)]
        mask: bool,
    },
    /// Write the embedded config, events and template into the assets directory
    Init {
        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Dithered mask as a grayscale PNG
    Png,
    /// Packed bitmap as sent to the panel
    Raw,
    /// Dashboard SVG before rasterization
    Svg,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "inkdash API",
        description = "Countdown dashboard server for monochrome e-paper panels",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_png,
        api::handle_raw,
        api::handle_svg,
        api::handle_photo,
    ),
    tags(
        (name = "Dashboard", description = "Rendered dashboard frames"),
        (name = "Photos", description = "Background photos")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            output,
            format,
            cutoff,
            split_column,
        }) => run_render_command(&output, format, cutoff, split_column).await,
        Some(Commands::Dither {
            input,
            width,
            height,
            output,
            cutoff,
            split_column,
            mask,
        }) => run_dither_command(&input, width, height, &output, cutoff, split_column, mask),
        Some(Commands::Init { force }) => run_init_command(force),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkdash=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Asset loader configured from ASSETS_DIR and CONFIG_FILE
fn asset_loader_from_env() -> AssetLoader {
    let assets_dir = std::env::var("ASSETS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    AssetLoader::new(assets_dir, config_file)
}

/// Render the dashboard once (no server needed)
async fn run_render_command(
    output: &Path,
    format: OutputFormat,
    cutoff: Option<f64>,
    split_column: Option<u32>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let loader = Arc::new(asset_loader_from_env());
    let mut config = AppConfig::load_from_assets(&loader);
    if let Some(cutoff) = cutoff {
        config.dither.cutoff = cutoff;
    }
    if split_column.is_some() {
        config.dither.split_column = split_column;
    }

    let renderer = RenderService::new(Arc::new(config), loader)?;
    let frame = renderer.render_frame(chrono::Utc::now()).await?;

    let bytes = match format {
        OutputFormat::Png => frame.png_bytes,
        OutputFormat::Raw => frame.packed,
        OutputFormat::Svg => frame.svg.into_bytes(),
    };
    std::fs::write(output, &bytes)?;
    println!("Rendered {} ({} bytes)", output.display(), bytes.len());

    Ok(())
}

/// Run the dithering core on a raw RGBA file
fn run_dither_command(
    input: &Path,
    width: u32,
    height: u32,
    output: &Path,
    cutoff: f64,
    split_column: Option<u32>,
    mask: bool,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let rgba = std::fs::read(input)?;
    let frame = mono_dither::dither(&rgba, width, height, cutoff, split_column)?;

    let bytes = if mask { frame.mask() } else { frame.packed() };
    std::fs::write(output, bytes)?;
    println!(
        "Dithered {}x{} -> {} ({} bytes, {} pixels on)",
        width,
        height,
        output.display(),
        bytes.len(),
        frame.lit_pixels()
    );

    Ok(())
}

/// Extract embedded defaults to the assets directory
fn run_init_command(force: bool) -> anyhow::Result<()> {
    let loader = asset_loader_from_env();
    let report = loader.init(force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let assets_dir = std::env::var("ASSETS_DIR").ok();

    println!("inkdash v{VERSION}");
    println!("Countdown dashboard server for monochrome e-paper panels\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr
            .as_deref()
            .unwrap_or(&format!("{DEFAULT_BIND_ADDR} (default)"))
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  ASSETS_DIR  = {}",
        assets_dir.as_deref().unwrap_or(". (default)")
    );

    let loader = asset_loader_from_env();
    let config = AppConfig::load_from_assets(&loader);

    println!("\nAsset Sources:");
    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:   {config_source}");
    println!(
        "  Template: {}",
        if loader.has_template_override() {
            "assets directory"
        } else {
            "embedded"
        }
    );
    let events_path = loader.resolve(&config.events_file);
    println!(
        "  Events:   {}{}",
        events_path.display(),
        if events_path.exists() { "" } else { " (missing)" }
    );
    println!("  Fonts:    {} in <assets>/fonts", loader.get_fonts().len());

    println!("\nDisplay:");
    println!(
        "  {}x{}, cutoff {}, split column {}",
        config.display.width,
        config.display.height,
        config.dither.cutoff,
        config
            .dither
            .split_column
            .map_or_else(|| "none".to_string(), |c| c.to_string())
    );

    println!("\nCommands:");
    println!("  inkdash serve    Start the HTTP server");
    println!("  inkdash render   Render the dashboard to a file");
    println!("  inkdash dither   Dither a raw RGBA file");
    println!("  inkdash init     Extract embedded defaults");
    println!("\nRun 'inkdash --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkdash=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let asset_loader = Arc::new(asset_loader_from_env());

    tracing::info!(
        assets = %asset_loader.assets_dir().display(),
        config = ?std::env::var("CONFIG_FILE").unwrap_or_else(|_| "embedded".to_string()),
        "Asset sources configured"
    );

    // Create application state using shared server module
    let state = server::create_app_state(asset_loader)?;

    // OpenAPI documentation (production only), merged before the middleware
    // so its responses close the connection too
    let app = server::with_middleware(
        server::routes(state)
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())),
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "inkdash server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
