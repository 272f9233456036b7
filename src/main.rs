use clap::Parser;
use geoscene::extract::ExifToolReader;
use geoscene::{GeoPipeline, SessionStore};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Place the photos of a zip archive in a local 3D frame and print the scene as JSON.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Zip archive of geotagged photos.
    archive: PathBuf,

    /// Slippy-map zoom level of the ground tiles.
    #[arg(long, default_value_t = 19)]
    zoom: u8,

    /// Tiles on each side of the center tile.
    #[arg(long, default_value_t = 2)]
    tile_radius: u32,

    /// Per-photo tag reading timeout in milliseconds.
    #[arg(long, default_value_t = 2000)]
    timeout_ms: u64,

    /// Tile server URL with `{z}`, `{x}` and `{y}` placeholders.
    #[arg(long)]
    tile_url_template: Option<String>,

    /// Path to a specific exiftool executable.
    #[arg(long)]
    exiftool: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "Starting");

    let reader = ExifToolReader::builder()
        .maybe_exiftool_path(cli.exiftool)
        .build()?;
    let pipeline = GeoPipeline::builder()
        .reader(reader)
        .zoom(cli.zoom)
        .tile_radius(cli.tile_radius)
        .read_timeout(Duration::from_millis(cli.timeout_ms))
        .maybe_tile_url_template(cli.tile_url_template)
        .build()?;

    let bytes = std::fs::read(&cli.archive)?;
    let store = SessionStore::new();
    let status = store.load(&pipeline, &bytes).await?;
    eprintln!("{}", status.message());

    if let Some(session) = store.current() {
        println!("{}", serde_json::to_string_pretty(&*session)?);
    }

    Ok(())
}
