use geoscene::extract::ExifToolReader;
use geoscene::{GeoPipeline, SessionStore};

/// Load a zip of photos and print where each one ended up.
#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/trip.zip".to_string());
    let pipeline = GeoPipeline::builder()
        .reader(ExifToolReader::builder().build()?)
        .build()?;
    let store = SessionStore::new();

    let status = store.load(&pipeline, &std::fs::read(path)?).await?;
    println!("{}", status.message());

    if let Some(session) = store.current() {
        println!("Origin: {:?}", session.frame.origin);
        for record in &session.records {
            if let Some(position) = session.position_of(record.name()) {
                println!(
                    "{:<24} x={:>9.2} y={:>7.2} z={:>9.2}",
                    record.display_name(),
                    position.x,
                    position.y,
                    position.z
                );
            }
        }
        println!("Camera distance: {:.1} m", session.camera_distance());
    }

    Ok(())
}
