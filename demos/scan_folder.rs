use geoscene::archive::ArchiveEntry;
use geoscene::extract::ExifToolReader;
use geoscene::{GeoPipeline, LoadOutcome};
use std::path::Path;
use walkdir::WalkDir;

/// Treat a folder of photos as if it were an archive and print the resulting scene.
#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let root = std::env::args().nth(1).unwrap_or_else(|| "assets".to_string());
    let root = Path::new(&root);

    let mut entries = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        let name = entry
            .path()
            .strip_prefix(root)?
            .to_string_lossy()
            .replace('\\', "/");
        if entry.file_type().is_dir() {
            entries.push(ArchiveEntry::directory(format!("{name}/")));
        } else {
            entries.push(ArchiveEntry::file(name, std::fs::read(entry.path())?));
        }
    }
    println!("Found {} entries in {}", entries.len(), root.display());

    let pipeline = GeoPipeline::builder()
        .reader(ExifToolReader::builder().build()?)
        .build()?;
    match pipeline.process(&entries).await? {
        LoadOutcome::Loaded(session) => {
            println!("{}", serde_json::to_string_pretty(&*session)?);
        }
        LoadOutcome::NoCandidates => println!("No photos found."),
        LoadOutcome::NoGps { candidates } => {
            println!("{candidates} photos found, none with GPS data.");
        }
    }

    Ok(())
}
