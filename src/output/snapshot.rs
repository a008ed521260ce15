use crate::config::OutputConfig;
use chrono::Local;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Writes `snapshot_<YYYYmmdd_HHMMSS>.txt` into the export dir
///
/// The snapshot holds the zh results followed by the en results. Missing
/// result files are skipped. Returns the snapshot path.
pub fn export_snapshot(config: &OutputConfig) -> io::Result<PathBuf> {
    std::fs::create_dir_all(&config.export_dir)?;

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = config.export_dir.join(format!("snapshot_{}.txt", stamp));
    let mut out = BufWriter::new(File::create(&path)?);

    for source in [config.results_zh_path(), config.results_en_path()] {
        match File::open(&source) {
            Ok(mut file) => {
                io::copy(&mut file, &mut out)?;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Skipping missing {}", source.display());
            }
            Err(e) => return Err(e),
        }
    }

    out.flush()?;
    tracing::info!("Exported snapshot to {}", path.display());
    Ok(path)
}
