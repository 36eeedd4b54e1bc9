use crate::domain::pricing::dataset::Dataset;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes the table as CSV with a header row
/// (`demand_index,competitor_price,seasonality,observed_price`).
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for obs in dataset {
        wtr.serialize(obs)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the table to it.
pub fn export_csv(dataset: &Dataset, path: &Path) -> csv::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_csv(dataset, file)?;
    info!("Exported {} observations to {:?}", dataset.len(), path);
    Ok(())
}
