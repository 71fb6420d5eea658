//! Export of the daily counters for plotting and analysis outside the engine.

use crate::error::EpidemicError;
use crate::log::info;
use crate::simulation::DailyCounts;
use std::path::Path;

/// Writes the counters as CSV with the header `day,infected,recovered,dead`.
pub fn write_daily_counts(path: impl AsRef<Path>, counts: &[DailyCounts]) -> Result<(), EpidemicError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    for row in counts {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("wrote {} days of counts to {}", counts.len(), path.display());
    Ok(())
}
