// JSON export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use carex_metrics::Dashboard;

use crate::error::IoError;

/// Write the dashboard as pretty-printed JSON.
pub fn write_dashboard(dashboard: &Dashboard, path: &Path) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::write(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, dashboard).map_err(|e| IoError::Json(e.to_string()))?;
    writer.flush().map_err(|e| IoError::write(path, e))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use carex_metrics::{Engine, MetricsInput, ReportPeriod, RulesConfig};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_json_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");

        let input = MetricsInput::default();
        let rules = RulesConfig::default();
        let dashboard = Engine::new(&rules, &input).dashboard(ReportPeriod::new(2024, 6).unwrap());
        write_dashboard(&dashboard, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed["reference"]["year"], 2024);
        assert_eq!(parsed["reference"]["month"], 6);
        assert_eq!(parsed["overview"]["monthly"]["caption"], "Junio 2024");
        assert_eq!(parsed["salespeople"]["annual"][0]["key"], "TOTAL COMPAÑÍA");
        assert_eq!(parsed["salespeople"]["annual"][0]["is_total"], true);
        assert_eq!(parsed["top_clients"]["monthly"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn written_file_is_complete_on_return() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");

        let input = MetricsInput::default();
        let rules = RulesConfig::default();
        let dashboard = Engine::new(&rules, &input).dashboard(ReportPeriod::new(2024, 6).unwrap());
        write_dashboard(&dashboard, &path).unwrap();

        let expected = serde_json::to_string_pretty(&dashboard).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("dashboard.json");

        let input = MetricsInput::default();
        let rules = RulesConfig::default();
        let dashboard = Engine::new(&rules, &input).dashboard(ReportPeriod::new(2024, 6).unwrap());
        let err = write_dashboard(&dashboard, &path).unwrap_err();
        assert!(matches!(err, IoError::Write { .. }));
    }
}
