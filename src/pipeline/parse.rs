//! Loading mixture files with context for error messages.

use crate::model::Mixture;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// A mixture together with the file it came from
#[derive(Debug, Clone)]
pub struct LoadedMixture {
    pub path: PathBuf,
    pub mixture: Mixture,
}

impl LoadedMixture {
    /// File name for display, falling back to the full path
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}

/// Read and parse one mixfile
pub fn load_mixture(path: &Path) -> Result<LoadedMixture> {
    tracing::debug!("Loading mixture: {}", path.display());

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read mixture file: {}", path.display()))?;
    let mixture = Mixture::from_json(&raw)
        .with_context(|| format!("Failed to parse mixture: {}", path.display()))?;

    tracing::debug!(
        components = mixture.get_origins().len(),
        "Parsed {}",
        path.display()
    );
    Ok(LoadedMixture {
        path: path.to_path_buf(),
        mixture,
    })
}

/// Load many files in parallel. Results keep the input order.
pub fn load_mixtures(paths: &[PathBuf]) -> Vec<Result<LoadedMixture>> {
    paths.par_iter().map(|path| load_mixture(path)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_mixture() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("water.mixfile");
        std::fs::write(
            &path,
            r#"{"mixfileVersion": 0.01, "name": "water", "inchi": "InChI=1S/H2O/h1H2"}"#,
        )
        .unwrap();

        let loaded = load_mixture(&path).unwrap();
        assert_eq!(loaded.display_name(), "water.mixfile");
        assert_eq!(loaded.mixture.root().name.as_deref(), Some("water"));
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.mixfile");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_mixture(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.mixfile"));
        assert!(load_mixture(&tmp.path().join("missing.mixfile")).is_err());
    }

    #[test]
    fn test_load_mixtures_keeps_order() {
        let tmp = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..4)
            .map(|i| {
                let path = tmp.path().join(format!("m{i}.mixfile"));
                std::fs::write(&path, format!(r#"{{"mixfileVersion": 1, "name": "m{i}"}}"#)).unwrap();
                path
            })
            .collect();

        let names: Vec<_> = load_mixtures(&paths)
            .into_iter()
            .map(|loaded| loaded.unwrap().mixture.root().name.clone().unwrap())
            .collect();
        assert_eq!(names, ["m0", "m1", "m2", "m3"]);
    }
}
