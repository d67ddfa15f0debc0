use super::{Catalog, CatalogLoadError};
use std::path::Path;
use tracing::{debug, info};

/// Reads and parses the catalog file. Any failure here is fatal for both front ends.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogLoadError> {
    let path = path.as_ref();
    let origin = path.display().to_string();

    debug!("Reading catalog from {}...", origin);
    let text = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Read {
        origin: origin.clone(),
        source,
    })?;

    let catalog = Catalog::from_json_str(&origin, &text)?;
    info!(
        "Catalog {} has:\n{} categories\n{} links",
        origin,
        catalog.len(),
        catalog.links_count()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_catalog_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "housing": {{ "description": "Housing help", "links": ["https://a.example"] }} }}"#
        )
        .unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("housing").unwrap().1.links, vec!["https://a.example"]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(dir.path().join("resources.json")).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Read { .. }));
    }

    #[test]
    fn empty_file_is_a_parse_error() {
        let file = NamedTempFile::new().unwrap();
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Parse { .. }));
    }
}
