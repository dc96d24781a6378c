//! Region record sources.
//!
//! Reads the province definitions the catalog is built from. The format is
//! picked from the file extension; a trailing `.gz` is decompressed first.

mod gml;
mod json;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::info;

use crate::error::CatalogError;
use crate::models::RegionRecord;
use crate::pip::RegionCatalog;

pub use gml::{GmlLayout, GmlReader};
pub use json::parse_json;

/// Supported catalog encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// MarineRegions GML feature collection
    Gml,
    /// JSON array of region records
    Json,
}

impl SourceFormat {
    /// Detect the format from a path, looking through a `.gz` suffix
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let stem = if is_gzip(path) {
            path.file_stem().map(Path::new).unwrap_or(path)
        } else {
            path
        };

        match stem
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("xml") | Some("gml") => Ok(SourceFormat::Gml),
            Some("json") => Ok(SourceFormat::Json),
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Open a file, transparently decompressing `.gz`
pub fn open_maybe_gzip(path: &Path) -> std::io::Result<Box<dyn Read + Send>> {
    let file = File::open(path)?;
    if is_gzip(path) {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "gz")
}

/// Read all region records from a catalog file
pub fn load_records(path: &Path) -> Result<Vec<RegionRecord>, CatalogError> {
    info!("Loading region records from {}", path.display());

    let format = SourceFormat::from_path(path)?;
    let mut content = String::new();
    open_maybe_gzip(path)?.read_to_string(&mut content)?;

    let records = match format {
        SourceFormat::Gml => GmlReader::new(GmlLayout::longhurst())?.parse(&content)?,
        SourceFormat::Json => parse_json(&content)?,
    };

    info!("Read {} region records", records.len());
    Ok(records)
}

/// Load and build the catalog in one step
pub fn load_catalog(path: &Path) -> Result<RegionCatalog, CatalogError> {
    RegionCatalog::build(load_records(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const JSON: &str = r#"[
        {"id": "r1", "code": "SQR", "name": "Square",
         "bbox": [[0, 0], [10, 10]],
         "rings": [[[0, 0], [0, 10], [10, 10], [10, 0], [0, 0]]]}
    ]"#;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("longhurst.xml")).unwrap(),
            SourceFormat::Gml
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("regions.GML.gz")).unwrap(),
            SourceFormat::Gml
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("data/regions.json")).unwrap(),
            SourceFormat::Json
        );
        assert!(matches!(
            SourceFormat::from_path(Path::new("regions.shp")),
            Err(CatalogError::UnsupportedFormat(_))
        ));
        assert!(SourceFormat::from_path(Path::new("regions")).is_err());
    }

    #[test]
    fn test_load_json_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.json");
        std::fs::write(&path, JSON).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_gzip_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.json.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(JSON.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code.as_deref(), Some("SQR"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(&dir.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
