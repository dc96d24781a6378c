use crate::error::CatalogError;
use crate::models::RegionRecord;

/// Parse a JSON array of region records.
///
/// Missing fields are left as `None` for the catalog to report.
pub fn parse_json(content: &str) -> Result<Vec<RegionRecord>, CatalogError> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let json = r#"[
            {"code": "A", "name": "Alpha", "bbox": [[-30, 0], [-10, 20]],
             "rings": [[[-30, 0], [-30, 20], [-10, 20], [-10, 0], [-30, 0]],
                       [[1.5, 2.5], [3.5, 4.5]]]},
            {"fid": "b", "code": "B"}
        ]"#;
        let records = parse_json(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].bbox, Some([[-30.0, 0.0], [-10.0, 20.0]]));
        assert_eq!(records[0].rings.len(), 2);
        assert_eq!(records[0].rings[1], vec![[1.5, 2.5], [3.5, 4.5]]);
        assert_eq!(records[1].id.as_deref(), Some("b"));
        assert!(records[1].name.is_none());
    }

    #[test]
    fn test_non_numeric_coordinate_is_error() {
        let json = r#"[{"code": "A", "name": "A", "bbox": [["x", 0], [1, 1]], "rings": []}]"#;
        assert!(matches!(parse_json(json), Err(CatalogError::Json(_))));
    }
}
