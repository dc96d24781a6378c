//! GML feature collection reader for MarineRegions exports.

use regex::Regex;
use tracing::debug;

use crate::error::CatalogError;
use crate::models::RegionRecord;

/// Element names that locate region fields inside a feature collection
#[derive(Debug, Clone)]
pub struct GmlLayout {
    pub feature: String,
    pub code: String,
    pub name: String,
    pub geometry: String,
}

impl GmlLayout {
    /// Layout of the Longhurst provinces export
    pub fn longhurst() -> Self {
        Self {
            feature: "MarineRegions:longhurst".to_string(),
            code: "MarineRegions:provcode".to_string(),
            name: "MarineRegions:provdescr".to_string(),
            geometry: "MarineRegions:the_geom".to_string(),
        }
    }
}

impl Default for GmlLayout {
    fn default() -> Self {
        Self::longhurst()
    }
}

/// Extracts region records from GML text.
///
/// Per feature: the `fid` attribute is the source id, the first
/// `gml:coordinates` element is the bounding box, and every
/// `gml:coordinates` inside the geometry element is one ring.
pub struct GmlReader {
    feature: Regex,
    fid: Regex,
    code: Regex,
    name: Regex,
    geometry: Regex,
    coordinates: Regex,
    reference: Regex,
}

impl GmlReader {
    pub fn new(layout: GmlLayout) -> Result<Self, CatalogError> {
        let feature = regex::escape(&layout.feature);
        Ok(Self {
            feature: Regex::new(&format!(r"(?s)<{feature}\b([^>]*)>(.*?)</{feature}\s*>"))?,
            fid: Regex::new(r#"\bfid\s*=\s*["']([^"']*)["']"#)?,
            code: element(&layout.code)?,
            name: element(&layout.name)?,
            geometry: element(&layout.geometry)?,
            coordinates: element("gml:coordinates")?,
            reference: Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9a-fA-F]+)|(lt|gt|quot|apos|amp));")?,
        })
    }

    pub fn parse(&self, content: &str) -> Result<Vec<RegionRecord>, CatalogError> {
        self.feature
            .captures_iter(content)
            .enumerate()
            .map(|(index, caps)| {
                let attrs = caps.get(1).map_or("", |m| m.as_str());
                let body = caps.get(2).map_or("", |m| m.as_str());
                self.parse_feature(index, attrs, body)
            })
            .collect()
    }

    fn parse_feature(
        &self,
        index: usize,
        attrs: &str,
        body: &str,
    ) -> Result<RegionRecord, CatalogError> {
        let mut record = RegionRecord {
            id: self.fid.captures(attrs).map(|c| self.unescape(&c[1])),
            code: self.text(&self.code, body),
            name: self.text(&self.name, body),
            ..Default::default()
        };
        let label = record.describe(index);

        if let Some(caps) = self.coordinates.captures(body) {
            let corners = parse_pairs(&caps[1], &label)?;
            if corners.len() < 2 {
                return Err(CatalogError::InvalidCoordinate {
                    record: label,
                    value: caps[1].trim().to_string(),
                });
            }
            record.bbox = Some([corners[0], corners[1]]);
        }

        for geometry in self.geometry.captures_iter(body) {
            for ring in self.coordinates.captures_iter(&geometry[1]) {
                record.rings.push(parse_pairs(&ring[1], &label)?);
            }
        }

        debug!(
            "Parsed {}: code {:?}, {} rings",
            label,
            record.code,
            record.rings.len()
        );
        Ok(record)
    }

    /// Text content of the first matching element; empty elements count as absent
    fn text(&self, pattern: &Regex, body: &str) -> Option<String> {
        pattern
            .captures(body)
            .map(|c| {
                match c[1]
                    .strip_prefix("<![CDATA[")
                    .and_then(|inner| inner.strip_suffix("]]>"))
                {
                    Some(cdata) => cdata.to_string(),
                    None => self.unescape(&c[1]),
                }
            })
            .filter(|s| !s.is_empty())
    }

    /// Decode predefined entities and numeric character references in one
    /// pass. Unknown or out-of-range references are kept verbatim.
    fn unescape(&self, s: &str) -> String {
        self.reference
            .replace_all(s, |caps: &regex::Captures| {
                let decoded = if let Some(dec) = caps.get(1) {
                    dec.as_str().parse().ok().and_then(char::from_u32)
                } else if let Some(hex) = caps.get(2) {
                    u32::from_str_radix(hex.as_str(), 16)
                        .ok()
                        .and_then(char::from_u32)
                } else {
                    match caps.get(3).map(|m| m.as_str()) {
                        Some("lt") => Some('<'),
                        Some("gt") => Some('>'),
                        Some("quot") => Some('"'),
                        Some("apos") => Some('\''),
                        Some("amp") => Some('&'),
                        _ => None,
                    }
                };
                decoded.map_or_else(|| caps[0].to_string(), String::from)
            })
            .into_owned()
    }
}

fn element(tag: &str) -> Result<Regex, regex::Error> {
    let tag = regex::escape(tag);
    Regex::new(&format!(r"(?s)<{tag}(?:\s[^>]*)?>(.*?)</{tag}\s*>"))
}

/// Parse whitespace-separated `lon,lat` tuples
fn parse_pairs(coords: &str, label: &str) -> Result<Vec<[f64; 2]>, CatalogError> {
    coords
        .split_whitespace()
        .map(|tuple| {
            let invalid = || CatalogError::InvalidCoordinate {
                record: label.to_string(),
                value: tuple.to_string(),
            };
            let (lon, lat) = tuple.split_once(',').ok_or_else(invalid)?;
            let lon: f64 = lon.parse().map_err(|_| invalid())?;
            let lat: f64 = lat.parse().map_err(|_| invalid())?;
            Ok([lon, lat])
        })
        .collect()
}
