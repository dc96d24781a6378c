//! Query and result types for coordinate classification.

/// Code written when no single province could be assigned
pub const NO_CODE: &str = "NA";
/// Reason written when the point falls inside no province
pub const ON_LAND_REASON: &str = "Coordinates may be on land";
/// Reason written when the point falls inside several provinces
pub const MULTIPLE_REASON: &str = "Multiple Solutions found";

/// A single coordinate to classify. No range validation is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateQuery {
    pub sample_id: String,
    pub lat: f64,
    pub lon: f64,
}

impl CoordinateQuery {
    pub fn new(sample_id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            sample_id: sample_id.into(),
            lat,
            lon,
        }
    }
}

/// Outcome of resolving the inside set for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Exactly one province contains the point
    Province { code: String, name: String },
    /// No province contains the point
    OnLand,
    /// More than one province contains the point
    Ambiguous,
}

impl Assignment {
    /// Value of the code column
    pub fn code(&self) -> &str {
        match self {
            Assignment::Province { code, .. } => code,
            Assignment::OnLand | Assignment::Ambiguous => NO_CODE,
        }
    }

    /// Value of the name column: province name or the reason string
    pub fn name(&self) -> &str {
        match self {
            Assignment::Province { name, .. } => name,
            Assignment::OnLand => ON_LAND_REASON,
            Assignment::Ambiguous => MULTIPLE_REASON,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, Assignment::Province { .. })
    }
}

/// Classification of one query, ready to be written as an output row
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub query: CoordinateQuery,
    pub assignment: Assignment,
}

impl ClassificationResult {
    /// Output columns: sample id, latitude, longitude, code, name
    pub fn to_record(&self) -> [String; 5] {
        [
            self.query.sample_id.clone(),
            format_coordinate(self.query.lat),
            format_coordinate(self.query.lon),
            self.assignment.code().to_string(),
            self.assignment.name().to_string(),
        ]
    }
}

/// Format a coordinate the way existing classification outputs print it:
/// shortest round-trip digits with a mandatory fractional part, and
/// exponents carrying an explicit sign and at least two digits.
pub fn format_coordinate(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Debug output already switches to exponent form outside [1e-4, 1e16)
    let repr = format!("{:?}", value);
    let Some((mantissa, exponent)) = repr.split_once('e') else {
        return repr;
    };

    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    let mantissa = mantissa.strip_suffix(".0").unwrap_or(mantissa);

    format!("{}e{}{:0>2}", mantissa, sign, digits)
}
