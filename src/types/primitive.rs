// Primitive value kinds with FHIR lexical grammars

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate};
use regex::Regex;
use serde_json::Value;

/// The primitive value kinds of the FHIR type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Boolean,
    Integer,
    PositiveInt,
    UnsignedInt,
    Decimal,
    Date,
    DateTime,
    Instant,
    Time,
    Code,
    Uri,
    Url,
    Base64Binary,
    Id,
    Markdown,
    Oid,
    Uuid,
}

impl PrimitiveKind {
    /// The FHIR type name for this kind (e.g., "positiveInt")
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::PositiveInt => "positiveInt",
            PrimitiveKind::UnsignedInt => "unsignedInt",
            PrimitiveKind::Decimal => "decimal",
            PrimitiveKind::Date => "date",
            PrimitiveKind::DateTime => "dateTime",
            PrimitiveKind::Instant => "instant",
            PrimitiveKind::Time => "time",
            PrimitiveKind::Code => "code",
            PrimitiveKind::Uri => "uri",
            PrimitiveKind::Url => "url",
            PrimitiveKind::Base64Binary => "base64Binary",
            PrimitiveKind::Id => "id",
            PrimitiveKind::Markdown => "markdown",
            PrimitiveKind::Oid => "oid",
            PrimitiveKind::Uuid => "uuid",
        }
    }

    /// Whether the wire form of this kind is a JSON boolean
    pub fn is_boolean(&self) -> bool {
        matches!(self, PrimitiveKind::Boolean)
    }

    /// Whether the wire form of this kind is a JSON number
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::Integer
                | PrimitiveKind::PositiveInt
                | PrimitiveKind::UnsignedInt
                | PrimitiveKind::Decimal
        )
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw value that failed the lexical grammar of its declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalError {
    pub kind: PrimitiveKind,
    pub message: String,
}

impl LexicalError {
    fn new(kind: PrimitiveKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.kind.name(), self.message)
    }
}

impl std::error::Error for LexicalError {}

/// The wire-lossless scalar payload of a primitive value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

/// A tagged primitive scalar: kind plus its lexically validated wire form.
///
/// The scalar is kept exactly as received so export is lossless; semantic
/// values (integers, timestamps) are derived through accessors and are never
/// authoritative on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveValue {
    kind: PrimitiveKind,
    scalar: Scalar,
}

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}(-\d{2}(-\d{2})?)?$").unwrap());
static DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}(-\d{2}(-\d{2}(T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2}))?)?)?$")
        .unwrap()
});
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}(\.\d+)?$").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s]+( [^\s]+)*$").unwrap());
static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-.]{1,64}$").unwrap());
static OID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^urn:oid:[0-2](\.(0|[1-9]\d*))+$").unwrap());
static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^urn:uuid:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});
static BASE64_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/]*={0,2}$").unwrap());

impl PrimitiveValue {
    /// Parse a wire value into a validated primitive of the given kind.
    pub fn parse(kind: PrimitiveKind, value: &Value) -> Result<Self, LexicalError> {
        let scalar = match kind {
            PrimitiveKind::Boolean => match value {
                Value::Bool(b) => Scalar::Bool(*b),
                other => return Err(expected(kind, "a JSON boolean", other)),
            },
            PrimitiveKind::Integer | PrimitiveKind::PositiveInt | PrimitiveKind::UnsignedInt => {
                let number = match value {
                    Value::Number(n) => n.clone(),
                    other => return Err(expected(kind, "a JSON integer", other)),
                };
                let parsed = number
                    .as_i64()
                    .ok_or_else(|| LexicalError::new(kind, "not a whole number"))?;
                check_integer_range(kind, parsed)?;
                Scalar::Number(number)
            }
            PrimitiveKind::Decimal => match value {
                Value::Number(n) => Scalar::Number(n.clone()),
                other => return Err(expected(kind, "a JSON number", other)),
            },
            _ => {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => return Err(expected(kind, "a JSON string", other)),
                };
                check_lexical_form(kind, &text)?;
                Scalar::Text(text)
            }
        };

        Ok(Self { kind, scalar })
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    /// The raw lexical form of the value
    pub fn raw(&self) -> String {
        match &self.scalar {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }

    /// Export the value back to its exact wire form
    pub fn to_wire(&self) -> Value {
        match &self.scalar {
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Number(n) => Value::Number(n.clone()),
            Scalar::Text(s) => Value::String(s.clone()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &self.scalar {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match &self.scalar {
            Scalar::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match &self.scalar {
            Scalar::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.scalar {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Derived timestamp for fully-specified dateTime and instant values
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        let text = self.as_str()?;
        DateTime::parse_from_rfc3339(text).ok()
    }

    /// Derived calendar date for fully-specified date values
    pub fn date(&self) -> Option<NaiveDate> {
        let text = self.as_str()?;
        NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
    }
}

fn expected(kind: PrimitiveKind, wanted: &str, got: &Value) -> LexicalError {
    LexicalError::new(kind, format!("expected {wanted}, got {got}"))
}

fn check_integer_range(kind: PrimitiveKind, parsed: i64) -> Result<(), LexicalError> {
    match kind {
        PrimitiveKind::Integer => {
            if i32::try_from(parsed).is_err() {
                return Err(LexicalError::new(kind, "outside 32-bit range"));
            }
        }
        PrimitiveKind::PositiveInt => {
            if parsed < 1 {
                return Err(LexicalError::new(kind, "must be >= 1"));
            }
        }
        PrimitiveKind::UnsignedInt => {
            if parsed < 0 {
                return Err(LexicalError::new(kind, "must be >= 0"));
            }
        }
        _ => {}
    }
    Ok(())
}

fn check_lexical_form(kind: PrimitiveKind, text: &str) -> Result<(), LexicalError> {
    let ok = match kind {
        PrimitiveKind::String | PrimitiveKind::Markdown => !text.is_empty(),
        PrimitiveKind::Date => {
            DATE_RE.is_match(text)
                && (text.len() < 10 || NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok())
        }
        PrimitiveKind::DateTime => {
            DATETIME_RE.is_match(text)
                && (!text.contains('T') || DateTime::parse_from_rfc3339(text).is_ok())
        }
        PrimitiveKind::Instant => DateTime::parse_from_rfc3339(text).is_ok(),
        PrimitiveKind::Time => TIME_RE.is_match(text),
        PrimitiveKind::Code => CODE_RE.is_match(text),
        PrimitiveKind::Id => ID_RE.is_match(text),
        PrimitiveKind::Oid => OID_RE.is_match(text),
        PrimitiveKind::Uuid => UUID_RE.is_match(text),
        PrimitiveKind::Base64Binary => !text.is_empty() && BASE64_RE.is_match(text),
        // FHIR uris may be relative; absolute forms must parse, relative
        // forms must at least be whitespace-free
        PrimitiveKind::Uri | PrimitiveKind::Url => {
            url::Url::parse(text).is_ok()
                || (!text.is_empty() && !text.contains(char::is_whitespace))
        }
        _ => true,
    };

    if ok {
        Ok(())
    } else {
        Err(LexicalError::new(
            kind,
            format!("{text:?} does not satisfy the lexical grammar"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_booleans() {
        let value = PrimitiveValue::parse(PrimitiveKind::Boolean, &json!(true)).unwrap();
        assert_eq!(value.as_bool(), Some(true));
        assert_eq!(value.to_wire(), json!(true));

        assert!(PrimitiveValue::parse(PrimitiveKind::Boolean, &json!("true")).is_err());
    }

    #[test]
    fn positive_int_rejects_zero() {
        assert!(PrimitiveValue::parse(PrimitiveKind::PositiveInt, &json!(1)).is_ok());
        assert!(PrimitiveValue::parse(PrimitiveKind::PositiveInt, &json!(0)).is_err());
        assert!(PrimitiveValue::parse(PrimitiveKind::UnsignedInt, &json!(0)).is_ok());
        assert!(PrimitiveValue::parse(PrimitiveKind::UnsignedInt, &json!(-1)).is_err());
    }

    #[test]
    fn integer_is_32_bit() {
        assert!(PrimitiveValue::parse(PrimitiveKind::Integer, &json!(2_147_483_647)).is_ok());
        assert!(PrimitiveValue::parse(PrimitiveKind::Integer, &json!(2_147_483_648i64)).is_err());
    }

    #[test]
    fn date_grammar() {
        for good in ["2020", "2020-01", "2020-01-15"] {
            assert!(
                PrimitiveValue::parse(PrimitiveKind::Date, &json!(good)).is_ok(),
                "{good} should be a valid date"
            );
        }
        for bad in ["2020-13-01", "2020-02-30", "Jan 2020", "20200115"] {
            assert!(
                PrimitiveValue::parse(PrimitiveKind::Date, &json!(bad)).is_err(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn instant_requires_timezone() {
        assert!(
            PrimitiveValue::parse(PrimitiveKind::Instant, &json!("2020-01-15T10:30:00Z")).is_ok()
        );
        assert!(
            PrimitiveValue::parse(PrimitiveKind::Instant, &json!("2020-01-15T10:30:00")).is_err()
        );
        assert!(PrimitiveValue::parse(PrimitiveKind::Instant, &json!("2020-01-15")).is_err());
    }

    #[test]
    fn datetime_allows_partial_dates() {
        assert!(PrimitiveValue::parse(PrimitiveKind::DateTime, &json!("2020")).is_ok());
        assert!(
            PrimitiveValue::parse(
                PrimitiveKind::DateTime,
                &json!("2020-01-15T10:30:00+02:00")
            )
            .is_ok()
        );
        // timestamp without timezone is not a valid FHIR dateTime
        assert!(
            PrimitiveValue::parse(PrimitiveKind::DateTime, &json!("2020-01-15T10:30:00")).is_err()
        );
    }

    #[test]
    fn code_rejects_surrounding_whitespace() {
        assert!(PrimitiveValue::parse(PrimitiveKind::Code, &json!("active")).is_ok());
        assert!(PrimitiveValue::parse(PrimitiveKind::Code, &json!("entered in error")).is_ok());
        assert!(PrimitiveValue::parse(PrimitiveKind::Code, &json!(" active")).is_err());
        assert!(PrimitiveValue::parse(PrimitiveKind::Code, &json!("")).is_err());
    }

    #[test]
    fn uri_accepts_relative_references() {
        assert!(PrimitiveValue::parse(PrimitiveKind::Uri, &json!("http://loinc.org")).is_ok());
        assert!(PrimitiveValue::parse(PrimitiveKind::Uri, &json!("Patient/123")).is_ok());
        assert!(PrimitiveValue::parse(PrimitiveKind::Uri, &json!("not a uri")).is_err());
    }

    #[test]
    fn decimal_round_trips_exactly() {
        let value = PrimitiveValue::parse(PrimitiveKind::Decimal, &json!(3.10)).unwrap();
        assert_eq!(value.to_wire(), json!(3.10));
        assert_eq!(value.as_f64(), Some(3.10));
    }

    #[test]
    fn derived_timestamp() {
        let value =
            PrimitiveValue::parse(PrimitiveKind::Instant, &json!("2020-01-15T10:30:00Z")).unwrap();
        let ts = value.timestamp().unwrap();
        assert_eq!(ts.timestamp(), 1_579_084_200);
    }
}
