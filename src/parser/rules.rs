use super::entities::Field;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

// `\d` is Unicode-aware in `regex`, so digits are spelled `[0-9]` throughout.
static STRICT_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(19|20)[0-9]{2}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$")
        .expect("valid date regex")
});
static HTTP_STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-5][0-9]{2}$").expect("valid http status regex"));
static THREE_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("valid three digit regex"));
static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"(.*)"$"#).expect("valid quoted description regex"));
static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])(\.(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])){3}$",
    )
    .expect("valid ipv4 regex")
});

/// Which set of field validators a file is checked against.
///
/// Exactly one profile applies to a whole parse; the two are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationProfile {
    /// `yyyy-mm-dd` dates, 1xx-5xx status codes, quoted descriptions
    #[default]
    Strict,
    /// Any non-empty date, any three digit status, description taken as is
    Lenient,
}

impl fmt::Display for ValidationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationProfile::Strict => write!(f, "strict"),
            ValidationProfile::Lenient => write!(f, "lenient"),
        }
    }
}

impl ValidationProfile {
    /// Validate a trimmed field value, returning the value to store on success.
    pub fn validate(&self, field: Field, value: &str) -> Option<String> {
        let accepted = match (field, *self) {
            (Field::Date, ValidationProfile::Strict) => STRICT_DATE_RE.is_match(value),
            (Field::Date, ValidationProfile::Lenient) => {
                !value.is_empty() && !value.contains(super::FIELD_DELIMITER)
            }
            (Field::StatusCode, ValidationProfile::Strict) => HTTP_STATUS_RE.is_match(value),
            (Field::StatusCode, ValidationProfile::Lenient) => THREE_DIGITS_RE.is_match(value),
            (Field::Description, ValidationProfile::Strict) => {
                return QUOTED_RE
                    .captures(value)
                    .and_then(|caps| caps.get(1))
                    .map(|inner| inner.as_str().to_string());
            }
            (Field::Description, ValidationProfile::Lenient) => true,
            (Field::OriginIp, _) => IPV4_RE.is_match(value),
        };

        accepted.then(|| value.to_string())
    }

    /// Human-readable description of what a field must look like
    pub fn expected_shape(&self, field: Field) -> &'static str {
        match (field, *self) {
            (Field::Date, ValidationProfile::Strict) => "expected format yyyy-mm-dd",
            (Field::Date, ValidationProfile::Lenient) => "expected a non-empty value",
            (Field::StatusCode, ValidationProfile::Strict) => {
                "expected an HTTP status code between 100 and 599"
            }
            (Field::StatusCode, ValidationProfile::Lenient) => "expected exactly three digits",
            (Field::Description, ValidationProfile::Strict) => {
                "must start and end with double quotes"
            }
            (Field::Description, ValidationProfile::Lenient) => "any text, quotes optional",
            (Field::OriginIp, _) => "expected an IPv4 address",
        }
    }
}
