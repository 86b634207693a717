use std::fmt;
use std::sync::OnceLock;

use kanon_core::{ErrorKind, Parameter, Validator, Value, Verdict};
use regex::Regex;

/// Mainland landline (`0xx-xxxxxxx`) or mobile (`1[3-9]` + 9 digits) number.
pub const MOBILE_PATTERN: &str = r"^(?:0[0-9]{2,3}-[0-9]{7,8}|1[3-9][0-9]{9})$";

/// Lowercase email address.
pub const EMAIL_PATTERN: &str =
    r"^[a-z0-9]+([._\-]*[a-z0-9])*@([a-z0-9]+[-a-z0-9]*[a-z0-9]+\.){1,63}[a-z0-9]+$";

/// 15- or 18-digit resident ID, the last digit of the long form may be `X`.
pub const ID_CARD_PATTERN: &str = r"^(?:[0-9]{15}|[0-9]{18}|[0-9]{17}[0-9Xx])$";

/// Matches the raw value against a regular expression.
///
/// A mismatch fails with the validator's own kind; a match passes the raw
/// string through unchanged.
///
/// # Example
///
/// ```
/// use kanon_core::{ErrorKind, Parameter, Validator};
/// use kanon_engine::validators::FormatValidator;
///
/// let zip = FormatValidator::from_pattern(ErrorKind::custom("zip"), r"^[0-9]{6}$").unwrap();
/// let param = Parameter::new("zip", "string");
/// assert!(zip.validate(&param, "100080").is_ok());
/// assert_eq!(zip.validate(&param, "1000"), Err(ErrorKind::custom("zip")));
/// ```
#[derive(Clone)]
pub struct FormatValidator {
    kind: ErrorKind,
    pattern: Regex,
}

impl FormatValidator {
    /// Creates a format validator from a compiled pattern.
    pub fn new(kind: ErrorKind, pattern: Regex) -> Self {
        Self { kind, pattern }
    }

    /// Compiles `pattern` and creates a format validator.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error.
    pub fn from_pattern(kind: ErrorKind, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(kind, Regex::new(pattern)?))
    }

    /// Phone numbers; fails with `ErrorKind::Mobile`.
    pub fn mobile() -> Self {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(MOBILE_PATTERN).expect("valid mobile regex"));
        Self::new(ErrorKind::Mobile, re.clone())
    }

    /// Email addresses; fails with `ErrorKind::Email`.
    pub fn email() -> Self {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"));
        Self::new(ErrorKind::Email, re.clone())
    }

    /// ID card numbers; fails with `ErrorKind::IdCard`.
    pub fn id_card() -> Self {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(ID_CARD_PATTERN).expect("valid id card regex"));
        Self::new(ErrorKind::IdCard, re.clone())
    }

    /// The kind reported on mismatch.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Debug for FormatValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatValidator")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl Validator for FormatValidator {
    fn validate(&self, _param: &Parameter, raw: &str) -> Verdict {
        if self.pattern.is_match(raw) {
            Ok(Some(Value::String(raw.to_string())))
        } else {
            Err(self.kind.clone())
        }
    }
}
