use kanon_core::{ErrorKind, Parameter, Validator, Value, Verdict};

/// Length-checks a string in code points and passes it through.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValidator;

/// Parses a base-10 `i64` and range-checks it.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerValidator;

/// Parses a finite `f64` and range-checks it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberValidator;

/// Parses a boolean literal.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and the matching false
/// spellings `0`, `f`, `F`, `FALSE`, `false`, `False`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValidator;

impl Validator for StringValidator {
    fn validate(&self, param: &Parameter, raw: &str) -> Verdict {
        let len = raw.chars().count() as u64;
        if param.min_length.is_some_and(|min| len < min)
            || param.max_length.is_some_and(|max| len > max)
        {
            return Err(ErrorKind::Range);
        }
        Ok(Some(Value::String(raw.to_string())))
    }
}

impl Validator for IntegerValidator {
    fn validate(&self, param: &Parameter, raw: &str) -> Verdict {
        let n: i64 = raw.parse().map_err(|_| ErrorKind::Type)?;
        check_bounds(param, n as f64)?;
        Ok(Some(Value::Integer(n)))
    }
}

impl Validator for NumberValidator {
    fn validate(&self, param: &Parameter, raw: &str) -> Verdict {
        let n: f64 = raw.parse().map_err(|_| ErrorKind::Type)?;
        // "NaN" and "inf" parse, but NaN compares false against any bound
        if !n.is_finite() {
            return Err(ErrorKind::Type);
        }
        check_bounds(param, n)?;
        Ok(Some(Value::Number(n)))
    }
}

impl Validator for BooleanValidator {
    fn validate(&self, _param: &Parameter, raw: &str) -> Verdict {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(Some(Value::Boolean(true))),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(Some(Value::Boolean(false))),
            _ => Err(ErrorKind::Type),
        }
    }
}

// Inclusive on both ends.
fn check_bounds(param: &Parameter, n: f64) -> Result<(), ErrorKind> {
    if param.minimum.is_some_and(|min| n < min) || param.maximum.is_some_and(|max| n > max) {
        return Err(ErrorKind::Range);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_counts_code_points() {
        let param = Parameter::new("name", "string").min_length(2).max_length(3);
        assert_eq!(
            StringValidator.validate(&param, "日本語"),
            Ok(Some(Value::String("日本語".to_string())))
        );
        assert_eq!(StringValidator.validate(&param, "日本語!"), Err(ErrorKind::Range));
        assert_eq!(StringValidator.validate(&param, "é"), Err(ErrorKind::Range));
    }

    #[test]
    fn test_string_without_bounds() {
        let param = Parameter::new("note", "string");
        assert!(StringValidator.validate(&param, &"x".repeat(10_000)).is_ok());
    }

    #[test]
    fn test_integer() {
        let param = Parameter::new("age", "integer").minimum(0.0).maximum(120.0);
        assert_eq!(IntegerValidator.validate(&param, "30"), Ok(Some(Value::Integer(30))));
        assert_eq!(IntegerValidator.validate(&param, "0"), Ok(Some(Value::Integer(0))));
        assert_eq!(IntegerValidator.validate(&param, "120"), Ok(Some(Value::Integer(120))));
        assert_eq!(IntegerValidator.validate(&param, "150"), Err(ErrorKind::Range));
        assert_eq!(IntegerValidator.validate(&param, "-1"), Err(ErrorKind::Range));
        assert_eq!(IntegerValidator.validate(&param, "abc"), Err(ErrorKind::Type));
        assert_eq!(IntegerValidator.validate(&param, "1.5"), Err(ErrorKind::Type));
        assert_eq!(
            IntegerValidator.validate(&param, "99999999999999999999"),
            Err(ErrorKind::Type)
        );
    }

    #[test]
    fn test_number() {
        let param = Parameter::new("ratio", "number").minimum(0.0).maximum(1.0);
        assert_eq!(NumberValidator.validate(&param, "0.25"), Ok(Some(Value::Number(0.25))));
        assert_eq!(NumberValidator.validate(&param, "1"), Ok(Some(Value::Number(1.0))));
        assert_eq!(NumberValidator.validate(&param, "1.01"), Err(ErrorKind::Range));
        assert_eq!(NumberValidator.validate(&param, "NaN"), Err(ErrorKind::Type));
        assert_eq!(NumberValidator.validate(&param, "inf"), Err(ErrorKind::Type));
        assert_eq!(NumberValidator.validate(&param, "half"), Err(ErrorKind::Type));
    }

    #[test]
    fn test_non_finite_number_is_type_not_range() {
        let unbounded = Parameter::new("ratio", "number");
        let bounded = Parameter::new("ratio", "number").minimum(0.0).maximum(1.0);
        for raw in ["NaN", "nan", "inf", "-inf", "infinity"] {
            assert!(raw.parse::<f64>().is_ok());
            assert_eq!(NumberValidator.validate(&unbounded, raw), Err(ErrorKind::Type));
            assert_eq!(NumberValidator.validate(&bounded, raw), Err(ErrorKind::Type));
        }
    }

    #[test]
    fn test_boolean() {
        let param = Parameter::new("flag", "boolean");
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(BooleanValidator.validate(&param, raw), Ok(Some(Value::Boolean(true))));
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(BooleanValidator.validate(&param, raw), Ok(Some(Value::Boolean(false))));
        }
        for raw in ["yes", "tRuE", "2", " true"] {
            assert_eq!(BooleanValidator.validate(&param, raw), Err(ErrorKind::Type));
        }
    }
}
