//! Property tests for the validation pipeline.

use kanon::prelude::*;
use kanon_test::{fixtures, MapProps};
use proptest::prelude::*;
use serde_json::json;

fn engine_for(params: &[serde_json::Value]) -> Engine {
    let spec = fixtures::single_operation("GET", "/probe", "probe", params);
    Engine::from_spec(spec.as_bytes()).unwrap()
}

proptest! {
    #[test]
    fn absent_optional_parameter_never_fails(
        min in proptest::option::of(0u64..10),
        max in proptest::option::of(10u64..20),
    ) {
        let engine = engine_for(&[
            fixtures::string_param("s", false, min, max),
            fixtures::integer_param("n", false, Some(1), Some(5)),
        ]);
        let mut props = MapProps::new();

        prop_assert!(engine.validate("GET /probe", &mut props).is_ok());
        prop_assert!(props.written().is_empty());
    }

    #[test]
    fn string_length_bounds(value in "[a-zé]{0,12}", min in 0u64..6, max in 6u64..10) {
        let engine = engine_for(&[fixtures::string_param("s", true, Some(min), Some(max))]);
        let mut props = MapProps::new().with("s", value.clone());
        let len = value.chars().count() as u64;

        let outcome = engine.validate("GET /probe", &mut props);
        if value.is_empty() {
            prop_assert_eq!(outcome.unwrap_err().kind, ErrorKind::MissingRequired);
        } else if len < min || len > max {
            prop_assert_eq!(outcome.unwrap_err().kind, ErrorKind::Range);
        } else {
            prop_assert!(outcome.is_ok());
            prop_assert_eq!(props.value("s"), Some(&Value::String(value)));
        }
    }

    #[test]
    fn integer_bounds(n in -1000i64..1000, lo in -100i64..0, hi in 0i64..100) {
        let engine = engine_for(&[fixtures::integer_param("n", true, Some(lo), Some(hi))]);
        let mut props = MapProps::new().with("n", n.to_string());

        let outcome = engine.validate("GET /probe", &mut props);
        if (lo..=hi).contains(&n) {
            prop_assert!(outcome.is_ok());
            prop_assert_eq!(props.value("n"), Some(&Value::Integer(n)));
        } else {
            let rejection = outcome.unwrap_err();
            prop_assert_eq!(rejection.kind, ErrorKind::Range);
            prop_assert_eq!(rejection.name, "n");
        }
    }

    #[test]
    fn non_numeric_integer_is_a_type_error(raw in "[a-z]{1,8}") {
        let engine = engine_for(&[fixtures::integer_param("n", true, None, None)]);
        let mut props = MapProps::new().with("n", raw);

        prop_assert_eq!(engine.validate("GET /probe", &mut props).unwrap_err().kind, ErrorKind::Type);
    }

    #[test]
    fn values_outside_the_enum_are_range_errors(raw in "[a-z]{1,8}") {
        let engine = engine_for(&[fixtures::enum_param("c", "string", &[json!("red"), json!("green")])]);
        let mut props = MapProps::new().with("c", raw.clone());

        let outcome = engine.validate("GET /probe", &mut props);
        if raw == "red" || raw == "green" {
            prop_assert!(outcome.is_ok());
        } else {
            prop_assert_eq!(outcome.unwrap_err().kind, ErrorKind::Range);
        }
    }

    #[test]
    fn name_override_beats_builtin(raw in "[0-9]{1,6}") {
        let mut engine = engine_for(&[fixtures::integer_param("n", true, None, None)]);
        engine.register_validator("n", |_: &Parameter, raw: &str| -> Verdict {
            Ok(Some(Value::String(format!("#{raw}"))))
        });
        let mut props = MapProps::new().with("n", raw.clone());

        prop_assert!(engine.validate("GET /probe", &mut props).is_ok());
        prop_assert_eq!(props.value("n"), Some(&Value::String(format!("#{raw}"))));
    }

    #[test]
    fn reingesting_is_idempotent(max in 1u64..50) {
        let spec = fixtures::single_operation(
            "GET",
            "/probe",
            "probe",
            &[fixtures::string_param("s", true, None, Some(max))],
        );
        let mut engine = Engine::from_spec(spec.as_bytes()).unwrap();
        let before: Vec<Action> = engine.actions().cloned().collect();

        engine.ingest(spec.as_bytes()).unwrap();
        let after: Vec<Action> = engine.actions().cloned().collect();
        prop_assert_eq!(before, after);
    }
}
