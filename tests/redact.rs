//! Public-API integration tests, mirroring the teacher's external-testing
//! style (`tests/cli.rs`, `tests/ffi_tests.rs`): only `jsonredact`'s public
//! surface is exercised here, never its internal modules.

use jsonredact::Redactor;

fn redacted(patterns: &[&str], input: &str) -> String {
    Redactor::new(patterns.to_vec(), |_raw: &str| "REDACTED".to_string())
        .redact(input)
        .into_owned()
}

#[test]
fn scenario_1_empty_patterns_is_byte_identical() {
    let input = r#"[{"id":0,"name":"x"}]"#;
    let redactor = Redactor::new(Vec::<String>::new(), |_: &str| "REDACTED".to_string());
    let out = redactor.redact(input);
    assert_eq!(out, input);
    assert!(matches!(out, std::borrow::Cow::Borrowed(_)));
}

#[test]
fn scenario_2_sibling_fields_and_nested_field() {
    let input = r#"{"a":459,"b":707,"c":116,"x":{"terminal":577}}"#;
    let out = redacted(&["a", "b", "x.terminal"], input);
    assert_eq!(
        out,
        r#"{"a":"REDACTED","b":"REDACTED","c":116,"x":{"terminal":"REDACTED"}}"#
    );
}

#[test]
fn scenario_3_shallower_match_wins() {
    let input = r#"{"a":{"b":1}}"#;
    let out = redacted(&["a", "a.b"], input);
    assert_eq!(out, r#"{"a":"REDACTED"}"#);
}

#[test]
fn scenario_4_array_index_as_segment() {
    let input = r#"{"a":[18,2,{"c":1}],"b":2}"#;
    let out = redacted(&["a.1"], input);
    assert_eq!(out, r#"{"a":[18,"REDACTED",{"c":1}],"b":2}"#);
}

#[test]
fn scenario_5_recursive_descent() {
    let input = r#"{"a":{"b":{"name":"d","f":5},"name":"b"}}"#;
    let out = redacted(&["*.name"], input);
    assert_eq!(
        out,
        r#"{"a":{"b":{"name":"REDACTED","f":5},"name":"REDACTED"}}"#
    );
}

#[test]
fn scenario_6_escaped_dot_in_key() {
    let input = r#"{"a.b":1,"a":{"b":2}}"#;
    let out = redacted(&[r"a\.b"], input);
    assert_eq!(out, r#"{"a.b":"REDACTED","a":{"b":2}}"#);
}

#[test]
fn scenario_7_array_wildcard() {
    let input = r#"{"children":["Sara","Alex","Jack"]}"#;
    let out = redacted(&["children.#"], input);
    assert_eq!(
        out,
        r#"{"children":["REDACTED","REDACTED","REDACTED"]}"#
    );
}

#[test]
fn no_match_borrows_the_input() {
    let redactor = Redactor::new(["nope.nothing"], |_: &str| "REDACTED".to_string());
    let input = r#"{"a":1,"b":[1,2,3]}"#;
    let out = redactor.redact(input);
    assert!(matches!(out, std::borrow::Cow::Borrowed(_)));
    assert_eq!(out, input);
}

#[test]
fn transform_raw_quotes_are_not_escaped() {
    // Open Question: the source does not escape raw `"` from the
    // transform output; callers are responsible. This documents and
    // tests that the crate does not second-guess it.
    let redactor = Redactor::new(["a"], |_: &str| "say \"hi\"".to_string());
    let out = redactor.redact(r#"{"a":1}"#);
    assert_eq!(out, r#"{"a":"say "hi""}"#);
}

#[test]
fn whole_matched_container_keeps_its_own_internal_whitespace() {
    // Open Question: whitespace *inside* a matched container is part of
    // its raw text and flows into `transform` untouched; whitespace
    // *outside* any match is not reconstructed once the buffer
    // materializes (matching the source, which only ever writes
    // synthesized `{`/`:`/`,`/`}` bytes for untouched structure).
    let input = "{\"a\": { \"b\" :  1 , \"c\":2 } }";
    let out = redacted(&["a"], input);
    assert_eq!(out, r#"{"a":"REDACTED"}"#);
}

#[test]
fn bytes_after_the_root_value_survive_a_match() {
    // Trailing whitespace after the document's closing bracket is outside
    // any redacted region and must come through unchanged even once the
    // buffer has materialized elsewhere in the document.
    let input = "{\"a\":1} ";
    let out = redacted(&["a"], input);
    assert_eq!(out, "{\"a\":\"REDACTED\"} ");
}

#[test]
fn transform_sees_the_matched_containers_internal_whitespace_verbatim() {
    use std::sync::{Arc, Mutex};

    let seen = Arc::new(Mutex::new(String::new()));
    let seen2 = Arc::clone(&seen);
    let redactor = Redactor::new(["a"], move |raw: &str| {
        *seen2.lock().unwrap() = raw.to_string();
        "REDACTED".to_string()
    });
    redactor.redact("{\"a\": { \"b\" :  1 } }");
    assert_eq!(*seen.lock().unwrap(), "{ \"b\" :  1 }");
}

#[test]
fn lone_star_pattern_matches_nothing() {
    let input = r#"{"a":1}"#;
    let out = redacted(&["*"], input);
    assert_eq!(out, input);
}

#[test]
fn malformed_input_passes_through_by_default() {
    let redactor = Redactor::new(["a"], |_: &str| "REDACTED".to_string());
    let broken = r#"{"a": }"#;
    let out = redactor.redact(broken);
    assert_eq!(out, broken);
}

#[test]
fn strict_mode_surfaces_the_scan_error() {
    let redactor = Redactor::with_options(
        ["a"],
        |_: &str| "REDACTED".to_string(),
        jsonredact::RedactorOptions {
            strict_on_malformed_input: true,
            ..Default::default()
        },
    );
    let broken = r#"{"a": }"#;
    assert!(redactor.try_redact(broken).is_err());
}

#[test]
fn match_trace_records_every_redacted_path() {
    let redactor = Redactor::with_options(
        ["a", "x.terminal"],
        |_: &str| "REDACTED".to_string(),
        jsonredact::RedactorOptions {
            enable_match_trace: true,
            ..Default::default()
        },
    );
    let input = r#"{"a":1,"x":{"terminal":2}}"#;
    let (out, trace) = redactor.redact_with_trace(input).expect("scan ok");
    assert_eq!(out, r#"{"a":"REDACTED","x":{"terminal":"REDACTED"}}"#);
    let paths: Vec<&str> = trace.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["a", "x.terminal"]);
}

#[test]
fn duplicate_object_keys_are_preserved() {
    // Open Question: duplicate keys are preserved verbatim, matching the
    // source rather than deduplicating or rejecting.
    let input = r#"{"a":1,"a":2}"#;
    let out = redacted(&["a"], input);
    assert_eq!(out, r#"{"a":"REDACTED","a":"REDACTED"}"#);
}

#[test]
fn deeply_nested_input_does_not_overflow_the_call_stack() {
    let depth = 256;
    let mut input = String::new();
    for _ in 0..depth {
        input.push_str(r#"{"n":"#);
    }
    input.push('0');
    for _ in 0..depth {
        input.push('}');
    }
    let redactor = Redactor::new(["nope"], |_: &str| "REDACTED".to_string());
    let out = redactor.redact(&input);
    assert_eq!(out, input);
}

#[test]
fn concurrent_redact_calls_are_race_free() {
    use std::sync::Arc;

    let redactor = Arc::new(Redactor::new(
        ["user.email", "items.#.sku"],
        |_: &str| "REDACTED".to_string(),
    ));
    let inputs: Vec<String> = (0..64)
        .map(|i| {
            format!(
                r#"{{"user":{{"email":"u{i}@example.com"}},"items":[{{"sku":"s{i}"}},{{"sku":"t{i}"}}]}}"#
            )
        })
        .collect();

    let sequential: Vec<String> = inputs
        .iter()
        .map(|i| redactor.redact(i).into_owned())
        .collect();

    let concurrent: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|i| {
                let redactor = Arc::clone(&redactor);
                scope.spawn(move || redactor.redact(i).into_owned())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}
