//! Resolver behaviour tests
//!
//! Covers the end-to-end prompt scenarios, label ordering and suppression,
//! and the dedup/sort/fallback properties of every manifest.

use envzero::resolver::{detect_stack, detect_stack_value, ResolveError, FALLBACK_SYSTEM_PACKAGE};
use envzero::Manifest;
use serde_json::json;
use std::collections::BTreeSet;
use yare::parameterized;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn assert_sorted_unique(items: &[String]) {
    for pair in items.windows(2) {
        assert!(pair[0] < pair[1], "{:?} is not strictly ascending", items);
    }
}

fn assert_invariants(manifest: &Manifest) {
    assert!(!manifest.stack.is_empty());
    assert_sorted_unique(&manifest.system_packages);
    assert_sorted_unique(&manifest.app_dependencies);
}

#[parameterized(
    fastapi_react = { "FastAPI with React", "Python/FastAPI + JavaScript/React" },
    node_app = { "node app", "JavaScript/Node" },
    react_with_node = { "React app with Node backend", "JavaScript/React" },
    vue_with_express = { "vue frontend, express api", "JavaScript/Vue" },
    express_alone = { "an Express server", "JavaScript/Node" },
    plain_editor = { "just a plain text editor", "Unknown" },
    django_postgres = { "Django with Postgres", "Python/Django" },
    all_python = { "fastapi, flask or django?", "Python/Django + Python/Flask + Python/FastAPI" },
    react_and_vue = { "vue and react", "JavaScript/React + JavaScript/Vue" },
    flask_node = { "node tooling for a flask site", "Python/Flask + JavaScript/Node" },
    mongo_only = { "mongo", "Unknown" },
)]
fn test_stack_labels(prompt: &str, expected: &str) {
    let manifest = detect_stack(prompt).unwrap();
    assert_eq!(manifest.stack, expected);
    assert_invariants(&manifest);
}

#[test]
fn test_fastapi_with_react_manifest() {
    let manifest = detect_stack("FastAPI with React").unwrap();

    assert_eq!(
        manifest.app_dependencies,
        strings(&["fastapi", "react", "react-dom", "uvicorn[standard]"])
    );
    assert_eq!(
        manifest.system_packages,
        strings(&["build-essential", "nodejs", "npm", "python3-dev"])
    );
}

#[test]
fn test_node_app_manifest() {
    let manifest = detect_stack("node app").unwrap();

    assert_eq!(manifest.app_dependencies, strings(&["express"]));
    assert_eq!(manifest.system_packages, strings(&["nodejs", "npm"]));
}

#[test]
fn test_node_label_suppressed_but_dependencies_kept() {
    let manifest = detect_stack("React app with Node backend").unwrap();

    assert_eq!(manifest.stack, "JavaScript/React");
    assert_eq!(
        manifest.app_dependencies,
        strings(&["express", "react", "react-dom"])
    );
}

#[test]
fn test_unknown_fallback() {
    let manifest = detect_stack("just a plain text editor").unwrap();

    assert!(manifest.is_unknown());
    assert_eq!(manifest.system_packages, strings(&[FALLBACK_SYSTEM_PACKAGE]));
    assert!(manifest.app_dependencies.is_empty());
}

#[test]
fn test_database_rules_add_packages_without_labels() {
    let manifest = detect_stack("Flask with PostgreSQL and MongoDB").unwrap();

    assert_eq!(manifest.stack, "Python/Flask");
    assert_eq!(
        manifest.system_packages,
        strings(&[
            "build-essential",
            "libpq-dev",
            "mongodb-clients",
            "postgresql-client",
            "python3-dev"
        ])
    );
    assert_eq!(
        manifest.app_dependencies,
        strings(&["Flask>=2.0", "psycopg2-binary", "pymongo"])
    );
}

#[test]
fn test_label_order_follows_rule_table_not_prompt() {
    let forward = detect_stack("React frontend with a FastAPI backend").unwrap();
    let reversed = detect_stack("FastAPI backend with a React frontend").unwrap();

    assert_eq!(forward.stack, "Python/FastAPI + JavaScript/React");
    assert_eq!(forward, reversed);
}

#[test]
fn test_case_insensitive() {
    assert_eq!(detect_stack("REACT").unwrap(), detect_stack("react").unwrap());
    assert_eq!(
        detect_stack("DjAnGo + TailWind").unwrap(),
        detect_stack("django + tailwind").unwrap()
    );
}

#[test]
fn test_whole_word_matching() {
    // "preact", "nodejs" and "expressive" contain trigger words but are not them
    let manifest = detect_stack("preact with nodejs, expressive").unwrap();
    assert_eq!(manifest.stack, "Unknown");
}

#[test]
fn test_repeated_triggers_are_idempotent() {
    assert_eq!(
        detect_stack("react react react").unwrap(),
        detect_stack("react").unwrap()
    );
}

#[test]
fn test_determinism() {
    let prompts = [
        "FastAPI with React and Postgres",
        "vue + tailwind + mongo",
        "something else entirely",
    ];
    for prompt in prompts {
        let first = serde_json::to_vec(&detect_stack(prompt).unwrap()).unwrap();
        for _ in 0..10 {
            let again = serde_json::to_vec(&detect_stack(prompt).unwrap()).unwrap();
            assert_eq!(first, again);
        }
    }
}

#[test]
fn test_union_property() {
    let combined = detect_stack("flask and react").unwrap();
    let flask = detect_stack("flask").unwrap();
    let react = detect_stack("react").unwrap();

    let system: BTreeSet<_> = combined.system_packages.iter().collect();
    let deps: BTreeSet<_> = combined.app_dependencies.iter().collect();

    for part in [&flask, &react] {
        assert!(part.system_packages.iter().all(|p| system.contains(p)));
        assert!(part.app_dependencies.iter().all(|d| deps.contains(d)));
    }
    assert_eq!(combined.stack, "Python/Flask + JavaScript/React");
}

#[test]
fn test_every_builtin_trigger_keeps_invariants() {
    let prompt = "django flask fastapi react vue node express tailwind postgres postgresql pg mongodb mongo";
    let manifest = detect_stack(prompt).unwrap();

    assert_invariants(&manifest);
    assert_eq!(
        manifest.stack,
        "Python/Django + Python/Flask + Python/FastAPI + JavaScript/React + JavaScript/Vue"
    );
    assert_eq!(
        manifest.app_dependencies,
        strings(&[
            "Django>=3.2",
            "Flask>=2.0",
            "express",
            "fastapi",
            "psycopg2-binary",
            "pymongo",
            "react",
            "react-dom",
            "tailwindcss",
            "uvicorn[standard]",
            "vue"
        ])
    );
}

#[parameterized(
    empty = { "" },
    spaces = { "   " },
    mixed_whitespace = { "\t\n  \r\n" },
)]
fn test_empty_input_rejected(prompt: &str) {
    assert_eq!(detect_stack(prompt).unwrap_err(), ResolveError::EmptyInput);
}

#[test]
fn test_non_text_input_rejected() {
    for value in [json!(1), json!(true), json!({"prompt": "react"}), json!(null)] {
        assert!(matches!(
            detect_stack_value(&value),
            Err(ResolveError::InvalidInputType { .. })
        ));
    }
}

#[test]
fn test_no_length_limit_in_resolver() {
    let prompt = format!("{} react", "x ".repeat(10_000));
    assert_eq!(detect_stack(&prompt).unwrap().stack, "JavaScript/React");
}

#[test]
fn test_concurrent_resolution() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let prompt = if i % 2 == 0 { "vue with node" } else { "django" };
                detect_stack(prompt).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let manifest = handle.join().unwrap();
        let expected = if i % 2 == 0 { "JavaScript/Vue" } else { "Python/Django" };
        assert_eq!(manifest.stack, expected);
    }
}
