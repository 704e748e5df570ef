#![cfg(test)]

use crate::naming::{IdSource, NameTable, escape_identifier};
use std::collections::HashSet;

#[test]
fn test_ids_start_at_one_and_increase() {
    let mut ids = IdSource::new();
    let first = ids.next();
    let second = ids.next();
    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 2);
    assert!(first < second);
}

#[test]
fn test_escape_reserved_words() {
    assert_eq!(escape_identifier("texture"), "_texture");
    assert_eq!(escape_identifier("main"), "_main");
    assert_eq!(escape_identifier("input"), "_input");
    assert_eq!(escape_identifier("color"), "color");
}

#[test]
fn test_escape_gl_prefix() {
    assert_eq!(escape_identifier("gl_Position"), "_gl_Position");
}

#[test]
fn test_escape_double_underscore() {
    assert_eq!(escape_identifier("a__b"), "a_USb");
    assert_eq!(escape_identifier("a___b"), "a_US_b");
    assert_eq!(escape_identifier("__x"), "_USx");
}

#[test]
fn test_escape_is_idempotent() {
    for name in ["texture", "gl_FragColor", "a__b", "____", "plain", "_US", "gl__x"] {
        let once = escape_identifier(name);
        assert_eq!(escape_identifier(&once), once, "escaping {} twice changed it", name);
        assert!(!once.contains("__"), "{} still contains a double underscore", once);
    }
}

#[test]
fn test_same_source_name_is_stable() {
    let mut names = NameTable::new();
    let mut ids = IdSource::new();
    let a = ids.next();
    let b = ids.next();
    assert_eq!(names.assign(a, "uv"), "uv");
    assert_eq!(names.assign(b, "uv"), "uv");
}

#[test]
fn test_distinct_sources_never_share_output() {
    let mut names = NameTable::new();
    let mut ids = IdSource::new();

    // `_texture` and `texture` both want the output `_texture`
    let sources = ["_texture", "texture", "a__b", "a_USb", "gl_x", "_gl_x", "x", "_5"];
    let mut outputs = HashSet::new();
    for source in sources {
        let id = ids.next();
        let output = names.assign(id, source);
        assert!(outputs.insert(output.clone()), "{} reused output {}", source, output);
    }
}

#[test]
fn test_synthesized_names_are_avoided() {
    let mut names = NameTable::new();
    let mut ids = IdSource::new();
    let id = ids.next();
    let output = names.assign(id, "_12");
    assert_ne!(output, "_12");
    assert_eq!(output, "_12_1");
}

#[test]
fn test_reserved_output_is_not_handed_out() {
    let mut names = NameTable::new();
    names.reserve("_Globals");
    let mut ids = IdSource::new();
    let id = ids.next();
    assert_eq!(names.assign(id, "_Globals"), "_Globals_1");
}

#[test]
fn test_suffix_never_creates_double_underscore() {
    let mut names = NameTable::new();
    let mut ids = IdSource::new();
    names.assign(ids.next(), "x_");
    // `x__` escapes to `x_US`, a distinct source mapping to a distinct name
    let other = names.assign(ids.next(), "x__");
    assert_eq!(other, "x_US");

    names.reserve("y_");
    let suffixed = names.unique("y_");
    assert!(!suffixed.contains("__"));
    assert_eq!(suffixed, "y_US_1");
}

#[test]
fn test_unnamed_ids_resolve_to_synthesized_name() {
    let names = NameTable::new();
    let mut ids = IdSource::new();
    ids.next();
    let id = ids.next();
    assert_eq!(names.resolve(id), "_2");
}

#[test]
fn test_keyed_names_do_not_clash_with_source_names() {
    let mut names = NameTable::new();
    let source = names.unique("_Globals_time");
    let keyed = names.unique_keyed("$Globals.time", "_Globals_time");
    assert_eq!(source, "_Globals_time");
    assert_eq!(keyed, "_Globals_time_1");
    // Memoized under its key
    assert_eq!(names.unique_keyed("$Globals.time", "_Globals_time"), keyed);
}
