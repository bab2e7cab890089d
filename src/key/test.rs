use super::*;
use std::thread;

#[test]
fn equal_strings_give_equal_keys() {
    let a = Key::new("Float");
    let b = Key::from(String::from("Float"));
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "Float");
    assert_ne!(a, Key::new("Int"));
}

#[test]
fn empty_string_is_invalid() {
    let key = Key::new("");
    assert!(!key.is_valid());
    assert_eq!(key, Key::INVALID);
    assert_eq!(key, Key::default());
    assert_eq!(key.as_str(), "");
    assert_ne!(key, Key::new("Opacity"));
    assert!(Key::new("Opacity").is_valid());
}

#[test]
fn keys_order_by_string() {
    let mut keys = vec![Key::new("Gamma"), Key::new("Alpha"), Key::new("Beta")];
    keys.sort();
    let names: Vec<_> = keys.iter().map(Key::as_str).collect();
    assert_eq!(names, ["Alpha", "Beta", "Gamma"]);
}

#[test]
fn keys_agree_across_threads() {
    let here = Key::new("SharedAcrossThreads");
    let there = thread::spawn(|| Key::new("SharedAcrossThreads"))
        .join()
        .unwrap();
    assert_eq!(here, there);
}

#[test]
fn serializes_as_plain_string() {
    let key = Key::new("Opacity");
    assert_eq!(serde_json::to_string(&key).unwrap(), "\"Opacity\"");
    let back: Key = serde_json::from_str("\"Opacity\"").unwrap();
    assert_eq!(back, key);
}

#[test]
fn debug_marks_invalid() {
    assert_eq!(format!("{:?}", Key::INVALID), "Key(<invalid>)");
    assert_eq!(format!("{:?}", Key::new("Save")), "Key(\"Save\")");
    assert_eq!(Key::new("Save").to_string(), "Save");
}
