//! Credential-file parsing and key masking.
//!
//! Process-environment precedence is covered in the CLI end-to-end tests,
//! where the child process environment can be controlled without mutating
//! this test process.

use apiprobe::auth::{load_env_file, mask_api_key};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn nonexistent_env_file_yields_empty_mapping() {
    let vars = load_env_file(Path::new("/definitely/not/here/.env"));
    assert!(vars.is_empty());
}

#[test]
fn env_file_skips_comments_and_strips_quotes() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join(".env");
    std::fs::write(
        &path,
        "# main credentials\n\
         GOOGLE_API_KEY=\"quoted-value\"\n\
         \n\
         ANTHROPIC_API_KEY='single-quoted'\n\
         OPENAI_API_KEY=plain\n\
         # trailing comment\n\
         NOT_A_PAIR\n\
         EMPTY=\n",
    )
    .expect("write env file");

    let vars = load_env_file(&path);
    assert_eq!(vars.get("GOOGLE_API_KEY").map(String::as_str), Some("quoted-value"));
    assert_eq!(vars.get("ANTHROPIC_API_KEY").map(String::as_str), Some("single-quoted"));
    assert_eq!(vars.get("OPENAI_API_KEY").map(String::as_str), Some("plain"));
    assert_eq!(vars.get("EMPTY").map(String::as_str), Some(""));
    assert!(!vars.contains_key("NOT_A_PAIR"));
    assert!(!vars.keys().any(|k| k.starts_with('#')));
}

#[test]
fn env_file_values_may_contain_equals_signs() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join(".env");
    std::fs::write(&path, "XAI_API_KEY=abc=def==\n").expect("write env file");

    let vars = load_env_file(&path);
    assert_eq!(vars.get("XAI_API_KEY").map(String::as_str), Some("abc=def=="));
}

#[test]
fn short_keys_mask_completely() {
    for key in ["", "a", "12345678"] {
        assert_eq!(mask_api_key(key), "***");
    }
}

#[test]
fn long_keys_show_head_and_tail_only() {
    assert_eq!(mask_api_key("sk-ant-api03-xyzw"), "sk-a...xyzw");
}

proptest! {
    #[test]
    fn masked_output_never_equals_long_keys(key in "[A-Za-z0-9_-]{9,64}") {
        let masked = mask_api_key(&key);
        prop_assert_ne!(&masked, &key);
        prop_assert!(masked.contains("..."));
        prop_assert!(masked.starts_with(&key[..4]));
        prop_assert!(masked.ends_with(&key[key.len() - 4..]));
    }

    #[test]
    fn short_keys_always_fully_masked(key in "[A-Za-z0-9]{0,8}") {
        prop_assert_eq!(mask_api_key(&key), "***");
    }
}
