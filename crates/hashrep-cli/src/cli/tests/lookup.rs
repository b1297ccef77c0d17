//! Tests for the lookup subcommand.

use super::parse;
use crate::cli::CliCommand;

#[test]
fn cli_parse_lookup_hashes() {
    match parse(&[
        "hashrep",
        "lookup",
        "d41d8cd98f00b204e9800998ecf8427e",
        "da39a3ee5e6b4b0d3255bfef95601890afd80709",
    ]) {
        CliCommand::Lookup {
            hashes,
            files,
            json,
            url,
            api_key,
        } => {
            assert_eq!(hashes.len(), 2);
            assert!(files.is_empty());
            assert!(!json);
            assert!(url.is_none());
            assert!(api_key.is_none());
        }
        _ => panic!("expected Lookup"),
    }
}

#[test]
fn cli_parse_lookup_files_and_overrides() {
    match parse(&[
        "hashrep",
        "lookup",
        "--file",
        "/tmp/a.exe",
        "--file",
        "/tmp/b.dll",
        "--json",
        "--url",
        "https://reputation.example.test",
        "--api-key",
        "k",
    ]) {
        CliCommand::Lookup {
            hashes,
            files,
            json,
            url,
            api_key,
        } => {
            assert!(hashes.is_empty());
            assert_eq!(files.len(), 2);
            assert_eq!(files[1], std::path::PathBuf::from("/tmp/b.dll"));
            assert!(json);
            assert_eq!(url.as_deref(), Some("https://reputation.example.test"));
            assert_eq!(api_key.as_deref(), Some("k"));
        }
        _ => panic!("expected Lookup with files"),
    }
}
