use std::path::Path;

use super::*;

fn entry(username: &str) -> WatchlistEntry {
    WatchlistEntry {
        username: username.to_string(),
        niche: vec![],
        notes: None,
    }
}

#[test]
fn handle_strips_at_sign() {
    assert_eq!(entry("@glowwithmia").handle(), "glowwithmia");
    assert_eq!(entry(" glowwithmia ").handle(), "glowwithmia");
}

#[test]
fn validate_rejects_empty_username() {
    let watchlist = WatchlistFile {
        competitors: vec![entry("@")],
    };
    let err = validate_watchlist(&watchlist).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_duplicate_username_ignoring_case_and_at() {
    let watchlist = WatchlistFile {
        competitors: vec![entry("GlowWithMia"), entry("@glowwithmia")],
    };
    let err = validate_watchlist(&watchlist).unwrap_err();
    assert!(err.to_string().contains("duplicate competitor username"));
}

#[test]
fn validate_accepts_distinct_usernames() {
    let watchlist = WatchlistFile {
        competitors: vec![entry("glowwithmia"), entry("skinbyzoe")],
    };
    assert!(validate_watchlist(&watchlist).is_ok());
}

#[test]
fn parse_accepts_optional_fields() {
    let yaml = "competitors:\n  - username: \"@mia\"\n    niche: [beauty]\n  - username: zoe\n    notes: rival\n";
    let watchlist: WatchlistFile = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(watchlist.competitors.len(), 2);
    assert_eq!(watchlist.competitors[0].niche, vec!["beauty".to_string()]);
    assert_eq!(watchlist.competitors[1].notes.as_deref(), Some("rival"));
}

#[test]
fn load_missing_file_is_io_error() {
    let err = load_watchlist(Path::new("/nonexistent/competitors.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::WatchlistIo { .. }));
}

#[test]
fn load_watchlist_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("competitors.yaml");
    assert!(path.exists(), "competitors.yaml missing at {path:?}");
    let result = load_watchlist(&path);
    assert!(result.is_ok(), "failed to load competitors.yaml: {result:?}");
    let watchlist = result.unwrap();
    assert!(!watchlist.competitors.is_empty());
    assert!(watchlist.competitors.iter().all(|c| !c.username.starts_with('@')));
}
