use unitforge_core::lockfile::{LockFile, ResolvedUnitRecord, LOCK_FORMAT_VERSION};
use unitforge_core::version::SemanticVersion;
use unitforge_util::hash::CHECKSUM_PREFIX;

fn record(name: &str, version: &str, content: &str) -> ResolvedUnitRecord {
    ResolvedUnitRecord {
        name: name.to_string(),
        version: SemanticVersion::parse(version).unwrap(),
        source: format!("local:{name}"),
        content: content.to_string(),
    }
}

#[test]
fn generate_sorts_entries_by_name() {
    let lock = LockFile::generate(vec![
        record("zeta", "1.0.0", "z"),
        record("alpha", "2.0.0", "a"),
        record("mid", "0.1.0", "m"),
    ]);
    let names: Vec<&str> = lock.units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    assert_eq!(lock.version, LOCK_FORMAT_VERSION);
}

#[test]
fn checksums_carry_the_algorithm_prefix() {
    let lock = LockFile::generate(vec![record("alpha", "1.0.0", "content")]);
    let entry = &lock.units[0];
    assert!(entry.checksum.starts_with(CHECKSUM_PREFIX));
    // sha256 hex digest after the prefix
    assert_eq!(entry.checksum.len(), CHECKSUM_PREFIX.len() + 64);
    assert!(entry.matches_content("content"));
    assert!(!entry.matches_content("tampered"));
}

#[test]
fn generation_is_deterministic() {
    let records = || {
        vec![
            record("beta", "1.1.0", "bb"),
            record("alpha", "1.0.0", "aa"),
        ]
    };
    let first = LockFile::generate(records()).to_string_pretty().unwrap();
    let second = LockFile::generate(records()).to_string_pretty().unwrap();
    assert_eq!(first, second);
}

#[test]
fn round_trip_is_byte_identical() {
    let lock = LockFile::generate(vec![
        record("alpha", "1.0.0", "aa"),
        record("beta", "2.0.0-rc.1", "bb"),
    ]);
    let text = lock.to_string_pretty().unwrap();
    let reparsed = LockFile::parse_toml(&text).unwrap();
    assert_eq!(reparsed, lock);
    assert_eq!(reparsed.to_string_pretty().unwrap(), text);
}

#[test]
fn entry_lookup() {
    let lock = LockFile::generate(vec![record("alpha", "1.0.0", "aa")]);
    assert!(lock.entry("alpha").is_some());
    assert!(lock.entry("missing").is_none());
}

#[test]
fn parse_rejects_malformed_toml() {
    assert!(LockFile::parse_toml("version = ").is_err());
    assert!(LockFile::parse_toml("[[unit]]\nname = 1").is_err());
}

#[test]
fn write_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unitforge.lock");

    let lock = LockFile::generate(vec![record("alpha", "1.0.0", "aa")]);
    lock.write_to(&path).unwrap();

    let reloaded = LockFile::from_path(&path).unwrap();
    assert_eq!(reloaded, lock);
}

#[test]
fn rewrite_replaces_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unitforge.lock");

    LockFile::generate(vec![record("alpha", "1.0.0", "aa"), record("beta", "1.0.0", "bb")])
        .write_to(&path)
        .unwrap();
    LockFile::generate(vec![record("alpha", "1.1.0", "aa2")])
        .write_to(&path)
        .unwrap();

    let reloaded = LockFile::from_path(&path).unwrap();
    assert_eq!(reloaded.units.len(), 1);
    assert_eq!(reloaded.units[0].version, "1.1.0");
}
