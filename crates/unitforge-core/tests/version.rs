use unitforge_core::version::{ConstraintOp, SemanticVersion, VersionConstraint, VersionError};

fn v(text: &str) -> SemanticVersion {
    SemanticVersion::parse(text).unwrap()
}

fn c(text: &str) -> VersionConstraint {
    VersionConstraint::parse(text).unwrap()
}

#[test]
fn parse_basic() {
    let version = v("1.2.3");
    assert_eq!(version.major, 1);
    assert_eq!(version.minor, 2);
    assert_eq!(version.patch, 3);
    assert!(version.prerelease.is_none());
    assert!(version.build.is_none());
}

#[test]
fn parse_prerelease_and_build() {
    let version = v("1.0.0-beta.1+build.5");
    assert_eq!(version.prerelease.as_deref(), Some("beta.1"));
    assert_eq!(version.build.as_deref(), Some("build.5"));
    assert!(version.is_prerelease());
}

#[test]
fn parse_strips_v_prefix() {
    assert_eq!(v("v1.2.3"), v("1.2.3"));
}

#[test]
fn parse_round_trips_normalized_form() {
    for text in ["1.2.3", "0.1.0", "1.0.0-alpha", "1.0.0-beta.1", "2.0.0+build.5"] {
        assert_eq!(v(text).to_string(), text);
    }
}

#[test]
fn parse_rejects_invalid_forms() {
    for text in [
        "", "1", "1.2", "1.2.3.4", "a.b.c", "1.2.x", "01.2.3", "1.02.3", "1.2.3-",
        "1.2.3-a..b", "1.2.3-01", "1.2.3+", "-1.2.3", "1.2.3 beta",
    ] {
        let err = SemanticVersion::parse(text).unwrap_err();
        assert!(
            matches!(err, VersionError::InvalidVersionFormat { .. }),
            "expected parse failure for {text:?}"
        );
    }
}

#[test]
fn precedence_ordering() {
    assert!(v("1.0.0") < v("1.0.1"));
    assert!(v("1.0.1") < v("1.1.0"));
    assert!(v("1.1.0") < v("2.0.0"));
}

#[test]
fn prerelease_sorts_below_release() {
    assert!(v("1.0.0-alpha") < v("1.0.0"));
    assert!(v("1.0.0-rc.1") < v("1.0.0"));
}

#[test]
fn prerelease_identifier_ordering() {
    // Numeric identifiers sort below alphanumeric; numerics compare as numbers
    assert!(v("1.0.0-alpha") < v("1.0.0-alpha.1"));
    assert!(v("1.0.0-alpha.1") < v("1.0.0-alpha.beta"));
    assert!(v("1.0.0-alpha.2") < v("1.0.0-alpha.10"));
    assert!(v("1.0.0-alpha.beta") < v("1.0.0-beta"));
    assert!(v("1.0.0-beta.11") < v("1.0.0-rc.1"));
}

#[test]
fn build_metadata_ignored_for_ordering() {
    assert_eq!(v("1.2.3+build.1"), v("1.2.3+build.2"));
    assert_eq!(v("1.2.3"), v("1.2.3+anything"));
}

#[test]
fn constraint_bare_version_is_exact() {
    let constraint = c("1.2.3");
    assert_eq!(constraint.op, ConstraintOp::Exact);
    assert!(constraint.satisfies(&v("1.2.3")));
    assert!(!constraint.satisfies(&v("1.2.4")));
}

#[test]
fn constraint_display_round_trip() {
    for text in ["^1.2.3", "~1.2.3", ">=1.0.0", "<=2.0.0", ">1.0.0", "<2.0.0"] {
        assert_eq!(c(text).to_string(), text);
    }
    // Exact prints bare
    assert_eq!(c("=1.2.3").to_string(), "1.2.3");
    assert_eq!(c("1.2.3").to_string(), "1.2.3");
}

#[test]
fn constraint_rejects_garbage() {
    for text in ["", "^", "banana", ">=x.y.z", "^1.2", "~~1.0.0"] {
        assert!(
            VersionConstraint::parse(text).is_err(),
            "expected constraint parse failure for {text:?}"
        );
    }
}

#[test]
fn caret_range() {
    let constraint = c("^1.2.3");
    assert!(constraint.satisfies(&v("1.2.3")));
    assert!(constraint.satisfies(&v("1.9.9")));
    assert!(!constraint.satisfies(&v("1.2.2")));
    assert!(!constraint.satisfies(&v("2.0.0")));
}

#[test]
fn caret_zero_major() {
    let constraint = c("^0.2.3");
    assert!(constraint.satisfies(&v("0.2.3")));
    assert!(constraint.satisfies(&v("0.2.9")));
    assert!(!constraint.satisfies(&v("0.3.0")));

    let constraint = c("^0.0.3");
    assert!(constraint.satisfies(&v("0.0.3")));
    assert!(!constraint.satisfies(&v("0.0.4")));
}

#[test]
fn tilde_range() {
    let constraint = c("~1.2.3");
    for patch in 3..=9 {
        assert!(constraint.satisfies(&v(&format!("1.2.{patch}"))));
    }
    assert!(!constraint.satisfies(&v("1.2.2")));
    assert!(!constraint.satisfies(&v("1.3.0")));
}

#[test]
fn comparison_operators() {
    assert!(c(">=1.2.0").satisfies(&v("1.2.0")));
    assert!(c(">=1.2.0").satisfies(&v("2.0.0")));
    assert!(!c(">=1.2.0").satisfies(&v("1.1.9")));
    assert!(c(">1.2.0").satisfies(&v("1.2.1")));
    assert!(!c(">1.2.0").satisfies(&v("1.2.0")));
    assert!(c("<=1.2.0").satisfies(&v("1.2.0")));
    assert!(!c("<=1.2.0").satisfies(&v("1.2.1")));
    assert!(c("<2.0.0").satisfies(&v("1.9.9")));
    assert!(!c("<2.0.0").satisfies(&v("2.0.0")));
}

#[test]
fn any_constraint_matches_everything() {
    let constraint = VersionConstraint::any();
    assert!(constraint.satisfies(&v("0.0.1")));
    assert!(constraint.satisfies(&v("99.0.0")));
}
