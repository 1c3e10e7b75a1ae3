//! Semantic version parsing, comparison, and constraint matching.
//!
//! Versions follow Semantic Versioning 2.0.0 precedence:
//! - `MAJOR.MINOR.PATCH` compared numerically, field by field
//! - a pre-release version sorts below its corresponding release
//! - pre-release identifiers compare numerically when both are numeric,
//!   numeric identifiers sort below alphanumeric ones
//! - build metadata is ignored for ordering

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use miette::Diagnostic;
use thiserror::Error;

/// Raised when a version or constraint string does not parse.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("invalid version format: `{input}`")]
    #[diagnostic(help(
        "expected MAJOR.MINOR.PATCH with optional -prerelease and +build suffixes"
    ))]
    InvalidVersionFormat { input: String },
}

/// A parsed semantic version. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Parse a version string like `1.2.3`, `1.0.0-beta.1`, or
    /// `2.0.0+build.5`. A leading `v` is tolerated and stripped.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let err = || VersionError::InvalidVersionFormat {
            input: input.to_string(),
        };

        let text = input.trim();
        let text = text.strip_prefix('v').unwrap_or(text);

        let (text, build) = match text.split_once('+') {
            Some((head, tail)) => (head, Some(tail)),
            None => (text, None),
        };
        let (core, prerelease) = match text.split_once('-') {
            Some((head, tail)) => (head, Some(tail)),
            None => (text, None),
        };

        let mut fields = core.split('.');
        let major = fields.next().and_then(parse_numeric).ok_or_else(err)?;
        let minor = fields.next().and_then(parse_numeric).ok_or_else(err)?;
        let patch = fields.next().and_then(parse_numeric).ok_or_else(err)?;
        if fields.next().is_some() {
            return Err(err());
        }

        if let Some(pre) = prerelease {
            if !valid_prerelease(pre) {
                return Err(err());
            }
        }
        if let Some(build) = build {
            if !valid_build(build) {
                return Err(err());
            }
        }

        Ok(Self {
            major,
            minor,
            patch,
            prerelease: prerelease.map(str::to_string),
            build: build.map(str::to_string),
        })
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

/// Numeric version fields are non-negative integers without leading zeros.
fn parse_numeric(token: &str) -> Option<u64> {
    if token.is_empty() || (token.len() > 1 && token.starts_with('0')) {
        return None;
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn valid_prerelease(pre: &str) -> bool {
    pre.split('.').all(|id| {
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            return false;
        }
        // Numeric identifiers must not have leading zeros
        let numeric = id.bytes().all(|b| b.is_ascii_digit());
        !(numeric && id.len() > 1 && id.starts_with('0'))
    })
}

fn valid_build(build: &str) -> bool {
    build.split('.').all(|id| {
        !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.prerelease {
            write!(f, "-{pre}")?;
        }
        if let Some(ref build) = self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| {
                compare_prerelease(self.prerelease.as_deref(), other.prerelease.as_deref())
            })
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Build metadata is excluded, matching Eq
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.prerelease.hash(state);
    }
}

fn compare_prerelease(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        // A release outranks any of its pre-releases
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let a_ids: Vec<&str> = a.split('.').collect();
            let b_ids: Vec<&str> = b.split('.').collect();
            for (a_id, b_id) in a_ids.iter().zip(&b_ids) {
                let ord = compare_identifiers(a_id, b_id);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a_ids.len().cmp(&b_ids.len())
        }
    }
}

fn compare_identifiers(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// The operator half of a version constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    Exact,
    GreaterEq,
    LessEq,
    Greater,
    Less,
    /// Compatible within the leftmost non-zero component: `^1.2.3` means
    /// `>=1.2.3 <2.0.0`, `^0.2.3` means `>=0.2.3 <0.3.0`, `^0.0.3` means
    /// `>=0.0.3 <0.0.4`.
    Caret,
    /// Compatible within the same minor version: `~1.2.3` means
    /// `>=1.2.3 <1.3.0`.
    Tilde,
}

/// A constraint over candidate versions: an operator paired with a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    pub op: ConstraintOp,
    pub version: SemanticVersion,
}

impl VersionConstraint {
    pub fn exact(version: SemanticVersion) -> Self {
        Self {
            op: ConstraintOp::Exact,
            version,
        }
    }

    /// Match any published version.
    pub fn any() -> Self {
        Self {
            op: ConstraintOp::GreaterEq,
            version: SemanticVersion::new(0, 0, 0),
        }
    }

    /// Parse a constraint string like `^1.2.3`, `>=1.0.0`, or `1.2.3`.
    /// A bare version with no operator prefix is an exact match.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let text = input.trim();
        let (op, rest) = if let Some(rest) = text.strip_prefix(">=") {
            (ConstraintOp::GreaterEq, rest)
        } else if let Some(rest) = text.strip_prefix("<=") {
            (ConstraintOp::LessEq, rest)
        } else if let Some(rest) = text.strip_prefix('>') {
            (ConstraintOp::Greater, rest)
        } else if let Some(rest) = text.strip_prefix('<') {
            (ConstraintOp::Less, rest)
        } else if let Some(rest) = text.strip_prefix('^') {
            (ConstraintOp::Caret, rest)
        } else if let Some(rest) = text.strip_prefix('~') {
            (ConstraintOp::Tilde, rest)
        } else if let Some(rest) = text.strip_prefix('=') {
            (ConstraintOp::Exact, rest)
        } else {
            (ConstraintOp::Exact, text)
        };

        let version =
            SemanticVersion::parse(rest).map_err(|_| VersionError::InvalidVersionFormat {
                input: input.to_string(),
            })?;
        Ok(Self { op, version })
    }

    /// Pure predicate: does `candidate` satisfy this constraint?
    ///
    /// Caret and tilde ranges derive an implicit upper bound from the
    /// constraint version and check `lower <= candidate < upper`.
    pub fn satisfies(&self, candidate: &SemanticVersion) -> bool {
        match self.op {
            ConstraintOp::Exact => candidate == &self.version,
            ConstraintOp::GreaterEq => candidate >= &self.version,
            ConstraintOp::LessEq => candidate <= &self.version,
            ConstraintOp::Greater => candidate > &self.version,
            ConstraintOp::Less => candidate < &self.version,
            ConstraintOp::Caret => {
                candidate >= &self.version && candidate < &self.caret_upper()
            }
            ConstraintOp::Tilde => {
                candidate >= &self.version && candidate < &self.tilde_upper()
            }
        }
    }

    fn caret_upper(&self) -> SemanticVersion {
        let v = &self.version;
        if v.major > 0 {
            SemanticVersion::new(v.major + 1, 0, 0)
        } else if v.minor > 0 {
            SemanticVersion::new(0, v.minor + 1, 0)
        } else {
            SemanticVersion::new(0, 0, v.patch + 1)
        }
    }

    fn tilde_upper(&self) -> SemanticVersion {
        SemanticVersion::new(self.version.major, self.version.minor + 1, 0)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.op {
            ConstraintOp::Exact => "",
            ConstraintOp::GreaterEq => ">=",
            ConstraintOp::LessEq => "<=",
            ConstraintOp::Greater => ">",
            ConstraintOp::Less => "<",
            ConstraintOp::Caret => "^",
            ConstraintOp::Tilde => "~",
        };
        write!(f, "{prefix}{}", self.version)
    }
}

impl FromStr for VersionConstraint {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
