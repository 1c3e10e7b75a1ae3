pub mod ops_compose;
pub mod ops_lock;
pub mod ops_tree;
pub mod ops_verify;

use unitforge_core::unit::{is_valid_name, ManifestError, UnitReference};
use unitforge_core::version::VersionConstraint;

/// Parse a unit argument from the command line. A bare name matches any
/// published version; `name@constraint` narrows it.
pub fn parse_unit_arg(arg: &str) -> Result<UnitReference, ManifestError> {
    if arg.contains('@') {
        return UnitReference::parse(arg);
    }
    if !is_valid_name(arg) {
        return Err(ManifestError::Invalid {
            message: format!("invalid unit name `{arg}` (lowercase, hyphen-separated)"),
        });
    }
    Ok(UnitReference::new(arg, VersionConstraint::any()))
}
