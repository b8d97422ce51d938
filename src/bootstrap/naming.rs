// src/bootstrap/naming.rs

//! Python module-name check for the generated package.

use regex::Regex;

use crate::errors::{PostgenError, Result};

/// Leading letter or underscore, then at least one more word character.
pub const MODULE_REGEX: &str = r"^[_a-zA-Z][_a-zA-Z0-9]+$";

/// Reject names that Python could not import, such as `my-package` or
/// `2fast`.
pub fn validate_module_name(name: &str) -> Result<()> {
    let re = Regex::new(MODULE_REGEX).map_err(anyhow::Error::from)?;
    if re.is_match(name) {
        Ok(())
    } else {
        Err(PostgenError::InvalidModuleName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_identifiers() {
        for name in ["my_package", "_private", "pkg2", "Ab"] {
            assert!(validate_module_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_non_identifiers() {
        for name in ["my-package", "2fast", "with space", "a", "", "naïve"] {
            assert!(validate_module_name(name).is_err(), "{name} should be invalid");
        }
    }

    #[test]
    fn error_message_starts_with_error_marker() {
        let err = validate_module_name("my-package").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("ERROR: 'my-package' is not a valid Python module name!"));
    }
}
