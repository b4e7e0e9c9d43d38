//! Rule requiring a centralized configuration package (`internal/config`).

use crate::required_package::RequiredPackage;

/// Rule code for centralized-config.
pub const CODE: &str = "R05";

/// Rule name for centralized-config.
pub const NAME: &str = "centralized-config";

impl RequiredPackage {
    /// Requires `layout.config_dir`.
    #[must_use]
    pub fn centralized_config() -> Self {
        Self::new(
            CODE,
            NAME,
            "Centralized configuration: internal/config package exists",
            "centralized configuration",
            |layout| layout.config_dir.as_str(),
        )
    }
}
