//! Structural email address validation.

use regex::Regex;
use std::sync::LazyLock;

/// Permissive `local-part@domain.tld` shape. Deliverability is not checked.
static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"^[\w.+-]+@[\w-]+(\.[\w-]+)+$").unwrap()
});

/// Check that an address has the structural shape of an email address.
pub fn validate_address(address: &str) -> bool {
    ADDRESS_RE.is_match(address)
}
