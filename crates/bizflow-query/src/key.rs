//! Cache keys

use std::borrow::Cow;
use std::fmt;

/// Name of a cached resource, e.g. `"products-list"`
///
/// The family is the prefix before the first `-`; mutations usually
/// invalidate a whole family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Cow<'static, str>);

impl QueryKey {
    /// Key from a static name
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Key from an owned name
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Key name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resource family
    pub fn family(&self) -> &str {
        self.0.split_once('-').map_or(&*self.0, |(family, _)| family)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for QueryKey {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for QueryKey {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("products-list", "products")]
    #[case("orders-all", "orders")]
    #[case("users", "users")]
    #[case("products-list-low", "products")]
    fn test_family(#[case] key: &'static str, #[case] family: &str) {
        assert_eq!(QueryKey::from(key).family(), family);
    }

    #[test]
    fn test_owned_and_static_keys_are_equal() {
        assert_eq!(QueryKey::new("users"), QueryKey::from_static("users"));
        assert_eq!(QueryKey::from_static("users").to_string(), "users");
    }
}
