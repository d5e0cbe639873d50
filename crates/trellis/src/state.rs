use convert_case::{Case, Casing};

use crate::error::{Error, Result};

/// Is `c` allowed in an item name?
pub fn valid_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

/// Is `name` a well-formed item name? Empty names are not.
pub fn valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(valid_name_char)
}

/// An item name, which consists of lowercase ASCII alphanumeric characters,
/// plus underscores. Names are expected to be unique among siblings, but
/// that is a convention, not something trellis enforces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemName {
    /// The validated name.
    name: String,
}

impl ItemName {
    /// Create a new name, returning an error if the string contains invalid
    /// characters.
    fn new(name: &str) -> Result<Self> {
        if !valid_name(name) {
            return Err(Error::InvalidName(name.into()));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    /// Takes a string and munges it into a valid name. It does this by first
    /// converting the string to snake case, then removing all invalid
    /// characters. A name with nothing left becomes `item`.
    pub fn convert(name: &str) -> Self {
        let munged: String = name
            .to_case(Case::Snake)
            .chars()
            .filter(|x| valid_name_char(*x))
            .collect();
        if munged.is_empty() {
            return Self {
                name: "item".into(),
            };
        }
        Self { name: munged }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ItemName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq<&str> for ItemName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

impl PartialEq<String> for ItemName {
    fn eq(&self, other: &String) -> bool {
        self.name == *other
    }
}

/// Validates a string against the naming rules.
impl TryFrom<&str> for ItemName {
    type Error = Error;
    fn try_from(name: &str) -> Result<Self> {
        Self::new(name)
    }
}
