use std::collections::HashMap;

/// A flag declaration attached to a single command node.
#[derive(Debug, Clone, Default)]
pub struct Flag {
    pub name: String,
    pub shorthand: Option<char>,
    pub usage: String,
    pub takes_value: bool,
    pub default: String,
}

impl Flag {
    /// A boolean flag: present means `true`, no argument consumed.
    #[must_use]
    pub fn bool(name: &str, usage: &str) -> Self {
        Flag {
            name: name.to_string(),
            usage: usage.to_string(),
            ..Default::default()
        }
    }

    /// A flag that takes a value, either as `--name=value` or `--name value`.
    #[must_use]
    pub fn value(name: &str, default: &str, usage: &str) -> Self {
        Flag {
            name: name.to_string(),
            usage: usage.to_string(),
            takes_value: true,
            default: default.to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn shorthand(mut self, c: char) -> Self {
        self.shorthand = Some(c);
        self
    }
}

/// Flag values parsed from one invocation's arguments.
///
/// Unset flags fall back to their declared default when queried through
/// [`FlagValues::value_or`].
#[derive(Debug, Clone, Default)]
pub struct FlagValues {
    values: HashMap<String, String>,
}

impl FlagValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The parsed value for `flag`, or its declared default.
    #[must_use]
    pub fn value_or<'a>(&'a self, flag: &'a Flag) -> &'a str {
        self.get(&flag.name).unwrap_or(&flag.default)
    }
}
