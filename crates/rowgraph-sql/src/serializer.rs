use rowgraph_core::driver::{Capability, Flavor};
use std::fmt;

/// Renders SQL text for one database flavor.
///
/// Both supported flavors bind parameters with `?`; they differ in how
/// identifiers are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Serializer {
    flavor: Flavor,
}

/// A quoted identifier. Embedded quote characters are doubled.
#[derive(Debug, Clone, Copy)]
pub struct Ident<'a> {
    flavor: Flavor,
    name: &'a str,
}

impl Serializer {
    pub fn new(flavor: Flavor) -> Serializer {
        Serializer { flavor }
    }

    pub fn sqlite() -> Serializer {
        Serializer::new(Flavor::Sqlite)
    }

    pub fn mysql() -> Serializer {
        Serializer::new(Flavor::Mysql)
    }

    pub fn for_capability(capability: &Capability) -> Serializer {
        Serializer::new(capability.flavor)
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn ident<'a>(&self, name: &'a str) -> Ident<'a> {
        Ident {
            flavor: self.flavor,
            name,
        }
    }

    /// `?, ?, ?` with `n` placeholders.
    pub(crate) fn placeholders(&self, n: usize) -> String {
        vec!["?"; n].join(", ")
    }
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = match self.flavor {
            Flavor::Mysql => '`',
            Flavor::Sqlite => '"',
        };

        write!(f, "{quote}")?;
        for ch in self.name.chars() {
            if ch == quote {
                write!(f, "{quote}")?;
            }
            write!(f, "{ch}")?;
        }
        write!(f, "{quote}")
    }
}
