use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A declaration modifier.
///
/// Variant order is the order keywords are written in (JLS / `Modifier.toString`),
/// so iterating a [`Modifiers`] set yields them ready to print. Unlike JVM
/// access flags, `Transient` and `Varargs` (and `Volatile`/`Bridge`) are
/// distinct members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strict,
    Interface,
    Varargs,
    Bridge,
    Synthetic,
}

impl Modifier {
    /// Source keyword, if the modifier has one.
    pub fn keyword(self) -> Option<&'static str> {
        Some(match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strict => "strictfp",
            Modifier::Interface => "interface",
            Modifier::Varargs | Modifier::Bridge | Modifier::Synthetic => return None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(BTreeSet<Modifier>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn insert(&mut self, modifier: Modifier) -> bool {
        self.0.insert(modifier)
    }

    pub fn remove(&mut self, modifier: Modifier) -> bool {
        self.0.remove(&modifier)
    }

    #[must_use]
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }

    #[must_use]
    pub fn without(mut self, modifier: Modifier) -> Self {
        self.remove(modifier);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_public(&self) -> bool {
        self.contains(Modifier::Public)
    }

    pub fn is_private(&self) -> bool {
        self.contains(Modifier::Private)
    }

    pub fn is_static(&self) -> bool {
        self.contains(Modifier::Static)
    }

    pub fn is_final(&self) -> bool {
        self.contains(Modifier::Final)
    }

    pub fn is_abstract(&self) -> bool {
        self.contains(Modifier::Abstract)
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Modifier; N]> for Modifiers {
    fn from(value: [Modifier; N]) -> Self {
        value.into_iter().collect()
    }
}

/// Keywords separated by single spaces; modifiers without a keyword are skipped.
impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for keyword in self.iter().filter_map(Modifier::keyword) {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(keyword)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_print_in_declaration_order() {
        let modifiers =
            Modifiers::from([Modifier::Final, Modifier::Static, Modifier::Abstract, Modifier::Public]);
        assert_eq!(modifiers.to_string(), "public abstract static final");
    }

    #[test]
    fn flags_without_keywords_are_silent() {
        let modifiers = Modifiers::from([Modifier::Varargs, Modifier::Synthetic, Modifier::Protected]);
        assert_eq!(modifiers.to_string(), "protected");
        assert_eq!(Modifiers::from([Modifier::Bridge]).to_string(), "");
    }

    #[test]
    fn transient_and_varargs_are_distinct() {
        let modifiers = Modifiers::from([Modifier::Varargs]);
        assert!(!modifiers.contains(Modifier::Transient));
        assert!(modifiers.without(Modifier::Transient).contains(Modifier::Varargs));
    }

    #[test]
    fn serializes_as_lowercase_list() {
        let modifiers = Modifiers::from([Modifier::Public, Modifier::Abstract]);
        assert_eq!(
            serde_json::to_string(&modifiers).unwrap(),
            r#"["public","abstract"]"#
        );
    }
}
