//! Style registry
//!
//! Maps style names from remote commands to font metric entries. Lookups
//! fail closed: an unknown name resolves to the declared default style and
//! the caller is told about the substitution so it can log it.

use crate::text::GlyphMetrics;

/// Identifier of a style in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StyleId(u8);

impl StyleId {
    /// Create a style id from a registry index
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Index into the registry table
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Outcome of a fail-closed name lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolved {
    /// The style to use
    pub id: StyleId,
    /// True if the requested name was unknown and the default was used
    pub substituted: bool,
}

/// Registry of named styles with a declared default
pub struct StyleRegistry<'a, M> {
    entries: &'a [(&'a str, M)],
    default_index: u8,
}

impl<'a, M: GlyphMetrics> StyleRegistry<'a, M> {
    /// Create a registry
    ///
    /// `default_index` must point into `entries`; it is clamped to the
    /// table so the registry can always produce a style.
    pub const fn new(entries: &'a [(&'a str, M)], default_index: u8) -> Self {
        debug_assert!(!entries.is_empty());
        let last = entries.len().saturating_sub(1);
        let clamped = if (default_index as usize) <= last {
            default_index
        } else {
            last as u8
        };
        Self {
            entries,
            default_index: clamped,
        }
    }

    /// The declared default style
    pub fn default_id(&self) -> StyleId {
        StyleId::new(self.default_index)
    }

    /// Resolve a style name, substituting the default for unknown names
    pub fn resolve(&self, name: &str) -> Resolved {
        match self.entries.iter().position(|(n, _)| *n == name) {
            Some(index) => Resolved {
                id: StyleId::new(index as u8),
                substituted: false,
            },
            None => Resolved {
                id: self.default_id(),
                substituted: true,
            },
        }
    }

    /// Metrics for a style id
    ///
    /// Ids that do not point into the table resolve to the default entry.
    pub fn metrics(&self, id: StyleId) -> &M {
        let index = if id.index() < self.entries.len() {
            id.index()
        } else {
            self.default_index as usize
        };
        &self.entries[index].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tests::FixedMetrics;

    fn registry() -> StyleRegistry<'static, FixedMetrics> {
        static ENTRIES: &[(&str, FixedMetrics)] = &[
            ("status", FixedMetrics(8)),
            ("message", FixedMetrics(6)),
            ("butterfly", FixedMetrics(10)),
        ];
        StyleRegistry::new(ENTRIES, 1)
    }

    #[test]
    fn known_name_resolves_without_substitution() {
        let reg = registry();
        let resolved = reg.resolve("butterfly");
        assert_eq!(resolved.id, StyleId::new(2));
        assert!(!resolved.substituted);
        assert_eq!(reg.metrics(resolved.id).advance('x'), 10);
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        let reg = registry();
        let resolved = reg.resolve("comic-sans");
        assert_eq!(resolved.id, reg.default_id());
        assert!(resolved.substituted);
        assert_eq!(reg.metrics(resolved.id).advance('x'), 6);
    }

    #[test]
    fn out_of_range_id_uses_default_metrics() {
        let reg = registry();
        assert_eq!(reg.metrics(StyleId::new(42)).advance('x'), 6);
    }
}
