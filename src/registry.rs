//! Registries for named charsets and palettes.
//!
//! Document files reference their charset and palette by name; loading
//! resolves those names here and fails hard when either cannot be found.

use std::collections::HashMap;
use std::rc::Rc;

use crate::charset::Charset;
use crate::palette::Palette;

/// Common trait for registries that map string names to values.
pub trait Registry<V> {
    /// Check if an item with the given name exists in the registry.
    fn contains(&self, name: &str) -> bool;

    /// Get an item by name.
    ///
    /// Returns `None` if no item with the given name exists.
    fn get(&self, name: &str) -> Option<&V>;

    /// Get the number of items in the registry.
    fn len(&self) -> usize;

    /// Check if the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get an iterator over all names in the registry.
    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_>;
}

macro_rules! named_registry {
    ($registry:ident, $value:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Default)]
        pub struct $registry {
            items: HashMap<String, Rc<$value>>,
        }

        impl $registry {
            pub fn new() -> Self {
                Self::default()
            }

            /// Register an item under its own name, replacing any previous
            /// entry with that name.
            pub fn register(&mut self, item: $value) {
                self.items.insert(item.name.clone(), Rc::new(item));
            }

            /// Get a shared handle by name. Documents hold these handles for
            /// the lifetime of the editing session.
            pub fn get_rc(&self, name: &str) -> Option<Rc<$value>> {
                self.items.get(name).cloned()
            }
        }

        impl Registry<Rc<$value>> for $registry {
            fn contains(&self, name: &str) -> bool {
                self.items.contains_key(name)
            }

            fn get(&self, name: &str) -> Option<&Rc<$value>> {
                self.items.get(name)
            }

            fn len(&self) -> usize {
                self.items.len()
            }

            fn names(&self) -> Box<dyn Iterator<Item = &String> + '_> {
                Box::new(self.items.keys())
            }
        }
    };
}

named_registry!(CharsetRegistry, Charset, "Registry of named charsets.");
named_registry!(PaletteRegistry, Palette, "Registry of named palettes.");

impl CharsetRegistry {
    /// Registry preloaded with the built-in charsets.
    pub fn with_builtins() -> Self {
        let mut r = Self::new();
        r.register(Charset::builtin_ascii());
        r
    }
}

impl PaletteRegistry {
    /// Registry preloaded with the built-in palettes.
    pub fn with_builtins() -> Self {
        let mut r = Self::new();
        r.register(Palette::builtin_c16());
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_resolve() {
        let charsets = CharsetRegistry::with_builtins();
        let palettes = PaletteRegistry::with_builtins();
        assert!(charsets.contains("ascii"));
        assert!(palettes.contains("c16"));
        assert!(!charsets.contains("cp437"));
        assert_eq!(palettes.len(), 1);
    }

    #[test]
    fn test_register_replaces() {
        let mut palettes = PaletteRegistry::new();
        palettes.register(Palette::new("p", 8));
        palettes.register(Palette::new("p", 32));
        assert_eq!(palettes.get_rc("p").unwrap().color_count, 32);
        assert_eq!(palettes.len(), 1);
    }
}
