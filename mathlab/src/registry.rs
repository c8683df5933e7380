use std::collections::BTreeMap;
use std::fmt;

use crate::block::{Block, BlockKind};
use crate::constants::ArityError;

/// Builds a block from the constant tokens that follow a type name.
pub type Constructor = Box<dyn Fn(&[&str]) -> Result<Block, ArityError>>;

/// Maps block type names to constructors.
/// Owns no blocks. Names are kept sorted, so listing is deterministic.
#[derive(Default)]
pub struct Registry {
    constructors: BTreeMap<String, Constructor>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            constructors: BTreeMap::new(),
        }
    }

    /// A registry holding every built-in kind under its canonical name.
    pub fn with_builtins() -> Self {
        let mut registry = Registry::new();
        register_all_blocks(&mut registry);
        registry
    }

    /// Associate `name` with `constructor`. Registering an existing name
    /// replaces the previous constructor.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&[&str]) -> Result<Block, ArityError> + 'static,
    {
        let name = name.into();
        tracing::trace!(block_type = %name, "registering block type");
        self.constructors.insert(name, Box::new(constructor));
    }

    /// Register the built-in constructor for `kind` under `name`.
    pub fn register_kind(&mut self, name: impl Into<String>, kind: BlockKind) {
        self.register(name, move |tokens: &[&str]| Block::from_tokens(kind, tokens));
    }

    /// Look up `name` and build a block from `tokens`.
    ///
    /// `None` means the type is not registered. `Some(Err(_))` means the type
    /// is known but the constants do not satisfy its arity.
    pub fn create(&self, name: &str, tokens: &[&str]) -> Option<Result<Block, ArityError>> {
        self.constructors
            .get(name)
            .map(|constructor| constructor(tokens))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered type names in sorted order.
    pub fn list_registered(&self) -> Vec<&str> {
        self.constructors.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.list_registered())
            .finish()
    }
}

/// Register every built-in kind under its canonical name.
pub fn register_all_blocks(registry: &mut Registry) {
    for kind in BlockKind::ALL {
        registry.register_kind(kind.name(), kind);
    }
}
