use std::{collections::HashMap, sync::Arc};

use crate::{
    engine::{Capabilities, Capability, UnitLoader, derive_id},
    errors::LoadError,
};

/// Units compiled into the binary, looked up by the id derived from their
/// location.
pub struct RegistryLoader<Tx: Send + Sync> {
    suffix: String,
    units: HashMap<String, Capabilities<Tx>>,
}

impl<Tx: Send + Sync> RegistryLoader<Tx> {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            units: HashMap::new(),
        }
    }

    pub fn register(
        mut self,
        id: impl Into<String>,
        apply: impl Capability<Tx> + 'static,
        revert: impl Capability<Tx> + 'static,
    ) -> Self {
        self.units.insert(
            id.into(),
            Capabilities {
                apply: Arc::new(apply),
                revert: Arc::new(revert),
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl<Tx: Send + Sync> UnitLoader<Tx> for RegistryLoader<Tx> {
    fn resolve(&self, location: &str) -> Result<Capabilities<Tx>, LoadError> {
        let id = derive_id(location, &self.suffix);
        self.units
            .get(&id)
            .cloned()
            .ok_or_else(|| LoadError::Unregistered {
                id,
                location: location.to_string(),
            })
    }
}
