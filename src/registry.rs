//! Portal registry: name-keyed ownership plus a chunk index so containment
//! lookups on the movement/flow hot paths never scan every portal.

use crate::portal::Portal;
use crate::types::{ChunkCoord, Location};
use log::info;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("portal '{0}' is already registered")]
    DuplicatePortal(String),
}

/// Owns every registered portal and answers "which portal contains this
/// location" in amortized O(1).
///
/// The chunk index maps `(world, chunk)` to the names of portals whose region
/// touches that chunk; a containment query hashes into one bucket and then
/// checks the (almost always tiny) candidate list exactly.
pub struct PortalRegistry {
    portals: HashMap<String, Arc<Portal>>,
    index: HashMap<(String, ChunkCoord), Vec<String>>,
}

impl PortalRegistry {
    pub fn new() -> Self {
        Self {
            portals: HashMap::new(),
            index: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Mutation (administrative, assumed rare)
    // -----------------------------------------------------------------------

    pub fn register(&mut self, portal: Portal) -> Result<(), RegistryError> {
        if self.portals.contains_key(&portal.name) {
            return Err(RegistryError::DuplicatePortal(portal.name));
        }
        for chunk in portal.region.chunks() {
            self.index
                .entry((portal.world.clone(), chunk))
                .or_default()
                .push(portal.name.clone());
        }
        info!("Registered portal '{}' in world '{}'", portal.name, portal.world);
        self.portals.insert(portal.name.clone(), Arc::new(portal));
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> Option<Arc<Portal>> {
        let portal = self.portals.remove(name)?;
        for chunk in portal.region.chunks() {
            let key = (portal.world.clone(), chunk);
            if let Some(bucket) = self.index.get_mut(&key) {
                bucket.retain(|n| n != name);
                if bucket.is_empty() {
                    self.index.remove(&key);
                }
            }
        }
        info!("Unregistered portal '{}'", name);
        Some(portal)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    pub fn get(&self, name: &str) -> Option<Arc<Portal>> {
        self.portals.get(name).cloned()
    }

    /// Portal whose region contains `location`, if any.
    pub fn portal_at(&self, location: &Location) -> Option<Arc<Portal>> {
        let key = (location.world.clone(), location.block().chunk());
        let bucket = self.index.get(&key)?;
        bucket
            .iter()
            .filter_map(|name| self.portals.get(name))
            .find(|p| p.contains(location))
            .cloned()
    }

    pub fn is_portal(&self, location: &Location) -> bool {
        self.portal_at(location).is_some()
    }

    pub fn names(&self) -> Vec<String> {
        self.portals.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }
}

impl Default for PortalRegistry {
    fn default() -> Self {
        Self::new()
    }
}
