//! Cache Registry
//!
//! Owns one cache per API resource category. Construct it once at startup and
//! pass it to whatever issues the requests.

use crate::cache::Cache;
use crate::config::Config;
use crate::error::Result;

/// API resource categories that get their own cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Paginated location area listings
    LocationAreas,
    /// Encounters within a single location area
    AreaEncounters,
    /// Individual creature records
    Pokemon,
}

impl ResourceKind {
    /// All categories, in registry order.
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::LocationAreas,
        ResourceKind::AreaEncounters,
        ResourceKind::Pokemon,
    ];

    /// Name used for the category's cache in log events.
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::LocationAreas => "location_areas",
            ResourceKind::AreaEncounters => "area_encounters",
            ResourceKind::Pokemon => "pokemon",
        }
    }
}

/// The per-category caches of the application.
#[derive(Debug)]
pub struct CacheRegistry {
    location_areas: Cache,
    area_encounters: Cache,
    pokemon: Cache,
}

impl CacheRegistry {
    /// Builds all caches from `config`.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `config` fails validation.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            location_areas: Cache::from_config(ResourceKind::LocationAreas.name(), config)?,
            area_encounters: Cache::from_config(ResourceKind::AreaEncounters.name(), config)?,
            pokemon: Cache::from_config(ResourceKind::Pokemon.name(), config)?,
        })
    }

    /// Returns the cache for `kind`.
    pub fn cache(&self, kind: ResourceKind) -> &Cache {
        match kind {
            ResourceKind::LocationAreas => &self.location_areas,
            ResourceKind::AreaEncounters => &self.area_encounters,
            ResourceKind::Pokemon => &self.pokemon,
        }
    }

    /// Stops every sweeper. Idempotent.
    pub fn close(&self) {
        for kind in ResourceKind::ALL {
            self.cache(kind).close();
        }
    }

    /// Stops every sweeper and waits for all of them to exit.
    pub async fn shutdown(&self) {
        self.close();
        for kind in ResourceKind::ALL {
            self.cache(kind).shutdown().await;
        }
    }
}
