//! Named environment presets.
//!
//! The registry maps a preset name to the [`Config`] a [`GridWorld`] is
//! built from. The built-in table mirrors the classic lawnmower maps;
//! additional presets can be loaded from a JSON object of the form
//! `{ "name": { "width": .., "height": .., "obstacle_number": .., "max_steps": .. } }`.

use anyhow::{anyhow, Context, Result};
use lawnmower::{Config, GridWorld};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    presets: BTreeMap<String, Config>,
}

impl Registry {
    #[must_use]
    pub fn builtin() -> Self {
        let table = [
            ("small", 5, 5, 0, 50),
            ("small-obstacles", 5, 5, 2, 50),
            ("medium", 9, 9, 0, 150),
            ("medium-obstacles", 9, 9, 4, 150),
            ("big", 17, 17, 0, 750),
            ("big-obstacles", 17, 17, 8, 750),
        ];
        let presets = table
            .into_iter()
            .map(|(name, w, h, obstacles, max_steps)| {
                (name.to_string(), Config::new(w, h, obstacles, max_steps))
            })
            .collect();
        Self { presets }
    }

    /// Parses and validates a JSON preset table.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or on the first preset with an invalid configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let presets: BTreeMap<String, Config> = serde_json::from_str(json)?;
        for (name, config) in &presets {
            config.validate().with_context(|| format!("preset '{name}'"))?;
        }
        Ok(Self { presets })
    }

    /// # Errors
    ///
    /// Fails if the file cannot be read or does not hold a valid preset table.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading presets from {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("parsing presets from {}", path.display()))
    }

    /// Adds every preset of `other`, replacing presets with the same name.
    pub fn extend(&mut self, other: Registry) {
        self.presets.extend(other.presets);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// # Errors
    ///
    /// Fails if `name` is not registered; the message lists the known names.
    pub fn get(&self, name: &str) -> Result<&Config> {
        self.presets.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.names().collect();
            anyhow!("unknown preset '{name}' (known: {})", known.join(", "))
        })
    }

    /// Builds the world for `name`, seeded when `seed` is given.
    ///
    /// # Errors
    ///
    /// Fails if `name` is not registered.
    pub fn make(&self, name: &str, seed: Option<u64>) -> Result<GridWorld> {
        let config = self.get(name)?.clone();
        let world = match seed {
            Some(seed) => GridWorld::with_seed(config, seed)?,
            None => GridWorld::from_config(config)?,
        };
        Ok(world)
    }
}
