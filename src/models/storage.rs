use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::constants::{
    ENERGY_TO_HYDROGEN_WH_PER_KG, HYDROGEN_TO_ENERGY_WH_PER_KG, STORAGE_CAPACITY_KG,
};

/// A requested discharge exceeded the available hydrogen. The simulator
/// recovers from this by growing the baseload guess; it never reaches the
/// caller directly.
#[derive(Debug, Clone, Error)]
#[error("storage is empty: {required_kg:.3} kg hydrogen required, {available_kg:.3} kg available")]
pub struct StorageEmpty {
    pub required_kg: f64,
    pub available_kg: f64,
}

/// Hydrogen long-duration storage: electrolysis in, combustion out.
///
/// The conversion rates are asymmetric on purpose; the round-trip loss is
/// physical, not a bookkeeping artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrogenStorage {
    /// Current stored hydrogen mass in kg. Never negative, never above
    /// `capacity_kg`.
    hydrogen_kg: f64,
    /// Mass ceiling in kg.
    capacity_kg: f64,
    /// Wh consumed per kg of hydrogen produced.
    energy_to_hydrogen: f64,
    /// Wh recovered per kg of hydrogen combusted.
    hydrogen_to_energy: f64,
}

impl HydrogenStorage {
    /// Creates a storage with the default conversion rates, charged with
    /// `initial_energy_wh`.
    pub fn new(initial_energy_wh: f64) -> Self {
        Self::with_capacity(initial_energy_wh, STORAGE_CAPACITY_KG)
    }

    pub fn with_capacity(initial_energy_wh: f64, capacity_kg: f64) -> Self {
        let mut storage = Self {
            hydrogen_kg: 0.0,
            capacity_kg,
            energy_to_hydrogen: ENERGY_TO_HYDROGEN_WH_PER_KG,
            hydrogen_to_energy: HYDROGEN_TO_ENERGY_WH_PER_KG,
        };
        storage.charge(initial_energy_wh);
        storage
    }

    /// Converts `energy_wh` into hydrogen and stores it. Anything beyond the
    /// capacity ceiling is lost; the caller has to account for it as wasted
    /// or exported energy.
    pub fn charge(&mut self, energy_wh: f64) {
        let hydrogen = energy_wh / self.energy_to_hydrogen;
        self.hydrogen_kg = (self.hydrogen_kg + hydrogen).min(self.capacity_kg);
    }

    /// Combusts enough hydrogen to recover `energy_wh`. All-or-nothing: on
    /// `StorageEmpty` no hydrogen is consumed.
    pub fn discharge(&mut self, energy_wh: f64) -> Result<f64, StorageEmpty> {
        let required = energy_wh / self.hydrogen_to_energy;
        if required > self.hydrogen_kg {
            return Err(StorageEmpty {
                required_kg: required,
                available_kg: self.hydrogen_kg,
            });
        }
        self.hydrogen_kg -= required;
        Ok(required * self.hydrogen_to_energy)
    }

    pub fn hydrogen_kg(&self) -> f64 {
        self.hydrogen_kg
    }

    pub fn capacity_kg(&self) -> f64 {
        self.capacity_kg
    }

    /// Stored energy at the combustion rate, in Wh.
    pub fn energy_equivalent_wh(&self) -> f64 {
        self.hydrogen_kg * self.hydrogen_to_energy
    }

    pub fn charge_rate_wh_per_kg(&self) -> f64 {
        self.energy_to_hydrogen
    }

    pub fn discharge_rate_wh_per_kg(&self) -> f64 {
        self.hydrogen_to_energy
    }
}
