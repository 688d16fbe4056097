//! Input snapshot configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Where the CSV snapshot lives and what its files are called.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InputConfig {
    /// Snapshot directory. Default: current directory.
    pub data_dir: Option<PathBuf>,
    pub orders_file: Option<String>,
    pub order_items_file: Option<String>,
    pub customers_file: Option<String>,
    pub sellers_file: Option<String>,
    pub geolocation_file: Option<String>,
}

impl InputConfig {
    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn orders_path(&self) -> PathBuf {
        self.resolve(&self.orders_file, constants::DEFAULT_ORDERS_FILE)
    }

    pub fn order_items_path(&self) -> PathBuf {
        self.resolve(&self.order_items_file, constants::DEFAULT_ORDER_ITEMS_FILE)
    }

    pub fn customers_path(&self) -> PathBuf {
        self.resolve(&self.customers_file, constants::DEFAULT_CUSTOMERS_FILE)
    }

    pub fn sellers_path(&self) -> PathBuf {
        self.resolve(&self.sellers_file, constants::DEFAULT_SELLERS_FILE)
    }

    pub fn geolocation_path(&self) -> PathBuf {
        self.resolve(&self.geolocation_file, constants::DEFAULT_GEOLOCATION_FILE)
    }

    fn resolve(&self, name: &Option<String>, default: &str) -> PathBuf {
        self.effective_data_dir()
            .join(name.as_deref().unwrap_or(default))
    }
}
