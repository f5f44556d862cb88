use crate::plan_catalog::SkuSettings;
use lazy_static::lazy_static;
use serde::Deserialize;
use shared_kernel::configuration::config;

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogSettings {
    pub skus: Vec<SkuSettings>,
}

#[derive(Deserialize)]
pub struct Settings {
    pub catalog: CatalogSettings,
}

lazy_static! {
    pub static ref SETTINGS_CONFIG: Settings = config::<Settings>().unwrap();
}
