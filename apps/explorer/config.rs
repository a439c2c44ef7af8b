use anyhow::Result;
use once_cell::sync::OnceCell;
use summary_linker::{LinkerConfig, load_config};
use utils::errors::{CONFIG_ALREADY_INITIALIZED, CONFIG_NOT_INITIALIZED};

pub static CONFIG: OnceCell<LinkerConfig> = OnceCell::new();

pub fn load() -> Result<()> {
    CONFIG
        .set(load_config())
        .map_err(|_| anyhow::anyhow!(CONFIG_ALREADY_INITIALIZED))?;
    Ok(())
}

pub fn get_config() -> &'static LinkerConfig {
    CONFIG.get().expect(CONFIG_NOT_INITIALIZED)
}
