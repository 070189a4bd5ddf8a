use crate::config::settings::{
    Settings, DEFAULT_KEY_PATH, DEFAULT_PORT, DEFAULT_REMOTE_DIR, DEFAULT_USERNAME,
};
use crate::Result;

pub fn show() -> Result<()> {
    let settings = Settings::load()?;

    println!("Configuration:");
    println!();

    if let Some(path) = Settings::config_path() {
        println!("Config file: {}", path.display());
        println!();
    }

    println!("Defaults (saved value, or built-in when unset):");
    println!(
        "  username:  {}",
        settings
            .username
            .as_deref()
            .unwrap_or(DEFAULT_USERNAME)
    );
    println!(
        "  port:      {}",
        settings
            .port
            .map(|p| p.to_string())
            .unwrap_or_else(|| DEFAULT_PORT.to_string())
    );
    println!(
        "  key-path:  {}",
        settings.key_path.as_deref().unwrap_or(DEFAULT_KEY_PATH)
    );
    println!(
        "  directory: {}",
        settings.directory.as_deref().unwrap_or(DEFAULT_REMOTE_DIR)
    );
    println!(
        "  region:    {}",
        settings.region.as_deref().unwrap_or("(AWS default)")
    );

    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let mut settings = Settings::load()?;
    settings.set(key, value)?;
    settings.save()?;

    println!("Set {} = {}", key, value);
    Ok(())
}

pub fn unset(key: &str) -> Result<()> {
    let mut settings = Settings::load()?;
    settings.unset(key)?;
    settings.save()?;

    println!("Unset {}", key);
    Ok(())
}
