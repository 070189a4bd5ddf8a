use crate::config::settings::Settings;
use crate::Result;

use super::gather_instances;

pub async fn execute(search: String, region: Option<String>) -> Result<()> {
    let settings = Settings::load()?;
    let region = settings.resolve_region(region);

    let instances = gather_instances(&search, region.as_deref()).await?;

    if instances.is_empty() {
        println!("No instance name matches the pattern");
        std::process::exit(1);
    }

    for (num, instance) in instances.iter().enumerate() {
        println!("[{}] {}", num + 1, instance);
    }

    Ok(())
}
