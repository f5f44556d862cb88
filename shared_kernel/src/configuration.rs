use anyhow::Context;
use serde::de::DeserializeOwned;

/// Loads the settings sections a crate declares from `configuration/`
/// under the working directory, with `APP_`-prefixed environment variables
/// layered on top. Test builds read `test.yaml` instead of `base.yaml`.
pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    let configuration_directory = base_path.join("configuration");
    let file = if cfg!(test) { "test.yaml" } else { "base.yaml" };
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join(file)))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("Failed to build configuration from {file}"))?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}
