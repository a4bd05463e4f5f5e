use crate::error::ConfigError;
use crate::settings::ChainLimits;
use config::Source;
use core_types::ValueChain;
use std::path::Path;

/// Loads a value chain from a TOML or JSON file. The format follows the extension.
pub fn load_chain(path: &Path) -> Result<ValueChain, ConfigError> {
    tracing::debug!(path = %path.display(), "Loading value chain file.");
    chain_from_source(config::File::from(path))
}

/// Deserializes a value chain from any `config` source.
pub fn chain_from_source<S>(source: S) -> Result<ValueChain, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    let chain = config::Config::builder()
        .add_source(source)
        .build()?
        .try_deserialize::<ValueChain>()?;
    Ok(chain)
}

impl ChainLimits {
    /// Rejects chains whose actor count falls outside the configured bounds, or
    /// with a price outside the accepted range.
    pub fn check(&self, chain: &ValueChain) -> Result<(), ConfigError> {
        let count = chain.len();
        if count < self.min_actors || count > self.max_actors {
            return Err(ConfigError::InvalidChain(format!(
                "expected between {} and {} actors, got {}",
                self.min_actors, self.max_actors, count
            )));
        }
        for (position, actor) in chain.actors().iter().enumerate() {
            actor.check_amounts().map_err(|e| {
                ConfigError::InvalidChain(format!("actor {} ('{}'): {}", position + 1, actor.name, e))
            })?;
        }
        Ok(())
    }
}
