use crate::{GeneratorConfig, Result, SnowflakeGenerator, SnowflakeId};

/// Generates a single ID from a throwaway generator with default settings.
///
/// **Low-frequency use only.** Every call resolves the node ID from the host's
/// network interfaces again and starts from a fresh sequence, so two calls
/// within the same millisecond on the same host return the **same** ID.
/// Long-running services should construct one [`SnowflakeGenerator`] and
/// share it instead.
///
/// # Errors
///
/// Any error from [`SnowflakeGenerator::new`] or
/// [`SnowflakeGenerator::next_id`].
pub fn generate_once() -> Result<SnowflakeId> {
    SnowflakeGenerator::new(GeneratorConfig::default())?.next_id()
}
