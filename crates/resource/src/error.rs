use std::io;

/// Provider failures.
///
/// Lookups never produce these: a provider that cannot serve a name returns
/// `None`. Only teardown reports errors, and [`crate::ResourceChain::close`]
/// discards them.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
	#[error("provider {provider} failed to close: {source}")]
	Close {
		provider: String,
		#[source]
		source: io::Error,
	},
}

/// Errors loading a [`crate::ResourceConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read resource config: {0}")]
	Read(#[from] io::Error),
	#[error("failed to parse resource config: {0}")]
	Parse(#[from] toml::de::Error),
}
