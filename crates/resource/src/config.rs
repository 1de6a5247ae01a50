use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Where a [`crate::ResourceChain`] looks for schema documents.
///
/// ```toml
/// search_paths = ["schemas", "/usr/share/xml/schemas"]
///
/// [preload]
/// "urn:example/common.xsd" = "<xs:schema/>"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceConfig {
	/// Directories searched in order.
	pub search_paths: Vec<PathBuf>,
	/// Documents served from memory ahead of any directory.
	pub preload: BTreeMap<String, String>,
}

impl ResourceConfig {
	/// Reads a config file. Relative search paths are taken relative to the
	/// file's directory.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = fs::read_to_string(path)?;
		let mut config = Self::parse(&text)?;
		if let Some(base) = path.parent() {
			for search_path in &mut config.search_paths {
				if search_path.is_relative() {
					*search_path = base.join(&*search_path);
				}
			}
		}
		tracing::debug!(
			path = %path.display(),
			search_paths = config.search_paths.len(),
			preload = config.preload.len(),
			"loaded resource config"
		);
		Ok(config)
	}

	pub fn parse(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}
}
