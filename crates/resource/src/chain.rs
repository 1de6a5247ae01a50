use std::fmt;

use crate::config::ResourceConfig;
use crate::provider::{DirProvider, MemoryProvider, ResourceProvider, ResourceStream};

/// Ordered fallback over resource providers.
///
/// Lookups ask each provider in order and stop at the first hit. Closing is
/// best-effort: every provider is closed and individual failures are dropped.
#[derive(Default)]
pub struct ResourceChain {
	providers: Vec<Box<dyn ResourceProvider>>,
}

impl ResourceChain {
	pub fn new(providers: Vec<Box<dyn ResourceProvider>>) -> Self {
		Self { providers }
	}

	/// Builds the chain a config describes: the preload table first, then one
	/// directory per search path in declared order.
	pub fn from_config(config: &ResourceConfig) -> Self {
		let mut chain = Self::default();
		if !config.preload.is_empty() {
			let mut preload = MemoryProvider::new("preload");
			for (resource, text) in &config.preload {
				preload.insert(resource.as_str(), text.as_bytes());
			}
			chain.push(preload);
		}
		for path in &config.search_paths {
			chain.push(DirProvider::new(path));
		}
		chain
	}

	/// Appends a provider with the lowest priority so far.
	pub fn push(&mut self, provider: impl ResourceProvider + 'static) {
		self.providers.push(Box::new(provider));
	}

	pub fn len(&self) -> usize {
		self.providers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}

	/// Provider labels in lookup order.
	pub fn provider_names(&self) -> impl Iterator<Item = &str> {
		self.providers.iter().map(|p| p.name())
	}

	/// Returns the first stream any provider has for `resource`.
	pub fn get_stream(&self, resource: &str) -> Option<ResourceStream> {
		let found = self.providers.iter().find_map(|provider| {
			let stream = provider.get_stream(resource)?;
			tracing::trace!(provider = provider.name(), resource, "resource found");
			Some(stream)
		});
		if found.is_none() {
			tracing::trace!(resource, providers = self.providers.len(), "resource not found");
		}
		found
	}

	/// Closes every provider. Close failures are logged and discarded.
	pub fn close(&mut self) {
		for provider in &mut self.providers {
			if let Err(err) = provider.close() {
				tracing::debug!(provider = provider.name(), error = %err, "ignoring provider close failure");
			}
		}
	}
}

impl fmt::Debug for ResourceChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.provider_names()).finish()
	}
}

#[cfg(test)]
mod tests;
