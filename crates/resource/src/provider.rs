use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::error::ResourceError;

/// Readable bytes of one resource.
pub type ResourceStream = Box<dyn Read + Send>;

/// A named source of resource bytes.
pub trait ResourceProvider: Send {
	/// Label used in diagnostics.
	fn name(&self) -> &str;

	/// Opens `resource`, or returns `None` if this provider does not have it.
	fn get_stream(&self, resource: &str) -> Option<ResourceStream>;

	/// Releases whatever the provider holds.
	fn close(&mut self) -> Result<(), ResourceError> {
		Ok(())
	}
}

/// Serves resources from files below a root directory.
#[derive(Debug, Clone)]
pub struct DirProvider {
	label: String,
	root: PathBuf,
}

impl DirProvider {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		let root = root.into();
		Self {
			label: root.display().to_string(),
			root,
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Maps `resource` below the root, refusing names that would escape it.
	fn path_of(&self, resource: &str) -> Option<PathBuf> {
		let relative = Path::new(resource);
		let confined = relative.file_name().is_some()
			&& relative
				.components()
				.all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
		confined.then(|| self.root.join(relative))
	}
}

impl ResourceProvider for DirProvider {
	fn name(&self) -> &str {
		&self.label
	}

	fn get_stream(&self, resource: &str) -> Option<ResourceStream> {
		let Some(path) = self.path_of(resource) else {
			tracing::debug!(provider = %self.label, resource, "resource name escapes root");
			return None;
		};
		match File::open(&path).and_then(|file| Ok((file.metadata()?.is_file(), file))) {
			Ok((true, file)) => Some(Box::new(file)),
			// Directories and other non-files are not resources.
			Ok((false, _)) => None,
			Err(err) if err.kind() == io::ErrorKind::NotFound => None,
			Err(err) => {
				tracing::warn!(
					provider = %self.label,
					path = %path.display(),
					error = %err,
					"failed to open resource"
				);
				None
			}
		}
	}
}

/// Serves resources from memory, for embedded schemas.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
	label: String,
	entries: HashMap<String, Arc<[u8]>>,
}

impl MemoryProvider {
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			entries: HashMap::new(),
		}
	}

	/// Stores `bytes` under `resource`, replacing any previous entry.
	pub fn insert(&mut self, resource: impl Into<String>, bytes: impl Into<Vec<u8>>) {
		self.entries.insert(resource.into(), Arc::from(bytes.into()));
	}

	pub fn with_entry(mut self, resource: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
		self.insert(resource, bytes);
		self
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl ResourceProvider for MemoryProvider {
	fn name(&self) -> &str {
		&self.label
	}

	fn get_stream(&self, resource: &str) -> Option<ResourceStream> {
		let bytes = self.entries.get(resource)?;
		Some(Box::new(Cursor::new(Arc::clone(bytes))))
	}

	fn close(&mut self) -> Result<(), ResourceError> {
		self.entries.clear();
		Ok(())
	}
}
