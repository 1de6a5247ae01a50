//! Type systems: immutable views over a set of per-namespace registries.
//!
//! # Mental model
//!
//! * A [`TypeSystemBuilder`] collects registries: fresh ones it builds itself
//!   and frozen ones it adopts from a previous [`TypeSystem`].
//! * [`TypeSystemBuilder::finish`] freezes the fresh registries, checks that
//!   every entry resolves to the kind its category expects, builds a name
//!   index, and only then hands every registry to the new system's
//!   [`OwnerHandle`].
//! * An adopted registry is shared, not copied. Systems that presented it
//!   earlier keep reading the same lists; they simply stop being its owner.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use schemata_primitives::{Namespace, QName};

use crate::category::Category;
use crate::component::Component;
use crate::error::Result;
use crate::owner::OwnerHandle;
use crate::registry::ComponentRegistry;

mod builder;

pub use builder::TypeSystemBuilder;

type NameIndex = [FxHashMap<QName, Arc<Component>>; Category::COUNT];

/// A published, read-only set of registries.
pub struct TypeSystem {
	name: Arc<str>,
	handle: Arc<OwnerHandle>,
	registries: IndexMap<Namespace, Arc<ComponentRegistry>>,
	index: NameIndex,
}

impl TypeSystem {
	/// Starts a builder for a system called `name`.
	pub fn builder(name: impl Into<Arc<str>>) -> TypeSystemBuilder {
		TypeSystemBuilder::new(name)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Handle this system installs as owner of its registries.
	pub fn handle(&self) -> &Arc<OwnerHandle> {
		&self.handle
	}

	/// Namespaces in the order they were registered.
	pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
		self.registries.keys()
	}

	pub fn registry(&self, namespace: &Namespace) -> Option<&Arc<ComponentRegistry>> {
		self.registries.get(namespace)
	}

	pub fn registries(&self) -> impl Iterator<Item = &Arc<ComponentRegistry>> {
		self.registries.values()
	}

	/// Returns true if `registry` currently names this system as its owner.
	pub fn owns(&self, registry: &ComponentRegistry) -> bool {
		registry
			.get_owner()
			.is_some_and(|owner| *owner == *self.handle)
	}

	/// Returns true if this system still owns its registry for `namespace`.
	///
	/// Turns false once a later system adopts that registry.
	pub fn is_current_owner_of(&self, namespace: &Namespace) -> bool {
		self.registry(namespace).is_some_and(|registry| self.owns(registry))
	}

	/// Every entry of `category` across all namespaces, in namespace order.
	pub fn components(&self, category: Category) -> Result<Vec<Arc<Component>>> {
		let mut out = Vec::new();
		for registry in self.registries.values() {
			out.extend(registry.list(category)?);
		}
		Ok(out)
	}

	/// Looks up a component by the name it is indexed under in `category`.
	///
	/// When a name is registered more than once, the last entry wins.
	pub fn find(&self, category: Category, name: &QName) -> Option<&Arc<Component>> {
		self.index[category.index()].get(name)
	}

	/// Gives up the system, returning its registries.
	///
	/// A registry whose `Arc` ends up unique here can be reopened with
	/// [`TypeSystemBuilder::reopen`].
	pub fn into_registries(self) -> IndexMap<Namespace, Arc<ComponentRegistry>> {
		self.registries
	}
}

impl fmt::Debug for TypeSystem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeSystem")
			.field("name", &&*self.name)
			.field("handle", &self.handle.id())
			.field("namespaces", &self.registries.keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests;
