use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use schemata_primitives::Namespace;

use super::{NameIndex, TypeSystem};
use crate::category::Category;
use crate::component::Annotation;
use crate::error::{RegistryError, Result};
use crate::owner::OwnerHandle;
use crate::reference::ComponentRef;
use crate::registry::ComponentRegistry;

enum Entry {
	/// Built by this builder; frozen on finish.
	Building(ComponentRegistry),
	/// Taken over unchanged from an earlier system.
	Adopted(Arc<ComponentRegistry>),
}

impl Entry {
	fn is_adopted(&self) -> bool {
		matches!(self, Entry::Adopted(_))
	}
}

/// Compile state for a [`TypeSystem`].
pub struct TypeSystemBuilder {
	name: Arc<str>,
	entries: IndexMap<Namespace, Entry>,
}

impl TypeSystemBuilder {
	pub fn new(name: impl Into<Arc<str>>) -> Self {
		Self {
			name: name.into(),
			entries: IndexMap::new(),
		}
	}

	/// Returns the registry being built for `namespace`, creating it on first
	/// use.
	///
	/// # Errors
	///
	/// [`RegistryError::Adopted`] if the namespace was adopted from an earlier
	/// system.
	pub fn registry_mut(&mut self, namespace: impl Into<Namespace>) -> Result<&mut ComponentRegistry> {
		let namespace = namespace.into();
		if !self.entries.contains_key(&namespace) {
			tracing::debug!(system = %self.name, %namespace, "namespace registered");
		}
		let entry = self
			.entries
			.entry(namespace.clone())
			.or_insert_with(|| Entry::Building(ComponentRegistry::new(namespace.clone())));
		match entry {
			Entry::Building(registry) => Ok(registry),
			Entry::Adopted(_) => Err(RegistryError::Adopted { namespace }),
		}
	}

	/// Adds `component` to `category` of the registry for `namespace`.
	pub fn add(
		&mut self,
		namespace: impl Into<Namespace>,
		category: Category,
		component: ComponentRef,
	) -> Result<()> {
		self.registry_mut(namespace)?.add(category, component)
	}

	pub fn add_annotation(&mut self, namespace: impl Into<Namespace>, annotation: Annotation) -> Result<()> {
		self.registry_mut(namespace)?.add_annotation(annotation)
	}

	/// Adopts every registry of `previous` whose namespace is not being
	/// recompiled and not already present here. Returns how many were adopted.
	///
	/// Either every candidate is adopted or none is.
	///
	/// # Errors
	///
	/// [`RegistryError::NotFrozen`] if a candidate registry is still mutable.
	pub fn init_from(&mut self, previous: &TypeSystem, recompiled: &FxHashSet<Namespace>) -> Result<usize> {
		let candidates: Vec<_> = previous
			.registries
			.iter()
			.filter(|(namespace, _)| {
				!recompiled.contains(*namespace) && !self.entries.contains_key(*namespace)
			})
			.collect();
		if let Some((namespace, _)) = candidates.iter().find(|(_, r)| !r.is_immutable()) {
			return Err(RegistryError::NotFrozen {
				namespace: (*namespace).clone(),
			});
		}

		let adopted = candidates.len();
		for (namespace, registry) in candidates {
			self.entries
				.insert(namespace.clone(), Entry::Adopted(Arc::clone(registry)));
		}
		tracing::debug!(
			system = %self.name,
			from = previous.name(),
			adopted,
			recompiled = recompiled.len(),
			"initialized from previous system"
		);
		Ok(adopted)
	}

	/// Takes back sole ownership of a frozen registry and reopens it for
	/// writing, replacing any entry for its namespace.
	///
	/// # Errors
	///
	/// [`RegistryError::Shared`] if any other holder still has the registry.
	pub fn reopen(&mut self, registry: Arc<ComponentRegistry>) -> Result<()> {
		let mut registry = Arc::try_unwrap(registry).map_err(|shared| RegistryError::Shared {
			namespace: shared.namespace().clone(),
		})?;
		registry.unfreeze();
		let namespace = registry.namespace().clone();
		tracing::debug!(system = %self.name, %namespace, "registry reopened for rebuild");
		self.entries.insert(namespace, Entry::Building(registry));
		Ok(())
	}

	/// Freezes, verifies, indexes and publishes every registry.
	///
	/// Owners are reassigned only after verification succeeds, so a failed
	/// finish leaves adopted registries with their previous owner.
	///
	/// # Errors
	///
	/// * [`RegistryError::UnresolvedReference`] for a ref whose target is missing.
	/// * [`RegistryError::KindMismatch`] for an entry of the wrong kind.
	/// * [`RegistryError::NamespaceMismatch`] for a name outside its registry's
	///   namespace.
	pub fn finish(self) -> Result<TypeSystem> {
		let adopted = self.entries.values().filter(|e| e.is_adopted()).count();
		let registries: IndexMap<Namespace, Arc<ComponentRegistry>> = self
			.entries
			.into_iter()
			.map(|(namespace, entry)| {
				let registry = match entry {
					Entry::Building(registry) => {
						registry.freeze();
						Arc::new(registry)
					}
					Entry::Adopted(registry) => registry,
				};
				(namespace, registry)
			})
			.collect();

		let index = build_index(&registries)?;

		let handle = Arc::new(OwnerHandle::new(Arc::clone(&self.name)));
		for registry in registries.values() {
			registry.set_owner(Arc::clone(&handle));
		}

		tracing::debug!(
			system = %self.name,
			owner = handle.id(),
			namespaces = registries.len(),
			adopted,
			"type system published"
		);

		Ok(TypeSystem {
			name: self.name,
			handle,
			registries,
			index,
		})
	}
}

fn build_index(registries: &IndexMap<Namespace, Arc<ComponentRegistry>>) -> Result<NameIndex> {
	let mut index: NameIndex = std::array::from_fn(|_| Default::default());
	for registry in registries.values() {
		for category in Category::ALL {
			for component in registry.list(category)? {
				if component.kind() != category.expected_kind() {
					return Err(RegistryError::KindMismatch {
						namespace: registry.namespace().clone(),
						category,
						found: component.kind(),
					});
				}
				let Some(name) = component.lookup_name(category) else {
					continue;
				};
				if name.namespace() != registry.namespace() {
					return Err(RegistryError::NamespaceMismatch {
						name: name.clone(),
						registry: registry.namespace().clone(),
					});
				}
				index[category.index()].insert(name.clone(), Arc::clone(&component));
			}
		}
	}
	Ok(index)
}
