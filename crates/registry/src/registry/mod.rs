//! Per-namespace component registry.
//!
//! # Purpose
//!
//! Hold every global component contributed by one namespace, in category lists
//! that preserve declaration order, and publish them read-only to any number of
//! type systems.
//!
//! # Mental model
//!
//! * One writer owns the registry (`&mut`) while it is `Building` and appends
//!   [`ComponentRef`]s, many of them still deferred.
//! * [`ComponentRegistry::freeze`] flips it to `Frozen`. From then on the
//!   registry is shared behind an `Arc` and only read.
//! * The owner slot is the one thing that changes after freeze: a newly
//!   composed type system adopts an unchanged registry by swapping in its own
//!   [`OwnerHandle`], without copying a single list.
//!
//! # Invariants
//!
//! - Must reject every `add` while frozen.
//!   - Enforced in: [`ComponentRegistry::add`].
//!   - Tested by: `registry::tests::test_add_after_freeze_fails`
//! - Must publish every prior `add` to readers that observe `Frozen`.
//!   - Enforced in: [`ComponentRegistry::freeze`] (release store) and
//!     [`ComponentRegistry::is_immutable`] (acquire load).
//!   - Tested by: `registry::invariants::test_freeze_publishes_prior_adds`
//! - Must never expose a torn owner handle.
//!   - Enforced in: `OwnerSlot` (`ArcSwapOption`).
//!   - Tested by: `registry::invariants::test_owner_handoff_under_readers`
//! - Must only reopen when no reader holds the registry.
//!   - Enforced in: [`ComponentRegistry::unfreeze`] takes `&mut self`, which an
//!     `Arc`-shared registry can only provide through `Arc::get_mut` or
//!     `Arc::try_unwrap`.
//!
//! # Concurrency & ordering
//!
//! * Writes: `add` takes `&mut self`; single-writer discipline is checked by the
//!   borrow checker rather than at runtime.
//! * Reads: `list` and `ComponentRef::resolve` take `&self` and hold no lock
//!   while resolvers run.
//! * Owner: `get_owner`/`set_owner` are atomic pointer loads and swaps.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use schemata_primitives::Namespace;

use crate::arena::ComponentArena;
use crate::category::Category;
use crate::component::{Annotation, Component};
use crate::error::{RegistryError, Result};
use crate::owner::{OwnerHandle, OwnerSlot};
use crate::reference::ComponentRef;

/// Schema components of one namespace.
pub struct ComponentRegistry {
	namespace: Namespace,
	lists: [Vec<ComponentRef>; Category::COUNT],
	arena: ComponentArena,
	immutable: AtomicBool,
	owner: OwnerSlot,
}

impl ComponentRegistry {
	/// Creates an empty, mutable registry with no owner.
	pub fn new(namespace: impl Into<Namespace>) -> Self {
		let namespace = namespace.into();
		Self {
			arena: ComponentArena::new(namespace.clone()),
			namespace,
			lists: std::array::from_fn(|_| Vec::new()),
			immutable: AtomicBool::new(false),
			owner: OwnerSlot::default(),
		}
	}

	#[inline]
	pub fn namespace(&self) -> &Namespace {
		&self.namespace
	}

	/// Arena for components that are referenced before they are built.
	#[inline]
	pub fn arena(&self) -> &ComponentArena {
		&self.arena
	}

	/// Appends `component` to `category`.
	///
	/// Duplicates are kept; de-duplication is up to the caller.
	///
	/// # Errors
	///
	/// * [`RegistryError::InvalidState`] when the registry is frozen.
	/// * [`RegistryError::DeferredAnnotation`] when an unresolved ref is added
	///   to [`Category::Annotation`].
	pub fn add(&mut self, category: Category, component: ComponentRef) -> Result<()> {
		if self.is_immutable() {
			return Err(RegistryError::InvalidState {
				namespace: self.namespace.clone(),
				category,
			});
		}

		let component = if category == Category::Annotation {
			if !component.is_resolved() {
				return Err(RegistryError::DeferredAnnotation {
					namespace: self.namespace.clone(),
				});
			}
			ComponentRef::Resolved(component.resolve()?)
		} else {
			component
		};

		tracing::trace!(namespace = %self.namespace, %category, "add component");
		self.lists[category.index()].push(component);
		Ok(())
	}

	/// Appends a top-level annotation.
	pub fn add_annotation(&mut self, annotation: Annotation) -> Result<()> {
		self.add(Category::Annotation, ComponentRef::resolved(Component::from(annotation)))
	}

	/// Resolves every entry of `category`, in insertion order.
	///
	/// While building, this reflects whatever has been added so far.
	///
	/// # Errors
	///
	/// [`RegistryError::UnresolvedReference`] for the first entry whose target
	/// is missing.
	pub fn list(&self, category: Category) -> Result<Vec<Arc<Component>>> {
		self.lists[category.index()].iter().map(ComponentRef::resolve).collect()
	}

	/// Raw references of `category`, without resolving them.
	pub fn refs(&self, category: Category) -> &[ComponentRef] {
		&self.lists[category.index()]
	}

	pub fn len(&self, category: Category) -> usize {
		self.lists[category.index()].len()
	}

	/// Returns true if no category holds any entry.
	pub fn is_empty(&self) -> bool {
		self.lists.iter().all(Vec::is_empty)
	}

	/// Total number of entries across categories.
	pub fn total_len(&self) -> usize {
		self.lists.iter().map(Vec::len).sum()
	}

	/// Transitions to `Frozen`.
	///
	/// Any thread that later observes [`Self::is_immutable`] as true also
	/// observes every `add` made before this call.
	pub fn freeze(&self) {
		if !self.immutable.swap(true, Ordering::AcqRel) {
			tracing::debug!(
				namespace = %self.namespace,
				entries = self.total_len(),
				"registry frozen"
			);
		}
	}

	/// Transitions back to `Building` for reuse.
	///
	/// Exclusive access guarantees no reader relies on immutability during the
	/// call.
	pub fn unfreeze(&mut self) {
		let was_frozen = std::mem::replace(self.immutable.get_mut(), false);
		if was_frozen {
			tracing::debug!(namespace = %self.namespace, "registry reopened");
		}
	}

	#[inline]
	pub fn is_immutable(&self) -> bool {
		self.immutable.load(Ordering::Acquire)
	}

	/// Returns the type system currently presenting this registry.
	pub fn get_owner(&self) -> Option<Arc<OwnerHandle>> {
		self.owner.load()
	}

	/// Hands the registry to a new owner, returning the previous one.
	///
	/// Readers that obtained the registry from the previous owner keep seeing
	/// the same category data.
	pub fn set_owner(&self, handle: Arc<OwnerHandle>) -> Option<Arc<OwnerHandle>> {
		let previous = self.owner.swap(handle);
		tracing::debug!(
			namespace = %self.namespace,
			had_owner = previous.is_some(),
			"registry owner reassigned"
		);
		previous
	}
}

impl fmt::Debug for ComponentRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentRegistry")
			.field("namespace", &self.namespace)
			.field("entries", &self.total_len())
			.field("immutable", &self.is_immutable())
			.field("owner", &self.owner)
			.finish()
	}
}

#[cfg(any(test, doc))]
pub(crate) mod invariants;
