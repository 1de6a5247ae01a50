//! Lazily resolved component references.
//!
//! # Mental model
//!
//! * A [`ComponentRef`] is either already [`ComponentRef::Resolved`] or
//!   [`ComponentRef::Deferred`]: a [`Locator`] plus a [`Resolve`] impl that can
//!   find the target later.
//! * The first successful resolution is memoized in a write-once cell shared by
//!   every clone of the ref. Racing resolvers may both run, but only one result
//!   is ever stored, so every caller observes the same `Arc`.
//! * A failed resolution is not memoized. The target may still be supplied
//!   while the registry is being built.
//!
//! # Concurrency
//!
//! No lock is held while the resolver runs, so a resolver may read the
//! registry that holds the ref.

use std::fmt;
use std::sync::{Arc, OnceLock};

use schemata_primitives::Namespace;

use crate::arena::SlotKey;
use crate::component::Component;
use crate::error::{RegistryError, Result};

/// Where a deferred reference's target lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Locator {
	/// Opaque handle interpreted by the resolver.
	Handle(Arc<str>),
	/// Slot in a namespace arena.
	Slot { namespace: Namespace, key: SlotKey },
}

impl fmt::Display for Locator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Locator::Handle(handle) => write!(f, "handle {handle:?}"),
			Locator::Slot { namespace, key } => write!(f, "slot {key} in {namespace:?}"),
		}
	}
}

/// Finds the target of a [`Locator`].
///
/// Returning `None` means the target has not been supplied (yet).
pub trait Resolve: Send + Sync {
	fn resolve(&self, locator: &Locator) -> Option<Arc<Component>>;
}

impl<F> Resolve for F
where
	F: Fn(&Locator) -> Option<Arc<Component>> + Send + Sync,
{
	fn resolve(&self, locator: &Locator) -> Option<Arc<Component>> {
		self(locator)
	}
}

/// Deferred half of a [`ComponentRef`].
pub struct Deferred {
	locator: Locator,
	resolver: Arc<dyn Resolve>,
	memo: OnceLock<Arc<Component>>,
}

impl Deferred {
	pub fn locator(&self) -> &Locator {
		&self.locator
	}

	fn resolve(&self) -> Result<Arc<Component>> {
		if let Some(hit) = self.memo.get() {
			return Ok(hit.clone());
		}
		let found = self.resolver.resolve(&self.locator).ok_or_else(|| {
			RegistryError::UnresolvedReference {
				locator: self.locator.clone(),
			}
		})?;
		Ok(self.memo.get_or_init(|| found).clone())
	}
}

/// Handle to a schema component that may not be built yet.
#[derive(Clone)]
pub enum ComponentRef {
	Resolved(Arc<Component>),
	Deferred(Arc<Deferred>),
}

impl ComponentRef {
	/// Wraps an already built component.
	pub fn resolved(component: impl Into<Arc<Component>>) -> Self {
		ComponentRef::Resolved(component.into())
	}

	/// Creates a reference resolved on first access.
	pub fn deferred(locator: Locator, resolver: Arc<dyn Resolve>) -> Self {
		ComponentRef::Deferred(Arc::new(Deferred {
			locator,
			resolver,
			memo: OnceLock::new(),
		}))
	}

	/// Creates a reference to an opaque handle.
	pub fn handle(handle: impl Into<Arc<str>>, resolver: Arc<dyn Resolve>) -> Self {
		Self::deferred(Locator::Handle(handle.into()), resolver)
	}

	/// Returns the target, resolving and memoizing it if necessary.
	///
	/// # Errors
	///
	/// [`RegistryError::UnresolvedReference`] if the resolver cannot find the target.
	pub fn resolve(&self) -> Result<Arc<Component>> {
		match self {
			ComponentRef::Resolved(component) => Ok(component.clone()),
			ComponentRef::Deferred(deferred) => deferred.resolve(),
		}
	}

	/// Returns true if [`Self::resolve`] will not call a resolver.
	pub fn is_resolved(&self) -> bool {
		match self {
			ComponentRef::Resolved(_) => true,
			ComponentRef::Deferred(deferred) => deferred.memo.get().is_some(),
		}
	}

	pub fn locator(&self) -> Option<&Locator> {
		match self {
			ComponentRef::Resolved(_) => None,
			ComponentRef::Deferred(deferred) => Some(&deferred.locator),
		}
	}

	/// Returns true if both refs are the same handle (clones of one another).
	pub fn ptr_eq(&self, other: &ComponentRef) -> bool {
		match (self, other) {
			(ComponentRef::Resolved(a), ComponentRef::Resolved(b)) => Arc::ptr_eq(a, b),
			(ComponentRef::Deferred(a), ComponentRef::Deferred(b)) => Arc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl From<Component> for ComponentRef {
	fn from(value: Component) -> Self {
		ComponentRef::resolved(value)
	}
}

impl From<Arc<Component>> for ComponentRef {
	fn from(value: Arc<Component>) -> Self {
		ComponentRef::Resolved(value)
	}
}

impl fmt::Debug for ComponentRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ComponentRef::Resolved(component) => f
				.debug_struct("Resolved")
				.field("kind", &component.kind())
				.field("name", &component.name())
				.finish(),
			ComponentRef::Deferred(deferred) => f
				.debug_struct("Deferred")
				.field("locator", &deferred.locator)
				.field("resolved", &deferred.memo.get().is_some())
				.finish(),
		}
	}
}
