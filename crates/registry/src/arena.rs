//! Namespace-scoped component arena.
//!
//! Forward references are expressed as stable slot keys. A writer reserves a
//! slot before the component exists, hands out [`ComponentRef`]s pointing at
//! the slot, and fills it once the component is built. Slots are write-once.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use schemata_primitives::Namespace;

use crate::component::Component;
use crate::error::{RegistryError, Result};
use crate::reference::{ComponentRef, Locator, Resolve};

static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(1);

/// Stable index of a slot in a [`ComponentArena`].
///
/// Keys remember the arena that issued them; no other arena accepts them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
	arena: u64,
	index: usize,
}

impl SlotKey {
	#[inline]
	pub const fn index(self) -> usize {
		self.index
	}
}

impl fmt::Display for SlotKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.index)
	}
}

struct ArenaInner {
	id: u64,
	namespace: Namespace,
	slots: RwLock<Vec<OnceLock<Arc<Component>>>>,
}

/// Append-only arena of write-once component slots.
///
/// Cloning shares the arena.
#[derive(Clone)]
pub struct ComponentArena {
	inner: Arc<ArenaInner>,
}

impl ComponentArena {
	pub fn new(namespace: Namespace) -> Self {
		Self {
			inner: Arc::new(ArenaInner {
				id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
				namespace,
				slots: RwLock::new(Vec::new()),
			}),
		}
	}

	pub fn namespace(&self) -> &Namespace {
		&self.inner.namespace
	}

	/// Reserves an empty slot.
	pub fn reserve(&self) -> SlotKey {
		let mut slots = self.inner.slots.write();
		slots.push(OnceLock::new());
		self.key(slots.len() - 1)
	}

	/// Reserves a slot and fills it immediately.
	pub fn alloc(&self, component: impl Into<Component>) -> SlotKey {
		let cell = OnceLock::new();
		let _ = cell.set(Arc::new(component.into()));
		let mut slots = self.inner.slots.write();
		slots.push(cell);
		self.key(slots.len() - 1)
	}

	fn key(&self, index: usize) -> SlotKey {
		SlotKey {
			arena: self.inner.id,
			index,
		}
	}

	/// Supplies the component for a reserved slot.
	///
	/// # Errors
	///
	/// * [`RegistryError::UnknownSlot`] if this arena did not issue `key`.
	/// * [`RegistryError::SlotFilled`] if the slot already holds a component.
	pub fn fill(&self, key: SlotKey, component: impl Into<Component>) -> Result<()> {
		let component = Arc::new(component.into());
		let slots = self.inner.slots.read();
		let cell = match slots.get(key.index) {
			Some(cell) if key.arena == self.inner.id => cell,
			_ => {
				return Err(RegistryError::UnknownSlot {
					namespace: self.inner.namespace.clone(),
					key,
				});
			}
		};
		cell.set(component).map_err(|_| RegistryError::SlotFilled {
			namespace: self.inner.namespace.clone(),
			key,
		})
	}

	/// Returns the slot's component, if filled.
	///
	/// Keys issued by another arena find nothing.
	pub fn get(&self, key: SlotKey) -> Option<Arc<Component>> {
		if key.arena != self.inner.id {
			return None;
		}
		self.inner.slots.read().get(key.index)?.get().cloned()
	}

	/// Returns a deferred reference to the slot.
	pub fn reference(&self, key: SlotKey) -> ComponentRef {
		ComponentRef::deferred(
			Locator::Slot {
				namespace: self.inner.namespace.clone(),
				key,
			},
			Arc::new(self.clone()),
		)
	}

	/// Number of reserved slots.
	pub fn len(&self) -> usize {
		self.inner.slots.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Resolve for ComponentArena {
	fn resolve(&self, locator: &Locator) -> Option<Arc<Component>> {
		match locator {
			Locator::Slot { namespace, key } if *namespace == self.inner.namespace => self.get(*key),
			_ => None,
		}
	}
}

impl fmt::Debug for ComponentArena {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentArena")
			.field("namespace", &self.inner.namespace)
			.field("slots", &self.len())
			.finish()
	}
}
