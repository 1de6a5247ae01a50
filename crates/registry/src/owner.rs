use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwapOption;

static NEXT_OWNER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of the type system currently presenting a registry.
///
/// Registries store and return handles without inspecting them.
pub struct OwnerHandle {
	id: u64,
	label: Arc<str>,
}

impl OwnerHandle {
	/// Creates a handle with a process-unique id.
	pub fn new(label: impl Into<Arc<str>>) -> Self {
		Self {
			id: NEXT_OWNER_ID.fetch_add(1, Ordering::Relaxed),
			label: label.into(),
		}
	}

	#[inline]
	pub fn id(&self) -> u64 {
		self.id
	}

	pub fn label(&self) -> &str {
		&self.label
	}
}

impl PartialEq for OwnerHandle {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for OwnerHandle {}

impl fmt::Debug for OwnerHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OwnerHandle")
			.field("id", &self.id)
			.field("label", &&*self.label)
			.finish()
	}
}

/// Atomic single-handle slot.
///
/// Loads and stores are whole-pointer swaps, so a reader sees either the old
/// or the new handle, never a mix.
#[derive(Default)]
pub(crate) struct OwnerSlot {
	slot: ArcSwapOption<OwnerHandle>,
}

impl OwnerSlot {
	pub(crate) fn load(&self) -> Option<Arc<OwnerHandle>> {
		self.slot.load_full()
	}

	/// Stores `handle`, returning the previous one.
	pub(crate) fn swap(&self, handle: Arc<OwnerHandle>) -> Option<Arc<OwnerHandle>> {
		self.slot.swap(Some(handle))
	}
}

impl fmt::Debug for OwnerSlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("OwnerSlot").field(&self.slot.load().as_deref()).finish()
	}
}
