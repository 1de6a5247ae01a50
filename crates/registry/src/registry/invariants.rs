#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};

use schemata_primitives::QName;

use super::ComponentRegistry;
use crate::category::Category;
use crate::component::{Component, ElementDecl, TypeDef, TypeVariety};
use crate::owner::OwnerHandle;
use crate::reference::ComponentRef;

const NS: &str = "urn:example";

fn element(i: usize) -> ComponentRef {
	ComponentRef::resolved(Component::from(ElementDecl::new(QName::new(
		NS,
		format!("e{i}"),
	))))
}

/// Invariant: a reader that observes `Frozen` observes every prior `add`.
pub(crate) fn inv_freeze_publishes_prior_adds() {
	const ENTRIES: usize = 256;
	const READERS: usize = 4;

	let mut registry = ComponentRegistry::new(NS);
	for i in 0..ENTRIES {
		registry.add(Category::GlobalElement, element(i)).unwrap();
	}
	let registry = Arc::new(registry);
	let barrier = Barrier::new(READERS + 1);

	std::thread::scope(|s| {
		for _ in 0..READERS {
			s.spawn(|| {
				barrier.wait();
				while !registry.is_immutable() {
					std::hint::spin_loop();
				}
				let listed = registry.list(Category::GlobalElement).unwrap();
				assert_eq!(listed.len(), ENTRIES, "frozen registry must be complete");
				assert_eq!(listed[ENTRIES - 1].name().unwrap().local(), format!("e{}", ENTRIES - 1));
			});
		}
		barrier.wait();
		registry.freeze();
	});
}

#[cfg_attr(test, test)]
pub(crate) fn test_freeze_publishes_prior_adds() {
	inv_freeze_publishes_prior_adds()
}

/// Invariant: concurrent `set_owner` never exposes a torn or foreign handle,
/// and the slot settles on the last handle written.
pub(crate) fn inv_owner_handoff_under_readers() {
	const WRITERS: usize = 8;
	const READERS: usize = 8;
	const ROUNDS: usize = 200;

	let mut registry = ComponentRegistry::new(NS);
	registry.add(Category::GlobalElement, element(0)).unwrap();
	registry.freeze();
	let registry = Arc::new(registry);

	let handles: Vec<Arc<OwnerHandle>> = (0..WRITERS)
		.map(|i| Arc::new(OwnerHandle::new(format!("system-{i}"))))
		.collect();
	let written: HashSet<u64> = handles.iter().map(|h| h.id()).collect();
	let done = AtomicBool::new(false);
	let barrier = Barrier::new(WRITERS + READERS);

	let (observed, displaced) = std::thread::scope(|s| {
		let readers: Vec<_> = (0..READERS)
			.map(|_| {
				s.spawn(|| {
					let mut seen = HashSet::new();
					barrier.wait();
					while !done.load(Ordering::Acquire) {
						if let Some(owner) = registry.get_owner() {
							seen.insert(owner.id());
						}
						// Category data is untouched by owner swaps.
						assert_eq!(registry.len(Category::GlobalElement), 1);
					}
					seen
				})
			})
			.collect();

		let writers: Vec<_> = handles
			.iter()
			.map(|handle| {
				let registry = &registry;
				let barrier = &barrier;
				s.spawn(move || {
					let mut previous = Vec::new();
					barrier.wait();
					for _ in 0..ROUNDS {
						if let Some(p) = registry.set_owner(handle.clone()) {
							previous.push(p.id());
						}
					}
					previous
				})
			})
			.collect();

		let mut displaced = Vec::new();
		for w in writers {
			displaced.extend(w.join().unwrap());
		}
		done.store(true, Ordering::Release);

		let mut observed = HashSet::new();
		for r in readers {
			observed.extend(r.join().unwrap());
		}
		(observed, displaced)
	});

	assert!(
		observed.is_subset(&written),
		"reader observed a handle nobody wrote"
	);

	// Every swap displaces exactly one handle; the first swap displaces none.
	assert_eq!(displaced.len(), WRITERS * ROUNDS - 1);

	// Each handle was swapped in ROUNDS times. All of those were displaced
	// again except the final write, which is the handle left in the slot.
	let mut displaced_count: HashMap<u64, usize> = HashMap::new();
	for id in displaced {
		*displaced_count.entry(id).or_default() += 1;
	}
	let settled = registry.get_owner().expect("owner must be set");
	assert!(written.contains(&settled.id()));
	for handle in &handles {
		let expected = if handle.id() == settled.id() { ROUNDS - 1 } else { ROUNDS };
		assert_eq!(
			displaced_count.get(&handle.id()).copied().unwrap_or(0),
			expected,
			"displacements of {handle:?}"
		);
	}
}

#[cfg_attr(test, test)]
pub(crate) fn test_owner_handoff_under_readers() {
	inv_owner_handoff_under_readers()
}

/// Invariant: a reader holding the registry through its previous owner keeps
/// seeing the same resolved components after the registry is adopted.
pub(crate) fn inv_adoption_preserves_resolved_identity() {
	let mut registry = ComponentRegistry::new(NS);
	let key = registry.arena().reserve();
	registry
		.add(Category::GlobalType, registry.arena().reference(key))
		.unwrap();
	registry
		.arena()
		.fill(key, TypeDef::named(QName::new(NS, "t"), TypeVariety::Complex))
		.unwrap();
	registry.freeze();

	let registry = Arc::new(registry);
	let old_owner = Arc::new(OwnerHandle::new("old"));
	registry.set_owner(old_owner.clone());

	let old_reader = registry.clone();
	let before = old_reader.list(Category::GlobalType).unwrap();

	let new_owner = Arc::new(OwnerHandle::new("new"));
	let displaced = registry.set_owner(new_owner.clone()).unwrap();
	assert_eq!(*displaced, *old_owner);

	let after = old_reader.list(Category::GlobalType).unwrap();
	assert!(Arc::ptr_eq(&before[0], &after[0]));
	assert_eq!(*old_reader.get_owner().unwrap(), *new_owner);
}

#[cfg_attr(test, test)]
pub(crate) fn test_adoption_preserves_resolved_identity() {
	inv_adoption_preserves_resolved_identity()
}
