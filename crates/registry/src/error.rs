use schemata_primitives::{Namespace, QName};

use crate::arena::SlotKey;
use crate::category::Category;
use crate::component::ComponentKind;
use crate::reference::Locator;

/// Registry contract violations.
///
/// None of these are recoverable inside a compile unit: they indicate a bug in
/// the writer or an inconsistent component graph, and must reach the caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
	/// `add` was called on a frozen registry.
	#[error("registry for {namespace:?} is frozen: cannot add to {category}")]
	InvalidState {
		namespace: Namespace,
		category: Category,
	},

	/// A deferred reference's target was never supplied.
	#[error("unresolved component reference: {locator}")]
	UnresolvedReference { locator: Locator },

	/// An annotation was added as a deferred reference.
	#[error("annotations in {namespace:?} must be added resolved")]
	DeferredAnnotation { namespace: Namespace },

	/// An arena slot was filled twice.
	#[error("arena slot {key} in {namespace:?} is already filled")]
	SlotFilled { namespace: Namespace, key: SlotKey },

	/// A slot key was used with an arena that did not issue it.
	#[error("arena for {namespace:?} has no slot {key}")]
	UnknownSlot { namespace: Namespace, key: SlotKey },

	/// A mutable registry was offered for adoption.
	#[error("registry for {namespace:?} is not frozen and cannot be adopted")]
	NotFrozen { namespace: Namespace },

	/// A write targeted a namespace whose registry was adopted from another system.
	#[error("registry for {namespace:?} is adopted and read-only")]
	Adopted { namespace: Namespace },

	/// A registry could not be reopened because other holders still share it.
	#[error("registry for {namespace:?} is still shared and cannot be reopened")]
	Shared { namespace: Namespace },

	/// An entry resolved to a component of the wrong kind for its category.
	#[error("{category} in {namespace:?} resolved to a {found} component")]
	KindMismatch {
		namespace: Namespace,
		category: Category,
		found: ComponentKind,
	},

	/// A component was registered under a namespace other than its own.
	#[error("component {name} registered under {registry:?}")]
	NamespaceMismatch { name: QName, registry: Namespace },
}

pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
