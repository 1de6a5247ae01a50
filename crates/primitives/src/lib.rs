//! Core naming and attribute-model types shared by schema registries.

/// Attribute uses, wildcard process modes and the attribute model.
pub mod attribute;
/// Namespaces and qualified names.
pub mod name;
/// Wildcard name sets.
pub mod name_set;

pub use attribute::{AttributeModel, AttributeUsage, AttributeUse, WildcardProcess, WildcardSummary};
pub use name::{Namespace, QName};
pub use name_set::NameSet;
