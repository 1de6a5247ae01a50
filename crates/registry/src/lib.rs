//! Per-namespace schema component registries.
//!
//! A [`ComponentRegistry`] holds the global components one namespace
//! contributes, grouped by [`Category`] and kept in declaration order. Entries
//! are [`ComponentRef`]s, which may point at components that are built later.
//! Once frozen, a registry is shared read-only by any number of
//! [`TypeSystem`]s; the newest one to adopt it is recorded as its owner.
//!
//! # Modules
//!
//! - [`registry`] - category lists, the immutability fence and the owner slot
//! - [`reference`] - resolved and deferred component references
//! - [`arena`] - write-once slots for forward references
//! - [`system`] - type system composition and incremental adoption

pub mod arena;
mod category;
pub mod component;
mod error;
mod owner;
pub mod reference;
pub mod registry;
pub mod system;

pub use arena::{ComponentArena, SlotKey};
pub use category::Category;
pub use component::{Component, ComponentKind};
pub use error::{RegistryError, Result};
pub use owner::OwnerHandle;
pub use reference::{ComponentRef, Locator, Resolve};
pub use registry::ComponentRegistry;
pub use system::{TypeSystem, TypeSystemBuilder};
