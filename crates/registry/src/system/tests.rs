use std::sync::Arc;

use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;
use schemata_primitives::{Namespace, QName};

use super::*;
use crate::component::{AttributeDecl, ElementDecl, TypeDef, TypeVariety};
use crate::error::RegistryError;
use crate::reference::ComponentRef;

const A: &str = "urn:a";
const B: &str = "urn:b";

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn element(ns: &str, local: &str) -> ComponentRef {
	ComponentRef::resolved(Component::from(ElementDecl::new(QName::new(ns, local))))
}

fn simple_type(ns: &str, local: &str) -> ComponentRef {
	ComponentRef::resolved(Component::from(TypeDef::named(
		QName::new(ns, local),
		TypeVariety::Simple,
	)))
}

/// Two-namespace system: `urn:a` holds E1/T1, `urn:b` holds E2.
fn base_system() -> TypeSystem {
	let mut builder = TypeSystem::builder("base");
	builder.add(A, Category::GlobalElement, element(A, "E1")).unwrap();
	builder.add(A, Category::GlobalType, simple_type(A, "T1")).unwrap();
	builder.add(B, Category::GlobalElement, element(B, "E2")).unwrap();
	builder.finish().unwrap()
}

fn recompile(namespaces: &[&str]) -> FxHashSet<Namespace> {
	namespaces.iter().map(|ns| Namespace::from(*ns)).collect()
}

#[test]
fn test_finish_freezes_and_owns_every_registry() {
	init_tracing();
	let system = base_system();

	assert_eq!(system.name(), "base");
	assert_eq!(
		system.namespaces().map(Namespace::as_str).collect::<Vec<_>>(),
		[A, B]
	);
	for registry in system.registries() {
		assert!(registry.is_immutable());
		assert!(system.owns(registry));
	}
	assert!(system.is_current_owner_of(&Namespace::from(A)));
	assert!(!system.is_current_owner_of(&Namespace::from("urn:missing")));
}

#[test]
fn test_find_uses_lookup_name() {
	let mut builder = TypeSystem::builder("docs");
	let doc_type = Component::from(TypeDef::document(QName::new(A, "root")));
	builder.add(A, Category::DocumentType, doc_type.into()).unwrap();
	builder.add(A, Category::GlobalElement, element(A, "root")).unwrap();
	let system = builder.finish().unwrap();

	let root = QName::new(A, "root");
	let doc = system.find(Category::DocumentType, &root).unwrap();
	assert_eq!(doc.as_type().unwrap().document_element.as_ref(), Some(&root));
	assert!(system.find(Category::GlobalElement, &root).unwrap().as_element().is_some());
	assert!(system.find(Category::GlobalType, &root).is_none());
}

#[test]
fn test_find_last_registration_wins() {
	let mut builder = TypeSystem::builder("dups");
	let first = Arc::new(Component::from(AttributeDecl::new(QName::new(A, "id"))));
	let second = Arc::new(Component::from(
		AttributeDecl::new(QName::new(A, "id")).with_type(QName::new(A, "T1")),
	));
	builder.add(A, Category::GlobalAttribute, first.into()).unwrap();
	builder.add(A, Category::GlobalAttribute, second.clone().into()).unwrap();
	let system = builder.finish().unwrap();

	let found = system.find(Category::GlobalAttribute, &QName::new(A, "id")).unwrap();
	assert!(Arc::ptr_eq(found, &second));
	assert_eq!(system.components(Category::GlobalAttribute).unwrap().len(), 2);
}

#[test]
fn test_components_follow_namespace_order() {
	let system = base_system();
	let names: Vec<String> = system
		.components(Category::GlobalElement)
		.unwrap()
		.iter()
		.map(|c| c.name().unwrap().to_string())
		.collect();
	assert_eq!(names, ["{urn:a}E1", "{urn:b}E2"]);
}

#[test]
fn test_incremental_adoption_shares_registries() {
	init_tracing();
	let first = base_system();
	let kept_before = first
		.registry(&Namespace::from(A))
		.unwrap()
		.list(Category::GlobalElement)
		.unwrap();

	let mut builder = TypeSystem::builder("second");
	let adopted = builder.init_from(&first, &recompile(&[B])).unwrap();
	assert_eq!(adopted, 1);
	builder.add(B, Category::GlobalElement, element(B, "E3")).unwrap();
	let second = builder.finish().unwrap();

	let a = Namespace::from(A);
	let b = Namespace::from(B);
	assert!(Arc::ptr_eq(first.registry(&a).unwrap(), second.registry(&a).unwrap()));
	assert!(!Arc::ptr_eq(first.registry(&b).unwrap(), second.registry(&b).unwrap()));

	assert!(!first.is_current_owner_of(&a));
	assert!(second.is_current_owner_of(&a));
	assert!(first.is_current_owner_of(&b));
	assert!(second.is_current_owner_of(&b));

	// Readers of the first system still see the same data.
	let kept_after = first.registry(&a).unwrap().list(Category::GlobalElement).unwrap();
	assert!(Arc::ptr_eq(&kept_before[0], &kept_after[0]));
	assert!(first.find(Category::GlobalElement, &QName::new(B, "E2")).is_some());
	assert!(second.find(Category::GlobalElement, &QName::new(B, "E2")).is_none());
	assert!(second.find(Category::GlobalElement, &QName::new(B, "E3")).is_some());
}

#[test]
fn test_adopted_namespace_rejects_writes() {
	let first = base_system();
	let mut builder = TypeSystem::builder("second");
	builder.init_from(&first, &FxHashSet::default()).unwrap();

	let err = builder
		.add(A, Category::GlobalElement, element(A, "late"))
		.unwrap_err();
	assert!(matches!(err, RegistryError::Adopted { namespace } if namespace.as_str() == A));
}

#[test]
fn test_init_from_keeps_namespaces_already_built() {
	let first = base_system();
	let mut builder = TypeSystem::builder("second");
	builder.add(A, Category::GlobalElement, element(A, "fresh")).unwrap();

	assert_eq!(builder.init_from(&first, &FxHashSet::default()).unwrap(), 1);
	let second = builder.finish().unwrap();
	assert!(second.find(Category::GlobalElement, &QName::new(A, "fresh")).is_some());
	assert!(second.find(Category::GlobalElement, &QName::new(A, "E1")).is_none());
	assert!(first.is_current_owner_of(&Namespace::from(A)));
}

#[test]
fn test_failed_finish_keeps_previous_owner() {
	let first = base_system();
	let mut builder = TypeSystem::builder("broken");
	builder.init_from(&first, &recompile(&[B])).unwrap();
	let registry = builder.registry_mut(B).unwrap();
	let key = registry.arena().reserve();
	let forward = registry.arena().reference(key);
	registry.add(Category::GlobalType, forward).unwrap();

	let err = builder.finish().unwrap_err();
	assert!(matches!(err, RegistryError::UnresolvedReference { .. }));
	assert!(first.is_current_owner_of(&Namespace::from(A)));
}

#[test]
fn test_finish_rejects_kind_mismatch() {
	let mut builder = TypeSystem::builder("mismatch");
	builder.add(A, Category::GlobalType, element(A, "E1")).unwrap();
	let err = builder.finish().unwrap_err();
	assert!(matches!(
		err,
		RegistryError::KindMismatch {
			category: Category::GlobalType,
			found: crate::component::ComponentKind::Element,
			..
		}
	));
}

#[test]
fn test_finish_rejects_foreign_name() {
	let mut builder = TypeSystem::builder("foreign");
	builder.add(A, Category::GlobalElement, element(B, "E1")).unwrap();
	let err = builder.finish().unwrap_err();
	match err {
		RegistryError::NamespaceMismatch { name, registry } => {
			assert_eq!(name, QName::new(B, "E1"));
			assert_eq!(registry.as_str(), A);
		}
		other => panic!("unexpected error: {other:?}"),
	}
}

#[test]
fn test_forward_reference_filled_before_finish() {
	let mut builder = TypeSystem::builder("forward");
	let registry = builder.registry_mut(A).unwrap();
	let key = registry.arena().reserve();
	let forward = registry.arena().reference(key);
	registry.add(Category::GlobalType, forward).unwrap();
	registry
		.arena()
		.fill(key, TypeDef::named(QName::new(A, "Late"), TypeVariety::Complex))
		.unwrap();

	let system = builder.finish().unwrap();
	assert!(system.find(Category::GlobalType, &QName::new(A, "Late")).is_some());
}

#[test]
fn test_reopen_requires_sole_holder() {
	let first = base_system();
	let shared = Arc::clone(first.registry(&Namespace::from(A)).unwrap());

	let mut builder = TypeSystem::builder("again");
	let err = builder.reopen(shared).unwrap_err();
	assert!(matches!(err, RegistryError::Shared { .. }));

	let mut registries = first.into_registries();
	let registry = registries.shift_remove(&Namespace::from(A)).unwrap();
	builder.reopen(registry).unwrap();
	builder.add(A, Category::GlobalElement, element(A, "E9")).unwrap();
	let second = builder.finish().unwrap();

	let names: Vec<String> = second
		.components(Category::GlobalElement)
		.unwrap()
		.iter()
		.map(|c| c.name().unwrap().local().to_string())
		.collect();
	assert_eq!(names, ["E1", "E9"]);
	assert!(second.is_current_owner_of(&Namespace::from(A)));
}

#[test]
fn test_init_from_mutable_registry_adopts_nothing() {
	let frozen = ComponentRegistry::new(A);
	frozen.freeze();
	let open = ComponentRegistry::new(B);
	let previous = TypeSystem {
		name: "handmade".into(),
		handle: Arc::new(OwnerHandle::new("handmade")),
		registries: [
			(Namespace::from(A), Arc::new(frozen)),
			(Namespace::from(B), Arc::new(open)),
		]
		.into_iter()
		.collect(),
		index: std::array::from_fn(|_| Default::default()),
	};

	let mut builder = TypeSystem::builder("second");
	let err = builder.init_from(&previous, &FxHashSet::default()).unwrap_err();
	assert!(matches!(err, RegistryError::NotFrozen { namespace } if namespace.as_str() == B));

	// `urn:a` was not adopted, so it is still open for building here.
	builder.add(A, Category::GlobalElement, element(A, "E1")).unwrap();
	let system = builder.finish().unwrap();
	assert_eq!(system.namespaces().count(), 1);
}
