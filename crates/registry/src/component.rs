//! Schema component payloads.
//!
//! Components name each other by [`QName`] rather than holding pointers, so a
//! type may contain an element that refers back to the type without creating
//! an ownership cycle. Names are looked up through a
//! [`crate::TypeSystem`] once everything is published.

use std::sync::Arc;

use schemata_primitives::{AttributeModel, QName};
use strum::Display;

use crate::category::Category;

/// Coarse kind of a [`Component`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ComponentKind {
	Element,
	Attribute,
	ModelGroup,
	AttributeGroup,
	Type,
	IdentityConstraint,
	Annotation,
}

/// Global element declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementDecl {
	pub name: QName,
	pub type_name: Option<QName>,
	pub substitution_group: Option<QName>,
	pub nillable: bool,
	pub is_abstract: bool,
	/// Identity constraints declared on this element.
	pub identity_constraints: Vec<QName>,
}

impl ElementDecl {
	pub fn new(name: QName) -> Self {
		Self {
			name,
			type_name: None,
			substitution_group: None,
			nillable: false,
			is_abstract: false,
			identity_constraints: Vec::new(),
		}
	}

	pub fn with_type(mut self, type_name: QName) -> Self {
		self.type_name = Some(type_name);
		self
	}
}

/// Global attribute declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeDecl {
	pub name: QName,
	pub type_name: Option<QName>,
	pub value: Option<Arc<str>>,
	pub fixed: bool,
}

impl AttributeDecl {
	pub fn new(name: QName) -> Self {
		Self {
			name,
			type_name: None,
			value: None,
			fixed: false,
		}
	}

	pub fn with_type(mut self, type_name: QName) -> Self {
		self.type_name = Some(type_name);
		self
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compositor {
	#[default]
	Sequence,
	Choice,
	All,
}

/// Named model group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelGroupDef {
	pub name: QName,
	pub compositor: Compositor,
	/// Element particles, by element name.
	pub particles: Vec<QName>,
}

impl ModelGroupDef {
	pub fn new(name: QName, compositor: Compositor) -> Self {
		Self {
			name,
			compositor,
			particles: Vec::new(),
		}
	}

	pub fn with_particle(mut self, element: QName) -> Self {
		self.particles.push(element);
		self
	}
}

/// Named attribute group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeGroupDef {
	pub name: QName,
	pub model: AttributeModel,
}

impl AttributeGroupDef {
	pub fn new(name: QName, model: AttributeModel) -> Self {
		Self { name, model }
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TypeVariety {
	#[default]
	Simple,
	Complex,
}

/// Type definition.
///
/// Global types carry a name. Document types and attribute types are
/// anonymous wrappers keyed by the element or attribute they stand for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDef {
	pub name: Option<QName>,
	pub variety: TypeVariety,
	pub base: Option<QName>,
	pub attribute_model: Option<AttributeModel>,
	/// Set for document types.
	pub document_element: Option<QName>,
	/// Set for attribute types.
	pub attribute_type_attribute: Option<QName>,
}

impl TypeDef {
	/// Creates a named global type.
	pub fn named(name: QName, variety: TypeVariety) -> Self {
		Self {
			name: Some(name),
			variety,
			base: None,
			attribute_model: None,
			document_element: None,
			attribute_type_attribute: None,
		}
	}

	/// Creates the document type wrapping a global element.
	pub fn document(element: QName) -> Self {
		Self {
			name: None,
			variety: TypeVariety::Complex,
			base: None,
			attribute_model: None,
			document_element: Some(element),
			attribute_type_attribute: None,
		}
	}

	/// Creates the attribute type wrapping a global attribute.
	pub fn attribute_type(attribute: QName) -> Self {
		Self {
			name: None,
			variety: TypeVariety::Complex,
			base: None,
			attribute_model: None,
			document_element: None,
			attribute_type_attribute: Some(attribute),
		}
	}

	pub fn with_base(mut self, base: QName) -> Self {
		self.base = Some(base);
		self
	}

	pub fn with_attribute_model(mut self, model: AttributeModel) -> Self {
		self.attribute_model = Some(model);
		self
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentityConstraintKind {
	Key,
	KeyRef,
	Unique,
}

/// Identity constraint (`key`, `keyref` or `unique`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityConstraintDef {
	pub name: QName,
	pub kind: IdentityConstraintKind,
	pub selector: Arc<str>,
	pub fields: Vec<Arc<str>>,
	/// Referenced key, for `keyref`.
	pub refer: Option<QName>,
}

/// Top-level schema annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Annotation {
	pub documentation: Vec<Arc<str>>,
	pub app_info: Vec<Arc<str>>,
}

/// Any schema component a registry can hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Component {
	Element(ElementDecl),
	Attribute(AttributeDecl),
	ModelGroup(ModelGroupDef),
	AttributeGroup(AttributeGroupDef),
	Type(TypeDef),
	IdentityConstraint(IdentityConstraintDef),
	Annotation(Annotation),
}

impl Component {
	pub fn kind(&self) -> ComponentKind {
		match self {
			Component::Element(_) => ComponentKind::Element,
			Component::Attribute(_) => ComponentKind::Attribute,
			Component::ModelGroup(_) => ComponentKind::ModelGroup,
			Component::AttributeGroup(_) => ComponentKind::AttributeGroup,
			Component::Type(_) => ComponentKind::Type,
			Component::IdentityConstraint(_) => ComponentKind::IdentityConstraint,
			Component::Annotation(_) => ComponentKind::Annotation,
		}
	}

	/// Declared name, if the component has one.
	pub fn name(&self) -> Option<&QName> {
		match self {
			Component::Element(e) => Some(&e.name),
			Component::Attribute(a) => Some(&a.name),
			Component::ModelGroup(g) => Some(&g.name),
			Component::AttributeGroup(g) => Some(&g.name),
			Component::Type(t) => t.name.as_ref(),
			Component::IdentityConstraint(c) => Some(&c.name),
			Component::Annotation(_) => None,
		}
	}

	/// Name under which this component is looked up in `category`.
	///
	/// Document types are found by their element, attribute types by their
	/// attribute.
	pub fn lookup_name(&self, category: Category) -> Option<&QName> {
		match (category, self) {
			(Category::DocumentType, Component::Type(t)) => t.document_element.as_ref(),
			(Category::AttributeType, Component::Type(t)) => t.attribute_type_attribute.as_ref(),
			(Category::Annotation, _) => None,
			_ => self.name(),
		}
	}

	pub fn as_element(&self) -> Option<&ElementDecl> {
		match self {
			Component::Element(e) => Some(e),
			_ => None,
		}
	}

	pub fn as_type(&self) -> Option<&TypeDef> {
		match self {
			Component::Type(t) => Some(t),
			_ => None,
		}
	}
}

impl From<ElementDecl> for Component {
	fn from(value: ElementDecl) -> Self {
		Component::Element(value)
	}
}

impl From<AttributeDecl> for Component {
	fn from(value: AttributeDecl) -> Self {
		Component::Attribute(value)
	}
}

impl From<ModelGroupDef> for Component {
	fn from(value: ModelGroupDef) -> Self {
		Component::ModelGroup(value)
	}
}

impl From<AttributeGroupDef> for Component {
	fn from(value: AttributeGroupDef) -> Self {
		Component::AttributeGroup(value)
	}
}

impl From<TypeDef> for Component {
	fn from(value: TypeDef) -> Self {
		Component::Type(value)
	}
}

impl From<IdentityConstraintDef> for Component {
	fn from(value: IdentityConstraintDef) -> Self {
		Component::IdentityConstraint(value)
	}
}

impl From<Annotation> for Component {
	fn from(value: Annotation) -> Self {
		Component::Annotation(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_lookup_name_for_wrapper_types() {
		let el = QName::new("urn:example", "order");
		let doc: Component = TypeDef::document(el.clone()).into();
		assert_eq!(doc.name(), None);
		assert_eq!(doc.lookup_name(Category::DocumentType), Some(&el));
		assert_eq!(doc.lookup_name(Category::GlobalType), None);

		let attr = QName::new("urn:example", "lang");
		let at: Component = TypeDef::attribute_type(attr.clone()).into();
		assert_eq!(at.lookup_name(Category::AttributeType), Some(&attr));
	}

	#[test]
	fn test_annotations_have_no_name() {
		let ann: Component = Annotation::default().into();
		assert_eq!(ann.kind(), ComponentKind::Annotation);
		assert_eq!(ann.lookup_name(Category::Annotation), None);
	}
}
