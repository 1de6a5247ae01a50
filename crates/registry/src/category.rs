use strum::{Display, IntoStaticStr};

use crate::component::ComponentKind;

/// Category list of a [`crate::ComponentRegistry`].
///
/// Each category is stored as its own ordered list. Readers always query by
/// category, so lists are never mixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
	GlobalElement,
	GlobalAttribute,
	ModelGroup,
	RedefinedModelGroup,
	AttributeGroup,
	RedefinedAttributeGroup,
	GlobalType,
	RedefinedGlobalType,
	DocumentType,
	AttributeType,
	IdentityConstraint,
	/// Holds resolved values only; annotations never need forward references.
	Annotation,
}

impl Category {
	pub const COUNT: usize = 12;

	/// Every category, in storage order.
	pub const ALL: [Category; Self::COUNT] = [
		Category::GlobalElement,
		Category::GlobalAttribute,
		Category::ModelGroup,
		Category::RedefinedModelGroup,
		Category::AttributeGroup,
		Category::RedefinedAttributeGroup,
		Category::GlobalType,
		Category::RedefinedGlobalType,
		Category::DocumentType,
		Category::AttributeType,
		Category::IdentityConstraint,
		Category::Annotation,
	];

	/// Storage slot of this category.
	#[inline]
	pub const fn index(self) -> usize {
		self as usize
	}

	/// Component kind every entry of this category must resolve to.
	pub const fn expected_kind(self) -> ComponentKind {
		match self {
			Category::GlobalElement => ComponentKind::Element,
			Category::GlobalAttribute => ComponentKind::Attribute,
			Category::ModelGroup | Category::RedefinedModelGroup => ComponentKind::ModelGroup,
			Category::AttributeGroup | Category::RedefinedAttributeGroup => {
				ComponentKind::AttributeGroup
			}
			Category::GlobalType
			| Category::RedefinedGlobalType
			| Category::DocumentType
			| Category::AttributeType => ComponentKind::Type,
			Category::IdentityConstraint => ComponentKind::IdentityConstraint,
			Category::Annotation => ComponentKind::Annotation,
		}
	}

	/// Returns true for the categories holding redefinitions.
	pub const fn is_redefinition(self) -> bool {
		matches!(
			self,
			Category::RedefinedModelGroup
				| Category::RedefinedAttributeGroup
				| Category::RedefinedGlobalType
		)
	}
}
