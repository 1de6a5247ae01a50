//! Attribute models.
//!
//! An [`AttributeModel`] is the finished attribute picture of a complex type:
//! the declared attribute uses in declaration order, plus the attribute
//! wildcard (its name set and process mode). Models are built by the type
//! resolver and consumed here as values.

use std::sync::Arc;

use indexmap::IndexMap;
use strum::{Display, EnumString};

use crate::name::QName;
use crate::name_set::NameSet;

/// How attributes matched by a wildcard are validated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum WildcardProcess {
	/// No attribute wildcard is present.
	#[default]
	None,
	/// Validate when a declaration is available.
	Lax,
	/// A declaration must be available.
	Strict,
	/// Matched attributes are not validated.
	Skip,
}

/// Occurrence constraint of an attribute use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AttributeUsage {
	#[default]
	Optional,
	Required,
	Prohibited,
}

/// One attribute use within a complex type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeUse {
	pub name: QName,
	/// Simple type of the attribute value, when declared.
	pub type_name: Option<QName>,
	pub usage: AttributeUsage,
	/// Default or fixed value text.
	pub value: Option<Arc<str>>,
	/// True when `value` is a fixed constraint rather than a default.
	pub fixed: bool,
}

impl AttributeUse {
	/// Creates an optional use with no type or value constraint.
	pub fn optional(name: QName) -> Self {
		Self {
			name,
			type_name: None,
			usage: AttributeUsage::Optional,
			value: None,
			fixed: false,
		}
	}

	/// Creates a required use.
	pub fn required(name: QName) -> Self {
		Self {
			usage: AttributeUsage::Required,
			..Self::optional(name)
		}
	}

	/// Creates a prohibited use.
	pub fn prohibited(name: QName) -> Self {
		Self {
			usage: AttributeUsage::Prohibited,
			..Self::optional(name)
		}
	}

	pub fn with_type(mut self, type_name: QName) -> Self {
		self.type_name = Some(type_name);
		self
	}

	pub fn with_default(mut self, value: impl Into<Arc<str>>) -> Self {
		self.value = Some(value.into());
		self.fixed = false;
		self
	}

	pub fn with_fixed(mut self, value: impl Into<Arc<str>>) -> Self {
		self.value = Some(value.into());
		self.fixed = true;
		self
	}
}

/// Typed wildcard summary of an attribute model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WildcardSummary {
	/// Names whose attributes are validated against global declarations.
	pub typed: NameSet,
	/// True if the model admits any wildcard-matched attribute at all.
	pub has_wildcards: bool,
}

/// Attribute uses and wildcard of a complex type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeModel {
	uses: IndexMap<QName, AttributeUse>,
	wildcard_set: NameSet,
	wildcard_process: WildcardProcess,
}

impl AttributeModel {
	/// Creates a model with no attributes and no wildcard.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a model that starts as a copy of `base`, for derivation.
	pub fn derived_from(base: &AttributeModel) -> Self {
		base.clone()
	}

	/// Adds or replaces an attribute use.
	///
	/// A replaced use keeps its original position.
	pub fn add_attribute(&mut self, attribute: AttributeUse) -> Option<AttributeUse> {
		self.uses.insert(attribute.name.clone(), attribute)
	}

	/// Removes an attribute use, preserving the order of the rest.
	pub fn remove_attribute(&mut self, name: &QName) -> Option<AttributeUse> {
		self.uses.shift_remove(name)
	}

	/// Sets the attribute wildcard.
	pub fn set_wildcard(&mut self, set: NameSet, process: WildcardProcess) {
		self.wildcard_set = set;
		self.wildcard_process = process;
	}

	/// Builder form of [`Self::add_attribute`].
	pub fn with_attribute(mut self, attribute: AttributeUse) -> Self {
		self.add_attribute(attribute);
		self
	}

	/// Builder form of [`Self::set_wildcard`].
	pub fn with_wildcard(mut self, set: NameSet, process: WildcardProcess) -> Self {
		self.set_wildcard(set, process);
		self
	}

	pub fn attribute(&self, name: &QName) -> Option<&AttributeUse> {
		self.uses.get(name)
	}

	/// Attribute uses in declaration order.
	pub fn attributes(&self) -> impl ExactSizeIterator<Item = &AttributeUse> + '_ {
		self.uses.values()
	}

	pub fn len(&self) -> usize {
		self.uses.len()
	}

	pub fn is_empty(&self) -> bool {
		self.uses.is_empty()
	}

	pub fn wildcard_set(&self) -> &NameSet {
		&self.wildcard_set
	}

	pub fn wildcard_process(&self) -> WildcardProcess {
		self.wildcard_process
	}

	/// Summarizes the wildcard for content checking.
	///
	/// `NONE` admits nothing. `SKIP` admits attributes but types none of them.
	/// `LAX` and `STRICT` type exactly the wildcard set.
	pub fn summarize_wildcards(&self) -> WildcardSummary {
		match self.wildcard_process {
			WildcardProcess::None => WildcardSummary {
				typed: NameSet::empty(),
				has_wildcards: false,
			},
			WildcardProcess::Skip => WildcardSummary {
				typed: NameSet::empty(),
				has_wildcards: true,
			},
			WildcardProcess::Lax | WildcardProcess::Strict => WildcardSummary {
				typed: self.wildcard_set.clone(),
				has_wildcards: true,
			},
		}
	}
}
