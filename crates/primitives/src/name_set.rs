//! Wildcard component sets.
//!
//! A [`NameSet`] is the set of qualified names a wildcard admits. It is stored
//! in one of two polarities: an inclusion list (namespaces plus explicit names)
//! or the complement of such a list.

use std::collections::BTreeSet;

use crate::name::{Namespace, QName};

/// Set of qualified names matched by a wildcard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameSet {
	/// When set, the set is the complement of `namespaces` and `names`.
	inverted: bool,
	namespaces: BTreeSet<Namespace>,
	names: BTreeSet<QName>,
}

impl NameSet {
	/// The set matching nothing.
	pub fn empty() -> Self {
		Self::default()
	}

	/// The set matching every name (`##any`).
	pub fn all() -> Self {
		Self {
			inverted: true,
			..Self::default()
		}
	}

	/// Matches every name in one of the given namespaces.
	pub fn in_namespaces<I>(namespaces: I) -> Self
	where
		I: IntoIterator<Item = Namespace>,
	{
		Self {
			inverted: false,
			namespaces: namespaces.into_iter().collect(),
			names: BTreeSet::new(),
		}
	}

	/// Matches every name outside the given namespaces (`##other`).
	pub fn not_in_namespaces<I>(namespaces: I) -> Self
	where
		I: IntoIterator<Item = Namespace>,
	{
		Self {
			inverted: true,
			namespaces: namespaces.into_iter().collect(),
			names: BTreeSet::new(),
		}
	}

	/// Adds an explicit name to the list this set is built from.
	///
	/// For an inverted set this excludes the name.
	pub fn with_name(mut self, name: QName) -> Self {
		self.names.insert(name);
		self
	}

	/// Returns true if `name` is a member.
	pub fn contains(&self, name: &QName) -> bool {
		let listed = self.namespaces.contains(name.namespace()) || self.names.contains(name);
		listed != self.inverted
	}

	/// Returns true if the set matches nothing.
	pub fn is_empty(&self) -> bool {
		!self.inverted && self.namespaces.is_empty() && self.names.is_empty()
	}

	/// Returns true if the set matches every name.
	pub fn is_all(&self) -> bool {
		self.inverted && self.namespaces.is_empty() && self.names.is_empty()
	}

	/// Returns true if this set is a complement.
	pub fn is_inverted(&self) -> bool {
		self.inverted
	}

	/// Namespaces listed by this set, in sorted order.
	pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> + '_ {
		self.namespaces.iter()
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn test_empty_and_all() {
		let q = QName::new("urn:a", "x");
		assert!(NameSet::empty().is_empty());
		assert!(!NameSet::empty().contains(&q));
		assert!(NameSet::all().is_all());
		assert!(NameSet::all().contains(&q));
	}

	#[test]
	fn test_namespace_membership() {
		let set = NameSet::in_namespaces([Namespace::from("urn:a")]);
		assert!(set.contains(&QName::new("urn:a", "x")));
		assert!(!set.contains(&QName::new("urn:b", "x")));
		assert!(!set.is_empty());
	}

	#[test]
	fn test_other_excludes_target_namespace() {
		let set = NameSet::not_in_namespaces([Namespace::from("urn:a"), Namespace::absent()]);
		assert!(!set.contains(&QName::new("urn:a", "x")));
		assert!(!set.contains(&QName::unqualified("x")));
		assert!(set.contains(&QName::new("urn:b", "x")));
		assert!(!set.is_all());
	}

	#[test]
	fn test_explicit_names() {
		let set = NameSet::empty().with_name(QName::new("urn:a", "only"));
		assert!(set.contains(&QName::new("urn:a", "only")));
		assert!(!set.contains(&QName::new("urn:a", "other")));

		let set = NameSet::all().with_name(QName::new("urn:a", "banned"));
		assert!(!set.contains(&QName::new("urn:a", "banned")));
		assert!(set.contains(&QName::new("urn:a", "other")));
	}

	proptest! {
		#[test]
		fn prop_inverted_set_is_complement(ns in "[a-c]", local in "[a-z]{1,4}") {
			let q = QName::new(ns.as_str(), local.as_str());
			let listed = [Namespace::from("a")];
			let inc = NameSet::in_namespaces(listed.clone());
			let exc = NameSet::not_in_namespaces(listed);
			prop_assert_ne!(inc.contains(&q), exc.contains(&q));
		}
	}
}
