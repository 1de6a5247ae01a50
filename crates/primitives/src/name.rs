use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Schema namespace URI.
///
/// The empty string is the absent namespace (components declared in a schema
/// without a target namespace). Cloning is a reference-count bump.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(Arc<str>);

impl Namespace {
	/// Creates a namespace from its URI.
	pub fn new(uri: impl Into<Arc<str>>) -> Self {
		Self(uri.into())
	}

	/// Returns the absent namespace.
	pub fn absent() -> Self {
		Self(Arc::from(""))
	}

	/// Returns the namespace URI.
	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns true for the absent namespace.
	#[inline]
	pub fn is_absent(&self) -> bool {
		self.0.is_empty()
	}
}

impl Default for Namespace {
	fn default() -> Self {
		Self::absent()
	}
}

impl fmt::Debug for Namespace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Namespace").field(&&*self.0).finish()
	}
}

impl fmt::Display for Namespace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for Namespace {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Namespace {
	fn from(value: &str) -> Self {
		Self(Arc::from(value))
	}
}

impl From<String> for Namespace {
	fn from(value: String) -> Self {
		Self(Arc::from(value))
	}
}

/// Namespace-qualified component name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
	namespace: Namespace,
	local: Arc<str>,
}

impl QName {
	/// Creates a qualified name.
	pub fn new(namespace: impl Into<Namespace>, local: impl Into<Arc<str>>) -> Self {
		Self {
			namespace: namespace.into(),
			local: local.into(),
		}
	}

	/// Creates a name in the absent namespace.
	pub fn unqualified(local: impl Into<Arc<str>>) -> Self {
		Self::new(Namespace::absent(), local)
	}

	/// Returns the namespace part.
	#[inline]
	pub fn namespace(&self) -> &Namespace {
		&self.namespace
	}

	/// Returns the local part.
	#[inline]
	pub fn local(&self) -> &str {
		&self.local
	}
}

/// Clark notation: `{uri}local`, or just `local` for the absent namespace.
impl fmt::Display for QName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.namespace.is_absent() {
			f.write_str(&self.local)
		} else {
			write!(f, "{{{}}}{}", self.namespace, self.local)
		}
	}
}

impl fmt::Debug for QName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "QName({self})")
	}
}
