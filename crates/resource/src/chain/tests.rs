use std::fs;
use std::io::{self, Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;
use crate::error::ResourceError;

#[derive(Default)]
struct Calls {
	lookups: AtomicUsize,
	closes: AtomicUsize,
}

/// Provider that records calls and serves a fixed set of names.
struct Spy {
	name: String,
	serves: Vec<&'static str>,
	fail_close: bool,
	calls: Arc<Calls>,
}

impl Spy {
	fn new(name: &str, serves: &[&'static str]) -> (Self, Arc<Calls>) {
		let calls = Arc::new(Calls::default());
		let spy = Self {
			name: name.to_string(),
			serves: serves.to_vec(),
			fail_close: false,
			calls: Arc::clone(&calls),
		};
		(spy, calls)
	}

	fn failing_close(mut self) -> Self {
		self.fail_close = true;
		self
	}
}

impl ResourceProvider for Spy {
	fn name(&self) -> &str {
		&self.name
	}

	fn get_stream(&self, resource: &str) -> Option<ResourceStream> {
		self.calls.lookups.fetch_add(1, Ordering::SeqCst);
		self.serves
			.iter()
			.any(|served| *served == resource)
			.then(|| Box::new(Cursor::new(format!("{}:{resource}", self.name))) as ResourceStream)
	}

	fn close(&mut self) -> Result<(), ResourceError> {
		self.calls.closes.fetch_add(1, Ordering::SeqCst);
		if self.fail_close {
			return Err(ResourceError::Close {
				provider: self.name.clone(),
				source: io::Error::other("boom"),
			});
		}
		Ok(())
	}
}

fn read_all(mut stream: ResourceStream) -> String {
	let mut out = String::new();
	stream.read_to_string(&mut out).unwrap();
	out
}

/// Three providers, only the second has `a.xsd`; the first fails to close.
#[test]
fn test_three_provider_chain() {
	let (first, first_calls) = Spy::new("first", &[]);
	let (second, second_calls) = Spy::new("second", &["a.xsd"]);
	let (third, third_calls) = Spy::new("third", &["a.xsd"]);

	let mut chain = ResourceChain::default();
	chain.push(first.failing_close());
	chain.push(second);
	chain.push(third);

	let stream = chain.get_stream("a.xsd").unwrap();
	assert_eq!(read_all(stream), "second:a.xsd");
	assert_eq!(first_calls.lookups.load(Ordering::SeqCst), 1);
	assert_eq!(second_calls.lookups.load(Ordering::SeqCst), 1);
	assert_eq!(third_calls.lookups.load(Ordering::SeqCst), 0);

	chain.close();
	for calls in [&first_calls, &second_calls, &third_calls] {
		assert_eq!(calls.closes.load(Ordering::SeqCst), 1);
	}
}

#[test]
fn test_miss_asks_every_provider() {
	let (first, first_calls) = Spy::new("first", &["a.xsd"]);
	let (second, second_calls) = Spy::new("second", &[]);
	let chain = ResourceChain::new(vec![Box::new(first), Box::new(second)]);

	assert!(chain.get_stream("b.xsd").is_none());
	assert_eq!(first_calls.lookups.load(Ordering::SeqCst), 1);
	assert_eq!(second_calls.lookups.load(Ordering::SeqCst), 1);
}

#[test]
fn test_empty_chain() {
	let mut chain = ResourceChain::default();
	assert!(chain.is_empty());
	assert!(chain.get_stream("a.xsd").is_none());
	chain.close();
}

#[test]
fn test_from_config_orders_preload_before_directories() {
	let low = tempfile::tempdir().unwrap();
	let high = tempfile::tempdir().unwrap();
	fs::write(low.path().join("a.xsd"), "low").unwrap();
	fs::write(high.path().join("a.xsd"), "high").unwrap();
	fs::write(low.path().join("b.xsd"), "low-b").unwrap();

	let config = ResourceConfig {
		search_paths: vec![high.path().to_path_buf(), low.path().to_path_buf()],
		preload: [("c.xsd".to_string(), "mem".to_string())].into_iter().collect(),
	};
	let chain = ResourceChain::from_config(&config);

	assert_eq!(chain.len(), 3);
	assert_eq!(chain.provider_names().next(), Some("preload"));
	assert_eq!(read_all(chain.get_stream("a.xsd").unwrap()), "high");
	assert_eq!(read_all(chain.get_stream("b.xsd").unwrap()), "low-b");
	assert_eq!(read_all(chain.get_stream("c.xsd").unwrap()), "mem");
	assert!(chain.get_stream("d.xsd").is_none());
}

#[test]
fn test_from_default_config_is_empty() {
	let chain = ResourceChain::from_config(&ResourceConfig::default());
	assert!(chain.is_empty());
	assert_eq!(format!("{chain:?}"), "[]");
}

/// A directory named like a resource is a miss, so later providers are asked.
#[test]
fn test_directory_does_not_shadow_later_provider() {
	let dir = tempfile::tempdir().unwrap();
	fs::create_dir(dir.path().join("common")).unwrap();

	let mut chain = ResourceChain::default();
	chain.push(DirProvider::new(dir.path()));
	chain.push(MemoryProvider::new("embedded").with_entry("common", "<schema/>"));

	let stream = chain.get_stream("common").unwrap();
	assert_eq!(read_all(stream), "<schema/>");
}
