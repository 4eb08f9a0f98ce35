use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Source of names for anonymous in-memory databases.
///
/// Every name handed out is unique for the lifetime of the counter, so two
/// anonymous opens never refer to the same database.
#[derive(Debug, Default)]
pub struct MemoryNames {
	issued: AtomicU64,
}

static PROCESS_NAMES: OnceLock<Arc<MemoryNames>> = OnceLock::new();

impl MemoryNames {
	#[must_use]
	pub const fn new() -> Self {
		Self { issued: AtomicU64::new(0) }
	}

	/// The counter shared by every module instance in this process.
	pub fn process() -> Arc<Self> {
		Arc::clone(PROCESS_NAMES.get_or_init(|| Arc::new(Self::new())))
	}

	pub fn next_name(&self) -> String {
		let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
		format!(":memory:{n}")
	}

	pub fn issued(&self) -> u64 {
		self.issued.load(Ordering::Relaxed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_are_sequential_and_distinct() {
		let names = MemoryNames::new();
		assert_eq!(names.next_name(), ":memory:1");
		assert_eq!(names.next_name(), ":memory:2");
		assert_eq!(names.issued(), 2);
	}

	#[test]
	fn process_counter_is_shared() {
		let a = MemoryNames::process();
		let b = MemoryNames::process();
		assert!(Arc::ptr_eq(&a, &b));
		assert_ne!(a.next_name(), b.next_name());
	}

	#[test]
	fn concurrent_names_never_collide() {
		let names = Arc::new(MemoryNames::new());
		let threads: Vec<_> = (0..4)
			.map(|_| {
				let names = Arc::clone(&names);
				std::thread::spawn(move || (0..100).map(|_| names.next_name()).collect::<Vec<_>>())
			})
			.collect();

		let mut all: Vec<String> =
			threads.into_iter().flat_map(|t| t.join().expect("name thread panicked")).collect();
		all.sort();
		all.dedup();
		assert_eq!(all.len(), 400);
	}
}
