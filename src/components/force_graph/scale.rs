//! Value-to-visual mappings for node size, font size and colour.

use std::collections::HashMap;
use std::hash::Hash;

/// Category-10 palette.
pub const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Maps a continuous domain onto a continuous range, extrapolating outside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl LinearScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	pub fn apply(&self, value: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		if d1 == d0 {
			return (r0 + r1) / 2.0;
		}
		r0 + (value - d0) / (d1 - d0) * (r1 - r0)
	}
}

/// Hands out palette colours to keys in the order keys are first seen.
#[derive(Clone, Debug)]
pub struct OrdinalScale<K> {
	palette: &'static [&'static str],
	assigned: HashMap<K, usize>,
}

impl<K: Eq + Hash> OrdinalScale<K> {
	pub fn new(palette: &'static [&'static str]) -> Self {
		Self {
			palette,
			assigned: HashMap::new(),
		}
	}

	pub fn color(&mut self, key: K) -> &'static str {
		let next = self.assigned.len();
		let slot = *self.assigned.entry(key).or_insert(next);
		self.palette[slot % self.palette.len()]
	}
}
