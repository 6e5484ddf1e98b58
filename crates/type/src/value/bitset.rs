// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Debug, Formatter};

/// A growable set of bits, stored least significant bit first.
///
/// The backing bytes never end in a zero byte, so two sets holding the
/// same bits are equal regardless of how they were built.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitSet {
	bytes: Vec<u8>,
}

impl BitSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_bytes(bytes: &[u8]) -> Self {
		let mut result = Self {
			bytes: bytes.to_vec(),
		};
		result.trim();
		result
	}

	pub fn set(&mut self, index: usize) {
		let byte = index / 8;
		if byte >= self.bytes.len() {
			self.bytes.resize(byte + 1, 0);
		}
		self.bytes[byte] |= 1 << (index % 8);
	}

	pub fn clear(&mut self, index: usize) {
		let byte = index / 8;
		if byte < self.bytes.len() {
			self.bytes[byte] &= !(1 << (index % 8));
			self.trim();
		}
	}

	pub fn get(&self, index: usize) -> bool {
		self.bytes.get(index / 8).is_some_and(|byte| byte & (1 << (index % 8)) != 0)
	}

	/// Index of the highest set bit plus one.
	pub fn length(&self) -> usize {
		match self.bytes.last() {
			Some(last) => (self.bytes.len() - 1) * 8 + (8 - last.leading_zeros() as usize),
			None => 0,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	pub fn cardinality(&self) -> usize {
		self.bytes.iter().map(|byte| byte.count_ones() as usize).sum()
	}

	pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
		(0..self.length()).filter(|&index| self.get(index))
	}

	/// The set bits as bytes, without trailing zero bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	fn trim(&mut self) {
		while self.bytes.last() == Some(&0) {
			self.bytes.pop();
		}
	}
}

impl Debug for BitSet {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_set().entries(self.iter_ones()).finish()
	}
}

impl FromIterator<usize> for BitSet {
	fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
		let mut result = BitSet::new();
		for index in iter {
			result.set(index);
		}
		result
	}
}
