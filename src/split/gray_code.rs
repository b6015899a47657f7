//! Reflected binary Gray code enumeration of value subsets.
//!
//! Each nominal value of an attribute owns one bit of a [`GrayCode`]; a set
//! bit places the value in the left partition. Counting in Gray code visits
//! every subset while changing exactly one bit per step, so a caller can
//! keep running partition sums up to date by moving a single value's class
//! counts instead of recomputing them.

use crate::core::constants::MAX_GRAY_CODE_BITS;
use crate::core::error::{Result, SplitError};
use crate::core::types::{GrayCode, ValueIndex};

/// Enumerates the subsets of `length` values as a reflected Gray code.
///
/// With `exclude_complementary` only `2^(length-1)` codes are produced:
/// a subset and its complement describe the same binary split, and the
/// highest bit never gets set.
#[derive(Debug, Clone)]
pub struct GrayCodeCounter {
    length: usize,
    gray_code: GrayCode,
    increment_count: u64,
    max_increments: u64,
    last_changed_bit: Option<usize>,
}

impl GrayCodeCounter {
    /// Creates a counter positioned on the empty subset.
    ///
    /// Fails with a size-limit error for more than 63 bits.
    pub fn new(length: usize, exclude_complementary: bool) -> Result<Self> {
        if length == 0 {
            return Err(SplitError::invalid_parameter(
                "length",
                "0",
                "gray code counter needs at least one bit",
            ));
        }
        if length > MAX_GRAY_CODE_BITS {
            return Err(SplitError::size_limit(length, MAX_GRAY_CODE_BITS));
        }

        let mut max_increments = 1u64 << length;
        if exclude_complementary {
            max_increments /= 2;
        }

        Ok(GrayCodeCounter {
            length,
            gray_code: 0,
            increment_count: 0,
            max_increments,
            last_changed_bit: None,
        })
    }

    /// True while fewer than the maximum number of increments have been made.
    pub fn has_next(&self) -> bool {
        self.increment_count < self.max_increments
    }

    /// The current code; bit `i` set means value `i` is in the subset.
    pub fn current_code(&self) -> GrayCode {
        self.gray_code
    }

    /// Moves to the next code, flipping exactly one bit.
    pub fn advance(&mut self) {
        let changed_binary_bits = self.increment_count ^ (self.increment_count + 1);
        let changed_gray_bit = changed_binary_bits ^ (changed_binary_bits >> 1);
        self.gray_code ^= changed_gray_bit;
        self.last_changed_bit = Some(changed_gray_bit.trailing_zeros() as usize);
        self.increment_count += 1;
    }

    /// Index of the bit flipped by the last [`advance`](Self::advance), if any.
    pub fn last_changed_bit_index(&self) -> Option<usize> {
        self.last_changed_bit
    }

    /// True if the last flipped bit is now set (the value entered the subset).
    pub fn last_changed_bit_now_set(&self) -> bool {
        match self.last_changed_bit {
            Some(bit) => self.gray_code & (1u64 << bit) != 0,
            None => false,
        }
    }

    /// Number of increments performed so far.
    pub fn increment_count(&self) -> u64 {
        self.increment_count
    }

    /// Total number of increments this counter allows.
    pub fn max_increments(&self) -> u64 {
        self.max_increments
    }

    /// Bit length of the code.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Splits `num_values` value indices into (left, right) by mask bit.
pub fn mask_to_partitioning(
    mask: GrayCode,
    num_values: usize,
) -> (Vec<ValueIndex>, Vec<ValueIndex>) {
    (0..num_values).partition(|&value| value_in_mask(mask, value))
}

/// Builds the mask whose set bits are exactly the given left-partition values.
pub fn partitioning_to_mask(left_values: &[ValueIndex]) -> Result<GrayCode> {
    let mut mask: GrayCode = 0;
    for &value in left_values {
        if value >= MAX_GRAY_CODE_BITS {
            return Err(SplitError::size_limit(value + 1, MAX_GRAY_CODE_BITS));
        }
        mask |= 1u64 << value;
    }
    Ok(mask)
}

/// True if `value`'s bit is set in `mask`. Values beyond the mask width are never set.
pub fn value_in_mask(mask: GrayCode, value: ValueIndex) -> bool {
    value < u64::BITS as usize && mask & (1u64 << value) != 0
}
