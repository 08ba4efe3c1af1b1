//! Bit rearrangement between full-register indices and gate-local indices
//!
//! A gate acting on inputs `[q0, q1, ..., qk-1]` sees a local index whose most
//! significant bit is the value of qubit `q0` and whose least significant bit
//! is the value of qubit `qk-1`. Qubit `q` of the register is bit `q` of a
//! full-register index (qubit 0 is the least significant bit).
//!
//! [`BitRearranger`] maps a full-register index to the gate-local index and
//! splits off the bits the gate does not touch. Two register indices interact
//! through a gate matrix only if their remaining bits agree.

use crate::{QuantumError, Result};
use smallvec::SmallVec;

/// Extract one bit from a register index and move it to its local position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitwiseShift {
    select_mask: usize,
    shift: isize,
}

impl BitwiseShift {
    /// Shift moving register bit `from` to local bit `to`
    ///
    /// # Panics
    /// Panics if `from` is not below `usize::BITS`
    pub fn new(from: usize, to: usize) -> Self {
        assert!(
            from < usize::BITS as usize,
            "qubit {} has no bit in a register index",
            from
        );
        Self {
            select_mask: 1 << from,
            shift: from as isize - to as isize,
        }
    }

    /// Mask selecting the register bit
    #[inline]
    pub fn select_mask(&self) -> usize {
        self.select_mask
    }

    /// Positive for right shifts, negative for left shifts
    #[inline]
    pub fn shift(&self) -> isize {
        self.shift
    }

    /// Selected bit of `index`, repositioned to the local ordering
    #[inline]
    pub fn apply(&self, index: usize) -> usize {
        let bit = index & self.select_mask;
        if self.shift >= 0 {
            bit >> self.shift
        } else {
            bit << -self.shift
        }
    }

    /// Local bit of `local`, moved back to its register position
    #[inline]
    pub fn invert(&self, local: usize) -> usize {
        let placed = if self.shift >= 0 {
            local << self.shift
        } else {
            local >> -self.shift
        };
        placed & self.select_mask
    }
}

/// Mapping between register indices and the local index of a gate
///
/// # Example
/// ```
/// use qsim_core::BitRearranger;
///
/// // Qubit 2 is the most significant gate input, qubit 0 the least
/// let rearranger = BitRearranger::new(&[2, 0]);
/// assert_eq!(rearranger.rearrange_bits(0b101), 0b11);
/// assert_eq!(rearranger.rearrange_bits(0b100), 0b10);
/// assert_eq!(rearranger.remaining_bits(0b111), 0b010);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitRearranger {
    shifts: SmallVec<[BitwiseShift; 4]>,
    selected_bits_mask: usize,
}

impl BitRearranger {
    /// Build the mapping for an ordered list of inputs
    ///
    /// Inputs are expected to be distinct; use [`BitRearranger::try_new`] for
    /// untrusted input lists.
    ///
    /// # Panics
    /// Panics if an input is not below `usize::BITS`
    pub fn new(inputs: &[usize]) -> Self {
        let count = inputs.len();
        let shifts: SmallVec<[BitwiseShift; 4]> = inputs
            .iter()
            .enumerate()
            .map(|(position, &qubit)| BitwiseShift::new(qubit, count - 1 - position))
            .collect();
        let selected_bits_mask = shifts.iter().fold(0, |mask, s| mask | s.select_mask());

        Self {
            shifts,
            selected_bits_mask,
        }
    }

    /// Build the mapping after checking inputs are unique and below `qubit_count`
    pub fn try_new(inputs: &[usize], qubit_count: usize) -> Result<Self> {
        validate_inputs(inputs, qubit_count)?;
        Ok(Self::new(inputs))
    }

    /// Number of gate inputs
    #[inline]
    pub fn input_count(&self) -> usize {
        self.shifts.len()
    }

    /// Union of the register bits the gate acts on
    #[inline]
    pub fn selected_bits_mask(&self) -> usize {
        self.selected_bits_mask
    }

    /// Complement of [`selected_bits_mask`](Self::selected_bits_mask)
    #[inline]
    pub fn unselected_bits_mask(&self) -> usize {
        !self.selected_bits_mask
    }

    /// Per-input shifts, in input order
    pub fn shifts(&self) -> &[BitwiseShift] {
        &self.shifts
    }

    /// Gate-local index of a register index
    #[inline]
    pub fn rearrange_bits(&self, index: usize) -> usize {
        self.shifts.iter().fold(0, |local, s| local | s.apply(index))
    }

    /// Register bits the gate leaves untouched
    #[inline]
    pub fn remaining_bits(&self, index: usize) -> usize {
        index & !self.selected_bits_mask
    }

    /// Register bits encoding a gate-local index, all other bits zero
    #[inline]
    pub fn scatter(&self, local: usize) -> usize {
        self.shifts.iter().fold(0, |index, s| index | s.invert(local))
    }

    /// Rebuild a register index from its local index and remaining bits
    #[inline]
    pub fn reconstruct(&self, local: usize, remaining: usize) -> usize {
        self.scatter(local) | (remaining & !self.selected_bits_mask)
    }

    /// Register masks for every local index `0..2^k`
    ///
    /// Entry `c` is the set of input bits that are one when the gate-local
    /// index equals `c`.
    pub fn activation_masks(&self) -> Vec<usize> {
        (0..1usize << self.shifts.len())
            .map(|local| self.scatter(local))
            .collect()
    }
}

/// Check `inputs` are unique and inside `0..qubit_count`
///
/// Qubits at or above `usize::BITS` have no bit in a register index and are
/// rejected whatever `qubit_count` says.
pub fn validate_inputs(inputs: &[usize], qubit_count: usize) -> Result<()> {
    if qubit_count == 0 {
        return Err(QuantumError::EmptyQubitCount);
    }
    if inputs.len() > qubit_count {
        return Err(QuantumError::GateSpansTooManyQubits {
            gate_qubits: inputs.len(),
            qubit_count,
        });
    }
    for (i, &qubit) in inputs.iter().enumerate() {
        let addressable = qubit_count.min(usize::BITS as usize);
        if qubit >= addressable {
            return Err(QuantumError::invalid_qubit(qubit, addressable));
        }
        if inputs[..i].contains(&qubit) {
            return Err(QuantumError::DuplicateQubit(qubit));
        }
    }
    Ok(())
}
