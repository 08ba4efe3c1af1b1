//! Oracle truth tables
//!
//! A truth table lists the control patterns that activate an oracle's inner
//! gate. Each entry is a binary number whose most significant bit belongs to
//! the first control, so `"10"` with controls `[2, 4]` activates the inner
//! gate when qubit 2 is one and qubit 4 is zero.

use ahash::AHashSet;
use qsim_core::{QuantumError, Result};

/// Validated set of activation patterns for a fixed number of controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    control_count: usize,
    entries: Vec<String>,
    sections: AHashSet<usize>,
}

impl TruthTable {
    /// Parse and normalise truth table entries
    ///
    /// Entries shorter than `control_count` are left-padded with zeros and
    /// surplus leading zeros are dropped; duplicates are kept once.
    ///
    /// # Errors
    /// - [`QuantumError::EmptyControls`] if `control_count` is zero
    /// - [`QuantumError::InvalidTruthTableEntry`] for empty entries or
    ///   characters other than `'0'`/`'1'`
    /// - [`QuantumError::TruthTableEntryTooWide`] if an entry needs more than
    ///   `control_count` bits
    ///
    /// # Example
    /// ```
    /// use qsim_gates::TruthTable;
    ///
    /// let table = TruthTable::new(&["1", "10"], 3).unwrap();
    /// assert_eq!(table.entries(), &["001".to_string(), "010".to_string()]);
    /// assert!(table.is_active(0b010));
    /// ```
    pub fn new<S: AsRef<str>>(entries: &[S], control_count: usize) -> Result<Self> {
        if control_count == 0 {
            return Err(QuantumError::EmptyControls);
        }

        let mut table = Self::empty(control_count);
        for entry in entries {
            let entry = entry.as_ref();
            let section = parse_entry(entry, control_count)?;
            table.insert(section);
        }
        Ok(table)
    }

    /// Table with no active pattern; the oracle never fires
    pub fn empty(control_count: usize) -> Self {
        Self {
            control_count,
            entries: Vec::new(),
            sections: AHashSet::new(),
        }
    }

    /// Single pattern with every control set, i.e. a plain controlled gate
    pub fn all_ones(control_count: usize) -> Result<Self> {
        if control_count == 0 {
            return Err(QuantumError::EmptyControls);
        }
        let mut table = Self::empty(control_count);
        table.insert(low_bits(control_count));
        Ok(table)
    }

    /// Number of controls each entry covers
    #[inline]
    pub fn control_count(&self) -> usize {
        self.control_count
    }

    /// Normalised entries, each exactly `control_count` characters wide
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether no pattern activates the oracle
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether control value `section` activates the inner gate
    #[inline]
    pub fn is_active(&self, section: usize) -> bool {
        self.sections.contains(&section)
    }

    /// Active control values
    pub fn sections(&self) -> impl Iterator<Item = usize> + '_ {
        self.sections.iter().copied()
    }

    /// Truth table of an oracle wrapping another oracle
    ///
    /// Every outer entry is followed by every inner entry, bit for bit, and
    /// the control counts add up. An empty table on either side yields an
    /// empty table.
    ///
    /// # Errors
    /// [`QuantumError::GateSpansTooManyQubits`] if the combined controls do
    /// not fit in a register index
    pub fn concatenated(&self, inner: &TruthTable) -> Result<TruthTable> {
        let control_count = self.control_count + inner.control_count;
        if control_count > usize::BITS as usize {
            return Err(QuantumError::GateSpansTooManyQubits {
                gate_qubits: control_count,
                qubit_count: usize::BITS as usize,
            });
        }

        let mut table = Self::empty(control_count);
        for outer_entry in &self.entries {
            let outer = parse_normalized(outer_entry);
            for inner_entry in &inner.entries {
                // inner width is below usize::BITS since the outer has a control
                let section = (outer << inner.control_count) | parse_normalized(inner_entry);
                table.insert(section);
            }
        }
        Ok(table)
    }

    fn insert(&mut self, section: usize) {
        if self.sections.insert(section) {
            self.entries
                .push(format!("{:0width$b}", section, width = self.control_count));
        }
    }
}

fn parse_entry(entry: &str, control_count: usize) -> Result<usize> {
    if entry.is_empty() || !entry.chars().all(|c| c == '0' || c == '1') {
        return Err(QuantumError::InvalidTruthTableEntry(entry.to_string()));
    }

    let significant = entry.trim_start_matches('0');
    if significant.len() > control_count || significant.len() > usize::BITS as usize {
        return Err(QuantumError::TruthTableEntryTooWide {
            entry: entry.to_string(),
            control_count,
        });
    }
    Ok(parse_normalized(significant))
}

fn parse_normalized(entry: &str) -> usize {
    entry
        .bytes()
        .fold(0, |value, bit| (value << 1) | usize::from(bit == b'1'))
}

fn low_bits(count: usize) -> usize {
    if count >= usize::BITS as usize {
        usize::MAX
    } else {
        (1 << count) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalises_width() {
        let table = TruthTable::new(&["01", "1", "0010"], 2).unwrap();
        assert_eq!(table.entries(), &["01".to_string(), "10".to_string()]);
        assert!(table.is_active(1));
        assert!(table.is_active(2));
        assert!(!table.is_active(3));
    }

    #[test]
    fn test_rejects_invalid_characters() {
        assert_eq!(
            TruthTable::new(&["0a"], 2),
            Err(QuantumError::InvalidTruthTableEntry("0a".to_string()))
        );
        assert!(TruthTable::new(&[""], 2).is_err());
    }

    #[test]
    fn test_rejects_wide_entries() {
        assert!(matches!(
            TruthTable::new(&["101"], 2),
            Err(QuantumError::TruthTableEntryTooWide { control_count: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_zero_controls() {
        assert_eq!(
            TruthTable::new(&["1"], 0),
            Err(QuantumError::EmptyControls)
        );
    }

    #[test]
    fn test_concatenation() {
        let outer = TruthTable::new(&["10", "01"], 2).unwrap();
        let inner = TruthTable::new(&["11", "00"], 2).unwrap();
        let nested = outer.concatenated(&inner).unwrap();

        assert_eq!(nested.control_count(), 4);
        assert_eq!(
            nested.entries(),
            &["1011", "1000", "0111", "0100"].map(String::from)
        );
    }

    #[test]
    fn test_concatenation_with_empty_table() {
        let outer = TruthTable::new(&["1"], 1).unwrap();
        let inner = TruthTable::empty(2);
        let nested = outer.concatenated(&inner).unwrap();
        assert!(nested.is_empty());
        assert_eq!(nested.control_count(), 3);
    }

    #[test]
    fn test_concatenation_wider_than_index_rejected() {
        let outer = TruthTable::new(&["1"], 1).unwrap();
        let inner = TruthTable::all_ones(usize::BITS as usize).unwrap();
        assert_eq!(
            outer.concatenated(&inner),
            Err(QuantumError::GateSpansTooManyQubits {
                gate_qubits: usize::BITS as usize + 1,
                qubit_count: usize::BITS as usize,
            })
        );
    }

    #[test]
    fn test_all_ones() {
        let table = TruthTable::all_ones(3).unwrap();
        assert_eq!(table.entries(), &["111".to_string()]);
    }

    #[test]
    fn test_full_width_entry_matches_all_ones() {
        let width = usize::BITS as usize;
        let entry = "1".repeat(width);
        let table = TruthTable::new(&[entry.as_str()], width).unwrap();
        assert!(table.is_active(usize::MAX));
        assert_eq!(table, TruthTable::all_ones(width).unwrap());

        let too_wide = format!("1{}", entry);
        assert!(matches!(
            TruthTable::new(&[too_wide.as_str()], width + 1),
            Err(QuantumError::TruthTableEntryTooWide { .. })
        ));
    }
}
