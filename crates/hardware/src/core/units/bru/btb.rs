//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped table that stores target addresses for control
//! flow instructions. It is indexed by the word-aligned PC and carries no tag:
//! branches whose PCs share an index alias onto the same entry.

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Debug, Default)]
struct BtbEntry {
    /// The predicted target address.
    target: u32,
    /// Indicates if this entry has been written since reset.
    valid: bool,
}

/// Branch Target Buffer structure.
#[derive(Debug)]
pub struct Btb {
    /// The table of BTB entries.
    table: Vec<BtbEntry>,
    /// Index mask (`entries - 1`).
    mask: usize,
}

impl Btb {
    /// Creates a new Branch Target Buffer.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of entries; rounded up to a power of two.
    pub fn new(size: usize) -> Self {
        let size = size.max(1).next_power_of_two();
        Self {
            table: vec![BtbEntry::default(); size],
            mask: size - 1,
        }
    }

    /// Table index for `pc`: bits above the instruction alignment.
    pub const fn index(&self, pc: u32) -> usize {
        (pc >> 2) as usize & self.mask
    }

    /// Looks up the stored target for `pc`, if the entry was ever written.
    pub fn lookup(&self, pc: u32) -> Option<u32> {
        let e = self.table[self.index(pc)];
        e.valid.then_some(e.target)
    }

    /// Overwrites the entry for `pc` with `target`.
    pub fn update(&mut self, pc: u32, target: u32) {
        let idx = self.index(pc);
        self.table[idx] = BtbEntry {
            target,
            valid: true,
        };
    }
}
