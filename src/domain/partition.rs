/// A grouping of balance entries into disjoint zero-sum blocks, stored as
/// one block id per entry. Block ids are dense and numbered in order of
/// each block's first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    block_of: Vec<usize>,
    blocks: usize,
}

impl Partition {
    pub(crate) fn from_assignment(block_of: Vec<usize>) -> Self {
        let blocks = block_of.iter().max().map_or(0, |&max| max + 1);
        Self { block_of, blocks }
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks == 0
    }

    pub fn block_of(&self, entry: usize) -> usize {
        self.block_of[entry]
    }

    /// Entry indices per block, each block in ascending entry order.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.blocks];
        for (entry, &block) in self.block_of.iter().enumerate() {
            groups[block].push(entry);
        }
        groups
    }
}
