/// Append-only store of sample blocks for one channel.
///
/// Blocks are kept as delivered and only concatenated on `merge`, so
/// appending never copies previously buffered audio.
#[derive(Debug, Default, Clone)]
pub struct SampleBuffer {
    blocks: Vec<Vec<f32>>,
    len: usize,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a copy of `block` after everything buffered so far.
    pub fn append(&mut self, block: &[f32]) {
        self.blocks.push(block.to_vec());
        self.len += block.len();
    }

    /// Concatenate all blocks in arrival order.
    pub fn merge(&self) -> Vec<f32> {
        let mut merged = Vec::with_capacity(self.len);
        for block in &self.blocks {
            merged.extend_from_slice(block);
        }
        merged
    }

    /// Drop every block and zero the running length.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.len = 0;
    }

    /// Total number of samples buffered.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
