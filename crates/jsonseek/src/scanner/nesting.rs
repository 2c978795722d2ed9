use alloc::vec::Vec;

const INLINE_LEVELS: usize = u128::BITS as usize;

/// Stack of open container delimiters, one bit per level (`1` = object).
///
/// The first 128 levels live inline; deeper documents spill into a vector.
#[derive(Debug, Default)]
pub(crate) struct Nesting {
    depth: usize,
    inline: u128,
    spill: Vec<u128>,
}

impl Nesting {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Records an opening `{` or `[`.
    pub fn push(&mut self, open: u8) {
        let bit = u128::from(open == b'{');
        let level = self.depth;
        if level < INLINE_LEVELS {
            self.inline = (self.inline & !(1 << level)) | (bit << level);
        } else {
            let (word, shift) = Self::spill_slot(level);
            if word == self.spill.len() {
                self.spill.push(0);
            }
            let slot = &mut self.spill[word];
            *slot = (*slot & !(1 << shift)) | (bit << shift);
        }
        self.depth += 1;
    }

    /// Pops the innermost opening delimiter.
    pub fn pop(&mut self) -> Option<u8> {
        self.depth = self.depth.checked_sub(1)?;
        let level = self.depth;
        let is_object = if level < INLINE_LEVELS {
            (self.inline >> level) & 1 == 1
        } else {
            let (word, shift) = Self::spill_slot(level);
            (self.spill[word] >> shift) & 1 == 1
        };
        Some(if is_object { b'{' } else { b'[' })
    }

    fn spill_slot(level: usize) -> (usize, usize) {
        let level = level - INLINE_LEVELS;
        (level / INLINE_LEVELS, level % INLINE_LEVELS)
    }
}
