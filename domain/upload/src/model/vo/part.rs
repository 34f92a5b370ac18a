use std::ops::Range;

use bytes::Bytes;

/// One contiguous byte range of a payload, uploaded as an independent unit.
#[derive(Debug, Clone)]
pub struct UploadPart {
    /// 1-based part number.
    pub index: u64,
    /// Position of the part in the original payload.
    pub range: Range<usize>,
    /// View into the shared payload buffer, not a copy.
    pub payload: Bytes,
}

impl UploadPart {
    /// Slices `range` out of `source` without copying.
    pub fn new(index: u64, source: &Bytes, range: Range<usize>) -> Self {
        let payload = source.slice(range.clone());
        Self {
            index,
            range,
            payload,
        }
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}
