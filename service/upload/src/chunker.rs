use bytes::Bytes;
use domain_upload::{
    exception::{UploadException, UploadResult},
    model::{
        entity::ItemRef,
        vo::{UploadPart, UploadTask},
    },
};

/// Default maximum part size, above the service's minimum part size.
pub const DEFAULT_PART_SIZE: usize = 6_000_000;

/// Split `payload` into one upload task per `part_size` bytes.
///
/// Parts are numbered from 1, the last one holds the remainder. Every part is a
/// view into `payload`, nothing is copied.
pub fn chunk(item: &ItemRef, payload: &Bytes, part_size: usize) -> UploadResult<Vec<UploadTask>> {
    if part_size == 0 {
        return Err(UploadException::InvalidPartSize);
    }
    let tasks = (0..payload.len())
        .step_by(part_size)
        .zip(1u64..)
        .map(|(start, index)| {
            let end = (start + part_size).min(payload.len());
            UploadTask {
                item: item.clone(),
                part: UploadPart::new(index, payload, start..end),
            }
        })
        .collect();
    Ok(tasks)
}
