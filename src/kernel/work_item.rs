// One unit of parallel work, owning exactly one output pixel.
// Work-items are enumerated column-major (`column = id / height`, `row = id % height`) while the
// output image is stored row-major. Pixel placement depends on both halves of that mapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorkItem {
    pub global_id: usize,
    pub column: usize,
    pub row: usize,
}

pub const CHANNELS: usize = 3;

impl WorkItem {
    pub fn from_global_id(global_id: usize, height: usize) -> WorkItem {
        WorkItem {
            global_id,
            column: global_id / height,
            row: global_id % height,
        }
    }

    // the work-item whose output lands in row-major pixel `slot`.
    pub fn owning_slot(slot: usize, width: usize, height: usize) -> WorkItem {
        let (row, column) = (slot / width, slot % width);
        WorkItem::from_global_id(column * height + row, height)
    }

    // index of this item's red channel in the output buffer.
    pub fn output_offset(&self, width: usize) -> usize {
        (self.row * width + self.column) * CHANNELS
    }
}
