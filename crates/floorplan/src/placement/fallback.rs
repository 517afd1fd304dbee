use crate::{geometry::Rect, rooms::RoomRequest};

use super::{PlacedRoom, collides};

/// Row-major grid used when every scored candidate collides.
///
/// The cell fits the largest requested room plus the spacing margin, so two
/// rooms in different cells never violate the margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GridFallback {
    cell_width: f64,
    cell_height: f64,
    columns: usize,
    margin: f64,
}

impl GridFallback {
    pub(crate) fn new(requests: &[RoomRequest], margin: f64, columns: usize) -> Self {
        let max_width = requests.iter().map(|r| r.width).fold(0.0, f64::max);
        let max_height = requests.iter().map(|r| r.height).fold(0.0, f64::max);
        Self {
            cell_width: max_width + margin,
            cell_height: max_height + margin,
            columns: columns.max(1),
            margin,
        }
    }

    /// Lower-left corner of slot `index`
    pub(crate) fn slot(&self, index: usize) -> (f64, f64) {
        let col = index % self.columns;
        let row = index / self.columns;
        (col as f64 * self.cell_width, row as f64 * self.cell_height)
    }

    /// First free slot for a `width` x `height` room.
    ///
    /// Terminates: the grid is unbounded and only finitely many rooms are placed.
    pub(crate) fn place(&self, width: f64, height: f64, placed: &[PlacedRoom]) -> (usize, Rect) {
        let mut index = 0;
        loop {
            let (x, y) = self.slot(index);
            let rect = Rect::new(x, y, width, height);
            if !collides(&rect, placed, self.margin) {
                return (index, rect);
            }
            index += 1;
        }
    }
}
