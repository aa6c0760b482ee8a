use super::{Direction, DirectionStore, try_vec};
use crate::error::Result;

/// Four direction cells per byte, row-major.
///
/// A limb holds cells `4k..4k + 3`, the cell's two bits sitting at
/// `2 * (index % 4)` from the limb's low end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoBitDirections {
    limbs: Vec<u8>,
    rows: usize,
    columns: usize,
}

impl TwoBitDirections {
    #[inline]
    fn split(&self, row: usize, column: usize) -> (usize, u32) {
        let index = row * self.columns + column;
        (index / 4, (index % 4) as u32 * 2)
    }

    /// Sequential reader over the packed stream, one limb fetch per four
    /// cells.
    pub fn cursor(&self) -> TwoBitCursor<'_> {
        TwoBitCursor {
            store: self,
            index: 0,
        }
    }
}

impl DirectionStore for TwoBitDirections {
    fn try_new(rows: usize, columns: usize) -> Result<Self> {
        let cells = rows * columns;
        let limbs = try_vec(0u8, cells.div_ceil(4))?;
        Ok(Self {
            limbs,
            rows,
            columns,
        })
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> Direction {
        let (limb, shift) = self.split(row, column);
        Direction::from_bits(self.limbs[limb] >> shift)
    }

    #[inline]
    fn set(&mut self, row: usize, column: usize, direction: Direction) {
        let (limb, shift) = self.split(row, column);
        self.limbs[limb] &= !(0b11 << shift);
        self.limbs[limb] |= direction.bits() << shift;
    }

    fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.cursor()
    }
}

/// Iterator form of the packed stream: shifts through each limb instead of
/// recomputing the cell split.
pub struct TwoBitCursor<'store> {
    store: &'store TwoBitDirections,
    index: usize,
}

impl Iterator for TwoBitCursor<'_> {
    type Item = Direction;

    fn next(&mut self) -> Option<Direction> {
        if self.index >= self.store.rows * self.store.columns {
            return None;
        }

        let limb = self.store.limbs[self.index / 4];
        let direction = Direction::from_bits(limb >> ((self.index % 4) * 2));
        self.index += 1;
        Some(direction)
    }
}
