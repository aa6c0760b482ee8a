use ndarray::Array2;

use crate::error::{Error, Result};

pub mod two_bit;
pub use two_bit::TwoBitDirections;

/// One direction matrix cell: where the best path into the cell came from.
///
/// Two bits suffice; the discriminants are the stable packed encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    /// End of the alignment.
    #[default]
    Stop = 0,
    /// Deletion: consumes a reference base only.
    Left = 1,
    /// Insertion: consumes a query base only.
    Up = 2,
    /// Substitution or match: consumes one base of each.
    Diag = 3,
}

impl Direction {
    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Direction::Stop,
            1 => Direction::Left,
            2 => Direction::Up,
            _ => Direction::Diag,
        }
    }
}

/// Flat index of a cell in a `(qry_len + 1) x (ref_len + 1)` matrix. Row 0
/// and column 0 are the gap row and gap column.
#[inline]
pub fn cell_index(row: usize, column: usize, ref_len: usize) -> usize {
    row * (ref_len + 1) + column
}

/// Inverse of [`cell_index`]: `(row, column)`.
#[inline]
pub fn cell_coordinates(index: usize, ref_len: usize) -> (usize, usize) {
    (index / (ref_len + 1), index % (ref_len + 1))
}

/// Backing storage for a direction matrix.
///
/// Two implementations exist: [`ByteDirections`] (one byte per cell) and
/// [`TwoBitDirections`] (four cells per byte). Traceback reads through this
/// trait only, and both must yield byte-identical alignments.
pub trait DirectionStore: Sized {
    /// Allocates a `rows x columns` matrix of `Stop` cells, surfacing
    /// allocation failure as an error.
    fn try_new(rows: usize, columns: usize) -> Result<Self>;

    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    fn get(&self, row: usize, column: usize) -> Direction;

    fn set(&mut self, row: usize, column: usize, direction: Direction);

    /// Cursor over every cell in row-major order.
    fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.columns()).map(move |column| self.get(row, column))
        })
    }
}

/// One byte per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteDirections {
    cells: Array2<Direction>,
}

impl DirectionStore for ByteDirections {
    fn try_new(rows: usize, columns: usize) -> Result<Self> {
        let buffer = try_vec(Direction::Stop, rows * columns)?;
        let cells = Array2::from_shape_vec((rows, columns), buffer)
            .expect("buffer length matches the requested shape");
        Ok(Self { cells })
    }

    fn rows(&self) -> usize {
        self.cells.dim().0
    }

    fn columns(&self) -> usize {
        self.cells.dim().1
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> Direction {
        self.cells[[row, column]]
    }

    #[inline]
    fn set(&mut self, row: usize, column: usize, direction: Direction) {
        self.cells[[row, column]] = direction;
    }
}

/// A filled direction matrix plus the coordinates a traceback needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentMatrix<Store> {
    directions: Store,
    ref_len: usize,
    qry_len: usize,
    ref_offset: usize,
    qry_offset: usize,
    best_score: i32,
    best_end_index: usize,
}

impl<Store: DirectionStore> AlignmentMatrix<Store> {
    pub(crate) fn new(
        directions: Store,
        ref_len: usize,
        qry_len: usize,
        ref_offset: usize,
        qry_offset: usize,
        best_score: i32,
        best_end_index: usize,
    ) -> Self {
        Self {
            directions,
            ref_len,
            qry_len,
            ref_offset,
            qry_offset,
            best_score,
            best_end_index,
        }
    }

    pub fn directions(&self) -> &Store {
        &self.directions
    }

    /// Number of reference bases covered by the matrix.
    pub fn ref_len(&self) -> usize {
        self.ref_len
    }

    /// Number of query bases covered by the matrix.
    pub fn qry_len(&self) -> usize {
        self.qry_len
    }

    pub fn ref_offset(&self) -> usize {
        self.ref_offset
    }

    pub fn qry_offset(&self) -> usize {
        self.qry_offset
    }

    /// Best alignment score: the bottom-right cell for a global alignment,
    /// the overall maximum for a local one.
    pub fn best_score(&self) -> i32 {
        self.best_score
    }

    /// Cell index where the best alignment ends.
    pub fn best_end_index(&self) -> usize {
        self.best_end_index
    }
}

/// Allocates a filled `Vec`, turning allocator refusal into
/// [`Error::OutOfMemory`] instead of an abort.
pub(crate) fn try_vec<T: Clone>(value: T, len: usize) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| Error::OutOfMemory {
        requested: len * std::mem::size_of::<T>(),
    })?;
    buffer.resize(len, value);
    Ok(buffer)
}
