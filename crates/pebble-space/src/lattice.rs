//! Cubic bucketing lattice over a container's bounding box.
//!
//! The box is split into cubes of side `cell_size`; along each axis the
//! slab `j` covers `(min + j·δ, min + (j+1)·δ]` and the last slab also
//! absorbs anything at or beyond the far face. Only occupied cells are
//! stored, so a tiny `δ` costs index range, not memory.
//!
//! The lattice is rebuilt from scratch each relaxation round because every
//! round moves pebbles.

use crate::bounds::BoundingBox;
use crate::error::SpaceError;
use indexmap::IndexMap;
use pebble_core::Position;
use smallvec::SmallVec;

/// Integer grid index of a lattice cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Slab index along `x`.
    pub ix: i32,
    /// Slab index along `y`.
    pub iy: i32,
    /// Slab index along `z`.
    pub iz: i32,
}

impl CellKey {
    /// Construct a key from its three slab indices.
    pub fn new(ix: i32, iy: i32, iz: i32) -> Self {
        Self { ix, iy, iz }
    }
}

/// Pebble indices bucketed by lattice cell.
///
/// Buckets are insertion-ordered (first pebble to land in a cell fixes the
/// cell's position in [`cells`](Lattice::cells)), which keeps every
/// downstream traversal deterministic for a given position set.
#[derive(Clone, Debug)]
pub struct Lattice {
    min: Position,
    cell_size: f64,
    dims: [i32; 3],
    cells: IndexMap<CellKey, Vec<usize>>,
}

impl Lattice {
    /// Maximum cell count along one axis: slab indices are `i32`.
    pub const MAX_DIM: u64 = i32::MAX as u64;

    /// Bucket every position into its cell.
    ///
    /// Grid extents are `ceil(extent / cell_size)` per axis (at least one).
    ///
    /// Returns `Err(SpaceError::InvalidCellSize)` if `cell_size` is not
    /// finite and positive, or `Err(SpaceError::DimensionTooLarge)` if an
    /// axis would need more than [`MAX_DIM`](Self::MAX_DIM) cells.
    pub fn build(
        bbox: &BoundingBox,
        positions: &[Position],
        cell_size: f64,
    ) -> Result<Self, SpaceError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(SpaceError::InvalidCellSize { value: cell_size });
        }
        let mut dims = [1i32; 3];
        for (axis, (name, dim)) in ["x", "y", "z"].into_iter().zip(dims.iter_mut()).enumerate() {
            let count = (bbox.extent[axis] / cell_size).ceil().max(1.0);
            if count > Self::MAX_DIM as f64 {
                return Err(SpaceError::DimensionTooLarge {
                    axis: name,
                    value: count,
                    max: Self::MAX_DIM,
                });
            }
            *dim = count as i32;
        }

        let mut lattice = Self {
            min: bbox.min,
            cell_size,
            dims,
            cells: IndexMap::new(),
        };
        for (index, p) in positions.iter().enumerate() {
            let key = lattice.cell_of(p);
            lattice.cells.entry(key).or_default().push(index);
        }
        Ok(lattice)
    }

    /// Cell that `p` falls in.
    pub fn cell_of(&self, p: &Position) -> CellKey {
        CellKey {
            ix: slab_index(p.x, self.min.x, self.cell_size, self.dims[0]),
            iy: slab_index(p.y, self.min.y, self.cell_size, self.dims[1]),
            iz: slab_index(p.z, self.min.z, self.cell_size, self.dims[2]),
        }
    }

    /// Side length of every cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Grid extents `[Mx, My, Mz]`.
    pub fn dims(&self) -> [i32; 3] {
        self.dims
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    /// Pebble indices in `key`, if the cell is occupied.
    pub fn get(&self, key: &CellKey) -> Option<&[usize]> {
        self.cells.get(key).map(Vec::as_slice)
    }

    /// Occupied cells and their pebble indices, in first-occupied order.
    pub fn cells(&self) -> impl Iterator<Item = (&CellKey, &[usize])> {
        self.cells.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Occupied cells in the Moore neighbourhood of `key`, `key` included.
    ///
    /// Offsets are visited in a fixed `dz, dy, dx` order.
    pub fn moore_neighbourhood(&self, key: &CellKey) -> SmallVec<[CellKey; 27]> {
        let mut out = SmallVec::new();
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let n = CellKey::new(key.ix + dx, key.iy + dy, key.iz + dz);
                    if self.cells.contains_key(&n) {
                        out.push(n);
                    }
                }
            }
        }
        out
    }

    /// Pebble indices in the Moore neighbourhood of `key`, written into `out`.
    ///
    /// `out` is cleared first so callers can reuse one buffer across cells.
    pub fn gather_neighbourhood(&self, key: &CellKey, out: &mut Vec<usize>) {
        out.clear();
        for n in self.moore_neighbourhood(key) {
            if let Some(bucket) = self.get(&n) {
                out.extend_from_slice(bucket);
            }
        }
    }
}

/// Slab along one axis holding `coord`: `ceil((coord - min) / δ) - 1`,
/// clamped into `[0, dim)`.
fn slab_index(coord: f64, min: f64, cell_size: f64, dim: i32) -> i32 {
    let raw = ((coord - min) / cell_size).ceil() - 1.0;
    if raw.is_nan() || raw < 0.0 {
        0
    } else if raw >= f64::from(dim - 1) {
        dim - 1
    } else {
        raw as i32
    }
}
