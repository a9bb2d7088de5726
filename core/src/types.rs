use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`, `x` being the column and `y` the row.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount) * (b as CellCount)
}

/// Whether `coords` lies inside a board of the given `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (dim_x, dim_y) = self.dim();
        // dimensions always come from a `Coord2`, so they fit
        let size = (dim_x as Coord, dim_y as Coord);
        NeighborIter::new(index, size)
    }
}

const DISPLACEMENTS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i32, i32), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;

    let next = (next_x, next_y);
    in_bounds(next, bounds).then_some(next)
}

/// Iterates the up to 8 in-bounds neighbors of a cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();

        assert_eq!(neighbors, vec![(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn center_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn far_edge_is_clipped() {
        let neighbors: Vec<_> = NeighborIter::new((4, 0), (5, 2)).collect();

        assert_eq!(neighbors, vec![(3, 0), (3, 1), (4, 1)]);
    }
}
