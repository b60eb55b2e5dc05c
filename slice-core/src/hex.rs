//! Hex-grid coordinates and the position-order tables used to place tiles.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A hex cell. `x` and `y` are axial axes; `z` is carried through untouched
/// for consumers that expect three components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Number of steps between two cells, ignoring `z`.
    pub fn distance(&self, other: &Coordinate) -> u32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        ((dx.abs() + (dx + dy).abs() + dy.abs()) / 2) as u32
    }
}

impl Add for Coordinate {
    type Output = Coordinate;
    fn add(self, rhs: Coordinate) -> Self::Output {
        Coordinate::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;
    fn sub(self, rhs: Coordinate) -> Self::Output {
        Coordinate::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Coordinate {
    type Output = Coordinate;
    fn mul(self, rhs: i32) -> Self::Output {
        Coordinate::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Clockwise neighbour directions; walking a ring starts at `-x`.
const DIRECTIONS: [Coordinate; 6] = [
    Coordinate::new(1, -1, 0),
    Coordinate::new(1, 0, 0),
    Coordinate::new(0, 1, 0),
    Coordinate::new(-1, 1, 0),
    Coordinate::new(-1, 0, 0),
    Coordinate::new(0, -1, 0),
];

/// Layout of a single drafted slice: the home system followed by its
/// three forward neighbours.
pub const SLICE_POSITION_ORDER: [Coordinate; 4] = [
    Coordinate::new(0, 0, 0),
    Coordinate::new(-1, 0, 0),
    Coordinate::new(0, -1, 0),
    Coordinate::new(1, -1, 0),
];

/// Rings on a standard six-player board, not counting the center.
pub const STANDARD_MAP_RINGS: u32 = 3;

/// Cells exactly `radius` steps from the origin, clockwise from `(-radius, 0)`.
pub fn ring(radius: u32) -> Vec<Coordinate> {
    if radius == 0 {
        return vec![Coordinate::ORIGIN];
    }

    let radius = radius as i32;
    let mut cells = Vec::with_capacity(6 * radius as usize);
    let mut cell = DIRECTIONS[4] * radius;
    for direction in DIRECTIONS {
        for _ in 0..radius {
            cells.push(cell);
            cell = cell + direction;
        }
    }
    cells
}

/// The origin followed by every ring out to `rings`, innermost first.
pub fn spiral(rings: u32) -> Vec<Coordinate> {
    (0..=rings).flat_map(ring).collect()
}

/// Placement order for a full map string.
pub fn standard_map_order() -> Vec<Coordinate> {
    spiral(STANDARD_MAP_RINGS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_sizes() {
        assert_eq!(ring(0), vec![Coordinate::ORIGIN]);
        assert_eq!(ring(1).len(), 6);
        assert_eq!(ring(2).len(), 12);
        assert_eq!(ring(3).len(), 18);
    }

    #[test]
    fn ring_cells_are_at_exact_distance() {
        for radius in 1..=4 {
            assert!(ring(radius)
                .iter()
                .all(|c| c.distance(&Coordinate::ORIGIN) == radius));
        }
    }

    #[test]
    fn spiral_starts_with_slice_layout() {
        let order = spiral(1);
        assert_eq!(&order[..4], &SLICE_POSITION_ORDER[..]);
    }

    #[test]
    fn standard_order_covers_board_without_repeats() {
        let mut order = standard_map_order();
        assert_eq!(order.len(), 37);
        order.sort();
        order.dedup();
        assert_eq!(order.len(), 37);
    }

    #[test]
    fn distance_ignores_z() {
        let a = Coordinate::new(2, -1, 5);
        let b = Coordinate::new(-1, 1, 0);
        assert_eq!(a.distance(&b), 3);
        assert_eq!(a - a, Coordinate::ORIGIN);
    }
}
