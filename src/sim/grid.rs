//! Grid map geometry for walls, triggers and spawn markers
//!
//! A level is an axis-aligned grid of uniform square cells. Cell `(row, col)`
//! has its center at world `(col * cell_size - offset.x, row * cell_size - offset.y)`.
//! Walls and triggers are derived from the cells at load time, enumerated in
//! row-major order so spawn sampling stays reproducible.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Cell types, with their map codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellKind {
    /// Open floor (code 0)
    #[default]
    Empty,
    /// Solid wall block (code 1)
    Wall,
    /// Quiz trigger (code 2)
    Trigger,
    /// Player start (code 9)
    Spawn,
}

impl CellKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CellKind::Empty),
            1 => Some(CellKind::Wall),
            2 => Some(CellKind::Trigger),
            9 => Some(CellKind::Spawn),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            CellKind::Empty => 0,
            CellKind::Wall => 1,
            CellKind::Trigger => 2,
            CellKind::Spawn => 9,
        }
    }
}

/// Static cell array for one level (immutable once loaded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridMap {
    width: usize,
    height: usize,
    /// Row-major cells
    cells: Vec<CellKind>,
    /// World units per cell
    cell_size: f32,
    /// World translation subtracted from scaled grid coordinates
    origin_offset: Vec2,
}

impl GridMap {
    /// Parse a map from rows of cell codes.
    ///
    /// Rejects empty or ragged maps, unknown codes, and maps whose outer ring
    /// is not entirely wall.
    pub fn from_codes<R: AsRef<[u8]>>(
        rows: &[R],
        cell_size: f32,
        origin_offset: Vec2,
    ) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(Error::EmptyMap);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, codes) in rows.iter().enumerate() {
            let codes = codes.as_ref();
            if codes.len() != width {
                return Err(Error::RaggedMap {
                    row,
                    expected: width,
                    found: codes.len(),
                });
            }
            for (col, &code) in codes.iter().enumerate() {
                let kind = CellKind::from_code(code).ok_or(Error::UnknownCell { row, col, code })?;
                let border = row == 0 || col == 0 || row == height - 1 || col == width - 1;
                if border && kind != CellKind::Wall {
                    return Err(Error::OpenBoundary { row, col });
                }
                cells.push(kind);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            cell_size,
            origin_offset,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn origin_offset(&self) -> Vec2 {
        self.origin_offset
    }

    /// Cell type at `(row, col)`, or `None` outside the grid
    pub fn cell_at(&self, row: usize, col: usize) -> Option<CellKind> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    /// World-space center of cell `(row, col)`
    #[inline]
    pub fn world_position(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(
            col as f32 * self.cell_size - self.origin_offset.x,
            row as f32 * self.cell_size - self.origin_offset.y,
        )
    }

    /// Grid cell containing a world position, if it lies on the map
    pub fn cell_of(&self, pos: Vec2) -> Option<(usize, usize)> {
        let col = ((pos.x + self.origin_offset.x) / self.cell_size).round();
        let row = ((pos.y + self.origin_offset.y) / self.cell_size).round();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.height && col < self.width).then_some((row, col))
    }

    /// Row-major `(row, col)` coordinates of every cell of the given kind
    pub fn cells_of(&self, kind: CellKind) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == kind)
            .map(move |(i, _)| (i / width, i % width))
    }

    /// One wall box per wall cell
    pub fn walls(&self) -> Vec<Wall> {
        let half_extent = self.cell_size / 2.0;
        self.cells_of(CellKind::Wall)
            .map(|(row, col)| Wall {
                center: self.world_position(row, col),
                half_extent,
            })
            .collect()
    }

    /// One armed trigger per trigger cell, ids assigned in row-major order
    pub fn triggers(&self, level_index: u32) -> Vec<Trigger> {
        self.cells_of(CellKind::Trigger)
            .enumerate()
            .map(|(i, (row, col))| Trigger {
                id: i as u32,
                row,
                col,
                position: self.world_position(row, col),
                active: true,
                level_index,
            })
            .collect()
    }

    /// First spawn marker in row-major order
    pub fn spawn_point(&self) -> Option<Vec2> {
        self.cells_of(CellKind::Spawn)
            .next()
            .map(|(row, col)| self.world_position(row, col))
    }

    /// Centers of all open floor cells (enemy spawn candidates)
    pub fn open_cells(&self) -> Vec<Vec2> {
        self.cells_of(CellKind::Empty)
            .map(|(row, col)| self.world_position(row, col))
            .collect()
    }
}

/// Axis-aligned square wall block on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub center: Vec2,
    pub half_extent: f32,
}

/// Faces of a wall box, in tie-break priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// `-x` face
    Left,
    /// `+x` face
    Right,
    /// `-z` face
    Top,
    /// `+z` face
    Bottom,
}

impl Face {
    /// Outward unit normal
    pub fn normal(self) -> Vec2 {
        match self {
            Face::Left => Vec2::NEG_X,
            Face::Right => Vec2::X,
            Face::Top => Vec2::NEG_Y,
            Face::Bottom => Vec2::Y,
        }
    }
}

impl Wall {
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - Vec2::splat(self.half_extent)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + Vec2::splat(self.half_extent)
    }

    /// Closest point on (or in) the box to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    /// Nearest face to an interior point and the distance to it.
    ///
    /// Equal distances resolve in `Left, Right, Top, Bottom` order.
    pub fn nearest_face(&self, p: Vec2) -> (Face, f32) {
        self.nearest_face_where(p, |_| true)
            .unwrap_or((Face::Left, p.x - self.min().x))
    }

    /// Like [`Wall::nearest_face`], but only among faces accepted by `open`
    pub fn nearest_face_where(&self, p: Vec2, open: impl Fn(Face) -> bool) -> Option<(Face, f32)> {
        let (min, max) = (self.min(), self.max());
        [
            (Face::Left, p.x - min.x),
            (Face::Right, max.x - p.x),
            (Face::Top, p.y - min.y),
            (Face::Bottom, max.y - p.y),
        ]
        .into_iter()
        .filter(|(face, _)| open(*face))
        .fold(None, |best: Option<(Face, f32)>, candidate| match best {
            Some(b) if b.1 <= candidate.1 => Some(b),
            _ => Some(candidate),
        })
    }

    /// Whether `other` is the same-sized box sitting flush against `face`
    pub fn is_flush_neighbor(&self, other: &Wall, face: Face) -> bool {
        let expected = self.center + face.normal() * (self.half_extent + other.half_extent);
        (self.half_extent - other.half_extent).abs() < 1e-3
            && other.center.distance_squared(expected) < 1e-6
    }

    /// Entry distance of a ray into the box (slab method).
    ///
    /// `dir` must be normalized. Only front faces count: a ray starting inside
    /// the box does not hit it.
    pub fn ray_distance(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> Option<f32> {
        let (min, max) = (self.min(), self.max());
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        for (o, d, lo, hi) in [(origin.x, dir.x, min.x, max.x), (origin.y, dir.y, min.y, max.y)] {
            if d.abs() < 1e-8 {
                // Parallel to this slab: must already be inside it
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (t1, t2) = ((lo - o) * inv, (hi - o) * inv);
            let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            t_enter = t_enter.max(near);
            t_exit = t_exit.min(far);
        }

        (t_enter >= 0.0 && t_enter <= t_exit && t_enter <= max_distance).then_some(t_enter)
    }
}

/// A quiz trigger derived from a trigger cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: u32,
    pub row: usize,
    pub col: usize,
    pub position: Vec2,
    /// Cleared permanently on a correct answer
    pub active: bool,
    /// Level whose questions this trigger asks
    pub level_index: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: [[u8; 5]; 5] = [
        [1, 1, 1, 1, 1],
        [1, 9, 0, 2, 1],
        [1, 0, 1, 0, 1],
        [1, 2, 0, 0, 1],
        [1, 1, 1, 1, 1],
    ];

    fn small_map() -> GridMap {
        GridMap::from_codes(&SMALL, 4.0, Vec2::splat(8.0)).unwrap()
    }

    #[test]
    fn test_world_position() {
        let map = small_map();
        assert_eq!(map.world_position(0, 0), Vec2::new(-8.0, -8.0));
        assert_eq!(map.world_position(2, 2), Vec2::ZERO);
        assert_eq!(map.world_position(1, 3), Vec2::new(4.0, -4.0));
    }

    #[test]
    fn test_cell_at() {
        let map = small_map();
        assert_eq!(map.cell_at(1, 1), Some(CellKind::Spawn));
        assert_eq!(map.cell_at(1, 3), Some(CellKind::Trigger));
        assert_eq!(map.cell_at(2, 2), Some(CellKind::Wall));
        assert_eq!(map.cell_at(5, 0), None);
    }

    #[test]
    fn test_cell_of_round_trips_centers() {
        let map = small_map();
        assert_eq!(map.cell_of(map.world_position(3, 2)), Some((3, 2)));
        assert_eq!(map.cell_of(Vec2::new(-100.0, 0.0)), None);
    }

    #[test]
    fn test_walls_and_triggers_row_major() {
        let map = small_map();
        // 16 border cells + 1 interior
        assert_eq!(map.walls().len(), 17);

        let triggers = map.triggers(1);
        assert_eq!(triggers.len(), 2);
        assert_eq!((triggers[0].row, triggers[0].col), (1, 3));
        assert_eq!((triggers[1].row, triggers[1].col), (3, 1));
        assert_eq!(triggers[1].id, 1);
        assert!(triggers.iter().all(|t| t.active && t.level_index == 1));
    }

    #[test]
    fn test_spawn_and_open_cells() {
        let map = small_map();
        assert_eq!(map.spawn_point(), Some(Vec2::new(-4.0, -4.0)));
        let open = map.open_cells();
        assert_eq!(
            open,
            vec![
                map.world_position(1, 2),
                map.world_position(2, 1),
                map.world_position(2, 3),
                map.world_position(3, 2),
                map.world_position(3, 3),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_bad_maps() {
        let empty: [[u8; 3]; 0] = [];
        assert!(matches!(
            GridMap::from_codes(&empty, 4.0, Vec2::ZERO),
            Err(Error::EmptyMap)
        ));

        let ragged: Vec<Vec<u8>> = vec![vec![1, 1, 1], vec![1, 1], vec![1, 1, 1]];
        assert!(matches!(
            GridMap::from_codes(ragged.as_slice(), 4.0, Vec2::ZERO),
            Err(Error::RaggedMap { row: 1, .. })
        ));

        let unknown: [[u8; 3]; 3] = [[1, 1, 1], [1, 5, 1], [1, 1, 1]];
        assert!(matches!(
            GridMap::from_codes(&unknown, 4.0, Vec2::ZERO),
            Err(Error::UnknownCell { code: 5, .. })
        ));

        let open: [[u8; 3]; 3] = [[1, 1, 1], [0, 0, 1], [1, 1, 1]];
        assert!(matches!(
            GridMap::from_codes(&open, 4.0, Vec2::ZERO),
            Err(Error::OpenBoundary { row: 1, col: 0 })
        ));
    }

    #[test]
    fn test_wall_ray_distance() {
        let wall = Wall {
            center: Vec2::new(5.0, 0.0),
            half_extent: 1.0,
        };
        let d = wall.ray_distance(Vec2::ZERO, Vec2::X, 10.0).unwrap();
        assert!((d - 4.0).abs() < 1e-6);

        // Out of range, pointing away, passing beside
        assert!(wall.ray_distance(Vec2::ZERO, Vec2::X, 3.0).is_none());
        assert!(wall.ray_distance(Vec2::ZERO, -Vec2::X, 10.0).is_none());
        assert!(wall.ray_distance(Vec2::new(0.0, 2.0), Vec2::X, 10.0).is_none());

        // Starting inside never hits
        assert!(wall.ray_distance(Vec2::new(5.0, 0.0), Vec2::X, 10.0).is_none());
    }

    #[test]
    fn test_nearest_face_tie_break() {
        let wall = Wall {
            center: Vec2::ZERO,
            half_extent: 2.0,
        };
        // Dead center: all four faces tie, left wins
        assert_eq!(wall.nearest_face(Vec2::ZERO), (Face::Left, 2.0));
        // Right and bottom tie, right wins
        assert_eq!(wall.nearest_face(Vec2::new(1.5, 1.5)).0, Face::Right);
        assert_eq!(wall.nearest_face(Vec2::new(0.0, -1.9)).0, Face::Top);
    }

    #[test]
    fn test_nearest_face_skips_closed_faces() {
        let wall = Wall {
            center: Vec2::ZERO,
            half_extent: 2.0,
        };
        let p = Vec2::new(1.9, 0.0);
        assert_eq!(wall.nearest_face(p).0, Face::Right);
        assert_eq!(
            wall.nearest_face_where(p, |f| f != Face::Right).map(|(f, _)| f),
            Some(Face::Top)
        );
        assert_eq!(wall.nearest_face_where(p, |_| false), None);
    }

    #[test]
    fn test_flush_neighbors_from_map() {
        let map = small_map();
        let walls = map.walls();
        let corner = walls[0];
        // Top-left corner touches the next border cell on the right and below
        assert!(walls.iter().any(|w| corner.is_flush_neighbor(w, Face::Right)));
        assert!(walls.iter().any(|w| corner.is_flush_neighbor(w, Face::Bottom)));
        assert!(!walls.iter().any(|w| corner.is_flush_neighbor(w, Face::Left)));
    }
}
