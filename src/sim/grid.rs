//! Cell ownership grid
//!
//! The grid is the single source of truth for who owns what. Ownership is
//! stored twice (a flat owner array for O(1) lookups, and an ordered cell set
//! per agent for iteration) and every mutation goes through `claim`/`release`
//! so the two views can never disagree.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Integer cell coordinate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Stable agent identifier (index into the roster, i.e. creation order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl AgentId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Square world grid with exclusive cell ownership
#[derive(Debug, Clone)]
pub struct Grid {
    size: i32,
    /// Row-major owner per cell
    owners: Vec<Option<AgentId>>,
    /// Cells owned by each agent, indexed by `AgentId`
    territories: Vec<BTreeSet<Cell>>,
}

impl Grid {
    pub fn new(size: i32, agent_count: usize) -> Self {
        let side = size.max(0) as usize;
        Self {
            size,
            owners: vec![None; side * side],
            territories: vec![BTreeSet::new(); agent_count],
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.size && cell.y < self.size
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        (cell.y * self.size + cell.x) as usize
    }

    /// Owner of a cell, `None` if unclaimed or off the world
    pub fn owner_of(&self, cell: Cell) -> Option<AgentId> {
        if !self.in_bounds(cell) {
            return None;
        }
        self.owners[self.index(cell)]
    }

    pub fn owns(&self, id: AgentId, cell: Cell) -> bool {
        self.owner_of(cell) == Some(id)
    }

    /// Give `cell` to `id`, taking it away from any previous owner.
    /// Returns the previous owner if it was someone else.
    pub fn claim(&mut self, cell: Cell, id: AgentId) -> Option<AgentId> {
        debug_assert!(self.in_bounds(cell), "claim outside world: {cell:?}");
        if !self.in_bounds(cell) {
            return None;
        }
        let idx = self.index(cell);
        let previous = self.owners[idx].replace(id);
        match previous {
            Some(prev) if prev == id => None,
            Some(prev) => {
                self.territories[prev.index()].remove(&cell);
                self.territories[id.index()].insert(cell);
                Some(prev)
            }
            None => {
                self.territories[id.index()].insert(cell);
                None
            }
        }
    }

    /// Vacate every cell owned by `id`. Returns how many cells were freed.
    pub fn release(&mut self, id: AgentId) -> usize {
        let cells = std::mem::take(&mut self.territories[id.index()]);
        for cell in &cells {
            let idx = self.index(*cell);
            self.owners[idx] = None;
        }
        cells.len()
    }

    /// Claim the (2r+1)² block around `center`, clipped to the world
    pub fn stamp_square(&mut self, center: Cell, radius: i32, id: AgentId) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let cell = center.offset(dx, dy);
                if self.in_bounds(cell) {
                    self.claim(cell, id);
                }
            }
        }
    }

    /// True if every cell within `radius` of `center` is on the world and unclaimed
    pub fn is_region_clear(&self, center: Cell, radius: i32) -> bool {
        (-radius..=radius).all(|dy| {
            (-radius..=radius).all(|dx| {
                let cell = center.offset(dx, dy);
                self.in_bounds(cell) && self.owners[self.index(cell)].is_none()
            })
        })
    }

    pub fn territory(&self, id: AgentId) -> &BTreeSet<Cell> {
        &self.territories[id.index()]
    }

    pub fn territory_len(&self, id: AgentId) -> usize {
        self.territories[id.index()].len()
    }

    pub fn claimed_cells(&self) -> usize {
        self.territories.iter().map(BTreeSet::len).sum()
    }

    /// Verify the owner array and the per-agent sets describe the same ownership
    pub fn is_consistent(&self) -> bool {
        let forward = self.territories.iter().enumerate().all(|(i, cells)| {
            cells
                .iter()
                .all(|c| self.in_bounds(*c) && self.owners[self.index(*c)] == Some(AgentId(i as u32)))
        });
        let claimed = self.owners.iter().filter(|o| o.is_some()).count();
        forward && claimed == self.claimed_cells()
    }

    /// Drop all ownership
    pub fn clear(&mut self) {
        self.owners.iter_mut().for_each(|o| *o = None);
        self.territories.iter_mut().for_each(BTreeSet::clear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: AgentId = AgentId(0);
    const B: AgentId = AgentId(1);

    #[test]
    fn test_claim_transfers_ownership() {
        let mut grid = Grid::new(10, 2);
        let cell = Cell::new(3, 4);

        assert_eq!(grid.claim(cell, A), None);
        assert!(grid.owns(A, cell));

        assert_eq!(grid.claim(cell, B), Some(A));
        assert_eq!(grid.owner_of(cell), Some(B));
        assert!(!grid.territory(A).contains(&cell));
        assert!(grid.territory(B).contains(&cell));
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_reclaim_by_same_owner_is_noop() {
        let mut grid = Grid::new(10, 1);
        grid.claim(Cell::new(1, 1), A);
        assert_eq!(grid.claim(Cell::new(1, 1), A), None);
        assert_eq!(grid.territory_len(A), 1);
    }

    #[test]
    fn test_release_vacates_only_that_agent() {
        let mut grid = Grid::new(10, 2);
        grid.stamp_square(Cell::new(2, 2), 1, A);
        grid.stamp_square(Cell::new(7, 7), 1, B);

        assert_eq!(grid.release(A), 9);
        assert_eq!(grid.territory_len(A), 0);
        assert_eq!(grid.owner_of(Cell::new(2, 2)), None);
        assert_eq!(grid.territory_len(B), 9);
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_stamp_square_clips_at_corner() {
        let mut grid = Grid::new(10, 1);
        grid.stamp_square(Cell::new(0, 0), 3, A);
        // Only the 4x4 in-bounds quadrant survives
        assert_eq!(grid.territory_len(A), 16);
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_region_clear_checks_bounds_and_owners() {
        let mut grid = Grid::new(20, 1);
        assert!(grid.is_region_clear(Cell::new(10, 10), 4));
        assert!(!grid.is_region_clear(Cell::new(2, 10), 4));

        grid.claim(Cell::new(13, 13), A);
        assert!(!grid.is_region_clear(Cell::new(10, 10), 4));
        assert!(grid.is_region_clear(Cell::new(5, 5), 4));
    }

    #[test]
    fn test_out_of_bounds_lookup_is_unowned() {
        let grid = Grid::new(5, 1);
        assert_eq!(grid.owner_of(Cell::new(-1, 0)), None);
        assert_eq!(grid.owner_of(Cell::new(0, 5)), None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut grid = Grid::new(8, 2);
        grid.stamp_square(Cell::new(4, 4), 2, B);
        grid.clear();
        assert_eq!(grid.claimed_cells(), 0);
        assert_eq!(grid.owner_of(Cell::new(4, 4)), None);
    }
}
