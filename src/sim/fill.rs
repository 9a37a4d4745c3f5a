//! Trail-to-territory conversion
//!
//! When an agent gets back onto its own land the trail it dragged is
//! committed, and every cell the trail encloses is claimed with it.
//!
//! Enclosure is an even-odd ray cast along each row of the bounding box.
//! The boundary is the closed loop formed by the trail plus a path through
//! the agent's existing territory joining the trail's two ends. Each test
//! cell casts a ray to the right through its centre and counts vertical loop
//! steps that span rows `y..y+1` (half-open), so rays that run along a
//! horizontal stretch of trail are not miscounted.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use super::grid::{AgentId, Cell, Grid};

/// Outcome of committing a trail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capture {
    /// Trail cells committed
    pub trail_cells: usize,
    /// Interior cells claimed by the ray cast
    pub enclosed_cells: usize,
    /// Net growth of the agent's territory
    pub gained: usize,
}

const NEIGHBORS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Commit `trail` into `id`'s territory, claim what it encloses, clear it.
///
/// Trails shorter than two cells are discarded without claiming anything.
pub fn fill_territory(grid: &mut Grid, id: AgentId, trail: &mut Vec<Cell>) -> Capture {
    if trail.len() < 2 {
        trail.clear();
        return Capture::default();
    }

    let before = grid.territory_len(id);
    let closing = closing_path(grid, id, trail);

    for &cell in trail.iter() {
        grid.claim(cell, id);
    }

    let trail_set: HashSet<Cell> = trail.iter().copied().collect();
    let Some((min, max)) = bounding_box(grid, id) else {
        trail.clear();
        return Capture::default();
    };

    let crossings = vertical_crossings(trail, &closing);

    let mut enclosed = Vec::new();
    for y in min.y..=max.y {
        let Some(row) = crossings.get(&y) else {
            continue;
        };
        for x in min.x..=max.x {
            let cell = Cell::new(x, y);
            if grid.owns(id, cell) || trail_set.contains(&cell) {
                continue;
            }
            // `row` is sorted: everything past the partition lies to the right
            let to_right = row.len() - row.partition_point(|&cx| cx <= x);
            if to_right % 2 == 1 {
                enclosed.push(cell);
            }
        }
    }

    for &cell in &enclosed {
        grid.claim(cell, id);
    }

    let capture = Capture {
        trail_cells: trail.len(),
        enclosed_cells: enclosed.len(),
        gained: grid.territory_len(id).saturating_sub(before),
    };
    trail.clear();
    capture
}

/// Bounding box of the agent's territory, grown by one cell and clamped to the world
fn bounding_box(grid: &Grid, id: AgentId) -> Option<(Cell, Cell)> {
    let territory = grid.territory(id);
    let first = territory.iter().next()?;
    let (mut min, mut max) = (*first, *first);
    for cell in territory {
        min.x = min.x.min(cell.x);
        min.y = min.y.min(cell.y);
        max.x = max.x.max(cell.x);
        max.y = max.y.max(cell.y);
    }
    let hi = grid.size() - 1;
    Some((
        Cell::new((min.x - 1).max(0), (min.y - 1).max(0)),
        Cell::new((max.x + 1).min(hi), (max.y + 1).min(hi)),
    ))
}

/// Path of cells from the trail's last cell back to its first, exclusive of both.
///
/// Runs through the agent's territory when the trail's ends both touch it and
/// the land between them is connected; otherwise falls back to an L-shaped walk.
fn closing_path(grid: &Grid, id: AgentId, trail: &[Cell]) -> Vec<Cell> {
    let (Some(&first), Some(&last)) = (trail.first(), trail.last()) else {
        return Vec::new();
    };
    let owned_neighbor = |cell: Cell| {
        NEIGHBORS
            .iter()
            .map(|&(dx, dy)| cell.offset(dx, dy))
            .find(|n| grid.owns(id, *n))
    };

    if let (Some(entry), Some(exit)) = (owned_neighbor(last), owned_neighbor(first)) {
        if let Some(path) = territory_path(grid, id, entry, exit) {
            return path;
        }
    }
    l_path(last, first)
}

/// Shortest 4-connected path from `from` to `to` through cells owned by `id`, inclusive
fn territory_path(grid: &Grid, id: AgentId, from: Cell, to: Cell) -> Option<Vec<Cell>> {
    let mut parents: HashMap<Cell, Cell> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    parents.insert(from, from);

    while let Some(cell) = queue.pop_front() {
        if cell == to {
            let mut path = vec![cell];
            let mut cur = cell;
            while cur != from {
                cur = parents[&cur];
                path.push(cur);
            }
            path.reverse();
            return Some(path);
        }
        for (dx, dy) in NEIGHBORS {
            let next = cell.offset(dx, dy);
            if grid.owns(id, next) && !parents.contains_key(&next) {
                parents.insert(next, cell);
                queue.push_back(next);
            }
        }
    }
    None
}

/// Cells strictly between `from` and `to` along x then y
fn l_path(from: Cell, to: Cell) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut cur = from;
    while cur.x != to.x {
        cur.x += (to.x - cur.x).signum();
        path.push(cur);
    }
    while cur.y != to.y {
        cur.y += (to.y - cur.y).signum();
        path.push(cur);
    }
    path.pop();
    path
}

/// For each row y, the sorted x positions of loop steps between rows y and y+1
fn vertical_crossings(trail: &[Cell], closing: &[Cell]) -> BTreeMap<i32, Vec<i32>> {
    let mut rows: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
    let looped: Vec<Cell> = trail.iter().chain(closing.iter()).copied().collect();
    let n = looped.len();
    for i in 0..n {
        let a = looped[i];
        let b = looped[(i + 1) % n];
        if a.x == b.x && (a.y - b.y).abs() == 1 {
            rows.entry(a.y.min(b.y)).or_default().push(a.x);
        }
    }
    for xs in rows.values_mut() {
        xs.sort_unstable();
    }
    rows
}
