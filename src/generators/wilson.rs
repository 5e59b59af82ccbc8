use std::collections::{HashMap, VecDeque};

use rand::{Rng, rngs::StdRng};

use super::GenerationReport;
use crate::{
    error::MazeError,
    maze::{Coord, Edge, Maze},
};

struct UnionFind {
    parent: Vec<u16>,
    rank: Vec<u16>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        // Sizes up to u8::MAX * u8::MAX fit in u16
        UnionFind {
            parent: (0..size as u16).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: u16) -> u16 {
        if self.parent[x as usize] != x {
            self.parent[x as usize] = self.find(self.parent[x as usize]);
        }
        self.parent[x as usize]
    }

    fn connected(&mut self, x: u16, y: u16) -> bool {
        self.find(x) == self.find(y)
    }

    fn unite(&mut self, x: u16, y: u16) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false; // Already in same set
        }

        match self.rank[root_x as usize].cmp(&self.rank[root_y as usize]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_y as usize] = root_x;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_x as usize] = root_y;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_y as usize] = root_x;
                self.rank[root_x as usize] += 1;
            }
        }
        true
    }
}

/// Cells not yet in the tree, supporting uniform random choice and O(1) removal.
struct CellPool {
    cells: Vec<Coord>,
    /// Position of each cell in `cells`, indexed by `Maze::cell_index`
    slots: Vec<Option<usize>>,
}

impl CellPool {
    fn new(maze: &Maze) -> Self {
        let cells = maze.cells().collect::<Vec<_>>();
        let slots = (0..cells.len()).map(Some).collect();
        CellPool { cells, slots }
    }

    fn choose(&self, rng: &mut StdRng) -> Option<Coord> {
        if self.cells.is_empty() {
            return None;
        }
        Some(self.cells[rng.random_range(0..self.cells.len())])
    }

    fn remove(&mut self, maze: &Maze, cell: Coord) {
        let Some(slot) = self.slots[maze.cell_index(cell)].take() else {
            return;
        };
        self.cells.swap_remove(slot);
        // The last cell moved into the freed slot
        if let Some(&moved) = self.cells.get(slot) {
            self.slots[maze.cell_index(moved)] = Some(slot);
        }
    }
}

/// A random walk whose loops are erased as soon as they close.
///
/// `index` maps every cell on the retained walk to its position, so a revisit is found in
/// O(1) and the walk is cut back to the first occurrence of the revisited cell.
struct LoopErasedWalk {
    path: Vec<Coord>,
    index: HashMap<Coord, usize>,
}

impl LoopErasedWalk {
    fn new(origin: Coord) -> Self {
        LoopErasedWalk {
            path: vec![origin],
            index: HashMap::from([(origin, 0)]),
        }
    }

    /// Extends the walk to `next`. Returns `true` if this closed and erased a loop.
    fn step(&mut self, next: Coord) -> bool {
        match self.index.get(&next).copied() {
            Some(position) => {
                for erased in self.path.drain(position + 1..) {
                    self.index.remove(&erased);
                }
                true
            }
            None => {
                self.index.insert(next, self.path.len());
                self.path.push(next);
                false
            }
        }
    }

    fn cells(&self) -> &[Coord] {
        &self.path
    }
}

/// Carve a uniform spanning tree into `maze`, which must have every wall closed.
pub(super) fn wilson(maze: &mut Maze, rng: &mut StdRng) -> Result<GenerationReport, MazeError> {
    let mut report = GenerationReport::default();
    let mut tree = UnionFind::new(maze.cell_count());
    let mut outside = CellPool::new(maze);

    let root = (
        rng.random_range(0..maze.width()),
        rng.random_range(0..maze.height()),
    );
    let root_idx = maze.cell_index(root) as u16;
    outside.remove(maze, root);
    tracing::debug!("[wilson] tree rooted at {:?}", root);

    while let Some(origin) = outside.choose(rng) {
        report.walks += 1;
        let mut walk = LoopErasedWalk::new(origin);
        let mut current = origin;

        while !tree.connected(maze.cell_index(current) as u16, root_idx) {
            let neighbors = maze.neighbors(current).collect::<Vec<_>>();
            let next = neighbors[rng.random_range(0..neighbors.len())];
            if walk.step(next) {
                report.erased_loops += 1;
            }
            current = next;
        }
        tracing::trace!(
            "[wilson] walk from {:?} joined the tree after {} cells",
            origin,
            walk.cells().len()
        );

        // The last cell of the walk is already in the tree
        for pair in walk.cells().windows(2) {
            let (from, to) = (pair[0], pair[1]);
            maze.set_open(from, to, true)?;
            tree.unite(maze.cell_index(from) as u16, maze.cell_index(to) as u16);
            report.tree_edges.push(Edge::new(from, to));
        }
        for &cell in walk.cells() {
            outside.remove(maze, cell);
        }
    }

    Ok(report)
}

/// Check that every cell can be reached from `(0, 0)` through open passages.
pub(super) fn verify_connected(maze: &Maze) -> Result<(), MazeError> {
    let total = maze.cell_count();
    let mut visited = vec![false; total];
    visited[0] = true;
    let mut reached = 1;
    let mut queue = VecDeque::from([(0, 0)]);
    while let Some(cell) = queue.pop_front() {
        for next in maze.open_neighbors(cell) {
            let idx = maze.cell_index(next);
            if !visited[idx] {
                visited[idx] = true;
                reached += 1;
                queue.push_back(next);
            }
        }
    }

    if reached < total {
        tracing::error!("[wilson] maze is disconnected: {} of {} cells reached", reached, total);
        return Err(MazeError::DisconnectedMaze { reached, total });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn carve(width: u8, height: u8, seed: u64) -> (Maze, GenerationReport) {
        let mut maze = Maze::new(width, height).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let report = wilson(&mut maze, &mut rng).unwrap();
        (maze, report)
    }

    #[test]
    fn test_loop_erasure_cuts_back_to_first_visit() {
        let mut walk = LoopErasedWalk::new((0, 0));
        assert!(!walk.step((1, 0)));
        assert!(!walk.step((1, 1)));
        assert!(!walk.step((0, 1)));
        // Closing the square erases (1, 1) and (0, 1)
        assert!(walk.step((1, 0)));
        assert_eq!(walk.cells(), &[(0, 0), (1, 0)]);
        // Erased cells can be walked onto again without closing a loop
        assert!(!walk.step((1, 1)));
        assert_eq!(walk.cells(), &[(0, 0), (1, 0), (1, 1)]);
        // Returning to the origin erases everything after it
        assert!(walk.step((0, 0)));
        assert_eq!(walk.cells(), &[(0, 0)]);
    }

    #[test]
    fn test_cell_pool_removal() {
        let maze = Maze::new(3, 2).unwrap();
        let mut pool = CellPool::new(&maze);
        pool.remove(&maze, (0, 0));
        pool.remove(&maze, (2, 1));
        // Removing twice is a no-op
        pool.remove(&maze, (0, 0));
        assert_eq!(pool.cells.len(), 4);
        assert!(!pool.cells.contains(&(0, 0)));
        for &cell in &pool.cells {
            assert_eq!(pool.cells[pool.slots[maze.cell_index(cell)].unwrap()], cell);
        }
    }

    #[test]
    fn test_union_find() {
        let mut uf = UnionFind::new(4);
        assert!(!uf.connected(0, 3));
        assert!(uf.unite(0, 1));
        assert!(uf.unite(2, 3));
        assert!(!uf.connected(1, 2));
        assert!(uf.unite(1, 3));
        assert!(!uf.unite(0, 2));
        assert!(uf.connected(0, 3));
    }

    #[test]
    fn test_spanning_tree_edge_count() {
        for (width, height, seed) in [(5, 5, 0), (7, 3, 1), (10, 4, 2), (1, 9, 3), (2, 2, 4)] {
            let (maze, report) = carve(width, height, seed);
            let cells = width as usize * height as usize;
            assert_eq!(maze.open_edge_count(), cells - 1);
            assert_eq!(report.tree_edges.len(), cells - 1);
            assert_eq!(maze.reachable_count((0, 0)), cells);
            assert!(verify_connected(&maze).is_ok());
        }
    }

    #[test]
    fn test_line_maze_is_fully_open() {
        let (maze, _) = carve(6, 1, 9);
        for x in 0..5 {
            assert!(maze.is_open((x, 0), (x + 1, 0)).unwrap());
        }
    }

    #[test]
    fn test_verify_rejects_disconnected_maze() {
        let mut maze = Maze::new(2, 2).unwrap();
        maze.set_open((0, 0), (1, 0), true).unwrap();
        maze.set_open((0, 0), (0, 1), true).unwrap();
        assert_eq!(
            verify_connected(&maze),
            Err(MazeError::DisconnectedMaze {
                reached: 3,
                total: 4
            })
        );
    }
}
