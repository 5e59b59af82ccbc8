use std::{
    cmp::Reverse,
    collections::{BinaryHeap, VecDeque},
};

use super::Solver;
use crate::maze::Coord;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PriorityEntry {
    priority: usize,
    /// Insertion counter, so equal priorities pop first-in first-out
    seq: u64,
    coord: Coord,
}

/// Discovered but not yet expanded cells, ordered by the solver's discipline.
pub(super) enum Frontier {
    Stack(Vec<Coord>),
    Queue(VecDeque<Coord>),
    Priority {
        // Using Reverse to turn the max-heap into a min-heap
        heap: BinaryHeap<Reverse<PriorityEntry>>,
        next_seq: u64,
    },
}

impl Frontier {
    pub(super) fn for_solver(solver: Solver) -> Self {
        match solver {
            Solver::Dfs => Frontier::Stack(Vec::new()),
            Solver::Bfs => Frontier::Queue(VecDeque::new()),
            Solver::Greedy | Solver::AStar => Frontier::Priority {
                heap: BinaryHeap::new(),
                next_seq: 0,
            },
        }
    }

    /// `priority` is ignored by the stack and queue disciplines.
    pub(super) fn push(&mut self, coord: Coord, priority: usize) {
        match self {
            Frontier::Stack(stack) => stack.push(coord),
            Frontier::Queue(queue) => queue.push_back(coord),
            Frontier::Priority { heap, next_seq } => {
                heap.push(Reverse(PriorityEntry {
                    priority,
                    seq: *next_seq,
                    coord,
                }));
                *next_seq += 1;
            }
        }
    }

    pub(super) fn pop(&mut self) -> Option<Coord> {
        match self {
            Frontier::Stack(stack) => stack.pop(),
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Priority { heap, .. } => heap.pop().map(|Reverse(entry)| entry.coord),
        }
    }

    pub(super) fn len(&self) -> usize {
        match self {
            Frontier::Stack(stack) => stack.len(),
            Frontier::Queue(queue) => queue.len(),
            Frontier::Priority { heap, .. } => heap.len(),
        }
    }
}
