use crate::maze::Coord;

/// One expansion step of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// The cell removed from the frontier
    pub cell: Coord,
    /// Frontier entries still pending right after `cell` was removed
    pub frontier_len: usize,
}

/// Append-only log of the cells a search expanded, in expansion order.
///
/// The log is only meant for replaying or summarising a run. Searches never read it back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorationTrace {
    records: Vec<TraceRecord>,
}

impl ExplorationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, cell: Coord, frontier_len: usize) {
        self.records.push(TraceRecord { cell, frontier_len });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// Expanded cells in expansion order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.records.iter().map(|r| r.cell)
    }

    /// Largest frontier observed during the run.
    pub fn max_frontier(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.frontier_len)
            .max()
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a ExplorationTrace {
    type Item = &'a TraceRecord;
    type IntoIter = std::slice::Iter<'a, TraceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_keep_insertion_order() {
        let mut trace = ExplorationTrace::new();
        assert!(trace.is_empty());
        assert_eq!(trace.max_frontier(), 0);

        trace.record((0, 0), 0);
        trace.record((1, 0), 3);
        trace.record((0, 1), 2);

        assert_eq!(trace.len(), 3);
        assert_eq!(trace.cells().collect::<Vec<_>>(), vec![(0, 0), (1, 0), (0, 1)]);
        assert_eq!(trace.max_frontier(), 3);
        assert_eq!(
            (&trace).into_iter().next(),
            Some(&TraceRecord {
                cell: (0, 0),
                frontier_len: 0
            })
        );
    }
}
