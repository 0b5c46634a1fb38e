//! Parent-pointer cycle detection shared by the builder and the structural
//! validator. Three-colour marking over an index-addressed parent array:
//! every node is walked towards its root at most once, so detection is
//! linear in the number of fields.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Return every cycle reachable through `parents`, each listed in walk
/// order starting at the first member reached. Self-loops are cycles of
/// length one.
pub(crate) fn find_cycles(parents: &[Option<usize>]) -> Vec<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; parents.len()];
    let mut cycles = Vec::new();
    let mut path: Vec<usize> = Vec::new();

    for start in 0..parents.len() {
        path.clear();
        let mut cursor = Some(start);

        while let Some(current) = cursor {
            match marks[current] {
                Mark::Done => break,
                Mark::OnPath => {
                    let from = path.iter().position(|&n| n == current).unwrap_or(0);
                    cycles.push(path[from..].to_vec());
                    break;
                }
                Mark::Unvisited => {
                    marks[current] = Mark::OnPath;
                    path.push(current);
                    cursor = parents[current];
                }
            }
        }

        for &n in &path {
            marks[n] = Mark::Done;
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forest_has_no_cycles() {
        // 0 <- 1 <- 2, 3 root
        let parents = vec![None, Some(0), Some(1), None];
        assert!(find_cycles(&parents).is_empty());
    }

    #[test]
    fn test_self_loop() {
        let parents = vec![Some(0), None];
        assert_eq!(find_cycles(&parents), vec![vec![0]]);
    }

    #[test]
    fn test_two_cycle_reported_once() {
        // 0 -> 1 -> 0, 2 hangs off the cycle.
        let parents = vec![Some(1), Some(0), Some(1)];
        let cycles = find_cycles(&parents);
        assert_eq!(cycles.len(), 1);
        let mut members = cycles[0].clone();
        members.sort();
        assert_eq!(members, vec![0, 1]);
    }

    #[test]
    fn test_tail_into_cycle_excluded() {
        // 3 -> 0 -> 1 -> 2 -> 0
        let parents = vec![Some(1), Some(2), Some(0), Some(0)];
        let cycles = find_cycles(&parents);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 3);
        assert!(!cycles[0].contains(&3));
    }

    #[test]
    fn test_disjoint_cycles() {
        let parents = vec![Some(1), Some(0), Some(3), Some(2), None];
        assert_eq!(find_cycles(&parents).len(), 2);
    }
}
