use std::collections::BTreeMap;

use crate::error::TopologyError;
use crate::math::{same_location, Point2, PointKey};
use crate::plan::Wall;

/// Undirected graph over wall endpoints, keyed by quantized location.
#[derive(Debug, Default)]
struct EndpointGraph {
    index: BTreeMap<PointKey, usize>,
    points: Vec<Point2>,
    adjacency: Vec<Vec<usize>>,
}

impl EndpointGraph {
    fn node(&mut self, p: Point2) -> usize {
        let key = PointKey::from_point(&p);
        if let Some(&i) = self.index.get(&key) {
            return i;
        }
        // Points straddling a cell boundary round apart; look next door.
        let neighbor = (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dy| PointKey { x: key.x + dx, y: key.y + dy }))
            .filter_map(|k| self.index.get(&k).copied())
            .find(|&i| same_location(&self.points[i], &p));
        if let Some(i) = neighbor {
            return i;
        }
        let i = self.points.len();
        self.index.insert(key, i);
        self.points.push(p);
        self.adjacency.push(Vec::new());
        i
    }

    fn connect(&mut self, a: usize, b: usize) {
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
    }
}

/// Orders a wall subset into one closed vertex cycle.
///
/// The walk starts at the first wall's start point and always steps to an
/// unvisited neighbor. Every endpoint must be shared by exactly two walls and
/// all walls must belong to the same loop.
///
/// # Errors
///
/// Returns `TopologyError::EmptyWallSet` for no walls and
/// `TopologyError::NotClosed` for branching, open, or disconnected subsets.
pub fn order_loop(walls: &[Wall]) -> Result<Vec<Point2>, TopologyError> {
    if walls.is_empty() {
        return Err(TopologyError::EmptyWallSet);
    }

    let mut graph = EndpointGraph::default();
    for wall in walls {
        let a = graph.node(wall.start());
        let b = graph.node(wall.end());
        if a == b {
            return Err(TopologyError::NotClosed(format!(
                "wall {} collapses to a single point",
                wall.id
            )));
        }
        graph.connect(a, b);
    }

    for (i, neighbors) in graph.adjacency.iter().enumerate() {
        if neighbors.len() != 2 {
            let p = graph.points[i];
            return Err(TopologyError::NotClosed(format!(
                "vertex ({}, {}) joins {} walls",
                p.x,
                p.y,
                neighbors.len()
            )));
        }
    }

    let n = graph.points.len();
    if n < 3 {
        return Err(TopologyError::NotClosed(format!(
            "{n} distinct vertices cannot enclose an area"
        )));
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = 0;
    loop {
        visited[current] = true;
        order.push(graph.points[current]);
        match graph.adjacency[current].iter().find(|&&k| !visited[k]) {
            Some(&next) => current = next,
            None => break,
        }
    }

    if order.len() != n {
        return Err(TopologyError::NotClosed(format!(
            "walls form more than one loop ({} of {n} vertices reachable)",
            order.len()
        )));
    }
    if !graph.adjacency[current].contains(&0) {
        return Err(TopologyError::NotClosed("loop does not return to its start".to_owned()));
    }

    Ok(order)
}
