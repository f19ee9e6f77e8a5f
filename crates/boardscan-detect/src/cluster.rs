use nalgebra::Point2;

// Union-find over point indices.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}

/// Merge mutually-close points into cluster centroids.
///
/// Single-linkage semantics: two points end up in the same cluster when a
/// chain of pairwise distances, each at most `max_dist`, connects them.
/// Each output point is the arithmetic mean of its cluster's members.
///
/// Multiple detected lines along the same physical grid line produce
/// several near-duplicate intersections; this collapses them to one point
/// per true grid crossing.
pub fn cluster_points(points: &[Point2<f32>], max_dist: f32) -> Vec<Point2<f32>> {
    let n = points.len();
    if n <= 1 {
        return points.to_vec();
    }

    let limit_sq = max_dist * max_dist;
    let mut sets = DisjointSet::new(n);
    for i in 0..n {
        for j in i + 1..n {
            if (points[j] - points[i]).norm_squared() <= limit_sq {
                sets.union(i, j);
            }
        }
    }

    // centroid per root, in first-seen order
    let mut order: Vec<usize> = Vec::new();
    let mut sums: Vec<(f32, f32, usize)> = Vec::new();
    let mut slot_of_root = vec![usize::MAX; n];
    for i in 0..n {
        let root = sets.find(i);
        let slot = if slot_of_root[root] == usize::MAX {
            slot_of_root[root] = order.len();
            order.push(root);
            sums.push((0.0, 0.0, 0));
            sums.len() - 1
        } else {
            slot_of_root[root]
        };
        sums[slot].0 += points[i].x;
        sums[slot].1 += points[i].y;
        sums[slot].2 += 1;
    }

    sums.into_iter()
        .map(|(sx, sy, count)| Point2::new(sx / count as f32, sy / count as f32))
        .collect()
}
