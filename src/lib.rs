//! Polygon triangulation by ear clipping, with hole support and z-order
//! hashing for large inputs.
//!
//! Input is a flat coordinate array plus optional hole start indices; output
//! is a flat buffer of triangle vertex indices ready for an index buffer.
//!
//! ```
//! let square = [0.0_f64, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
//! let triangles: Vec<u32> = polytri::triangulate(&square, &[], 2);
//! assert_eq!(triangles, vec![2, 3, 0, 0, 1, 2]);
//! ```

use core::cmp::Ordering;

use num_traits::Float;

pub mod project;

/// Index type used for hole starts and emitted triangle indices.
pub trait OutIndex: Copy {
    fn from_usize(v: usize) -> Self;
    fn as_usize(self) -> usize;
}

impl OutIndex for u16 {
    fn from_usize(v: usize) -> Self {
        v as Self
    }
    fn as_usize(self) -> usize {
        self as usize
    }
}

impl OutIndex for u32 {
    fn from_usize(v: usize) -> Self {
        v as Self
    }
    fn as_usize(self) -> usize {
        self as usize
    }
}

impl OutIndex for usize {
    fn from_usize(v: usize) -> Self {
        v
    }
    fn as_usize(self) -> usize {
        self
    }
}

/// One record per polygon vertex, stored in the engine's arena. Ring links
/// are always valid (a singleton ring self-loops); z-order links are `None`
/// at the list ends and before indexing.
#[derive(Clone, Copy)]
struct Vertex<T: Float> {
    /// vertex index in the input, already divided by `dim`
    i: usize,
    x: T,
    y: T,
    /// ring neighbors
    prev: usize,
    next: usize,
    /// z-order curve value, computed lazily
    z: u32,
    /// z-order neighbors
    prev_z: Option<usize>,
    next_z: Option<usize>,
    /// protected from collinear filtering (singleton holes)
    steiner: bool,
}

impl<T: Float> Vertex<T> {
    fn new(own: usize, i: usize, x: T, y: T) -> Self {
        Self {
            i,
            x,
            y,
            prev: own,
            next: own,
            z: 0,
            prev_z: None,
            next_z: None,
            steiner: false,
        }
    }
}

/// Reusable triangulation engine. Keeps its vertex arena allocated across
/// calls; removed vertices stay in the arena until the next call clears it.
pub struct Triangulator<T: Float> {
    verts: Vec<Vertex<T>>,
}

impl<T: Float> Default for Triangulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Triangulator<T> {
    pub fn new() -> Self {
        Self { verts: Vec::new() }
    }

    /// Triangulate a polygon given as a flat coordinate array.
    ///
    /// `data` holds `dim` coordinates per vertex (`dim == 0` is treated as
    /// 2; coordinates past the first two are ignored). `hole_indices` lists
    /// the vertex index at which each hole ring starts. Triangle vertex
    /// indices are appended to `out` in groups of three; `out` is cleared
    /// first. Degenerate input produces an empty or shortened buffer, never
    /// an error.
    pub fn triangulate<N: OutIndex>(
        &mut self,
        data: &[T],
        hole_indices: &[N],
        dim: usize,
        out: &mut Vec<N>,
    ) {
        out.clear();
        let dim = if dim == 0 { 2 } else { dim };
        self.verts.clear();
        self.verts.reserve(data.len() / dim + 2 * hole_indices.len());

        let has_holes = !hole_indices.is_empty();
        let outer_len = if has_holes {
            hole_indices[0].as_usize() * dim
        } else {
            data.len()
        };

        let Some(mut outer) = self.build_ring(data, 0, outer_len, dim, true) else {
            return;
        };
        if self.verts[outer].next == self.verts[outer].prev {
            return;
        }

        if has_holes {
            outer = self.eliminate_holes(data, hole_indices, outer, dim);
        }

        let mut min_x = T::zero();
        let mut min_y = T::zero();
        let mut inv_size = T::zero();

        // z-order hashing only pays off past this size; the hash grid is
        // quantized against the outer ring's bounding box
        if data.len() > 80 * dim {
            min_x = data[0];
            min_y = data[1];
            let mut max_x = min_x;
            let mut max_y = min_y;
            for v in data[..outer_len].chunks_exact(dim) {
                min_x = min_x.min(v[0]);
                min_y = min_y.min(v[1]);
                max_x = max_x.max(v[0]);
                max_y = max_y.max(v[1]);
            }
            let size = (max_x - min_x).max(max_y - min_y);
            if size != T::zero() {
                inv_size = T::from(32767.0).unwrap() / size;
            }
        }

        self.clip_ears(Some(outer), out, min_x, min_y, inv_size, 0);
    }

    /// Build a circular doubly linked ring from `data[start..end]`, forcing
    /// the requested winding. Returns the last inserted vertex, or `None`
    /// for an empty range.
    fn build_ring(
        &mut self,
        data: &[T],
        start: usize,
        end: usize,
        dim: usize,
        clockwise: bool,
    ) -> Option<usize> {
        let mut last: Option<usize> = None;

        if clockwise == (signed_area(data, start, end, dim) > T::zero()) {
            for (k, v) in data[start..end].chunks_exact(dim).enumerate() {
                last = Some(self.insert_vertex(start / dim + k, v[0], v[1], last));
            }
        } else {
            for (k, v) in data[start..end].chunks_exact(dim).enumerate().rev() {
                last = Some(self.insert_vertex(start / dim + k, v[0], v[1], last));
            }
        }

        if let Some(l) = last {
            if equals(&self.verts[l], &self.verts[self.verts[l].next]) {
                self.remove_vertex(l);
                last = Some(self.verts[l].next);
            }
        }
        last
    }

    /// Append a vertex to the arena and link it after `last`, or start a
    /// new self-looped ring.
    fn insert_vertex(&mut self, i: usize, x: T, y: T, last: Option<usize>) -> usize {
        let idx = self.verts.len();
        let mut v = Vertex::new(idx, i, x, y);
        match last {
            Some(l) => {
                let next = self.verts[l].next;
                v.prev = l;
                v.next = next;
                self.verts.push(v);
                self.verts[next].prev = idx;
                self.verts[l].next = idx;
            }
            None => self.verts.push(v),
        }
        idx
    }

    /// Unlink a vertex from the ring and the z-list. The record keeps its
    /// own links so walks may still step out of it.
    fn remove_vertex(&mut self, p: usize) {
        let v = self.verts[p];
        self.verts[v.next].prev = v.prev;
        self.verts[v.prev].next = v.next;
        if let Some(pz) = v.prev_z {
            self.verts[pz].next_z = v.next_z;
        }
        if let Some(nz) = v.next_z {
            self.verts[nz].prev_z = v.prev_z;
        }
    }

    /// Remove collinear and duplicate vertices, restarting the sweep after
    /// every removal. The `again` flag forces one more full revolution per
    /// removal so a trailing collinear run cannot survive.
    fn filter_points(&mut self, start: usize, end: Option<usize>) -> usize {
        let mut end = end.unwrap_or(start);
        let mut p = start;
        loop {
            let mut again = false;
            let v = self.verts[p];
            if !v.steiner
                && (equals(&self.verts[p], &self.verts[v.next])
                    || area(&self.verts[v.prev], &self.verts[p], &self.verts[v.next])
                        == T::zero())
            {
                self.remove_vertex(p);
                p = self.verts[p].prev;
                end = p;
                if p == self.verts[p].next {
                    break;
                }
                again = true;
            } else {
                p = v.next;
            }
            if !again && p == end {
                break;
            }
        }
        end
    }

    /// Main ear slicing loop over a single ring. `pass` is the escalation
    /// level: 0 plain, 1 after collinear filtering, 2 after curing local
    /// self-intersections; a third stall splits the ring in two.
    fn clip_ears<N: OutIndex>(
        &mut self,
        ear: Option<usize>,
        out: &mut Vec<N>,
        min_x: T,
        min_y: T,
        inv_size: T,
        pass: u32,
    ) {
        let Some(mut ear) = ear else { return };

        if pass == 0 && inv_size != T::zero() {
            self.build_z_index(ear, min_x, min_y, inv_size);
        }

        let mut stop = ear;
        while self.verts[ear].prev != self.verts[ear].next {
            let prev = self.verts[ear].prev;
            let next = self.verts[ear].next;

            let found = if inv_size != T::zero() {
                self.is_ear_hashed(ear, min_x, min_y, inv_size)
            } else {
                self.is_ear(ear)
            };
            if found {
                out.push(N::from_usize(self.verts[prev].i));
                out.push(N::from_usize(self.verts[ear].i));
                out.push(N::from_usize(self.verts[next].i));

                self.remove_vertex(ear);

                // skip one vertex after each cut; fewer sliver triangles
                ear = self.verts[next].next;
                stop = ear;
                continue;
            }

            ear = next;
            if ear == stop {
                // a full revolution without a single ear: escalate
                match pass {
                    0 => {
                        let filtered = self.filter_points(ear, None);
                        self.clip_ears(Some(filtered), out, min_x, min_y, inv_size, 1);
                    }
                    1 => {
                        let filtered = self.filter_points(ear, None);
                        let cured = self.cure_local_intersections(filtered, out);
                        self.clip_ears(Some(cured), out, min_x, min_y, inv_size, 2);
                    }
                    _ => self.split_and_clip(ear, out, min_x, min_y, inv_size),
                }
                break;
            }
        }
    }

    /// Ear test: the corner must turn the right way and contain no other
    /// ring vertex that is reflex or collinear. A vertex coinciding with
    /// the previous corner does not veto the ear.
    fn is_ear(&self, ear: usize) -> bool {
        let b = self.verts[ear];
        let a = self.verts[b.prev];
        let c = self.verts[b.next];

        if area(&a, &b, &c) >= T::zero() {
            // reflex or flat corner
            return false;
        }

        let x0 = a.x.min(b.x.min(c.x));
        let y0 = a.y.min(b.y.min(c.y));
        let x1 = a.x.max(b.x.max(c.x));
        let y1 = a.y.max(b.y.max(c.y));

        let mut p = c.next;
        while p != b.prev {
            let v = self.verts[p];
            if v.x >= x0
                && v.x <= x1
                && v.y >= y0
                && v.y <= y1
                && point_in_triangle_except_first(a.x, a.y, b.x, b.y, c.x, c.y, v.x, v.y)
                && area(&self.verts[v.prev], &v, &self.verts[v.next]) >= T::zero()
            {
                return false;
            }
            p = v.next;
        }
        true
    }

    /// Ear test restricted to vertices whose z-order code falls inside the
    /// ear's bounding-box range, walking the z-list outward in both
    /// directions from the ear.
    fn is_ear_hashed(&self, ear: usize, min_x: T, min_y: T, inv_size: T) -> bool {
        let b = self.verts[ear];
        let a = self.verts[b.prev];
        let c = self.verts[b.next];

        if area(&a, &b, &c) >= T::zero() {
            return false;
        }

        let x0 = a.x.min(b.x.min(c.x));
        let y0 = a.y.min(b.y.min(c.y));
        let x1 = a.x.max(b.x.max(c.x));
        let y1 = a.y.max(b.y.max(c.y));

        let min_z = z_order(x0, y0, min_x, min_y, inv_size);
        let max_z = z_order(x1, y1, min_x, min_y, inv_size);

        let mut p = b.prev_z;
        let mut n = b.next_z;

        let blocks = |v: &Vertex<T>, idx: usize| {
            v.x >= x0
                && v.x <= x1
                && v.y >= y0
                && v.y <= y1
                && idx != b.prev
                && idx != b.next
                && point_in_triangle_except_first(a.x, a.y, b.x, b.y, c.x, c.y, v.x, v.y)
                && area(&self.verts[v.prev], v, &self.verts[v.next]) >= T::zero()
        };

        // both directions at once while both stay in range
        loop {
            let (Some(pi), Some(ni)) = (p, n) else { break };
            let pv = self.verts[pi];
            if pv.z < min_z {
                break;
            }
            let nv = self.verts[ni];
            if nv.z > max_z {
                break;
            }
            if blocks(&pv, pi) {
                return false;
            }
            p = pv.prev_z;
            if blocks(&nv, ni) {
                return false;
            }
            n = nv.next_z;
        }

        // whatever is left in decreasing z-order
        while let Some(pi) = p {
            let pv = self.verts[pi];
            if pv.z < min_z {
                break;
            }
            if blocks(&pv, pi) {
                return false;
            }
            p = pv.prev_z;
        }

        // and in increasing z-order
        while let Some(ni) = n {
            let nv = self.verts[ni];
            if nv.z > max_z {
                break;
            }
            if blocks(&nv, ni) {
                return false;
            }
            n = nv.next_z;
        }

        true
    }

    /// Collapse each local "bowtie" twist (two crossing adjacent edges)
    /// into a single triangle.
    fn cure_local_intersections<N: OutIndex>(
        &mut self,
        mut start: usize,
        out: &mut Vec<N>,
    ) -> usize {
        let mut p = start;
        loop {
            let a = self.verts[p].prev;
            let p_next = self.verts[p].next;
            let b = self.verts[p_next].next;

            if !equals(&self.verts[a], &self.verts[b])
                && segments_intersect(
                    &self.verts[a],
                    &self.verts[p],
                    &self.verts[p_next],
                    &self.verts[b],
                )
                && self.locally_inside(a, b)
                && self.locally_inside(b, a)
            {
                out.push(N::from_usize(self.verts[a].i));
                out.push(N::from_usize(self.verts[p].i));
                out.push(N::from_usize(self.verts[b].i));

                self.remove_vertex(p);
                self.remove_vertex(p_next);

                p = b;
                start = b;
            }

            p = self.verts[p].next;
            if p == start {
                break;
            }
        }
        self.filter_points(p, None)
    }

    /// Last-resort fallback: find a valid diagonal, split the ring along
    /// it, and clip each half from scratch. A ring with no valid diagonal
    /// is abandoned.
    fn split_and_clip<N: OutIndex>(
        &mut self,
        start: usize,
        out: &mut Vec<N>,
        min_x: T,
        min_y: T,
        inv_size: T,
    ) {
        let mut a = start;
        loop {
            let ai = self.verts[a].i;
            let a_prev = self.verts[a].prev;
            let mut b = self.verts[self.verts[a].next].next;

            while b != a_prev {
                if ai != self.verts[b].i && self.is_valid_diagonal(a, b) {
                    let mut c = self.split_ring(a, b);

                    let a_next = self.verts[a].next;
                    let c_next = self.verts[c].next;
                    let a = self.filter_points(a, Some(a_next));
                    c = self.filter_points(c, Some(c_next));

                    self.clip_ears(Some(a), out, min_x, min_y, inv_size, 0);
                    self.clip_ears(Some(c), out, min_x, min_y, inv_size, 0);
                    return;
                }
                b = self.verts[b].next;
            }

            a = self.verts[a].next;
            if a == start {
                break;
            }
        }
    }

    /// Build each hole's ring, then splice every hole into the outer ring
    /// in left-to-right order of the holes' leftmost vertices.
    fn eliminate_holes<N: OutIndex>(
        &mut self,
        data: &[T],
        hole_indices: &[N],
        mut outer: usize,
        dim: usize,
    ) -> usize {
        let mut queue = Vec::with_capacity(hole_indices.len());

        for (k, hi) in hole_indices.iter().enumerate() {
            let start = hi.as_usize() * dim;
            let end = if k + 1 < hole_indices.len() {
                hole_indices[k + 1].as_usize() * dim
            } else {
                data.len()
            };
            if let Some(ring) = self.build_ring(data, start, end, dim, false) {
                if ring == self.verts[ring].next {
                    // a single-point hole must survive collinear filtering
                    self.verts[ring].steiner = true;
                }
                queue.push(self.leftmost(ring));
            }
        }

        queue.sort_unstable_by(|&a, &b| self.compare_by_x_y_slope(a, b));

        for hole in queue {
            outer = self.bridge_hole(hole, outer);
        }
        outer
    }

    /// Order hole entry points by x, then y; two holes anchored on the very
    /// same point are taken in slope order so their bridges nest instead of
    /// crossing.
    fn compare_by_x_y_slope(&self, a: usize, b: usize) -> Ordering {
        let va = &self.verts[a];
        let vb = &self.verts[b];
        let by_x = va.x.partial_cmp(&vb.x).unwrap_or(Ordering::Equal);
        let by_y = || va.y.partial_cmp(&vb.y).unwrap_or(Ordering::Equal);
        let by_slope = || {
            let na = &self.verts[va.next];
            let nb = &self.verts[vb.next];
            let sa = (na.y - va.y) / (na.x - va.x);
            let sb = (nb.y - vb.y) / (nb.x - vb.x);
            sa.partial_cmp(&sb).unwrap_or(Ordering::Equal)
        };
        by_x.then_with(by_y).then_with(by_slope)
    }

    /// Connect a hole to the outer ring through a bridge edge, merging the
    /// two rings into one. A hole with no visible bridge point is skipped.
    fn bridge_hole(&mut self, hole: usize, outer: usize) -> usize {
        let Some(bridge) = self.find_hole_bridge(hole, outer) else {
            return outer;
        };
        let bridge_reverse = self.split_ring(bridge, hole);

        let br_next = self.verts[bridge_reverse].next;
        self.filter_points(bridge_reverse, Some(br_next));
        let b_next = self.verts[bridge].next;
        self.filter_points(bridge, Some(b_next))
    }

    /// David Eberly's visibility walk: cast a leftward ray from the hole's
    /// leftmost vertex, take the nearest crossed edge's lesser-x endpoint,
    /// then refine among vertices inside the (hole, ray hit, endpoint)
    /// triangle by smallest angle to the ray.
    fn find_hole_bridge(&self, hole: usize, outer: usize) -> Option<usize> {
        let h = self.verts[hole];
        let mut p = outer;
        let mut qx = T::neg_infinity();
        let mut m: Option<usize> = None;

        // the hole may touch the outer ring in a vertex
        if equals(&h, &self.verts[p]) {
            return Some(p);
        }
        loop {
            let pv = self.verts[p];
            let next = pv.next;
            let nv = self.verts[next];
            if equals(&h, &nv) {
                return Some(next);
            }
            if h.y <= pv.y && h.y >= nv.y && nv.y != pv.y {
                let x = pv.x + (h.y - pv.y) * (nv.x - pv.x) / (nv.y - pv.y);
                if x <= h.x && x > qx {
                    qx = x;
                    m = Some(if pv.x < nv.x { p } else { next });
                    if x == h.x {
                        // the ray hits an outer vertex dead on
                        return m;
                    }
                }
            }
            p = next;
            if p == outer {
                break;
            }
        }

        let mut m = m?;

        let stop = m;
        let mv = self.verts[m];
        let (mx, my) = (mv.x, mv.y);
        let mut tan_min = T::infinity();

        let mut p = m;
        loop {
            let pv = self.verts[p];
            if h.x >= pv.x && pv.x >= mx && h.x != pv.x {
                // keep the candidate triangle in one winding whether the
                // connection point sits above or below the ray
                let (wx0, wx1) = if h.y < my { (h.x, qx) } else { (qx, h.x) };
                if point_in_triangle(wx0, h.y, mx, my, wx1, h.y, pv.x, pv.y) {
                    let tan = (h.y - pv.y).abs() / (h.x - pv.x);
                    if self.locally_inside(p, hole)
                        && (tan < tan_min
                            || (tan == tan_min
                                && (pv.x > self.verts[m].x
                                    || (pv.x == self.verts[m].x
                                        && self.sector_contains_sector(m, p)))))
                    {
                        m = p;
                        tan_min = tan;
                    }
                }
            }
            p = pv.next;
            if p == stop {
                break;
            }
        }

        Some(m)
    }

    /// whether the angular sector at `m` wholly contains the sector at `p`,
    /// for two vertices at the same coordinates
    fn sector_contains_sector(&self, m: usize, p: usize) -> bool {
        let mv = &self.verts[m];
        let pv = &self.verts[p];
        area(&self.verts[mv.prev], mv, &self.verts[pv.prev]) < T::zero()
            && area(&self.verts[pv.next], mv, &self.verts[mv.next]) < T::zero()
    }

    /// Assign z-order codes, seed the z-list from the ring order, cut it
    /// open into a plain list, and merge sort it.
    fn build_z_index(&mut self, start: usize, min_x: T, min_y: T, inv_size: T) {
        let mut p = start;
        loop {
            let v = &mut self.verts[p];
            if v.z == 0 {
                v.z = z_order(v.x, v.y, min_x, min_y, inv_size);
            }
            v.prev_z = Some(v.prev);
            v.next_z = Some(v.next);
            p = v.next;
            if p == start {
                break;
            }
        }

        let tail = self.verts[start].prev;
        self.verts[tail].next_z = None;
        self.verts[start].prev_z = None;

        self.sort_z_list(start);
    }

    /// Bottom-up merge sort over the z-list (Simon Tatham's linked-list
    /// scheme): run lengths double every pass; a pass needing at most one
    /// merge means the list is sorted.
    fn sort_z_list(&mut self, head: usize) {
        let mut in_size = 1usize;
        let mut head = Some(head);

        loop {
            let mut p = head;
            head = None;
            let mut tail: Option<usize> = None;
            let mut num_merges = 0;

            while let Some(pi) = p {
                num_merges += 1;
                let mut q = Some(pi);
                let mut p_size = 0usize;
                for _ in 0..in_size {
                    p_size += 1;
                    q = self.verts[q.unwrap()].next_z;
                    if q.is_none() {
                        break;
                    }
                }
                let mut q_size = in_size;

                while p_size > 0 || (q_size > 0 && q.is_some()) {
                    let take_p = p_size > 0
                        && (q_size == 0
                            || q.is_none()
                            || self.verts[p.unwrap()].z <= self.verts[q.unwrap()].z);
                    let e = if take_p {
                        let e = p.unwrap();
                        p = self.verts[e].next_z;
                        p_size -= 1;
                        e
                    } else {
                        let e = q.unwrap();
                        q = self.verts[e].next_z;
                        q_size -= 1;
                        e
                    };

                    match tail {
                        Some(t) => self.verts[t].next_z = Some(e),
                        None => head = Some(e),
                    }
                    self.verts[e].prev_z = tail;
                    tail = Some(e);
                }

                p = q;
            }

            self.verts[tail.unwrap()].next_z = None;
            in_size *= 2;

            if num_merges <= 1 {
                break;
            }
        }
    }

    /// find the ring vertex with the smallest x, breaking ties by y
    fn leftmost(&self, start: usize) -> usize {
        let mut best = start;
        let mut p = self.verts[start].next;
        while p != start {
            let pv = &self.verts[p];
            let bv = &self.verts[best];
            if pv.x < bv.x || (pv.x == bv.x && pv.y < bv.y) {
                best = p;
            }
            p = pv.next;
        }
        best
    }

    /// A diagonal is valid when it is not an existing edge, crosses no ring
    /// edge, runs locally inside the polygon at both ends with its midpoint
    /// inside, and does not connect opposite-facing sectors. Two coincident
    /// convex vertices also admit a zero-length diagonal.
    fn is_valid_diagonal(&self, a: usize, b: usize) -> bool {
        let av = self.verts[a];
        let bv = self.verts[b];
        let a_prev = self.verts[av.prev];
        let a_next = self.verts[av.next];
        let b_prev = self.verts[bv.prev];
        let b_next = self.verts[bv.next];

        a_next.i != bv.i
            && a_prev.i != bv.i
            && !self.intersects_ring(a, b)
            && (self.locally_inside(a, b)
                && self.locally_inside(b, a)
                && self.middle_inside(a, b)
                && (area(&a_prev, &av, &b_prev) != T::zero()
                    || area(&av, &b_prev, &bv) != T::zero())
                || equals(&av, &bv)
                    && area(&a_prev, &av, &a_next) > T::zero()
                    && area(&b_prev, &bv, &b_next) > T::zero())
    }

    /// does the segment `(a, b)` cross any ring edge not incident to `a`
    /// or `b`
    fn intersects_ring(&self, a: usize, b: usize) -> bool {
        let ai = self.verts[a].i;
        let bi = self.verts[b].i;
        let mut p = a;
        loop {
            let pv = &self.verts[p];
            let next = pv.next;
            let nv = &self.verts[next];
            if pv.i != ai
                && nv.i != ai
                && pv.i != bi
                && nv.i != bi
                && segments_intersect(pv, nv, &self.verts[a], &self.verts[b])
            {
                return true;
            }
            p = next;
            if p == a {
                return false;
            }
        }
    }

    /// does the segment from `a` towards `b` leave `a` into the polygon
    /// interior
    fn locally_inside(&self, a: usize, b: usize) -> bool {
        let av = &self.verts[a];
        let bv = &self.verts[b];
        let ap = &self.verts[av.prev];
        let an = &self.verts[av.next];
        if area(ap, av, an) < T::zero() {
            // convex corner: b must clear both incident edges
            area(av, bv, an) >= T::zero() && area(av, ap, bv) >= T::zero()
        } else {
            // reflex corner: clearing either edge is enough
            area(av, bv, ap) < T::zero() || area(av, an, bv) < T::zero()
        }
    }

    /// even-odd ray test for the midpoint of the segment `(a, b)` against
    /// the ring
    fn middle_inside(&self, a: usize, b: usize) -> bool {
        let av = self.verts[a];
        let bv = self.verts[b];
        let two = T::one() + T::one();
        let px = (av.x + bv.x) / two;
        let py = (av.y + bv.y) / two;

        let mut inside = false;
        let mut p = a;
        loop {
            let pv = self.verts[p];
            let nv = self.verts[pv.next];
            if ((pv.y > py) != (nv.y > py))
                && nv.y != pv.y
                && (px < (nv.x - pv.x) * (py - pv.y) / (nv.y - pv.y) + pv.x)
            {
                inside = !inside;
            }
            p = pv.next;
            if p == a {
                break;
            }
        }
        inside
    }

    /// Cut the ring open between `a` and `b` with a pair of duplicate
    /// vertices carrying the originals' input indices. On one ring this
    /// splits it in two; across two rings it merges them into one. Returns
    /// the duplicate of `b`.
    fn split_ring(&mut self, a: usize, b: usize) -> usize {
        let av = self.verts[a];
        let bv = self.verts[b];

        let a2 = self.verts.len();
        self.verts.push(Vertex::new(a2, av.i, av.x, av.y));
        let b2 = self.verts.len();
        self.verts.push(Vertex::new(b2, bv.i, bv.x, bv.y));

        let an = av.next;
        let bp = bv.prev;

        self.verts[a].next = b;
        self.verts[b].prev = a;
        self.verts[a2].next = an;
        self.verts[an].prev = a2;
        self.verts[b2].next = a2;
        self.verts[a2].prev = b2;
        self.verts[bp].next = b2;
        self.verts[b2].prev = bp;

        b2
    }
}

/// One-shot triangulation. See [`Triangulator::triangulate`] for the input
/// contract.
pub fn triangulate<T: Float, N: OutIndex>(data: &[T], hole_indices: &[N], dim: usize) -> Vec<N> {
    let mut out = Vec::new();
    Triangulator::new().triangulate(data, hole_indices, dim, &mut out);
    out
}

/// Relative difference between the polygon area and the total area of the
/// produced triangles; a cheap way to judge how much of the input a
/// triangulation actually covered. Zero when both areas vanish.
pub fn deviation<T: Float, N: OutIndex>(
    data: &[T],
    hole_indices: &[N],
    dim: usize,
    triangles: &[N],
) -> T {
    let dim = if dim == 0 { 2 } else { dim };
    let has_holes = !hole_indices.is_empty();
    let outer_len = if has_holes {
        hole_indices[0].as_usize() * dim
    } else {
        data.len()
    };

    let mut polygon_area = signed_area(data, 0, outer_len, dim).abs();
    if has_holes {
        for (k, hi) in hole_indices.iter().enumerate() {
            let start = hi.as_usize() * dim;
            let end = if k + 1 < hole_indices.len() {
                hole_indices[k + 1].as_usize() * dim
            } else {
                data.len()
            };
            polygon_area = polygon_area - signed_area(data, start, end, dim).abs();
        }
    }

    let mut triangles_area = T::zero();
    for t in triangles.chunks_exact(3) {
        let a = t[0].as_usize() * dim;
        let b = t[1].as_usize() * dim;
        let c = t[2].as_usize() * dim;
        triangles_area = triangles_area
            + ((data[a] - data[c]) * (data[b + 1] - data[a + 1])
                - (data[a] - data[b]) * (data[c + 1] - data[a + 1]))
                .abs();
    }

    if polygon_area == T::zero() && triangles_area == T::zero() {
        T::zero()
    } else {
        ((triangles_area - polygon_area) / polygon_area).abs()
    }
}

/// Turn a nested ring structure (outer ring first, then holes, GeoJSON
/// style) into the flat `(data, hole_indices, dim)` form [`triangulate`]
/// accepts.
pub fn flatten<T: Float>(rings: &[Vec<Vec<T>>]) -> (Vec<T>, Vec<usize>, usize) {
    let Some(first) = rings.first() else {
        return (Vec::new(), Vec::new(), 0);
    };
    let dim = first.first().map_or(2, Vec::len);

    let mut data = Vec::new();
    let mut holes = Vec::new();
    let mut vertex_count = 0;

    for (k, ring) in rings.iter().enumerate() {
        if k > 0 {
            vertex_count += rings[k - 1].len();
            holes.push(vertex_count);
        }
        for point in ring {
            data.extend_from_slice(point);
        }
    }
    (data, holes, dim)
}

/// twice the signed area of the triangle `pqr`; positive for a right turn
/// at `q` under the ring convention used here
#[inline(always)]
fn area<T: Float>(p: &Vertex<T>, q: &Vertex<T>, r: &Vertex<T>) -> T {
    (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)
}

#[inline(always)]
fn equals<T: Float>(a: &Vertex<T>, b: &Vertex<T>) -> bool {
    a.x == b.x && a.y == b.y
}

/// signed area of the ring stored at `data[start..end]`, sign encoding the
/// winding
fn signed_area<T: Float>(data: &[T], start: usize, end: usize, dim: usize) -> T {
    let mut sum = T::zero();
    let mut j = end.saturating_sub(dim);
    for i in (start..end).step_by(dim) {
        sum = sum + (data[j] - data[i]) * (data[i + 1] + data[j + 1]);
        j = i;
    }
    sum
}

/// point containment in a triangle, inclusive of its edges
#[inline(always)]
fn point_in_triangle<T: Float>(ax: T, ay: T, bx: T, by: T, cx: T, cy: T, px: T, py: T) -> bool {
    (cx - px) * (ay - py) >= (ax - px) * (cy - py)
        && (ax - px) * (by - py) >= (bx - px) * (ay - py)
        && (bx - px) * (cy - py) >= (cx - px) * (by - py)
}

/// like [`point_in_triangle`], but a point coinciding with the first corner
/// does not count
#[inline(always)]
fn point_in_triangle_except_first<T: Float>(
    ax: T,
    ay: T,
    bx: T,
    by: T,
    cx: T,
    cy: T,
    px: T,
    py: T,
) -> bool {
    !(ax == px && ay == py) && point_in_triangle(ax, ay, bx, by, cx, cy, px, py)
}

/// segment intersection test, counting touching endpoints and collinear
/// overlap as intersecting
fn segments_intersect<T: Float>(
    p1: &Vertex<T>,
    q1: &Vertex<T>,
    p2: &Vertex<T>,
    q2: &Vertex<T>,
) -> bool {
    let o1 = sign(area(p1, q1, p2));
    let o2 = sign(area(p1, q1, q2));
    let o3 = sign(area(p2, q2, p1));
    let o4 = sign(area(p2, q2, q1));

    (o1 != o2 && o3 != o4)
        || (o1 == 0 && on_segment(p1, p2, q1))
        || (o2 == 0 && on_segment(p1, q2, q1))
        || (o3 == 0 && on_segment(p2, p1, q2))
        || (o4 == 0 && on_segment(p2, q1, q2))
}

/// for collinear `p`, `q`, `r`: does `q` lie within the bounding box of
/// the segment `pr`
#[inline(always)]
fn on_segment<T: Float>(p: &Vertex<T>, q: &Vertex<T>, r: &Vertex<T>) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

#[inline(always)]
fn sign<T: Float>(v: T) -> i32 {
    if v > T::zero() {
        1
    } else if v < T::zero() {
        -1
    } else {
        0
    }
}

/// z-order (Morton) code of a point quantized to a 15-bit grid over the
/// bounding box; x bits land in even positions, y bits in odd ones
#[inline(always)]
fn z_order<T: Float>(x: T, y: T, min_x: T, min_y: T, inv_size: T) -> u32 {
    let mut x = ((x - min_x) * inv_size).to_u32().unwrap_or(0);
    let mut y = ((y - min_y) * inv_size).to_u32().unwrap_or(0);

    x = (x | (x << 8)) & 0x00FF00FF;
    x = (x | (x << 4)) & 0x0F0F0F0F;
    x = (x | (x << 2)) & 0x33333333;
    x = (x | (x << 1)) & 0x55555555;

    y = (y | (y << 8)) & 0x00FF00FF;
    y = (y | (y << 4)) & 0x0F0F0F0F;
    y = (y | (y << 2)) & 0x33333333;
    y = (y | (y << 1)) & 0x55555555;

    x | (y << 1)
}
