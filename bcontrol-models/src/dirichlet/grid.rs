use super::ConfigError;

/// Mesh coordinates of a grid point, each in `0..=N+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl Point {
    #[must_use]
    pub fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }
}

/// Classification of a grid point by how many coordinates lie on the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// No coordinate on the boundary; carries a PDE constraint.
    Interior,
    /// Exactly one coordinate on the boundary; a control value referenced by
    /// the stencil of an adjacent interior point.
    Face,
    /// Two or more coordinates on the boundary; referenced by no stencil.
    Edge,
}

/// Structured cubic lattice with `N` interior points per dimension and one
/// boundary layer on each side.
///
/// Owns the bijections between mesh coordinates and variable/constraint
/// numbers. All mappings are pure arithmetic and fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    n: usize,
    h: f64,
    hh: f64,
    hhh: f64,
}

impl Grid {
    /// Creates a grid with `n` interior points per dimension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::GridTooSmall`] if `n` is zero, and
    /// [`ConfigError::GridTooLarge`] if the variable count or the Jacobian
    /// nonzero count would overflow `usize`.
    pub fn new(n: usize) -> Result<Self, ConfigError> {
        if n < 1 {
            return Err(ConfigError::GridTooSmall { n });
        }

        let cube = |s: usize| s.checked_mul(s).and_then(|ss| ss.checked_mul(s));
        let fits = n
            .checked_add(2)
            .and_then(cube)
            .zip(cube(n).and_then(|m| m.checked_mul(7)))
            .is_some();
        if !fits {
            return Err(ConfigError::GridTooLarge { n });
        }

        #[allow(clippy::cast_precision_loss)]
        let h = 1.0 / (n + 1) as f64;

        Ok(Self {
            n,
            h,
            hh: h * h,
            hhh: h * h * h,
        })
    }

    /// Number of interior points per dimension.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of points per dimension, boundary included.
    #[must_use]
    pub fn side(&self) -> usize {
        self.n + 2
    }

    /// Step size `1/(N+1)`.
    #[must_use]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Squared step size.
    #[must_use]
    pub fn hh(&self) -> f64 {
        self.hh
    }

    /// Cubed step size.
    #[must_use]
    pub fn hhh(&self) -> f64 {
        self.hhh
    }

    /// Total number of grid points, `(N+2)³`.
    #[must_use]
    pub fn num_points(&self) -> usize {
        let s = self.side();
        s * s * s
    }

    /// Number of interior points, `N³`.
    #[must_use]
    pub fn num_interior(&self) -> usize {
        self.n * self.n * self.n
    }

    /// Number of face points, `6·N²`.
    #[must_use]
    pub fn num_faces(&self) -> usize {
        6 * self.n * self.n
    }

    /// Variable number of the state at `(i, j, k)`.
    #[inline]
    #[must_use]
    pub fn y_index(&self, i: usize, j: usize, k: usize) -> usize {
        let s = self.side();
        k + s * j + s * s * i
    }

    /// Constraint number of the PDE at interior point `(i, j, k)`.
    #[inline]
    #[must_use]
    pub fn pde_index(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!((1..=self.n).contains(&i));
        debug_assert!((1..=self.n).contains(&j));
        debug_assert!((1..=self.n).contains(&k));
        (k - 1) + self.n * (j - 1) + self.n * self.n * (i - 1)
    }

    /// Inverse of [`Grid::y_index`].
    #[must_use]
    pub fn point(&self, index: usize) -> Point {
        let s = self.side();
        Point::new(index / (s * s), (index / s) % s, index % s)
    }

    /// Physical coordinate along x1 of mesh index `i`.
    #[must_use]
    pub fn x1_grid(&self, i: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let x = self.h * i as f64;
        x
    }

    /// Physical coordinate along x2 of mesh index `j`.
    #[must_use]
    pub fn x2_grid(&self, j: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let x = self.h * j as f64;
        x
    }

    /// Physical coordinate along x3 of mesh index `k`.
    #[must_use]
    pub fn x3_grid(&self, k: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let x = self.h * k as f64;
        x
    }

    /// Classifies a point as interior, face, or edge.
    #[must_use]
    pub fn kind(&self, p: Point) -> PointKind {
        let on_boundary = |c: usize| c == 0 || c == self.n + 1;
        let count = [p.i, p.j, p.k]
            .into_iter()
            .filter(|&c| on_boundary(c))
            .count();
        match count {
            0 => PointKind::Interior,
            1 => PointKind::Face,
            _ => PointKind::Edge,
        }
    }

    /// Iterates over every point in variable order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let s = self.side();
        (0..s).flat_map(move |i| (0..s).flat_map(move |j| (0..s).map(move |k| Point::new(i, j, k))))
    }

    /// Iterates over the interior points in constraint order.
    pub fn interior(&self) -> impl Iterator<Item = Point> {
        let n = self.n;
        (1..=n).flat_map(move |i| {
            (1..=n).flat_map(move |j| (1..=n).map(move |k| Point::new(i, j, k)))
        })
    }

    /// Iterates over the face points: `i = 0`, `i = N+1`, `j = 0`,
    /// `j = N+1`, `k = 0`, `k = N+1`, each face in lexicographic order.
    pub fn faces(&self) -> impl Iterator<Item = Point> {
        let n = self.n;
        let last = n + 1;
        let plane = move || (1..=n).flat_map(move |a| (1..=n).map(move |b| (a, b)));

        plane()
            .map(move |(j, k)| Point::new(0, j, k))
            .chain(plane().map(move |(j, k)| Point::new(last, j, k)))
            .chain(plane().map(move |(i, k)| Point::new(i, 0, k)))
            .chain(plane().map(move |(i, k)| Point::new(i, last, k)))
            .chain(plane().map(move |(i, j)| Point::new(i, j, 0)))
            .chain(plane().map(move |(i, j)| Point::new(i, j, last)))
    }

    /// Variable numbers of the 7-point stencil around interior point `p`:
    /// centre, then `i∓1`, `j∓1`, `k∓1`.
    #[must_use]
    pub fn stencil(&self, p: Point) -> [usize; 7] {
        let Point { i, j, k } = p;
        debug_assert_eq!(self.kind(p), PointKind::Interior);
        [
            self.y_index(i, j, k),
            self.y_index(i - 1, j, k),
            self.y_index(i + 1, j, k),
            self.y_index(i, j - 1, k),
            self.y_index(i, j + 1, k),
            self.y_index(i, j, k - 1),
            self.y_index(i, j, k + 1),
        ]
    }
}
