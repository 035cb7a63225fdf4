//! Divisors: formal integer combinations of curve points
//!
//! A divisor is stored as a sorted map from points to multiplicities. Sums can
//! leave zero entries behind; they are kept in the map but ignored by
//! equality, [`Divisor::support`] and [`Divisor::normalized`].
//!
//! Multiplicities and the degree are plain `i64` sums. Every entry, its
//! negation and the degree must stay within `-i64::MAX..=i64::MAX`; larger
//! sums overflow like any `i64` addition.

use crate::elliptic_curve::{CurveConfig, Point};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Neg, Sub};

pub struct Divisor<C: CurveConfig> {
    points: BTreeMap<Point<C>, i64>,
    degree: i64,
}

impl<C: CurveConfig> Divisor<C> {
    pub fn empty() -> Self {
        Self {
            points: BTreeMap::new(),
            degree: 0,
        }
    }

    /// Builds a divisor from `(point, multiplicity)` pairs; a point listed
    /// more than once gets the sum of its multiplicities.
    pub fn new<I: IntoIterator<Item = (Point<C>, i64)>>(entries: I) -> Self {
        let mut points = BTreeMap::new();
        for (point, multiplicity) in entries {
            *points.entry(point).or_insert(0) += multiplicity;
        }
        Self::from_map(points)
    }

    /// Each point with multiplicity one (repeats accumulate)
    pub fn from_points(points: &[Point<C>]) -> Self {
        Self::new(points.iter().cloned().map(|p| (p, 1)))
    }

    fn from_map(points: BTreeMap<Point<C>, i64>) -> Self {
        let degree = points.values().sum();
        Self { points, degree }
    }

    /// Sum of all multiplicities, the identity entry included
    pub fn degree(&self) -> i64 {
        self.degree
    }

    /// Multiplicity of `point`, zero if absent
    pub fn multiplicity(&self, point: &Point<C>) -> i64 {
        self.points.get(point).copied().unwrap_or(0)
    }

    /// All stored entries in point order, zero multiplicities included
    pub fn iter(&self) -> impl Iterator<Item = (&Point<C>, i64)> + '_ {
        self.points.iter().map(|(p, &m)| (p, m))
    }

    /// Points with non-zero multiplicity
    pub fn support(&self) -> impl Iterator<Item = &Point<C>> + '_ {
        self.points
            .iter()
            .filter(|(_, m)| **m != 0)
            .map(|(p, _)| p)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Copy without zero-multiplicity entries
    pub fn normalized(&self) -> Self {
        Self::from_map(
            self.points
                .iter()
                .filter(|(_, m)| **m != 0)
                .map(|(p, &m)| (p.clone(), m))
                .collect(),
        )
    }

    /// `Σ mᵢ·Pᵢ` under the group law
    pub fn point_sum(&self) -> Point<C> {
        self.points
            .iter()
            .fold(Point::Identity, |acc, (p, &m)| acc.add(&p.scalar_mul(m)))
    }

    /// Degree zero and the points sum to the identity
    pub fn is_principal(&self) -> bool {
        self.degree == 0 && self.point_sum().is_identity()
    }

    fn combine(&self, other: &Self, sign: i64) -> Self {
        let mut points = self.points.clone();
        for (p, &m) in &other.points {
            *points.entry(p.clone()).or_insert(0) += sign * m;
        }
        Self::from_map(points)
    }
}

impl<C: CurveConfig> Clone for Divisor<C> {
    fn clone(&self) -> Self {
        Self {
            points: self.points.clone(),
            degree: self.degree,
        }
    }
}

impl<C: CurveConfig> Default for Divisor<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C: CurveConfig> PartialEq for Divisor<C> {
    fn eq(&self, other: &Self) -> bool {
        self.normalized().points == other.normalized().points
    }
}

impl<C: CurveConfig> Eq for Divisor<C> {}

impl<C: CurveConfig> FromIterator<(Point<C>, i64)> for Divisor<C> {
    fn from_iter<I: IntoIterator<Item = (Point<C>, i64)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<C: CurveConfig> Add for Divisor<C> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        self.combine(&other, 1)
    }
}

impl<C: CurveConfig> Add for &Divisor<C> {
    type Output = Divisor<C>;
    fn add(self, other: &Divisor<C>) -> Divisor<C> {
        self.combine(other, 1)
    }
}

impl<C: CurveConfig> Sub for Divisor<C> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.combine(&other, -1)
    }
}

impl<C: CurveConfig> Sub for &Divisor<C> {
    type Output = Divisor<C>;
    fn sub(self, other: &Divisor<C>) -> Divisor<C> {
        self.combine(other, -1)
    }
}

impl<C: CurveConfig> Neg for Divisor<C> {
    type Output = Self;
    fn neg(self) -> Self {
        Divisor::empty().combine(&self, -1)
    }
}

impl<C: CurveConfig> Neg for &Divisor<C> {
    type Output = Divisor<C>;
    fn neg(self) -> Divisor<C> {
        Divisor::empty().combine(self, -1)
    }
}

impl<C: CurveConfig> fmt::Debug for Divisor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Divisor")
            .field("points", &self.points)
            .field("degree", &self.degree)
            .finish()
    }
}

impl<C: CurveConfig> fmt::Display for Divisor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.points.is_empty() {
            return write!(f, "0");
        }
        let terms: Vec<String> = self
            .points
            .iter()
            .map(|(p, m)| format!("{}·{}", m, p))
            .collect();
        write!(f, "{}", terms.join(" + "))
    }
}
