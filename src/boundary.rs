//! Dirichlet boundary values.
//! Each of the four domain edges holds a single value,
//! applied uniformly along the entire edge.

use std::collections::HashMap;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BoundaryError {
    #[error("missing boundary value for edge `{0}`")]
    MissingEdge(Edge),

    #[error("unknown boundary key `{0}`, expected one of top, bottom, left, right")]
    UnknownKey(String),

    #[error("expected KEY=VALUE, found `{0}`")]
    MalformedPair(String),

    #[error("boundary value `{value}` for edge `{edge}` is not a number")]
    NotNumeric { edge: Edge, value: String },

    #[error("boundary value {value} for edge `{edge}` is not finite")]
    NonFinite { edge: Edge, value: f64 },
}

#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// All edges, in the order they are written onto a full grid.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    pub fn name(&self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Edge {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "top" => Ok(Edge::Top),
            // Older inputs spell it `buttom`.
            "bottom" | "buttom" => Ok(Edge::Bottom),
            "left" => Ok(Edge::Left),
            "right" => Ok(Edge::Right),
            other => Err(BoundaryError::UnknownKey(other.to_string())),
        }
    }
}

/// One `KEY=VALUE` boundary assignment, as given on the command line.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EdgeAssignment {
    pub edge: Edge,
    pub value: f64,
}

impl EdgeAssignment {
    fn parse_value(edge: Edge, value: &str) -> Result<f64, BoundaryError> {
        let value = value.trim();
        let v: f64 = value.parse().map_err(|_| BoundaryError::NotNumeric {
            edge,
            value: value.to_string(),
        })?;
        check_finite(edge, v)
    }
}

impl FromStr for EdgeAssignment {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| BoundaryError::MalformedPair(s.to_string()))?;
        let edge: Edge = key.parse()?;
        let value = Self::parse_value(edge, value)?;
        Ok(EdgeAssignment { edge, value })
    }
}

fn check_finite(edge: Edge, value: f64) -> Result<f64, BoundaryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BoundaryError::NonFinite { edge, value })
    }
}

/// Fixed values on the four edges of the domain.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundaryConditions {
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
}

impl BoundaryConditions {
    pub fn new(
        top: f64,
        bottom: f64,
        left: f64,
        right: f64,
    ) -> Result<Self, BoundaryError> {
        Ok(BoundaryConditions {
            top: check_finite(Edge::Top, top)?,
            bottom: check_finite(Edge::Bottom, bottom)?,
            left: check_finite(Edge::Left, left)?,
            right: check_finite(Edge::Right, right)?,
        })
    }

    /// Same value on every edge.
    pub fn uniform(value: f64) -> Result<Self, BoundaryError> {
        Self::new(value, value, value, value)
    }

    /// Collect assignments, requiring every edge to be present.
    /// A repeated edge keeps its last value.
    pub fn from_assignments<I: IntoIterator<Item = EdgeAssignment>>(
        assignments: I,
    ) -> Result<Self, BoundaryError> {
        let mut values: HashMap<Edge, f64> = HashMap::new();
        for a in assignments {
            if let Some(previous) = values.insert(a.edge, a.value) {
                tracing::warn!(
                    "boundary edge `{}` given twice, {} replaces {}",
                    a.edge,
                    a.value,
                    previous
                );
            }
        }
        let get = |edge: Edge| {
            values
                .get(&edge)
                .copied()
                .ok_or(BoundaryError::MissingEdge(edge))
        };
        Self::new(
            get(Edge::Top)?,
            get(Edge::Bottom)?,
            get(Edge::Left)?,
            get(Edge::Right)?,
        )
    }

    /// Build from string keys and values, e.g. a parsed key=value list.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, BoundaryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let assignments = pairs
            .into_iter()
            .map(|(k, v)| {
                let edge: Edge = k.as_ref().parse()?;
                let value = EdgeAssignment::parse_value(edge, v.as_ref())?;
                Ok(EdgeAssignment { edge, value })
            })
            .collect::<Result<Vec<_>, BoundaryError>>()?;
        Self::from_assignments(assignments)
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn get(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
            Edge::Right => self.right,
        }
    }

    /// Every edge value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        BoundaryConditions {
            top: self.top * factor,
            bottom: self.bottom * factor,
            left: self.left * factor,
            right: self.right * factor,
        }
    }

    /// Smallest and largest edge value.
    pub fn range(&self) -> (f64, f64) {
        Edge::ALL.iter().fold((f64::MAX, f64::MIN), |(lo, hi), e| {
            let v = self.get(*e);
            (lo.min(v), hi.max(v))
        })
    }
}
