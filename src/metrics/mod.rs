//! Calculation results shared by every product
//!
//! A `MetricSet` is an ordered list of named values. Each value carries an
//! explicit `MetricKind`, so renderers never have to guess from the name
//! whether a number is money or a percentage.

pub mod names;
pub mod report;

use serde::Serialize;
use std::fmt;

/// How a metric value should be read and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Currency amount
    Amount,
    /// Percentage points (6.25 means 6.25%)
    Percentage,
}

/// One named result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    name: String,
    value: f64,
    kind: MetricKind,
}

impl Metric {
    pub fn name(&self) -> &str { &self.name }
    pub fn value(&self) -> f64 { self.value }
    pub fn kind(&self) -> MetricKind { self.kind }
}

/// Non-fatal remarks attached to a result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "diagnostic", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Bisection ran out of iterations; the reported yield is the last midpoint
    SolverDidNotConverge { iterations: u32, residual: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SolverDidNotConverge { iterations, residual } => write!(
                f,
                "yield solver did not converge after {} iterations (price residual {:.6}); value is a best estimate",
                iterations, residual
            ),
        }
    }
}

/// Immutable, ordered set of results for one product evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSet {
    product: String,
    metrics: Vec<Metric>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<Diagnostic>,
}

impl MetricSet {
    pub fn builder(product: impl Into<String>) -> MetricSetBuilder {
        MetricSetBuilder {
            product: product.into(),
            metrics: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Product label shown as the report heading
    pub fn product(&self) -> &str { &self.product }

    /// Metrics in display order
    pub fn metrics(&self) -> &[Metric] { &self.metrics }

    pub fn diagnostics(&self) -> &[Diagnostic] { &self.diagnostics }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.metrics.iter().find(|m| m.name == name).map(|m| m.value)
    }

    pub fn kind_of(&self, name: &str) -> Option<MetricKind> {
        self.metrics.iter().find(|m| m.name == name).map(|m| m.kind)
    }

    pub fn len(&self) -> usize { self.metrics.len() }

    pub fn is_empty(&self) -> bool { self.metrics.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Metric> {
        self.metrics.iter()
    }
}

impl<'a> IntoIterator for &'a MetricSet {
    type Item = &'a Metric;
    type IntoIter = std::slice::Iter<'a, Metric>;

    fn into_iter(self) -> Self::IntoIter {
        self.metrics.iter()
    }
}

/// Collects metrics in insertion order
///
/// Pushing a name twice replaces the earlier value but keeps its position.
#[derive(Debug)]
pub struct MetricSetBuilder {
    product: String,
    metrics: Vec<Metric>,
    diagnostics: Vec<Diagnostic>,
}

impl MetricSetBuilder {
    pub fn amount(self, name: impl Into<String>, value: f64) -> Self {
        self.push(name.into(), value, MetricKind::Amount)
    }

    pub fn percentage(self, name: impl Into<String>, value: f64) -> Self {
        self.push(name.into(), value, MetricKind::Percentage)
    }

    pub fn diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn build(self) -> MetricSet {
        MetricSet {
            product: self.product,
            metrics: self.metrics,
            diagnostics: self.diagnostics,
        }
    }

    fn push(mut self, name: String, value: f64, kind: MetricKind) -> Self {
        match self.metrics.iter_mut().find(|m| m.name == name) {
            Some(existing) => {
                existing.value = value;
                existing.kind = kind;
            }
            None => self.metrics.push(Metric { name, value, kind }),
        }
        self
    }
}
