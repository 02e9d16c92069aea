//! Pluggable domain classification.
//!
//! The scorer rewards fragments that share a specialist domain with the
//! query, but which terms mark that domain belongs to the caller, not the
//! engine. The engine depends on this capability through a trait so new
//! domains never touch scoring code.

use crate::normalize;
use std::collections::BTreeSet;

/// Decides whether a (normalized) term set belongs to the recognized
/// specialist domain.
pub trait DomainClassifier: Send + Sync {
    fn is_domain(&self, terms: &BTreeSet<String>) -> bool;
}

/// Classifier backed by a small set of marker terms: one hit is enough.
///
/// Markers are folded through the same normalization as queries and
/// fragments, so "Ressonância" supplied as a marker matches "ressonancia"
/// in text.
#[derive(Debug, Clone, Default)]
pub struct MarkerClassifier {
    markers: BTreeSet<String>,
}

impl MarkerClassifier {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .flat_map(|m| normalize::terms(m.as_ref()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl DomainClassifier for MarkerClassifier {
    fn is_domain(&self, terms: &BTreeSet<String>) -> bool {
        terms.iter().any(|t| self.markers.contains(t))
    }
}
