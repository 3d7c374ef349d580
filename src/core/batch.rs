use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::categorizer::Categorizer;
use crate::models::CategoryResult;

/// Reporting helper that runs the categorizer over many names
///
/// Order is preserved and duplicates are kept; collapsing them is the
/// registry's job.
#[derive(Debug, Clone)]
pub struct BatchClassifier {
    categorizer: Arc<Categorizer>,
}

impl BatchClassifier {
    pub fn new(categorizer: Arc<Categorizer>) -> Self {
        Self { categorizer }
    }

    /// Lazily categorize each name in order
    pub fn iter<'a, S>(&'a self, names: &'a [S]) -> impl Iterator<Item = CategoryResult> + 'a
    where
        S: AsRef<str>,
    {
        names
            .iter()
            .map(move |name| self.categorizer.categorize(name.as_ref()))
    }

    /// Categorize every name, one result per input
    pub fn categorize_many<S: AsRef<str>>(&self, names: &[S]) -> Vec<CategoryResult> {
        self.iter(names).collect()
    }

    /// Count of inputs per winning category; absent categories are omitted
    pub fn category_stats<S: AsRef<str>>(&self, names: &[S]) -> BTreeMap<String, usize> {
        self.iter(names).fold(BTreeMap::new(), |mut stats, result| {
            *stats.entry(result.category).or_insert(0) += 1;
            stats
        })
    }
}
