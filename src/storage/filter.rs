//! Search query composition for the `movies` table.
//!
//! Every active filter becomes a [`Predicate`]: a condition fragment plus the
//! single value bound to it. The final statement is produced by folding over
//! the active predicates and numbering placeholders as they are appended, so a
//! skipped filter never reserves a placeholder index.

use std::collections::BTreeSet;

use rusqlite::types::Value;

pub(crate) const MOVIE_COLUMNS: &str = "code, title, rating, year, image_link";

/// Marker replaced by the numbered placeholder when a predicate is rendered.
const SLOT: &str = "{slot}";

/// Parses every stored rating. SQLite may short-circuit the `AND` chain in any
/// order, so a rating bound alone does not reach rows excluded by other filters.
pub(crate) const RATING_GUARD_SQL: &str = "SELECT total(parse_real(rating)) FROM movies";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchCriteria {
    /// Case-insensitive title substring. Empty means no title filter.
    pub title: String,
    /// Exact release years to accept. Empty means any year.
    pub years: BTreeSet<String>,
    /// Inclusive lower bound on the numeric rating. Zero or less means no bound.
    pub min_rating: f64,
}

impl SearchCriteria {
    pub fn new<I, S>(title: impl Into<String>, years: I, min_rating: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            years: years.into_iter().map(Into::into).collect(),
            min_rating,
        }
    }

    pub fn compares_rating(&self) -> bool {
        self.min_rating > 0.0
    }

    /// Predicates for the filters that are present, in application order.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::with_capacity(3);
        if !self.title.is_empty() {
            out.push(Predicate::new(
                "contains_ci(title, {slot})",
                Value::Text(self.title.clone()),
            ));
        }
        if !self.years.is_empty() {
            let years = serde_json::Value::Array(
                self.years
                    .iter()
                    .cloned()
                    .map(serde_json::Value::String)
                    .collect(),
            );
            out.push(Predicate::new(
                "year IN (SELECT value FROM json_each({slot}))",
                Value::Text(years.to_string()),
            ));
        }
        if self.compares_rating() {
            out.push(Predicate::new(
                "parse_real(rating) >= {slot}",
                Value::Real(self.min_rating),
            ));
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    fragment: &'static str,
    value: Value,
}

impl Predicate {
    fn new(fragment: &'static str, value: Value) -> Self {
        Self { fragment, value }
    }

    fn render(&self, index: usize) -> String {
        self.fragment.replace(SLOT, &format!("?{index}"))
    }
}

/// A fully rendered statement with its positional parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchQuery {
    pub sql: String,
    pub params: Vec<Value>,
    /// Run before `sql` when a rating bound is active, so that any unparsable
    /// rating in the table fails the search whatever the other filters are.
    pub guard: Option<&'static str>,
}

impl SearchQuery {
    pub fn build(criteria: &SearchCriteria) -> Self {
        let (conditions, params) = criteria.predicates().into_iter().fold(
            (Vec::new(), Vec::new()),
            |(mut conditions, mut params): (Vec<String>, Vec<Value>), predicate| {
                conditions.push(predicate.render(params.len() + 1));
                params.push(predicate.value);
                (conditions, params)
            },
        );

        let mut sql = format!("SELECT {MOVIE_COLUMNS} FROM movies");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        let guard = criteria.compares_rating().then_some(RATING_GUARD_SQL);
        Self { sql, params, guard }
    }

    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}
