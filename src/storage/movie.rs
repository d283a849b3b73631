use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub code: String,
    pub title: String,
    /// Decimal rating kept as the text it was stored with, e.g. "7.9".
    pub rating: String,
    /// Release year kept as text, e.g. "1999".
    pub year: String,
    pub image_link: String,
}

impl Movie {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        rating: impl Into<String>,
        year: impl Into<String>,
        image_link: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            rating: rating.into(),
            year: year.into(),
            image_link: image_link.into(),
        }
    }

    /// Loosely-typed view of the record, keyed by column name.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("code", self.code.clone()),
            ("title", self.title.clone()),
            ("rating", self.rating.clone()),
            ("year", self.year.clone()),
            ("image_link", self.image_link.clone()),
        ])
    }
}
