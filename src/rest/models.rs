use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct CreatedTaskResponse {
    pub id: i64,
}

#[derive(Deserialize, Default)]
pub struct ListMoviesParams {
    /// `map` returns plain key/value objects instead of typed records.
    pub view: Option<String>,
}

/// Query of `GET /movies/search`, read from raw key/value pairs so that
/// `years` may repeat as well as carry comma-separated values.
#[derive(Debug, Default, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub years: Vec<String>,
    pub min_rating: f64,
}

impl SearchParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, String> {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "query" => params.query = value,
                "years" => params.years.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|y| !y.is_empty())
                        .map(str::to_string),
                ),
                "min_rating" if value.trim().is_empty() => {}
                "min_rating" => {
                    let rating: f64 = value
                        .trim()
                        .parse()
                        .map_err(|_| format!("min_rating {value:?} is not a number"))?;
                    if !rating.is_finite() {
                        return Err("min_rating must be a finite number".to_string());
                    }
                    params.min_rating = rating;
                }
                _ => {}
            }
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn years_merge_repeated_and_comma_separated_values() {
        let params =
            SearchParams::from_pairs(pairs(&[("years", "1979, 1986"), ("years", "1992")])).unwrap();
        assert_eq!(params.years, vec!["1979", "1986", "1992"]);
    }

    #[test]
    fn min_rating_must_be_a_finite_number() {
        for bad in ["high", "inf", "NaN"] {
            assert!(SearchParams::from_pairs(pairs(&[("min_rating", bad)])).is_err(), "{bad}");
        }
        let params = SearchParams::from_pairs(pairs(&[("min_rating", "")])).unwrap();
        assert_eq!(params.min_rating, 0.0);
    }
}
