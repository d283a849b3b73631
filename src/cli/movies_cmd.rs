use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum MoviesCmd {
    #[command(
        about = "Insert a movie",
        long_about = "Insert one movie record. Fails if another movie already uses CODE."
    )]
    Add {
        #[arg(value_name = "CODE", help = "Unique movie code, e.g. tt0133093")]
        code: String,
        #[arg(long, value_name = "TITLE", required = true, help = "Movie title")]
        title: String,
        #[arg(long, value_name = "RATING", required = true, help = "Decimal rating, e.g. 8.7")]
        rating: String,
        #[arg(long, value_name = "YEAR", required = true, help = "Release year, e.g. 1999")]
        year: String,
        #[arg(
            long = "image-link",
            value_name = "URL",
            default_value = "",
            help = "Poster image URL"
        )]
        image_link: String,
    },
    #[command(about = "List every movie")]
    List {
        #[arg(
            long,
            default_value_t = false,
            help = "Print records as plain key/value maps"
        )]
        untyped: bool,
    },
    #[command(
        about = "Latest top-rated movies",
        long_about = "Show up to 50 movies rated above 6.0, newest first, then by rating."
    )]
    Top,
    #[command(about = "Look up a movie by code")]
    Get {
        #[arg(value_name = "CODE")]
        code: String,
    },
    #[command(
        about = "Search movies",
        long_about = "Filter movies by a case-insensitive title substring, a set of release years and a minimum rating. Omitted filters do not restrict the result."
    )]
    Search {
        #[arg(
            long,
            value_name = "TEXT",
            default_value = "",
            help = "Title substring (empty matches every title)"
        )]
        query: String,
        #[arg(
            long = "year",
            value_name = "YEAR",
            help = "Accept this release year (repeat for several)"
        )]
        years: Vec<String>,
        #[arg(
            long = "min-rating",
            value_name = "RATING",
            default_value_t = 0.0,
            value_parser = parse_min_rating,
            help = "Minimum rating, inclusive (0 disables)"
        )]
        min_rating: f64,
    },
}

fn parse_min_rating(raw: &str) -> Result<f64, String> {
    let rating: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{raw:?} is not a number"))?;
    if rating.is_finite() {
        Ok(rating)
    } else {
        Err("must be a finite number".to_string())
    }
}
