use std::io::Write;

use anyhow::{Context, Result};

use super::{print_json, CommandRunner};
use crate::cli;
use crate::storage::{Movie, MovieStore, SearchCriteria, Storage};

impl CommandRunner for cli::MoviesCmd {
    fn run(&self, storage: &dyn Storage, out: &mut dyn Write) -> Result<()> {
        let _span = ::tracing::info_span!("movies").entered();
        match self {
            cli::MoviesCmd::Add {
                code,
                title,
                rating,
                year,
                image_link,
            } => {
                let movie = Movie::new(code, title, rating, year, image_link);
                storage
                    .insert_movie(&movie)
                    .with_context(|| format!("adding movie {code}"))?;
                log::info!("✅ Added movie {}", code);
                Ok(())
            }
            cli::MoviesCmd::List { untyped } => {
                let movies = storage.fetch_all_movies().context("listing movies")?;
                if *untyped {
                    let maps: Vec<_> = movies.iter().map(Movie::to_map).collect();
                    print_json(out, &maps)
                } else {
                    print_json(out, &movies)
                }
            }
            cli::MoviesCmd::Top => {
                let movies = storage
                    .fetch_top_rated_recent()
                    .context("fetching top-rated movies")?;
                print_json(out, &movies)
            }
            cli::MoviesCmd::Get { code } => {
                let movie = storage
                    .get_by_code(code)
                    .with_context(|| format!("looking up movie {code}"))?;
                print_json(out, &movie)
            }
            cli::MoviesCmd::Search {
                query,
                years,
                min_rating,
            } => {
                let criteria = SearchCriteria::new(query.as_str(), years.iter().cloned(), *min_rating);
                let movies = storage.search_movies(&criteria).context("searching movies")?;
                log::info!("🔎 {} movies matched", movies.len());
                print_json(out, &movies)
            }
        }
    }
}
