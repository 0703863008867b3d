// src/main.rs

use anyhow::Context;
use log::{info, warn};

use movielib::application::{AppState, ToErrorResponse};
use movielib::domain::Identified;
use movielib::logging::init_logger;
use movielib::StorageConfig;

fn main() -> anyhow::Result<()> {
    // 1. ENVIRONMENT
    dotenvy::dotenv().ok();
    init_logger();

    // 2. STORAGE
    let config = StorageConfig::from_env().context("resolving storage directories")?;

    // 3. SERVICES
    let state = match AppState::open(config).to_error_response() {
        Ok(state) => state,
        Err(response) => {
            eprintln!("{}", response);
            std::process::exit(1);
        }
    };

    // 4. SUMMARY
    print_summary(&state);
    Ok(())
}

fn print_summary(state: &AppState) {
    let catalog = &state.catalog;

    println!(
        "{} movies, {} actors, {} directors, {} categories, {} tags",
        catalog.movies().len(),
        catalog.actors().len(),
        catalog.directors().len(),
        catalog.categories().len(),
        catalog.tags().len()
    );
    println!(
        "{} accounts, {} movie libraries",
        state.accounts.users().len(),
        state.accounts.movie_libraries().len()
    );

    for movie in catalog.movies() {
        let actors: Vec<String> = catalog
            .movie_actors(movie.id())
            .iter()
            .map(|actor| actor.full_name())
            .collect();
        let directors: Vec<String> = catalog
            .movie_directors(movie.id())
            .iter()
            .map(|director| director.full_name())
            .collect();

        println!("  {} [{:.1}]", movie, movie.rating);
        if !directors.is_empty() {
            println!("    directed by {}", directors.join(", "));
        }
        if !actors.is_empty() {
            println!("    starring {}", actors.join(", "));
        }
    }

    let report = catalog.report();
    info!("Resolution: {}", report);
    for unresolved in &report.unresolved {
        warn!(
            "Movie {} names {} {}, which is not in the catalog",
            unresolved.movie_id, unresolved.relation, unresolved.target_id
        );
    }
}
