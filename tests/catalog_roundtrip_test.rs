// tests/catalog_roundtrip_test.rs
//
// End-to-end: JSON files on disk → services → JSON files on disk

use std::fs;
use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use movielib::{
    load_collection, save_collection, AppError, AppState, Credentials, JsonFileStore, LibraryUpdate,
    Movie, NewAccount, RecordStore, Resource, Role, Session, StorageConfig, Tag, User,
};

const MOVIES_JSON: &str = r#"[
  {
    "ID": 1, "name": "Alien", "releaseYear": 1979, "rating": 8.5,
    "description": "In space no one can hear you scream",
    "actorsID": [11, 12, 0, 0], "directorsID": [21, 0], "categoriesID": [31], "tagsID": [0]
  },
  {
    "ID": 2, "name": "Blade Runner", "releaseYear": 1982, "rating": 8.1,
    "description": "More human than human",
    "actorsID": [13, 77], "directorsID": [21], "categoriesID": [31, 32]
  }
]"#;

const ACTORS_JSON: &str = r#"[
  {"ID": 11, "firstname": "Sigourney", "lastname": "Weaver", "birthday": "1949-10-08", "country": "USA"},
  {"ID": 12, "firstname": "Ian", "lastname": "Holm", "birthday": "1931-09-12", "country": "UK"},
  {"ID": 13, "firstname": "Harrison", "lastname": "Ford", "birthday": "1942-07-13", "country": "USA"}
]"#;

const DIRECTORS_JSON: &str = r#"[
  {"ID": 21, "firstname": "Ridley", "lastname": "Scott", "birthday": "1937-11-30", "country": "UK"}
]"#;

const CATEGORIES_JSON: &str = r#"[
  {"ID": 31, "name": "Sci-Fi", "filmscollectionID": [1, 2]},
  {"ID": 32, "name": "Noir"}
]"#;

fn seeded_dir() -> (TempDir, StorageConfig) {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::at(dir.path());
    config.ensure_dirs().unwrap();

    for (file, contents) in [
        ("Movie.JSON", MOVIES_JSON),
        ("Actor.JSON", ACTORS_JSON),
        ("Director.JSON", DIRECTORS_JSON),
        ("Category.JSON", CATEGORIES_JSON),
    ] {
        fs::write(config.catalog_dir.join(file), contents).unwrap();
    }
    (dir, config)
}

fn new_account(username: &str, role: Role) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        password: "Secret123".to_string(),
        birthday: NaiveDate::from_ymd_opt(1985, 12, 1).unwrap(),
        email: format!("{}@example.com", username),
        role,
    }
}

#[test]
fn test_catalog_resolves_from_disk() {
    let (_dir, config) = seeded_dir();
    let state = AppState::open(config).unwrap();
    let catalog = &state.catalog;

    assert_eq!(catalog.movies().len(), 2);
    assert!(catalog.tags().is_empty());

    let alien_cast: Vec<String> = catalog.movie_actors(1).iter().map(|a| a.full_name()).collect();
    assert_eq!(alien_cast, vec!["Sigourney Weaver", "Ian Holm"]);

    let scott: Vec<&str> = catalog
        .director_filmography(21)
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(scott, vec!["Alien", "Blade Runner"]);

    assert_eq!(catalog.category_movies(32).len(), 1);

    // actor 77 is named by a movie but not in the catalog
    let report = catalog.report();
    assert_eq!(report.unresolved_count(), 1);
    assert_eq!(report.unresolved[0].target_id, 77);
}

#[test]
fn test_missing_and_empty_files_load_as_empty() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::at(dir.path());
    let state = AppState::open(config.clone()).unwrap();
    assert!(state.catalog.movies().is_empty());
    assert!(state.accounts.users().is_empty());

    fs::write(config.catalog_dir.join("Movie.JSON"), "").unwrap();
    let store = JsonFileStore::open(config).unwrap();
    let movies: Vec<Movie> = load_collection(&store, Resource::Movies).unwrap();
    assert!(movies.is_empty());
}

#[test]
fn test_corrupt_file_names_the_resource() {
    let (_dir, config) = seeded_dir();
    fs::write(config.catalog_dir.join("Movie.JSON"), "[{\"ID\": 1,").unwrap();

    match AppState::open(config) {
        Err(AppError::ReadFailure { resource, .. }) => assert_eq!(resource, "Movie.JSON"),
        Err(other) => panic!("expected ReadFailure, got {:?}", other),
        Ok(_) => panic!("expected ReadFailure, got a loaded catalog"),
    }
}

#[test]
fn test_save_and_reload_preserves_ids() {
    let (_dir, config) = seeded_dir();
    let store = JsonFileStore::open(config.clone()).unwrap();

    let tags = vec![Tag::new(41, "classic"), Tag::new(42, "cult")];
    save_collection(&store, Resource::Tags, &tags).unwrap();
    assert!(!config.catalog_dir.join("Tag.JSON.tmp").exists());

    let reloaded: Vec<Tag> = load_collection(&store, Resource::Tags).unwrap();
    assert_eq!(reloaded, tags);
}

#[test]
fn test_account_flow_survives_restart() {
    let (_dir, config) = seeded_dir();

    let (user_id, library_id) = {
        let mut state = AppState::open(config.clone()).unwrap();
        let user_id = state
            .accounts
            .create_account(new_account("film_buff", Role::User))
            .unwrap()
            .user_id()
            .unwrap();
        let library_id = state.accounts.create_movie_library(user_id, "Favourites").unwrap();

        let catalog = &state.catalog;
        assert_eq!(
            state.accounts.add_movie_to_library(catalog, user_id, 2).unwrap(),
            LibraryUpdate::Added
        );
        assert_eq!(
            state.accounts.add_movie_to_library(catalog, user_id, 99).unwrap(),
            LibraryUpdate::UnknownMovie
        );
        (user_id, library_id)
    };

    assert!(config.accounts_dir.join("User.JSON").exists());
    assert!(config.catalog_dir.join("MovieLibrary.JSON").exists());

    let mut state = AppState::open(config.clone()).unwrap();
    let session = state.accounts.sign_in(&Credentials {
        username: "film_buff".to_string(),
        email: "film_buff@example.com".to_string(),
        password: "Secret123".to_string(),
    });
    assert_eq!(session, Session::LibraryConfigured { user_id, library_id });

    let library = state.accounts.library_of(user_id).unwrap();
    let favourites: Vec<&str> = state
        .catalog
        .library_movies(library)
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(favourites, vec!["Blade Runner"]);

    // no plaintext password on disk
    let store = JsonFileStore::open(config).unwrap();
    let raw = store.read(Resource::Users).unwrap().unwrap();
    assert!(!raw.contains("Secret123"));
    let users: Vec<User> = load_collection(&store, Resource::Users).unwrap();
    assert_eq!(users.len(), 1);
}

#[test]
fn test_deleting_last_account_empties_the_file() {
    let (_dir, config) = seeded_dir();
    let mut state = AppState::open(config.clone()).unwrap();

    let admin = state
        .accounts
        .create_account(new_account("head_admin", Role::Admin))
        .unwrap();
    let admin_id = admin.user_id().unwrap();
    state.accounts.delete_account(&admin, admin_id).unwrap();

    let contents = fs::read_to_string(config.accounts_dir.join("User.JSON")).unwrap();
    assert!(contents.is_empty());

    let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::open(config).unwrap());
    assert!(AppState::with_store(store).unwrap().accounts.users().is_empty());
}
