// src/services/catalog_service.rs
//
// Catalog Service - the five catalog collections plus their resolved graph
//
// CRITICAL RULES:
// - The graph is resolved once on load and on relink()
// - Deletes through this service invalidate the affected graph entries
// - Derived views borrow records, nothing derived is persisted
// - Deletes are in-memory until persist_all()

use std::sync::Arc;

use log::info;

use crate::domain::{
    Actor, CatalogGraph, Category, Director, EntityId, Movie, MovieLibrary, Relation,
    ResolutionReport, Tag,
};
use crate::error::{AppError, AppResult};
use crate::repositories::{Record, RecordStore};

use super::collection_service::{
    ActorService, CategoryService, CollectionService, DirectorService, MovieService, TagService,
};
use super::resolution_service::{resolve_catalog, CatalogSnapshot};

pub struct CatalogService {
    movies: MovieService,
    actors: ActorService,
    directors: DirectorService,
    categories: CategoryService,
    tags: TagService,
    graph: CatalogGraph,
}

impl CatalogService {
    /// Loads every catalog collection from `store` and resolves the graph
    pub fn load(store: Arc<dyn RecordStore>) -> AppResult<Self> {
        let mut catalog = Self {
            movies: CollectionService::load(store.clone())?,
            actors: CollectionService::load(store.clone())?,
            directors: CollectionService::load(store.clone())?,
            categories: CollectionService::load(store.clone())?,
            tags: CollectionService::load(store)?,
            graph: CatalogGraph::new(),
        };
        info!(
            "Catalog loaded: {} movies, {} actors, {} directors, {} categories, {} tags",
            catalog.movies.len(),
            catalog.actors.len(),
            catalog.directors.len(),
            catalog.categories.len(),
            catalog.tags.len()
        );
        catalog.relink();
        Ok(catalog)
    }

    /// Rebuilds the graph from the current ID arrays
    pub fn relink(&mut self) -> &ResolutionReport {
        self.graph = resolve_catalog(CatalogSnapshot {
            movies: self.movies.records(),
            actors: self.actors.records(),
            directors: self.directors.records(),
            categories: self.categories.records(),
            tags: self.tags.records(),
        });
        self.graph.report()
    }

    pub fn graph(&self) -> &CatalogGraph {
        &self.graph
    }

    pub fn report(&self) -> &ResolutionReport {
        self.graph.report()
    }

    // ========================================================================
    // COLLECTIONS
    // ========================================================================

    pub fn movies(&self) -> &[Movie] {
        self.movies.records()
    }

    pub fn actors(&self) -> &[Actor] {
        self.actors.records()
    }

    pub fn directors(&self) -> &[Director] {
        self.directors.records()
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.records()
    }

    pub fn tags(&self) -> &[Tag] {
        self.tags.records()
    }

    pub fn find_movie_by_id(&self, id: EntityId) -> Option<&Movie> {
        self.movies.find_by_id(id)
    }

    pub fn find_movies_by_name(&self, name: &str) -> Vec<Movie> {
        self.movies.find_by_name(name)
    }

    pub fn find_actor_by_id(&self, id: EntityId) -> Option<&Actor> {
        self.actors.find_by_id(id)
    }

    pub fn find_actors_by_name(&self, firstname: &str) -> Vec<Actor> {
        self.actors.find_by_name(firstname)
    }

    pub fn find_director_by_id(&self, id: EntityId) -> Option<&Director> {
        self.directors.find_by_id(id)
    }

    pub fn find_directors_by_name(&self, firstname: &str) -> Vec<Director> {
        self.directors.find_by_name(firstname)
    }

    pub fn find_category_by_id(&self, id: EntityId) -> Option<&Category> {
        self.categories.find_by_id(id)
    }

    pub fn find_categories_by_name(&self, name: &str) -> Vec<Category> {
        self.categories.find_by_name(name)
    }

    pub fn find_tag_by_id(&self, id: EntityId) -> Option<&Tag> {
        self.tags.find_by_id(id)
    }

    pub fn find_tags_by_note(&self, note: &str) -> Vec<Tag> {
        self.tags.find_by_name(note)
    }

    // ========================================================================
    // DERIVED VIEWS
    // ========================================================================

    pub fn movie_actors(&self, movie_id: EntityId) -> Vec<&Actor> {
        resolve_ids(&self.actors, self.graph.linked(movie_id, Relation::Actor))
    }

    pub fn movie_directors(&self, movie_id: EntityId) -> Vec<&Director> {
        resolve_ids(&self.directors, self.graph.linked(movie_id, Relation::Director))
    }

    pub fn movie_categories(&self, movie_id: EntityId) -> Vec<&Category> {
        resolve_ids(&self.categories, self.graph.linked(movie_id, Relation::Category))
    }

    pub fn movie_tags(&self, movie_id: EntityId) -> Vec<&Tag> {
        resolve_ids(&self.tags, self.graph.linked(movie_id, Relation::Tag))
    }

    pub fn actor_filmography(&self, actor_id: EntityId) -> Vec<&Movie> {
        resolve_ids(&self.movies, self.graph.back_references(Relation::Actor, actor_id))
    }

    pub fn director_filmography(&self, director_id: EntityId) -> Vec<&Movie> {
        resolve_ids(
            &self.movies,
            self.graph.back_references(Relation::Director, director_id),
        )
    }

    pub fn category_movies(&self, category_id: EntityId) -> Vec<&Movie> {
        resolve_ids(
            &self.movies,
            self.graph.back_references(Relation::Category, category_id),
        )
    }

    /// Favourite movies of a library in the order they were added.
    /// IDs naming no loaded movie are skipped.
    pub fn library_movies(&self, library: &MovieLibrary) -> Vec<&Movie> {
        resolve_ids(&self.movies, library.movie_ids())
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    pub fn delete_movie(&mut self, id: EntityId) -> usize {
        let removed = self.movies.delete(id);
        if removed > 0 {
            self.graph.forget_movie(id);
        }
        removed
    }

    pub fn delete_actor(&mut self, id: EntityId) -> usize {
        let removed = self.actors.delete(id);
        self.forget_if_gone(removed, Relation::Actor, id);
        removed
    }

    pub fn delete_director(&mut self, id: EntityId) -> usize {
        let removed = self.directors.delete(id);
        self.forget_if_gone(removed, Relation::Director, id);
        removed
    }

    pub fn delete_category(&mut self, id: EntityId) -> usize {
        let removed = self.categories.delete(id);
        self.forget_if_gone(removed, Relation::Category, id);
        removed
    }

    pub fn delete_tag(&mut self, id: EntityId) -> usize {
        let removed = self.tags.delete(id);
        self.forget_if_gone(removed, Relation::Tag, id);
        removed
    }

    fn forget_if_gone(&mut self, removed: usize, relation: Relation, id: EntityId) {
        if removed > 0 {
            self.graph.forget_target(relation, id);
        }
    }

    /// Attaches a tag to a movie and persists the movies.
    /// Returns false when the movie already carried the tag.
    /// A failed write leaves the movie and the graph untagged.
    pub fn tag_movie(&mut self, movie_id: EntityId, tag_id: EntityId) -> AppResult<bool> {
        if !self.tags.contains(tag_id) {
            return Err(AppError::NotFound(format!("tag {}", tag_id)));
        }
        let movie = self
            .movies
            .find_by_id_mut(movie_id)
            .ok_or_else(|| AppError::NotFound(format!("movie {}", movie_id)))?;

        let mut updated = movie.clone();
        if !updated.add_tag(tag_id) {
            return Ok(false);
        }
        let previous = std::mem::replace(movie, updated);
        if let Err(e) = self.movies.persist() {
            if let Some(movie) = self.movies.find_by_id_mut(movie_id) {
                *movie = previous;
            }
            return Err(e);
        }
        self.graph.add_link(movie_id, Relation::Tag, tag_id);
        info!("Tagged movie {} with tag {}", movie_id, tag_id);
        Ok(true)
    }

    /// Writes all five collections back to the store
    pub fn persist_all(&self) -> AppResult<()> {
        self.movies.persist()?;
        self.actors.persist()?;
        self.directors.persist()?;
        self.categories.persist()?;
        self.tags.persist()
    }
}

/// First record for each ID, in ID order. IDs with no record are skipped.
fn resolve_ids<'a, T: Record>(service: &'a CollectionService<T>, ids: &[EntityId]) -> Vec<&'a T> {
    ids.iter().filter_map(|id| service.find_by_id(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        load_collection, save_collection, InMemoryStore, MockRecordStore, Resource,
    };
    use chrono::NaiveDate;

    fn seeded_store() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        let day = NaiveDate::from_ymd_opt(1960, 1, 1).unwrap();

        save_collection(
            store.as_ref(),
            Resource::Movies,
            &[
                Movie::new(1, "Alien", 1979)
                    .with_actors([11, 12])
                    .with_directors([21])
                    .with_categories([31]),
                Movie::new(2, "Aliens", 1986)
                    .with_actors([11])
                    .with_directors([22])
                    .with_categories([31]),
            ],
        )
        .unwrap();
        save_collection(
            store.as_ref(),
            Resource::Actors,
            &[
                Actor::new(11, "Sigourney", "Weaver", day, "US"),
                Actor::new(12, "John", "Hurt", day, "UK"),
            ],
        )
        .unwrap();
        save_collection(
            store.as_ref(),
            Resource::Directors,
            &[
                Director::new(21, "Ridley", "Scott", day, "UK"),
                Director::new(22, "James", "Cameron", day, "CA"),
            ],
        )
        .unwrap();
        save_collection(store.as_ref(), Resource::Categories, &[Category::new(31, "Sci-Fi")])
            .unwrap();
        save_collection(store.as_ref(), Resource::Tags, &[Tag::new(41, "classic")]).unwrap();
        store
    }

    fn catalog() -> (Arc<InMemoryStore>, CatalogService) {
        let store = seeded_store();
        let catalog = CatalogService::load(store.clone()).unwrap();
        (store, catalog)
    }

    fn names<T: std::fmt::Display>(records: Vec<&T>) -> Vec<String> {
        records.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_load_resolves_graph() {
        let (_store, catalog) = catalog();
        assert_eq!(catalog.movies().len(), 2);
        assert_eq!(names(catalog.movie_actors(1)), vec!["Sigourney Weaver", "John Hurt"]);
        assert_eq!(names(catalog.movie_directors(2)), vec!["James Cameron"]);
        assert_eq!(names(catalog.movie_categories(1)), vec!["Sci-Fi"]);
        assert_eq!(catalog.report().unresolved_count(), 0);
    }

    #[test]
    fn test_filmographies() {
        let (_store, catalog) = catalog();
        assert_eq!(names(catalog.actor_filmography(11)), vec!["Alien (1979)", "Aliens (1986)"]);
        assert_eq!(names(catalog.director_filmography(21)), vec!["Alien (1979)"]);
        assert_eq!(catalog.category_movies(31).len(), 2);
        assert!(catalog.actor_filmography(404).is_empty());
    }

    #[test]
    fn test_empty_store_loads_empty_catalog() {
        let store: Arc<dyn RecordStore> = Arc::new(InMemoryStore::new());
        let catalog = CatalogService::load(store).unwrap();
        assert!(catalog.movies().is_empty());
        assert!(catalog.movie_actors(1).is_empty());
    }

    #[test]
    fn test_delete_actor_invalidates_links() {
        let (_store, mut catalog) = catalog();
        assert_eq!(catalog.delete_actor(12), 1);
        assert_eq!(names(catalog.movie_actors(1)), vec!["Sigourney Weaver"]);

        // the stored ID array is untouched, a relink reports the dangling ID
        assert_eq!(catalog.find_movie_by_id(1).unwrap().actor_ids, vec![11, 12]);
        assert_eq!(catalog.relink().unresolved_count(), 1);
    }

    #[test]
    fn test_delete_movie_invalidates_back_references() {
        let (_store, mut catalog) = catalog();
        catalog.delete_movie(1);
        assert_eq!(names(catalog.actor_filmography(11)), vec!["Aliens (1986)"]);
        assert!(catalog.director_filmography(21).is_empty());
        assert_eq!(catalog.delete_movie(1), 0);
    }

    #[test]
    fn test_tag_movie_persists_movies() {
        let (store, mut catalog) = catalog();
        assert!(catalog.tag_movie(2, 41).unwrap());
        assert!(!catalog.tag_movie(2, 41).unwrap());
        assert_eq!(names(catalog.movie_tags(2)), vec!["#classic"]);

        let stored: Vec<Movie> = load_collection(store.as_ref(), Resource::Movies).unwrap();
        assert_eq!(stored[1].tag_ids, vec![41]);
    }

    #[test]
    fn test_failed_tag_write_leaves_movie_untagged() {
        let seeded = seeded_store();
        let mut store = MockRecordStore::new();
        store
            .expect_read()
            .returning(move |resource| Ok(seeded.contents(resource)));
        store
            .expect_write()
            .returning(|_, _| Err(AppError::Io(std::io::Error::other("read-only medium"))));
        let mut catalog = CatalogService::load(Arc::new(store)).unwrap();

        assert!(matches!(catalog.tag_movie(2, 41), Err(AppError::WriteFailure { .. })));
        assert!(catalog.find_movie_by_id(2).unwrap().tag_ids.is_empty());
        assert!(catalog.movie_tags(2).is_empty());

        // a retry fails the same way instead of reporting the tag as present
        assert!(matches!(catalog.tag_movie(2, 41), Err(AppError::WriteFailure { .. })));
    }

    #[test]
    fn test_tag_movie_unknown_records() {
        let (_store, mut catalog) = catalog();
        assert!(matches!(catalog.tag_movie(2, 99), Err(AppError::NotFound(_))));
        assert!(matches!(catalog.tag_movie(99, 41), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_library_movies_keep_insertion_order() {
        let (_store, catalog) = catalog();
        let mut library = MovieLibrary::new(70, "Mine", 5);
        library.add_movie(2);
        library.add_movie(404);
        library.add_movie(1);
        assert_eq!(names(catalog.library_movies(&library)), vec!["Aliens (1986)", "Alien (1979)"]);
    }

    #[test]
    fn test_find_by_name() {
        let (_store, catalog) = catalog();
        assert_eq!(catalog.find_actors_by_name("John").len(), 1);
        assert_eq!(catalog.find_directors_by_name("James").len(), 1);
        assert_eq!(catalog.find_tags_by_note("classic").len(), 1);
        assert!(catalog.find_movies_by_name("alien").is_empty());
    }
}
