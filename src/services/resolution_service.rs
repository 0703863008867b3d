// src/services/resolution_service.rs
//
// Resolution Service - derives the navigable graph from stored ID arrays
//
// CRITICAL RULES:
// - Reads loaded collections only, never the store
// - Never fails: an ID matching no record is skipped and only reported
// - Forward links follow ID-array order, first record with the ID wins
// - Back-references follow movie-collection order
// - Deterministic: same collections, same graph
// - Does NOT rewrite any stored ID array

use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};

use crate::domain::identity::references;
use crate::domain::{
    Actor, CatalogGraph, Category, Director, EntityId, Identified, Movie, MovieLibrary, MovieLinks,
    Relation, ResolutionReport, Tag, UnresolvedReference, User,
};

// ============================================================================
// INPUT
// ============================================================================

/// Borrowed view of the five catalog collections
#[derive(Debug, Clone, Copy)]
pub struct CatalogSnapshot<'a> {
    pub movies: &'a [Movie],
    pub actors: &'a [Actor],
    pub directors: &'a [Director],
    pub categories: &'a [Category],
    pub tags: &'a [Tag],
}

/// IDs that resolve to a loaded record, per relation
struct KnownTargets {
    actors: HashSet<EntityId>,
    directors: HashSet<EntityId>,
    categories: HashSet<EntityId>,
    tags: HashSet<EntityId>,
}

impl KnownTargets {
    fn index(snapshot: &CatalogSnapshot<'_>) -> Self {
        Self {
            actors: id_set(snapshot.actors),
            directors: id_set(snapshot.directors),
            categories: id_set(snapshot.categories),
            tags: id_set(snapshot.tags),
        }
    }

    fn get(&self, relation: Relation) -> &HashSet<EntityId> {
        match relation {
            Relation::Actor => &self.actors,
            Relation::Director => &self.directors,
            Relation::Category => &self.categories,
            Relation::Tag => &self.tags,
        }
    }
}

fn id_set<T: Identified>(records: &[T]) -> HashSet<EntityId> {
    records.iter().map(|record| record.id()).collect()
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Builds forward links and back-references for the whole catalog
pub fn resolve_catalog(snapshot: CatalogSnapshot<'_>) -> CatalogGraph {
    let known = KnownTargets::index(&snapshot);
    let mut graph = CatalogGraph::new();
    let mut report = ResolutionReport::default();

    for movie in snapshot.movies {
        let links = forward_links(movie, &known, &mut report);
        report.links_made += links.total();
        report.movies_linked += 1;
        graph.set_links(movie.id(), links);
    }

    for relation in Relation::ALL {
        if !relation.has_back_references() {
            continue;
        }
        let by_target = back_references(snapshot.movies, relation, known.get(relation));
        report.back_references_made += by_target.values().map(Vec::len).sum::<usize>();
        graph.set_back_references(relation, by_target);
    }

    info!("Catalog resolved: {}", report);
    graph.set_report(report);
    graph
}

fn forward_links(movie: &Movie, known: &KnownTargets, report: &mut ResolutionReport) -> MovieLinks {
    let mut links = MovieLinks::default();

    for relation in Relation::ALL {
        let targets = known.get(relation);
        let resolved = links.get_mut(relation);

        for target_id in references(relation.ids_of(movie)) {
            if targets.contains(&target_id) {
                resolved.push(target_id);
            } else {
                debug!(
                    "Movie {} references unknown {} {}",
                    movie.id(),
                    relation,
                    target_id
                );
                report.unresolved.push(UnresolvedReference {
                    movie_id: movie.id(),
                    relation,
                    target_id,
                });
            }
        }
    }

    links
}

/// Movie IDs per target, in movie order. A movie naming a target twice is listed once.
fn back_references(
    movies: &[Movie],
    relation: Relation,
    targets: &HashSet<EntityId>,
) -> HashMap<EntityId, Vec<EntityId>> {
    let mut by_target: HashMap<EntityId, Vec<EntityId>> = HashMap::new();

    for movie in movies {
        let mut seen = HashSet::new();
        for target_id in references(relation.ids_of(movie)) {
            if targets.contains(&target_id) && seen.insert(target_id) {
                by_target.entry(target_id).or_default().push(movie.id());
            }
        }
    }

    by_target
}

// ============================================================================
// LIBRARY LINKING
// ============================================================================

/// Links every user to the library naming them as owner.
/// Users already linked keep their link, so the first library naming an owner
/// wins. Returns how many links were made.
pub fn link_libraries(users: &mut [User], libraries: &[MovieLibrary]) -> usize {
    let mut linked = 0;

    for library in libraries {
        for user in users.iter_mut().filter(|u| u.id() == library.owner_id()) {
            if user.link_library(library.id()) {
                debug!("Linked library {} to user {}", library.id(), user.id());
                linked += 1;
            } else if user.library_id() != Some(library.id()) {
                warn!(
                    "User {} already owns library {:?}, library {} left unlinked",
                    user.id(),
                    user.library_id(),
                    library.id()
                );
            }
        }
    }

    linked
}
