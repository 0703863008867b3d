// src/domain/graph/value_objects.rs
//
// Graph Value Objects
//
// CRITICAL INVARIANTS:
// - Forward links hold only IDs that matched a loaded record, in ID-array order
// - Back-references hold movie IDs in movie-collection order
// - Tags are referenced by movies only, they have no back-references

use std::collections::HashMap;

use crate::domain::identity::EntityId;
use crate::domain::movie::Movie;

// ============================================================================
// RELATION
// ============================================================================

/// The four relations a movie stores as ID arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Actor,
    Director,
    Category,
    Tag,
}

impl Relation {
    pub const ALL: [Relation; 4] = [
        Relation::Actor,
        Relation::Director,
        Relation::Category,
        Relation::Tag,
    ];

    /// The authoritative ID array of `movie` for this relation
    pub fn ids_of(self, movie: &Movie) -> &[EntityId] {
        match self {
            Relation::Actor => &movie.actor_ids,
            Relation::Director => &movie.director_ids,
            Relation::Category => &movie.category_ids,
            Relation::Tag => &movie.tag_ids,
        }
    }

    /// Whether the related record keeps a list of the movies referencing it
    pub fn has_back_references(self) -> bool {
        match self {
            Relation::Actor | Relation::Director | Relation::Category => true,
            Relation::Tag => false,
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Actor => write!(f, "actor"),
            Relation::Director => write!(f, "director"),
            Relation::Category => write!(f, "category"),
            Relation::Tag => write!(f, "tag"),
        }
    }
}

// ============================================================================
// MOVIE LINKS
// ============================================================================

/// Resolved forward links of one movie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieLinks {
    pub actors: Vec<EntityId>,
    pub directors: Vec<EntityId>,
    pub categories: Vec<EntityId>,
    pub tags: Vec<EntityId>,
}

impl MovieLinks {
    pub fn get(&self, relation: Relation) -> &[EntityId] {
        match relation {
            Relation::Actor => &self.actors,
            Relation::Director => &self.directors,
            Relation::Category => &self.categories,
            Relation::Tag => &self.tags,
        }
    }

    pub fn get_mut(&mut self, relation: Relation) -> &mut Vec<EntityId> {
        match relation {
            Relation::Actor => &mut self.actors,
            Relation::Director => &mut self.directors,
            Relation::Category => &mut self.categories,
            Relation::Tag => &mut self.tags,
        }
    }

    pub fn total(&self) -> usize {
        Relation::ALL.iter().map(|r| self.get(*r).len()).sum()
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// An ID in a movie's array that matched no loaded record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub movie_id: EntityId,
    pub relation: Relation,
    pub target_id: EntityId,
}

/// Outcome of one resolution pass.
/// Unresolved references are diagnostics only, resolution itself never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub movies_linked: usize,
    pub links_made: usize,
    pub back_references_made: usize,
    pub unresolved: Vec<UnresolvedReference>,
}

impl ResolutionReport {
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }

    pub fn unresolved_for(&self, relation: Relation) -> impl Iterator<Item = &UnresolvedReference> {
        self.unresolved.iter().filter(move |u| u.relation == relation)
    }
}

impl std::fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} movies, {} links, {} back-references, {} unresolved",
            self.movies_linked,
            self.links_made,
            self.back_references_made,
            self.unresolved.len()
        )
    }
}

// ============================================================================
// CATALOG GRAPH
// ============================================================================

/// Derived navigation over the loaded catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogGraph {
    movie_links: HashMap<EntityId, MovieLinks>,
    back_references: HashMap<Relation, HashMap<EntityId, Vec<EntityId>>>,
    report: ResolutionReport,
}

impl CatalogGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn links(&self, movie_id: EntityId) -> Option<&MovieLinks> {
        self.movie_links.get(&movie_id)
    }

    /// Resolved IDs of `relation` for a movie, empty when the movie is unknown
    pub fn linked(&self, movie_id: EntityId, relation: Relation) -> &[EntityId] {
        self.movie_links
            .get(&movie_id)
            .map(|links| links.get(relation))
            .unwrap_or(&[])
    }

    /// Movies referencing `target_id` through `relation`, in movie order
    pub fn back_references(&self, relation: Relation, target_id: EntityId) -> &[EntityId] {
        self.back_references
            .get(&relation)
            .and_then(|by_target| by_target.get(&target_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn report(&self) -> &ResolutionReport {
        &self.report
    }

    pub fn movie_count(&self) -> usize {
        self.movie_links.len()
    }

    // ------------------------------------------------------------------------
    // Construction and maintenance
    // ------------------------------------------------------------------------

    pub(crate) fn set_links(&mut self, movie_id: EntityId, links: MovieLinks) {
        self.movie_links.insert(movie_id, links);
    }

    pub(crate) fn set_back_references(
        &mut self,
        relation: Relation,
        by_target: HashMap<EntityId, Vec<EntityId>>,
    ) {
        self.back_references.insert(relation, by_target);
    }

    pub(crate) fn set_report(&mut self, report: ResolutionReport) {
        self.report = report;
    }

    /// Adds one forward link and the matching back-reference
    pub(crate) fn add_link(&mut self, movie_id: EntityId, relation: Relation, target_id: EntityId) {
        let forward = self.movie_links.entry(movie_id).or_default().get_mut(relation);
        if !forward.contains(&target_id) {
            forward.push(target_id);
        }
        if relation.has_back_references() {
            let movies = self
                .back_references
                .entry(relation)
                .or_default()
                .entry(target_id)
                .or_default();
            if !movies.contains(&movie_id) {
                movies.push(movie_id);
            }
        }
    }

    /// Drops a deleted movie from its own links and from every back-reference list
    pub(crate) fn forget_movie(&mut self, movie_id: EntityId) {
        self.movie_links.remove(&movie_id);
        for by_target in self.back_references.values_mut() {
            for movies in by_target.values_mut() {
                movies.retain(|id| *id != movie_id);
            }
        }
    }

    /// Drops a deleted related record from every movie's links and its back-references
    pub(crate) fn forget_target(&mut self, relation: Relation, target_id: EntityId) {
        for links in self.movie_links.values_mut() {
            links.get_mut(relation).retain(|id| *id != target_id);
        }
        if let Some(by_target) = self.back_references.get_mut(&relation) {
            by_target.remove(&target_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_link_keeps_both_directions() {
        let mut graph = CatalogGraph::new();
        graph.add_link(1, Relation::Actor, 10);
        graph.add_link(2, Relation::Actor, 10);
        graph.add_link(1, Relation::Actor, 10);

        assert_eq!(graph.linked(1, Relation::Actor), &[10]);
        assert_eq!(graph.back_references(Relation::Actor, 10), &[1, 2]);
    }

    #[test]
    fn test_tags_have_no_back_references() {
        let mut graph = CatalogGraph::new();
        graph.add_link(1, Relation::Tag, 5);
        assert_eq!(graph.linked(1, Relation::Tag), &[5]);
        assert!(graph.back_references(Relation::Tag, 5).is_empty());
    }

    #[test]
    fn test_forget_movie_and_target() {
        let mut graph = CatalogGraph::new();
        graph.add_link(1, Relation::Director, 3);
        graph.add_link(2, Relation::Director, 3);
        graph.add_link(2, Relation::Category, 8);

        graph.forget_movie(1);
        assert!(graph.links(1).is_none());
        assert_eq!(graph.back_references(Relation::Director, 3), &[2]);

        graph.forget_target(Relation::Category, 8);
        assert!(graph.linked(2, Relation::Category).is_empty());
        assert!(graph.back_references(Relation::Category, 8).is_empty());
    }
}
