//! Resolution of the inside set into a single assignment.

use hashbrown::HashSet;

use super::RegionCatalog;
use crate::models::{Assignment, ClassificationResult, CoordinateQuery, RegionId};

/// Turns the set of containing regions into one of three outcomes:
/// a single province, on land, or ambiguous.
pub struct MatchResolver<'a> {
    catalog: &'a RegionCatalog,
}

impl<'a> MatchResolver<'a> {
    pub fn new(catalog: &'a RegionCatalog) -> Self {
        Self { catalog }
    }

    pub fn resolve(&self, query: CoordinateQuery, inside: &HashSet<RegionId>) -> ClassificationResult {
        let assignment = self.assignment(inside);
        ClassificationResult { query, assignment }
    }

    fn assignment(&self, inside: &HashSet<RegionId>) -> Assignment {
        if inside.len() > 1 {
            return Assignment::Ambiguous;
        }

        // An identifier from another catalog resolves like no match
        match inside.iter().next().and_then(|id| self.catalog.get(*id)) {
            Some(region) => Assignment::Province {
                code: region.code.clone(),
                name: region.name.clone(),
            },
            None => Assignment::OnLand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegionRecord;

    fn catalog() -> RegionCatalog {
        let record = |code: &str, name: &str| RegionRecord {
            id: None,
            code: Some(code.to_string()),
            name: Some(name.to_string()),
            bbox: Some([[0.0, 0.0], [1.0, 1.0]]),
            rings: vec![vec![[0.0, 0.0], [1.0, 1.0]]],
        };
        RegionCatalog::build(vec![
            record("ARCT", "Polar - Atlantic Arctic Province"),
            record("SARC", "Polar - Atlantic Subarctic Province"),
            record("NADR", "Westerlies - N. Atlantic Drift Province"),
        ])
        .unwrap()
    }

    fn ids(catalog: &RegionCatalog, n: usize) -> HashSet<RegionId> {
        catalog.iter().take(n).map(|(id, _)| id).collect()
    }

    #[test]
    fn test_resolve_zero_one_many() {
        let catalog = catalog();
        let resolver = MatchResolver::new(&catalog);
        let query = CoordinateQuery::new("S1", 60.0, -10.0);

        let none = resolver.resolve(query.clone(), &ids(&catalog, 0));
        assert_eq!(none.assignment, Assignment::OnLand);

        let one = resolver.resolve(query.clone(), &ids(&catalog, 1));
        assert_eq!(
            one.assignment,
            Assignment::Province {
                code: "ARCT".to_string(),
                name: "Polar - Atlantic Arctic Province".to_string(),
            }
        );
        assert_eq!(one.query, query);

        let many = resolver.resolve(query.clone(), &ids(&catalog, 2));
        assert_eq!(many.assignment, Assignment::Ambiguous);

        let all = resolver.resolve(query, &ids(&catalog, 3));
        assert_eq!(all.assignment, Assignment::Ambiguous);
    }

    #[test]
    fn test_every_subset_has_one_outcome() {
        let catalog = catalog();
        let resolver = MatchResolver::new(&catalog);
        let all: Vec<RegionId> = catalog.iter().map(|(id, _)| id).collect();

        for mask in 0u32..(1 << all.len()) {
            let inside: HashSet<RegionId> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .map(|(_, id)| *id)
                .collect();
            let result = resolver.resolve(CoordinateQuery::new("S", 0.0, 0.0), &inside);
            match inside.len() {
                0 => assert_eq!(result.assignment, Assignment::OnLand),
                1 => assert!(result.assignment.is_assigned()),
                _ => assert_eq!(result.assignment, Assignment::Ambiguous),
            }
        }
    }
}
