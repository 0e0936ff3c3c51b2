//! Name-pair → canonical location id resolution over the registry's
//! hierarchical location tree.

use godata_model::LocationNode;
use tracing::warn;

/// States whose tree interposes a health-region level between the state and
/// its municipalities. Adding a state here is a data change only; the
/// traversal below never special-cases individual names.
const REGION_LEVEL_STATES: &[&str] = &["Santa Catarina"];

/// Index over the location tree, rooted at the country node.
#[derive(Debug, Clone)]
pub struct LocationIndex {
    country: LocationNode,
}

impl LocationIndex {
    pub fn new(country: LocationNode) -> Self {
        Self { country }
    }

    /// Picks the country root out of a top-level forest, by exact name.
    pub fn from_forest(roots: Vec<LocationNode>, country_name: &str) -> Option<Self> {
        roots
            .into_iter()
            .find(|node| node.location.name == country_name)
            .map(Self::new)
    }

    pub fn country(&self) -> &LocationNode {
        &self.country
    }

    /// Resolves a state/municipality name pair to the municipality's id.
    ///
    /// Comparison is exact string equality at every level. `None` means
    /// unresolved; the caller keeps the case and uploads it without a
    /// location id.
    pub fn resolve(&self, state: &str, municipality: &str) -> Option<&str> {
        let Some(state_node) = self.country.child_named(state) else {
            warn!(state, "state not found in location tree");
            return None;
        };

        let municipality_node = if REGION_LEVEL_STATES.contains(&state) {
            state_node
                .children
                .iter()
                .find_map(|region| region.child_named(municipality))
        } else {
            state_node.child_named(municipality)
        };

        match municipality_node {
            Some(node) => Some(&node.location.id),
            None => {
                warn!(state, municipality, "municipality not found in location tree");
                None
            }
        }
    }
}
