use std::collections::HashMap;
use std::sync::Arc;

/// Routing function: inspects the state and returns a routing key.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Conditional edge: a path function plus an optional key-to-node map.
///
/// When the map has no entry for the returned key, the key itself is used as
/// the target node id.
pub struct ConditionalRouter<S> {
    path: ConditionalRouterFn<S>,
    path_map: Option<HashMap<String, String>>,
}

impl<S> ConditionalRouter<S> {
    pub fn new(path: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        Self { path, path_map }
    }

    /// Resolves the next node id for the given state.
    pub fn resolve_next(&self, state: &S) -> String {
        let key = (self.path)(state);
        match &self.path_map {
            Some(map) => map.get(&key).cloned().unwrap_or(key),
            None => key,
        }
    }

    /// Targets reachable through this router, for compile-time validation.
    pub fn targets(&self) -> Option<impl Iterator<Item = &String>> {
        self.path_map.as_ref().map(|m| m.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: with a path map, the routing key is translated; a key
    /// missing from the map falls through unchanged.
    #[test]
    fn resolve_with_path_map() {
        let router: ConditionalRouter<u32> = ConditionalRouter::new(
            Arc::new(|n: &u32| if *n > 0 { "tools".into() } else { "done".into() }),
            Some(HashMap::from([("tools".to_string(), "act".to_string())])),
        );
        assert_eq!(router.resolve_next(&1), "act");
        assert_eq!(router.resolve_next(&0), "done");
    }

    /// **Scenario**: without a path map the routing key is the node id.
    #[test]
    fn resolve_without_path_map() {
        let router: ConditionalRouter<u32> =
            ConditionalRouter::new(Arc::new(|_: &u32| "agent".into()), None);
        assert_eq!(router.resolve_next(&0), "agent");
    }
}
