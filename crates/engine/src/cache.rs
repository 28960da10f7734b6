//! Identity-keyed memoization for resolver and grouping results
//!
//! A cache hit requires the very same `Arc` allocations as the previous call.
//! Equal-but-distinct inputs always recompute: callers replace state
//! wholesale, so a new allocation means new state.

use std::sync::Arc;

use sheetkeep_domain::{AttributeDefinition, Attributed, FieldMap, TemplateSchema};

use crate::categorize::{CategoryMap, CategoryResolver};
use crate::grouping::{AttributeGrouper, GroupNode};

/// Last-call memo over a pair of shared inputs.
#[derive(Debug)]
struct Memo<A: ?Sized, B: ?Sized, V> {
    last: Option<(Arc<A>, Arc<B>, Arc<V>)>,
    hits: u64,
    misses: u64,
}

impl<A: ?Sized, B: ?Sized, V> Default for Memo<A, B, V> {
    fn default() -> Self {
        Self {
            last: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<A: ?Sized, B: ?Sized, V> Memo<A, B, V> {
    fn get_or_compute(
        &mut self,
        a: &Arc<A>,
        b: &Arc<B>,
        compute: impl FnOnce(&A, &B) -> V,
    ) -> Arc<V> {
        if let Some((last_a, last_b, value)) = &self.last {
            if Arc::ptr_eq(last_a, a) && Arc::ptr_eq(last_b, b) {
                self.hits += 1;
                tracing::debug!(hits = self.hits, "Memoized result reused");
                return Arc::clone(value);
            }
        }
        self.misses += 1;
        tracing::debug!(misses = self.misses, "Memoized result recomputed");
        let value = Arc::new(compute(a, b));
        self.last = Some((Arc::clone(a), Arc::clone(b), Arc::clone(&value)));
        value
    }
}

/// Hit/miss counters of a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoizes `CategoryResolver::resolve` on `(fields, schema)` identity.
#[derive(Debug, Default)]
pub struct ResolverCache {
    resolver: CategoryResolver,
    memo: Memo<FieldMap, TemplateSchema, CategoryMap>,
}

impl ResolverCache {
    pub fn new(resolver: CategoryResolver) -> Self {
        Self {
            resolver,
            memo: Memo::default(),
        }
    }

    pub fn resolve(
        &mut self,
        fields: &Arc<FieldMap>,
        schema: &Arc<TemplateSchema>,
    ) -> Arc<CategoryMap> {
        let resolver = &self.resolver;
        self.memo.get_or_compute(fields, schema, |fields, schema| {
            resolver.resolve(fields, &schema.categories)
        })
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.memo.hits,
            misses: self.memo.misses,
        }
    }
}

/// Memoizes both grouping entry points on `(items, levels)` identity.
#[derive(Debug)]
pub struct GroupingCache<T> {
    grouper: AttributeGrouper,
    by_name: Memo<[T], [String], Vec<GroupNode<T>>>,
    by_definition: Memo<[T], [AttributeDefinition], Vec<GroupNode<T>>>,
}

impl<T> Default for GroupingCache<T> {
    fn default() -> Self {
        Self::new(AttributeGrouper::default())
    }
}

impl<T> GroupingCache<T> {
    pub fn new(grouper: AttributeGrouper) -> Self {
        Self {
            grouper,
            by_name: Memo::default(),
            by_definition: Memo::default(),
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.by_name.hits + self.by_definition.hits,
            misses: self.by_name.misses + self.by_definition.misses,
        }
    }
}

impl<T: Attributed + Clone> GroupingCache<T> {
    pub fn group_by(
        &mut self,
        items: &Arc<[T]>,
        attr_names: &Arc<[String]>,
    ) -> Arc<Vec<GroupNode<T>>> {
        let grouper = &self.grouper;
        self.by_name
            .get_or_compute(items, attr_names, |items, names| grouper.group_by(items, names))
    }

    pub fn group_by_filtered_attributes(
        &mut self,
        items: &Arc<[T]>,
        definitions: &Arc<[AttributeDefinition]>,
    ) -> Arc<Vec<GroupNode<T>>> {
        let grouper = &self.grouper;
        self.by_definition.get_or_compute(items, definitions, |items, definitions| {
            grouper.group_by_filtered_attributes(items, definitions)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetkeep_domain::{Attribute, CategoryNode, Field};

    #[test]
    fn test_resolver_cache_hits_only_on_identity() {
        let mut cache = ResolverCache::default();
        let fields = Arc::new(FieldMap::new().with_field("hp", Field::new("HP", 3.0)));
        let schema = Arc::new(TemplateSchema::new(vec![
            CategoryNode::new("combat", "Combat").with_fields(["hp"]),
        ]));

        let first = cache.resolve(&fields, &schema);
        let second = cache.resolve(&fields, &schema);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });

        let equal_copy = Arc::new((*fields).clone());
        let third = cache.resolve(&equal_copy, &schema);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(*first, *third);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 2 });
    }

    #[test]
    fn test_grouping_cache_tracks_each_entry_point() {
        let mut cache: GroupingCache<Vec<Attribute>> = GroupingCache::default();
        let items: Arc<[Vec<Attribute>]> = Arc::from(vec![
            vec![Attribute::named("Rarity", "rare")],
            vec![],
        ]);
        let names: Arc<[String]> = Arc::from(vec!["Rarity".to_string()]);
        let definitions: Arc<[AttributeDefinition]> =
            Arc::from(vec![AttributeDefinition::new("Rarity", "Rarity").filtered()]);

        let a = cache.group_by(&items, &names);
        let b = cache.group_by(&items, &names);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a[0].name, "Rarity: rare");

        let c = cache.group_by_filtered_attributes(&items, &definitions);
        let d = cache.group_by_filtered_attributes(&items, &definitions);
        assert!(Arc::ptr_eq(&c, &d));
        assert_eq!(c[1].name, "Other");

        assert_eq!(cache.stats(), CacheStats { hits: 2, misses: 2 });
    }
}
