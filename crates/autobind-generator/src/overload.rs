//! Overload grouping.
//!
//! Script calls are dynamically typed, so the overload to invoke cannot be
//! picked at generation time. Methods are grouped by name and bucketed by
//! parameter count; each bucket becomes a sequence of runtime type guards
//! tried in declaration order, first match wins.

use std::collections::BTreeMap;

use autobind_core::Method;
use rustc_hash::FxHashMap;

/// Overloads of one name sharing a parameter count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArityBucket<'m> {
    pub arity: usize,
    /// Overloads in declaration order.
    pub overloads: Vec<&'m Method>,
}

impl ArityBucket<'_> {
    /// The fewest arguments any overload in this bucket accepts.
    pub fn min_args(&self) -> usize {
        self.overloads
            .iter()
            .map(|method| method.required_arity())
            .min()
            .unwrap_or(self.arity)
    }
}

/// All overloads sharing a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadGroup<'m> {
    pub name: &'m str,
    /// Buckets by ascending arity.
    pub buckets: Vec<ArityBucket<'m>>,
}

impl<'m> OverloadGroup<'m> {
    /// The overload whose signature is published in the dispatch table.
    pub fn first(&self) -> Option<&'m Method> {
        self.buckets.first().and_then(|b| b.overloads.first().copied())
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.overloads.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Group methods by name, in order of first appearance.
pub fn group_overloads<'m>(methods: impl IntoIterator<Item = &'m Method>) -> Vec<OverloadGroup<'m>> {
    let mut order: Vec<&'m str> = Vec::new();
    let mut by_name: FxHashMap<&'m str, BTreeMap<usize, Vec<&'m Method>>> = FxHashMap::default();

    for method in methods {
        let buckets = by_name.entry(method.name.as_str()).or_insert_with(|| {
            order.push(method.name.as_str());
            BTreeMap::new()
        });
        buckets.entry(method.arity()).or_default().push(method);
    }

    order
        .into_iter()
        .filter_map(|name| {
            let buckets = by_name.remove(name)?;
            Some(OverloadGroup {
                name,
                buckets: buckets
                    .into_iter()
                    .map(|(arity, overloads)| ArityBucket { arity, overloads })
                    .collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use autobind_core::Parameter;

    fn method(name: &str, params: &[&str]) -> Method {
        params.iter().fold(Method::new(name, "void"), |m, ty| {
            m.with_param(Parameter::new(*ty))
        })
    }

    #[test]
    fn groups_by_name_then_arity() {
        let methods = vec![
            method("move", &["int", "int"]),
            method("resize", &["QSize"]),
            method("move", &["QPoint"]),
            method("move", &["qreal", "qreal"]),
        ];
        let groups = group_overloads(&methods);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "move");
        assert_eq!(groups[1].name, "resize");
        assert_eq!(groups[0].len(), 3);

        let arities: Vec<_> = groups[0].buckets.iter().map(|b| b.arity).collect();
        assert_eq!(arities, vec![1, 2]);

        // Declaration order is kept inside a bucket.
        let two = &groups[0].buckets[1];
        assert_eq!(two.overloads[0].params[0].ty, "int");
        assert_eq!(two.overloads[1].params[0].ty, "qreal");
    }

    #[test]
    fn every_method_lands_in_exactly_one_group() {
        let methods = vec![
            method("a", &[]),
            method("b", &["int"]),
            method("a", &["int"]),
            method("c", &[]),
            method("b", &["bool"]),
        ];
        let groups = group_overloads(&methods);
        let total: usize = groups.iter().map(OverloadGroup::len).sum();
        assert_eq!(total, methods.len());
    }

    #[test]
    fn min_args_accounts_for_defaults() {
        let with_default = Method::new("fill", "void")
            .with_param(Parameter::new("int"))
            .with_param(Parameter::new("int").with_default("0"));
        let plain = method("fill", &["bool", "bool"]);
        let methods = vec![plain, with_default];
        let groups = group_overloads(&methods);
        assert_eq!(groups[0].buckets[0].arity, 2);
        assert_eq!(groups[0].buckets[0].min_args(), 1);
    }
}
