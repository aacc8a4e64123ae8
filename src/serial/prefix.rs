//! Namespace prefix registry.
//!
//! One [`PrefixRegistry`] lives for exactly one serialization call. It maps
//! namespace URIs to prefixes, coins synthetic prefixes (`ns0`, `ns1`, …)
//! for URIs the caller supplied none for, and tracks which bindings are
//! currently in scope as the tree walk descends and ascends.
//!
//! Bindings are kept in append order, which makes declaration output
//! deterministic. The table is flat and shared by the whole walk rather
//! than per-recursion-frame, so a prefix declared by an ancestor is reused
//! by descendants instead of being re-declared.

use log::debug;

use crate::node::XML_NAMESPACE;

/// One URI→prefix binding.
#[derive(Debug, Clone)]
struct Binding {
    uri: String,
    prefix: String,
    /// Whether the binding is declared somewhere on the open ancestor path.
    in_scope: bool,
    /// Whether the binding still needs an `xmlns:prefix` declaration on the
    /// element currently being written.
    needs_write: bool,
    /// How many open child scopes the binding is nested under. The binding
    /// leaves scope when this returns to zero.
    scope_depth: u32,
}

/// Call-scoped table of URI→prefix bindings.
#[derive(Debug)]
pub(crate) struct PrefixRegistry {
    /// Append-ordered. Index 0 is the permanent `xml` binding.
    bindings: Vec<Binding>,
    /// Counter for synthetic prefix names, owned by this registry so that
    /// every call starts again at `ns0` and concurrent calls cannot race.
    next_synthetic: u32,
}

impl PrefixRegistry {
    /// Creates a registry holding only the built-in `xml` binding, which is
    /// always in scope and never written as a declaration.
    pub(crate) fn new() -> Self {
        Self {
            bindings: vec![Binding {
                uri: XML_NAMESPACE.to_string(),
                prefix: "xml".to_string(),
                in_scope: true,
                needs_write: false,
                scope_depth: 0,
            }],
            next_synthetic: 0,
        }
    }

    /// Registers a caller-supplied binding. Not yet in scope: it is
    /// declared on the first element that uses the URI.
    pub(crate) fn seed(&mut self, uri: &str, prefix: &str) {
        self.bindings.push(Binding {
            uri: uri.to_string(),
            prefix: prefix.to_string(),
            in_scope: false,
            needs_write: false,
            scope_depth: 0,
        });
    }

    /// Marks the binding with exactly this prefix name as already in scope,
    /// so no declaration is emitted for it. Names with no matching binding
    /// are ignored.
    pub(crate) fn mark_prefix_in_scope(&mut self, prefix: &str) {
        if let Some(binding) = self.bindings.iter_mut().find(|b| b.prefix == prefix) {
            binding.in_scope = true;
        }
    }

    /// Returns the index of the binding for `uri`, coining a synthetic
    /// prefix and appending a new binding if none exists.
    pub(crate) fn find_or_create(&mut self, uri: &str) -> usize {
        if let Some(idx) = self.bindings.iter().position(|b| b.uri == uri) {
            return idx;
        }
        let prefix = format!("ns{}", self.next_synthetic);
        self.next_synthetic += 1;
        debug!("bound synthetic prefix {prefix} to {uri}");
        self.bindings.push(Binding {
            uri: uri.to_string(),
            prefix,
            in_scope: false,
            needs_write: false,
            scope_depth: 0,
        });
        self.bindings.len() - 1
    }

    /// Merges one local `(uri, prefix)` override. A binding whose prefix
    /// name is already taken is discarded: the existing binding wins.
    pub(crate) fn merge_local(&mut self, uri: &str, prefix: &str) {
        if self.bindings.iter().any(|b| b.prefix == prefix) {
            return;
        }
        self.seed(uri, prefix);
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }

    pub(crate) fn prefix(&self, idx: usize) -> &str {
        &self.bindings[idx].prefix
    }

    pub(crate) fn uri(&self, idx: usize) -> &str {
        &self.bindings[idx].uri
    }

    pub(crate) fn in_scope(&self, idx: usize) -> bool {
        self.bindings[idx].in_scope
    }

    pub(crate) fn needs_write(&self, idx: usize) -> bool {
        self.bindings[idx].needs_write
    }

    /// True when some in-scope binding covers `uri`.
    pub(crate) fn uri_in_scope(&self, uri: &str) -> bool {
        self.bindings.iter().any(|b| b.in_scope && b.uri == uri)
    }

    pub(crate) fn mark_needs_write(&mut self, idx: usize) {
        self.bindings[idx].needs_write = true;
    }

    pub(crate) fn mark_in_scope(&mut self, idx: usize) {
        self.bindings[idx].in_scope = true;
    }

    /// Records that the declaration for a binding has been emitted.
    pub(crate) fn mark_written(&mut self, idx: usize) {
        let binding = &mut self.bindings[idx];
        binding.needs_write = false;
        binding.in_scope = true;
    }

    /// Enters the child scope of an element. The permanent `xml` binding is
    /// exempt from depth bookkeeping.
    pub(crate) fn enter_scope(&mut self) {
        for binding in &mut self.bindings[1..] {
            binding.scope_depth += 1;
        }
    }

    /// Leaves an element's child scope. A binding whose depth returns to
    /// zero is no longer declared on the open ancestor path and leaves
    /// scope; a later use of its URI re-declares it.
    pub(crate) fn leave_scope(&mut self) {
        for binding in &mut self.bindings[1..] {
            binding.scope_depth = binding.scope_depth.saturating_sub(1);
            if binding.scope_depth == 0 {
                binding.in_scope = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_holds_only_xml() {
        let registry = PrefixRegistry::new();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.prefix(0), "xml");
        assert_eq!(registry.uri(0), XML_NAMESPACE);
        assert!(registry.in_scope(0));
        assert!(!registry.needs_write(0));
    }

    #[test]
    fn test_find_or_create_is_idempotent() {
        let mut registry = PrefixRegistry::new();
        let a = registry.find_or_create("urn:a");
        let b = registry.find_or_create("urn:b");
        assert_eq!(registry.prefix(a), "ns0");
        assert_eq!(registry.prefix(b), "ns1");
        assert_eq!(registry.find_or_create("urn:a"), a);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_find_or_create_prefers_seeded_binding() {
        let mut registry = PrefixRegistry::new();
        registry.seed("urn:a", "a");
        let idx = registry.find_or_create("urn:a");
        assert_eq!(registry.prefix(idx), "a");
        assert!(!registry.in_scope(idx));
    }

    #[test]
    fn test_mark_prefix_in_scope_ignores_unknown_names() {
        let mut registry = PrefixRegistry::new();
        registry.seed("urn:a", "a");
        registry.mark_prefix_in_scope("a");
        registry.mark_prefix_in_scope("nope");
        assert!(registry.in_scope(1));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_merge_local_existing_prefix_name_wins() {
        let mut registry = PrefixRegistry::new();
        registry.seed("urn:a", "a");
        registry.merge_local("urn:other", "a");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.uri(1), "urn:a");

        registry.merge_local("urn:b", "b");
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.prefix(2), "b");
    }

    #[test]
    fn test_scope_exit_clears_in_scope() {
        let mut registry = PrefixRegistry::new();
        let idx = registry.find_or_create("urn:a");
        registry.mark_in_scope(idx);

        registry.enter_scope();
        assert!(registry.in_scope(idx));
        registry.leave_scope();
        assert!(!registry.in_scope(idx));
    }

    #[test]
    fn test_nested_scopes_keep_outer_bindings_alive() {
        let mut registry = PrefixRegistry::new();
        let outer = registry.find_or_create("urn:outer");
        registry.mark_in_scope(outer);

        registry.enter_scope();
        let inner = registry.find_or_create("urn:inner");
        registry.mark_in_scope(inner);

        registry.enter_scope();
        registry.leave_scope();
        // The inner binding was created one level down and exits with it;
        // the outer binding is still nested one level deep.
        assert!(!registry.in_scope(inner));
        assert!(registry.in_scope(outer));

        registry.leave_scope();
        assert!(!registry.in_scope(outer));
    }

    #[test]
    fn test_xml_binding_never_leaves_scope() {
        let mut registry = PrefixRegistry::new();
        registry.enter_scope();
        registry.leave_scope();
        registry.leave_scope();
        assert!(registry.in_scope(0));
        assert_eq!(
            registry.find_or_create(XML_NAMESPACE),
            0,
            "the xml namespace resolves to the permanent binding"
        );
    }

    #[test]
    fn test_uri_in_scope() {
        let mut registry = PrefixRegistry::new();
        assert!(registry.uri_in_scope(XML_NAMESPACE));
        let idx = registry.find_or_create("urn:a");
        assert!(!registry.uri_in_scope("urn:a"));
        registry.mark_in_scope(idx);
        assert!(registry.uri_in_scope("urn:a"));
    }

    #[test]
    fn test_synthetic_counter_is_call_scoped() {
        let mut first = PrefixRegistry::new();
        first.find_or_create("urn:a");
        first.find_or_create("urn:b");
        // A fresh registry starts numbering from ns0 again.
        let mut second = PrefixRegistry::new();
        let idx = second.find_or_create("urn:z");
        assert_eq!(second.prefix(idx), "ns0");
    }
}
