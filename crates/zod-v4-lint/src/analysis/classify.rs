//! Node classification without type information.
//!
//! Whether a value is a zod schema cannot be proven syntactically. A call
//! counts as zod when its chain is rooted at the `z` identifier, or when it
//! is made on a variable whose name reads like a schema. The naming checks
//! take plain strings so they can be swapped for a type-aware check without
//! touching the rules.

use zod_v4_syntax::{NodeId, NodeKind, SyntaxTree};

/// The identifier zod is conventionally imported as.
pub const ENTRY_IDENTIFIER: &str = "z";

/// Lower-cased names, besides the `schema` suffix, treated as schemas.
const SCHEMA_VALUE_NAMES: &[&str] = &["validator"];

/// Lower-cased names treated as holding a `ZodError`.
const ERROR_VALUE_NAMES: &[&str] = &["error", "err", "e", "zoderror"];

/// Parameter keys that all become `error` once migrated.
pub const ERROR_PARAM_KEYS: &[&str] = &["error", "message", "invalid_type_error", "required_error"];

/// Whether `node` is the identifier `z`.
pub fn is_entry_identifier(tree: &SyntaxTree, node: NodeId) -> bool {
    tree.identifier_name(node) == Some(ENTRY_IDENTIFIER)
}

/// Object and property of a call's member-expression callee.
pub fn callee_member(tree: &SyntaxTree, call: NodeId) -> Option<(NodeId, NodeId)> {
    let NodeKind::CallExpression { callee, .. } = tree.kind(call) else {
        return None;
    };
    match tree.kind(*callee) {
        NodeKind::MemberExpression {
            object, property, ..
        } => Some((*object, *property)),
        _ => None,
    }
}

/// Name of a non-computed member access, e.g. `parse` in `schema.parse`.
pub fn method_name(tree: &SyntaxTree, member: NodeId) -> Option<&str> {
    match tree.kind(member) {
        NodeKind::MemberExpression {
            property,
            computed: false,
            ..
        } => tree.identifier_name(*property),
        _ => None,
    }
}

/// Key of an object literal property written as a plain identifier.
pub fn property_key_name(tree: &SyntaxTree, property: NodeId) -> Option<&str> {
    match tree.kind(property) {
        NodeKind::Property {
            key,
            computed: false,
            ..
        } => tree.identifier_name(*key),
        _ => None,
    }
}

/// Number of properties of an object literal whose plain key is one of
/// `keys`.
pub fn count_property_keys(tree: &SyntaxTree, object: NodeId, keys: &[&str]) -> usize {
    let NodeKind::ObjectExpression { properties } = tree.kind(object) else {
        return 0;
    };
    properties
        .iter()
        .filter_map(|&property| property_key_name(tree, property))
        .filter(|name| keys.contains(name))
        .count()
}

/// True iff the callee of `call` is a member access on `z` or on another
/// call that satisfies this predicate, at any depth.
pub fn is_anchored_call(tree: &SyntaxTree, call: NodeId) -> bool {
    let mut current = call;
    loop {
        let Some((object, _)) = callee_member(tree, current) else {
            return false;
        };
        if is_entry_identifier(tree, object) {
            return true;
        }
        match tree.kind(object) {
            NodeKind::CallExpression { .. } => current = object,
            _ => return false,
        }
    }
}

/// Case-insensitive check that a variable name reads like a schema.
pub fn looks_like_schema_value(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with("schema") || SCHEMA_VALUE_NAMES.contains(&lower.as_str())
}

/// Case-insensitive check that a variable name reads like a caught error.
pub fn looks_like_error_value(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ERROR_VALUE_NAMES.contains(&lower.as_str())
}

/// Whether `node` is an access of an `error` property, as in
/// `result.error`.
pub fn is_error_member(tree: &SyntaxTree, node: NodeId) -> bool {
    method_name(tree, node) == Some("error")
}

/// Anchored call, or a method call on a schema-named identifier.
pub fn is_likely_schema_call(tree: &SyntaxTree, call: NodeId) -> bool {
    let Some((object, _)) = callee_member(tree, call) else {
        return false;
    };
    if is_anchored_call(tree, call) {
        return true;
    }
    tree.identifier_name(object)
        .is_some_and(looks_like_schema_value)
}
