//! Structural queries shared by the rules.
//!
//! - [`classify`]: is a call rooted at `z`, or made on something that looks
//!   like a schema or an error value
//! - [`chain`]: walking `a().b().c()` call chains
//! - [`resolve`]: finding the declaration of a referenced variable
//! - [`ancestry`]: facts about the nodes enclosing a site

pub mod ancestry;
pub mod chain;
pub mod classify;
pub mod resolve;

pub use ancestry::{enclosing_function, is_function, is_inside_try, is_memoized_callback};
pub use chain::{find_anchor_call, has_intervening_calls, ChainCalls};
pub use classify::{
    callee_member, count_property_keys, is_anchored_call, is_entry_identifier, is_error_member,
    is_likely_schema_call, looks_like_error_value, looks_like_schema_value, method_name,
    property_key_name, ENTRY_IDENTIFIER, ERROR_PARAM_KEYS,
};
pub use resolve::{resolve_declaration, resolve_in_chain, resolve_variable_declarator};
