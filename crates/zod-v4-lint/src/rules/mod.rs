//! Rule registry: all available lint rules.

pub mod no_deep_partial;
pub mod no_deprecated_error_params;
pub mod no_deprecated_format_methods;
pub mod no_deprecated_ip_methods;
pub mod no_deprecated_object_methods;
pub mod no_deprecated_string_format;
pub mod no_errors_property;
pub mod no_merge_method;
pub mod no_native_enum;
pub mod no_promise_schema;
pub mod no_record_single_arg;
pub mod no_schema_in_render;
pub mod no_superrefine;
pub mod no_throw_in_refine;
pub mod prefer_error_param;
pub mod prefer_safe_parse;
pub mod require_enum_as_const;

use crate::rule::LintRule;

/// Returns all available lint rules.
pub fn all_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        // Breaking changes
        Box::new(no_deprecated_string_format::NoDeprecatedStringFormat),
        Box::new(no_record_single_arg::NoRecordSingleArg),
        Box::new(no_deprecated_error_params::NoDeprecatedErrorParams),
        Box::new(no_deprecated_format_methods::NoDeprecatedFormatMethods),
        Box::new(no_merge_method::NoMergeMethod),
        Box::new(no_superrefine::NoSuperRefine),
        Box::new(no_errors_property::NoErrorsProperty),
        Box::new(no_deprecated_object_methods::NoDeprecatedObjectMethods),
        Box::new(no_native_enum::NoNativeEnum),
        Box::new(no_deep_partial::NoDeepPartial),
        Box::new(no_deprecated_ip_methods::NoDeprecatedIpMethods),
        Box::new(no_promise_schema::NoPromiseSchema),
        Box::new(no_throw_in_refine::NoThrowInRefine),
        Box::new(require_enum_as_const::RequireEnumAsConst),
        // Best practices
        Box::new(prefer_safe_parse::PreferSafeParse),
        Box::new(no_schema_in_render::NoSchemaInRender),
        Box::new(prefer_error_param::PreferErrorParam),
    ]
}

/// Names of all rules, in registry order.
pub fn rule_names() -> Vec<&'static str> {
    all_rules().iter().map(|rule| rule.meta().name).collect()
}
