//! Naming constants shared by the project model, the registry and the rewriters.

/// Separator between the segments of a qualified name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Property type marking a required-behavior property.
pub const BEHAVIOR_PROPERTY_TYPE: &str = "Behavior";

/// Prefix of the synthetic action that sets a behavior property.
pub const SET_PROPERTY_PREFIX: &str = "SetProperty";

/// Prefix of the synthetic condition and expression that read a behavior property.
pub const PROPERTY_PREFIX: &str = "Property";

/// Name of the action generated for a behavior property.
pub fn property_action_name(property: &str) -> String {
    format!("{SET_PROPERTY_PREFIX}{property}")
}

/// Name of the condition generated for a behavior property.
pub fn property_condition_name(property: &str) -> String {
    format!("{PROPERTY_PREFIX}{property}")
}

/// Name of the expression generated for a behavior property.
pub fn property_expression_name(property: &str) -> String {
    format!("{PROPERTY_PREFIX}{property}")
}
