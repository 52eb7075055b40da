//! Config field descriptors.
//!
//! Every target that can be populated from a configuration mapping (stage
//! parameters, services, messengers) declares its configurable fields as an
//! explicit descriptor table: the config key, whether environment
//! placeholders are substituted into the value, and a mutable slot for the
//! field itself. The generic field mapper works against this table alone, so
//! it needs no knowledge of the concrete target type.

/// One configurable field of a target object.
pub struct ConfigField<'a> {
    /// Key looked up in the configuration mapping.
    pub key: &'static str,
    /// Whether environment placeholders are substituted into the value.
    pub substitute: bool,
    /// The field the value is written into.
    pub slot: &'a mut String,
}

impl<'a> ConfigField<'a> {
    /// A field populated verbatim from the config value.
    pub fn plain(key: &'static str, slot: &'a mut String) -> Self {
        Self {
            key,
            substitute: false,
            slot,
        }
    }

    /// A field whose value goes through environment substitution first.
    pub fn substituted(key: &'static str, slot: &'a mut String) -> Self {
        Self {
            key,
            substitute: true,
            slot,
        }
    }
}

/// Implemented by every object the generic field mapper can populate.
///
/// Only string-typed fields are declarable; a field that is not configurable
/// from text is simply not listed.
pub trait Configurable {
    /// The declared configurable fields, in declaration order.
    fn config_fields(&mut self) -> Vec<ConfigField<'_>>;
}
