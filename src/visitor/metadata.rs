// Sat Oct 17 2026 - Alex

use crate::model::MethodFlags;
use crate::tree::RecordDecl;
use std::collections::HashMap;

pub const SIGNAL: &str = "qt_signal";
pub const SLOT: &str = "qt_slot";
pub const PROPERTY_READ: &str = "qt_property_read";
pub const PROPERTY_WRITE: &str = "qt_property_write";

/// Marker the property macro puts in front of its `static_assert` message
pub const PROPERTY_PREFIX: &str = "qt_property:";

const PROPERTY_KEYWORDS: &[&str] = &[
    "READ", "WRITE", "MEMBER", "RESET", "NOTIFY", "REVISION", "DESIGNABLE", "SCRIPTABLE",
    "STORED", "USER", "BINDABLE", "CONSTANT", "FINAL", "REQUIRED",
];

/// Accessor names declared by one property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyAccessors {
    pub name: Option<String>,
    pub read: Option<String>,
    pub write: Option<String>,
}

/// Parses `qt_property:(QString text READ text WRITE setText NOTIFY textChanged)`.
///
/// Returns `None` for assertions that are not property metadata.
pub fn parse_property(message: &str) -> Option<PropertyAccessors> {
    let body = message.trim().strip_prefix(PROPERTY_PREFIX)?;
    let body = body.trim().trim_start_matches('(').trim_end_matches(')');

    let tokens: Vec<&str> = body.split_whitespace().collect();
    let mut accessors = PropertyAccessors::default();
    // Type and name come before the first keyword
    let keyword_at = tokens
        .iter()
        .position(|t| PROPERTY_KEYWORDS.contains(t))
        .unwrap_or(tokens.len());
    if keyword_at > 0 {
        accessors.name = Some(tokens[keyword_at - 1].trim_start_matches(['*', '&']).to_string());
    }

    let mut i = keyword_at;
    while i + 1 < tokens.len() {
        match tokens[i] {
            "READ" => accessors.read = Some(tokens[i + 1].to_string()),
            "WRITE" => accessors.write = Some(tokens[i + 1].to_string()),
            _ => {}
        }
        i += 1;
    }
    Some(accessors)
}

/// Extra attributes for the methods of `record`, derived from its property metadata.
///
/// Accessors that do not name a method of the same class are ignored.
pub fn accessor_attributes(record: &RecordDecl) -> HashMap<String, Vec<&'static str>> {
    let mut attributes: HashMap<String, Vec<&'static str>> = HashMap::new();
    for message in &record.static_asserts {
        let Some(property) = parse_property(message) else {
            continue;
        };
        let accessors = [(property.read, PROPERTY_READ), (property.write, PROPERTY_WRITE)];
        for (method, attribute) in accessors {
            let Some(method) = method else {
                continue;
            };
            if record.methods.iter().any(|m| m.name == method) {
                attributes.entry(method).or_default().push(attribute);
            } else {
                log::debug!(
                    "property {:?} of {} names unknown accessor {}",
                    property.name,
                    record.qualified_name,
                    method
                );
            }
        }
    }
    attributes
}

/// Method flag an annotation attribute maps to
pub fn attribute_flag(attribute: &str) -> MethodFlags {
    match attribute {
        SIGNAL => MethodFlags::SIGNAL,
        SLOT => MethodFlags::SLOT,
        PROPERTY_READ => MethodFlags::PROPERTY_READ,
        PROPERTY_WRITE => MethodFlags::PROPERTY_WRITE,
        _ => MethodFlags::empty(),
    }
}
