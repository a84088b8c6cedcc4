// Sat Oct 17 2026 - Alex

use super::DeclarationVisitor;
use crate::tree::DefaultArg;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// String and character literals are matched whole so names inside them are left alone
static DEFAULT_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|\b[A-Za-z_]\w*(?:::[A-Za-z_]\w*)*"#)
        .expect("default argument token pattern is valid")
});

impl<'a, 'm> DeclarationVisitor<'a, 'm> {
    /// Default argument text with every name it uses spelled fully qualified, so it
    /// still compiles outside the class scope it was written in.
    ///
    /// If any referenced declaration is unknown the text is kept verbatim.
    pub(crate) fn resolve_default(&self, default: &DefaultArg) -> String {
        if default.references.is_empty() {
            return default.text.clone();
        }
        if let Some(unknown) = default.references.iter().find(|r| !self.is_known(&r.target)) {
            log::debug!(
                "keeping default `{}` as written, `{}` is unresolved",
                default.text,
                unknown.target
            );
            return default.text.clone();
        }

        DEFAULT_TOKEN
            .replace_all(&default.text, |caps: &Captures| {
                let token = &caps[0];
                if token.starts_with(['"', '\'']) {
                    return token.to_string();
                }
                match default.references.iter().find(|r| r.spelling == token) {
                    Some(reference) => reference.target.clone(),
                    None => token.to_string(),
                }
            })
            .into_owned()
    }

    fn is_known(&self, qualified_name: &str) -> bool {
        self.index.contains(qualified_name)
            || self.model.find_class(qualified_name).is_some()
            || self.model.find_enum(qualified_name).is_some()
            || self.model.find_typedef(qualified_name).is_some()
    }
}
