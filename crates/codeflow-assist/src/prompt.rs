//! Prompt templates with `{{{name}}}` placeholders.

use crate::error::AssistError;

/// A named prompt with triple-brace placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub template: &'static str,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, template: &'static str) -> Self {
        PromptTemplate { name, template }
    }

    /// Substitutes every `{{{key}}}` with its value.
    ///
    /// Values are inserted verbatim and never re-scanned. An opening `{{{`
    /// without a closing `}}}` is kept literally.
    pub fn render(&self, vars: &[(&str, &str)]) -> Result<String, AssistError> {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(start) = rest.find("{{{") {
            let after_open = &rest[start + 3..];
            let Some(end) = after_open.find("}}}") else {
                break;
            };
            out.push_str(&rest[..start]);

            let key = after_open[..end].trim();
            let value = vars
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .ok_or_else(|| AssistError::MissingVariable {
                    template: self.name,
                    name: key.to_string(),
                })?;
            out.push_str(value);

            rest = &after_open[end + 3..];
        }
        out.push_str(rest);
        Ok(out)
    }
}
