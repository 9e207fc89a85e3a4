//! Pattern catalog access and template instantiation

use crate::catalog::builtin_patterns;
use crate::error::{LibraryError, LibraryResult};
use customization::{customize_template, CustomizationOptions};
use template_model::{
    PageSettings, PatternCategory, Template, TemplatePattern,
};

/// The catalog of predefined template patterns
#[derive(Debug)]
pub struct PatternLibrary {
    patterns: Vec<TemplatePattern>,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternLibrary {
    /// A library seeded with the built-in catalog
    pub fn new() -> Self {
        Self {
            patterns: builtin_patterns(),
        }
    }

    /// All patterns in catalog order
    pub fn all_patterns(&self) -> &[TemplatePattern] {
        &self.patterns
    }

    /// Look up a pattern by id
    pub fn get_pattern(&self, id: &str) -> LibraryResult<&TemplatePattern> {
        self.patterns
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| LibraryError::PatternNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.patterns.iter().any(|p| p.id == id)
    }

    /// Patterns in one category, in catalog order
    pub fn get_patterns_by_category(&self, category: PatternCategory) -> Vec<&TemplatePattern> {
        self.patterns
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Case-insensitive substring search over name, description, and use
    /// case. Results keep catalog order; the registry re-sorts by usage.
    pub fn search_patterns(&self, query: &str) -> Vec<&TemplatePattern> {
        let query = query.to_lowercase();
        self.patterns
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
                    || p.use_case.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Instantiate a fresh template from a pattern.
    ///
    /// The template gets a newly minted id; variables, sections and styling
    /// are copied from the pattern, and content HTML/CSS are synthesized
    /// from them. Applying `customizations` here is the same code path as
    /// customizing after creation, so both orders produce identical output.
    pub fn create_template_from_pattern(
        &self,
        id: &str,
        customizations: Option<&CustomizationOptions>,
    ) -> LibraryResult<Template> {
        let pattern = self.get_pattern(id)?;
        let mut template = Template::new(&pattern.name);
        template.description = pattern.description.clone();
        template.schema.variables = pattern.variables.clone();
        template.schema.sections = pattern.sections.clone();
        template.schema.styling = pattern.styling.clone();
        template.page_settings = Some(PageSettings::default());
        template.metadata.tags = pattern.tags.clone();
        template.metadata.category = Some(pattern.category.to_string());

        template.content.html = synthesize_html(pattern);
        template.content.css = customization::base_stylesheet(&pattern.styling);

        match customizations {
            Some(options) => Ok(customize_template(&template, options)),
            None => Ok(template),
        }
    }
}

/// Concatenated section markup wrapped in a document shell.
fn synthesize_html(pattern: &TemplatePattern) -> String {
    let mut sections: Vec<_> = pattern.sections.iter().collect();
    sections.sort_by_key(|s| s.order);
    let mut body = String::new();
    for section in sections {
        body.push_str(&format!(
            "<section class=\"section section-{id}\" id=\"{id}\">{content}</section>\n",
            id = section.id,
            content = section.content
        ));
    }
    format!("<div class=\"document\">\n{}</div>", body)
}
