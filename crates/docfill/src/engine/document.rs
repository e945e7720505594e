//! Document facade tying detection, sections and substitution together.

use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;

use crate::analyzer::ConditionalAnalysis;
use crate::engine::error::LoadError;
use crate::engine::lint::{LintWarning, lint_template, lint_values};
use crate::engine::options::FillOptions;
use crate::engine::registry::{FieldEntry, FieldRegistry};
use crate::engine::sections::render_sections;
use crate::engine::substitute::{Values, substitute};
use crate::parser::{parse_placeholder, scan_tags};
use crate::types::{ConditionalGroup, PlaceholderField, Selection};

/// A template document and everything detected in it.
///
/// Detection runs once when the text is set; the registry and groups are
/// then reused by every fill.
///
/// # Example
///
/// ```
/// use docfill::{Document, Selection, values};
///
/// let doc = Document::parse(
///     "Client: {{Client}}\n{{#service_full_package}}Price: {{Full Price:number}}\n{{/service_full_package}}",
/// );
/// assert_eq!(doc.groups()[0].name, "Service Options");
///
/// let selection = Selection::from([("Service Options".into(), "Full Package".into())]);
/// let filled = doc.fill_with_selection(&selection, &values! { "client" => "Acme", "full price" => 900 });
/// assert_eq!(filled, "Client: Acme\nPrice: 900\n");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct Document {
    text: String,

    #[builder(default)]
    options: FillOptions,

    /// Where the text was loaded from, if it came from a file.
    path: Option<PathBuf>,

    #[builder(skip)]
    analysis: ConditionalAnalysis,

    #[builder(skip)]
    registry: FieldRegistry,
}

impl Document {
    /// Detect fields and groups in `text` using default fill options.
    pub fn parse(text: impl Into<String>) -> Self {
        Document::builder().text(text).build().analyzed()
    }

    /// Detect fields and groups in `text` with custom fill options.
    pub fn with_options(text: impl Into<String>, options: FillOptions) -> Self {
        Document::builder().text(text).options(options).build().analyzed()
    }

    /// Read a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read as UTF-8 text.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded {} ({} bytes)", path.display(), text.len());
        Ok(Document::builder()
            .text(text)
            .path(path.to_path_buf())
            .build()
            .analyzed())
    }

    fn analyzed(mut self) -> Self {
        self.rebuild();
        self
    }

    fn rebuild(&mut self) {
        let tags = scan_tags(&self.text);
        let analysis = ConditionalAnalysis::from_tags(&tags);
        let fields = tags.iter().filter_map(|tag| {
            let mut field = parse_placeholder(tag)?;
            for dependency in analysis.dependencies_at(tag.start()) {
                field.add_dependency(dependency);
            }
            Some(field)
        });
        self.registry = FieldRegistry::from_fields(fields);
        self.analysis = analysis;
        log::debug!(
            "detected {} field(s) and {} group(s)",
            self.registry.len(),
            self.analysis.groups().len()
        );
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and re-run detection.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.rebuild();
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn options(&self) -> &FillOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FillOptions) {
        self.options = options;
    }

    pub fn analysis(&self) -> &ConditionalAnalysis {
        &self.analysis
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Every literal variant with its conditional dependencies filled in.
    pub fn fields(&self) -> Vec<PlaceholderField> {
        self.registry.fields().cloned().collect()
    }

    /// Option groups in first-appearance order.
    pub fn groups(&self) -> &[ConditionalGroup] {
        self.analysis.groups()
    }

    /// Logical fields relevant under a selection.
    pub fn visible_fields(&self, selection: &Selection) -> Vec<&FieldEntry> {
        self.registry.visible(selection).collect()
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Apply a section selection without substituting values.
    pub fn render_sections(&self, selection: &Selection) -> String {
        render_sections(&self.text, &self.analysis, selection)
    }

    /// Substitute values into the whole text, leaving block markers in place.
    pub fn fill(&self, values: &Values) -> String {
        substitute(&self.text, values, &self.options)
    }

    /// Apply a section selection, then substitute values into what remains.
    pub fn fill_with_selection(&self, selection: &Selection, values: &Values) -> String {
        let sectioned = self.render_sections(selection);
        substitute(&sectioned, values, &self.options)
    }

    // =========================================================================
    // Linting
    // =========================================================================

    /// Template warnings, ordered by offset.
    pub fn lint(&self) -> Vec<LintWarning> {
        lint_template(&scan_tags(&self.text), &self.analysis, &self.registry)
    }

    /// Warnings for values no field would use.
    pub fn lint_values(&self, values: &Values) -> Vec<LintWarning> {
        lint_values(&self.registry, values)
    }
}
