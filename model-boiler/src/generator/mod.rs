//! Code generator module.
//!
//! This module wires the pipeline together: the splitter produces
//! fragments, and each fragment goes through the scanner, the type
//! resolver, the naming transform and the emitter. Blocks are joined with
//! one blank line between them.

pub mod emitter;
pub mod naming;
pub mod type_resolver;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::BoilerResult;
use crate::ir::{DeclarationFragment, DeclarationKind, PropertyDeclaration, ResolvedField};
use crate::parser::{DeclarationScanner, DeclarationSplitter};

pub use emitter::{CodableEmitter, GeneratedBlock};
pub use naming::{serialized_key, to_snake_case};
pub use type_resolver::{infer_literal_type, InferenceRule, TypeResolver};

/// Generator configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Serialize camelCase property names as snake_case keys.
    pub convert_camel_case_to_snake_case: bool,

    /// Emit only the `init(from:)` section.
    pub only_generate_initializer: bool,
}

impl GeneratorConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camelCase to snake_case key conversion.
    pub fn with_snake_case(mut self, enabled: bool) -> Self {
        self.convert_camel_case_to_snake_case = enabled;
        self
    }

    /// Set initializer-only output.
    pub fn with_only_initializer(mut self, enabled: bool) -> Self {
        self.only_generate_initializer = enabled;
        self
    }
}

/// Generation result for one declaration fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFragment {
    /// Qualified type name (`Outer.Inner` for embedded declarations).
    pub name: String,

    /// Declaration kind.
    pub kind: DeclarationKind,

    /// Resolved fields in declaration order.
    pub fields: Vec<ResolvedField>,

    /// Emitted sections.
    pub block: GeneratedBlock,
}

/// Result of a full generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    /// Final generated text.
    pub content: String,

    /// Per-fragment details, outer first.
    pub fragments: Vec<GeneratedFragment>,
}

/// Generator producing `Codable` conformance code from Swift source.
#[derive(Debug, Default, Clone)]
pub struct CodableGenerator {
    config: GeneratorConfig,
    splitter: DeclarationSplitter,
    scanner: DeclarationScanner,
    resolver: TypeResolver,
    emitter: CodableEmitter,
}

impl CodableGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the output text for `source`.
    ///
    /// All-or-nothing: the first error from any fragment aborts the call.
    pub fn generate(&self, source: &str) -> BoilerResult<String> {
        self.generate_output(source).map(|output| output.content)
    }

    /// Generate the output text along with per-fragment details.
    pub fn generate_output(&self, source: &str) -> BoilerResult<GeneratedOutput> {
        let fragments = self
            .splitter
            .split(source)?
            .iter()
            .map(|fragment| self.generate_fragment(fragment))
            .collect::<BoilerResult<Vec<_>>>()?;

        let content = fragments
            .iter()
            .map(|fragment| fragment.block.render(self.config.only_generate_initializer))
            .collect::<Vec<_>>()
            .join("\n\n");

        debug!(
            fragments = fragments.len(),
            snake_case = self.config.convert_camel_case_to_snake_case,
            only_initializer = self.config.only_generate_initializer,
            "Generated Codable code"
        );

        Ok(GeneratedOutput { content, fragments })
    }

    /// Generate the sections for a single fragment.
    pub fn generate_fragment(&self, fragment: &DeclarationFragment) -> BoilerResult<GeneratedFragment> {
        let declarations = self.scanner.scan(&fragment.body)?;
        let fields = self.resolve_fields(&declarations)?;
        let block = self.emitter.emit(&fields);

        debug!(
            name = %fragment.qualified_name(),
            kind = %fragment.kind,
            fields = fields.len(),
            "Generated fragment"
        );

        Ok(GeneratedFragment {
            name: fragment.qualified_name(),
            kind: fragment.kind,
            fields,
            block,
        })
    }

    /// Resolve types and serialized keys for scanned properties, in order.
    pub fn resolve_fields(&self, declarations: &[PropertyDeclaration]) -> BoilerResult<Vec<ResolvedField>> {
        declarations
            .iter()
            .map(|declaration| {
                let emitted_type = self.resolver.resolve(declaration)?;
                let key = serialized_key(
                    &declaration.name,
                    self.config.convert_camel_case_to_snake_case,
                );
                trace!(
                    name = %declaration.name,
                    emitted_type = %emitted_type,
                    key = %key,
                    "Resolved field"
                );
                Ok(ResolvedField::new(declaration.name.clone(), emitted_type, key))
            })
            .collect()
    }
}
