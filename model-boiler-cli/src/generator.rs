//! Per-file code generation.
//!
//! This module runs the `model-boiler` generator over discovered source
//! files and decides where each result goes. A failing file does not stop
//! the batch; its error is collected and the remaining files are processed.

use crate::config::Config;
use crate::error::GenerateError;
use crate::scanner::{SourceFile, SWIFT_EXTENSION};
use model_boiler::CodableGenerator;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// First words of the header line written at the top of generated files.
pub const HEADER_PREFIX: &str = "// Generated by model-boiler";

/// Generated code for one source file.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Source file the code was generated from.
    pub source: PathBuf,

    /// Where the generated code should be written.
    pub output_path: PathBuf,

    /// File content.
    pub content: String,

    /// Qualified names of the declarations covered, outer first.
    pub declarations: Vec<String>,
}

/// Result of generating a batch of files.
#[derive(Debug, Default)]
pub struct BatchOutput {
    /// Successfully generated files, in input order.
    pub files: Vec<GeneratedFile>,

    /// Per-file failures, in input order.
    pub errors: Vec<GenerateError>,
}

impl BatchOutput {
    /// Whether every file generated.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collapse collected failures into a single error.
    pub fn into_error(self) -> Option<GenerateError> {
        match self.errors.len() {
            0 => None,
            1 => self.errors.into_iter().next(),
            _ => Some(GenerateError::Multiple(self.errors)),
        }
    }
}

/// Generator turning Swift source files into `Codable` companion files.
pub struct FileGenerator {
    generator: CodableGenerator,
    output_dir: PathBuf,
    file_suffix: String,
}

impl FileGenerator {
    /// Create a new file generator with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            generator: CodableGenerator::new(config.generator_config()),
            output_dir: config.output.dir.clone(),
            file_suffix: config.output.file_suffix.clone(),
        }
    }

    /// Generate code for every file, collecting failures.
    pub fn generate_files(&self, sources: &[SourceFile]) -> BatchOutput {
        let mut output = BatchOutput::default();

        for source in sources {
            match self.generate_file(source) {
                Ok(file) => output.files.push(file),
                Err(e) => {
                    warn!(path = %source.path.display(), error = %e, "Skipping file");
                    output.errors.push(e);
                }
            }
        }

        output
    }

    /// Generate code for a single file.
    pub fn generate_file(&self, source: &SourceFile) -> Result<GeneratedFile, GenerateError> {
        let generated = self
            .generator
            .generate_output(&source.content)
            .map_err(|e| GenerateError::file(&source.path, e))?;

        let declarations: Vec<String> = generated
            .fragments
            .iter()
            .map(|fragment| fragment.name.clone())
            .collect();

        debug!(
            path = %source.path.display(),
            declarations = declarations.len(),
            "Generated file"
        );

        Ok(GeneratedFile {
            source: source.path.clone(),
            output_path: self.output_path(&source.relative_path),
            content: self.file_content(&source.relative_path, &generated.content),
            declarations,
        })
    }

    /// Output location for a source path relative to the scan root.
    ///
    /// The relative directory is kept so sources with the same name in
    /// different folders do not collide.
    pub fn output_path(&self, relative: &Path) -> PathBuf {
        let stem = relative
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = format!("{}{}.{}", stem, self.file_suffix, SWIFT_EXTENSION);

        match relative.parent() {
            Some(parent) => self.output_dir.join(parent).join(file_name),
            None => self.output_dir.join(file_name),
        }
    }

    /// Wrap generated code with a provenance header.
    fn file_content(&self, relative: &Path, code: &str) -> String {
        format!(
            "{} from {}. Do not edit.\n\n{}\n",
            HEADER_PREFIX,
            relative.to_string_lossy().replace('\\', "/"),
            code
        )
    }
}

/// The generated code in a file's content, without the header line.
pub fn strip_header(content: &str) -> &str {
    match content.split_once('\n') {
        Some((first, rest)) if first.starts_with(HEADER_PREFIX) => rest.trim(),
        _ => content.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_boiler::BoilerError;

    fn source(relative: &str, content: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from("/project").join(relative),
            relative_path: PathBuf::from(relative),
            content: content.to_string(),
        }
    }

    fn generator() -> FileGenerator {
        let mut config = Config::default();
        config.output.dir = PathBuf::from("/out");
        FileGenerator::new(&config)
    }

    #[test]
    fn test_output_path_keeps_relative_directories() {
        let generator = generator();
        assert_eq!(
            generator.output_path(Path::new("User.swift")),
            PathBuf::from("/out/User+Codable.swift")
        );
        assert_eq!(
            generator.output_path(Path::new("Models/Order.swift")),
            PathBuf::from("/out/Models/Order+Codable.swift")
        );
    }

    #[test]
    fn test_generate_file() {
        let file = generator()
            .generate_file(&source("User.swift", "struct User {\n    let id: Int\n}"))
            .unwrap();

        assert_eq!(file.declarations, vec!["User"]);
        assert!(file
            .content
            .starts_with("// Generated by model-boiler from User.swift. Do not edit.\n\n"));
        assert!(file.content.contains("case id = \"id\""));
        assert!(file.content.ends_with("}\n"));
    }

    #[test]
    fn test_strip_header() {
        let file = generator()
            .generate_file(&source("Models/User.swift", "struct User {\n    let id: Int\n}"))
            .unwrap();
        let code = strip_header(&file.content);
        assert!(code.starts_with("enum CodingKeys"));
        assert!(code.ends_with('}'));
        assert_eq!(strip_header("  plain code\n"), "plain code");
    }

    #[test]
    fn test_generate_files_collects_errors() {
        let sources = vec![
            source("A.swift", "struct A {\n    let a: Int\n}"),
            source("B.swift", "class B {\n    let b: Int\n}"),
            source("C.swift", "struct C {\n    let c: Int\n}"),
        ];

        let output = generator().generate_files(&sources);
        assert!(!output.is_success());
        assert_eq!(output.files.len(), 2);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(
            output.errors[0].boiler_error(),
            Some(&BoilerError::unsupported("class"))
        );

        let error = output.into_error().unwrap();
        assert!(error.to_string().contains("B.swift"));
    }

    #[test]
    fn test_into_error_multiple() {
        let sources = vec![source("A.swift", "enum A {}"), source("B.swift", "")];
        let error = generator().generate_files(&sources).into_error().unwrap();
        assert!(matches!(error, GenerateError::Multiple(ref errors) if errors.len() == 2));
    }
}
