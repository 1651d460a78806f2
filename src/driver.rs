use std::fs;
use std::path::Path;

use crate::codegen;
use crate::config::{self, ConfigDoc};
use crate::diagnostics::Diagnostic;
use crate::error::BuildError;
use crate::ir::{self, Module};
use crate::logger;
use crate::parser::{self, FunctionRecord};
use crate::project::{self, Project};
use crate::types;

pub const TARGET_TRIPLE: &str = "aarch64-unknown-linux-gnu";
pub const DATA_LAYOUT: &str = "e-m:e-i64:64-i128:128-n32:64-S128";
/// Lines containing this marker are treated as function declarations.
pub const FUNCTION_MARKER: &str = "func ";
pub const IR_EXTENSION: &str = "ll";

/// The build driver: owns the project list for the duration of a build and
/// collects every diagnostic produced along the way.
pub struct Compiler {
    projects: Vec<Project>,
    diagnostics: Vec<Diagnostic>,
}

impl Compiler {
    /// Builds a compiler from the discovered configuration, or with zero
    /// projects when no configuration file exists.
    pub fn new() -> Result<Self, BuildError> {
        match config::find_config() {
            Some(path) => Self::from_config_path(&path),
            None => {
                logger::info("no configuration file found - using defaults");
                Ok(Self {
                    projects: Vec::new(),
                    diagnostics: Vec::new(),
                })
            }
        }
    }

    pub fn from_config_path(path: &Path) -> Result<Self, BuildError> {
        let doc = ConfigDoc::from_file(path)?;
        let (projects, diagnostics) = project::load_projects(&doc);
        Ok(Self {
            projects,
            diagnostics,
        })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Compiles every project, writing one IR artifact per source file into
    /// `output_dir`.
    pub fn generate_all(&mut self, output_dir: &Path) -> Result<(), BuildError> {
        fs::create_dir_all(output_dir).map_err(|source| BuildError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let projects = std::mem::take(&mut self.projects);
        for project in &projects {
            self.generate_project(project, output_dir);
        }
        self.projects = projects;
        Ok(())
    }

    /// Compiles one project. A module-verification failure is fatal for the
    /// project's remaining files but never for the whole build.
    pub fn generate_project(&mut self, project: &Project, output_dir: &Path) {
        logger::info(format!("◁ ─┬─ compiling: {} ───▷", project.name));

        for (index, file) in project.files.iter().enumerate() {
            let glyph = if index + 1 == project.files.len() { "└─➤" } else { "├─➤" };
            logger::info(format!(
                "   {glyph} {}",
                file.file_name().unwrap_or_default().to_string_lossy()
            ));

            let file_name = file.display().to_string();
            let source = match fs::read_to_string(file) {
                Ok(source) => source,
                Err(err) => {
                    self.diagnostics.push(Diagnostic::error(
                        file_name.as_str(),
                        1,
                        1,
                        "",
                        format!("failed to open source file: {err}"),
                    ));
                    continue;
                }
            };

            let built = build_module(&project.name, file, &source);
            self.diagnostics.extend(built.diagnostics);

            let mut ir_path = output_dir.join(file.file_stem().unwrap_or_default());
            ir_path.set_extension(IR_EXTENSION);
            if let Err(err) = fs::write(&ir_path, built.module.to_string()) {
                logger::error(format!("failed to write IR file: {}", ir_path.display()));
                self.diagnostics.push(Diagnostic::error(
                    file_name.as_str(),
                    1,
                    1,
                    "",
                    format!("failed to write IR file {}: {err}", ir_path.display()),
                ));
                continue;
            }

            if let Err(errors) = ir::verify_module(&built.module) {
                for message in errors {
                    self.diagnostics.push(Diagnostic::error(
                        file_name.as_str(),
                        1,
                        1,
                        "",
                        format!("module verification failed: {message}"),
                    ));
                }
                logger::error(format!(
                    "module verification failed - aborting project '{}'",
                    project.name
                ));
                return;
            }
        }

        logger::info(format!("◁ ─── finished compiling: {} ───▷", project.name));
    }
}

/// Result of building one source file into a module.
pub struct BuiltModule {
    pub module: Module,
    pub records: Vec<FunctionRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds the module for one source file: scans its lines for the function
/// marker and runs declaration parse → body extraction → type mapping →
/// code generation per match. A parse or type failure aborts only that
/// function.
pub fn build_module(project_name: &str, path: &Path, source: &str) -> BuiltModule {
    let file = path.display().to_string();
    let mut module = Module {
        name: project_name.to_string(),
        source_filename: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        target_triple: TARGET_TRIPLE.to_string(),
        data_layout: DATA_LAYOUT.to_string(),
        functions: Vec::new(),
    };
    let mut records = Vec::new();
    let mut diagnostics = Vec::new();

    let lines: Vec<String> = source.lines().map(str::to_string).collect();

    for (index, line) in lines.iter().enumerate() {
        if !line.contains(FUNCTION_MARKER) {
            continue;
        }
        let line_no = index + 1;

        let decl = match parser::parse_declaration(line, line_no, &file) {
            Ok(decl) => decl,
            Err(diagnostic) => {
                diagnostics.push(diagnostic);
                continue;
            }
        };

        let Some(return_type) = types::scalar_type(&decl.return_type_name) else {
            diagnostics.push(Diagnostic::error(
                file.as_str(),
                line_no,
                1,
                line.trim(),
                format!("unknown return type: {}", decl.return_type_name),
            ));
            continue;
        };

        let body = parser::extract_body(&lines, index);
        let record = FunctionRecord {
            name: decl.name,
            params: decl.params,
            return_type_name: decl.return_type_name,
            source_offset: line_no,
        };

        let (function, mut function_diagnostics) =
            codegen::lower_function(&record, &body, return_type, &file);
        diagnostics.append(&mut function_diagnostics);
        module.functions.push(function);
        records.push(record);
    }

    BuiltModule {
        module,
        records,
        diagnostics,
    }
}
