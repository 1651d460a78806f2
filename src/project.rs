use std::path::PathBuf;

use serde_json::Value;
use walkdir::WalkDir;

use crate::config::ConfigDoc;
use crate::diagnostics::Diagnostic;
use crate::logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Executable,
    Library,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    Static,
    Dynamic,
}

/// One buildable unit from the configuration. Immutable once built and
/// owned by the build driver. `linkage` is present iff the project is a
/// library.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub files: Vec<PathBuf>,
    pub headers: Vec<PathBuf>,
    pub kind: ProjectKind,
    pub linkage: Option<Linkage>,
}

/// Default extension filter for source files.
pub const DEFAULT_SOURCE_EXT: &str = ".nl";

/// Builds the project list from a parsed configuration document. Every
/// problem is a diagnostic against the config file: a broken project is
/// skipped and the rest of the configuration still loads.
pub fn load_projects(doc: &ConfigDoc) -> (Vec<Project>, Vec<Diagnostic>) {
    let mut projects = Vec::new();
    let mut diagnostics = Vec::new();
    let config_file = doc.path.display().to_string();

    let Some(project_dir) = doc.root.get("projectDir").and_then(Value::as_str) else {
        diagnostics.push(Diagnostic::error(
            config_file.as_str(),
            1,
            1,
            "projectDir",
            "config is missing a 'projectDir' string",
        ));
        return (projects, diagnostics);
    };
    let project_root = doc.base_dir().join(project_dir);
    logger::info(format!("project root: {}", project_root.display()));

    let Some(entries) = doc.root.get("projects").and_then(Value::as_object) else {
        diagnostics.push(Diagnostic::error(
            config_file.as_str(),
            1,
            1,
            "projects",
            "config is missing a 'projects' object",
        ));
        return (projects, diagnostics);
    };

    for (name, project_config) in entries {
        logger::info(format!("◁ ─┬─ project: {name} ───▷"));

        let kind = match project_config.get("type").and_then(Value::as_str) {
            Some("exec") => {
                logger::info("  ├▶ type: executable");
                ProjectKind::Executable
            }
            Some("lib") => {
                logger::info("  ├▶ type: library");
                ProjectKind::Library
            }
            other => {
                diagnostics.push(Diagnostic::error(
                    config_file.as_str(),
                    1,
                    1,
                    name.as_str(),
                    format!("project '{name}' has an invalid type {other:?} (expected \"exec\" or \"lib\")"),
                ));
                continue;
            }
        };

        let linkage = match kind {
            ProjectKind::Executable => None,
            ProjectKind::Library => {
                match project_config.get("library_type").and_then(Value::as_str) {
                    Some("static") => {
                        logger::info("  ├▶ linkage: static");
                        Some(Linkage::Static)
                    }
                    Some("dynamic") => {
                        logger::info("  ├▶ linkage: dynamic");
                        Some(Linkage::Dynamic)
                    }
                    other => {
                        logger::warn(format!(
                            "  ├▶ unknown linkage {other:?} - defaulting to static"
                        ));
                        diagnostics.push(Diagnostic::warning(
                            config_file.as_str(),
                            1,
                            1,
                            name.as_str(),
                            format!(
                                "project '{name}': unknown linkage {other:?}, defaulting to static"
                            ),
                        ));
                        Some(Linkage::Static)
                    }
                }
            }
        };

        let Some(source_dir) = project_config.get("sourceDir").and_then(Value::as_str) else {
            diagnostics.push(Diagnostic::error(
                config_file.as_str(),
                1,
                1,
                name.as_str(),
                format!("project '{name}' is missing a 'sourceDir' string"),
            ));
            continue;
        };
        let source_dir = project_root.join(source_dir);
        if !source_dir.exists() {
            diagnostics.push(Diagnostic::error(
                config_file.as_str(),
                1,
                1,
                name.as_str(),
                format!(
                    "project '{name}': source directory does not exist: {}",
                    source_dir.display()
                ),
            ));
            continue;
        }
        logger::info(format!("  ├▶ source directory: {}", source_dir.display()));

        let extension = match project_config.get("sourceFiles") {
            Some(Value::String(ext)) => ext.clone(),
            _ => {
                logger::info(format!(
                    "  ├▶ extension filter: {DEFAULT_SOURCE_EXT} (default)"
                ));
                DEFAULT_SOURCE_EXT.to_string()
            }
        };
        let wanted = extension.trim_start_matches('.');

        let mut files = Vec::new();
        for entry in WalkDir::new(&source_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .flatten()
        {
            let path = entry.into_path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(wanted) {
                files.push(path);
            }
        }

        logger::info("  └─┐ source files:");
        for (index, file) in files.iter().enumerate() {
            let glyph = if index + 1 == files.len() { "└─➤" } else { "├─➤" };
            logger::info(format!(
                "    {glyph} {}",
                file.file_name().unwrap_or_default().to_string_lossy()
            ));
        }

        projects.push(Project {
            name: name.clone(),
            files,
            headers: Vec::new(),
            kind,
            linkage,
        });
    }

    (projects, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &std::path::Path, contents: &str) -> ConfigDoc {
        let path = dir.join("nc.json");
        fs::write(&path, contents).expect("write config");
        ConfigDoc::from_file(&path).expect("parse config")
    }

    #[test]
    fn loads_executable_project_with_default_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("proj/src")).expect("mkdir");
        fs::write(dir.path().join("proj/src/main.nl"), "func main() {}").expect("write");
        fs::write(dir.path().join("proj/src/notes.txt"), "skip me").expect("write");

        let doc = write_config(
            dir.path(),
            r#"{
                "projectDir": "proj",
                "projects": {
                    "demo": { "type": "exec", "sourceDir": "src" }
                }
            }"#,
        );
        let (projects, diagnostics) = load_projects(&doc);

        assert!(diagnostics.is_empty());
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "demo");
        assert_eq!(projects[0].kind, ProjectKind::Executable);
        assert_eq!(projects[0].linkage, None);
        assert_eq!(projects[0].files.len(), 1);
        assert!(projects[0].files[0].ends_with("main.nl"));
    }

    #[test]
    fn unknown_linkage_defaults_to_static_with_warning() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("proj/lib")).expect("mkdir");

        let doc = write_config(
            dir.path(),
            r#"{
                "projectDir": "proj",
                "projects": {
                    "mylib": { "type": "lib", "library_type": "weird", "sourceDir": "lib" }
                }
            }"#,
        );
        let (projects, diagnostics) = load_projects(&doc);

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].linkage, Some(Linkage::Static));
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].is_error());
    }

    #[test]
    fn missing_source_dir_skips_project_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("proj/src")).expect("mkdir");

        let doc = write_config(
            dir.path(),
            r#"{
                "projectDir": "proj",
                "projects": {
                    "broken": { "type": "exec", "sourceDir": "nowhere" },
                    "ok": { "type": "exec", "sourceDir": "src" }
                }
            }"#,
        );
        let (projects, diagnostics) = load_projects(&doc);

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "ok");
        let errors: Vec<_> = diagnostics.iter().filter(|d| d.is_error()).collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("does not exist"));
    }

    #[test]
    fn custom_extension_filter() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("proj/src")).expect("mkdir");
        fs::write(dir.path().join("proj/src/a.nova"), "").expect("write");
        fs::write(dir.path().join("proj/src/b.nl"), "").expect("write");

        let doc = write_config(
            dir.path(),
            r#"{
                "projectDir": "proj",
                "projects": {
                    "demo": { "type": "exec", "sourceDir": "src", "sourceFiles": ".nova" }
                }
            }"#,
        );
        let (projects, _) = load_projects(&doc);

        assert_eq!(projects[0].files.len(), 1);
        assert!(projects[0].files[0].ends_with("a.nova"));
    }
}
