//! End-to-end documentation builds against a scratch project, with fake
//! executables and scripted terminal input.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use devtools_docs::{
    BuildReport, BuildSettings, CommandRunner, ConfigFile, ConfigKey, DocsBuild, DocsError, Invocation,
    ProcessOutcome, Prompter, StepStatus, ToolLocator,
};

const TEMPLATE: &str = "\
# Doxyfile for the iRODS API reference

PROJECT_NAME           = iRODS
PROJECT_NUMBER         = 4.2.0
# Where the generated tree goes.
OUTPUT_DIRECTORY       = doxygen
STRIP_FROM_PATH        = /tmp/stale
INPUT                  = lib/core/include \\
                         server/core/include
EXTRACT_ALL            = YES
GENERATE_HTML          = YES
GENERATE_RTF           = NO
GENERATE_LATEX         = YES
";

/// Locator that knows a fixed set of programs.
struct FakePath(HashMap<String, PathBuf>);

impl FakePath {
    fn with(programs: &[&str]) -> Self {
        Self(
            programs
                .iter()
                .map(|p| (p.to_string(), PathBuf::from("/usr/bin").join(p)))
                .collect(),
        )
    }
}

impl ToolLocator for FakePath {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.0.get(program).cloned()
    }
}

/// Runner that records invocations and exits with a per-program code.
#[derive(Default)]
struct FakeRunner {
    exit_codes: HashMap<String, i32>,
    calls: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    fn failing(program: &str, code: i32) -> Self {
        Self {
            exit_codes: HashMap::from([(program.to_string(), code)]),
            ..Self::default()
        }
    }

    fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Invocation::display_name).collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessOutcome> {
        self.calls.borrow_mut().push(invocation.clone());
        let code = self.exit_codes.get(&invocation.display_name()).copied().unwrap_or(0);
        Ok(ProcessOutcome {
            code: Some(code),
            ..ProcessOutcome::default()
        })
    }
}

fn project(template: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    std::fs::write(dir.path().join("config/doxygen-default.cfg"), template).unwrap();
    dir
}

fn saved_path(root: &Path) -> PathBuf {
    root.join("config/doxygen-saved.cfg")
}

/// Run a build with `input` as the terminal; returns the result and the
/// prompt transcript.
fn build(
    root: &Path,
    locator: &FakePath,
    runner: &FakeRunner,
    input: &str,
) -> (Result<BuildReport, DocsError>, String) {
    let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let mut docs = DocsBuild::new(BuildSettings::for_root(root), locator, runner, prompter);
    let result = docs.run();
    let transcript = String::from_utf8(docs.into_prompter().into_output()).unwrap();
    (result, transcript)
}

#[test]
fn test_fresh_run_keeps_defaults_and_trims_answers() {
    let dir = project(TEMPLATE);
    let locator = FakePath::with(&["doxygen", "pdflatex", "make"]);
    let runner = FakeRunner::default();

    // PROJECT_NUMBER, PROJECT_NAME, OUTPUT_DIRECTORY, INPUT, then the flags.
    let (result, transcript) = build(dir.path(), &locator, &runner, "  4.3.1 \n\nbuild/docs\n\n\n\n\n");
    let report = result.unwrap();

    assert!(!report.reused);
    assert_eq!(report.config.get(ConfigKey::ProjectNumber), "4.3.1");
    assert_eq!(report.config.get(ConfigKey::ProjectName), "iRODS");
    assert_eq!(report.config.get(ConfigKey::Input), "lib/core/include server/core/include");
    assert_eq!(report.config.get(ConfigKey::OutputDirectory), "build/docs");
    assert_eq!(
        transcript,
        "PROJECT_NUMBER [4.2.0]: PROJECT_NAME [iRODS]: OUTPUT_DIRECTORY [doxygen]: \
         INPUT [lib/core/include server/core/include]: GENERATE_RTF [NO]: \
         GENERATE_LATEX [YES]: GENERATE_HTML [YES]: "
    );
    assert!(!transcript.contains("STRIP_FROM_PATH"));
}

#[test]
fn test_saved_file_has_strip_path_equal_to_output_directory() {
    let dir = project(TEMPLATE);
    let locator = FakePath::with(&["doxygen"]);
    let runner = FakeRunner::default();

    let (result, _) = build(dir.path(), &locator, &runner, "\n\napi-docs\n");
    result.unwrap();

    let saved = ConfigFile::read(&saved_path(dir.path())).unwrap();
    assert_eq!(saved.get("OUTPUT_DIRECTORY").as_deref(), Some("api-docs"));
    assert_eq!(saved.get("STRIP_FROM_PATH").as_deref(), Some("api-docs"));
}

#[test]
fn test_saved_file_preserves_comments_and_unrecognized_keys() {
    let dir = project(TEMPLATE);
    let locator = FakePath::with(&["doxygen"]);
    let runner = FakeRunner::default();

    let (result, _) = build(dir.path(), &locator, &runner, "");
    result.unwrap();

    let text = std::fs::read_to_string(saved_path(dir.path())).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "# Doxyfile for the iRODS API reference");
    assert_eq!(lines[1], "");
    assert_eq!(lines[4], "# Where the generated tree goes.");
    assert!(lines.contains(&"EXTRACT_ALL            = YES"));
    assert!(lines.contains(&"STRIP_FROM_PATH        = doxygen"));
    assert!(lines.contains(&"INPUT                  = lib/core/include server/core/include"));
    assert!(!text.contains("/tmp/stale"));
}

#[test]
fn test_reuse_skips_key_prompts() {
    let dir = project(TEMPLATE);
    let locator = FakePath::with(&["doxygen"]);
    std::fs::write(
        saved_path(dir.path()),
        "PROJECT_NAME = saved\nOUTPUT_DIRECTORY = out\nSTRIP_FROM_PATH = wrong\nGENERATE_HTML = YES\n",
    )
    .unwrap();

    let runner = FakeRunner::default();
    let (result, transcript) = build(dir.path(), &locator, &runner, "\n");
    let report = result.unwrap();

    assert!(report.reused);
    assert_eq!(report.config.get(ConfigKey::ProjectName), "saved");
    assert_eq!(report.config.get(ConfigKey::StripFromPath), "out");
    assert_eq!(
        transcript,
        format!("Use saved configuration {}? [Y/n]: ", saved_path(dir.path()).display())
    );
    for key in ConfigKey::ALL {
        assert!(!transcript.contains(key.as_str()), "prompted for {key}");
    }

    let saved = ConfigFile::read(&saved_path(dir.path())).unwrap();
    assert_eq!(saved.get("STRIP_FROM_PATH").as_deref(), Some("out"));
}

#[test]
fn test_declining_reuse_prompts_from_template() {
    let dir = project(TEMPLATE);
    let locator = FakePath::with(&["doxygen"]);
    std::fs::write(saved_path(dir.path()), "PROJECT_NAME = saved\n").unwrap();

    let runner = FakeRunner::default();
    let (result, transcript) = build(dir.path(), &locator, &runner, " No \n");
    let report = result.unwrap();

    assert!(!report.reused);
    assert_eq!(report.config.get(ConfigKey::ProjectName), "iRODS");
    assert!(transcript.contains("PROJECT_NAME [iRODS]: "));
}

#[test]
fn test_generator_runs_from_project_root_with_saved_config() {
    let dir = project(TEMPLATE);
    let locator = FakePath::with(&["doxygen", "pdflatex", "make"]);
    let runner = FakeRunner::default();

    let (result, _) = build(dir.path(), &locator, &runner, "");
    let report = result.unwrap();
    assert!(report.is_clean());

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].program, PathBuf::from("/usr/bin/doxygen"));
    assert_eq!(calls[0].args, vec![saved_path(dir.path()).into_os_string()]);
    assert_eq!(calls[0].current_dir, dir.path());
    assert_eq!(calls[1].program, PathBuf::from("/usr/bin/make"));
    assert_eq!(calls[1].current_dir, dir.path().join("doxygen/latex"));
}

#[test]
fn test_missing_generator_is_fatal() {
    let dir = project(TEMPLATE);
    let locator = FakePath::with(&["pdflatex", "make"]);
    let runner = FakeRunner::default();

    let (result, transcript) = build(dir.path(), &locator, &runner, "");
    assert!(matches!(result, Err(DocsError::MissingTool { ref program }) if program == "doxygen"));
    assert!(transcript.is_empty());
    assert!(runner.calls.borrow().is_empty());
    assert!(!saved_path(dir.path()).exists());
}

#[test]
fn test_generator_failure_is_reported_and_run_continues() {
    let dir = project(TEMPLATE);
    let locator = FakePath::with(&["doxygen", "pdflatex", "make"]);
    let runner = FakeRunner::failing("doxygen", 3);

    let (result, _) = build(dir.path(), &locator, &runner, "");
    let report = result.unwrap();

    assert_eq!(report.generator, StepStatus::Failed { code: Some(3) });
    assert_eq!(runner.programs(), ["doxygen", "make"]);
    // Locations are listed from the flags even though nothing was generated.
    assert_eq!(report.artifacts.len(), 2);
}

#[test]
fn test_missing_typesetter_skips_pdf() {
    let dir = project(TEMPLATE);
    let locator = FakePath::with(&["doxygen", "make"]);
    let runner = FakeRunner::default();

    let (result, _) = build(dir.path(), &locator, &runner, "");
    let report = result.unwrap();

    assert!(matches!(report.pdf, Some(StepStatus::Skipped { .. })));
    assert_eq!(runner.programs(), ["doxygen"]);
}

#[test]
fn test_pdf_stage_needs_latex_enabled() {
    let dir = project(TEMPLATE);
    let locator = FakePath::with(&["doxygen", "pdflatex", "make"]);
    let runner = FakeRunner::default();

    // Answer NO for GENERATE_LATEX (sixth prompt).
    let (result, _) = build(dir.path(), &locator, &runner, "\n\n\n\n\nNO\n\n");
    let report = result.unwrap();

    assert_eq!(report.pdf, None);
    assert_eq!(runner.programs(), ["doxygen"]);
}

#[test]
fn test_report_lists_enabled_formats_only() {
    let dir = project(TEMPLATE);
    let locator = FakePath::with(&["doxygen"]);
    let runner = FakeRunner::default();

    // GENERATE_RTF = YES, GENERATE_LATEX = yes (not enabled), GENERATE_HTML default YES.
    let (result, _) = build(dir.path(), &locator, &runner, "\n\n\n\nYES\nyes\n\n");
    let report = result.unwrap();

    let mut out = Vec::new();
    report.write_artifacts(&mut out).unwrap();
    let root = dir.path().join("doxygen");
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!(
            "RTF documentation: {}\nHTML documentation: {}\n",
            root.join("rtf/refman.rtf").display(),
            root.join("html/index.html").display()
        )
    );
}

#[test]
fn test_stale_output_is_removed_before_generation() {
    let dir = project(TEMPLATE);
    let html = dir.path().join("doxygen/html");
    std::fs::create_dir_all(&html).unwrap();
    std::fs::write(html.join("index.html"), "old").unwrap();

    let locator = FakePath::with(&["doxygen"]);
    let runner = FakeRunner::default();
    let (result, _) = build(dir.path(), &locator, &runner, "");
    result.unwrap();

    assert!(!html.exists());
}

#[test]
fn test_missing_template_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let locator = FakePath::with(&["doxygen"]);
    let runner = FakeRunner::default();

    let (result, _) = build(dir.path(), &locator, &runner, "");
    assert!(matches!(result, Err(DocsError::Read { .. })));
    assert!(runner.calls.borrow().is_empty());
}
