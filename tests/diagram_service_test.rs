//! Tests for DiagramService (load → layout → draw → export)

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use wbs_mindmap::application::services::{DiagramRequest, DiagramService};
use wbs_mindmap::application::ApplicationError;
use wbs_mindmap::config::StyleConfig;
use wbs_mindmap::domain::{DomainError, LayoutKind};
use wbs_mindmap::infrastructure::traits::{FileSystem, RealFileSystem};
use wbs_mindmap::util::testing;

const EXAMPLE: &str = r#"{"label": "Root", "children": [{"label": "A", "children": []}, {"label": "B", "children": [{"label": "B1", "children": []}]}]}"#;

fn service() -> DiagramService {
    testing::init_test_setup();
    DiagramService::new(Arc::new(RealFileSystem), StyleConfig::default())
}

fn write_outline(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("outline.json");
    std::fs::write(&path, content).expect("write outline");
    path
}

fn request(input: PathBuf, output: PathBuf) -> DiagramRequest {
    DiagramRequest {
        input,
        output,
        dpi: 150,
        layout: LayoutKind::Radial,
    }
}

#[rstest]
#[case(LayoutKind::Radial)]
#[case(LayoutKind::Tree)]
fn given_valid_outline_when_generating_then_writes_pdf(#[case] layout: LayoutKind) {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = write_outline(&temp, EXAMPLE);
    let output = temp.path().join("out.pdf");

    // Act
    let report = service()
        .generate(&DiagramRequest {
            layout,
            ..request(input, output.clone())
        })
        .unwrap();

    // Assert
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(report.bytes, bytes.len());
    assert_eq!(report.node_count, 4);
    assert_eq!(report.edge_count, 3);
}

#[test]
fn given_missing_output_directories_when_generating_then_creates_them() {
    let temp = TempDir::new().unwrap();
    let input = write_outline(&temp, EXAMPLE);
    let output = temp.path().join("output/nested/secure-clinical-communication.pdf");

    service().generate(&request(input, output.clone())).unwrap();

    assert!(output.is_file());
}

#[test]
fn given_missing_input_when_generating_then_file_not_found_and_no_output() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("output/out.pdf");

    let result = service().generate(&request(temp.path().join("nope.json"), output.clone()));

    assert!(matches!(result, Err(ApplicationError::FileNotFound { .. })));
    assert!(!output.exists());
    assert!(!temp.path().join("output").exists(), "no directories on failure");
}

#[test]
fn given_children_as_string_when_generating_then_parse_error_and_no_output() {
    let temp = TempDir::new().unwrap();
    let input = write_outline(&temp, r#"{"label": "Root", "children": "A"}"#);
    let output = temp.path().join("out.pdf");

    let result = service().generate(&request(input, output.clone()));

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::Parse { .. }))
    ));
    assert!(!output.exists());
}

#[test]
fn given_existing_output_when_input_missing_then_output_unmodified() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.pdf");
    std::fs::write(&output, b"previous").unwrap();

    let result = service().generate(&request(temp.path().join("nope.json"), output.clone()));

    assert!(result.is_err());
    assert_eq!(std::fs::read(&output).unwrap(), b"previous");
}

#[test]
fn given_output_parent_is_a_file_when_generating_then_write_error() {
    let temp = TempDir::new().unwrap();
    let input = write_outline(&temp, EXAMPLE);
    let blocker = temp.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let result = service().generate(&request(input, blocker.join("out.pdf")));

    assert!(matches!(result, Err(ApplicationError::Write { .. })));
}

/// Filesystem whose writes always fail, to check nothing is left behind.
struct FailingWrites {
    inner: RealFileSystem,
}

impl FileSystem for FailingWrites {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.inner.read_to_string(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.inner.create_dir_all(path)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        self.inner.ensure_parent(path)
    }

    fn write_atomic(&self, _path: &Path, _content: &[u8]) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

#[test]
fn given_write_failure_when_generating_then_write_error_and_no_file() {
    let temp = TempDir::new().unwrap();
    let input = write_outline(&temp, EXAMPLE);
    let output = temp.path().join("out.pdf");
    let service = DiagramService::new(
        Arc::new(FailingWrites {
            inner: RealFileSystem,
        }),
        StyleConfig::default(),
    );

    let result = service.generate(&request(input, output.clone()));

    match result {
        Err(ApplicationError::Write { path, .. }) => assert_eq!(path, output),
        other => panic!("expected write error, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn given_different_dpi_when_generating_then_topology_unchanged() {
    let temp = TempDir::new().unwrap();
    let input = write_outline(&temp, EXAMPLE);
    let svc = service();

    let low = svc
        .generate(&DiagramRequest {
            dpi: 72,
            ..request(input.clone(), temp.path().join("low.pdf"))
        })
        .unwrap();
    let high = svc
        .generate(&DiagramRequest {
            dpi: 600,
            ..request(input, temp.path().join("high.pdf"))
        })
        .unwrap();

    assert_eq!(low.node_count, high.node_count);
    assert_eq!(low.edge_count, high.edge_count);
    assert_eq!(low.width, high.width);
    assert_eq!(low.height, high.height);
}

#[test]
fn given_same_input_when_rendering_twice_then_scene_identical() {
    let temp = TempDir::new().unwrap();
    let input = write_outline(&temp, EXAMPLE);
    let svc = service();
    let outline = svc.load_outline(&input).unwrap();

    let (_, first) = svc.render(&outline, LayoutKind::Radial);
    let (_, second) = svc.render(&outline, LayoutKind::Radial);

    assert_eq!(first.svg, second.svg);
}

#[test]
fn given_sample_outline_when_generating_then_counts_match_outline() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("wbs.pdf");
    let svc = service();
    let outline = svc.load_outline(Path::new("tests/resources/outline.json")).unwrap();

    let report = svc
        .generate(&request(PathBuf::from("tests/resources/outline.json"), output.clone()))
        .unwrap();

    assert_eq!(report.node_count, outline.node_count());
    assert_eq!(report.edge_count, outline.node_count() - 1);
    assert!(std::fs::metadata(&output).unwrap().len() > 0);
}
