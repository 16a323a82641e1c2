//! Integration tests for Trellis
//!
//! These tests run the CLI end to end on files in a temporary directory.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

const DIAGRAM: &str = r#"{
  "resourceId": "oryx-canvas",
  "properties": { "name": "Claims" },
  "stencil": { "id": "BPMNDiagram" },
  "stencilset": { "url": "/stencilsets/bpmn1.1/bpmn1.1.json", "namespace": "http://b3mn.org/stencilset/bpmn1.1#" },
  "childShapes": [
    {
      "resourceId": "task-1",
      "stencil": { "id": "Task" },
      "properties": { "name": "Review", "looptype": "MultiInstance", "loopcounter": "i" },
      "bounds": { "upperLeft": { "x": 10, "y": 10 }, "lowerRight": { "x": 110, "y": 90 } },
      "childShapes": [],
      "outgoing": [{ "resourceId": "assoc-1" }]
    },
    {
      "resourceId": "assoc-1",
      "stencil": { "id": "Association_Bidirectional" },
      "properties": { "direction": "Both" },
      "childShapes": [],
      "outgoing": [{ "resourceId": "note-1" }],
      "target": { "resourceId": "note-1" },
      "dockers": [{ "x": 50, "y": 40 }, { "x": 20, "y": 20 }]
    },
    {
      "resourceId": "note-1",
      "stencil": { "id": "TextAnnotation" },
      "properties": {},
      "childShapes": [],
      "outgoing": []
    }
  ]
}"#;

fn trellis() -> Command {
    Command::new(env!("CARGO_BIN_EXE_trellis"))
}

#[test]
fn test_cli_help() {
    let output = trellis().arg("--help").output().expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Convert editor diagrams between JSON and XPDL"));
}

#[test]
fn test_convert_writes_xpdl() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("diagram.json");
    let output = temp_dir.path().join("diagram.xpdl");
    let config = temp_dir.path().join("trellis.toml");
    fs::write(&input, DIAGRAM).unwrap();
    fs::write(
        &config,
        "[xpdl]\nvendor = \"Integration\"\ncreated = \"2026-10-17T00:00:00Z\"\n",
    )
    .unwrap();

    let status = trellis()
        .arg("--config")
        .arg(&config)
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .expect("Failed to execute command");
    assert!(status.success());

    let xml = fs::read_to_string(&output).unwrap();
    let package = trellis_xpdl::read_package(&xml).unwrap();
    assert_eq!(package.id, "oryx-canvas");
    assert_eq!(package.name.as_deref(), Some("Claims"));
    assert_eq!(package.vendor.as_deref(), Some("Integration"));
    assert_eq!(package.created.as_deref(), Some("2026-10-17T00:00:00Z"));

    assert_eq!(package.associations.len(), 1);
    let assoc = &package.associations[0];
    assert_eq!(assoc.direction.as_deref(), Some("Both"));
    assert_eq!(assoc.source.as_deref(), Some("task-1"));
    assert_eq!(assoc.target.as_deref(), Some("note-1"));
    assert_eq!(assoc.waypoints.len(), 2);

    assert_eq!(package.activities.len(), 1);
    let mi = package.activities[0].multi_instance.as_ref().unwrap();
    assert_eq!(mi.loop_counter.as_deref(), Some("i"));
}

#[test]
fn test_inspect_prints_summary() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("diagram.json");
    fs::write(&input, DIAGRAM).unwrap();

    let output = trellis()
        .current_dir(temp_dir.path())
        .arg("inspect")
        .arg(&input)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Shapes: 4"));
    assert!(stdout.contains("Edges: 2"));
    assert!(stdout.contains("task-1 [Task] \"Review\" 100x80"));
}

#[test]
fn test_convert_reports_dangling_reference() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("broken.json");
    fs::write(
        &input,
        r#"{ "resourceId": "c", "childShapes": [ { "resourceId": "a", "outgoing": [ { "resourceId": "zz" } ] } ] }"#,
    )
    .unwrap();

    let output = trellis()
        .current_dir(temp_dir.path())
        .arg("convert")
        .arg(&input)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("zz"));
}
