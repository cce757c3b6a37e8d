use std::fs;
use std::io::Read;

use crate::error::PipelineError;
use crate::io::{resolve_location, to_url};

#[test]
fn dash_is_stdin() {
    let inputs = resolve_location("-").unwrap();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].id(), "-");
}

#[test]
fn plain_http_is_rejected() {
    let err = resolve_location("http://example.com/app.yaml").err().unwrap();
    assert!(matches!(err, PipelineError::InputAcquisition { .. }));
    assert_eq!(
        err.to_string(),
        "http://example.com/app.yaml: only HTTPS URLs are allowed"
    );
}

#[cfg(feature = "https")]
#[test]
fn https_is_resolved_without_fetching() {
    let inputs = resolve_location("https://example.invalid/app.yaml").unwrap();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].id(), "https://example.invalid/app.yaml");
}

#[test]
fn urls_need_a_host() {
    assert!(to_url("https://example.com/a.yaml").is_some());
    assert!(to_url("manifests/app.yaml").is_none());
    assert!(to_url("/abs/path.yaml").is_none());
}

#[test]
fn single_file_is_one_stream() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pod.yaml");
    fs::write(&path, "kind: Pod\n").unwrap();

    let inputs = resolve_location(path.to_str().unwrap()).unwrap();
    assert_eq!(inputs.len(), 1);

    let mut text = String::new();
    inputs[0].open().unwrap().read_to_string(&mut text).unwrap();
    assert_eq!(text, "kind: Pod\n");
}

#[test]
fn directories_are_walked_recursively_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("b/nested")).unwrap();
    fs::write(dir.path().join("c.yaml"), "kind: C\n").unwrap();
    fs::write(dir.path().join("a.yaml"), "kind: A\n").unwrap();
    fs::write(dir.path().join("b/nested/x.yaml"), "kind: X\n").unwrap();
    fs::write(dir.path().join("b/first.json"), "{}\n").unwrap();

    let inputs = resolve_location(dir.path().to_str().unwrap()).unwrap();
    let names: Vec<String> = inputs
        .iter()
        .map(|input| {
            let path = std::path::Path::new(input.id());
            path.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/")
        })
        .collect();
    assert_eq!(names, vec!["a.yaml", "b/first.json", "b/nested/x.yaml", "c.yaml"]);
}

#[test]
fn empty_directory_yields_no_streams() {
    let dir = tempfile::tempdir().unwrap();
    assert!(resolve_location(dir.path().to_str().unwrap()).unwrap().is_empty());
}

#[test]
fn missing_path_fails() {
    let err = resolve_location("/nonexistent/docstream/path").err().unwrap();
    assert!(matches!(err, PipelineError::InputAcquisition { .. }));
    assert!(err.to_string().starts_with("/nonexistent/docstream/path: "));
}
