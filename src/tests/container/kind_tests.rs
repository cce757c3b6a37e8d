use crate::container::{DocumentKind, kind_of};
use crate::error::PipelineError;

#[test]
fn reads_kind_from_yaml_and_json() {
    assert_eq!(
        kind_of(b"kind: Pod\nmetadata:\n  name: a\n").unwrap(),
        DocumentKind::Resource("Pod".into())
    );
    assert_eq!(
        kind_of(b"{\"apiVersion\":\"v1\",\"kind\":\"List\",\"items\":[]}\n").unwrap(),
        DocumentKind::List
    );
}

#[test]
fn list_detection_is_exact() {
    assert!(kind_of(b"kind: List\n").unwrap().is_list());
    assert!(!kind_of(b"kind: PodList\n").unwrap().is_list());
    assert!(!kind_of(b"kind: list\n").unwrap().is_list());
}

#[test]
fn missing_kind_is_an_unnamed_resource() {
    assert_eq!(
        kind_of(b"metadata:\n  name: a\n").unwrap(),
        DocumentKind::Resource(String::new())
    );
    assert_eq!(
        kind_of(b"# only a comment\n").unwrap(),
        DocumentKind::Resource(String::new())
    );
}

#[test]
fn other_fields_are_not_validated() {
    let doc = b"kind: Deployment\nspec:\n  replicas: [not, a, number]\n  anything: {deep: {x: 1}}\n";
    assert_eq!(
        kind_of(doc).unwrap(),
        DocumentKind::Resource("Deployment".into())
    );
}

#[test]
fn non_mapping_documents_are_malformed() {
    let err = kind_of(b"just a scalar\n").unwrap_err();
    assert!(matches!(err, PipelineError::MalformedDocument(_)));

    let err = kind_of(b"kind: [unterminated\n").unwrap_err();
    assert!(matches!(err, PipelineError::MalformedDocument(_)));
}
