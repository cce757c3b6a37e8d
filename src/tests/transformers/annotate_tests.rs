use serde_yaml::Value;

use crate::config::TransformConfig;
use crate::transform::Transformer;
use crate::transformers::{
    Annotate, AnnotateMode, AnnotationOutcome, AnnotationReport, Builtin, Identity,
};

const POD: &str = "kind: Pod\nmetadata:\n  name: web\n";

fn annotations(document: &[u8]) -> Value {
    let value: Value = serde_yaml::from_slice(document).unwrap();
    value["metadata"]["annotations"].clone()
}

fn render<T: Transformer>(transformer: &T, reports: &[T::Report]) -> String {
    let mut out = Vec::new();
    transformer.generate_report(reports, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn identity_returns_input_unchanged() {
    let result = Identity.transform(b"kind: Pod\n# keep me\n");
    assert_eq!(result.result.unwrap(), b"kind: Pod\n# keep me\n");
    assert!(result.reports.is_empty());
}

#[test]
fn add_creates_missing_annotations() {
    let annotate = Annotate::add("example.com/owner", "platform");
    let result = annotate.transform(POD.as_bytes());

    let document = result.result.unwrap();
    assert_eq!(annotations(&document)["example.com/owner"], "platform");
    assert_eq!(result.reports, vec![AnnotationReport {
        kind: "Pod".into(),
        name: "web".into(),
        outcome: AnnotationOutcome::Annotated,
    }]);
}

#[test]
fn add_keeps_existing_annotations() {
    let doc = "kind: Pod\nmetadata:\n  name: web\n  annotations:\n    other: x\n";
    let result = Annotate::add("owner", "me").transform(doc.as_bytes());
    let found = annotations(&result.result.unwrap());
    assert_eq!(found["other"], "x");
    assert_eq!(found["owner"], "me");
}

#[test]
fn add_is_unchanged_when_value_matches() {
    let doc = "kind: Pod\nmetadata:\n  name: web\n  annotations:\n    owner: me\n";
    let result = Annotate::add("owner", "me").transform(doc.as_bytes());
    assert_eq!(result.reports[0].outcome, AnnotationOutcome::Unchanged);
    // untouched documents keep their original bytes
    assert_eq!(result.result.unwrap(), doc.as_bytes());
}

#[test]
fn remove_deletes_the_key() {
    let doc = "kind: Pod\nmetadata:\n  name: web\n  annotations:\n    owner: me\n    other: x\n";
    let annotate = Annotate::remove("owner");
    assert_eq!(annotate.mode(), AnnotateMode::Remove);

    let result = annotate.transform(doc.as_bytes());
    assert_eq!(result.reports[0].outcome, AnnotationOutcome::Unannotated);
    let found = annotations(&result.result.unwrap());
    assert!(found.get("owner").is_none());
    assert_eq!(found["other"], "x");
}

#[test]
fn remove_without_annotations_is_unchanged() {
    let result = Annotate::remove("owner").transform(POD.as_bytes());
    assert_eq!(result.reports[0].outcome, AnnotationOutcome::Unchanged);
    assert_eq!(result.result.unwrap(), POD.as_bytes());
}

#[test]
fn non_mapping_documents_are_skipped() {
    let annotate = Annotate::add("owner", "me");
    for doc in ["- a\n- b\n", "just text\n", "# comment only\n"] {
        let result = annotate.transform(doc.as_bytes());
        assert_eq!(result.reports[0].outcome, AnnotationOutcome::Skipped);
        assert_eq!(result.result.unwrap(), doc.as_bytes());
    }
}

#[test]
fn scalar_metadata_is_skipped() {
    let doc = "kind: Pod\nmetadata: oops\n";
    let result = Annotate::add("owner", "me").transform(doc.as_bytes());
    assert_eq!(result.reports[0].outcome, AnnotationOutcome::Skipped);
}

#[test]
fn unparsable_documents_fail_without_reports() {
    let result = Annotate::add("owner", "me").transform(b"kind: [broken\n");
    assert!(result.result.is_err());
    assert!(result.reports.is_empty());
}

#[test]
fn report_lines() {
    let annotate = Annotate::add("owner", "me");
    let reports = vec![
        AnnotationReport {
            kind: "Deployment".into(),
            name: "web".into(),
            outcome: AnnotationOutcome::Annotated,
        },
        AnnotationReport {
            kind: String::new(),
            name: String::new(),
            outcome: AnnotationOutcome::Skipped,
        },
    ];
    assert_eq!(
        render(&annotate, &reports),
        "deployment/web annotated\n<unknown>/<unnamed> skipped\n"
    );
}

#[test]
fn builtin_follows_config() {
    let identity = Builtin::from(&TransformConfig::Identity);
    let result = identity.transform(POD.as_bytes());
    assert_eq!(result.result.unwrap(), POD.as_bytes());
    assert!(result.reports.is_empty());

    let remove = Builtin::from(&TransformConfig::Annotate {
        key: "owner".into(),
        value: "ignored".into(),
        remove: true,
    });
    assert!(matches!(remove, Builtin::Annotate(ref a) if a.mode() == AnnotateMode::Remove));

    let add = Builtin::from(&TransformConfig::Annotate {
        key: "owner".into(),
        value: "me".into(),
        remove: false,
    });
    let result = add.transform(POD.as_bytes());
    assert_eq!(annotations(&result.result.unwrap())["owner"], "me");
    assert_eq!(render(&add, &result.reports), "pod/web annotated\n");
}
