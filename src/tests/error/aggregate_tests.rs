use std::io;

use crate::error::{AggregateError, ErrorPolicy, PipelineError, Stage, concat_errors};

#[test]
fn concat_does_not_prefix_first_message() {
    assert_eq!(concat_errors(&["a", "b", "c"], "\n"), "a\nb\nc");
    assert_eq!(concat_errors(&["only"], ", "), "only");
    assert_eq!(concat_errors::<&str>(&[], "\n"), "");
}

#[test]
fn aggregate_displays_joined_messages() {
    let agg = AggregateError::from(vec![
        PipelineError::Transform("cannot transform two".into()),
        PipelineError::UnsupportedFormat("xml".into()),
    ]);
    assert_eq!(agg.len(), 2);
    assert!(!agg.is_empty());
    assert_eq!(agg.to_string(), "cannot transform two\nunsupported format xml");
}

#[test]
fn single_wraps_one_error() {
    let agg: AggregateError = PipelineError::InvalidConfig("bad".into()).into();
    assert_eq!(agg.len(), 1);
    assert_eq!(agg.to_string(), "invalid configuration: bad");
}

#[test]
fn transform_errors_keep_the_transformer_message() {
    let err = PipelineError::Transform("cannot transform one".into());
    assert_eq!(err.to_string(), "cannot transform one");
}

#[test]
fn acquisition_errors_name_the_location() {
    let err = PipelineError::acquisition("http://example.com/a.yaml", "only HTTPS URLs are allowed");
    assert_eq!(
        err.to_string(),
        "http://example.com/a.yaml: only HTTPS URLs are allowed"
    );
    assert_eq!(err.stage(), Stage::Acquire);
}

#[test]
fn stages() {
    let read = PipelineError::from(io::Error::other("gone"));
    assert_eq!(read.stage(), Stage::Read);
    assert_eq!(
        PipelineError::MalformedDocument("x".into()).stage(),
        Stage::Decode
    );
    assert_eq!(
        PipelineError::OutputWrite(io::Error::other("closed")).stage(),
        Stage::Write
    );
    assert_eq!(Stage::Transform.to_string(), "Transform");
}

#[test]
fn yaml_errors_are_malformed_documents() {
    let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [b").unwrap_err();
    let err = PipelineError::from(yaml_err);
    assert!(matches!(err, PipelineError::MalformedDocument(_)));
}

#[test]
fn default_policy_is_fast_fail() {
    assert_eq!(ErrorPolicy::default(), ErrorPolicy::FastFail);
}
