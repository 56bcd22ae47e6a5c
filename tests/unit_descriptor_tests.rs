//! # Run Descriptor Unit Tests / 运行描述符单元测试

use script_runner::core::annotations::RawRunRecord;
use script_runner::core::descriptor::{RunDescriptor, is_truthy};
use script_runner::core::error::MetadataError;

fn record_with(pairs: &[(&str, &str)]) -> RawRunRecord {
    let mut record = RawRunRecord::new("run1", "TC_ACE_1_2.py");
    for (key, value) in pairs {
        record.insert(*key, *value);
    }
    record
}

#[test]
fn test_recognized_keys_map_to_fields() {
    let record = record_with(&[
        ("app", "out/app"),
        ("app-args", "--discriminator 1234"),
        ("script-args", "--storage-path admin_storage.json"),
        ("factoryreset", "True"),
    ]);

    let run = RunDescriptor::from_record(&record).unwrap();
    assert_eq!(
        run,
        RunDescriptor {
            script_path: "TC_ACE_1_2.py".to_string(),
            run_name: "run1".to_string(),
            app: Some("out/app".to_string()),
            app_args: Some("--discriminator 1234".to_string()),
            script_args: Some("--storage-path admin_storage.json".to_string()),
            factory_reset: true,
        }
    );
}

#[test]
fn test_only_implicit_keys_gives_defaults() {
    let run = RunDescriptor::from_record(&record_with(&[])).unwrap();

    assert_eq!(run.run_name, "run1");
    assert_eq!(run.script_path, "TC_ACE_1_2.py");
    assert!(run.app.is_none());
    assert!(run.app_args.is_none());
    assert!(run.script_args.is_none());
    assert!(!run.factory_reset);
}

#[test]
fn test_unrecognized_keys_are_dropped() {
    let record = record_with(&[("KVS", "kvs1"), ("discriminator", "1234"), ("app", "a")]);
    let run = RunDescriptor::from_record(&record).unwrap();

    assert_eq!(run.app.as_deref(), Some("a"));
    assert_eq!(run, RunDescriptor::from_record(&record_with(&[("app", "a")])).unwrap());
}

#[test]
fn test_factoryreset_false_is_false() {
    for value in ["False", "false", "0", "no", "", "maybe"] {
        let run = RunDescriptor::from_record(&record_with(&[("factoryreset", value)])).unwrap();
        assert!(!run.factory_reset, "'{value}' should not be truthy");
    }
}

#[test]
fn test_truthy_strings() {
    for value in ["True", "true", "TRUE", " 1 ", "yes", "Y", "on"] {
        assert!(is_truthy(value), "'{value}' should be truthy");
    }
    assert!(!is_truthy("False"));
    assert!(!is_truthy("off"));
}

#[test]
fn test_missing_implicit_key_is_error() {
    let record: RawRunRecord = [("app".to_string(), "a".to_string())].into_iter().collect();
    let err = RunDescriptor::from_record(&record).unwrap_err();

    assert!(matches!(err, MetadataError::MissingField { field: "run_name" }));
}

#[test]
fn test_descriptor_serializes_to_json() {
    let run = RunDescriptor::from_record(&record_with(&[("app", "a"), ("factoryreset", "1")])).unwrap();
    let json = serde_json::to_value(&run).unwrap();

    assert_eq!(json["run_name"], "run1");
    assert_eq!(json["app"], "a");
    assert_eq!(json["factory_reset"], true);
    assert!(json["script_args"].is_null());
}
