use super::*;

#[test]
fn test_every_variant_carries_a_bracketed_code() {
    let io = || std::io::Error::new(std::io::ErrorKind::Other, "boom");
    let yaml = serde_yaml::from_str::<usize>("not a number").unwrap_err();
    let json = serde_json::from_str::<usize>("{").unwrap_err();

    let errors: Vec<CoreError> = vec![
        CoreError::NotInitialized,
        CoreError::MalformedCatalogEntry {
            path: "up.x.sql".to_string(),
            reason: "no timestamp".to_string(),
        },
        CoreError::Executor {
            script: "up.0.a.sql".to_string(),
            message: "no such file".to_string(),
        },
        CoreError::ExecutionFailed {
            script: "up.0.a.sql".to_string(),
            stderr: "ERROR".to_string(),
        },
        CoreError::UnresolvedDrift {
            path: "up.1.b.sql".to_string(),
        },
        CoreError::MigrationNotFound {
            id: "9".to_string(),
        },
        CoreError::AmbiguousMigration {
            id: "1".to_string(),
            count: 2,
        },
        CoreError::Io(io()),
        CoreError::IoWithPath {
            path: ".waypoint".to_string(),
            source: io(),
        },
        CoreError::YamlParse(yaml),
        CoreError::Json(json),
    ];

    for (i, error) in errors.iter().enumerate() {
        let expected = format!("[W{:03}]", i + 1);
        assert!(
            error.to_string().starts_with(&expected),
            "{} should start with {}",
            error,
            expected
        );
    }
}
