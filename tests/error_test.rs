use corenlp_client::{CoreNlpError, Result};

#[test]
fn test_error_display() {
    let err = CoreNlpError::Configuration("either url or local_dir must be set".to_string());
    assert!(err.to_string().contains("local_dir"));

    let err = CoreNlpError::Api {
        status: 500,
        message: "boom".into(),
    };
    assert_eq!(err.to_string(), "server error (500): boom");
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(CoreNlpError::ResponseFormat("not an object".into()))
    }
    assert!(returns_error().is_err());
}

#[test]
fn transport_errors() {
    assert!(CoreNlpError::Http("connection refused".into()).is_transport());
    assert!(
        CoreNlpError::Api {
            status: 404,
            message: "not found".into()
        }
        .is_transport()
    );
}

#[test]
fn non_transport_errors() {
    assert!(!CoreNlpError::Configuration("x".into()).is_transport());
    assert!(!CoreNlpError::Environment("x".into()).is_transport());
    assert!(!CoreNlpError::ResponseFormat("x".into()).is_transport());
}

#[test]
fn construction_errors() {
    assert!(CoreNlpError::Configuration("x".into()).is_construction());
    assert!(CoreNlpError::Environment("x".into()).is_construction());
    assert!(!CoreNlpError::Http("x".into()).is_construction());
    assert!(!CoreNlpError::ResponseFormat("x".into()).is_construction());
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "tmp");
    let err: CoreNlpError = io.into();
    assert!(matches!(err, CoreNlpError::Io(_)));
}
