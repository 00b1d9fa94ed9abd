//! SsmStore against a mocked SSM client
//!
//! Each test installs canned SDK responses and checks how they surface
//! through the `ParameterStore` port.

use aws_sdk_ssm::Client;
use aws_sdk_ssm::operation::delete_parameters::DeleteParametersOutput;
use aws_sdk_ssm::operation::get_parameter::{GetParameterError, GetParameterOutput};
use aws_sdk_ssm::operation::get_parameters_by_path::{
    GetParametersByPathError, GetParametersByPathOutput,
};
use aws_sdk_ssm::operation::put_parameter::{PutParameterError, PutParameterOutput};
use aws_sdk_ssm::types::error::{
    InvalidKeyId, InvalidNextToken, ParameterAlreadyExists, ParameterNotFound,
};
use aws_sdk_ssm::types::{Parameter as SdkParameter, ParameterType as SdkParameterType};
use aws_smithy_mocks::{mock, mock_client};
use pretty_assertions::assert_eq;
use pstore_aws::SsmStore;
use pstore_core::{
    DeleteOutcome, ParameterStore, ParameterType, PathQuery, PutParameter, StorageClass,
    StoreError,
};

fn put_request(overwrite: bool) -> PutParameter {
    PutParameter {
        name: "/app/a".into(),
        value: "1".into(),
        storage: StorageClass::Plain,
        overwrite,
    }
}

#[test]
fn test_missing_parameter_maps_to_not_found() {
    let rule = mock!(Client::get_parameter)
        .match_requests(|req| req.name() == Some("/app/missing"))
        .then_error(|| GetParameterError::ParameterNotFound(ParameterNotFound::builder().build()));
    let store = SsmStore::from_client(mock_client!(aws_sdk_ssm, [&rule])).unwrap();

    let err = store.get_parameter("/app/missing", true).unwrap_err();

    assert_eq!(
        err,
        StoreError::ParameterNotFound {
            name: "/app/missing".into()
        }
    );
}

#[test]
fn test_other_read_errors_map_to_remote() {
    let rule = mock!(Client::get_parameter).then_error(|| {
        GetParameterError::InvalidKeyId(InvalidKeyId::builder().message("bad key").build())
    });
    let store = SsmStore::from_client(mock_client!(aws_sdk_ssm, [&rule])).unwrap();

    let err = store.get_parameter("/app/a", true).unwrap_err();

    match err {
        StoreError::Remote { operation, message } => {
            assert_eq!(operation, "GetParameter");
            assert!(message.contains("InvalidKeyId"), "got: {}", message);
        }
        other => panic!("expected a remote error, got {:?}", other),
    }
}

#[test]
fn test_parameter_is_read_with_its_type() {
    let rule = mock!(Client::get_parameter)
        .match_requests(|req| req.with_decryption() == Some(true))
        .then_output(|| {
            GetParameterOutput::builder()
                .parameter(
                    SdkParameter::builder()
                        .name("/app/secret")
                        .value("s3cr3t")
                        .r#type(SdkParameterType::SecureString)
                        .version(3)
                        .build(),
                )
                .build()
        });
    let store = SsmStore::from_client(mock_client!(aws_sdk_ssm, [&rule])).unwrap();

    let parameter = store.get_parameter("/app/secret", true).unwrap();

    assert_eq!(parameter.value, "s3cr3t");
    assert_eq!(parameter.parameter_type, ParameterType::SecureString);
    assert_eq!(parameter.version, 3);
}

#[test]
fn test_existing_parameter_maps_to_already_exists() {
    let rule = mock!(Client::put_parameter)
        .match_requests(|req| req.overwrite() == Some(false))
        .then_error(|| {
            PutParameterError::ParameterAlreadyExists(ParameterAlreadyExists::builder().build())
        });
    let store = SsmStore::from_client(mock_client!(aws_sdk_ssm, [&rule])).unwrap();

    let err = store.put_parameter(&put_request(false)).unwrap_err();

    assert_eq!(
        err,
        StoreError::AlreadyExists {
            name: "/app/a".into()
        }
    );
}

#[test]
fn test_put_sends_storage_class_and_returns_version() {
    let rule = mock!(Client::put_parameter)
        .match_requests(|req| {
            req.r#type() == Some(&SdkParameterType::SecureString)
                && req.key_id() == Some("alias/app")
                && req.overwrite() == Some(true)
        })
        .then_output(|| PutParameterOutput::builder().version(7).build());
    let store = SsmStore::from_client(mock_client!(aws_sdk_ssm, [&rule])).unwrap();
    let request = PutParameter {
        storage: StorageClass::EncryptedWithKey("alias/app".into()),
        ..put_request(true)
    };

    assert_eq!(store.put_parameter(&request).unwrap(), 7);
}

#[test]
fn test_path_listing_passes_token_and_returns_next() {
    let rule = mock!(Client::get_parameters_by_path)
        .match_requests(|req| {
            req.path() == Some("/app")
                && req.next_token() == Some("page-2")
                && req.max_results() == Some(5)
        })
        .then_output(|| {
            GetParametersByPathOutput::builder()
                .parameters(
                    SdkParameter::builder()
                        .name("/app/hosts")
                        .value("a,b")
                        .r#type(SdkParameterType::StringList)
                        .version(1)
                        .build(),
                )
                .next_token("page-3")
                .build()
        });
    let store = SsmStore::from_client(mock_client!(aws_sdk_ssm, [&rule])).unwrap();

    let page = store
        .get_parameters_by_path(&PathQuery {
            path: "/app".into(),
            recursive: true,
            decrypt: true,
            page_size: Some(5),
            next_token: Some("page-2".into()),
        })
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].parameter_type, ParameterType::StringList);
    assert_eq!(page.next_token.as_deref(), Some("page-3"));
}

#[test]
fn test_listing_errors_map_to_remote() {
    let rule = mock!(Client::get_parameters_by_path).then_error(|| {
        GetParametersByPathError::InvalidNextToken(InvalidNextToken::builder().build())
    });
    let store = SsmStore::from_client(mock_client!(aws_sdk_ssm, [&rule])).unwrap();
    let query = PathQuery {
        path: "/app".into(),
        recursive: true,
        decrypt: true,
        page_size: None,
        next_token: Some("stale".into()),
    };

    let err = store.get_parameters_by_path(&query).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Remote {
            operation: "GetParametersByPath",
            ..
        }
    ));
}

#[test]
fn test_delete_splits_deleted_and_invalid() {
    let rule = mock!(Client::delete_parameters).then_output(|| {
        DeleteParametersOutput::builder()
            .deleted_parameters("/app/a")
            .deleted_parameters("/app/b")
            .invalid_parameters("/app/ghost")
            .build()
    });
    let store = SsmStore::from_client(mock_client!(aws_sdk_ssm, [&rule])).unwrap();
    let names = vec!["/app/a".to_string(), "/app/b".into(), "/app/ghost".into()];

    let outcome = store.delete_parameters(&names).unwrap();

    assert_eq!(
        outcome,
        DeleteOutcome {
            deleted: vec!["/app/a".into(), "/app/b".into()],
            invalid: vec!["/app/ghost".into()],
        }
    );
}
