use mockito::{Matcher, Server};
use proxy::auth::BasicAuth;
use proxy::{ExternalServiceQuery, ServiceQuery};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use utility::Error;

const FUNCTION: &str = "echo";
const NAMESPACE: &str = "openfaas-fn";

fn namespace_query() -> Matcher {
    Matcher::UrlEncoded("namespace".into(), NAMESPACE.into())
}

#[tokio::test]
async fn test_set_replicas_accepted() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/system/scale-function/echo")
        .match_query(namespace_query())
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"serviceName": "echo", "replicas": 5})))
        .with_status(202)
        .create_async()
        .await;

    let query = ExternalServiceQuery::new(&server.url(), None).unwrap();
    let res = query.set_replicas(FUNCTION, NAMESPACE, 5).await;

    assert!(res.is_ok(), "{:?}", res);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_set_replicas_body_carries_count() {
    for count in &[0u64, 1, 7, 1000] {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/system/scale-function/echo")
            .match_query(namespace_query())
            .match_body(Matcher::Json(
                json!({"serviceName": FUNCTION, "replicas": count}),
            ))
            .with_status(200)
            .create_async()
            .await;

        let query = ExternalServiceQuery::new(&server.url(), None).unwrap();
        assert!(query.set_replicas(FUNCTION, NAMESPACE, *count).await.is_ok());
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_set_replicas_not2xx() {
    struct TestCase {
        status: usize,
        expected_ok: bool,
    }
    let cases = vec![
        TestCase {
            status: 200,
            expected_ok: true,
        },
        TestCase {
            status: 202,
            expected_ok: true,
        },
        TestCase {
            status: 201,
            expected_ok: false,
        },
        TestCase {
            status: 204,
            expected_ok: false,
        },
        TestCase {
            status: 401,
            expected_ok: false,
        },
        TestCase {
            status: 404,
            expected_ok: false,
        },
        TestCase {
            status: 500,
            expected_ok: false,
        },
    ];

    for case in cases {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/system/scale-function/echo")
            .match_query(namespace_query())
            .with_status(case.status)
            .with_body("ignored")
            .create_async()
            .await;

        let query = ExternalServiceQuery::new(&server.url(), None).unwrap();
        let res = query.set_replicas(FUNCTION, NAMESPACE, 2).await;

        if case.expected_ok {
            assert!(res.is_ok(), "{}: {:?}", case.status, res);
            continue;
        }
        match res {
            Err(Error::ScaleStatus { status, url }) => {
                assert_eq!(status as usize, case.status);
                assert!(url.ends_with("/system/scale-function/echo?namespace=openfaas-fn"));
            }
            other => panic!("{}: unexpected result {:?}", case.status, other),
        }
    }
}

#[tokio::test]
async fn test_set_replicas_with_basic_auth() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/system/scale-function/echo")
        .match_query(namespace_query())
        .match_header("authorization", "Basic YWRtaW46c2VjcmV0")
        .with_status(200)
        .create_async()
        .await;

    let auth = BasicAuth::new("admin", "secret");
    let query = ExternalServiceQuery::new(&server.url(), Some(Arc::new(auth))).unwrap();
    assert!(query.set_replicas(FUNCTION, NAMESPACE, 1).await.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_set_replicas_transport_error() {
    let query = ExternalServiceQuery::new("http://127.0.0.1:1/", None).unwrap();
    let res = query.set_replicas(FUNCTION, NAMESPACE, 3).await;
    assert!(matches!(res, Err(Error::Reqwest(_))));
}

#[tokio::test]
async fn test_set_replicas_deadline() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());

    let query = ExternalServiceQuery::new(&url, None).unwrap();
    let deadline = tokio::time::Instant::now() + Duration::from_millis(200);
    let res = query
        .set_replicas_before(FUNCTION, NAMESPACE, 3, deadline)
        .await;
    assert!(matches!(res, Err(Error::DeadlineExceeded { .. })));
    drop(listener);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r"^/system/scale-function/fn-\d$".into()))
        .match_query(namespace_query())
        .with_status(202)
        .expect(4)
        .create_async()
        .await;

    let query = Arc::new(ExternalServiceQuery::new(&server.url(), None).unwrap());
    let mut handles = Vec::new();
    for i in 0..4 {
        let query = query.clone();
        handles.push(tokio::spawn(async move {
            let name = format!("fn-{}", i);
            query.set_replicas(&name, NAMESPACE, i).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    mock.assert_async().await;
}
