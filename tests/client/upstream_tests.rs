// tests/client/upstream_tests.rs

// 基于 wiremock 的传输层与端到端测试

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use oxide_cfdoh::client::config::HttpClientConfig;
    use oxide_cfdoh::client::context::QueryContext;
    use oxide_cfdoh::client::transport::{
        Headers, HttpTransport, QueryParams, ReqwestTransport, TransportResponse,
    };
    use oxide_cfdoh::client::{CloudflareClient, Provider};
    use oxide_cfdoh::common::consts::{CLOUDFLARE_UPSTREAM_URL, CONTENT_TYPE_DNS_JSON};
    use oxide_cfdoh::common::error::{DohError, Result};

    const NOERROR_BODY: &str = r#"{"Status":0,"TC":false,"RD":true,"RA":true,"AD":false,"CD":false,"Question":[{"name":"example.com.","type":28}],"Answer":[{"name":"example.com.","type":28,"TTL":120,"data":"2606:2800:220:1:248:1893:25c8:1946"}]}"#;

    const NXDOMAIN_BODY: &str = r#"{"Status":3,"TC":false,"RD":true,"RA":true,"AD":false,"CD":false,"Question":[{"name":"nope.example.","type":1}]}"#;

    // 将固定上游地址改写为 mock 服务器地址，并记录原始地址
    struct RedirectTransport {
        inner: ReqwestTransport,
        target: String,
        seen: Mutex<Vec<String>>,
    }

    impl RedirectTransport {
        fn new(target: String) -> Arc<Self> {
            let inner = ReqwestTransport::new(&HttpClientConfig::default()).unwrap();
            Arc::new(Self {
                inner,
                target,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl HttpTransport for RedirectTransport {
        async fn get(
            &self,
            url: &str,
            params: &QueryParams,
            ctx: &QueryContext,
            headers: &Headers,
        ) -> Result<Box<dyn TransportResponse>> {
            self.seen.lock().unwrap().push(url.to_string());
            self.inner.get(&self.target, params, ctx, headers).await
        }
    }

    fn dns_query_url(server: &MockServer) -> String {
        format!("{}/dns-query", server.uri())
    }

    fn json_response(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("content-type", CONTENT_TYPE_DNS_JSON)
            .set_body_string(body)
    }

    #[tokio::test]
    async fn test_reqwest_transport_sends_params_and_accept_header() {
        let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dns-query"))
            .and(query_param("name", "example.com"))
            .and(query_param("type", "AAAA"))
            .and(header("accept", CONTENT_TYPE_DNS_JSON))
            .respond_with(json_response(NOERROR_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(&HttpClientConfig::default()).unwrap();
        let mut params = QueryParams::new();
        params.insert("name".to_string(), "example.com".to_string());
        params.insert("type".to_string(), "AAAA".to_string());
        let mut headers = Headers::new();
        headers.insert("accept".to_string(), CONTENT_TYPE_DNS_JSON.to_string());

        let ctx = QueryContext::background();
        let mut rsp = transport
            .get(&dns_query_url(&server), &params, &ctx, &headers)
            .await
            .unwrap();
        let body = rsp.bytes().await.unwrap();
        assert_eq!(&body[..], NOERROR_BODY.as_bytes());

        // 响应体只能读取一次
        assert!(matches!(rsp.bytes().await, Err(DohError::Transport(_))));
    }

    #[tokio::test]
    async fn test_reqwest_transport_surfaces_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(&HttpClientConfig::default()).unwrap();
        let ctx = QueryContext::background();
        let result = transport
            .get(&dns_query_url(&server), &QueryParams::new(), &ctx, &Headers::new())
            .await;

        match result {
            Err(DohError::HttpStatus(code, reason)) => {
                assert_eq!(code, 503);
                assert_eq!(reason, "Service Unavailable");
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected HTTP status error"),
        }
    }

    #[tokio::test]
    async fn test_end_to_end_ecs_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dns-query"))
            .and(query_param("name", "example.com"))
            .and(query_param("type", "AAAA"))
            .and(query_param("edns_client_subnet", "203.0.113.0/24"))
            .respond_with(json_response(NOERROR_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let transport = RedirectTransport::new(dns_query_url(&server));
        let client = CloudflareClient::with_transport(transport.clone());

        let ctx = QueryContext::with_timeout(Duration::from_secs(10));
        let response = client
            .ecs_query(&ctx, " example.com ", "AAAA", "203.0.113.77/24")
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.answer[0].record_type, 28);
        assert_eq!(response.answer[0].ttl, 120);
        assert_eq!(transport.seen.lock().unwrap().as_slice(), [CLOUDFLARE_UPSTREAM_URL]);
    }

    #[tokio::test]
    async fn test_end_to_end_plain_query_has_no_ecs_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dns-query"))
            .respond_with(json_response(NOERROR_BODY))
            .mount(&server)
            .await;

        let client = CloudflareClient::with_transport(RedirectTransport::new(dns_query_url(&server)));
        let ctx = QueryContext::background();
        client.query(&ctx, "example.com", "AAAA").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let keys: Vec<String> = requests[0]
            .url
            .query_pairs()
            .map(|(k, _)| k.into_owned())
            .collect();
        assert_eq!(keys, ["name", "type"]);
    }

    #[tokio::test]
    async fn test_end_to_end_nxdomain_keeps_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(json_response(NXDOMAIN_BODY))
            .mount(&server)
            .await;

        let client = CloudflareClient::with_transport(RedirectTransport::new(dns_query_url(&server)));
        let ctx = QueryContext::background();
        let err = client.query(&ctx, "nope.example", "A").await.unwrap_err();

        assert_eq!(err.to_string(), "doh: failed response code 3");
        let response = err.into_partial_response().unwrap();
        assert_eq!(response.status, 3);
        assert_eq!(response.question[0].name, "nope.example.");
    }

    #[tokio::test]
    async fn test_end_to_end_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = CloudflareClient::with_transport(RedirectTransport::new(dns_query_url(&server)));
        let ctx = QueryContext::background();
        let err = client.query(&ctx, "example.com", "A").await.unwrap_err();
        assert!(matches!(err, DohError::Json(_)));
    }

    #[tokio::test]
    async fn test_end_to_end_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = CloudflareClient::with_transport(RedirectTransport::new(dns_query_url(&server)));
        let ctx = QueryContext::background();
        let err = client.query(&ctx, "example.com", "A").await.unwrap_err();
        assert!(matches!(err, DohError::HttpStatus(500, _)));
    }

    #[tokio::test]
    async fn test_end_to_end_deadline_exceeded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(json_response(NOERROR_BODY).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = CloudflareClient::with_transport(RedirectTransport::new(dns_query_url(&server)));
        let ctx = QueryContext::with_timeout(Duration::from_millis(200));

        let started = std::time::Instant::now();
        let err = client.query(&ctx, "example.com", "A").await.unwrap_err();

        assert!(matches!(err, DohError::Timeout(_)), "{}", err);
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
