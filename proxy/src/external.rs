use crate::auth::{auth_from_config, AuthInjector};
use crate::client::{create_function_endpoint, make_http_client, parse_base_url, TransportConfig};
use crate::labels::resolve_scaling;
use crate::query::ServiceQuery;
use crate::utils::{FUNCTION_PATH, NAMESPACE_KEY, SCALE_PATH, USAGE_KEY};
use async_trait::async_trait;
use config::gateway_config::GatewayConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, StatusCode, Url};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};
use utility::faas_provider::types::{FunctionStatus, ScaleServiceRequest};
use utility::scaling::{ScalingDefaults, ServiceQueryResponse};
use utility::{Error, Result};

/// ExternalServiceQuery queries and scales functions through the provider's HTTP API.
/// One request per call, nothing is retried or cached.
#[derive(Clone)]
pub struct ExternalServiceQuery {
    url: Url,
    proxy_client: reqwest::Client,
    auth_injector: Option<Arc<dyn AuthInjector>>,
    /// include usage metrics in the response
    include_usage: bool,
    defaults: ScalingDefaults,
    request_timeout: Option<Duration>,
}

impl ExternalServiceQuery {
    pub fn new(
        external_url: &str,
        auth_injector: Option<Arc<dyn AuthInjector>>,
    ) -> Result<ExternalServiceQuery> {
        Self::with_transport(external_url, auth_injector, &TransportConfig::default())
    }

    pub fn with_transport(
        external_url: &str,
        auth_injector: Option<Arc<dyn AuthInjector>>,
        transport: &TransportConfig,
    ) -> Result<ExternalServiceQuery> {
        Ok(ExternalServiceQuery {
            url: parse_base_url(external_url)?,
            proxy_client: make_http_client(transport)?,
            auth_injector,
            include_usage: false,
            defaults: ScalingDefaults::default(),
            request_timeout: None,
        })
    }

    /// from_config wires url, auth, defaults and timeout from a GatewayConfig
    pub fn from_config(config: &GatewayConfig) -> Result<ExternalServiceQuery> {
        config.validate()?;
        let query = Self::new(&config.functions_provider_url, auth_from_config(config)?)?
            .include_usage(config.include_usage)
            .scaling_defaults(config.scaling)
            .request_timeout(config.request_timeout()?);
        Ok(query)
    }

    pub fn include_usage(mut self, include_usage: bool) -> Self {
        self.include_usage = include_usage;
        self
    }

    pub fn scaling_defaults(mut self, defaults: ScalingDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// overall deadline applied by the ServiceQuery methods
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// get_replicas_before is get_replicas bounded by `deadline`
    pub async fn get_replicas_before(
        &self,
        service_name: &str,
        service_namespace: &str,
        deadline: Instant,
    ) -> Result<ServiceQueryResponse> {
        with_deadline(
            service_name,
            deadline,
            self.fetch_replicas(service_name, service_namespace),
        )
        .await
    }

    /// set_replicas_before is set_replicas bounded by `deadline`
    pub async fn set_replicas_before(
        &self,
        service_name: &str,
        service_namespace: &str,
        count: u64,
        deadline: Instant,
    ) -> Result<()> {
        with_deadline(
            service_name,
            deadline,
            self.scale(service_name, service_namespace, count),
        )
        .await
    }

    fn authorize(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.auth_injector {
            Some(auth) => auth.inject(req),
            None => Ok(req),
        }
    }

    async fn fetch_replicas(
        &self,
        service_name: &str,
        service_namespace: &str,
    ) -> Result<ServiceQueryResponse> {
        let start = Instant::now();
        let usage = if self.include_usage { "true" } else { "false" };
        let url = create_function_endpoint(
            &self.url,
            FUNCTION_PATH,
            service_name,
            &[(NAMESPACE_KEY, service_namespace), (USAGE_KEY, usage)],
        )?;

        let req = self.authorize(self.proxy_client.get(url.clone()))?;
        let res = req.send().await.map_err(|e| {
            warn!(url = %url, error = %e, "GetReplicas request failed");
            e
        })?;

        let status = res.status();
        if status != StatusCode::OK {
            // best effort, a body that can't be read is reported as empty
            let body = res.text().await.unwrap_or_default();
            warn!(
                function = service_name,
                namespace = service_namespace,
                status = status.as_u16(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "GetReplicas returned unexpected status"
            );
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                function: service_name.into(),
                body,
            });
        }

        let body = res.text().await.map_err(|e| {
            warn!(url = %url, error = %e, "GetReplicas failed reading response body");
            e
        })?;

        let function: FunctionStatus = match serde_json::from_str(&body) {
            Ok(function) => function,
            Err(source) => {
                warn!(body = %body, error = %source, "unable to unmarshal function status");
                return Err(Error::Decode { body, source });
            }
        };

        let scaling = resolve_scaling(function.labels.as_ref(), &self.defaults).map_err(|e| {
            warn!(
                function = service_name,
                namespace = service_namespace,
                error = %e,
                "GetReplicas rejected scaling labels"
            );
            e
        })?;

        debug!(
            function = service_name,
            namespace = service_namespace,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "GetReplicas"
        );

        Ok(ServiceQueryResponse {
            replicas: function.replicas,
            max_replicas: scaling.max_replicas,
            min_replicas: scaling.min_replicas,
            scaling_factor: scaling.scaling_factor,
            available_replicas: function.available_replicas,
            annotations: function.annotations,
        })
    }

    async fn scale(&self, service_name: &str, service_namespace: &str, count: u64) -> Result<()> {
        let scale_req = ScaleServiceRequest {
            service_name,
            replicas: count,
        };
        let body = serde_json::to_string(&scale_req).map_err(Error::Encode)?;

        let start = Instant::now();
        let url = create_function_endpoint(
            &self.url,
            SCALE_PATH,
            service_name,
            &[(NAMESPACE_KEY, service_namespace)],
        )?;

        let req = self.authorize(
            self.proxy_client
                .post(url.clone())
                .header(CONTENT_TYPE, "application/json")
                .body(body),
        )?;

        let result = match req.send().await {
            Ok(res) => match res.status() {
                StatusCode::OK | StatusCode::ACCEPTED => Ok(()),
                status => Err(Error::ScaleStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                }),
            },
            Err(e) => {
                warn!(url = %url, error = %e, "SetReplicas request failed");
                Err(Error::from(e))
            }
        };

        info!(
            function = service_name,
            namespace = service_namespace,
            replicas = count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "SetReplicas"
        );
        result
    }
}

async fn with_deadline<T, F>(service_name: &str, deadline: Instant, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout_at(deadline, fut).await {
        Ok(res) => res,
        Err(_) => {
            warn!(function = service_name, "deadline exceeded");
            Err(Error::DeadlineExceeded {
                function: service_name.into(),
            })
        }
    }
}

#[async_trait]
impl ServiceQuery for ExternalServiceQuery {
    async fn get_replicas(
        &self,
        service_name: &str,
        service_namespace: &str,
    ) -> Result<ServiceQueryResponse> {
        match self.request_timeout {
            Some(timeout) => {
                self.get_replicas_before(service_name, service_namespace, Instant::now() + timeout)
                    .await
            }
            None => self.fetch_replicas(service_name, service_namespace).await,
        }
    }

    async fn set_replicas(
        &self,
        service_name: &str,
        service_namespace: &str,
        count: u64,
    ) -> Result<()> {
        match self.request_timeout {
            Some(timeout) => {
                self.set_replicas_before(
                    service_name,
                    service_namespace,
                    count,
                    Instant::now() + timeout,
                )
                .await
            }
            None => self.scale(service_name, service_namespace, count).await,
        }
    }
}
