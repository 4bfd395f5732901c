use async_trait::async_trait;
use utility::scaling::ServiceQueryResponse;
use utility::Result;

///ServiceQuery is what the scaler needs from a functions provider
#[async_trait]
pub trait ServiceQuery: Send + Sync {
    ///current replicas of a function together with its scaling bounds
    async fn get_replicas(
        &self,
        service_name: &str,
        service_namespace: &str,
    ) -> Result<ServiceQueryResponse>;

    ///ask the provider to run `count` replicas of a function
    async fn set_replicas(
        &self,
        service_name: &str,
        service_namespace: &str,
        count: u64,
    ) -> Result<()>;
}
