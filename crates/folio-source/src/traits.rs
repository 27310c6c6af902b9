use crate::{
    dto::{SpotRequest, SpotRow},
    error::SourceError,
};

#[async_trait::async_trait]
pub trait SpotSource: Send + Sync {
    /// Returns every sampled spot of `request.address` over `request.interval`.
    async fn fetch_spots(&self, request: &SpotRequest) -> Result<Vec<SpotRow>, SourceError>;
}
