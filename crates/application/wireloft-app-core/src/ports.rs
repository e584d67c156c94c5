use wireloft_core::CreateShowRequest;
use wireloft_infra::{ApiError, WireloftApi};

/// Collaborator that accepts a finished Add-Show request.
#[async_trait::async_trait]
pub trait ShowCreator: Send + Sync + 'static {
    async fn create_show(&self, request: &CreateShowRequest) -> Result<(), ApiError>;
}

#[async_trait::async_trait]
impl<T: WireloftApi + ?Sized> ShowCreator for T {
    async fn create_show(&self, request: &CreateShowRequest) -> Result<(), ApiError> {
        WireloftApi::create_show(self, request).await
    }
}
