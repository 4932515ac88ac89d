#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one catalog page. The caller must feed the outcome back as
    /// `Msg::FetchCompleted` carrying the same request id.
    FetchPage {
        request_id: crate::RequestId,
        query: String,
        page: u32,
    },
}
