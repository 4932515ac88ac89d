#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User started a catalog search (empty query = no filter).
    SearchSubmitted { query: String },
    /// User asked for another page of the current result set.
    /// Kept wide on purpose: callback payloads arrive as arbitrary integers.
    PageRequested { page: i64 },
    /// Catalog fetch finished. `None` marks an unrecoverable fetch for
    /// that request; the request id ties the outcome to its fetch effect.
    FetchCompleted {
        request_id: crate::RequestId,
        result: Option<crate::PageResult>,
    },
    /// User left the browsing flow.
    ExitRequested,
}
