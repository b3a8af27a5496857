#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the query field.
    InputChanged,
    /// User pressed submit with the current field contents (untrimmed).
    Submit { query: String, email: String },
    /// The transport settled the in-flight query.
    ResponseArrived(QueryOutcome),
}

/// How an in-flight query settled, as seen by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Backend answered `success: true` with this recommendation text.
    Recommendation(String),
    /// Backend answered but reported failure.
    Rejected,
    /// Network failure or unreadable response body.
    TransportFailed(String),
}
