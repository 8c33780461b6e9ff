//! Conversions from external infrastructure errors into domain errors.

use graphfeed_domain::GraphFeedError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub GraphFeedError);

impl From<InfraError> for GraphFeedError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<GraphFeedError> for InfraError {
    fn from(value: GraphFeedError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoGraphFeedError {
    fn into_graphfeed(self) -> GraphFeedError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → GraphFeedError */
/* -------------------------------------------------------------------------- */

impl IntoGraphFeedError for HttpError {
    fn into_graphfeed(self) -> GraphFeedError {
        if self.is_timeout() {
            return GraphFeedError::Network(format!("request timed out: {self}"));
        }
        if self.is_connect() {
            return GraphFeedError::Network(format!("connection failed: {self}"));
        }
        match self.status() {
            Some(status) if status.as_u16() == 401 || status.as_u16() == 403 => {
                GraphFeedError::Auth(format!("endpoint rejected credentials ({status})"))
            }
            Some(status) => GraphFeedError::Network(format!("http status {status}: {self}")),
            None => GraphFeedError::Network(self.to_string()),
        }
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_graphfeed())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → GraphFeedError */
/* -------------------------------------------------------------------------- */

impl IntoGraphFeedError for url::ParseError {
    fn into_graphfeed(self) -> GraphFeedError {
        GraphFeedError::InvalidInput(format!("invalid URL: {self}"))
    }
}

impl From<url::ParseError> for InfraError {
    fn from(value: url::ParseError) -> Self {
        InfraError(value.into_graphfeed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_parse_errors_become_invalid_input() {
        let parse_err = url::Url::parse("::not-a-url::").expect_err("must fail");
        let err: GraphFeedError = InfraError::from(parse_err).into();
        assert!(matches!(err, GraphFeedError::InvalidInput(_)));
    }
}
