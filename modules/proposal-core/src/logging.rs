use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Targets logged even when `RUST_LOG` is unset. The client crates only
/// speak up on trouble, so they sit at `warn`.
const DEFAULT_DIRECTIVES: [&str; 3] = ["proposal=info", "ai_client=warn", "search_client=warn"];

/// `RUST_LOG` plus the default directives, shared by both binaries.
pub fn log_filter() -> Result<EnvFilter, ParseError> {
    DEFAULT_DIRECTIVES
        .iter()
        .try_fold(EnvFilter::from_default_env(), |filter, directive| -> Result<EnvFilter, ParseError> {
            Ok(filter.add_directive(directive.parse()?))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_crates_log_warnings_by_default() {
        let filter = log_filter().unwrap().to_string();
        assert!(filter.contains("proposal=info"), "{filter}");
        assert!(filter.contains("ai_client=warn"), "{filter}");
        assert!(filter.contains("search_client=warn"), "{filter}");
    }
}
