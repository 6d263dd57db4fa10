pub mod aggregate;

pub use aggregate::{route_code_and_name, KmSuggestion, KmSuggestionsResponse};
