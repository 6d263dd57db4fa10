pub mod km_suggestions;

pub use km_suggestions::{KmSuggestionsList, RoutePreview};
