pub mod aggregate;
pub mod location;

pub use aggregate::{Authority, AuthorityId, QuickAddAuthorityRequest, QuickAddAuthorityResponse};
pub use location::{parse_location_input, AuthorityRole, LocationChip, LocationRef, LocationSelection};
