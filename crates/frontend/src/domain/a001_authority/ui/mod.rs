pub mod location_list;
pub mod quick_add;
pub mod select_modal;

pub use location_list::LocationListBuilder;
pub use quick_add::QuickAddAuthority;
pub use select_modal::AuthoritySelectModal;
