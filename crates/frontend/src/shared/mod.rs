pub mod api_utils;
pub mod icons;
pub mod modal;
pub mod task;
pub mod theme;
