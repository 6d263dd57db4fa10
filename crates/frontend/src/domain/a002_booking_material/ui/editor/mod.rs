pub mod view;
pub mod view_model;

pub use view::MaterialsEditor;
pub use view_model::MaterialsEditorViewModel;
