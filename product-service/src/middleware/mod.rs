pub mod product_form;

pub use product_form::ProductForm;
