pub mod add_product;

pub use add_product::AddProductScreen;
