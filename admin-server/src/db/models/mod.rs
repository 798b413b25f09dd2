//! Database Models
//!
//! 目录域的四张表: brand / category / product / product_image

pub mod brand;
pub mod category;
pub mod product;
pub mod product_image;
pub mod serde_helpers;

pub use brand::{Brand, BrandCreate};
pub use category::{Category, CategoryCreate};
pub use product::{Product, ProductCreate, ProductEdit};
pub use product_image::ProductImage;
