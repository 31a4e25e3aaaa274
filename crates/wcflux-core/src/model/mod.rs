// ── Domain model ──
//
// Persistence models for the product catalogue. DTOs from `wcflux-api`
// are mapped into these by `crate::convert`.

pub mod common;
pub mod product;
pub mod review;
pub mod terms;
pub mod variation;

pub use common::{
    ProductAttribute, ProductDownload, ProductImage, ProductStatus, ProductTerm, ReviewStatus,
    StockStatus, VariationAttribute,
};
pub use product::ProductModel;
pub use review::ReviewModel;
pub use terms::{CategoryModel, ShippingClassModel, TagModel, sort_category_tree};
pub use variation::VariationModel;
