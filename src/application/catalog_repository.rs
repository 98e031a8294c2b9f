// Repository trait for product catalog access
use crate::domain::catalog::{Product, ProductCategory, ProductFilter, ProductId, TileSpec};
use async_trait::async_trait;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Products matching the filter, in catalog order. No match is an empty list.
    async fn find_products(&self, filter: &ProductFilter) -> anyhow::Result<Vec<Product>>;

    async fn find_product_by_id(&self, id: ProductId) -> anyhow::Result<Option<Product>>;

    /// Tile specs of every LED tile product matching the filter
    async fn find_tile_specs(&self, filter: &ProductFilter) -> anyhow::Result<Vec<TileSpec>> {
        let filter = ProductFilter {
            category: Some(ProductCategory::LedTile),
            search: filter.search.clone(),
        };
        let products = self.find_products(&filter).await?;
        Ok(products
            .into_iter()
            .filter_map(|p| p.tile_spec().cloned())
            .collect())
    }
}
