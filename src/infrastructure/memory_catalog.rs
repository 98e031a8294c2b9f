// In-memory catalog implementation seeded from TOML
use crate::application::catalog_repository::CatalogRepository;
use crate::domain::catalog::{Product, ProductFilter, ProductId};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogSeed {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                anyhow::bail!("duplicate product id {} in catalog", product.id);
            }
        }
        Ok(Self { products })
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let seed: CatalogSeed = toml::from_str(toml).context("Failed to parse catalog seed")?;
        Self::new(seed.products)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog seed {}", path.display()))?;
        let catalog = Self::from_toml_str(&data)?;
        tracing::info!("Loaded {} products from {}", catalog.products.len(), path.display());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn find_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        tracing::debug!("Catalog query {:?} matched {} products", filter, products.len());
        Ok(products)
    }

    async fn find_product_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}
