//! The static product catalog.
//!
//! Catalog data is read-only; the order lifecycle treats it as an
//! external collaborator. [`Catalog::find`] is the lookup interface the
//! rendering layer uses to resolve a selected product ID, and
//! [`Catalog::summaries`] feeds the assistant its product context.

use maygloss_core::{Price, Product, ProductId};

/// Store contact and social details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInfo {
    pub name: &'static str,
    pub address: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub instagram: &'static str,
    pub tiktok: &'static str,
}

/// MayGloss store details.
pub const STORE_INFO: StoreInfo = StoreInfo {
    name: "MayGloss",
    address: "122 Glossy Ave, Suite 400, New York, NY 10012",
    email: "hello@maygloss.com",
    phone: "+1 (555) 012-3456",
    instagram: "@maygloss_beauty",
    tiktok: "@maygloss",
};

/// The read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The standard MayGloss lip gloss line.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            products: vec![
                product(
                    "1",
                    "Crystal Dew",
                    24,
                    "Clear",
                    "Transparent",
                    "A non-sticky, high-shine clear gloss that delivers a glass-like finish.",
                    "https://images.unsplash.com/photo-1586776977607-310e9c725c37?auto=format&fit=crop&q=80&w=800",
                    &["Hyaluronic Acid", "Vitamin E", "Coconut Oil"],
                ),
                product(
                    "2",
                    "Rose Quartz",
                    26,
                    "Tinted",
                    "Soft Pink",
                    "A delicate pink tint with nourishing botanicals for everyday elegance.",
                    "https://images.unsplash.com/photo-1599733589046-10c005739ef0?auto=format&fit=crop&q=80&w=800",
                    &["Shea Butter", "Jojoba Oil", "Peppermint Extract"],
                ),
                product(
                    "3",
                    "Starlight Shimmer",
                    28,
                    "Glitter",
                    "Iridescent Gold",
                    "Multidimensional pearls that catch the light from every angle.",
                    "https://images.unsplash.com/photo-1512496015851-a90fb38ba796?auto=format&fit=crop&q=80&w=800",
                    &["Mica", "Sunflower Seed Oil", "Aloe Vera"],
                ),
                product(
                    "4",
                    "Ruby Velvet",
                    26,
                    "Tinted",
                    "Deep Crimson",
                    "Bold pigmentation meets moisturizing gloss for a powerful statement.",
                    "https://images.unsplash.com/photo-1625093742435-6fa192b6fb1a?auto=format&fit=crop&q=80&w=800",
                    &["Argan Oil", "Beeswax", "Red Berry Extract"],
                ),
                product(
                    "5",
                    "Peach Sorbet",
                    24,
                    "Plumping",
                    "Warm Coral",
                    "Gently plumps lips while providing a juicy coral sheen.",
                    "https://images.unsplash.com/photo-1617348981459-715783321523?auto=format&fit=crop&q=80&w=800",
                    &["Capsicum Extract", "Collagen", "Avocado Oil"],
                ),
                product(
                    "6",
                    "Midnight Mauve",
                    28,
                    "Tinted",
                    "Dusty Rose",
                    "A sophisticated mauve that complements any skin tone.",
                    "https://images.unsplash.com/photo-1596462502278-27bfad4573a6?auto=format&fit=crop&q=80&w=800",
                    &["Squalane", "Vitamin C", "Grapeseed Oil"],
                ),
            ],
        }
    }

    /// Resolve a product by ID.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// One-line product summaries for the assistant's context.
    #[must_use]
    pub fn summaries(&self) -> String {
        self.products
            .iter()
            .map(|p| {
                format!(
                    "{}: {} ({}, shade: {})",
                    p.name, p.description, p.price, p.shade
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    dollars: i64,
    category: &str,
    shade: &str,
    description: &str,
    image: &str,
    ingredients: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Price::from_dollars(dollars),
        category: category.to_owned(),
        shade: shade.to_owned(),
        description: description.to_owned(),
        image: image.to_owned(),
        ingredients: ingredients.iter().map(|&i| i.to_owned()).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_has_six_products() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.all().len(), 6);
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::standard();
        let product = catalog.find(&ProductId::new("2")).unwrap();
        assert_eq!(product.name, "Rose Quartz");
        assert_eq!(product.price, Price::from_dollars(26));
    }

    #[test]
    fn test_find_missing_is_none() {
        let catalog = Catalog::standard();
        assert!(catalog.find(&ProductId::new("99")).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let catalog = Catalog::standard();
        let mut ids: Vec<_> = catalog.all().iter().map(|p| p.id.clone()).collect();
        let count = ids.len();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_summaries_mention_every_product() {
        let catalog = Catalog::standard();
        let summaries = catalog.summaries();
        for product in catalog.all() {
            assert!(summaries.contains(&product.name));
        }
        assert!(summaries.contains("$24.00"));
    }
}
