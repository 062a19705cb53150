use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog listing from `GET products/all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub price: Decimal,
    /// Selling unit, e.g. `"kg"` or `"dozen"`.
    #[serde(default)]
    pub unit: Option<String>,
    /// Units in stock, when the seller publishes it.
    #[serde(default, alias = "quantity")]
    pub stock: Option<u32>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Catalog tabs on the buyer product page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Category {
    #[default]
    All,
    Fruits,
    Vegetables,
    Crops,
    Pesticides,
    Fertilizer,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::All,
        Category::Fruits,
        Category::Vegetables,
        Category::Crops,
        Category::Pesticides,
        Category::Fertilizer,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Fruits => "fruits",
            Category::Vegetables => "vegetables",
            Category::Crops => "crops",
            Category::Pesticides => "pesticides",
            Category::Fertilizer => "fertilizer",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// Filters the catalog by tab and free-text search.
///
/// Search is a case-insensitive substring match over name, description and
/// category. A non-`All` tab keeps products whose category contains the tab id.
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    category: Category,
    search: &str,
) -> Vec<&'a Product> {
    let needle = search.trim().to_lowercase();
    products
        .iter()
        .filter(|p| {
            let name = p.name.to_lowercase();
            let description = p.description.as_deref().unwrap_or_default().to_lowercase();
            let product_category = p.category.as_deref().unwrap_or_default().to_lowercase();

            let matches_search = name.contains(&needle)
                || description.contains(&needle)
                || product_category.contains(&needle);
            let matches_category =
                category == Category::All || product_category.contains(category.id());

            matches_search && matches_category
        })
        .collect()
}
