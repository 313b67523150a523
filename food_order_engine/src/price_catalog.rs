//! # Price catalog
//!
//! The catalog maps every [`FoodItem`] to its price. Orders never store a price; reports apply the catalog when they
//! aggregate, so the catalog is an explicit, immutable value that is handed to the [`crate::ReportingApi`] when it is
//! built.
//!
//! A catalog constructed with [`PriceCatalog::new`] is always *complete*: every item on the menu has exactly one,
//! strictly positive price. Sub-views (such as [`PriceCatalog::veg_subset`]) are derived from a complete catalog and
//! price the missing items at zero.
use std::collections::BTreeMap;

use fos_common::Rupees;
use thiserror::Error;

use crate::db_types::FoodItem;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("No price was given for {0}")]
    MissingPrice(FoodItem),
    #[error("{0} was priced more than once")]
    DuplicatePrice(FoodItem),
    #[error("The price for {0} must be positive")]
    NonPositivePrice(FoodItem),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceCatalog {
    prices: BTreeMap<FoodItem, Rupees>,
}

impl PriceCatalog {
    /// Builds a complete catalog from the given entries.
    pub fn new<I>(entries: I) -> Result<Self, CatalogError>
    where I: IntoIterator<Item = (FoodItem, Rupees)> {
        let mut prices = BTreeMap::new();
        for (item, price) in entries {
            if !price.is_positive() {
                return Err(CatalogError::NonPositivePrice(item));
            }
            if prices.insert(item, price).is_some() {
                return Err(CatalogError::DuplicatePrice(item));
            }
        }
        if let Some(missing) = FoodItem::ALL.iter().find(|item| !prices.contains_key(item)) {
            return Err(CatalogError::MissingPrice(*missing));
        }
        Ok(Self { prices })
    }

    /// The standard menu prices.
    pub fn standard() -> Self {
        let prices = FoodItem::ALL
            .into_iter()
            .map(|item| {
                let price = match item {
                    FoodItem::VegManchurian => 150,
                    FoodItem::ChickenManchurian => 200,
                    FoodItem::VegFriedRice => 120,
                    FoodItem::ChickenNoodles => 180,
                };
                (item, Rupees::from(price))
            })
            .collect();
        Self { prices }
    }

    /// Returns a copy of this catalog with some prices replaced. The result is still complete.
    pub fn with_overrides<I>(&self, overrides: I) -> Result<Self, CatalogError>
    where I: IntoIterator<Item = (FoodItem, Rupees)> {
        let mut prices = self.prices.clone();
        for (item, price) in overrides {
            if !price.is_positive() {
                return Err(CatalogError::NonPositivePrice(item));
            }
            prices.insert(item, price);
        }
        Ok(Self { prices })
    }

    /// The vegetarian part of the catalog. Every other item is priced at zero in this view.
    pub fn veg_subset(&self) -> Self {
        self.subset(|item| item.is_veg())
    }

    pub fn subset<F>(&self, predicate: F) -> Self
    where F: Fn(&FoodItem) -> bool {
        let prices = self.prices.iter().filter(|(item, _)| predicate(item)).map(|(k, v)| (*k, *v)).collect();
        Self { prices }
    }

    pub fn price_of(&self, item: FoodItem) -> Rupees {
        self.prices.get(&item).copied().unwrap_or_default()
    }

    pub fn contains(&self, item: FoodItem) -> bool {
        self.prices.contains_key(&item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FoodItem, Rupees)> + '_ {
        self.prices.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
