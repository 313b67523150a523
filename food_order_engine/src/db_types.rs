use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use uuid::Uuid;

use crate::foe_api::errors::OrderFlowError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Conversion error: {0}")]
pub struct ConversionError(String);

//--------------------------------------      Entity ids       ---------------------------------------------------------
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Type, Serialize, Deserialize)]
        #[sqlx(transparent)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh random (v4) identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = ConversionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self::from)
                    .map_err(|e| ConversionError(format!("{s} is not a valid {}. {e}", stringify!($name))))
            }
        }

        impl TryFrom<String> for $name {
            type Error = ConversionError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value.hyphenated().to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

entity_id!(CustomerId);
entity_id!(RestaurantId);
entity_id!(
    /// The payment identifier. It doubles as the transaction reference that orders are placed against.
    TransactionId
);
entity_id!(OrderId);

//--------------------------------------         Area          ---------------------------------------------------------
/// The closed set of regions that restaurants operate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Type, Serialize, Deserialize)]
pub enum Area {
    Mumbai,
    Bangalore,
}

impl Area {
    pub const ALL: [Area; 2] = [Area::Mumbai, Area::Bangalore];

    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Mumbai => "Mumbai",
            Area::Bangalore => "Bangalore",
        }
    }
}

impl Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Region names are matched case-insensitively, so `mumbai` in a URL path resolves to [`Area::Mumbai`].
impl FromStr for Area {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mumbai" => Ok(Self::Mumbai),
            "bangalore" => Ok(Self::Bangalore),
            _ => Err(ConversionError(format!("Unknown area: {s}"))),
        }
    }
}

//--------------------------------------    PaymentStatus      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// The payment went through. Only these payments can back an order.
    #[sqlx(rename = "pass")]
    #[serde(rename = "pass", alias = "success")]
    Success,
    #[sqlx(rename = "fail")]
    #[serde(rename = "fail", alias = "failure")]
    Failure,
}

impl PaymentStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, PaymentStatus::Success)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Success => write!(f, "pass"),
            PaymentStatus::Failure => write!(f, "fail"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" | "success" => Ok(Self::Success),
            "fail" | "failure" => Ok(Self::Failure),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

//--------------------------------------     PaymentType       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
pub enum PaymentType {
    #[sqlx(rename = "UPI")]
    #[serde(rename = "UPI")]
    Upi,
    #[sqlx(rename = "card")]
    #[serde(rename = "card")]
    Card,
}

impl Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentType::Upi => write!(f, "UPI"),
            PaymentType::Card => write!(f, "card"),
        }
    }
}

impl FromStr for PaymentType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPI" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            s => Err(ConversionError(format!("Invalid payment type: {s}"))),
        }
    }
}

//--------------------------------------       FoodItem        ---------------------------------------------------------
/// The closed menu. Prices live in the [`crate::PriceCatalog`], never on the order itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FoodItem {
    VegManchurian,
    ChickenManchurian,
    VegFriedRice,
    ChickenNoodles,
}

impl FoodItem {
    pub const ALL: [FoodItem; 4] =
        [FoodItem::VegManchurian, FoodItem::ChickenManchurian, FoodItem::VegFriedRice, FoodItem::ChickenNoodles];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodItem::VegManchurian => "veg_manchurian",
            FoodItem::ChickenManchurian => "chicken_manchurian",
            FoodItem::VegFriedRice => "veg_fried_rice",
            FoodItem::ChickenNoodles => "chicken_noodles",
        }
    }

    pub fn is_veg(&self) -> bool {
        matches!(self, FoodItem::VegManchurian | FoodItem::VegFriedRice)
    }
}

impl Display for FoodItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodItem {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FoodItem::ALL
            .into_iter()
            .find(|item| item.as_str() == s.trim())
            .ok_or_else(|| ConversionError(format!("Unknown food item: {s}")))
    }
}

//--------------------------------------       Customer        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    /// The stable subject identifier issued by the identity provider.
    pub subject_id: String,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub subject_id: String,
    pub age: Option<i32>,
}

impl NewCustomer {
    pub fn new<S1: Into<String>, S2: Into<String>>(name: S1, subject_id: S2) -> Self {
        Self { name: name.into(), subject_id: subject_id.into(), age: None }
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }
}

//--------------------------------------      Restaurant       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Restaurant {
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
    pub area: Area,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub restaurant_name: String,
    pub area: Area,
}

impl NewRestaurant {
    pub fn new<S: Into<String>>(restaurant_name: S, area: Area) -> Self {
        Self { restaurant_name: restaurant_name.into(), area }
    }
}

//--------------------------------------        Payment        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub transaction_id: TransactionId,
    pub status: PaymentStatus,
    pub payment_type: PaymentType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayment {
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
}

impl NewPayment {
    pub fn new(payment_type: PaymentType, status: PaymentStatus) -> Self {
        Self { payment_type, status }
    }
}

//--------------------------------------         Order         ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: OrderId,
    pub food_item: FoodItem,
    pub transaction_id: TransactionId,
    pub restaurant_id: RestaurantId,
    pub customer_id: CustomerId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub food_item: FoodItem,
    pub transaction_id: TransactionId,
    pub restaurant_id: RestaurantId,
    pub customer_id: CustomerId,
}

impl NewOrder {
    pub fn new(
        food_item: FoodItem,
        transaction_id: TransactionId,
        restaurant_id: RestaurantId,
        customer_id: CustomerId,
    ) -> Self {
        Self { food_item, transaction_id, restaurant_id, customer_id }
    }

    /// Checks that the payment and restaurant this order refers to allow it to be placed. The payment is checked
    /// first, so an order with both a bad payment and a bad restaurant reports the payment problem.
    ///
    /// Backends call this with the records they read inside the same transaction that inserts the order.
    pub fn check_references(
        &self,
        payment: Option<&Payment>,
        restaurant: Option<&Restaurant>,
    ) -> Result<(), OrderFlowError> {
        match payment {
            None => return Err(OrderFlowError::PaymentNotFound(self.transaction_id.clone())),
            Some(p) if !p.status.is_success() => {
                return Err(OrderFlowError::PaymentNotSuccessful(self.transaction_id.clone()))
            },
            Some(_) => {},
        }
        if restaurant.is_none() {
            return Err(OrderFlowError::RestaurantNotFound(self.restaurant_id.clone()));
        }
        Ok(())
    }
}
