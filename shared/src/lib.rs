//! Domain models shared between the dashboard frontend and the REST API.
//!
//! All types mirror the server's JSON wire format: camelCase field names,
//! integer ids assigned by the server (absent before the first persist).

use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// Restaurant
// =========================================================

/// Per-restaurant storefront appearance settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSettings {
    #[serde(default)]
    pub banner_image: String,
    #[serde(default)]
    pub background_colour: String,
    #[serde(default)]
    pub primary_colour: String,
    #[serde(default)]
    pub primary_colour_hover: String,
    #[serde(default)]
    pub nav_background_colour: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub username: String,
    /// Only sent on registration; the server never echoes it back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub web_settings: WebSettings,
}

// =========================================================
// Menu
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub position: i64,
    pub visible: i64,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// The server nests the section list one level deep.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuSections {
    #[serde(default)]
    pub sections: Vec<MenuSection>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub restaurant_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub menu_type: String,
    /// 0 expanded, 1 collapsed.
    #[serde(default)]
    pub collapse: i64,
    #[serde(default)]
    pub sections: MenuSections,
}

// =========================================================
// Order
// =========================================================

/// Wire-level order lifecycle. Case-sensitive on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Preparing,
    Ready,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// The exact string the API expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Human-readable label for list rows and detail views.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item_id: i64,
    pub quantity: i64,
}

/// The server nests the item list one level deep, like menu sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderItems {
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub restaurant_id: i64,
    pub customer_id: i64,
    #[serde(default)]
    pub items: OrderItems,
    pub total: f64,
    pub status: OrderStatus,
}

// =========================================================
// Address
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub customer_id: i64,
    pub address_line: String,
    pub city: String,
    pub postal_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_wire_strings_are_uppercase() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: OrderStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn order_status_parse_is_case_sensitive() {
        assert_eq!(OrderStatus::parse("READY"), Some(OrderStatus::Ready));
        assert_eq!(OrderStatus::parse("Ready"), None);
        assert_eq!(OrderStatus::parse("SHIPPED"), None);
    }

    #[test]
    fn menu_serializes_with_wire_field_names() {
        let menu = Menu {
            id: None,
            restaurant_id: 7,
            name: "Lunch".to_string(),
            menu_type: "fixed".to_string(),
            collapse: 0,
            sections: MenuSections {
                sections: vec![MenuSection {
                    id: 1,
                    name: "Drinks".to_string(),
                    description: String::new(),
                    position: 0,
                    visible: 1,
                    items: Vec::new(),
                }],
            },
        };

        let value = serde_json::to_value(&menu).unwrap();
        // Unsaved menus must not send an id field at all.
        assert!(value.get("id").is_none());
        assert_eq!(value["restaurantId"], 7);
        assert_eq!(value["type"], "fixed");
        assert_eq!(value["sections"]["sections"][0]["name"], "Drinks");
    }

    #[test]
    fn restaurant_roundtrips_without_password_echo() {
        let json = r##"{
            "id": 3,
            "name": "Trattoria",
            "address": "Main St 1",
            "city": "Lisbon",
            "country": "PT",
            "username": "trattoria",
            "webSettings": { "primaryColour": "#990000" }
        }"##;
        let restaurant: Restaurant = serde_json::from_str(json).unwrap();
        assert_eq!(restaurant.id, Some(3));
        assert_eq!(restaurant.password, None);
        assert_eq!(restaurant.web_settings.primary_colour, "#990000");
    }
}
