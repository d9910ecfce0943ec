//! # Seed Data
//!
//! The demo venue: a twelve-table floor, a four-category menu, and a
//! small staff roster. Loaded by [`crate::Store::with_demo_data`].
//!
//! ## Venue Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  12 tables (2-8 seats), all available, no service in progress           │
//! │  14 menu items across Appetizers / Main Courses / Beverages / Desserts  │
//! │  4 waiters + the reserved kitchen and manager accounts                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All tables start available and empty: live service state only ever
//! enters the system through the floor operations, never through seeding.

use chrono::{DateTime, Utc};

use comanda_core::types::{MenuItem, Role, Table, User};

/// Menu categories, in the order the UI shows its tabs.
pub const DEMO_CATEGORIES: [&str; 4] = ["Appetizers", "Main Courses", "Beverages", "Desserts"];

/// Username of the built-in kitchen account.
pub const KITCHEN_USERNAME: &str = "kitchen";

/// Username of the built-in manager account.
pub const MANAGER_USERNAME: &str = "admin";

/// Builds the demo floor: tables 1-12 with their seat counts.
pub fn demo_tables() -> Vec<Table> {
    let seats: [u32; 12] = [2, 4, 2, 6, 4, 8, 2, 4, 4, 2, 6, 4];
    seats
        .iter()
        .enumerate()
        .map(|(i, &seats)| {
            let number = (i + 1) as u32;
            Table::new(number.to_string(), number, seats)
        })
        .collect()
}

/// Builds the demo menu: 14 items across the four categories.
pub fn demo_menu(now: DateTime<Utc>) -> Vec<MenuItem> {
    let rows: [(&str, &str, &str, i64, &str); 14] = [
        (
            "1",
            "Caesar Salad",
            "Appetizers",
            2890,
            "Romaine lettuce, croutons, parmesan and caesar dressing",
        ),
        (
            "2",
            "Bruschetta",
            "Appetizers",
            2490,
            "Italian bread, fresh tomato, basil and olive oil",
        ),
        (
            "3",
            "Sushi Platter",
            "Appetizers",
            4590,
            "12 pieces of assorted sushi and sashimi",
        ),
        (
            "4",
            "Grilled Steak",
            "Main Courses",
            8990,
            "Grilled filet mignon with potatoes and vegetables",
        ),
        (
            "5",
            "Artisan Burger",
            "Main Courses",
            5290,
            "180g burger, cheese, bacon, lettuce and tomato",
        ),
        (
            "6",
            "Pasta Carbonara",
            "Main Courses",
            4890,
            "Fresh pasta with creamy sauce, bacon and parmesan",
        ),
        (
            "7",
            "Pizza Margherita",
            "Main Courses",
            4290,
            "Tomato sauce, mozzarella, basil and olive oil",
        ),
        ("8", "Espresso Coffee", "Beverages", 890, "Traditional espresso coffee"),
        ("9", "Orange Juice", "Beverages", 1290, "Fresh orange juice 300ml"),
        ("10", "Soda", "Beverages", 800, "Soda can 350ml"),
        ("11", "House Cocktail", "Beverages", 2890, "Special house cocktail"),
        (
            "12",
            "Tiramisu",
            "Desserts",
            2490,
            "Italian dessert with coffee and mascarpone",
        ),
        (
            "13",
            "Lava Cake",
            "Desserts",
            2890,
            "Warm chocolate cake with ice cream",
        ),
        (
            "14",
            "Cheesecake",
            "Desserts",
            2290,
            "Creamy cheesecake with berry sauce",
        ),
    ];

    rows.iter()
        .map(|(id, name, category, price_cents, description)| MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            price_cents: *price_cents,
            category: category.to_string(),
            image_url: None,
            available: true,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Builds the demo staff: four waiters plus the reserved accounts.
pub fn demo_users(now: DateTime<Utc>) -> Vec<User> {
    let mut users: Vec<User> = [
        ("1", "John Silva", "john"),
        ("2", "Mary Santos", "mary"),
        ("3", "Peter Johnson", "peter"),
        ("4", "Anna Costa", "anna"),
    ]
    .iter()
    .map(|(id, name, username)| User {
        id: id.to_string(),
        name: name.to_string(),
        username: username.to_string(),
        password: "waiter123".to_string(),
        role: Role::Waiter,
        created_at: now,
        updated_at: now,
    })
    .collect();

    users.push(User {
        id: "kitchen".to_string(),
        name: "Kitchen".to_string(),
        username: KITCHEN_USERNAME.to_string(),
        password: "kitchen123".to_string(),
        role: Role::Kitchen,
        created_at: now,
        updated_at: now,
    });

    users.push(User {
        id: "manager".to_string(),
        name: "Admin Manager".to_string(),
        username: MANAGER_USERNAME.to_string(),
        password: "admin123".to_string(),
        role: Role::Manager,
        created_at: now,
        updated_at: now,
    });

    users
}

// =============================================================================
// Unit Tests
// =============================================================================
