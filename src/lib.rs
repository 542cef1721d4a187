//! Build-your-own-bowl ordering.
//!
//! A fixed [`catalog`] of ingredients, an observable [`order`] store with
//! grouped and filtered views, key-value [`persist`]ence, and the terminal
//! [`session`] and [`dashboard`] that drive them.

pub mod app;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod order;
pub mod persist;
pub mod random;
pub mod session;
pub mod utils;

pub use catalog::{contrast_color, Catalog, Rgb, TextColor};
pub use config::Config;
pub use model::{Category, Ingredient, OrderLine, Portion};
pub use order::{GroupedView, OrderEvent, OrderGroup, OrderStore};
pub use persist::{FileStore, KeyValueStore, MemoryStore, OrderPersistence, ORDER_KEY};
pub use session::Session;
