use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;


// Ingredient groups, declared in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Base,
    Beans,
    Protein,
    Salsa,
    Toppings,
    Extras,
}

impl Category {
    /// All categories in the fixed display order.
    pub const ALL: [Category; 6] = [
        Category::Base,
        Category::Beans,
        Category::Protein,
        Category::Salsa,
        Category::Toppings,
        Category::Extras,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Base => "base",
            Category::Beans => "beans",
            Category::Protein => "protein",
            Category::Salsa => "salsa",
            Category::Toppings => "toppings",
            Category::Extras => "extras",
        }
    }

    // Title-cased label for headings
    pub fn label(self) -> &'static str {
        match self {
            Category::Base => "Base",
            Category::Beans => "Beans",
            Category::Protein => "Protein",
            Category::Salsa => "Salsa",
            Category::Toppings => "Toppings",
            Category::Extras => "Extras",
        }
    }

    // Position in the display order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Categories where an ingredient can only be picked once; the menu hides
    /// items of these categories once they are in the order.
    pub fn is_single_pick(self) -> bool {
        matches!(self, Category::Base | Category::Beans | Category::Protein)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| InputError::UnknownCategory(s.to_string()))
    }
}


// Portion size chosen in the modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portion {
    Light,
    #[default]
    Normal,
    Heavy,
}

impl Portion {
    pub const ALL: [Portion; 3] = [Portion::Light, Portion::Normal, Portion::Heavy];

    pub fn as_str(self) -> &'static str {
        match self {
            Portion::Light => "light",
            Portion::Normal => "normal",
            Portion::Heavy => "heavy",
        }
    }

    // Qualifier appended to a line's name; normal portions carry none
    pub fn qualifier(self) -> Option<&'static str> {
        match self {
            Portion::Normal => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Portion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// A catalog entry. Colors are `#RRGGBB` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ingredient {
    pub name: &'static str,
    pub color: &'static str,
}

impl Ingredient {
    pub const fn new(name: &'static str, color: &'static str) -> Self {
        Self { name, color }
    }
}


/// One selected ingredient as it appears in the order.
///
/// The name may carry a portion qualifier, e.g. `"Pico De Gallo (heavy)"`.
/// This is also the persisted shape: `{"name": ..., "color": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub color: String,
}

impl OrderLine {
    // Decorate the ingredient name with the portion, keep its color
    pub fn new(item: &Ingredient, portion: Portion) -> Self {
        let name = match portion.qualifier() {
            Some(q) => format!("{} ({})", item.name, q),
            None => item.name.to_string(),
        };
        Self {
            name,
            color: item.color.to_string(),
        }
    }

    // Name with any trailing " (qualifier)" stripped
    pub fn base_name(&self) -> &str {
        split_qualifier(&self.name).0
    }

    // Portion encoded in the name; undecorated or unknown means normal
    pub fn portion(&self) -> Portion {
        match split_qualifier(&self.name).1 {
            Some("light") => Portion::Light,
            Some("heavy") => Portion::Heavy,
            _ => Portion::Normal,
        }
    }
}

impl fmt::Display for OrderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}


fn split_qualifier(name: &str) -> (&str, Option<&str>) {
    let Some(inner) = name.strip_suffix(')') else {
        return (name, None);
    };
    match inner.rfind(" (") {
        Some(at) => (&inner[..at], Some(&inner[at + 2..])),
        None => (name, None),
    }
}
