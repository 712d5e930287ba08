use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Colors assigned to chart slices, cycled by position.
pub const PALETTE: [&str; 7] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#8AC926",
];

/// Categories the client knows how to label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownCategory {
    Salary,
    Groceries,
    Bills,
    Rent,
    Travel,
    Transportation,
    FoodAndDrink,
    Shopping,
    Education,
    Family,
    Entertainment,
    Health,
    Other,
}

impl FromStr for KnownCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "salary" => Ok(Self::Salary),
            "groceries" => Ok(Self::Groceries),
            "bills" => Ok(Self::Bills),
            "rent" => Ok(Self::Rent),
            "travel" => Ok(Self::Travel),
            "transportation" => Ok(Self::Transportation),
            "foodanddrink" => Ok(Self::FoodAndDrink),
            "shopping" => Ok(Self::Shopping),
            "education" => Ok(Self::Education),
            "family" => Ok(Self::Family),
            "entertainment" => Ok(Self::Entertainment),
            "health" => Ok(Self::Health),
            "other" => Ok(Self::Other),
            _ => Err(()),
        }
    }
}

impl KnownCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Groceries => "groceries",
            Self::Bills => "bills",
            Self::Rent => "rent",
            Self::Travel => "travel",
            Self::Transportation => "transportation",
            Self::FoodAndDrink => "foodanddrink",
            Self::Shopping => "shopping",
            Self::Education => "education",
            Self::Family => "family",
            Self::Entertainment => "entertainment",
            Self::Health => "health",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Groceries => "Groceries",
            Self::Bills => "Bills",
            Self::Rent => "Rent",
            Self::Travel => "Travel",
            Self::Transportation => "Transportation",
            Self::FoodAndDrink => "Food & Drink",
            Self::Shopping => "Shopping",
            Self::Education => "Education",
            Self::Family => "Family",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Other => "Other",
        }
    }

    pub fn all() -> &'static [KnownCategory] {
        &[
            Self::Salary,
            Self::Groceries,
            Self::Bills,
            Self::Rent,
            Self::Travel,
            Self::Transportation,
            Self::FoodAndDrink,
            Self::Shopping,
            Self::Education,
            Self::Family,
            Self::Entertainment,
            Self::Health,
            Self::Other,
        ]
    }
}

/// Spending category of a transaction.
///
/// Keys outside the known vocabulary are kept verbatim in `Other` so that
/// aggregation never drops or merges them; they only share the "Other" label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Known(KnownCategory),
    Other(String),
}

impl Category {
    /// Parses a wire key. Matching is exact, so `"Rent"` is not `rent`.
    pub fn from_key(key: &str) -> Self {
        key.parse::<KnownCategory>()
            .map(Self::Known)
            .unwrap_or_else(|_| Self::Other(key.to_string()))
    }

    /// The aggregation key.
    pub fn key(&self) -> &str {
        match self {
            Self::Known(known) => known.as_str(),
            Self::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Known(known) => known.label(),
            Self::Other(_) => KnownCategory::Other.label(),
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Known(KnownCategory::Other)
    }
}

impl From<KnownCategory> for Category {
    fn from(known: KnownCategory) -> Self {
        Self::Known(known)
    }
}

impl From<&str> for Category {
    fn from(key: &str) -> Self {
        Self::from_key(key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = Option::<String>::deserialize(deserializer)?;
        Ok(key.map(|k| Self::from_key(&k)).unwrap_or_default())
    }
}

/// Hex color for a chart position.
pub fn palette_color(color_index: usize) -> &'static str {
    PALETTE[color_index % PALETTE.len()]
}
