use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
});

str_enum!(AlcoholUse {
    None => "none",
    Moderate => "moderate",
    Heavy => "heavy",
});

str_enum!(DietType {
    Balanced => "balanced",
    Mediterranean => "mediterranean",
    Vegetarian => "vegetarian",
    Vegan => "vegan",
    Western => "western",
    HighFat => "high_fat",
    HighSugar => "high_sugar",
    HighRedMeat => "high_red_meat",
    Processed => "processed",
});

str_enum!(Relationship {
    Parent => "parent",
    Sibling => "sibling",
    Grandparent => "grandparent",
    Other => "other",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn gender_round_trip() {
        for (variant, s) in [(Gender::Male, "male"), (Gender::Female, "female")] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Gender::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn diet_type_round_trip() {
        for (variant, s) in [
            (DietType::Balanced, "balanced"),
            (DietType::Western, "western"),
            (DietType::HighFat, "high_fat"),
            (DietType::HighSugar, "high_sugar"),
            (DietType::HighRedMeat, "high_red_meat"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(DietType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&DietType::HighRedMeat).unwrap();
        assert_eq!(json, "\"high_red_meat\"");
        let rel: Relationship = serde_json::from_str("\"grandparent\"").unwrap();
        assert_eq!(rel, Relationship::Grandparent);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(Gender::from_str("unknown").is_err());
        assert!(AlcoholUse::from_str("").is_err());
        assert!(Relationship::from_str("cousin").is_err());
    }
}
