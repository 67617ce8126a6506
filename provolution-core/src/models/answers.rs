//! Questionnaire answers sent to the footprint calculation endpoints.
//!
//! The schema is closed: four category records with a fixed set of fields
//! each. Field names serialize exactly as the API expects them.

use serde::{Deserialize, Serialize};

/// Generates a closed option set with its wire names.
///
/// Every option enum gets `ALL`, `as_str` and a case-insensitive `parse`,
/// and serializes to the same string `as_str` returns.
macro_rules! option_set {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str().eq_ignore_ascii_case(s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

option_set! {
    /// Kind of dwelling.
    HousingType {
        Apartment => "apartment",
        House => "house",
        Shared => "shared",
    }
}

option_set! {
    HeatingType {
        Gas => "gas",
        Oil => "oil",
        District => "district",
        HeatPump => "heatpump",
        Wood => "wood",
        Electric => "electric",
    }
}

option_set! {
    FuelType {
        Petrol => "petrol",
        Diesel => "diesel",
        Hybrid => "hybrid",
        Electric => "electric",
    }
}

option_set! {
    DietType {
        Vegan => "vegan",
        Vegetarian => "vegetarian",
        Flexitarian => "flexitarian",
        Mixed => "mixed",
        MeatHeavy => "meat_heavy",
    }
}

option_set! {
    /// Three-level scale used for food waste and digital consumption.
    Level {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

option_set! {
    ShoppingFrequency {
        Minimal => "minimal",
        Moderate => "moderate",
        Frequent => "frequent",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingAnswers {
    pub housing_type: HousingType,
    pub housing_size_sqm: u32,
    pub household_members: u32,
    pub heating_type: HeatingType,
    pub heating_consumption_kwh: Option<u32>,
    pub electricity_kwh: Option<u32>,
    pub green_electricity: bool,
}

impl Default for HousingAnswers {
    fn default() -> Self {
        Self {
            housing_type: HousingType::Apartment,
            housing_size_sqm: 80,
            household_members: 2,
            heating_type: HeatingType::Gas,
            heating_consumption_kwh: None,
            electricity_kwh: None,
            green_electricity: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobilityAnswers {
    pub has_car: bool,
    pub car_fuel_type: Option<FuelType>,
    pub car_km_year: u32,
    pub car_consumption_l_100km: Option<f64>,
    pub public_transport_km_year: u32,
    pub bike_km_year: u32,
    pub flights_short_haul: u32,
    pub flights_long_haul: u32,
}

impl Default for MobilityAnswers {
    fn default() -> Self {
        Self {
            has_car: false,
            car_fuel_type: None,
            car_km_year: 0,
            car_consumption_l_100km: None,
            public_transport_km_year: 2000,
            bike_km_year: 500,
            flights_short_haul: 0,
            flights_long_haul: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionAnswers {
    pub diet_type: DietType,
    pub regional_seasonal: bool,
    pub food_waste_level: Level,
}

impl Default for NutritionAnswers {
    fn default() -> Self {
        Self {
            diet_type: DietType::Mixed,
            regional_seasonal: false,
            food_waste_level: Level::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionAnswers {
    pub shopping_frequency: ShoppingFrequency,
    pub secondhand_preference: bool,
    pub digital_consumption: Level,
}

impl Default for ConsumptionAnswers {
    fn default() -> Self {
        Self {
            shopping_frequency: ShoppingFrequency::Moderate,
            secondhand_preference: false,
            digital_consumption: Level::Medium,
        }
    }
}

/// The full request body for `/footprint/calculate` and `/footprint/me`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FootprintAnswers {
    pub housing: HousingAnswers,
    pub mobility: MobilityAnswers,
    pub nutrition: NutritionAnswers,
    pub consumption: ConsumptionAnswers,
}
