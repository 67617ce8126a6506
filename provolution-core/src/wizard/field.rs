//! Compile-time mapping from field identifiers to answer categories.
//!
//! Every questionnaire field is a [`Field`] variant; its category, wire name
//! and input control are fixed by exhaustive matches. Typed edits go through
//! [`Answer`], so a misspelt field cannot be silently dropped. Text input
//! (the terminal host) goes through [`Field::from_name`] and
//! [`Answer::parse`], which coerce values the way native form controls do.

use std::fmt;
use std::ops::RangeInclusive;

use crate::models::{
    DietType, FootprintAnswers, FuelType, HeatingType, HousingType, Level, ShoppingFrequency,
};

use super::error::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Housing,
    Mobility,
    Nutrition,
    Consumption,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Housing,
        Category::Mobility,
        Category::Nutrition,
        Category::Consumption,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Mobility => "mobility",
            Self::Nutrition => "nutrition",
            Self::Consumption => "consumption",
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(move |f| f.category() == *self)
    }
}

/// Input control a field is edited with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Choice(Vec<&'static str>),
    Toggle,
    Slider(RangeInclusive<u32>),
    /// Free number, empty allowed.
    OptionalNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    HousingType,
    HousingSizeSqm,
    HouseholdMembers,
    HeatingType,
    HeatingConsumptionKwh,
    ElectricityKwh,
    GreenElectricity,
    HasCar,
    CarFuelType,
    CarKmYear,
    CarConsumptionL100km,
    PublicTransportKmYear,
    BikeKmYear,
    FlightsShortHaul,
    FlightsLongHaul,
    DietType,
    RegionalSeasonal,
    FoodWasteLevel,
    ShoppingFrequency,
    SecondhandPreference,
    DigitalConsumption,
}

impl Field {
    pub const ALL: [Field; 21] = [
        Field::HousingType,
        Field::HousingSizeSqm,
        Field::HouseholdMembers,
        Field::HeatingType,
        Field::HeatingConsumptionKwh,
        Field::ElectricityKwh,
        Field::GreenElectricity,
        Field::HasCar,
        Field::CarFuelType,
        Field::CarKmYear,
        Field::CarConsumptionL100km,
        Field::PublicTransportKmYear,
        Field::BikeKmYear,
        Field::FlightsShortHaul,
        Field::FlightsLongHaul,
        Field::DietType,
        Field::RegionalSeasonal,
        Field::FoodWasteLevel,
        Field::ShoppingFrequency,
        Field::SecondhandPreference,
        Field::DigitalConsumption,
    ];

    /// Wire name, identical to the JSON key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HousingType => "housing_type",
            Self::HousingSizeSqm => "housing_size_sqm",
            Self::HouseholdMembers => "household_members",
            Self::HeatingType => "heating_type",
            Self::HeatingConsumptionKwh => "heating_consumption_kwh",
            Self::ElectricityKwh => "electricity_kwh",
            Self::GreenElectricity => "green_electricity",
            Self::HasCar => "has_car",
            Self::CarFuelType => "car_fuel_type",
            Self::CarKmYear => "car_km_year",
            Self::CarConsumptionL100km => "car_consumption_l_100km",
            Self::PublicTransportKmYear => "public_transport_km_year",
            Self::BikeKmYear => "bike_km_year",
            Self::FlightsShortHaul => "flights_short_haul",
            Self::FlightsLongHaul => "flights_long_haul",
            Self::DietType => "diet_type",
            Self::RegionalSeasonal => "regional_seasonal",
            Self::FoodWasteLevel => "food_waste_level",
            Self::ShoppingFrequency => "shopping_frequency",
            Self::SecondhandPreference => "secondhand_preference",
            Self::DigitalConsumption => "digital_consumption",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::HousingType
            | Self::HousingSizeSqm
            | Self::HouseholdMembers
            | Self::HeatingType
            | Self::HeatingConsumptionKwh
            | Self::ElectricityKwh
            | Self::GreenElectricity => Category::Housing,
            Self::HasCar
            | Self::CarFuelType
            | Self::CarKmYear
            | Self::CarConsumptionL100km
            | Self::PublicTransportKmYear
            | Self::BikeKmYear
            | Self::FlightsShortHaul
            | Self::FlightsLongHaul => Category::Mobility,
            Self::DietType | Self::RegionalSeasonal | Self::FoodWasteLevel => Category::Nutrition,
            Self::ShoppingFrequency | Self::SecondhandPreference | Self::DigitalConsumption => {
                Category::Consumption
            }
        }
    }

    /// Exact, case-sensitive lookup by wire name.
    pub fn from_name(name: &str) -> Option<Field> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn control(&self) -> Control {
        match self {
            Self::HousingType => Control::Choice(options(HousingType::ALL, HousingType::as_str)),
            Self::HeatingType => Control::Choice(options(HeatingType::ALL, HeatingType::as_str)),
            Self::CarFuelType => Control::Choice(options(FuelType::ALL, FuelType::as_str)),
            Self::DietType => Control::Choice(options(DietType::ALL, DietType::as_str)),
            Self::FoodWasteLevel | Self::DigitalConsumption => {
                Control::Choice(options(Level::ALL, Level::as_str))
            }
            Self::ShoppingFrequency => {
                Control::Choice(options(ShoppingFrequency::ALL, ShoppingFrequency::as_str))
            }
            Self::GreenElectricity
            | Self::HasCar
            | Self::RegionalSeasonal
            | Self::SecondhandPreference => Control::Toggle,
            Self::HousingSizeSqm => Control::Slider(20..=250),
            Self::HouseholdMembers => Control::Slider(1..=6),
            Self::CarKmYear => Control::Slider(0..=40_000),
            Self::PublicTransportKmYear => Control::Slider(0..=20_000),
            Self::BikeKmYear => Control::Slider(0..=10_000),
            Self::FlightsShortHaul => Control::Slider(0..=20),
            Self::FlightsLongHaul => Control::Slider(0..=10),
            Self::HeatingConsumptionKwh | Self::ElectricityKwh | Self::CarConsumptionL100km => {
                Control::OptionalNumber
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn options<T: Copy>(all: &[T], as_str: fn(&T) -> &'static str) -> Vec<&'static str> {
    all.iter().map(as_str).collect()
}

/// A typed value for exactly one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    HousingType(HousingType),
    HousingSizeSqm(u32),
    HouseholdMembers(u32),
    HeatingType(HeatingType),
    HeatingConsumptionKwh(Option<u32>),
    ElectricityKwh(Option<u32>),
    GreenElectricity(bool),
    HasCar(bool),
    CarFuelType(Option<FuelType>),
    CarKmYear(u32),
    CarConsumptionL100km(Option<f64>),
    PublicTransportKmYear(u32),
    BikeKmYear(u32),
    FlightsShortHaul(u32),
    FlightsLongHaul(u32),
    DietType(DietType),
    RegionalSeasonal(bool),
    FoodWasteLevel(Level),
    ShoppingFrequency(ShoppingFrequency),
    SecondhandPreference(bool),
    DigitalConsumption(Level),
}

impl Answer {
    pub fn field(&self) -> Field {
        match self {
            Self::HousingType(_) => Field::HousingType,
            Self::HousingSizeSqm(_) => Field::HousingSizeSqm,
            Self::HouseholdMembers(_) => Field::HouseholdMembers,
            Self::HeatingType(_) => Field::HeatingType,
            Self::HeatingConsumptionKwh(_) => Field::HeatingConsumptionKwh,
            Self::ElectricityKwh(_) => Field::ElectricityKwh,
            Self::GreenElectricity(_) => Field::GreenElectricity,
            Self::HasCar(_) => Field::HasCar,
            Self::CarFuelType(_) => Field::CarFuelType,
            Self::CarKmYear(_) => Field::CarKmYear,
            Self::CarConsumptionL100km(_) => Field::CarConsumptionL100km,
            Self::PublicTransportKmYear(_) => Field::PublicTransportKmYear,
            Self::BikeKmYear(_) => Field::BikeKmYear,
            Self::FlightsShortHaul(_) => Field::FlightsShortHaul,
            Self::FlightsLongHaul(_) => Field::FlightsLongHaul,
            Self::DietType(_) => Field::DietType,
            Self::RegionalSeasonal(_) => Field::RegionalSeasonal,
            Self::FoodWasteLevel(_) => Field::FoodWasteLevel,
            Self::ShoppingFrequency(_) => Field::ShoppingFrequency,
            Self::SecondhandPreference(_) => Field::SecondhandPreference,
            Self::DigitalConsumption(_) => Field::DigitalConsumption,
        }
    }

    /// Coerce raw text into a value for `field`.
    ///
    /// Choices are matched case-insensitively, toggles accept the usual
    /// yes/no spellings, slider values are clamped into the slider range and
    /// optional numbers accept an empty string or `none`.
    pub fn parse(field: Field, raw: &str) -> Result<Answer, FieldError> {
        let raw = raw.trim();
        let answer = match field {
            Field::HousingType => Self::HousingType(choice(field, raw, HousingType::parse)?),
            Field::HeatingType => Self::HeatingType(choice(field, raw, HeatingType::parse)?),
            Field::CarFuelType => {
                if is_empty_value(raw) {
                    Self::CarFuelType(None)
                } else {
                    Self::CarFuelType(Some(choice(field, raw, FuelType::parse)?))
                }
            }
            Field::DietType => Self::DietType(choice(field, raw, DietType::parse)?),
            Field::FoodWasteLevel => Self::FoodWasteLevel(choice(field, raw, Level::parse)?),
            Field::DigitalConsumption => {
                Self::DigitalConsumption(choice(field, raw, Level::parse)?)
            }
            Field::ShoppingFrequency => {
                Self::ShoppingFrequency(choice(field, raw, ShoppingFrequency::parse)?)
            }
            Field::GreenElectricity => Self::GreenElectricity(toggle(field, raw)?),
            Field::HasCar => Self::HasCar(toggle(field, raw)?),
            Field::RegionalSeasonal => Self::RegionalSeasonal(toggle(field, raw)?),
            Field::SecondhandPreference => Self::SecondhandPreference(toggle(field, raw)?),
            Field::HousingSizeSqm => Self::HousingSizeSqm(slider(field, raw)?),
            Field::HouseholdMembers => Self::HouseholdMembers(slider(field, raw)?),
            Field::CarKmYear => Self::CarKmYear(slider(field, raw)?),
            Field::PublicTransportKmYear => Self::PublicTransportKmYear(slider(field, raw)?),
            Field::BikeKmYear => Self::BikeKmYear(slider(field, raw)?),
            Field::FlightsShortHaul => Self::FlightsShortHaul(slider(field, raw)?),
            Field::FlightsLongHaul => Self::FlightsLongHaul(slider(field, raw)?),
            Field::HeatingConsumptionKwh => Self::HeatingConsumptionKwh(optional(field, raw)?),
            Field::ElectricityKwh => Self::ElectricityKwh(optional(field, raw)?),
            Field::CarConsumptionL100km => Self::CarConsumptionL100km(optional(field, raw)?),
        };
        Ok(answer)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HousingType(v) => write!(f, "{v}"),
            Self::HeatingType(v) => write!(f, "{v}"),
            Self::DietType(v) => write!(f, "{v}"),
            Self::FoodWasteLevel(v) | Self::DigitalConsumption(v) => write!(f, "{v}"),
            Self::ShoppingFrequency(v) => write!(f, "{v}"),
            Self::CarFuelType(v) => opt(f, v.as_ref()),
            Self::GreenElectricity(v)
            | Self::HasCar(v)
            | Self::RegionalSeasonal(v)
            | Self::SecondhandPreference(v) => f.write_str(if *v { "yes" } else { "no" }),
            Self::HousingSizeSqm(v)
            | Self::HouseholdMembers(v)
            | Self::CarKmYear(v)
            | Self::PublicTransportKmYear(v)
            | Self::BikeKmYear(v)
            | Self::FlightsShortHaul(v)
            | Self::FlightsLongHaul(v) => write!(f, "{v}"),
            Self::HeatingConsumptionKwh(v) | Self::ElectricityKwh(v) => opt(f, v.as_ref()),
            Self::CarConsumptionL100km(v) => opt(f, v.as_ref()),
        }
    }
}

fn opt<T: fmt::Display>(f: &mut fmt::Formatter<'_>, value: Option<&T>) -> fmt::Result {
    match value {
        Some(v) => write!(f, "{v}"),
        None => f.write_str("-"),
    }
}

fn is_empty_value(raw: &str) -> bool {
    raw.is_empty()
        || raw == "-"
        || raw.eq_ignore_ascii_case("none")
        || raw.eq_ignore_ascii_case("null")
}

fn choice<T>(field: Field, raw: &str, parse: fn(&str) -> Option<T>) -> Result<T, FieldError> {
    parse(raw).ok_or_else(|| FieldError::InvalidChoice {
        field: field.name(),
        value: raw.to_string(),
        options: match field.control() {
            Control::Choice(options) => options,
            _ => Vec::new(),
        },
    })
}

fn toggle(field: Field, raw: &str) -> Result<bool, FieldError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Ok(true),
        "false" | "no" | "n" | "off" | "0" => Ok(false),
        _ => Err(FieldError::InvalidToggle {
            field: field.name(),
            value: raw.to_string(),
        }),
    }
}

fn slider(field: Field, raw: &str) -> Result<u32, FieldError> {
    let invalid = || FieldError::InvalidNumber {
        field: field.name(),
        value: raw.to_string(),
    };
    // A range input never yields a negative number; "-5" lands on the minimum.
    let value: i64 = raw.replace(['_', ','], "").parse().map_err(|_| invalid())?;
    let Control::Slider(range) = field.control() else {
        return Err(invalid());
    };
    let clamped = value.clamp(i64::from(*range.start()), i64::from(*range.end()));
    u32::try_from(clamped).map_err(|_| invalid())
}

fn optional<T: std::str::FromStr>(field: Field, raw: &str) -> Result<Option<T>, FieldError> {
    if is_empty_value(raw) {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| FieldError::InvalidNumber {
        field: field.name(),
        value: raw.to_string(),
    })
}

impl FootprintAnswers {
    /// Overwrite the one field `answer` belongs to.
    pub fn apply(&mut self, answer: Answer) {
        match answer {
            Answer::HousingType(v) => self.housing.housing_type = v,
            Answer::HousingSizeSqm(v) => self.housing.housing_size_sqm = v,
            Answer::HouseholdMembers(v) => self.housing.household_members = v,
            Answer::HeatingType(v) => self.housing.heating_type = v,
            Answer::HeatingConsumptionKwh(v) => self.housing.heating_consumption_kwh = v,
            Answer::ElectricityKwh(v) => self.housing.electricity_kwh = v,
            Answer::GreenElectricity(v) => self.housing.green_electricity = v,
            Answer::HasCar(v) => self.mobility.has_car = v,
            Answer::CarFuelType(v) => self.mobility.car_fuel_type = v,
            Answer::CarKmYear(v) => self.mobility.car_km_year = v,
            Answer::CarConsumptionL100km(v) => self.mobility.car_consumption_l_100km = v,
            Answer::PublicTransportKmYear(v) => self.mobility.public_transport_km_year = v,
            Answer::BikeKmYear(v) => self.mobility.bike_km_year = v,
            Answer::FlightsShortHaul(v) => self.mobility.flights_short_haul = v,
            Answer::FlightsLongHaul(v) => self.mobility.flights_long_haul = v,
            Answer::DietType(v) => self.nutrition.diet_type = v,
            Answer::RegionalSeasonal(v) => self.nutrition.regional_seasonal = v,
            Answer::FoodWasteLevel(v) => self.nutrition.food_waste_level = v,
            Answer::ShoppingFrequency(v) => self.consumption.shopping_frequency = v,
            Answer::SecondhandPreference(v) => self.consumption.secondhand_preference = v,
            Answer::DigitalConsumption(v) => self.consumption.digital_consumption = v,
        }
    }

    /// Current value of `field`.
    pub fn get(&self, field: Field) -> Answer {
        let h = &self.housing;
        let m = &self.mobility;
        let n = &self.nutrition;
        let c = &self.consumption;
        match field {
            Field::HousingType => Answer::HousingType(h.housing_type),
            Field::HousingSizeSqm => Answer::HousingSizeSqm(h.housing_size_sqm),
            Field::HouseholdMembers => Answer::HouseholdMembers(h.household_members),
            Field::HeatingType => Answer::HeatingType(h.heating_type),
            Field::HeatingConsumptionKwh => {
                Answer::HeatingConsumptionKwh(h.heating_consumption_kwh)
            }
            Field::ElectricityKwh => Answer::ElectricityKwh(h.electricity_kwh),
            Field::GreenElectricity => Answer::GreenElectricity(h.green_electricity),
            Field::HasCar => Answer::HasCar(m.has_car),
            Field::CarFuelType => Answer::CarFuelType(m.car_fuel_type),
            Field::CarKmYear => Answer::CarKmYear(m.car_km_year),
            Field::CarConsumptionL100km => Answer::CarConsumptionL100km(m.car_consumption_l_100km),
            Field::PublicTransportKmYear => {
                Answer::PublicTransportKmYear(m.public_transport_km_year)
            }
            Field::BikeKmYear => Answer::BikeKmYear(m.bike_km_year),
            Field::FlightsShortHaul => Answer::FlightsShortHaul(m.flights_short_haul),
            Field::FlightsLongHaul => Answer::FlightsLongHaul(m.flights_long_haul),
            Field::DietType => Answer::DietType(n.diet_type),
            Field::RegionalSeasonal => Answer::RegionalSeasonal(n.regional_seasonal),
            Field::FoodWasteLevel => Answer::FoodWasteLevel(n.food_waste_level),
            Field::ShoppingFrequency => Answer::ShoppingFrequency(c.shopping_frequency),
            Field::SecondhandPreference => Answer::SecondhandPreference(c.secondhand_preference),
            Field::DigitalConsumption => Answer::DigitalConsumption(c.digital_consumption),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_field_name_round_trips() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
    }

    #[test]
    fn every_field_appears_in_serialized_category() {
        let json = serde_json::to_value(FootprintAnswers::default()).unwrap();
        for field in Field::ALL {
            let record = &json[field.category().name()];
            assert!(
                record.get(field.name()).is_some(),
                "{} missing from {} record",
                field,
                field.category().name()
            );
        }
    }

    #[test]
    fn category_field_counts_match_schema() {
        let counts: Vec<usize> = Category::ALL.iter().map(|c| c.fields().count()).collect();
        assert_eq!(counts, vec![7, 8, 3, 3]);
    }

    #[test]
    fn unknown_name_has_no_field() {
        assert_eq!(Field::from_name("housing_sqm"), None);
        assert_eq!(Field::from_name("HOUSING_TYPE"), None);
    }

    #[test]
    fn get_after_apply_returns_applied_value() {
        let mut answers = FootprintAnswers::default();
        answers.apply(Answer::DietType(DietType::Vegan));
        answers.apply(Answer::CarFuelType(Some(FuelType::Hybrid)));

        assert_eq!(answers.get(Field::DietType), Answer::DietType(DietType::Vegan));
        assert_eq!(answers.mobility.car_fuel_type, Some(FuelType::Hybrid));
    }

    #[test]
    fn slider_values_are_clamped() {
        assert_eq!(
            Answer::parse(Field::HousingSizeSqm, "5").unwrap(),
            Answer::HousingSizeSqm(20)
        );
        assert_eq!(
            Answer::parse(Field::FlightsLongHaul, "99").unwrap(),
            Answer::FlightsLongHaul(10)
        );
        assert_eq!(
            Answer::parse(Field::CarKmYear, "-300").unwrap(),
            Answer::CarKmYear(0)
        );
        assert_eq!(
            Answer::parse(Field::PublicTransportKmYear, "12_500").unwrap(),
            Answer::PublicTransportKmYear(12_500)
        );
    }

    #[test]
    fn toggles_accept_common_spellings() {
        assert_eq!(Answer::parse(Field::HasCar, "Yes").unwrap(), Answer::HasCar(true));
        assert_eq!(Answer::parse(Field::HasCar, "off").unwrap(), Answer::HasCar(false));
        assert!(matches!(
            Answer::parse(Field::HasCar, "maybe"),
            Err(FieldError::InvalidToggle { .. })
        ));
    }

    #[test]
    fn optional_numbers_accept_none() {
        assert_eq!(
            Answer::parse(Field::ElectricityKwh, "none").unwrap(),
            Answer::ElectricityKwh(None)
        );
        assert_eq!(
            Answer::parse(Field::CarConsumptionL100km, "6.5").unwrap(),
            Answer::CarConsumptionL100km(Some(6.5))
        );
        assert!(Answer::parse(Field::ElectricityKwh, "lots").is_err());
    }

    #[test]
    fn invalid_choice_lists_options() {
        let err = Answer::parse(Field::FoodWasteLevel, "extreme").unwrap_err();
        assert_eq!(
            err.to_string(),
            "'extreme' is not a valid choice for food_waste_level; \
             expected one of: low, medium, high"
        );
    }

    #[test]
    fn display_formats_values_for_view() {
        assert_eq!(Answer::GreenElectricity(true).to_string(), "yes");
        assert_eq!(Answer::CarFuelType(None).to_string(), "-");
        assert_eq!(Answer::DietType(DietType::MeatHeavy).to_string(), "meat_heavy");
    }
}
