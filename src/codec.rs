//! Categorical value → integer code tables the model was fitted with.
//!
//! Each categorical field is an enum whose discriminant *is* the model code,
//! so a typed value always encodes. Strings coming from a form are parsed
//! with `FromStr`, which rejects anything outside the table.

use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result};

macro_rules! category {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($field:literal) {
            $( $variant:ident = $code:literal => $label:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $( $variant = $code, )+
        }

        impl $name {
            /// Every value, in table order.
            pub const ALL: &'static [$name] = &[$( $name::$variant, )+];

            /// Model code for this value.
            pub fn code(self) -> u8 {
                self as u8
            }

            /// Label as it appears in the historical dataset.
            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim() {
                    $( $label $(| $alias)* => Ok($name::$variant), )+
                    other => Err(AppError::UnknownCategory {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.label())
            }
        }
    };
}

category! {
    /// Manufacturer, taken from the first word of a listing name.
    pub enum Brand ("brand") {
        Maruti = 1 => "Maruti",
        Skoda = 2 => "Skoda",
        Honda = 3 => "Honda",
        Hyundai = 4 => "Hyundai",
        Toyota = 5 => "Toyota",
        Ford = 6 => "Ford",
        Renault = 7 => "Renault",
        Mahindra = 8 => "Mahindra",
        Tata = 9 => "Tata",
        Chevrolet = 10 => "Chevrolet",
        Datsun = 11 => "Datsun",
        Jeep = 12 => "Jeep",
        MercedesBenz = 13 => "Mercedes-Benz",
        Mitsubishi = 14 => "Mitsubishi",
        Audi = 15 => "Audi",
        Volkswagen = 16 => "Volkswagen",
        Bmw = 17 => "BMW",
        Nissan = 18 => "Nissan",
        Lexus = 19 => "Lexus",
        Jaguar = 20 => "Jaguar",
        // "Land Rover" listings are truncated to their first word.
        Land = 21 => "Land",
        Mg = 22 => "MG",
        Volvo = 23 => "Volvo",
        Daewoo = 24 => "Daewoo",
        Kia = 25 => "Kia",
        Fiat = 26 => "Fiat",
        Force = 27 => "Force",
        Ambassador = 28 => "Ambassador",
        Ashok = 29 => "Ashok",
        Isuzu = 30 => "Isuzu",
        Opel = 31 => "Opel",
    }
}

category! {
    pub enum FuelType ("fuel") {
        Diesel = 4 => "Diesel",
        Petrol = 3 => "Petrol",
        Lpg = 2 => "LPG",
        Cng = 1 => "CNG",
    }
}

category! {
    pub enum SellerType ("seller_type") {
        Individual = 2 => "Individual",
        Dealer = 1 => "Dealer",
        TrustmarkDealer = 3 => "Trustmark Dealer" | "TrustmarkDealer",
    }
}

category! {
    pub enum Transmission ("transmission") {
        Manual = 0 => "Manual",
        Automatic = 1 => "Automatic",
    }
}

category! {
    /// Ownership history. Codes are not ordinal: test-drive cars sit between
    /// second and third owners.
    pub enum OwnerType ("owner") {
        FirstOwner = 5 => "First Owner" | "FirstOwner",
        SecondOwner = 4 => "Second Owner" | "SecondOwner",
        ThirdOwner = 2 => "Third Owner" | "ThirdOwner",
        FourthAndAboveOwner = 1 => "Fourth & Above Owner" | "FourthAndAboveOwner",
        TestDriveCar = 3 => "Test Drive Car" | "TestDriveCar",
    }
}

pub fn encode_brand(name: &str) -> Result<u8> {
    Ok(name.parse::<Brand>()?.code())
}

pub fn encode_fuel(fuel: &str) -> Result<u8> {
    Ok(fuel.parse::<FuelType>()?.code())
}

pub fn encode_seller(seller: &str) -> Result<u8> {
    Ok(seller.parse::<SellerType>()?.code())
}

pub fn encode_transmission(transmission: &str) -> Result<u8> {
    Ok(transmission.parse::<Transmission>()?.code())
}

pub fn encode_owner(owner: &str) -> Result<u8> {
    Ok(owner.parse::<OwnerType>()?.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_codes_are_sequential_in_table_order() {
        assert_eq!(Brand::ALL.len(), 31);
        for (i, brand) in Brand::ALL.iter().enumerate() {
            assert_eq!(brand.code() as usize, i + 1, "{brand}");
        }
    }

    #[test]
    fn documented_spot_checks() {
        assert_eq!(encode_brand("Maruti").unwrap(), 1);
        assert_eq!(encode_brand("Mercedes-Benz").unwrap(), 13);
        assert_eq!(encode_brand("Opel").unwrap(), 31);
        assert_eq!(encode_fuel("CNG").unwrap(), 1);
        assert_eq!(encode_fuel("Diesel").unwrap(), 4);
        assert_eq!(encode_owner("Test Drive Car").unwrap(), 3);
        assert_eq!(encode_owner("TestDriveCar").unwrap(), 3);
    }

    #[test]
    fn seller_table() {
        assert_eq!(encode_seller("Individual").unwrap(), 2);
        assert_eq!(encode_seller("Dealer").unwrap(), 1);
        assert_eq!(encode_seller("Trustmark Dealer").unwrap(), 3);
        assert_eq!(encode_seller("TrustmarkDealer").unwrap(), 3);
    }

    #[test]
    fn transmission_table() {
        assert_eq!(encode_transmission("Manual").unwrap(), 0);
        assert_eq!(encode_transmission("Automatic").unwrap(), 1);
    }

    #[test]
    fn owner_table() {
        assert_eq!(encode_owner("First Owner").unwrap(), 5);
        assert_eq!(encode_owner("Second Owner").unwrap(), 4);
        assert_eq!(encode_owner("Third Owner").unwrap(), 2);
        assert_eq!(encode_owner("Fourth & Above Owner").unwrap(), 1);
    }

    #[test]
    fn labels_parse_back_to_the_same_value() {
        for brand in Brand::ALL {
            assert_eq!(brand.label().parse::<Brand>().unwrap(), *brand);
        }
        for owner in OwnerType::ALL {
            assert_eq!(owner.to_string().parse::<OwnerType>().unwrap(), *owner);
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(encode_brand("  Honda ").unwrap(), 3);
    }

    #[test]
    fn unknown_values_are_rejected() {
        match encode_brand("Tesla") {
            Err(AppError::UnknownCategory { field, value }) => {
                assert_eq!(field, "brand");
                assert_eq!(value, "Tesla");
            }
            other => panic!("expected UnknownCategory, got {other:?}"),
        }
        assert!(encode_brand("maruti").is_err());
        assert!(encode_fuel("Electric").is_err());
        assert!(encode_seller("").is_err());
        assert!(matches!(
            encode_owner("Fifth Owner"),
            Err(AppError::UnknownCategory { field: "owner", .. })
        ));
    }
}
