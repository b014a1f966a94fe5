use crate::config::FEATURE_COUNT;
use crate::types::RawCarInput;

/// Model input in `FEATURE_COLUMNS` order:
/// `[brand, year, km_driven, fuel, seller_type, transmission, owner, mileage, engine, max_power, seats]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Encode categoricals and pass numerics through unchanged.
    pub fn build(input: &RawCarInput) -> Self {
        Self([
            f64::from(input.brand.code()),
            f64::from(input.year),
            f64::from(input.km_driven),
            f64::from(input.fuel.code()),
            f64::from(input.seller_type.code()),
            f64::from(input.transmission.code()),
            f64::from(input.owner.code()),
            input.mileage,
            input.engine,
            input.max_power,
            f64::from(input.seats),
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Brand, FuelType, OwnerType, SellerType, Transmission};
    use crate::types::fixtures::maruti_input;

    #[test]
    fn maruti_example_encodes_in_column_order() {
        let v = FeatureVector::build(&maruti_input());
        assert_eq!(
            v.0,
            [1.0, 2015.0, 50000.0, 4.0, 2.0, 0.0, 5.0, 20.0, 1500.0, 100.0, 5.0]
        );
    }

    #[test]
    fn every_category_combination_lands_in_its_column() {
        let base = maruti_input();
        for &brand in Brand::ALL {
            for &fuel in FuelType::ALL {
                for &seller_type in SellerType::ALL {
                    for &transmission in Transmission::ALL {
                        for &owner in OwnerType::ALL {
                            let input = RawCarInput {
                                brand,
                                fuel,
                                seller_type,
                                transmission,
                                owner,
                                ..base
                            };
                            let v = FeatureVector::build(&input);
                            assert_eq!(v.as_slice().len(), FEATURE_COUNT);
                            assert_eq!(v.0[0], f64::from(brand.code()));
                            assert_eq!(v.0[1], 2015.0);
                            assert_eq!(v.0[2], 50000.0);
                            assert_eq!(v.0[3], f64::from(fuel.code()));
                            assert_eq!(v.0[4], f64::from(seller_type.code()));
                            assert_eq!(v.0[5], f64::from(transmission.code()));
                            assert_eq!(v.0[6], f64::from(owner.code()));
                            assert_eq!(&v.0[7..], &[20.0, 1500.0, 100.0, 5.0]);
                        }
                    }
                }
            }
        }
    }
}
