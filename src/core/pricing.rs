//! Cost and price computation for tracked products.
//!
//! These functions are the live preview behind the product form: they are
//! pure, synchronous, and total over their input domain. Non-finite inputs
//! (the Rust analogue of a half-typed number in a form field) degrade to
//! zero-valued terms, and the final cost is floored at zero, so a preview
//! can never fail - at worst it shows a wrong suggestion the user overrides.

/// Electricity price used for the energy term, in $/kWh.
pub const ELECTRICITY_RATE: f64 = 0.12;

/// Default target margin applied on top of cost for the retail suggestion.
pub const DEFAULT_MARGIN: f64 = 0.45;

/// Default discount off the retail price for the reseller suggestion.
pub const DEFAULT_RESELLER_DISCOUNT: f64 = 0.30;

/// Cost inputs for a 3D-printed product.
///
/// Defaults mirror the blank product form: a typical small print.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintBuild {
    /// Grams of filament consumed per unit
    pub grams_used: f64,
    /// Spool cost per kilogram
    pub spool_cost_per_kg: f64,
    /// Print time per unit, in hours
    pub print_hours: f64,
    /// Machine rate in $/h
    pub machine_rate: f64,
    /// Labor rate in $/h
    pub labor_rate: f64,
    /// Electricity consumed per unit, in kWh
    pub energy_kwh: f64,
}

impl Default for PrintBuild {
    fn default() -> Self {
        Self {
            grams_used: 120.0,
            spool_cost_per_kg: 25.0,
            print_hours: 3.0,
            machine_rate: 2.0,
            labor_rate: 0.0,
            energy_kwh: 0.0,
        }
    }
}

/// Cost inputs for a supplier-ordered product.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierBuild {
    /// Supplier unit cost
    pub unit_cost: f64,
    /// Import fees per unit
    pub import_per_unit: f64,
    /// Customization cost per unit
    pub customization_cost: f64,
}

impl Default for SupplierBuild {
    fn default() -> Self {
        Self {
            unit_cost: 20.0,
            import_per_unit: 2.5,
            customization_cost: 0.0,
        }
    }
}

/// Kind-specific cost inputs for a product.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildParams {
    /// Printed in-house
    Printed(PrintBuild),
    /// Ordered from a supplier
    Ordered(SupplierBuild),
}

/// NaN and infinities count as zero, never as errors.
fn term(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Filament cost per unit: `(grams / 1000) * spool cost per kg`.
#[must_use]
pub fn material_cost(build: &PrintBuild) -> f64 {
    (term(build.grams_used) / 1000.0) * term(build.spool_cost_per_kg)
}

/// Machine and labor cost per unit: `hours * (machine rate + labor rate)`.
#[must_use]
pub fn time_cost(build: &PrintBuild) -> f64 {
    term(build.print_hours) * (term(build.machine_rate) + term(build.labor_rate))
}

/// Electricity cost per unit at the configured [`ELECTRICITY_RATE`].
#[must_use]
pub fn energy_cost(build: &PrintBuild) -> f64 {
    term(build.energy_kwh) * ELECTRICITY_RATE
}

/// Computes the unit cost of a product from its build parameters.
///
/// Printed: material + time + energy. Ordered: unit + import + customization.
/// The total is floored at zero; individual terms are not clamped, so a
/// negative term can still offset a positive one before the floor applies.
#[must_use]
pub fn compute_cost(build: &BuildParams) -> f64 {
    let total = match build {
        BuildParams::Printed(print) => {
            material_cost(print) + time_cost(print) + energy_cost(print)
        }
        BuildParams::Ordered(order) => {
            term(order.unit_cost) + term(order.import_per_unit) + term(order.customization_cost)
        }
    };
    total.max(0.0)
}

/// Suggested retail price: `cost * (1 + margin)`.
#[must_use]
pub fn suggested_retail(cost: f64, margin: f64) -> f64 {
    term(cost) * (1.0 + term(margin))
}

/// Suggested reseller price: `retail * (1 - discount)`.
#[must_use]
pub fn suggested_reseller(retail: f64, discount: f64) -> f64 {
    term(retail) * (1.0 - term(discount))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    fn printed(build: PrintBuild) -> BuildParams {
        BuildParams::Printed(build)
    }

    fn ordered(build: SupplierBuild) -> BuildParams {
        BuildParams::Ordered(build)
    }

    #[test]
    fn test_printed_cost_reference_values() {
        // (120/1000)*25 + 3*(2+0) + 0 = 3 + 6 = 9
        let cost = compute_cost(&printed(PrintBuild {
            grams_used: 120.0,
            spool_cost_per_kg: 25.0,
            print_hours: 3.0,
            machine_rate: 2.0,
            labor_rate: 0.0,
            energy_kwh: 0.0,
        }));
        assert!((cost - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_ordered_cost_reference_values() {
        let cost = compute_cost(&ordered(SupplierBuild {
            unit_cost: 20.0,
            import_per_unit: 2.5,
            customization_cost: 0.0,
        }));
        assert_eq!(cost, 22.5);
    }

    #[test]
    fn test_energy_term_uses_electricity_rate() {
        let base = PrintBuild {
            grams_used: 0.0,
            spool_cost_per_kg: 0.0,
            print_hours: 0.0,
            machine_rate: 0.0,
            labor_rate: 0.0,
            energy_kwh: 10.0,
        };
        assert!((compute_cost(&printed(base)) - 10.0 * ELECTRICITY_RATE).abs() < 1e-9);
    }

    #[test]
    fn test_negative_total_clamps_to_zero() {
        let cost = compute_cost(&ordered(SupplierBuild {
            unit_cost: -50.0,
            import_per_unit: 2.5,
            customization_cost: 0.0,
        }));
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_negative_term_offsets_before_clamp() {
        // -5 + 20 = 15: the negative term is kept, only the total is floored
        let cost = compute_cost(&ordered(SupplierBuild {
            unit_cost: -5.0,
            import_per_unit: 20.0,
            customization_cost: 0.0,
        }));
        assert_eq!(cost, 15.0);
    }

    #[test]
    fn test_non_finite_inputs_count_as_zero() {
        let cost = compute_cost(&ordered(SupplierBuild {
            unit_cost: f64::NAN,
            import_per_unit: f64::INFINITY,
            customization_cost: 7.0,
        }));
        assert_eq!(cost, 7.0);

        let cost = compute_cost(&printed(PrintBuild {
            grams_used: f64::NAN,
            spool_cost_per_kg: 25.0,
            print_hours: 2.0,
            machine_rate: 1.0,
            labor_rate: 0.0,
            energy_kwh: 0.0,
        }));
        assert!((cost - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_cost_is_monotone_in_each_parameter() {
        let base = PrintBuild::default();
        let base_cost = compute_cost(&printed(base.clone()));

        let mut more_grams = base.clone();
        more_grams.grams_used += 50.0;
        assert!(compute_cost(&printed(more_grams)) >= base_cost);

        let mut more_hours = base.clone();
        more_hours.print_hours += 1.0;
        assert!(compute_cost(&printed(more_hours)) >= base_cost);

        let mut more_energy = base;
        more_energy.energy_kwh += 1.0;
        assert!(compute_cost(&printed(more_energy)) >= base_cost);
    }

    #[test]
    fn test_cost_is_deterministic() {
        let build = printed(PrintBuild::default());
        assert_eq!(compute_cost(&build), compute_cost(&build));
    }

    #[test]
    fn test_suggested_prices() {
        let retail = suggested_retail(10.0, DEFAULT_MARGIN);
        assert!((retail - 14.5).abs() < 1e-9);

        let reseller = suggested_reseller(retail, DEFAULT_RESELLER_DISCOUNT);
        assert!((reseller - 10.15).abs() < 1e-9);

        // Degenerate inputs degrade to zero rather than propagating NaN
        assert_eq!(suggested_retail(f64::NAN, 0.45), 0.0);
    }
}
