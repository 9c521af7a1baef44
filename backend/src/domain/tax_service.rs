//! IRPF simulation logic.
//!
//! Applies the 2024 annual progressive table to a net base of income
//! minus deductible expenses. This is a planning estimate, not a
//! filing calculation.

use shared::TaxAssessment;

/// One row of the progressive table: upper limit of the bracket, the
/// marginal rate and the standard deduction ("parcela a deduzir").
struct TaxBracket {
    limit: f64,
    rate: f64,
    deduction: f64,
}

/// IRPF 2024 annual table.
const IRPF_2024: [TaxBracket; 5] = [
    TaxBracket { limit: 28559.70, rate: 0.0, deduction: 0.0 },
    TaxBracket { limit: 33919.80, rate: 0.075, deduction: 2141.98 },
    TaxBracket { limit: 45012.60, rate: 0.15, deduction: 4685.96 },
    TaxBracket { limit: 55976.16, rate: 0.225, deduction: 8066.91 },
    TaxBracket { limit: f64::INFINITY, rate: 0.275, deduction: 10865.72 },
];

/// Tax service that evaluates the progressive IRPF table
#[derive(Clone)]
pub struct TaxService {
    // No internal state needed for now
}

impl TaxService {
    /// Create a new TaxService instance
    pub fn new() -> Self {
        Self {}
    }

    /// Assess annual IRPF for a gross income and deductible expenses
    ///
    /// Non-positive income short-circuits to an all-zero assessment.
    /// The base is floored at zero, the computed tax is floored at
    /// zero, and the effective rate is tax over gross income.
    pub fn assess(&self, annual_income: f64, deductible_expenses: f64) -> TaxAssessment {
        if annual_income <= 0.0 {
            return TaxAssessment {
                base: 0.0,
                bracket_rate: 0.0,
                deduction: 0.0,
                tax_due: 0.0,
                effective_rate: 0.0,
            };
        }

        let base = (annual_income - deductible_expenses).max(0.0);
        let bracket = Self::bracket_for(base);
        let tax_due = (base * bracket.rate - bracket.deduction).max(0.0);
        let effective_rate = tax_due / annual_income * 100.0;

        TaxAssessment {
            base,
            bracket_rate: bracket.rate * 100.0,
            deduction: bracket.deduction,
            tax_due,
            effective_rate,
        }
    }

    fn bracket_for(base: f64) -> &'static TaxBracket {
        // The last bracket is unbounded, so the loop always finds one.
        IRPF_2024
            .iter()
            .find(|b| base <= b.limit)
            .unwrap_or(&IRPF_2024[4])
    }
}

impl Default for TaxService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.01,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_reference_case() {
        let service = TaxService::new();
        let assessment = service.assess(60000.0, 5000.0);

        assert_close(assessment.base, 55000.0);
        assert_close(assessment.bracket_rate, 22.5);
        assert_close(assessment.deduction, 8066.91);
        assert_close(assessment.tax_due, 4308.09);
        assert_close(assessment.effective_rate, 4308.09 / 60000.0 * 100.0);
    }

    #[test]
    fn test_exempt_band() {
        let service = TaxService::new();
        let assessment = service.assess(28000.0, 0.0);

        assert_close(assessment.bracket_rate, 0.0);
        assert_close(assessment.tax_due, 0.0);
        assert_close(assessment.effective_rate, 0.0);
    }

    #[test]
    fn test_bracket_boundary_is_inclusive() {
        let service = TaxService::new();

        let at_limit = service.assess(28559.70, 0.0);
        assert_close(at_limit.bracket_rate, 0.0);

        let just_over = service.assess(28559.71, 0.0);
        assert_close(just_over.bracket_rate, 7.5);
    }

    #[test]
    fn test_top_bracket() {
        let service = TaxService::new();
        let assessment = service.assess(120000.0, 0.0);

        assert_close(assessment.bracket_rate, 27.5);
        assert_close(assessment.tax_due, 120000.0 * 0.275 - 10865.72);
    }

    #[test]
    fn test_non_positive_income_short_circuits() {
        let service = TaxService::new();

        let zero = service.assess(0.0, 1000.0);
        assert_eq!(zero.tax_due, 0.0);
        assert_eq!(zero.effective_rate, 0.0);

        let negative = service.assess(-500.0, 0.0);
        assert_eq!(negative.base, 0.0);
        assert_eq!(negative.tax_due, 0.0);
    }

    #[test]
    fn test_deductions_can_floor_base_at_zero() {
        let service = TaxService::new();
        let assessment = service.assess(10000.0, 50000.0);

        assert_eq!(assessment.base, 0.0);
        assert_eq!(assessment.tax_due, 0.0);
    }

    #[test]
    fn test_tax_never_negative_near_bracket_floor() {
        let service = TaxService::new();
        // Just above the exempt limit the formula base*rate - deduction
        // goes slightly negative without the floor.
        let assessment = service.assess(28559.71, 0.0);
        assert!(assessment.tax_due >= 0.0);
    }
}
