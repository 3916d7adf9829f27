// ============================================================================
// Product Matcher
// First catalog entry whose eligibility window admits the request
// ============================================================================

use crate::domain::{Product, SimulationRequest};
use crate::error::{SimulationError, SimulationResult};

/// Select the product a request is quoted under.
///
/// Linear scan in catalog order; the first entry that admits the request
/// wins. Entries missing a mandatory lower bound never match.
///
/// # Errors
/// `NoEligibleProduct` if no entry admits the request.
pub fn match_product<'a>(
    request: &SimulationRequest,
    catalog: &'a [Product],
) -> SimulationResult<&'a Product> {
    let product = catalog.iter().find(|p| p.admits(request)).ok_or(
        SimulationError::NoEligibleProduct {
            principal: request.principal,
            term_months: request.term_months,
        },
    )?;

    tracing::debug!(
        product = %product.code,
        principal = %request.principal,
        term_months = request.term_months,
        "Matched product"
    );
    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductCode;
    use quickcheck::quickcheck;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn single() -> Vec<Product> {
        vec![Product::new(1, "Personal credit", dec!(0.0179), 1, dec!(200))
            .with_max_term(60)
            .with_max_principal(dec!(50000))]
    }

    fn tiered() -> Vec<Product> {
        vec![
            Product::new(1, "Product 1", dec!(0.0179), 0, dec!(200))
                .with_max_term(24)
                .with_max_principal(dec!(10000)),
            Product::new(2, "Product 2", dec!(0.0175), 25, dec!(10000.01))
                .with_max_term(48)
                .with_max_principal(dec!(100000)),
            Product::new(3, "Product 3", dec!(0.0182), 49, dec!(100000.01))
                .with_max_term(96)
                .with_max_principal(dec!(1000000)),
            Product::new(4, "Product 4", dec!(0.0151), 97, dec!(1000000.01)),
        ]
    }

    #[test]
    fn test_match_inside_window() {
        let catalog = single();
        let product = match_product(&SimulationRequest::new(dec!(10000), 24), &catalog).unwrap();
        assert_eq!(product.code, ProductCode(1));
    }

    #[test]
    fn test_below_minimum_principal() {
        let catalog = single();
        let result = match_product(&SimulationRequest::new(dec!(100), 24), &catalog);
        assert_eq!(
            result,
            Err(SimulationError::NoEligibleProduct {
                principal: dec!(100),
                term_months: 24,
            })
        );
    }

    #[test]
    fn test_empty_catalog() {
        assert!(match_product(&SimulationRequest::new(dec!(10000), 24), &[]).is_err());
    }

    #[test]
    fn test_tiers() {
        let catalog = tiered();
        let code = |principal: Decimal, term: u32| {
            match_product(&SimulationRequest::new(principal, term), &catalog)
                .map(|p| p.code.0)
                .ok()
        };

        assert_eq!(code(dec!(900), 5), Some(1));
        assert_eq!(code(dec!(20000), 36), Some(2));
        assert_eq!(code(dec!(500000), 60), Some(3));
        assert_eq!(code(dec!(2000000), 120), Some(4));
        // principal fits product 1 but the term does not
        assert_eq!(code(dec!(900), 36), None);
    }

    #[test]
    fn test_first_match_wins() {
        let catalog = vec![
            Product::new(9, "Broad", dec!(0.03), 1, dec!(1)),
            Product::new(1, "Narrow", dec!(0.01), 1, dec!(1)).with_max_term(12),
        ];
        let product = match_product(&SimulationRequest::new(dec!(100), 6), &catalog).unwrap();
        assert_eq!(product.code, ProductCode(9));
    }

    #[test]
    fn test_skips_product_missing_bounds() {
        let mut broken = Product::new(1, "Broken", dec!(0.01), 1, dec!(1));
        broken.min_principal = None;
        let catalog = vec![broken, Product::new(2, "Fallback", dec!(0.02), 1, dec!(1))];

        let product = match_product(&SimulationRequest::new(dec!(100), 6), &catalog).unwrap();
        assert_eq!(product.code, ProductCode(2));
    }

    quickcheck! {
        fn prop_match_is_admitted(cents: u32, term: u8) -> bool {
            let request = SimulationRequest::new(Decimal::new(i64::from(cents), 2), u32::from(term));
            let catalog = tiered();
            match match_product(&request, &catalog) {
                Ok(product) => product.admits(&request),
                Err(_) => catalog.iter().all(|p| !p.admits(&request)),
            }
        }

        fn prop_match_is_first_admitting(cents: u32, term: u8) -> bool {
            let request = SimulationRequest::new(Decimal::new(i64::from(cents), 2), u32::from(term));
            let catalog = tiered();
            let first = catalog.iter().position(|p| p.admits(&request));
            let matched = match_product(&request, &catalog)
                .ok()
                .and_then(|m| catalog.iter().position(|p| p.code == m.code));
            first == matched
        }
    }
}
