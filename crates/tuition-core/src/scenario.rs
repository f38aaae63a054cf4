//! Shareable scenario state and its query-string codec.
//!
//! The five scalar inputs round-trip through a fixed-key query string
//! (`cost`, `growth`, `years`, `apr`, `term`) so a scenario can be shared as
//! a URL or persisted in a local cache. Percentages are stored x100 with one
//! decimal place. Invalid or out-of-range values are silently dropped on
//! decode, falling back to the defaults.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::amortization::LoanInput;
use crate::projection::ProjectionInput;
use crate::types::{Money, Rate, Years};

/// The five shareable calculator inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioState {
    pub annual_cost: Money,
    pub growth_rate: Rate,
    pub years: Years,
    pub loan_apr: Rate,
    pub term_years: Years,
}

impl Default for ScenarioState {
    fn default() -> Self {
        ScenarioState {
            annual_cost: dec!(15000),
            growth_rate: dec!(0.04),
            years: dec!(4),
            loan_apr: dec!(0.065),
            term_years: dec!(10),
        }
    }
}

impl ScenarioState {
    pub fn projection(&self) -> ProjectionInput {
        ProjectionInput {
            annual_cost: self.annual_cost,
            growth_rate: self.growth_rate,
            years: self.years,
        }
    }

    pub fn loan(&self) -> LoanInput {
        LoanInput {
            apr: self.loan_apr,
            term_years: self.term_years,
        }
    }
}

/// Encode a scenario as a query string with fixed keys.
pub fn encode_query(state: &ScenarioState) -> String {
    format!(
        "cost={:.0}&growth={:.1}&years={:.1}&apr={:.1}&term={:.0}",
        state.annual_cost,
        state.growth_rate * dec!(100),
        state.years,
        state.loan_apr * dec!(100),
        state.term_years,
    )
}

/// Decode a query string over the defaults.
pub fn decode_query(query: &str) -> ScenarioState {
    let mut state = ScenarioState::default();
    apply_query(&mut state, query);
    state
}

/// Layer decoded values over an existing state. Unknown keys are ignored;
/// unparsable or out-of-range values are dropped without touching the state.
pub fn apply_query(state: &mut ScenarioState, query: &str) {
    for pair in query.trim_start_matches('?').split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let Ok(parsed) = Decimal::from_str(value) else {
            continue;
        };
        match key {
            "cost" if parsed >= Decimal::ZERO => state.annual_cost = parsed,
            "growth" => {
                let rate = parsed / dec!(100);
                if rate >= Decimal::ZERO && rate <= Decimal::ONE {
                    state.growth_rate = rate;
                }
            }
            "years" if parsed > Decimal::ZERO && parsed <= dec!(10) => state.years = parsed,
            "apr" => {
                let rate = parsed / dec!(100);
                if rate >= Decimal::ZERO && rate <= Decimal::ONE {
                    state.loan_apr = rate;
                }
            }
            "term" if parsed > Decimal::ZERO && parsed <= dec!(30) => state.term_years = parsed,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_defaults() {
        let encoded = encode_query(&ScenarioState::default());
        assert_eq!(encoded, "cost=15000&growth=4.0&years=4.0&apr=6.5&term=10");
    }

    #[test]
    fn test_defaults_round_trip() {
        let state = ScenarioState::default();
        assert_eq!(decode_query(&encode_query(&state)), state);
    }

    #[test]
    fn test_decode_with_leading_question_mark() {
        let state = decode_query("?cost=20000&term=15");
        assert_eq!(state.annual_cost, dec!(20000));
        assert_eq!(state.term_years, dec!(15));
        assert_eq!(state.growth_rate, dec!(0.04));
    }

    #[test]
    fn test_out_of_range_values_dropped() {
        // growth 150% and years 0 fall back to defaults; cost is kept.
        let state = decode_query("cost=18000&growth=150&years=0&term=45");
        assert_eq!(state.annual_cost, dec!(18000));
        assert_eq!(state.growth_rate, dec!(0.04));
        assert_eq!(state.years, dec!(4));
        assert_eq!(state.term_years, dec!(10));
    }

    #[test]
    fn test_garbage_values_dropped() {
        let state = decode_query("cost=abc&growth=&apr=6.5");
        assert_eq!(state.annual_cost, dec!(15000));
        assert_eq!(state.loan_apr, dec!(0.065));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let state = decode_query("cost=12000&theme=dark");
        assert_eq!(state.annual_cost, dec!(12000));
    }

    #[test]
    fn test_negative_cost_dropped() {
        let state = decode_query("cost=-100");
        assert_eq!(state.annual_cost, dec!(15000));
    }

    #[test]
    fn test_fractional_years_kept() {
        let state = decode_query("years=3.5");
        assert_eq!(state.years, dec!(3.5));
    }

    #[test]
    fn test_apply_layers_over_existing_state() {
        let mut state = ScenarioState::default();
        state.annual_cost = dec!(22000);
        apply_query(&mut state, "growth=5.0");
        assert_eq!(state.annual_cost, dec!(22000));
        assert_eq!(state.growth_rate, dec!(0.05));
    }
}
