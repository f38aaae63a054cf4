//! Last-used scenario cache, persisted across runs.
//!
//! Any load failure (missing file, malformed JSON, out-of-range fields) falls
//! back to the defaults; save failures are logged and never fatal.

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs;
use std::path::PathBuf;

use tuition_core::scenario::ScenarioState;

const CACHE_DIR: &str = "tuition-planner";
const CACHE_FILE: &str = "last_scenario.json";

fn cache_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CACHE_DIR).join(CACHE_FILE))
}

/// Same ranges the query-string decoder enforces.
fn in_range(state: &ScenarioState) -> bool {
    state.annual_cost >= Decimal::ZERO
        && state.growth_rate >= Decimal::ZERO
        && state.growth_rate <= Decimal::ONE
        && state.years > Decimal::ZERO
        && state.years <= dec!(10)
        && state.loan_apr >= Decimal::ZERO
        && state.loan_apr <= Decimal::ONE
        && state.term_years > Decimal::ZERO
        && state.term_years <= dec!(30)
}

/// Load the last-used scenario, or None when there is nothing usable.
pub fn load_last_scenario() -> Option<ScenarioState> {
    let path = cache_path()?;
    let contents = fs::read_to_string(&path).ok()?;

    match serde_json::from_str::<ScenarioState>(&contents) {
        Ok(state) if in_range(&state) => {
            debug!("loaded cached scenario from {}", path.display());
            Some(state)
        }
        Ok(_) => {
            warn!(
                "ignoring out-of-range scenario cache at {}",
                path.display()
            );
            None
        }
        Err(e) => {
            warn!("ignoring malformed scenario cache at {}: {}", path.display(), e);
            None
        }
    }
}

/// Persist the scenario as the new last-used default. Best effort.
pub fn save_last_scenario(state: &ScenarioState) {
    let Some(path) = cache_path() else {
        warn!("no config directory available; scenario not cached");
        return;
    };

    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(&path, json)
    };

    match write() {
        Ok(()) => debug!("cached scenario at {}", path.display()),
        Err(e) => warn!("failed to cache scenario at {}: {}", path.display(), e),
    }
}
