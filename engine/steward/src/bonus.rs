//! Bonus and penalty events attached to a session result.

use crate::error::{Result, StewardError};
use crate::types::SessionKind;
use serde::{Deserialize, Serialize};

/// Bonus events recorded for one competitor in one session.
///
/// Race sessions admit every field. Practice and qualifying only admit
/// `caused_red_flag`; every other field must be left at its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusSet {
    /// Positions gained on the opening start (negative when positions were lost).
    pub positions_gained_at_start: i32,
    pub clean_overtakes: u32,
    pub net_positions_lost: u32,
    pub fastest_lap: bool,
    pub caused_vsc: bool,
    pub caused_sc: bool,
    pub caused_red_flag: bool,
    pub dnf_driver_error: bool,
    pub dnf_no_fault: bool,
}

impl BonusSet {
    /// Reject fields that are not valid for the given session kind.
    pub fn validate_for(&self, kind: SessionKind) -> Result<()> {
        if kind == SessionKind::Race {
            return Ok(());
        }
        let reject = |field: &'static str| Err(StewardError::BonusNotApplicable { field, kind });
        if self.positions_gained_at_start != 0 {
            return reject("positions_gained_at_start");
        }
        if self.clean_overtakes != 0 {
            return reject("clean_overtakes");
        }
        if self.net_positions_lost != 0 {
            return reject("net_positions_lost");
        }
        if self.fastest_lap {
            return reject("fastest_lap");
        }
        if self.caused_vsc {
            return reject("caused_vsc");
        }
        if self.caused_sc {
            return reject("caused_sc");
        }
        if self.dnf_driver_error {
            return reject("dnf_driver_error");
        }
        if self.dnf_no_fault {
            return reject("dnf_no_fault");
        }
        Ok(())
    }
}
