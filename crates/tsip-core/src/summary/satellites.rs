use std::collections::BTreeMap;

use crate::protocols::tsip::SignalLevel;

use super::SatelliteSummary;

#[derive(Debug, Default, Clone, Copy)]
struct SatelliteState {
    level: f32,
    locked: bool,
    elevation: f32,
    azimuth: f32,
}

/// Per-PRN merge of signal and position readings.
///
/// Zero readings carry no information: a zero level leaves level and lock
/// untouched, and a zero elevation with zero azimuth leaves the position.
#[derive(Debug, Default)]
pub(crate) struct SatelliteTable {
    states: BTreeMap<u8, SatelliteState>,
}

impl SatelliteTable {
    pub(crate) fn record_signal(&mut self, prn: u8, signal: SignalLevel) {
        self.record(prn, signal, 0.0, 0.0);
    }

    pub(crate) fn record(&mut self, prn: u8, signal: SignalLevel, elevation: f32, azimuth: f32) {
        let state = self.states.entry(prn).or_default();
        if signal.level() != 0.0 {
            state.level = signal.level();
            state.locked = signal.locked();
        }
        if elevation != 0.0 || azimuth != 0.0 {
            state.elevation = elevation;
            state.azimuth = azimuth;
        }
    }

    pub(crate) fn summaries(&self) -> Vec<SatelliteSummary> {
        self.states
            .iter()
            .map(|(&prn, state)| {
                let has_position = state.elevation != 0.0 || state.azimuth != 0.0;
                SatelliteSummary {
                    prn,
                    level: state.level,
                    locked: state.locked,
                    elevation: has_position.then_some(state.elevation),
                    azimuth: has_position.then_some(state.azimuth),
                }
            })
            .collect()
    }
}
