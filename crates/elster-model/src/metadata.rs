//! Per-signal display metadata for home-automation discovery.
//!
//! Each actively polled signal carries metadata describing how it should be
//! published: entity component, device class, unit, state class, and icon.
//! Signals on the blacklist are internal diagnostics and must never be
//! annotated or rewritten.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Display metadata for one signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalMetadata {
    /// Curated friendly name shown in the UI.
    pub friendly_name: String,

    /// Entity component ("sensor" or "binary_sensor").
    pub component: String,

    /// Device class (e.g. "temperature", "energy"); empty when none applies.
    pub device_class: String,

    /// Unit of measurement (e.g. "°C", "Wh"); empty when dimensionless.
    pub unit: String,

    /// State class ("measurement", "total_increasing"); empty when none.
    pub state_class: String,

    /// Material Design icon identifier (e.g. "mdi:thermometer").
    pub icon: String,
}

impl SignalMetadata {
    fn new(
        friendly_name: &str,
        component: &str,
        device_class: &str,
        unit: &str,
        state_class: &str,
        icon: &str,
    ) -> Self {
        Self {
            friendly_name: friendly_name.to_string(),
            component: component.to_string(),
            device_class: device_class.to_string(),
            unit: unit.to_string(),
            state_class: state_class.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Registry of curated metadata and the signal blacklist.
#[derive(Debug, Clone, Default)]
pub struct MetadataRegistry {
    metadata: BTreeMap<String, SignalMetadata>,
    blacklist: BTreeSet<String>,
}

impl MetadataRegistry {
    /// Registry with the curated entries for the actively polled signals
    /// and the blacklist of internal diagnostics.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for name in BLACKLISTED_SIGNALS {
            registry.blacklist.insert((*name).to_string());
        }
        for (name, meta) in builtin_metadata() {
            registry.metadata.insert(name.to_string(), meta);
        }
        registry
    }

    /// Look up curated metadata for a signal.
    pub fn get(&self, signal_name: &str) -> Option<&SignalMetadata> {
        self.metadata.get(signal_name)
    }

    /// True when the signal is blacklisted and must not be rewritten.
    pub fn is_blacklisted(&self, signal_name: &str) -> bool {
        self.blacklist.contains(signal_name)
    }

    /// Number of curated metadata entries.
    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    /// True when no curated entries are present.
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }
}

/// Signals excluded from annotation (internal diagnostics, raw memory views,
/// and counters already covered by aggregate signals).
const BLACKLISTED_SIGNALS: &[&str] = &[
    "ACCESS_EEPROM",
    "ANFAHRENT",
    "GERAETE_ID",
    "GERAETEKONFIGURATION",
    "HARDWARE_NUMMER",
    "INDEX_NOT_FOUND",
    "INITIALISIERUNG",
    "PARAMETERSATZ",
    "QUELLENPUMPEN_STATUS",
    "ZWISCHENEINSPRITZUNG_ISTTEMP",
    "BUSKONFIGURATION",
    "BUSKONTROLLE",
    "SOFTWARE_NUMMER",
    "SOFTWARE_VERSION",
    "SPEICHERBEDARF",
    "FATAL_ERROR",
    "FEHLER_PARAMETERSATZ_IWS",
    "FEHLERMELDUNG",
    "K_OS_RMX_RESERVE_INFO3",
    "SCHALTFKT_IWS",
    "SOLAR_KOLLEKTOR_3_I_ANTEIL",
    "STUETZSTELLE_ND1",
    "STUETZSTELLE_ND2",
    "STUETZSTELLE_HD1",
    "STUETZSTELLE_HD2",
    "LZ_VERD_1_HEIZBETRIEB",
    "LZ_VERD_2_HEIZBETRIEB",
    "LZ_VERD_1_2_HEIZBETRIEB",
    "LZ_VERD_1_WW_BETRIEB",
    "LZ_VERD_2_WW_BETRIEB",
    "LZ_VERD_1_2_WW_BETRIEB",
    "LZ_VERD_1_KUEHLBETRIEB",
    "LZ_VERD_2_KUEHLBETRIEB",
    "LZ_VERD_1_2_KUEHLBETRIEB",
    "LAUFZEIT_VERD_BEI_SPEICHERBEDARF",
    "SAMMEL_RELAISSTATUS",
    "LUEFT_PASSIVKUEHLUNG_UEBER_FORTLUEFTER",
    "TEMPORALE_LUEFTUNGSSTUFE_DAUER",
    "TEILVORRANG_WW",
];

#[rustfmt::skip]
fn builtin_metadata() -> Vec<(&'static str, SignalMetadata)> {
    let m = SignalMetadata::new;
    vec![
        // Date/time
        ("JAHR", m("Jahr", "sensor", "", "", "", "mdi:calendar")),
        ("MONAT", m("Monat", "sensor", "", "", "", "mdi:calendar-month")),
        ("TAG", m("Tag", "sensor", "", "", "", "mdi:calendar-today")),
        ("STUNDE", m("Stunde", "sensor", "", "h", "", "mdi:clock-outline")),
        ("MINUTE", m("Minute", "sensor", "", "min", "", "mdi:clock-outline")),
        ("SEKUNDE", m("Sekunde", "sensor", "", "s", "", "mdi:clock-outline")),
        // Status
        ("WP_STATUS", m("WP Status", "sensor", "", "", "", "mdi:heat-pump")),
        ("EVU_SPERRE_AKTIV", m("EVU Sperre Aktiv", "binary_sensor", "lock", "", "", "mdi:lock")),
        ("ABTAUUNGAKTIV", m("Abtauung Aktiv", "binary_sensor", "", "", "", "mdi:snowflake-melt")),
        ("BETRIEBSART_WP", m("Betriebsart WP", "sensor", "", "", "", "mdi:hvac")),
        ("PROGRAMMSCHALTER", m("Programmschalter", "sensor", "", "", "", "mdi:dip-switch")),
        ("SOMMERBETRIEB", m("Sommerbetrieb", "binary_sensor", "", "", "", "mdi:weather-sunny")),
        // Temperature setpoints
        ("KESSELSOLLTEMP", m("Kessel Soll Temp", "sensor", "temperature", "°C", "measurement", "mdi:thermometer")),
        ("SPEICHERSOLLTEMP", m("Speicher Soll Temp", "sensor", "temperature", "°C", "measurement", "mdi:thermometer")),
        ("RAUMSOLLTEMP_I", m("Raum Soll Temp I", "sensor", "temperature", "°C", "measurement", "mdi:home-thermometer")),
        ("RAUMSOLLTEMP_II", m("Raum Soll Temp II", "sensor", "temperature", "°C", "measurement", "mdi:home-thermometer")),
        ("RAUMSOLLTEMP_III", m("Raum Soll Temp III", "sensor", "temperature", "°C", "measurement", "mdi:home-thermometer")),
        ("RAUMSOLLTEMP_NACHT", m("Raum Soll Temp Nacht", "sensor", "temperature", "°C", "measurement", "mdi:home-thermometer")),
        ("EINSTELL_SPEICHERSOLLTEMP", m("Einst. Speicher Soll Temp", "sensor", "temperature", "°C", "measurement", "mdi:thermometer")),
        // Temperature measurements
        ("AUSSENTEMP", m("Außen Temp", "sensor", "temperature", "°C", "measurement", "mdi:thermometer")),
        ("SAMMLERISTTEMP", m("Sammler Ist Temp", "sensor", "temperature", "°C", "measurement", "mdi:thermometer")),
        ("SPEICHERISTTEMP", m("Speicher Ist Temp", "sensor", "temperature", "°C", "measurement", "mdi:thermometer")),
        ("VORLAUFISTTEMP", m("Vorlauf Ist Temp", "sensor", "temperature", "°C", "measurement", "mdi:thermometer-lines")),
        ("RUECKLAUFISTTEMP", m("Rücklauf Ist Temp", "sensor", "temperature", "°C", "measurement", "mdi:thermometer-lines")),
        ("WPVORLAUFIST", m("WP Vorlauf Ist", "sensor", "temperature", "°C", "measurement", "mdi:thermometer-lines")),
        ("VERDAMPFERTEMP", m("Verdampfer Temp", "sensor", "temperature", "°C", "measurement", "mdi:thermometer")),
        ("KONDENSATORTEMP", m("Kondensator Temp", "sensor", "temperature", "°C", "measurement", "mdi:thermometer")),
        // Power/energy
        ("VERDICHTER", m("Verdichter", "sensor", "power", "W", "measurement", "mdi:pump")),
        ("FREQUENZ_VD", m("Frequenz VD", "sensor", "frequency", "Hz", "measurement", "mdi:sine-wave")),
        ("EL_AUFNAHMELEISTUNG_WW_TAG_WH", m("El. Aufn. WW Tag", "sensor", "energy", "Wh", "total_increasing", "mdi:flash")),
        ("EL_AUFNAHMELEISTUNG_WW_SUM_MWH", m("El. Aufn. WW Summe", "sensor", "energy", "MWh", "total_increasing", "mdi:flash")),
        ("EL_AUFNAHMELEISTUNG_HEIZ_TAG_WH", m("El. Aufn. Heiz Tag", "sensor", "energy", "Wh", "total_increasing", "mdi:flash")),
        ("EL_AUFNAHMELEISTUNG_HEIZ_SUM_MWH", m("El. Aufn. Heiz Summe", "sensor", "energy", "MWh", "total_increasing", "mdi:flash")),
        ("WAERMEERTRAG_WW_TAG_WH", m("Wärmeertrag WW Tag", "sensor", "energy", "Wh", "total_increasing", "mdi:fire")),
        ("WAERMEERTRAG_WW_SUM_MWH", m("Wärmeertrag WW Summe", "sensor", "energy", "MWh", "total_increasing", "mdi:fire")),
        ("WAERMEERTRAG_HEIZ_TAG_WH", m("Wärmeertrag Heiz Tag", "sensor", "energy", "Wh", "total_increasing", "mdi:fire")),
        ("WAERMEERTRAG_HEIZ_SUM_MWH", m("Wärmeertrag Heiz Summe", "sensor", "energy", "MWh", "total_increasing", "mdi:fire")),
        ("WAERMEERTRAG_2WE_WW_SUM_MWH", m("Wärmeertrag 2WE WW Summe", "sensor", "energy", "MWh", "total_increasing", "mdi:fire")),
        ("WAERMEERTRAG_2WE_HEIZ_SUM_MWH", m("Wärmeertrag 2WE Heiz Summe", "sensor", "energy", "MWh", "total_increasing", "mdi:fire")),
        // Runtime counters
        ("LAUFZEIT_VERD_HEIZBETRIEB", m("LZ Verd. Heizbetrieb", "sensor", "duration", "h", "total_increasing", "mdi:timer")),
        ("LAUFZEIT_VERD_WW_BETRIEB", m("LZ Verd. WW Betrieb", "sensor", "duration", "h", "total_increasing", "mdi:timer")),
        ("IMPULSE_VERD_HEIZBETRIEB", m("Impulse Verd. Heizbetrieb", "sensor", "", "", "total_increasing", "mdi:counter")),
        ("IMPULSE_VERD_WW_BETRIEB", m("Impulse Verd. WW Betrieb", "sensor", "", "", "total_increasing", "mdi:counter")),
    ]
}
