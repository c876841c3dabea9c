//! Defines the fixed set of pollutants served by the dashboard and the physical
//! concentration units their datasets are reported in.

use std::fmt;
use std::str::FromStr;

/// Physical concentration unit of a pollutant dataset.
///
/// Every pollutant without a more specific unit is reported in µg/m³, which is also the
/// unit returned for pollutant names that are not recognised at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    /// mg/m³, used for carbon monoxide.
    MilligramsPerCubicMetre,
    /// µg/m³, the default unit.
    #[default]
    MicrogramsPerCubicMetre,
    /// ng/m³, used for heavy metals, polycyclic aromatic hydrocarbons and total gaseous mercury.
    NanogramsPerCubicMetre,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::MilligramsPerCubicMetre => "mg/m³",
            Unit::MicrogramsPerCubicMetre => "µg/m³",
            Unit::NanogramsPerCubicMetre => "ng/m³",
        }
    }

    /// Looks up the unit for a pollutant name, falling back to [`Unit::default`] when the
    /// name does not belong to a known [`Pollutant`].
    ///
    /// # Examples
    ///
    /// ```
    /// use smogwatch::Unit;
    ///
    /// assert_eq!(Unit::for_pollutant("CO"), Unit::MilligramsPerCubicMetre);
    /// assert_eq!(Unit::for_pollutant("Cd(PM10)"), Unit::NanogramsPerCubicMetre);
    /// assert_eq!(Unit::for_pollutant("not-a-pollutant"), Unit::MicrogramsPerCubicMetre);
    /// ```
    pub fn for_pollutant(name: &str) -> Unit {
        name.parse::<Pollutant>()
            .map(|pollutant| pollutant.unit())
            .unwrap_or_default()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A pollutant with a precomputed daily time-series dataset.
///
/// The declaration order is the order pollutants are listed in selectors and in the
/// location overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pollutant {
    /// Cadmium in PM10.
    CdPm10,
    /// Lead in PM10.
    PbPm10,
    /// Arsenic in PM10.
    AsPm10,
    /// Nickel in PM10.
    NiPm10,
    /// Benzo(a)anthracene in PM10.
    BaAPm10,
    /// Benzo(a)pyrene in PM10.
    BaPPm10,
    /// Benzo(b)fluoranthene in PM10.
    BbFPm10,
    /// Benzo(j)fluoranthene in PM10.
    BjFPm10,
    /// Benzo(k)fluoranthene in PM10.
    BkFPm10,
    /// Dibenz(a,h)anthracene in PM10.
    DBahAPm10,
    /// Indeno(1,2,3-cd)pyrene in PM10.
    IpPm10,
    /// Ions in PM2.5.
    JonyPm25,
    NO2,
    PM10,
    SO2,
    PM25,
    /// Benzene.
    C6H6,
    CO,
    /// Formaldehyde.
    Formaldehyd,
    /// Total gaseous mercury.
    HgTgm,
    NO,
    O3,
}

impl Pollutant {
    /// All known pollutants, in display order.
    pub const ALL: [Pollutant; 22] = [
        Pollutant::CdPm10,
        Pollutant::PbPm10,
        Pollutant::AsPm10,
        Pollutant::NiPm10,
        Pollutant::BaAPm10,
        Pollutant::BaPPm10,
        Pollutant::BbFPm10,
        Pollutant::BjFPm10,
        Pollutant::BkFPm10,
        Pollutant::DBahAPm10,
        Pollutant::IpPm10,
        Pollutant::JonyPm25,
        Pollutant::NO2,
        Pollutant::PM10,
        Pollutant::SO2,
        Pollutant::PM25,
        Pollutant::C6H6,
        Pollutant::CO,
        Pollutant::Formaldehyd,
        Pollutant::HgTgm,
        Pollutant::NO,
        Pollutant::O3,
    ];

    /// The name used in requests, dataset file names and chart titles.
    pub fn name(&self) -> &'static str {
        match self {
            Pollutant::CdPm10 => "Cd(PM10)",
            Pollutant::PbPm10 => "Pb(PM10)",
            Pollutant::AsPm10 => "As(PM10)",
            Pollutant::NiPm10 => "Ni(PM10)",
            Pollutant::BaAPm10 => "BaA(PM10)",
            Pollutant::BaPPm10 => "BaP(PM10)",
            Pollutant::BbFPm10 => "BbF(PM10)",
            Pollutant::BjFPm10 => "BjF(PM10)",
            Pollutant::BkFPm10 => "BkF(PM10)",
            Pollutant::DBahAPm10 => "DBahA(PM10)",
            Pollutant::IpPm10 => "IP(PM10)",
            Pollutant::JonyPm25 => "Jony_PM25",
            Pollutant::NO2 => "NO2",
            Pollutant::PM10 => "PM10",
            Pollutant::SO2 => "SO2",
            Pollutant::PM25 => "PM25",
            Pollutant::C6H6 => "C6H6",
            Pollutant::CO => "CO",
            Pollutant::Formaldehyd => "formaldehyd",
            Pollutant::HgTgm => "Hg(TGM)",
            Pollutant::NO => "NO",
            Pollutant::O3 => "O3",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            Pollutant::CO => Unit::MilligramsPerCubicMetre,
            Pollutant::AsPm10
            | Pollutant::BaAPm10
            | Pollutant::BaPPm10
            | Pollutant::BbFPm10
            | Pollutant::BjFPm10
            | Pollutant::BkFPm10
            | Pollutant::DBahAPm10
            | Pollutant::CdPm10
            | Pollutant::NiPm10
            | Pollutant::IpPm10
            | Pollutant::HgTgm => Unit::NanogramsPerCubicMetre,
            _ => Unit::MicrogramsPerCubicMetre,
        }
    }

    /// File stem of the merged 24-hour dataset, without extension.
    pub(crate) fn dataset_file_stem(&self) -> String {
        format!("{}_24g_merged", self.name())
    }

    /// File name of the pre-rendered station map for this pollutant.
    ///
    /// Two maps were exported under names that differ from the pollutant name.
    pub fn map_file(&self) -> &'static str {
        match self {
            Pollutant::DBahAPm10 => "DBahA_(PM10).html",
            Pollutant::HgTgm => "HG(TGM).html",
            Pollutant::CdPm10 => "Cd(PM10).html",
            Pollutant::PbPm10 => "Pb(PM10).html",
            Pollutant::AsPm10 => "As(PM10).html",
            Pollutant::NiPm10 => "Ni(PM10).html",
            Pollutant::BaAPm10 => "BaA(PM10).html",
            Pollutant::BaPPm10 => "BaP(PM10).html",
            Pollutant::BbFPm10 => "BbF(PM10).html",
            Pollutant::BjFPm10 => "BjF(PM10).html",
            Pollutant::BkFPm10 => "BkF(PM10).html",
            Pollutant::IpPm10 => "IP(PM10).html",
            Pollutant::JonyPm25 => "Jony_PM25.html",
            Pollutant::NO2 => "NO2.html",
            Pollutant::PM10 => "PM10.html",
            Pollutant::SO2 => "SO2.html",
            Pollutant::PM25 => "PM25.html",
            Pollutant::C6H6 => "C6H6.html",
            Pollutant::CO => "CO.html",
            Pollutant::Formaldehyd => "formaldehyd.html",
            Pollutant::NO => "NO.html",
            Pollutant::O3 => "O3.html",
        }
    }
}

/// Allows formatting a `Pollutant` using its request name.
///
/// # Examples
///
/// ```
/// use smogwatch::Pollutant;
///
/// assert_eq!(Pollutant::HgTgm.to_string(), "Hg(TGM)");
/// assert_eq!(format!("{}", Pollutant::PM25), "PM25");
/// ```
impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a name does not match any known [`Pollutant`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown pollutant '{0}'")]
pub struct UnknownPollutant(pub String);

impl FromStr for Pollutant {
    type Err = UnknownPollutant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pollutant::ALL
            .into_iter()
            .find(|pollutant| pollutant.name() == s)
            .ok_or_else(|| UnknownPollutant(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique_and_parse_back() {
        let names: HashSet<&str> = Pollutant::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names.len(), Pollutant::ALL.len());

        for pollutant in Pollutant::ALL {
            assert_eq!(pollutant.name().parse::<Pollutant>(), Ok(pollutant));
        }
    }

    #[test]
    fn test_unknown_pollutant_is_rejected() {
        let err = "PM1".parse::<Pollutant>().unwrap_err();
        assert_eq!(err, UnknownPollutant("PM1".to_string()));
        // Names are case sensitive.
        assert!("pm10".parse::<Pollutant>().is_err());
    }

    #[test]
    fn test_units() {
        assert_eq!(Pollutant::CO.unit().symbol(), "mg/m³");
        assert_eq!(Pollutant::BaPPm10.unit().symbol(), "ng/m³");
        assert_eq!(Pollutant::HgTgm.unit().symbol(), "ng/m³");
        assert_eq!(Pollutant::PM10.unit().symbol(), "µg/m³");
        // Lead is not in the ng/m³ group.
        assert_eq!(Pollutant::PbPm10.unit(), Unit::MicrogramsPerCubicMetre);
        assert_eq!(Unit::for_pollutant("whatever"), Unit::MicrogramsPerCubicMetre);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(Pollutant::PM10.dataset_file_stem(), "PM10_24g_merged");
        assert_eq!(Pollutant::CdPm10.dataset_file_stem(), "Cd(PM10)_24g_merged");
        assert_eq!(Pollutant::DBahAPm10.map_file(), "DBahA_(PM10).html");
        assert_eq!(Pollutant::HgTgm.map_file(), "HG(TGM).html");
        assert_eq!(Pollutant::O3.map_file(), "O3.html");
    }

    #[test]
    fn test_display_order_is_declaration_order() {
        let mut sorted = Pollutant::ALL;
        sorted.sort();
        assert_eq!(sorted, Pollutant::ALL);
        assert_eq!(Pollutant::ALL[0], Pollutant::CdPm10);
        assert_eq!(Pollutant::ALL[21], Pollutant::O3);
    }
}
