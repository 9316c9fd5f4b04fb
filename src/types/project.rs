use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Projects taking part in the migration, legacy and new tickers alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectName {
    Debt,
    Chrs,
    Alum,
    Baux,
    Bgld,
    Oil,
    Dcm,
    Data,
    Dlg,
    Gdlg,
    Grow,
    Farm,
    Natg,
    Ngas,
    Xplr,
    Expl,
}

impl ProjectName {
    pub const ALL: [ProjectName; 16] = [
        ProjectName::Debt,
        ProjectName::Chrs,
        ProjectName::Alum,
        ProjectName::Baux,
        ProjectName::Bgld,
        ProjectName::Oil,
        ProjectName::Dcm,
        ProjectName::Data,
        ProjectName::Dlg,
        ProjectName::Gdlg,
        ProjectName::Grow,
        ProjectName::Farm,
        ProjectName::Natg,
        ProjectName::Ngas,
        ProjectName::Xplr,
        ProjectName::Expl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectName::Debt => "DEBT",
            ProjectName::Chrs => "CHRS",
            ProjectName::Alum => "ALUM",
            ProjectName::Baux => "BAUX",
            ProjectName::Bgld => "BGLD",
            ProjectName::Oil => "OIL",
            ProjectName::Dcm => "DCM",
            ProjectName::Data => "DATA",
            ProjectName::Dlg => "DLG",
            ProjectName::Gdlg => "GDLG",
            ProjectName::Grow => "GROW",
            ProjectName::Farm => "FARM",
            ProjectName::Natg => "NATG",
            ProjectName::Ngas => "NGAS",
            ProjectName::Xplr => "XPLR",
            ProjectName::Expl => "EXPL",
        }
    }

    /// The ticker a legacy project migrates into. `None` for the new tickers.
    pub fn converts_to(&self) -> Option<ProjectName> {
        match self {
            ProjectName::Debt => Some(ProjectName::Chrs),
            ProjectName::Alum => Some(ProjectName::Baux),
            ProjectName::Bgld => Some(ProjectName::Oil),
            ProjectName::Dcm => Some(ProjectName::Data),
            ProjectName::Dlg => Some(ProjectName::Gdlg),
            ProjectName::Grow => Some(ProjectName::Farm),
            ProjectName::Natg => Some(ProjectName::Ngas),
            ProjectName::Xplr => Some(ProjectName::Expl),
            _ => None,
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.converts_to().is_some()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectName::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Unknown project: {}", s))
    }
}
