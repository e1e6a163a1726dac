//! Third-party components shipped by the installer.

use std::fmt;
use std::str::FromStr;

use crate::core::errors::UnsupportedTargetError;

/// A component with prebuilt artifacts referenced from the installer config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    /// Camera acquisition library.
    Aravis,
    /// Runtime dependency bundle for Aravis (Windows only).
    AravisDep,
    /// Image-processing pipeline toolkit.
    IonKit,
    OpenCv,
    /// GenDC container separator library.
    GendcSeparator,
}

impl Component {
    /// Every component, in the order entries appear in generated configs.
    pub const ALL: [Component; 5] = [
        Component::Aravis,
        Component::AravisDep,
        Component::IonKit,
        Component::OpenCv,
        Component::GendcSeparator,
    ];

    /// The manifest key identifying this component.
    pub fn key(&self) -> &'static str {
        match self {
            Component::Aravis => "aravis",
            Component::AravisDep => "aravis_dep",
            Component::IonKit => "ion_kit",
            Component::OpenCv => "opencv",
            Component::GendcSeparator => "gendc_separator",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Component {
    type Err = UnsupportedTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Component::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| UnsupportedTargetError::UnknownComponent(s.to_string()))
    }
}
