use std::fmt;

/// The five address checker operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Find,
    Details,
    Suggest,
    SuggestPartial,
    PartialDetails,
}

impl Endpoint {
    /// Path segment under the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Find => "find",
            Endpoint::Details => "details",
            Endpoint::Suggest => "suggest",
            Endpoint::SuggestPartial => "suggest_partial",
            Endpoint::PartialDetails => "partial_details",
        }
    }

    /// Field of the JSON envelope that holds the payload
    pub fn response_field(&self) -> &'static str {
        match self {
            Endpoint::Find | Endpoint::Suggest | Endpoint::SuggestPartial => "addresses",
            Endpoint::Details | Endpoint::PartialDetails => "details",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Conventional values of the `type` filter. The API takes any string and
/// operations forward it verbatim, so these are a convenience only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AddressType {
    Postal,
    Physical,
    #[default]
    All,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Postal => "Postal",
            AddressType::Physical => "Physical",
            AddressType::All => "All",
        }
    }
}

impl AsRef<str> for AddressType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
