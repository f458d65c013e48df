use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Closed set of product verticals the platform tracks. "pharmaceuticals"
/// is accepted as an alias of pharma wherever verticals are parsed.
#[derive(
    Clone, Copy, Debug, Deserialize, Serialize, Hash, Eq, PartialEq, ValueEnum, Display, EnumString,
)]
pub enum Vertical {
    #[serde(rename = "tech")]
    #[strum(serialize = "tech")]
    #[value(name = "tech")]
    Tech,
    #[serde(rename = "pharma", alias = "pharmaceuticals")]
    #[strum(to_string = "pharma", serialize = "pharma", serialize = "pharmaceuticals")]
    #[value(name = "pharma", alias = "pharmaceuticals")]
    Pharma,
    #[serde(rename = "beauty")]
    #[strum(serialize = "beauty")]
    #[value(name = "beauty")]
    Beauty,
    #[serde(rename = "home-appliances")]
    #[strum(serialize = "home-appliances")]
    #[value(name = "home-appliances")]
    HomeAppliances,
    #[serde(rename = "supplements")]
    #[strum(serialize = "supplements")]
    #[value(name = "supplements")]
    Supplements,
    #[serde(rename = "pet-goods")]
    #[strum(serialize = "pet-goods")]
    #[value(name = "pet-goods")]
    PetGoods,
}

impl Vertical {
    /// Verticals that collapse into one family for the purpose of the
    /// canonical-product vertical transition gate. Pharma and its
    /// "pharmaceuticals" spelling are already one variant, so family
    /// equality is plain equality.
    pub fn same_family(self, other: Vertical) -> bool {
        self == other
    }
}

/// Where a listing's vertical decision came from, in descending order of
/// trust. The pipeline's transition gate treats the structured sources as
/// stronger evidence than text heuristics.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Display)]
pub enum VerticalSource {
    #[serde(rename = "json_ld")]
    #[strum(serialize = "json_ld")]
    JsonLd,
    #[serde(rename = "breadcrumb")]
    #[strum(serialize = "breadcrumb")]
    Breadcrumb,
    #[serde(rename = "structured_category")]
    #[strum(serialize = "structured_category")]
    StructuredCategory,
    #[serde(rename = "url_path")]
    #[strum(serialize = "url_path")]
    UrlPath,
    #[serde(rename = "title_attributes")]
    #[strum(serialize = "title_attributes")]
    TitleAttributes,
    #[serde(rename = "adapter_default")]
    #[strum(serialize = "adapter_default")]
    AdapterDefault,
}

impl VerticalSource {
    pub fn is_structured(self) -> bool {
        matches!(
            self,
            VerticalSource::JsonLd | VerticalSource::Breadcrumb | VerticalSource::StructuredCategory
        )
    }
}

/// Which extraction path produced the raw category string.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Display)]
pub enum CategorySource {
    #[serde(rename = "json_ld")]
    #[strum(serialize = "json_ld")]
    JsonLd,
    #[serde(rename = "breadcrumb")]
    #[strum(serialize = "breadcrumb")]
    Breadcrumb,
    #[serde(rename = "fallback")]
    #[strum(serialize = "fallback")]
    Fallback,
}
