//! Implementation lattice - the static registry of constructable entity kinds
//!
//! Every kind declares one canonical ontology class and its direct
//! supertypes. Multiple supertypes express capabilities (a `Device` is both
//! an `Asset` and a `DeviceState`); nothing is discovered at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

use crate::ontology::vocab::{IES_BASE, RDFS};

/// A single-rooted lattice of implementation types
///
/// The hierarchy builder only needs the declared set, the root, each
/// type's direct supertypes and its canonical class URI.
pub trait LatticeType: Copy + Eq + Hash + Ord + fmt::Debug + 'static {
    /// Every type, in declaration order
    fn all() -> &'static [Self];

    fn root() -> Self;

    /// Direct supertypes, in declaration order. Empty only for the root.
    fn direct_supertypes(&self) -> &'static [Self];

    /// Ontology class this type stands for and asserts by default
    fn canonical_class(&self) -> String;

    /// Direct subtypes, in declaration order
    fn direct_subtypes(&self) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|t| t.direct_supertypes().contains(self))
            .collect()
    }

    /// Whether `self` is `ancestor` or reaches it through supertypes
    fn is_a(&self, ancestor: Self) -> bool {
        if *self == ancestor {
            return true;
        }
        self.direct_supertypes().iter().any(|s| s.is_a(ancestor))
    }
}

/// Constructable IES entity kinds
///
/// # Examples
///
/// ```
/// use ies_core::hierarchy::{EntityKind, LatticeType};
///
/// assert_eq!(
///     EntityKind::Person.canonical_class(),
///     "http://ies.data.gov.uk/ontology/ies4#Person"
/// );
/// assert!(EntityKind::Device.is_a(EntityKind::DeviceState));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EntityKind {
    RdfsResource,
    RdfsClass,
    ExchangedItem,
    Element,
    Entity,
    State,
    DeviceState,
    Asset,
    AmountOfMoney,
    /// Asset with the capabilities of a DeviceState
    Device,
    Account,
    CommunicationsAccount,
    Location,
    Country,
    GeoPoint,
    ResponsibleActor,
    Post,
    Person,
    Organisation,
    ClassOfElement,
    ClassOfClassOfElement,
    ParticularPeriod,
    BoundingState,
    BirthState,
    DeathState,
    UnitOfMeasure,
    Representation,
    WorkOfDocumentation,
    MeasureValue,
    Measure,
    Identifier,
    Name,
    NamingScheme,
    Event,
    EventParticipant,
    Communication,
    PartyInCommunication,
}

const ALL_KINDS: &[EntityKind] = &[
    EntityKind::RdfsResource,
    EntityKind::RdfsClass,
    EntityKind::ExchangedItem,
    EntityKind::Element,
    EntityKind::Entity,
    EntityKind::State,
    EntityKind::DeviceState,
    EntityKind::Asset,
    EntityKind::AmountOfMoney,
    EntityKind::Device,
    EntityKind::Account,
    EntityKind::CommunicationsAccount,
    EntityKind::Location,
    EntityKind::Country,
    EntityKind::GeoPoint,
    EntityKind::ResponsibleActor,
    EntityKind::Post,
    EntityKind::Person,
    EntityKind::Organisation,
    EntityKind::ClassOfElement,
    EntityKind::ClassOfClassOfElement,
    EntityKind::ParticularPeriod,
    EntityKind::BoundingState,
    EntityKind::BirthState,
    EntityKind::DeathState,
    EntityKind::UnitOfMeasure,
    EntityKind::Representation,
    EntityKind::WorkOfDocumentation,
    EntityKind::MeasureValue,
    EntityKind::Measure,
    EntityKind::Identifier,
    EntityKind::Name,
    EntityKind::NamingScheme,
    EntityKind::Event,
    EntityKind::EventParticipant,
    EntityKind::Communication,
    EntityKind::PartyInCommunication,
];

impl EntityKind {
    /// Bare type name, as used for factory lookup
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RdfsResource => "RdfsResource",
            Self::RdfsClass => "RdfsClass",
            Self::ExchangedItem => "ExchangedItem",
            Self::Element => "Element",
            Self::Entity => "Entity",
            Self::State => "State",
            Self::DeviceState => "DeviceState",
            Self::Asset => "Asset",
            Self::AmountOfMoney => "AmountOfMoney",
            Self::Device => "Device",
            Self::Account => "Account",
            Self::CommunicationsAccount => "CommunicationsAccount",
            Self::Location => "Location",
            Self::Country => "Country",
            Self::GeoPoint => "GeoPoint",
            Self::ResponsibleActor => "ResponsibleActor",
            Self::Post => "Post",
            Self::Person => "Person",
            Self::Organisation => "Organisation",
            Self::ClassOfElement => "ClassOfElement",
            Self::ClassOfClassOfElement => "ClassOfClassOfElement",
            Self::ParticularPeriod => "ParticularPeriod",
            Self::BoundingState => "BoundingState",
            Self::BirthState => "BirthState",
            Self::DeathState => "DeathState",
            Self::UnitOfMeasure => "UnitOfMeasure",
            Self::Representation => "Representation",
            Self::WorkOfDocumentation => "WorkOfDocumentation",
            Self::MeasureValue => "MeasureValue",
            Self::Measure => "Measure",
            Self::Identifier => "Identifier",
            Self::Name => "Name",
            Self::NamingScheme => "NamingScheme",
            Self::Event => "Event",
            Self::EventParticipant => "EventParticipant",
            Self::Communication => "Communication",
            Self::PartyInCommunication => "PartyInCommunication",
        }
    }

    #[must_use]
    pub const fn supertypes(&self) -> &'static [EntityKind] {
        use EntityKind::*;
        match self {
            RdfsResource => &[],
            RdfsClass | ExchangedItem => &[RdfsResource],
            Element => &[ExchangedItem],
            Entity | State | ParticularPeriod | Event => &[Element],
            DeviceState | BoundingState | EventParticipant => &[State],
            Asset | Account | Location | ResponsibleActor => &[Entity],
            AmountOfMoney => &[Asset],
            Device => &[Asset, DeviceState],
            CommunicationsAccount => &[Account],
            Country | GeoPoint => &[Location],
            Post | Person | Organisation => &[ResponsibleActor],
            ClassOfElement | ClassOfClassOfElement => &[RdfsClass, ExchangedItem],
            BirthState | DeathState => &[BoundingState],
            UnitOfMeasure | NamingScheme => &[ClassOfClassOfElement],
            Representation | Measure => &[ClassOfElement],
            WorkOfDocumentation | MeasureValue | Identifier | Name => &[Representation],
            Communication | PartyInCommunication => &[Event],
        }
    }

    /// RDFS-native kinds take their canonical class from the RDFS namespace
    #[must_use]
    pub const fn is_rdfs_native(&self) -> bool {
        matches!(self, Self::RdfsResource | Self::RdfsClass)
    }

    /// Kinds whose identity is tied to exactly one class
    #[must_use]
    pub const fn accepts_multiple_classes(&self) -> bool {
        !matches!(self, Self::ParticularPeriod | Self::Country | Self::GeoPoint)
    }

    /// Class of the states created by `create_state` when none is given
    #[must_use]
    pub fn default_state_class(&self) -> String {
        let short = if self.is_a(Self::Person) {
            "PersonState"
        } else if self.is_a(Self::ResponsibleActor) {
            "ResponsibleActorState"
        } else if self.is_a(Self::Device) {
            "DeviceState"
        } else if self.is_a(Self::Asset) {
            "AssetState"
        } else if self.is_a(Self::Account) {
            "AccountState"
        } else if self.is_a(Self::Location) {
            "LocationState"
        } else {
            "State"
        };
        format!("{}{}", IES_BASE, short)
    }

    /// Case-insensitive lookup by bare name
    ///
    /// # Examples
    ///
    /// ```
    /// use ies_core::hierarchy::EntityKind;
    ///
    /// assert_eq!(EntityKind::from_name("person"), Some(EntityKind::Person));
    /// assert_eq!(EntityKind::from_name("Unicorn"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_KINDS
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl LatticeType for EntityKind {
    fn all() -> &'static [Self] {
        ALL_KINDS
    }

    fn root() -> Self {
        Self::RdfsResource
    }

    fn direct_supertypes(&self) -> &'static [Self] {
        self.supertypes()
    }

    fn canonical_class(&self) -> String {
        if self.is_rdfs_native() {
            format!("{}{}", RDFS, self.name().trim_start_matches("Rdfs"))
        } else {
            format!("{}{}", IES_BASE, self.name())
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
