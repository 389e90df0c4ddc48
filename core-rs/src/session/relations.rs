//! Relationship helpers
//!
//! Each helper checks its subject has the needed capability, resolves the
//! related node through `Session::resolve_reference` (the method name is the
//! context) and writes the linking triples.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tracing::error;

use super::resource::{EntityOptions, ParticipationOptions, Reference, Resource, StateOptions};
use super::{DiagnosticKind, Session};
use crate::errors::{IesError, Result};
use crate::hierarchy::{EntityKind, LatticeType};
use crate::ontology::vocab::{ies, ISO8601, RDFS_COMMENT, RDFS_LABEL, RDF_TYPE};
use crate::store::{LiteralType, Triple};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Check an ISO8601 date or datetime and return it with spaces replaced by `T`
///
/// # Examples
///
/// ```
/// use ies_core::session::validate_iso8601;
///
/// assert_eq!(validate_iso8601("2023-01-01 10:00:00").unwrap(), "2023-01-01T10:00:00");
/// assert!(validate_iso8601("last tuesday").is_err());
/// ```
pub fn validate_iso8601(time: &str) -> Result<String> {
    let normalised = time.trim().replace(' ', "T");

    let valid = DateTime::parse_from_rfc3339(&normalised).is_ok()
        || OFFSET_FORMATS
            .iter()
            .any(|f| DateTime::parse_from_str(&normalised, f).is_ok())
        || NAIVE_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(&normalised, f).is_ok())
        || NaiveDate::parse_from_str(&normalised, "%Y-%m-%d").is_ok();

    if valid {
        Ok(normalised)
    } else {
        error!(time, "invalid ISO8601 datetime string");
        Err(IesError::InvalidDateTime(time.to_string()))
    }
}

fn require(subject: &Resource, capability: EntityKind, relation: &str) -> Result<()> {
    if subject.is_a(capability) {
        Ok(())
    } else {
        Err(IesError::UnsupportedRelation {
            kind: subject.kind().to_string(),
            relation: relation.to_string(),
        })
    }
}

impl Session {
    /// Kind for a state-like class, never shallower than `floor`
    fn state_kind(&self, class: &str, floor: EntityKind) -> EntityKind {
        let kind = self.hierarchy.resolve(&[class]).kind;
        if kind.is_a(floor) {
            kind
        } else {
            floor
        }
    }

    // --- any entity ------------------------------------------------------

    /// Assert an additional class
    pub fn add_type(&mut self, subject: &Resource, class: &str) -> Result<bool> {
        if !self.ontology.is_known_class(class) {
            tracing::warn!(class, "class not in ontology");
            self.record(
                DiagnosticKind::UnknownClass,
                format!("class {} not in ontology", class),
            );
        }
        self.add_triple(Triple::iri(subject.uri(), RDF_TYPE, class))
    }

    pub fn add_literal(
        &mut self,
        subject: &Resource,
        predicate: &str,
        value: &str,
        datatype: LiteralType,
    ) -> Result<bool> {
        self.add_triple(Triple::literal(subject.uri(), predicate, value, datatype))
    }

    pub fn add_label(&mut self, subject: &Resource, label: &str) -> Result<bool> {
        self.add_literal(subject, RDFS_LABEL, label, LiteralType::String)
    }

    pub fn add_comment(&mut self, subject: &Resource, comment: &str) -> Result<bool> {
        self.add_literal(subject, RDFS_COMMENT, comment, LiteralType::String)
    }

    /// Link `subject` to any entity with `predicate`
    pub fn add_related_object(
        &mut self,
        subject: &Resource,
        predicate: &str,
        object: impl Into<Reference>,
    ) -> Result<Arc<Resource>> {
        let object = self.resolve_reference(object, None, "add_related_object")?;
        self.add_triple(Triple::iri(subject.uri(), predicate, object.uri()))?;
        Ok(object)
    }

    // --- Element ---------------------------------------------------------

    /// `part ies:isPartOf whole` (or `relation` when given); returns the part
    pub fn add_part(
        &mut self,
        whole: &Resource,
        part: impl Into<Reference>,
        relation: Option<&str>,
    ) -> Result<Arc<Resource>> {
        require(whole, EntityKind::Element, "add_part")?;
        let part = self.resolve_reference(part, Some(EntityKind::Element), "add_part")?;
        let relation = relation.map_or_else(|| ies("isPartOf"), str::to_string);
        self.add_triple(Triple::iri(part.uri(), relation, whole.uri()))?;
        Ok(part)
    }

    pub fn in_location(
        &mut self,
        element: &Resource,
        location: impl Into<Reference>,
    ) -> Result<Arc<Resource>> {
        require(element, EntityKind::Element, "in_location")?;
        let location = self.resolve_reference(location, Some(EntityKind::Location), "in_location")?;
        self.add_triple(Triple::iri(element.uri(), ies("inLocation"), location.uri()))?;
        Ok(location)
    }

    /// Create a state of `owner`
    ///
    /// The state class defaults to the owner kind's default state class and
    /// the linking predicate to `ies:isStateOf`.
    pub fn create_state(&mut self, owner: &Resource, options: StateOptions) -> Result<Arc<Resource>> {
        require(owner, EntityKind::Element, "create_state")?;

        let StateOptions {
            state_class,
            uri,
            relation,
            start,
            end,
            location,
        } = options;

        let class = state_class.unwrap_or_else(|| owner.kind().default_state_class());
        let kind = self.state_kind(&class, EntityKind::State);
        let state = self.create(
            kind,
            EntityOptions {
                uri,
                classes: Some(vec![class]),
                start,
                end,
                label: None,
            },
        )?;

        let relation = relation.unwrap_or_else(|| ies("isStateOf"));
        self.add_triple(Triple::iri(state.uri(), relation, owner.uri()))?;

        if let Some(location) = location {
            self.in_location(&state, location)?;
        }
        Ok(state)
    }

    /// Place `element` in the particular period named by an ISO8601 string
    pub fn put_in_period(&mut self, element: &Resource, time: &str) -> Result<Arc<Resource>> {
        require(element, EntityKind::Element, "put_in_period")?;
        let time = validate_iso8601(time)?;

        let uri = format!("{}{}", ISO8601, time);
        let (period, fresh) = self.intern(EntityKind::ParticularPeriod, Some(&uri), None)?;
        if fresh {
            self.add_literal(
                &period,
                &ies("iso8601PeriodRepresentation"),
                &time,
                LiteralType::String,
            )?;
        }

        self.add_triple(Triple::iri(element.uri(), ies("inPeriod"), period.uri()))?;
        Ok(period)
    }

    /// Bounding state marking the start of `element`
    pub fn starts_in(
        &mut self,
        element: &Resource,
        time: &str,
        bounding_class: Option<&str>,
        uri: Option<&str>,
    ) -> Result<Arc<Resource>> {
        self.bound(element, time, bounding_class, uri, "isStartOf", "starts_in")
    }

    /// Bounding state marking the end of `element`
    pub fn ends_in(
        &mut self,
        element: &Resource,
        time: &str,
        bounding_class: Option<&str>,
        uri: Option<&str>,
    ) -> Result<Arc<Resource>> {
        self.bound(element, time, bounding_class, uri, "isEndOf", "ends_in")
    }

    fn bound(
        &mut self,
        element: &Resource,
        time: &str,
        bounding_class: Option<&str>,
        uri: Option<&str>,
        predicate: &str,
        relation: &str,
    ) -> Result<Arc<Resource>> {
        require(element, EntityKind::Element, relation)?;
        let time = validate_iso8601(time)?;

        let class = bounding_class
            .map_or_else(|| EntityKind::BoundingState.canonical_class(), str::to_string);
        let kind = self.state_kind(&class, EntityKind::BoundingState);
        let state = self.intern_or_construct(kind, uri, Some(vec![class]))?;

        self.add_triple(Triple::iri(state.uri(), ies(predicate), element.uri()))?;
        self.put_in_period(&state, &time)?;
        Ok(state)
    }

    // --- ResponsibleActor ------------------------------------------------

    /// State of `actor` linked to a resolved target by `predicate`
    #[allow(clippy::too_many_arguments)]
    fn actor_state(
        &mut self,
        actor: &Resource,
        target: Reference,
        expected: EntityKind,
        predicate: &str,
        relation: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Arc<Resource>> {
        require(actor, EntityKind::ResponsibleActor, relation)?;
        let target = self.resolve_reference(target, Some(expected), relation)?;

        let state = self.create_state(
            actor,
            StateOptions {
                start: start.map(str::to_string),
                end: end.map(str::to_string),
                ..StateOptions::default()
            },
        )?;
        self.add_triple(Triple::iri(state.uri(), ies(predicate), target.uri()))?;
        Ok(state)
    }

    /// Employment state of `actor` with `ies:worksFor` the employer
    pub fn works_for(
        &mut self,
        actor: &Resource,
        employer: impl Into<Reference>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Arc<Resource>> {
        self.actor_state(
            actor,
            employer.into(),
            EntityKind::ResponsibleActor,
            "worksFor",
            "works_for",
            start,
            end,
        )
    }

    /// `ies:InPost` state of `actor`, made part of the post
    pub fn in_post(
        &mut self,
        actor: &Resource,
        post: impl Into<Reference>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Arc<Resource>> {
        require(actor, EntityKind::ResponsibleActor, "in_post")?;
        let post = self.resolve_reference(post, Some(EntityKind::Post), "in_post")?;
        require(&post, EntityKind::Element, "in_post")?;

        let state = self.create_state(
            actor,
            StateOptions {
                state_class: Some(ies("InPost")),
                start: start.map(str::to_string),
                end: end.map(str::to_string),
                ..StateOptions::default()
            },
        )?;
        self.add_part(&post, &state, None)?;
        Ok(state)
    }

    /// Legal ownership of an asset
    pub fn owns(
        &mut self,
        actor: &Resource,
        owned: impl Into<Reference>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Arc<Resource>> {
        self.actor_state(actor, owned.into(), EntityKind::Asset, "owns", "owns", start, end)
    }

    pub fn user_of(
        &mut self,
        actor: &Resource,
        used: impl Into<Reference>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Arc<Resource>> {
        self.actor_state(actor, used.into(), EntityKind::Entity, "userOf", "user_of", start, end)
    }

    pub fn has_access_to(
        &mut self,
        actor: &Resource,
        accessed: impl Into<Reference>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Arc<Resource>> {
        self.actor_state(
            actor,
            accessed.into(),
            EntityKind::Entity,
            "hasAccessTo",
            "has_access_to",
            start,
            end,
        )
    }

    /// Possession without legal ownership
    pub fn in_possession_of(
        &mut self,
        actor: &Resource,
        possessed: impl Into<Reference>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Arc<Resource>> {
        self.actor_state(
            actor,
            possessed.into(),
            EntityKind::Entity,
            "inPossessionOf",
            "in_possession_of",
            start,
            end,
        )
    }

    // --- Event -----------------------------------------------------------

    /// Add a participant state linking `event` and the participating entity
    pub fn add_participant(
        &mut self,
        event: &Resource,
        participant: impl Into<Reference>,
        options: ParticipationOptions,
    ) -> Result<Arc<Resource>> {
        require(event, EntityKind::Event, "add_participant")?;
        let entity = self.resolve_reference(participant, Some(EntityKind::Entity), "add_participant")?;

        let ParticipationOptions {
            uri,
            participation_type,
            start,
            end,
        } = options;

        let uri = match uri {
            Some(uri) if !uri.is_empty() => uri,
            _ => self.generate_uri(""),
        };
        let class = participation_type
            .unwrap_or_else(|| EntityKind::EventParticipant.canonical_class());
        let kind = self.state_kind(&class, EntityKind::EventParticipant);

        let participation = self.create(
            kind,
            EntityOptions {
                uri: Some(uri),
                classes: Some(vec![class]),
                start,
                end,
                label: None,
            },
        )?;

        self.add_triple(Triple::iri(participation.uri(), ies("isParticipantIn"), event.uri()))?;
        self.add_triple(Triple::iri(
            participation.uri(),
            ies("isParticipationOf"),
            entity.uri(),
        ))?;
        Ok(participation)
    }
}
