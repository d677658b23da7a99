//! Structural checks run before a document is hashed.

use super::{
    revision::{PRESET_TYPE_NAMES, Revision},
    types::{BasicType, TypeParameter, tuple_elements},
};
use crate::TypedDataError;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

type Types = BTreeMap<String, Vec<TypeParameter>>;

/// Field names a domain may use.
const DOMAIN_FIELDS: [&str; 4] = ["name", "version", "chainId", "revision"];

/// Detect the revision from the domain type and the domain's `revision` field.
pub(crate) fn detect_revision(
    types: &Types,
    domain: &Map<String, Value>,
) -> Result<Revision, TypedDataError> {
    let declared = match domain.get("revision") {
        None | Some(Value::Null) => 0,
        Some(Value::Number(n)) => n.as_u64().unwrap_or(u64::MAX),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(u64::MAX),
        Some(other) => {
            return Err(TypedDataError::InvalidDomain(format!(
                "invalid revision {other}"
            )));
        }
    };

    let revision = match declared {
        0 => Revision::V0,
        1 => Revision::V1,
        _ => {
            return Err(TypedDataError::InvalidDomain(format!(
                "unknown revision {declared}"
            )));
        }
    };

    if types.contains_key(revision.domain_type()) {
        tracing::debug!(%revision, "detected typed data revision");
        return Ok(revision);
    }

    let other = match revision {
        Revision::V0 => Revision::V1,
        Revision::V1 => Revision::V0,
    };
    if types.contains_key(other.domain_type()) {
        Err(TypedDataError::RevisionMismatch {
            revision: revision.to_string(),
            domain: other.domain_type().to_owned(),
        })
    } else {
        Err(TypedDataError::InvalidDomain(format!(
            "missing '{}' type",
            revision.domain_type()
        )))
    }
}

/// Check the type definitions and the domain of a document.
pub(crate) fn validate(
    types: &Types,
    revision: Revision,
    primary_type: &str,
    domain: &Map<String, Value>,
) -> Result<(), TypedDataError> {
    for name in types.keys() {
        validate_type_name(name)?;
    }
    if !types.contains_key(primary_type) {
        return Err(TypedDataError::UndefinedType(primary_type.to_owned()));
    }

    let checker = Checker { types, revision };
    let mut used = BTreeSet::new();
    let enum_types: BTreeSet<&str> = types
        .values()
        .flatten()
        .filter(|param| param.kind.trim_end_matches('*') == "enum")
        .filter_map(|param| param.contains.as_deref())
        .collect();

    for (name, params) in types {
        for param in params {
            if enum_types.contains(name.as_str()) {
                checker.check_variant(param, &mut used)?;
            } else {
                checker.check_parameter(param, &mut used)?;
            }
        }
    }

    for name in types.keys() {
        let referenced = used.contains(name.as_str())
            || name == primary_type
            || name == Revision::V0.domain_type()
            || name == Revision::V1.domain_type();
        if !referenced {
            return Err(TypedDataError::DanglingType(name.clone()));
        }
    }

    validate_domain(types, revision, domain)?;
    reject_cycles(types)
}

/// Naming rules for defined types.
fn validate_type_name(name: &str) -> Result<(), TypedDataError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if BasicType::from_name(name).is_some() {
        Some("name of a basic type")
    } else if PRESET_TYPE_NAMES.contains(&name) {
        Some("name of a preset type")
    } else if name.ends_with('*') {
        Some("name ends with '*'")
    } else if name.starts_with('(') && name.ends_with(')') {
        Some("name is enclosed in parentheses")
    } else if name.contains(',') {
        Some("name contains ','")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(TypedDataError::InvalidTypeName {
            name: name.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}

struct Checker<'a> {
    types: &'a Types,
    revision: Revision,
}

impl<'a> Checker<'a> {
    fn is_defined(&self, name: &str) -> bool {
        self.types.contains_key(name)
            || (self.revision == Revision::V1 && PRESET_TYPE_NAMES.contains(&name))
    }

    /// Check a reference to `kind`, which may be an array.
    fn check_reference(
        &self,
        kind: &'a str,
        used: &mut BTreeSet<&'a str>,
    ) -> Result<Option<BasicType>, TypedDataError> {
        let base = kind.strip_suffix('*').unwrap_or(kind);

        if let Some(basic) = BasicType::from_name(base) {
            if basic.since() > self.revision {
                return Err(TypedDataError::UnsupportedType {
                    kind: base.to_owned(),
                    revision: self.revision.version(),
                });
            }
            return Ok(Some(basic));
        }

        if !self.is_defined(base) {
            return Err(TypedDataError::UndefinedType(base.to_owned()));
        }
        used.insert(base);
        Ok(None)
    }

    fn check_parameter(
        &self,
        param: &'a TypeParameter,
        used: &mut BTreeSet<&'a str>,
    ) -> Result<(), TypedDataError> {
        let basic = self.check_reference(&param.kind, used)?;

        match (basic.is_some_and(BasicType::uses_contains), param.contains.as_deref()) {
            (true, None) => Err(TypedDataError::MissingContains(param.name.clone())),
            (true, Some(contains)) => {
                if !self.is_defined(contains) {
                    return Err(TypedDataError::UndefinedType(contains.to_owned()));
                }
                used.insert(contains);
                Ok(())
            }
            (false, Some(_)) => Err(TypedDataError::UnexpectedContains {
                name: param.name.clone(),
                kind: param.kind.clone(),
            }),
            (false, None) => Ok(()),
        }
    }

    /// Enum variants hold a tuple of types.
    fn check_variant(
        &self,
        param: &'a TypeParameter,
        used: &mut BTreeSet<&'a str>,
    ) -> Result<(), TypedDataError> {
        let elements = tuple_elements(&param.kind)
            .ok_or_else(|| TypedDataError::InvalidEnumVariant(param.name.clone()))?;

        for element in elements {
            if element.is_empty() {
                return Err(TypedDataError::InvalidEnumVariant(param.name.clone()));
            }
            if let Some(basic) = self.check_reference(element, used)? {
                if basic.uses_contains() {
                    return Err(TypedDataError::MissingContains(param.name.clone()));
                }
            }
        }
        Ok(())
    }
}

/// The domain type has 3 or 4 known fields, all of the revision's domain
/// field type, and the domain has a value for each.
fn validate_domain(
    types: &Types,
    revision: Revision,
    domain: &Map<String, Value>,
) -> Result<(), TypedDataError> {
    let fields = types
        .get(revision.domain_type())
        .ok_or_else(|| TypedDataError::UndefinedType(revision.domain_type().to_owned()))?;

    if !(3..=4).contains(&fields.len()) {
        return Err(TypedDataError::InvalidDomain(format!(
            "expected 3 or 4 fields, found {}",
            fields.len()
        )));
    }

    for field in fields {
        if !DOMAIN_FIELDS.contains(&field.name.as_str()) {
            return Err(TypedDataError::InvalidDomain(format!(
                "unknown field '{}'",
                field.name
            )));
        }
        if field.kind != revision.domain_field_type() {
            return Err(TypedDataError::InvalidDomain(format!(
                "field '{}' has type '{}' instead of '{}'",
                field.name,
                field.kind,
                revision.domain_field_type()
            )));
        }
        if !domain.contains_key(&field.name) {
            return Err(TypedDataError::InvalidDomain(format!(
                "missing value for '{}'",
                field.name
            )));
        }
    }

    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

/// Reject types that refer back to themselves, directly or not.
fn reject_cycles(types: &Types) -> Result<(), TypedDataError> {
    fn visit<'a>(
        types: &'a Types,
        name: &'a str,
        state: &mut BTreeMap<&'a str, Visit>,
    ) -> Result<(), TypedDataError> {
        match state.get(name) {
            Some(Visit::Done) => return Ok(()),
            Some(Visit::InProgress) => {
                return Err(TypedDataError::RecursiveType(name.to_owned()));
            }
            None => {}
        }

        let Some(params) = types.get(name) else {
            return Ok(());
        };

        state.insert(name, Visit::InProgress);
        for param in params {
            for reference in references(param) {
                visit(types, reference, state)?;
            }
        }
        state.insert(name, Visit::Done);
        Ok(())
    }

    let mut state = BTreeMap::new();
    for name in types.keys() {
        visit(types, name, &mut state)?;
    }
    Ok(())
}

/// Every type name a parameter mentions, including `contains`.
fn references(param: &TypeParameter) -> impl Iterator<Item = &str> {
    let kinds: Vec<&str> = match tuple_elements(&param.kind) {
        Some(elements) => elements,
        None => vec![param.kind.as_str()],
    };

    kinds
        .into_iter()
        .map(|kind| kind.trim_end_matches('*'))
        .chain(param.contains.as_deref())
}
