//! Field checks for people and planet payloads.
//!
//! Payloads arrive as raw JSON so that type mismatches are reported per field.
//! Checks run in a fixed order and stop at the first failure; nothing is
//! applied unless the whole payload passes.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("{message}")]
    InvalidField { field: &'static str, message: String },
}

impl ValidationError {
    fn field(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError::InvalidField { field, message: message.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPerson {
    pub people_name: Option<String>,
    pub age: Option<i64>,
    pub force_alignment: Option<String>,
    pub height: Option<i64>,
}

/// Fields present in a people update; `None` means leave unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonChanges {
    pub people_name: Option<String>,
    pub age: Option<i64>,
    pub force_alignment: Option<String>,
    pub height: Option<i64>,
}

impl PersonChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlanet {
    pub planet_name: String,
    pub population: i64,
    pub weather: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanetChanges {
    pub planet_name: Option<String>,
    pub population: Option<i64>,
    pub weather: Option<String>,
}

impl PlanetChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn new_person(payload: &Value) -> Result<NewPerson, ValidationError> {
    let changes = person_changes(payload)?;
    Ok(NewPerson {
        people_name: changes.people_name,
        age: changes.age,
        force_alignment: changes.force_alignment,
        height: changes.height,
    })
}

pub fn person_changes(payload: &Value) -> Result<PersonChanges, ValidationError> {
    let obj = as_object(payload)?;
    Ok(PersonChanges {
        people_name: optional_string(obj, "people_name")?,
        age: optional_integer(obj, "age", 0)?,
        force_alignment: optional_string(obj, "force_alignment")?,
        height: optional_integer(obj, "height", 1)?,
    })
}

pub fn new_planet(payload: &Value) -> Result<NewPlanet, ValidationError> {
    let obj = as_object(payload)?;
    let planet_name = required_string(obj, "planet_name")?;
    let population = optional_integer(obj, "population", 0)?.unwrap_or(0);
    let weather = required_string(obj, "weather")?;
    Ok(NewPlanet { planet_name, population, weather })
}

pub fn planet_changes(payload: &Value) -> Result<PlanetChanges, ValidationError> {
    let obj = as_object(payload)?;
    Ok(PlanetChanges {
        planet_name: optional_string(obj, "planet_name")?,
        population: optional_integer(obj, "population", 0)?,
        weather: optional_string(obj, "weather")?,
    })
}

/// Emails are stored trimmed; the column holds at most 120 characters.
pub fn user_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::field("email", "email is required"));
    }
    if email.chars().count() > 120 {
        return Err(ValidationError::field("email", "email must be at most 120 characters"));
    }
    Ok(email.to_string())
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload.as_object().ok_or(ValidationError::NotAnObject)
}

fn optional_string(obj: &Map<String, Value>, field: &'static str) -> Result<Option<String>, ValidationError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::field(field, format!("{} must be a string", field))),
    }
}

fn required_string(obj: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    match optional_string(obj, field)? {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ValidationError::field(field, format!("{} is required", field))),
    }
}

fn optional_integer(obj: &Map<String, Value>, field: &'static str, min: i64) -> Result<Option<i64>, ValidationError> {
    let value = match obj.get(field) {
        None => return Ok(None),
        Some(v) => v,
    };
    let n = value
        .as_i64()
        .ok_or_else(|| ValidationError::field(field, format!("{} must be an integer", field)))?;
    if n < min {
        let bound = if min == 0 { "non-negative".to_string() } else { format!("at least {}", min) };
        return Err(ValidationError::field(field, format!("{} must be {}", field, bound)));
    }
    Ok(Some(n))
}
