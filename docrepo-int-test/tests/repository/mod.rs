mod repository_crud_test;
mod repository_search_test;

use docrepo::document::Document;
use docrepo::errors::{ErrorKind, RepoError, RepoResult};
use docrepo::filter::{Filter, FilterProvider};
use docrepo::repository::{Convertible, Entity};
use docrepo::update::{PartialUpdate, UpdateProvider};
use fake::faker::name::en::Name;
use fake::Fake;
use std::fmt::{Display, Formatter};

fn read_string(document: &Document, field: &str) -> RepoResult<String> {
    document
        .get(field)
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            RepoError::new(
                &format!("Missing field: {}", field),
                ErrorKind::ObjectMapping,
            )
        })
}

fn read_i64(document: &Document, field: &str) -> RepoResult<i64> {
    document
        .get(field)
        .and_then(|value| value.as_integer())
        .ok_or_else(|| {
            RepoError::new(
                &format!("Missing field: {}", field),
                ErrorKind::ObjectMapping,
            )
        })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub house: String,
    pub age: i64,
}

impl Entity for Person {}

impl Convertible for Person {
    fn to_document(&self) -> RepoResult<Document> {
        let mut document = Document::new();
        document.put("name", self.name.as_str())?;
        document.put("house", self.house.as_str())?;
        document.put("age", self.age)?;
        Ok(document)
    }

    fn from_document(document: &Document) -> RepoResult<Self> {
        Ok(Person {
            name: read_string(document, "name")?,
            house: read_string(document, "house")?,
            age: read_i64(document, "age")?,
        })
    }
}

pub fn generate_person() -> Person {
    Person {
        name: Name().fake(),
        house: Name().fake(),
        age: (18..90).fake(),
    }
}

/// Filter matching people by exact name.
pub struct ByName(pub String);

impl FilterProvider for ByName {
    fn to_query(&self) -> RepoResult<Document> {
        let mut query = Document::new();
        query.put("name", self.0.as_str())?;
        Ok(query)
    }
}

impl Display for ByName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ByName({})", self.0)
    }
}

pub fn by_name(name: &str) -> Filter {
    Filter::new(ByName(name.to_string()))
}

/// Filter matching people by exact house.
pub struct ByHouse(pub String);

impl FilterProvider for ByHouse {
    fn to_query(&self) -> RepoResult<Document> {
        let mut query = Document::new();
        query.put("house", self.0.as_str())?;
        Ok(query)
    }
}

impl Display for ByHouse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ByHouse({})", self.0)
    }
}

pub fn by_house(house: &str) -> Filter {
    Filter::new(ByHouse(house.to_string()))
}

/// Partial update renaming a person.
pub struct SetName(pub String);

impl UpdateProvider<Person> for SetName {
    fn to_update(&self) -> RepoResult<Document> {
        let mut mutation = Document::new();
        mutation.put("name", self.0.as_str())?;
        Ok(mutation)
    }
}

impl Display for SetName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SetName({})", self.0)
    }
}

pub fn set_name(name: &str) -> PartialUpdate<Person> {
    PartialUpdate::new(SetName(name.to_string()))
}

/// Filter whose translation always fails.
pub struct BrokenFilter;

impl FilterProvider for BrokenFilter {
    fn to_query(&self) -> RepoResult<Document> {
        Err(RepoError::new("Translation exploded", ErrorKind::Filter))
    }
}

impl Display for BrokenFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BrokenFilter")
    }
}

/// Update whose translation always fails.
pub struct BrokenUpdate;

impl UpdateProvider<Person> for BrokenUpdate {
    fn to_update(&self) -> RepoResult<Document> {
        Err(RepoError::new("Translation exploded", ErrorKind::Filter))
    }
}

impl Display for BrokenUpdate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BrokenUpdate")
    }
}
