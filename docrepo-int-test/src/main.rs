use docrepo::common::CancelToken;
use docrepo::document::Document;
use docrepo::errors::{ErrorKind, RepoError, RepoResult};
use docrepo::filter::{Filter, FilterProvider};
use docrepo::repository::{Convertible, Entity, FilterOptions, Repository};
use docrepo::update::{PartialUpdate, UpdateProvider};
use docrepo_int_test::test_util::{cleanup, create_test_context};
use std::fmt::{Display, Formatter};

#[derive(Debug, Default, Clone)]
pub struct StressRecord {
    pub first_name: String,
    pub last_name: String,
    pub processed: bool,
    pub failed: bool,
}

impl Entity for StressRecord {}

impl Convertible for StressRecord {
    fn to_document(&self) -> RepoResult<Document> {
        let mut document = Document::new();
        document.put("first_name", self.first_name.as_str())?;
        document.put("last_name", self.last_name.as_str())?;
        document.put("processed", self.processed)?;
        document.put("failed", self.failed)?;
        Ok(document)
    }

    fn from_document(document: &Document) -> RepoResult<Self> {
        let field = |name: &str| {
            document
                .get(name)
                .cloned()
                .ok_or_else(|| RepoError::new("Missing field", ErrorKind::ObjectMapping))
        };
        Ok(StressRecord {
            first_name: field("first_name")?.as_str().unwrap_or_default().to_string(),
            last_name: field("last_name")?.as_str().unwrap_or_default().to_string(),
            processed: matches!(field("processed")?, docrepo::common::Value::Bool(true)),
            failed: matches!(field("failed")?, docrepo::common::Value::Bool(true)),
        })
    }
}

struct NotProcessed;

impl FilterProvider for NotProcessed {
    fn to_query(&self) -> RepoResult<Document> {
        let mut query = Document::new();
        query.put("processed", false)?;
        Ok(query)
    }
}

impl Display for NotProcessed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "NotProcessed")
    }
}

struct MarkProcessed;

impl UpdateProvider<StressRecord> for MarkProcessed {
    fn to_update(&self) -> RepoResult<Document> {
        let mut mutation = Document::new();
        mutation.put("processed", true)?;
        Ok(mutation)
    }
}

impl Display for MarkProcessed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MarkProcessed")
    }
}

fn main() -> RepoResult<()> {
    println!("Starting stress test...");
    let ctx = create_test_context()?;
    let tok = CancelToken::none();

    let count = 100000;
    let repo: Repository<StressRecord> = Repository::new(ctx.client(), ctx.database());

    let start = std::time::Instant::now();
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let record = StressRecord {
            first_name: uuid::Uuid::new_v4().to_string(),
            last_name: uuid::Uuid::new_v4().to_string(),
            processed: false,
            failed: false,
        };
        ids.push(repo.create(&record, &tok)?);
    }
    let elapsed = start.elapsed();
    println!("Inserted {} records in {:?}", count, elapsed);

    let start = std::time::Instant::now();
    let pending = repo.filter(Some(&Filter::new(NotProcessed)), &FilterOptions::new(), &tok)?;
    let elapsed = start.elapsed();
    println!("Fetched {} pending records in {:?}", pending.len(), elapsed);

    let mark = PartialUpdate::new(MarkProcessed);
    let start = std::time::Instant::now();
    for id in &ids {
        repo.update(id, &mark, &tok)?;
    }
    let elapsed = start.elapsed();
    println!("Updated {} records in {:?}", ids.len(), elapsed);

    let start = std::time::Instant::now();
    let remaining = repo.count(Some(&Filter::new(NotProcessed)), &tok)?;
    println!("Counted {} pending records in {:?}", remaining, start.elapsed());

    cleanup(ctx)
}
