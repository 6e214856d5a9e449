use docrepo::errors::RepoResult;
use docrepo::store::{InMemoryClient, StoreClient, StoreConfig};

#[ctor::ctor]
fn init_logging() {
    colog::init();
}

/// Shared state for one integration test: a connected client and a
/// test-unique database name, so tests never observe each other's data.
#[derive(Clone)]
pub struct TestContext {
    database: String,
    client: StoreClient,
}

impl TestContext {
    pub fn new(database: String, client: StoreClient) -> Self {
        Self { database, client }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn client(&self) -> StoreClient {
        self.client.clone()
    }
}

/// Connects a fresh in-memory client with a unique database name.
pub fn create_test_context() -> RepoResult<TestContext> {
    let id = uuid::Uuid::new_v4().simple().to_string();
    let config = StoreConfig::new(format!("memory://int-test-{}", id));
    let client = InMemoryClient::connect(&config)?;
    Ok(TestContext::new(format!("test-db-{}", id), client))
}

/// Releases the context's client.
pub fn cleanup(ctx: TestContext) -> RepoResult<()> {
    ctx.client().disconnect()
}

/// Runs a test with setup and teardown. Teardown runs whether the test
/// body succeeded or failed; the test's own error wins when both fail.
pub fn run_test<B, T, A>(before: B, test: T, after: A)
where
    B: Fn() -> RepoResult<TestContext>,
    T: Fn(TestContext) -> RepoResult<()>,
    A: Fn(TestContext) -> RepoResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let result = test(ctx.clone());
    let teardown = after(ctx);

    if let Err(e) = result {
        panic!("Test failed: {:?}", e);
    }
    if let Err(e) = teardown {
        panic!("After run failed: {:?}", e);
    }
}
