//! Integration tests for `DieselSavedBookRepository`.
//!
//! Runs against embedded PostgreSQL so the `(owner_id, external_id)` unique
//! constraint, owner-scoped deletes, ordering and `TEXT[]` columns are
//! exercised by the real database rather than by mocks.

use bookshelf::domain::ports::{
    SavedBookRepository, SavedBookRepositoryError, UserRepository, UserRepositoryError,
};
use bookshelf::domain::{
    EmailAddress, ExternalBookId, PasswordHash, SavedBook, SavedBookDraft, SavedBookId, User,
    UserId, UserName,
};
use bookshelf::outbound::persistence::{
    DbPool, DieselSavedBookRepository, DieselUserRepository, PoolConfig,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::{handle_cluster_setup_failure, provision_migrated_database};

struct TestContext {
    runtime: Runtime,
    books: DieselSavedBookRepository,
    users: DieselUserRepository,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn seed_user(&self, email: &str) -> Result<UserId, UserRepositoryError> {
        let user = User::new(
            UserId::random(),
            UserName::new("Reader").expect("valid name"),
            EmailAddress::new(email).expect("valid email"),
            PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
        );
        self.runtime.block_on(self.users.insert(&user))?;
        Ok(user.id().clone())
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = provision_migrated_database(&runtime)?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(database.url()).with_max_size(2)))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        books: DieselSavedBookRepository::new(pool.clone()),
        users: DieselUserRepository::new(pool),
        _database: database,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

// Whole seconds so values survive the microsecond precision of TIMESTAMPTZ.
fn at(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::minutes(offset_minutes)
}

fn book(owner: &UserId, external_id: &str, created_minutes: i64) -> SavedBook {
    SavedBook::new(SavedBookDraft {
        id: SavedBookId::random(),
        owner: owner.clone(),
        external_id: ExternalBookId::new(external_id).expect("valid id"),
        title: "The Dispossessed".to_owned(),
        authors: vec!["Ursula K. Le Guin".to_owned(), "Second Author".to_owned()],
        publish_year: "1974".to_owned(),
        isbns: vec!["0060125632".to_owned(), "9780060125639".to_owned()],
        cover_url: Some("https://covers.example/b/id/1-L.jpg".to_owned()),
        description: "An ambiguous utopia.".to_owned(),
        subjects: vec!["Anarchism".to_owned(), "Science fiction".to_owned()],
        created_at: at(created_minutes),
        updated_at: at(created_minutes),
    })
    .expect("valid saved book")
}

#[rstest]
fn second_insert_of_the_same_pair_is_a_duplicate(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: second_insert_of_the_same_pair_is_a_duplicate skipped");
        return;
    };
    let owner = context.seed_user("dup@example.com").expect("seed user");
    let first = book(&owner, "OL1234W", 0);
    let second = book(&owner, "OL1234W", 5);

    context
        .runtime
        .block_on(context.books.insert(&first))
        .expect("first insert");
    let result = context.runtime.block_on(context.books.insert(&second));

    assert_eq!(result, Err(SavedBookRepositoryError::Duplicate));
    let stored = context
        .runtime
        .block_on(
            context
                .books
                .find_by_owner_and_external_id(&owner, first.external_id()),
        )
        .expect("lookup");
    assert_eq!(stored.map(|found| found.id()), Some(first.id()));
}

#[rstest]
fn same_work_may_be_saved_by_different_owners(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: same_work_may_be_saved_by_different_owners skipped");
        return;
    };
    let ada = context.seed_user("ada@example.com").expect("seed user");
    let grace = context.seed_user("grace@example.com").expect("seed user");

    context
        .runtime
        .block_on(context.books.insert(&book(&ada, "OL1234W", 0)))
        .expect("first owner saves");
    context
        .runtime
        .block_on(context.books.insert(&book(&grace, "OL1234W", 0)))
        .expect("second owner saves");
}

#[rstest]
fn delete_with_another_owner_leaves_the_row(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_with_another_owner_leaves_the_row skipped");
        return;
    };
    let owner = context.seed_user("owner@example.com").expect("seed user");
    let intruder = context.seed_user("intruder@example.com").expect("seed user");
    let saved = book(&owner, "OL42W", 0);
    context
        .runtime
        .block_on(context.books.insert(&saved))
        .expect("insert");

    let foreign = context
        .runtime
        .block_on(context.books.delete_by_id_and_owner(&saved.id(), &intruder))
        .expect("foreign delete runs");
    assert_eq!(foreign, None);

    let listed = context
        .runtime
        .block_on(context.books.list_by_owner(&owner))
        .expect("list");
    assert_eq!(listed.len(), 1);

    let own = context
        .runtime
        .block_on(context.books.delete_by_id_and_owner(&saved.id(), &owner))
        .expect("owner delete runs");
    assert_eq!(own.map(|deleted| deleted.id()), Some(saved.id()));
}

#[rstest]
fn list_returns_newest_first(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: list_returns_newest_first skipped");
        return;
    };
    let owner = context.seed_user("list@example.com").expect("seed user");
    for (external_id, minutes) in [("OL1W", 0), ("OL3W", 20), ("OL2W", 10)] {
        context
            .runtime
            .block_on(context.books.insert(&book(&owner, external_id, minutes)))
            .expect("insert");
    }

    let listed = context
        .runtime
        .block_on(context.books.list_by_owner(&owner))
        .expect("list");

    let order: Vec<&str> = listed
        .iter()
        .map(|saved| saved.external_id().as_ref())
        .collect();
    assert_eq!(order, ["OL3W", "OL2W", "OL1W"]);
}

#[rstest]
fn array_columns_round_trip(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: array_columns_round_trip skipped");
        return;
    };
    let owner = context.seed_user("arrays@example.com").expect("seed user");
    let saved = book(&owner, "OL7W", 0);

    let inserted = context
        .runtime
        .block_on(context.books.insert(&saved))
        .expect("insert");
    let found = context
        .runtime
        .block_on(
            context
                .books
                .find_by_owner_and_external_id(&owner, saved.external_id()),
        )
        .expect("lookup")
        .expect("record exists");

    assert_eq!(inserted, saved);
    assert_eq!(found, saved);
    assert_eq!(found.authors(), ["Ursula K. Le Guin", "Second Author"]);
    assert_eq!(found.isbns(), ["0060125632", "9780060125639"]);
    assert_eq!(found.subjects(), ["Anarchism", "Science fiction"]);
}
