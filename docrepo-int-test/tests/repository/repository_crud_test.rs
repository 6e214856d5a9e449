use crate::repository::{by_name, generate_person, set_name, Person};
use docrepo::common::CancelToken;
use docrepo::document::DocumentId;
use docrepo::errors::ErrorKind;
use docrepo::repository::{FilterOptions, Repository};
use docrepo_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_create_then_get_round_trips() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();

            let person = generate_person();
            let id = repo.create(&person, &tok)?;

            let loaded = repo.get(&id, &tok)?;
            assert_eq!(loaded, person);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_create_returns_distinct_identifiers() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();

            let first = repo.create(&generate_person(), &tok)?;
            let second = repo.create(&generate_person(), &tok)?;
            assert_ne!(first, second);

            // both ids resolve to their own document
            assert!(repo.get(&first, &tok).is_ok());
            assert!(repo.get(&second, &tok).is_ok());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_visibility() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();

            let person = Person {
                name: "Jon Snow".to_string(),
                house: "Stark".to_string(),
                age: 24,
            };
            let id = repo.create(&person, &tok)?;

            repo.update(&id, &set_name("Arya Stark"), &tok)?;

            let arya = repo.filter(Some(&by_name("Arya Stark")), &FilterOptions::new(), &tok)?;
            assert_eq!(arya.len(), 1);
            // untouched fields survive the partial update
            assert_eq!(arya[0].house, "Stark");
            assert_eq!(arya[0].age, 24);

            let jon = repo.filter(Some(&by_name("Jon Snow")), &FilterOptions::new(), &tok)?;
            assert!(jon.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_visibility() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();

            let person = Person {
                name: "Jon Snow".to_string(),
                house: "Stark".to_string(),
                age: 24,
            };
            let id = repo.create(&person, &tok)?;
            assert_eq!(repo.count(None, &tok)?, 1);

            repo.delete(&id, &tok)?;

            let jon = repo.filter(Some(&by_name("Jon Snow")), &FilterOptions::new(), &tok)?;
            assert!(jon.is_empty());
            assert_eq!(repo.count(None, &tok)?, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_of_absent_document_is_silent() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();
            repo.create(&generate_person(), &tok)?;

            let absent = DocumentId::new().to_hex();
            repo.update(&absent, &set_name("Nobody"), &tok)?;

            // the present document is untouched
            assert_eq!(repo.count(None, &tok)?, 1);
            let nobody = repo.filter(Some(&by_name("Nobody")), &FilterOptions::new(), &tok)?;
            assert!(nobody.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_of_absent_document_is_silent() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();
            repo.create(&generate_person(), &tok)?;

            let absent = DocumentId::new().to_hex();
            repo.delete(&absent, &tok)?;

            assert_eq!(repo.count(None, &tok)?, 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_mutations_with_invalid_identifier() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();
            repo.create(&generate_person(), &tok)?;

            let err = repo
                .update("not-a-valid-id", &set_name("Nobody"), &tok)
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidId);

            let err = repo.delete("not-a-valid-id", &tok).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidId);

            assert_eq!(repo.count(None, &tok)?, 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_collection_override_is_a_separate_binding() {
    run_test(
        create_test_context,
        |ctx| {
            let default: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let named: Repository<Person> =
                Repository::with_collection(ctx.client(), ctx.database(), "people");

            let tok = CancelToken::none();
            default.create(&generate_person(), &tok)?;

            assert_eq!(default.count(None, &tok)?, 1);
            assert_eq!(named.count(None, &tok)?, 0);
            Ok(())
        },
        cleanup,
    )
}
