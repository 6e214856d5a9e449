use crate::repository::{by_house, by_name, generate_person, Person};
use docrepo::common::{CancelToken, SortOrder};
use docrepo::errors::ErrorKind;
use docrepo::repository::{limit_to, order_by, skip_by, FilterOptions, Repository};
use docrepo_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_filter_without_filter_returns_everything() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();

            for _ in 0..10 {
                repo.create(&generate_person(), &tok)?;
            }

            let all = repo.filter(None, &FilterOptions::new(), &tok)?;
            assert_eq!(all.len(), 10);
            assert_eq!(repo.count(None, &tok)?, 10);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_filter_and_count_agree() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();

            for i in 0..6 {
                let mut person = generate_person();
                person.house = if i % 2 == 0 { "Stark" } else { "Lannister" }.to_string();
                repo.create(&person, &tok)?;
            }

            let starks = repo.filter(Some(&by_house("Stark")), &FilterOptions::new(), &tok)?;
            assert_eq!(starks.len(), 3);
            assert!(starks.iter().all(|p| p.house == "Stark"));
            assert_eq!(repo.count(Some(&by_house("Stark")), &tok)?, 3);
            assert_eq!(repo.count(Some(&by_house("Tully")), &tok)?, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_pagination_slices_the_full_result() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();

            for _ in 0..10 {
                repo.create(&generate_person(), &tok)?;
            }

            let all = repo.filter(None, &FilterOptions::new(), &tok)?;

            let limited = repo.filter(None, &limit_to(4), &tok)?;
            assert_eq!(limited, all[..4]);

            let skipped = repo.filter(None, &skip_by(7), &tok)?;
            assert_eq!(skipped, all[7..]);

            let window = repo.filter(None, &FilterOptions::new().offset(3).limit(4), &tok)?;
            assert_eq!(window, all[3..7]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_pagination_beyond_the_end() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();

            for _ in 0..3 {
                repo.create(&generate_person(), &tok)?;
            }

            let past_end = repo.filter(None, &skip_by(50), &tok)?;
            assert!(past_end.is_empty());

            let oversized = repo.filter(None, &limit_to(50), &tok)?;
            assert_eq!(oversized.len(), 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_sorting() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();

            for age in [40, 20, 30] {
                let mut person = generate_person();
                person.age = age;
                repo.create(&person, &tok)?;
            }

            let ascending = repo.filter(None, &order_by("age", SortOrder::Ascending), &tok)?;
            let ages: Vec<i64> = ascending.iter().map(|p| p.age).collect();
            assert_eq!(ages, vec![20, 30, 40]);

            let descending = repo.filter(None, &order_by("age", SortOrder::Descending), &tok)?;
            let ages: Vec<i64> = descending.iter().map(|p| p.age).collect();
            assert_eq!(ages, vec![40, 30, 20]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_sort_with_pagination() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();

            for age in [50, 10, 40, 20, 30] {
                let mut person = generate_person();
                person.age = age;
                repo.create(&person, &tok)?;
            }

            let options = order_by("age", SortOrder::Ascending).offset(1).limit(2);
            let page = repo.filter(None, &options, &tok)?;
            let ages: Vec<i64> = page.iter().map(|p| p.age).collect();
            assert_eq!(ages, vec![20, 30]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_one() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();

            let mut person = generate_person();
            person.name = "Sansa Stark".to_string();
            repo.create(&person, &tok)?;
            repo.create(&generate_person(), &tok)?;

            let found = repo.find_one(Some(&by_name("Sansa Stark")), &tok)?;
            assert_eq!(found, person);

            let err = repo.find_one(Some(&by_name("Hodor")), &tok).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NotFound);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_cancelled_token_stops_queries() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: Repository<Person> = Repository::new(ctx.client(), ctx.database());
            let tok = CancelToken::none();
            repo.create(&generate_person(), &tok)?;

            let cancelled = CancelToken::none();
            cancelled.cancel();

            let err = repo
                .filter(None, &FilterOptions::new(), &cancelled)
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::OperationCancelled);

            let err = repo.count(None, &cancelled).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::OperationCancelled);
            Ok(())
        },
        cleanup,
    )
}
