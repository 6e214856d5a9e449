use docrepo::doc;
use docrepo::document::Document;
use docrepo::errors::ErrorKind;
use docrepo::transaction::Transaction;
use docrepo_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_commit_keeps_the_write() {
    run_test(
        create_test_context,
        |ctx| {
            let client = ctx.client();
            let collection = client.collection(ctx.database(), "letters");

            let tx = Transaction::begin(&client)?;
            collection.insert(doc! { "letter": "a" })?;
            tx.commit()?;

            assert_eq!(collection.count(&Document::new())?, 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_abort_restores_the_previous_state() {
    run_test(
        create_test_context,
        |ctx| {
            let client = ctx.client();
            let collection = client.collection(ctx.database(), "letters");
            collection.insert(doc! { "letter": "a" })?;

            let tx = Transaction::begin(&client)?;
            collection.insert(doc! { "letter": "b" })?;
            collection.delete(&doc! { "letter": "a" })?;
            tx.abort()?;

            assert_eq!(collection.count(&Document::new())?, 1);
            assert_eq!(collection.count(&doc! { "letter": "a" })?, 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_drop_without_commit_aborts() {
    run_test(
        create_test_context,
        |ctx| {
            let client = ctx.client();
            let collection = client.collection(ctx.database(), "letters");

            {
                let _tx = Transaction::begin(&client)?;
                collection.insert(doc! { "letter": "a" })?;
            }

            assert_eq!(collection.count(&Document::new())?, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_abort_covers_every_known_collection() {
    run_test(
        create_test_context,
        |ctx| {
            let client = ctx.client();
            let letters = client.collection(ctx.database(), "letters");
            let digits = client.collection(ctx.database(), "digits");

            let tx = Transaction::begin(&client)?;
            letters.insert(doc! { "letter": "a" })?;
            digits.insert(doc! { "digit": 1 })?;
            tx.abort()?;

            assert_eq!(letters.count(&Document::new())?, 0);
            assert_eq!(digits.count(&Document::new())?, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_abort_keeps_writes_committed_by_other_transactions() {
    run_test(
        create_test_context,
        |ctx| {
            let client = ctx.client();
            let collection = client.collection(ctx.database(), "letters");

            let tx = Transaction::begin(&client)?;

            // queues behind the open transaction, commits once it aborts
            let writer = {
                let client = client.clone();
                let collection = collection.clone();
                std::thread::spawn(move || -> docrepo::errors::RepoResult<()> {
                    let tx = Transaction::begin(&client)?;
                    collection.insert(doc! { "letter": "b" })?;
                    tx.commit()
                })
            };

            std::thread::sleep(std::time::Duration::from_millis(20));
            tx.abort()?;
            writer.join().expect("writer thread panicked")?;

            assert_eq!(collection.count(&doc! { "letter": "b" })?, 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_begin_after_disconnect() {
    run_test(
        create_test_context,
        |ctx| {
            let client = ctx.client();
            client.disconnect()?;

            let err = Transaction::begin(&client).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::Transaction);
            let cause = err.cause().expect("expected a cause");
            assert_eq!(cause.kind(), &ErrorKind::Connection);
            Ok(())
        },
        cleanup,
    )
}
