//! Cross-module behavior of the prover and verifier.

use std::time::Duration;

use crate::{
    meets_difficulty, prove, sha1_hex, verify, CancelToken, Candidates, Error, Search, DIGEST_BITS,
};

#[test]
fn round_trip_over_small_difficulties() {
    for difficulty in 0..=12 {
        let solution = prove("round-trip", difficulty).unwrap();
        assert!(
            verify("round-trip", difficulty, &solution.nonce).unwrap(),
            "difficulty {} round-trip failed",
            difficulty
        );
    }
}

#[test]
fn weaker_difficulties_accept_the_same_nonce() {
    let solution = prove("monotone", 10).unwrap();

    // fewer required zero bits is a strictly weaker constraint
    for weaker in 0..10 {
        assert!(verify("monotone", weaker, &solution.nonce).unwrap());
    }
}

#[test]
fn verify_is_deterministic() {
    let solution = prove("repeat", 8).unwrap();

    for _ in 0..5 {
        assert!(verify("repeat", 8, &solution.nonce).unwrap());
    }
}

#[test]
fn sequential_search_returns_the_smallest_nonce() {
    let a = prove("determinism", 6).unwrap();
    let b = prove("determinism", 6).unwrap();
    assert_eq!(a.nonce, b.nonce);
    assert_eq!(a.digest, b.digest);
    assert_eq!(a.attempts, b.attempts);

    // the first satisfying candidate in stream order is the result
    let first = Candidates::new("determinism")
        .find(|c| meets_difficulty(&c.digest, 6).unwrap())
        .unwrap();
    assert_eq!(first.nonce, a.nonce);
}

#[test]
fn zero_difficulty_accepts_the_first_nonce() {
    let solution = prove("free", 0).unwrap();
    assert_eq!(solution.nonce, "0");
    assert_eq!(solution.attempts, 1);
}

// Regression fixtures pinned against an independent SHA-1 implementation.
#[test]
fn pinned_search_fixtures() {
    let solution = prove("test", 8).unwrap();
    assert_eq!(solution.nonce, "285");
    assert_eq!(solution.digest, "00f8c216e1d0cc71bae33e04138cb95a5c4eeb14");
    assert_eq!(solution.attempts, 646);

    let solution = prove("anything!!!", 8).unwrap();
    assert_eq!(solution.nonce, "6c");
    assert_eq!(solution.digest, "00e2a8f83f3e63bf7f7cae68bd430c80bf75b970");

    let solution = prove("test", 12).unwrap();
    assert_eq!(solution.nonce, "ec4");
    assert_eq!(solution.digest, "000677d830ff8fb1c77ffc459d4910ecf1031511");
}

#[test]
fn candidate_stream_restarts_from_any_offset() {
    let from_zero: Vec<_> = Candidates::new("stream").take(6).map(|c| c.nonce).collect();
    assert_eq!(from_zero, ["0", "1", "2", "3", "4", "5"]);

    let strided: Vec<_> = Candidates::with_offset("stream", 1, 2)
        .take(3)
        .map(|c| c.nonce)
        .collect();
    assert_eq!(strided, ["1", "3", "5"]);

    // the stream hashes the same text as the verifier path
    let candidate = Candidates::with_offset("stream", 10, 1).next().unwrap();
    assert_eq!(candidate.nonce, "a");
    assert_eq!(candidate.digest, sha1_hex(b"streama"));
}

#[test]
fn malformed_nonces_are_rejected() {
    assert!(matches!(
        verify("test", 8, "xyz"),
        Err(Error::InvalidNonce(_))
    ));
    assert!(matches!(verify("test", 8, ""), Err(Error::InvalidNonce(_))));
    assert!(matches!(
        verify("test", 8, "0x1f"),
        Err(Error::InvalidNonce(_))
    ));
}

#[test]
fn difficulty_beyond_the_digest_width_is_rejected() {
    assert!(matches!(
        prove("test", DIGEST_BITS + 1),
        Err(Error::DifficultyOutOfRange { .. })
    ));
    assert!(matches!(
        verify("test", DIGEST_BITS + 1, "0"),
        Err(Error::DifficultyOutOfRange { .. })
    ));
    assert!(matches!(
        Search::new("test", DIGEST_BITS + 1).run(&CancelToken::new()),
        Err(Error::DifficultyOutOfRange { .. })
    ));
}

#[test]
fn partitioned_search_finds_a_verifying_nonce() {
    let solution = Search::new("parallel", 8)
        .workers(4)
        .run(&CancelToken::new())
        .unwrap();

    // first-found-wins: the nonce verifies but need not be the smallest
    assert!(verify("parallel", 8, &solution.nonce).unwrap());
    assert!(solution.attempts > 0);
}

#[test]
fn single_worker_search_matches_the_sequential_prover() {
    let sequential = prove("one-worker", 8).unwrap();
    let searched = Search::new("one-worker", 8)
        .workers(1)
        .run(&CancelToken::new())
        .unwrap();
    assert_eq!(searched.nonce, sequential.nonce);
    assert_eq!(searched.digest, sequential.digest);
}

#[test]
fn cancellation_aborts_an_unsatisfiable_search() {
    // full-width difficulty only matches an all-zero digest, so the
    // search will not terminate on its own within the test
    let cancel = CancelToken::new();
    let canceller = cancel.clone();
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        canceller.cancel();
    });

    let result = Search::new("cancelled", DIGEST_BITS)
        .workers(2)
        .run(&cancel);
    assert_eq!(result.unwrap_err(), Error::Cancelled);
}

#[test]
fn pre_cancelled_search_stops_immediately() {
    let cancel = CancelToken::new();
    cancel.cancel();

    let result = Search::new("cancelled", DIGEST_BITS).run(&cancel);
    assert_eq!(result.unwrap_err(), Error::Cancelled);
}

#[test]
fn progress_observer_sees_the_running_search() {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    let reports = Arc::new(AtomicU64::new(0));
    let seen = Arc::clone(&reports);

    let cancel = CancelToken::new();
    let canceller = cancel.clone();
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(300));
        canceller.cancel();
    });

    let result = Search::new("observer", DIGEST_BITS)
        .workers(2)
        .on_progress(Duration::from_millis(100), move |progress| {
            assert!(progress.attempts > 0);
            seen.fetch_add(1, Ordering::Relaxed);
        })
        .run(&cancel);

    assert_eq!(result.unwrap_err(), Error::Cancelled);
    assert!(reports.load(Ordering::Relaxed) >= 1);
}
