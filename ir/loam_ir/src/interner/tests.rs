use super::*;
use pretty_assertions::assert_eq;

#[test]
fn intern_and_lookup() {
    let interner = StringInterner::new();

    let alpha = interner.intern("alpha");
    let beta = interner.intern("beta");
    let alpha2 = interner.intern("alpha");

    assert_eq!(alpha, alpha2);
    assert_ne!(alpha, beta);
    assert_eq!(interner.lookup(alpha), "alpha");
    assert_eq!(interner.lookup(beta), "beta");
}

#[test]
fn empty_string_is_name_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn len_counts_distinct_strings() {
    let interner = StringInterner::new();
    assert!(interner.is_empty());

    interner.intern("one");
    interner.intern("two");
    interner.intern("one");

    assert_eq!(interner.len(), 3); // empty + one + two
    assert!(!interner.is_empty());
}

#[test]
fn lookup_static_outlives_borrow() {
    let interner = StringInterner::new();
    let name = interner.intern("persistent");
    let s: &'static str = interner.lookup_static(name);
    assert_eq!(s, "persistent");
}

#[test]
fn shared_interner_clones_share_storage() {
    let interner = SharedInterner::new();
    let clone = interner.clone();

    let a = interner.intern("shared");
    let b = clone.intern("shared");

    assert_eq!(a, b);
}

#[test]
fn concurrent_interning_converges() {
    let interner = SharedInterner::new();
    let mut handles = Vec::new();

    for _ in 0..8 {
        let interner = interner.clone();
        handles.push(std::thread::spawn(move || interner.intern("contended")));
    }

    let names: Vec<Name> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(names.windows(2).all(|w| w[0] == w[1]));
}
